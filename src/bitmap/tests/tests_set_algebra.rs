#[cfg(test)]
mod tests {
    use crate::bitmap::CompressedBitmap;

    #[test]
    fn and_inplace_intersects() {
        let mut a = CompressedBitmap::from_values([1u32, 2, 3, 70_000]);
        let b = CompressedBitmap::from_values([2u32, 3, 4, 70_000]);
        a.and_inplace(&b);
        assert_eq!(a, CompressedBitmap::from_values([2u32, 3, 70_000]));
    }

    #[test]
    fn or_inplace_unions() {
        let mut a = CompressedBitmap::from_values([1u32, 2]);
        let b = CompressedBitmap::from_values([2u32, 3, 70_000]);
        a.or_inplace(&b);
        assert_eq!(a, CompressedBitmap::from_values([1u32, 2, 3, 70_000]));
    }

    #[test]
    fn andnot_inplace_subtracts() {
        let mut a = CompressedBitmap::from_values([1u32, 2, 3, 70_000]);
        let b = CompressedBitmap::from_values([2u32, 70_000]);
        a.andnot_inplace(&b);
        assert_eq!(a, CompressedBitmap::from_values([1u32, 3]));
    }

    #[test]
    fn and_with_disjoint_chunk_is_empty() {
        let mut a = CompressedBitmap::from_values([1u32]);
        let b = CompressedBitmap::from_values([70_000u32]);
        a.and_inplace(&b);
        assert!(a.is_empty());
    }

    #[test]
    fn andnot_with_no_overlap_is_noop() {
        let mut a = CompressedBitmap::from_values([1u32, 2, 3]);
        let before = a.copy();
        let b = CompressedBitmap::from_values([99u32]);
        a.andnot_inplace(&b);
        assert_eq!(a, before);
    }
}
