#[cfg(test)]
mod tests {
    use crate::positional::PositionalIndex;

    #[test]
    fn forward_and_reverse_agree_on_a_single_string() {
        let mut idx = PositionalIndex::new();
        let s = b"admin";
        for (p, &c) in s.iter().enumerate() {
            idx.add_char(7, c, p, s.len());
        }

        assert!(idx.forward_get(b'a', 0).unwrap().contains(7));
        assert!(idx.forward_get(b'n', 4).unwrap().contains(7));
        assert!(idx.forward_get(b'x', 0).is_none());

        // reverse offset -1 is the last character
        assert!(idx.reverse_get(b'n', -1).unwrap().contains(7));
        assert!(idx.reverse_get(b'a', -5).unwrap().contains(7));
    }

    #[test]
    fn absent_position_returns_none() {
        let idx = PositionalIndex::new();
        assert!(idx.forward_get(b'z', 10).is_none());
    }

    #[test]
    fn multiple_slots_share_a_position_bitmap() {
        let mut idx = PositionalIndex::new();
        idx.add_char(1, b'a', 0, 3);
        idx.add_char(2, b'a', 0, 5);

        let bitmap = idx.forward_get(b'a', 0).unwrap();
        assert!(bitmap.contains(1));
        assert!(bitmap.contains(2));
        assert_eq!(bitmap.count(), 2);
    }
}
