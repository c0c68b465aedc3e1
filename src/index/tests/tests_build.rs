#[cfg(test)]
mod tests {
    use crate::config::IndexConfig;
    use crate::index::BiscuitIndex;
    use crate::tid::Tid;

    #[test]
    fn build_from_empty_iterator_yields_empty_index() {
        let (index, populated) = BiscuitIndex::build(std::iter::empty(), IndexConfig::default()).unwrap();
        assert_eq!(populated, 0);
        let stats = index.stats().unwrap();
        assert!(stats.contains("high_water_mark=0"));
    }

    #[test]
    fn build_skips_null_values() {
        let records = vec![
            (Tid::new(0, 0), Some(b"admin".to_vec())),
            (Tid::new(0, 1), None),
            (Tid::new(0, 2), Some(b"user".to_vec())),
        ];
        let (index, populated) = BiscuitIndex::build(records, IndexConfig::default()).unwrap();
        assert_eq!(populated, 2);
        let scan = index.begin_scan(b"%").unwrap();
        assert_eq!(scan.all_tids().len(), 2);
    }

    #[test]
    fn insert_truncates_to_max_record_len() {
        let config = IndexConfig {
            max_record_len: 3,
            ..IndexConfig::default()
        };
        let (index, _) = BiscuitIndex::build(std::iter::empty(), config).unwrap();
        index.insert(Some(b"abcdef".to_vec()), Tid::new(0, 0)).unwrap();

        let scan = index.begin_scan(b"abc").unwrap();
        assert_eq!(scan.all_tids(), vec![Tid::new(0, 0)]);

        let scan = index.begin_scan(b"abcdef").unwrap();
        assert!(scan.all_tids().is_empty());
    }

    #[test]
    fn insert_null_is_a_no_op_success() {
        let (index, _) = BiscuitIndex::build(std::iter::empty(), IndexConfig::default()).unwrap();
        assert!(!index.insert(None, Tid::new(0, 0)).unwrap());
        let stats = index.stats().unwrap();
        assert!(stats.contains("high_water_mark=0"));
    }
}
