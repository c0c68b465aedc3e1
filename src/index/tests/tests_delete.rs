#[cfg(test)]
mod tests {
    use crate::config::IndexConfig;
    use crate::index::BiscuitIndex;
    use crate::tid::Tid;

    fn seeded(n: u32) -> BiscuitIndex {
        let records = (0..n).map(|i| (Tid::new(0, i as u16), Some(format!("rec{i}").into_bytes())));
        BiscuitIndex::build(records, IndexConfig::default()).unwrap().0
    }

    #[test]
    fn bulk_delete_removes_matching_tids_from_scans() {
        let index = seeded(5);
        let stats = index
            .bulk_delete(|tid| tid.offset == 1 || tid.offset == 3)
            .unwrap();
        assert_eq!(stats.tuples_removed, 2);

        let scan = index.begin_scan(b"%").unwrap();
        let mut remaining: Vec<u16> = scan.all_tids().iter().map(|t| t.offset).collect();
        remaining.sort_unstable();
        assert_eq!(remaining, vec![0, 2, 4]);
    }

    #[test]
    fn bulk_delete_is_a_no_op_when_predicate_never_matches() {
        let index = seeded(3);
        let stats = index.bulk_delete(|_| false).unwrap();
        assert_eq!(stats.tuples_removed, 0);
        let scan = index.begin_scan(b"%").unwrap();
        assert_eq!(scan.all_tids().len(), 3);
    }

    #[test]
    fn scenario_4_insert_delete_insert_then_lower_threshold_compact() {
        // Mirrors the end-to-end lifecycle scenario: 10 inserts, delete 2,
        // insert 1 more, "%" still sees all 9 live rows; then force a
        // compaction via a low threshold and confirm the scan is unchanged.
        let index = seeded(10);
        let stats = index.bulk_delete(|tid| tid.offset == 3 || tid.offset == 7).unwrap();
        assert_eq!(stats.tuples_removed, 2);

        index.insert(Some(b"rec10".to_vec()), Tid::new(0, 10)).unwrap();

        let scan = index.begin_scan(b"%").unwrap();
        assert_eq!(scan.all_tids().len(), 9);

        index.compact().unwrap();

        let scan = index.begin_scan(b"%").unwrap();
        assert_eq!(scan.all_tids().len(), 9);

        let scan = index.begin_scan(b"rec3").unwrap();
        assert!(scan.all_tids().is_empty());
    }

    #[test]
    fn reincarnated_slot_does_not_leak_the_prior_occupants_matches() {
        let index = seeded(1);
        index.bulk_delete(|_| true).unwrap();
        index.insert(Some(b"brandnew".to_vec()), Tid::new(1, 0)).unwrap();

        let scan = index.begin_scan(b"rec0").unwrap();
        assert!(scan.all_tids().is_empty());

        let scan = index.begin_scan(b"brandnew").unwrap();
        assert_eq!(scan.all_tids(), vec![Tid::new(1, 0)]);
    }
}
