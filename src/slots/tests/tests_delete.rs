#[cfg(test)]
mod tests {
    use crate::slots::SlotTable;
    use crate::tid::Tid;

    #[test]
    fn mark_deleted_removes_from_live_slots() {
        let mut table = SlotTable::new();
        let a = table.allocate().unwrap();
        table.write(a.slot, Tid::new(0, 0), b"x".to_vec());

        assert!(table.mark_deleted(a.slot));
        assert!(!table.is_live(a.slot));
        assert_eq!(table.live_slots().count(), 0);
    }

    #[test]
    fn mark_deleted_twice_is_a_silent_no_op() {
        let mut table = SlotTable::new();
        let a = table.allocate().unwrap();
        table.write(a.slot, Tid::new(0, 0), b"x".to_vec());
        assert!(table.mark_deleted(a.slot));
        assert!(!table.mark_deleted(a.slot));
        assert_eq!(table.counters().deletes, 1);
    }

    #[test]
    fn live_slots_ascend_by_slot_number() {
        let mut table = SlotTable::new();
        let mut slots = vec![];
        for i in 0..5u32 {
            let a = table.allocate().unwrap();
            table.write(a.slot, Tid::new(i, 0), vec![i as u8]);
            slots.push(a.slot);
        }
        table.mark_deleted(slots[2]);

        let remaining: Vec<u32> = table.live_slots().map(|(s, _)| s).collect();
        assert_eq!(remaining, vec![0, 1, 3, 4]);
    }

    #[test]
    fn needs_compaction_respects_threshold() {
        let mut table = SlotTable::new();
        let a = table.allocate().unwrap();
        table.write(a.slot, Tid::new(0, 0), b"x".to_vec());
        assert!(!table.needs_compaction(2));
        table.mark_deleted(a.slot);
        assert!(table.needs_compaction(1));
        assert!(!table.needs_compaction(2));
    }
}
