use std::collections::{BTreeMap, BTreeSet};

/// Per-teacher record of reserved (day, slot) pairs and assigned hours.
///
/// Only the allocator writes to a ledger, at commit time; the scorer reads
/// through the query methods and never sees the raw maps.
#[derive(Debug, Clone, Default)]
pub struct TeacherLedger {
    max_hours_per_week: u32,
    reserved: BTreeMap<String, BTreeSet<String>>,
    daily_load: BTreeMap<String, u32>,
    assigned_hours: u32,
}

impl TeacherLedger {
    pub fn new(max_hours_per_week: u32) -> Self {
        Self {
            max_hours_per_week,
            ..Default::default()
        }
    }

    /// True while the teacher's load on `day` is below `max_hours_per_week`.
    ///
    /// The cap is compared against the per-day counter, not the weekly sum;
    /// that comparison is intentional, see DESIGN.md.
    pub fn has_daily_capacity(&self, day: &str) -> bool {
        self.daily_load(day) < self.max_hours_per_week
    }

    /// False iff the exact (day, slot) is already reserved for this teacher
    /// or the day is at cap.
    pub fn is_available(&self, day: &str, slot: &str) -> bool {
        if self
            .reserved
            .get(day)
            .is_some_and(|slots| slots.contains(slot))
        {
            return false;
        }
        self.has_daily_capacity(day)
    }

    pub fn reserve(&mut self, day: &str, slot: &str) {
        self.reserved
            .entry(day.to_string())
            .or_default()
            .insert(slot.to_string());
    }

    pub fn assign_hours(&mut self, day: &str, hours: u32) {
        *self.daily_load.entry(day.to_string()).or_default() += hours;
        self.assigned_hours += hours;
    }

    pub fn daily_load(&self, day: &str) -> u32 {
        self.daily_load.get(day).copied().unwrap_or(0)
    }

    pub fn assigned_hours(&self) -> u32 {
        self.assigned_hours
    }
}

/// Per-room record of reserved (day, slot) pairs.
#[derive(Debug, Clone, Default)]
pub struct RoomLedger {
    reserved: BTreeMap<String, BTreeSet<String>>,
}

impl RoomLedger {
    pub fn is_available(&self, day: &str, slot: &str) -> bool {
        !self
            .reserved
            .get(day)
            .is_some_and(|slots| slots.contains(slot))
    }

    pub fn reserve(&mut self, day: &str, slot: &str) {
        self.reserved
            .entry(day.to_string())
            .or_default()
            .insert(slot.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teacher_reservation_blocks_exact_pair_only() {
        let mut ledger = TeacherLedger::new(20);
        ledger.reserve("Monday", "9:00-10:20");
        assert!(!ledger.is_available("Monday", "9:00-10:20"));
        assert!(ledger.is_available("Monday", "10:30-11:50"));
        assert!(ledger.is_available("Tuesday", "9:00-10:20"));
    }

    #[test]
    fn cap_is_checked_per_day_not_per_week() {
        let mut ledger = TeacherLedger::new(4);
        ledger.assign_hours("Monday", 4);
        assert!(!ledger.has_daily_capacity("Monday"));
        assert!(!ledger.is_available("Monday", "9:00-10:20"));
        // Monday being full does not spill into Tuesday, even though the
        // weekly total already equals the cap.
        assert!(ledger.has_daily_capacity("Tuesday"));
        assert!(ledger.is_available("Tuesday", "9:00-10:20"));
    }

    #[test]
    fn zero_cap_blocks_every_day() {
        let ledger = TeacherLedger::new(0);
        assert!(!ledger.has_daily_capacity("Monday"));
        assert!(!ledger.is_available("Friday", "18:40-20:00"));
    }

    #[test]
    fn assigned_hours_sum_across_days() {
        let mut ledger = TeacherLedger::new(20);
        ledger.assign_hours("Monday", 2);
        ledger.assign_hours("Monday", 2);
        ledger.assign_hours("Wednesday", 2);
        assert_eq!(ledger.daily_load("Monday"), 4);
        assert_eq!(ledger.daily_load("Wednesday"), 2);
        assert_eq!(ledger.daily_load("Friday"), 0);
        assert_eq!(ledger.assigned_hours(), 6);
    }

    #[test]
    fn room_reservation_blocks_exact_pair_only() {
        let mut ledger = RoomLedger::default();
        assert!(ledger.is_available("Monday", "9:00-10:20"));
        ledger.reserve("Monday", "9:00-10:20");
        assert!(!ledger.is_available("Monday", "9:00-10:20"));
        assert!(ledger.is_available("Monday", "10:30-11:50"));
    }
}
