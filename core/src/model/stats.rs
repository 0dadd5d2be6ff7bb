use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::shift::ShiftType;

/// Hour figures for one month.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OvertimeResult {
    pub worked_hours: u32,
    /// Flat `working_days * 8`.
    pub expected_hours: u32,
    pub working_days: u32,
    /// Worked hours above `contracted_hours`, never negative.
    pub overtime_hours: u32,
    /// Sum of the per-day contracted hours, with bayram eves at 5.
    pub contracted_hours: u32,
}

impl OvertimeResult {
    pub fn missing_hours(&self) -> u32 {
        self.expected_hours.saturating_sub(self.worked_hours)
    }
}

/// Number of assigned days per shift type. Every type has an entry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ShiftCounts(BTreeMap<ShiftType, u32>);

impl Default for ShiftCounts {
    fn default() -> Self {
        Self(ShiftType::ALL.into_iter().map(|shift| (shift, 0)).collect())
    }
}

impl ShiftCounts {
    pub fn add(&mut self, shift: ShiftType) {
        *self.0.entry(shift).or_default() += 1;
    }

    pub fn get(&self, shift: ShiftType) -> u32 {
        self.0.get(&shift).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShiftType, u32)> + '_ {
        self.0.iter().map(|(shift, count)| (*shift, *count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_hours_is_clamped() {
        let short = OvertimeResult {
            worked_hours: 100,
            expected_hours: 168,
            working_days: 21,
            overtime_hours: 0,
            contracted_hours: 168,
        };
        assert_eq!(short.missing_hours(), 68);

        let busy = OvertimeResult { worked_hours: 200, ..short };
        assert_eq!(busy.missing_hours(), 0);
    }

    #[test]
    fn test_counts_start_at_zero_for_every_type() {
        let mut counts = ShiftCounts::default();
        assert_eq!(counts.iter().count(), 5);
        counts.add(ShiftType::Night);
        counts.add(ShiftType::Night);
        assert_eq!(counts.get(ShiftType::Night), 2);
        assert_eq!(counts.get(ShiftType::Full), 0);
        assert_eq!(counts.total(), 2);
    }
}
