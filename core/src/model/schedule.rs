use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use log::debug;

use crate::model::shift::ShiftType;
use crate::time::YearMonth;

/// A change applied to a [`ScheduleStore`], handed to every subscriber.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleChange {
    Assigned { date: NaiveDate, shift: ShiftType },
    Cleared { date: NaiveDate },
    Replaced { entries: usize },
}

pub type ScheduleListener = Box<dyn FnMut(&ScheduleChange)>;

/// Day-by-day shift assignments. A day without an entry has no shift.
#[derive(Default)]
pub struct ScheduleStore {
    days: BTreeMap<NaiveDate, ShiftType>,
    listeners: Vec<ScheduleListener>,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (NaiveDate, ShiftType)>) -> Self {
        Self {
            days: entries.into_iter().collect(),
            listeners: Vec::new(),
        }
    }

    /// Registers a callback run after every effective change.
    pub fn subscribe(&mut self, listener: ScheduleListener) {
        self.listeners.push(listener);
    }

    pub fn get(&self, date: NaiveDate) -> Option<ShiftType> {
        self.days.get(&date).copied()
    }

    /// Assigns `shift` to `date`, or clears the day when `shift` is `None`.
    pub fn set(&mut self, date: NaiveDate, shift: Option<ShiftType>) {
        let change = match shift {
            Some(shift) => {
                if self.days.insert(date, shift) == Some(shift) {
                    return;
                }
                ScheduleChange::Assigned { date, shift }
            }
            None => {
                if self.days.remove(&date).is_none() {
                    return;
                }
                ScheduleChange::Cleared { date }
            }
        };
        debug!("schedule change: {:?}", change);
        self.notify(&change);
    }

    pub fn clear(&mut self, date: NaiveDate) {
        self.set(date, None);
    }

    /// All assignments in ascending date order.
    pub fn snapshot(&self) -> Vec<(NaiveDate, ShiftType)> {
        self.days.iter().map(|(date, shift)| (*date, *shift)).collect()
    }

    pub fn entries_in(&self, month: YearMonth) -> impl Iterator<Item = (NaiveDate, ShiftType)> + '_ {
        self.days
            .range(month.first_day()..=month.last_day())
            .map(|(date, shift)| (*date, *shift))
    }

    /// Swaps the whole content for `entries`. The new map is built before the
    /// old one is dropped, so callers never see a half-filled store.
    pub fn replace_all(&mut self, entries: impl IntoIterator<Item = (NaiveDate, ShiftType)>) {
        let staged: BTreeMap<NaiveDate, ShiftType> = entries.into_iter().collect();
        self.days = staged;
        let change = ScheduleChange::Replaced {
            entries: self.days.len(),
        };
        debug!("schedule change: {:?}", change);
        self.notify(&change);
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    fn notify(&mut self, change: &ScheduleChange) {
        for listener in self.listeners.iter_mut() {
            listener(change);
        }
    }
}

impl fmt::Debug for ScheduleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduleStore")
            .field("days", &self.days)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl PartialEq for ScheduleStore {
    fn eq(&self, other: &Self) -> bool {
        self.days == other.days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn recording(store: &mut ScheduleStore) -> Rc<RefCell<Vec<ScheduleChange>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(Box::new(move |change| sink.borrow_mut().push(change.clone())));
        seen
    }

    #[test]
    fn test_set_get_and_overwrite() {
        let mut store = ScheduleStore::new();
        let day = date(2024, 3, 4);
        assert_eq!(store.get(day), None);

        store.set(day, Some(ShiftType::Morning));
        assert_eq!(store.get(day), Some(ShiftType::Morning));

        store.set(day, Some(ShiftType::Full));
        assert_eq!(store.get(day), Some(ShiftType::Full));
        assert_eq!(store.len(), 1);

        store.set(day, None);
        assert_eq!(store.get(day), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_clearing_empty_day_is_noop() {
        let mut store = ScheduleStore::from_entries([(date(2024, 3, 4), ShiftType::Night)]);
        let seen = recording(&mut store);

        store.set(date(2024, 3, 5), None);

        assert_eq!(store.snapshot(), vec![(date(2024, 3, 4), ShiftType::Night)]);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_listeners_see_effective_changes() {
        let mut store = ScheduleStore::new();
        let seen = recording(&mut store);
        let day = date(2024, 3, 4);

        store.set(day, Some(ShiftType::Evening));
        store.set(day, Some(ShiftType::Evening));
        store.clear(day);
        store.replace_all([(day, ShiftType::Day16), (date(2024, 3, 5), ShiftType::Full)]);

        assert_eq!(
            *seen.borrow(),
            vec![
                ScheduleChange::Assigned { date: day, shift: ShiftType::Evening },
                ScheduleChange::Cleared { date: day },
                ScheduleChange::Replaced { entries: 2 },
            ]
        );
    }

    #[test]
    fn test_snapshot_is_date_ordered() {
        let store = ScheduleStore::from_entries([
            (date(2024, 3, 10), ShiftType::Night),
            (date(2023, 12, 31), ShiftType::Full),
            (date(2024, 3, 1), ShiftType::Morning),
        ]);
        let dates: Vec<NaiveDate> = store.snapshot().into_iter().map(|(d, _)| d).collect();
        assert_eq!(dates, vec![date(2023, 12, 31), date(2024, 3, 1), date(2024, 3, 10)]);
    }

    #[test]
    fn test_entries_in_month_include_both_ends() {
        let store = ScheduleStore::from_entries([
            (date(2024, 2, 29), ShiftType::Night),
            (date(2024, 3, 1), ShiftType::Morning),
            (date(2024, 3, 31), ShiftType::Full),
            (date(2024, 4, 1), ShiftType::Evening),
        ]);
        let march = YearMonth::new(2024, 3).unwrap();
        let in_march: Vec<_> = store.entries_in(march).collect();
        assert_eq!(
            in_march,
            vec![(date(2024, 3, 1), ShiftType::Morning), (date(2024, 3, 31), ShiftType::Full)]
        );
    }

    #[test]
    fn test_replace_all_drops_previous_entries() {
        let mut store = ScheduleStore::from_entries([(date(2024, 1, 1), ShiftType::Night)]);
        store.replace_all([(date(2024, 5, 5), ShiftType::Day16)]);
        assert_eq!(store.get(date(2024, 1, 1)), None);
        assert_eq!(store.get(date(2024, 5, 5)), Some(ShiftType::Day16));
    }
}
