use crate::domain::models::slot::TimeSlot;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One persisted day of availability: `{ "date": "2024-12-05", "time": ["09:00", ...] }`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AvailabilityRecord {
    pub date: NaiveDate,
    pub time: Vec<TimeSlot>,
}

/// Date to bookable time slots.
///
/// Every date present maps to a non-empty, strictly ascending slot list. A date
/// whose last slot is removed disappears from the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityMap {
    days: BTreeMap<NaiveDate, Vec<TimeSlot>>,
}

impl AvailabilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from persisted records. Duplicate dates are merged, empty
    /// records are dropped.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = AvailabilityRecord>,
    {
        let mut map = Self::new();
        for record in records {
            for slot in record.time {
                map.insert_slot(record.date, slot);
            }
        }
        map
    }

    pub fn slots(&self, date: NaiveDate) -> &[TimeSlot] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn slot_count(&self, date: NaiveDate) -> usize {
        self.slots(date).len()
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of dates with at least one slot.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[TimeSlot])> + '_ {
        self.days.iter().map(|(date, slots)| (*date, slots.as_slice()))
    }

    /// Returns `false` when the slot was already present.
    pub fn insert_slot(&mut self, date: NaiveDate, slot: TimeSlot) -> bool {
        let slots = self.days.entry(date).or_default();
        match slots.binary_search(&slot) {
            Ok(_) => false,
            Err(pos) => {
                slots.insert(pos, slot);
                true
            }
        }
    }

    pub fn remove_slot(&mut self, date: NaiveDate, slot: TimeSlot) -> bool {
        let Some(slots) = self.days.get_mut(&date) else {
            return false;
        };
        let Ok(pos) = slots.binary_search(&slot) else {
            return false;
        };
        slots.remove(pos);
        if slots.is_empty() {
            self.days.remove(&date);
        }
        true
    }

    /// Overwrites the day. An empty list removes the date.
    pub fn replace_day(&mut self, date: NaiveDate, mut slots: Vec<TimeSlot>) {
        slots.sort();
        slots.dedup();
        if slots.is_empty() {
            self.days.remove(&date);
        } else {
            self.days.insert(date, slots);
        }
    }

    pub fn clear_day(&mut self, date: NaiveDate) -> bool {
        self.days.remove(&date).is_some()
    }

    /// Flat ascending records, one per date.
    pub fn to_records(&self) -> Vec<AvailabilityRecord> {
        self.days
            .iter()
            .map(|(date, slots)| AvailabilityRecord { date: *date, time: slots.clone() })
            .collect()
    }
}

impl FromIterator<(NaiveDate, TimeSlot)> for AvailabilityMap {
    fn from_iter<T: IntoIterator<Item = (NaiveDate, TimeSlot)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (date, slot) in iter {
            map.insert_slot(date, slot);
        }
        map
    }
}
