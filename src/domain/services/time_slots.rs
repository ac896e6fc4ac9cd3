use crate::domain::models::slot::TimeSlot;
use serde::Serialize;

const AFTERNOON_START_HOUR: u32 = 12;
const EVENING_START_HOUR: u32 = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum DayPeriod {
    Morning,
    Afternoon,
    Evening,
}

impl DayPeriod {
    pub fn of(slot: TimeSlot) -> Self {
        match slot.hour() {
            h if h < AFTERNOON_START_HOUR => DayPeriod::Morning,
            h if h < EVENING_START_HOUR => DayPeriod::Afternoon,
            _ => DayPeriod::Evening,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayPeriod::Morning => "Morning",
            DayPeriod::Afternoon => "Afternoon",
            DayPeriod::Evening => "Evening",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeOfDayGroup {
    pub period: DayPeriod,
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerView {
    NoSlots,
    Groups(Vec<TimeOfDayGroup>),
}

/// Buckets slots by period, keeping input order within each bucket. Empty
/// buckets are omitted.
pub fn group_by_period(slots: &[TimeSlot]) -> Vec<TimeOfDayGroup> {
    [DayPeriod::Morning, DayPeriod::Afternoon, DayPeriod::Evening]
        .into_iter()
        .filter_map(|period| {
            let bucket: Vec<TimeSlot> = slots.iter().copied().filter(|s| DayPeriod::of(*s) == period).collect();
            (!bucket.is_empty()).then_some(TimeOfDayGroup { period, slots: bucket })
        })
        .collect()
}

/// Single-select picker over one day's slots.
#[derive(Debug, Clone, Default)]
pub struct TimeSlotPicker {
    slots: Vec<TimeSlot>,
    selected: Option<TimeSlot>,
}

impl TimeSlotPicker {
    pub fn new(slots: Vec<TimeSlot>) -> Self {
        Self { slots, selected: None }
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn view(&self) -> PickerView {
        if self.slots.is_empty() {
            PickerView::NoSlots
        } else {
            PickerView::Groups(group_by_period(&self.slots))
        }
    }

    pub fn selected_time(&self) -> Option<TimeSlot> {
        self.selected
    }

    pub fn is_selected(&self, slot: TimeSlot) -> bool {
        self.selected == Some(slot)
    }

    /// Replaces any previous selection. Times not offered for this day are ignored.
    pub fn select_time(&mut self, slot: TimeSlot) -> bool {
        if !self.slots.contains(&slot) {
            return false;
        }
        self.selected = Some(slot);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}
