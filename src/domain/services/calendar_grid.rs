use crate::domain::models::{
    availability::AvailabilityMap,
    calendar::{DaySlotCell, MonthStep, YearMonth},
};
use chrono::{Datelike, NaiveDate};
use tracing::debug;

const DAYS_PER_WEEK: usize = 7;

/// Consumer-facing month view over a read-only availability snapshot.
#[derive(Debug, Clone)]
pub struct CalendarGrid {
    month: YearMonth,
    availability: AvailabilityMap,
    selected: Option<NaiveDate>,
    today: NaiveDate,
}

impl CalendarGrid {
    pub fn new(month: YearMonth, availability: AvailabilityMap, today: NaiveDate) -> Self {
        Self { month, availability, selected: None, today }
    }

    /// Opens on the month containing `today`.
    pub fn starting_today(availability: AvailabilityMap, today: NaiveDate) -> Self {
        Self::new(YearMonth::containing(today), availability, today)
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn month_title(&self) -> String {
        self.month.title()
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn availability(&self) -> &AvailabilityMap {
        &self.availability
    }

    pub fn set_availability(&mut self, availability: AvailabilityMap) {
        self.availability = availability;
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    pub fn navigate_month(&mut self, step: MonthStep) {
        self.month = self.month.shifted(step);
        debug!("Calendar moved to {}", self.month.title());
    }

    /// Selects `date` if it is shown and has at least one slot. Returns whether
    /// the selection was taken.
    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        if !self.month.contains(date) || self.availability.slot_count(date) == 0 {
            debug!("Ignoring selection of unavailable date {}", date);
            return false;
        }
        self.selected = Some(date);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn cell(&self, date: NaiveDate) -> Option<DaySlotCell> {
        self.month.contains(date).then(|| self.build_cell(date))
    }

    /// Leading `None` placeholders up to the weekday of the 1st (Sunday first),
    /// then one cell per day of the month.
    pub fn cells(&self) -> Vec<Option<DaySlotCell>> {
        let leading = self.month.leading_blanks() as usize;
        let mut cells: Vec<Option<DaySlotCell>> = vec![None; leading];
        cells.extend(
            (1..=self.month.days_in_month())
                .filter_map(|day| self.month.day(day))
                .map(|date| Some(self.build_cell(date))),
        );
        cells
    }

    /// `cells()` padded with trailing placeholders into full weeks.
    pub fn weeks(&self) -> Vec<Vec<Option<DaySlotCell>>> {
        let mut cells = self.cells();
        let remainder = cells.len() % DAYS_PER_WEEK;
        if remainder != 0 {
            cells.resize(cells.len() + DAYS_PER_WEEK - remainder, None);
        }
        cells.chunks(DAYS_PER_WEEK).map(<[_]>::to_vec).collect()
    }

    pub fn has_any_availability(&self) -> bool {
        self.availability.dates().any(|date| self.month.contains(date))
    }

    fn build_cell(&self, date: NaiveDate) -> DaySlotCell {
        let slot_count = self.availability.slot_count(date);
        DaySlotCell {
            date,
            day_of_month: date.day(),
            has_availability: slot_count > 0,
            slot_count,
            is_selected: self.selected == Some(date),
            is_today: date == self.today,
        }
    }
}
