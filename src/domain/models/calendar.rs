use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStep {
    Previous,
    Next,
}

/// A calendar month, anchored on its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self { first: date - chrono::Days::new(u64::from(date.day0())) }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn days_in_month(&self) -> u32 {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .map(|last| last.day())
            .unwrap_or(31)
    }

    /// Weekday column of day 1, 0 = Sunday.
    pub fn leading_blanks(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        self.first.with_day(day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Stays put only at chrono's representable limits.
    pub fn shifted(&self, step: MonthStep) -> Self {
        let one = Months::new(1);
        let moved = match step {
            MonthStep::Next => self.first.checked_add_months(one),
            MonthStep::Previous => self.first.checked_sub_months(one),
        };
        moved.map(|first| Self { first }).unwrap_or(*self)
    }

    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.first.month0() as usize], self.year())
    }
}

/// Render state of one day in the month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySlotCell {
    pub date: NaiveDate,
    pub day_of_month: u32,
    pub has_availability: bool,
    pub slot_count: usize,
    pub is_selected: bool,
    pub is_today: bool,
}

impl DaySlotCell {
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn is_disabled(&self) -> bool {
        !self.has_availability
    }
}
