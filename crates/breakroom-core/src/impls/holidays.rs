//! FixedHolidays - 明示した日付（と任意で週末）を実行しない日にする

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::ports::HolidayCalendar;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedHolidays {
    dates: BTreeSet<NaiveDate>,
    skip_weekends: bool,
}

impl FixedHolidays {
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
            skip_weekends: false,
        }
    }

    pub fn skipping_weekends(mut self, skip: bool) -> Self {
        self.skip_weekends = skip;
        self
    }
}

impl HolidayCalendar for FixedHolidays {
    fn is_blackout_day(&self, date: NaiveDate) -> bool {
        if self.skip_weekends && matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return true;
        }
        self.dates.contains(&date)
    }
}
