//! HolidayCalendar port - 実行しない日の判定

use chrono::NaiveDate;

/// On a blackout day the whole invocation is a no-op.
pub trait HolidayCalendar: Send + Sync {
    fn is_blackout_day(&self, date: NaiveDate) -> bool;
}

/// Calendar without blackout days.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBlackout;

impl HolidayCalendar for NoBlackout {
    fn is_blackout_day(&self, _date: NaiveDate) -> bool {
        false
    }
}
