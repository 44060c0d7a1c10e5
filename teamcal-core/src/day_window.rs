//! The single calendar day being rendered.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{TeamCalError, TeamCalResult};

/// Minutes on the vertical axis of the day view.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Start and end instants of one calendar day, exactly 24 hours apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds")]
pub struct DayWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

/// Unchecked form of a `DayWindow` as read from JSON.
#[derive(Deserialize)]
struct WindowBounds {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TryFrom<WindowBounds> for DayWindow {
    type Error = TeamCalError;

    fn try_from(bounds: WindowBounds) -> TeamCalResult<Self> {
        DayWindow::new(bounds.start, bounds.end)
    }
}

impl DayWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> TeamCalResult<Self> {
        if end - start != Duration::minutes(MINUTES_PER_DAY) {
            return Err(TeamCalError::InvalidDayWindow { start, end });
        }
        Ok(DayWindow { start, end })
    }

    /// Midnight to the following midnight.
    pub fn for_date(date: NaiveDate) -> Self {
        let start = date.and_time(NaiveTime::MIN);
        DayWindow {
            start,
            end: start + Duration::minutes(MINUTES_PER_DAY),
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Inclusive overlap: an event ending exactly at midnight still touches the day.
    pub fn touches(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start <= self.end && end >= self.start
    }

    pub fn clamp(&self, instant: NaiveDateTime) -> NaiveDateTime {
        instant.clamp(self.start, self.end)
    }

    /// Whole minutes from the start of the day, after clamping. Always in `0..=1440`.
    pub fn minutes_from_start(&self, instant: NaiveDateTime) -> i64 {
        (self.clamp(instant) - self.start).num_minutes()
    }
}
