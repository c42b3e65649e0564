// Time arithmetic for bookable hour ranges.
//
// Conventions
// - Storage keeps true clock hours 0..=23 plus the calendar date the slot starts on.
// - The UI shows hours 0..=5 as 24..=29 so an overnight business day reads contiguously.
// - All overlap checks in the crate go through `intervals_overlap`.
//
// Boundaries
// - Pure functions. No clock reads, no input or output.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::modules::reservations::core::time_slot::SlotKind;

/// First clock hour of a business day. Earlier hours belong to the previous day's session.
pub const BUSINESS_DAY_START_HOUR: u32 = 6;
pub const MAX_DISPLAY_HOUR: u32 = 29;
/// Bookable calendar years. Wider dates parse but cannot carry grace windows or booking numbers.
pub const MIN_YEAR: i32 = 1970;
pub const MAX_YEAR: i32 = 9999;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TimeModelError {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("date {0} is outside the bookable calendar")]
    DateOutOfRange(NaiveDate),

    #[error("hour {0} is outside the display range 0..=29")]
    HourOutOfRange(u32),

    #[error("start hour {start} and end hour {end} describe an empty range")]
    EmptyRange { start: u32, end: u32 },
}

/// Half-open `[start, end)` wall-clock interval in venue local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    pub fn overlaps(&self, other: &Interval) -> bool {
        intervals_overlap(self, other)
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Single source of truth for "conflict".
pub fn intervals_overlap(a: &Interval, b: &Interval) -> bool {
    a.start < b.end && b.start < a.end
}

pub fn parse_date(value: &str) -> Result<NaiveDate, TimeModelError> {
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| TimeModelError::InvalidDate(value.to_string()))?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        return Err(TimeModelError::DateOutOfRange(date));
    }
    Ok(date)
}

/// Maps a clock hour to its display form: 0..=5 become 24..=29, everything else is kept.
pub fn normalize_display_hour(hour: u32) -> Result<u32, TimeModelError> {
    match hour {
        h if h > MAX_DISPLAY_HOUR => Err(TimeModelError::HourOutOfRange(h)),
        h if h < BUSINESS_DAY_START_HOUR => Ok(h + 24),
        h => Ok(h),
    }
}

/// Inverse of `normalize_display_hour`: returns the clock hour and whether it rolled into the next day.
pub fn to_clock_hour(display_hour: u32) -> Result<(u32, bool), TimeModelError> {
    match display_hour {
        h if h > MAX_DISPLAY_HOUR => Err(TimeModelError::HourOutOfRange(h)),
        h if h >= 24 => Ok((h - 24, true)),
        h => Ok((h, false)),
    }
}

pub fn belongs_to_previous_business_day(clock_hour: u32, kind: SlotKind) -> bool {
    kind == SlotKind::Overnight && clock_hour < BUSINESS_DAY_START_HOUR
}

/// Produces true timestamps for an hour range on `date`.
///
/// Hours may use the display convention (24..=29). When the end hour does not come after the
/// start hour the range wraps past midnight, so `22 -> 2` ends at 02:00 on the following day.
pub fn to_absolute_interval(
    date: NaiveDate,
    start_hour: u32,
    end_hour: u32,
) -> Result<Interval, TimeModelError> {
    if start_hour > MAX_DISPLAY_HOUR {
        return Err(TimeModelError::HourOutOfRange(start_hour));
    }
    if end_hour > MAX_DISPLAY_HOUR {
        return Err(TimeModelError::HourOutOfRange(end_hour));
    }
    if start_hour % 24 == end_hour % 24 {
        return Err(TimeModelError::EmptyRange {
            start: start_hour,
            end: end_hour,
        });
    }
    absolute(date, start_hour, end_hour).ok_or(TimeModelError::DateOutOfRange(date))
}

fn absolute(date: NaiveDate, start_hour: u32, end_hour: u32) -> Option<Interval> {
    let mut end_offset = end_hour;
    while end_offset <= start_hour {
        end_offset += 24;
    }
    let midnight = date.and_time(NaiveTime::MIN);
    Some(Interval {
        start: midnight.checked_add_signed(Duration::hours(i64::from(start_hour)))?,
        end: midnight.checked_add_signed(Duration::hours(i64::from(end_offset)))?,
    })
}

/// Storage form of a booked hour range.
///
/// `date` is the calendar date the slot starts on and both hours are true clock hours. An
/// `end_hour` that is not after `start_hour` means the slot ends on the following day.
/// `rolled_over` is set when the request named the start in display hours 24..=29, so the slot
/// starts the calendar day after the business day it is booked under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedSlot {
    pub date: NaiveDate,
    pub start_hour: u32,
    pub end_hour: u32,
    #[serde(default)]
    pub rolled_over: bool,
}

impl BookedSlot {
    /// Builds the storage form from a request expressed in display hours against a business date.
    pub fn from_display(
        business_date: NaiveDate,
        start_hour: u32,
        end_hour: u32,
    ) -> Result<Self, TimeModelError> {
        let interval = to_absolute_interval(business_date, start_hour, end_hour)?;
        Ok(Self {
            date: interval.start.date(),
            start_hour: interval.start.hour(),
            end_hour: interval.end.hour(),
            rolled_over: interval.start.date() != business_date,
        })
    }

    /// Slots built through `from_display` always fit the calendar; hand-built ones past
    /// `NaiveDate::MAX` saturate to an empty interval at the end of time.
    pub fn interval(&self) -> Interval {
        absolute(self.date, self.start_hour, self.end_hour).unwrap_or(Interval {
            start: NaiveDateTime::MAX,
            end: NaiveDateTime::MAX,
        })
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.interval().start
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        self.interval().end
    }

    /// The business day this slot is shown under.
    pub fn business_date(&self) -> NaiveDate {
        if self.rolled_over {
            self.date.pred_opt().unwrap_or(self.date)
        } else {
            self.date
        }
    }

    /// Hours as the UI shows them relative to `business_date`.
    pub fn display_hours(&self) -> (u32, u32) {
        let start = if self.business_date() != self.date {
            self.start_hour + 24
        } else {
            self.start_hour
        };
        let span = self.interval().duration_minutes() / 60;
        (start, start + span as u32)
    }
}
