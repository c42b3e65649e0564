// Venue wall clock: UTC shifted by the configured offset, without a zone attached.

use chrono::{Duration, NaiveDateTime, Utc};

use crate::modules::reservations::core::ports::Clock;

#[derive(Debug, Clone, Copy)]
pub struct VenueClock {
    utc_offset: Duration,
}

impl VenueClock {
    pub fn new(utc_offset_hours: i32) -> Self {
        Self {
            utc_offset: Duration::hours(i64::from(utc_offset_hours)),
        }
    }

    pub fn local_from_utc(&self, utc: NaiveDateTime) -> NaiveDateTime {
        utc + self.utc_offset
    }
}

impl Clock for VenueClock {
    fn now(&self) -> NaiveDateTime {
        self.local_from_utc(Utc::now().naive_utc())
    }
}
