use std::sync::Mutex;

use chrono::NaiveDateTime;

use crate::modules::reservations::core::ports::Clock;

/// Venue clock pinned by the test.
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn at(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap()
    }
}
