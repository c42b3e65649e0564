// Physical occupancy record, paired 1:1 with a reservation once check-in happens.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckInStatus {
    CheckedIn,
    CheckedOut,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    pub check_in_id: String,
    pub reservation_id: String,
    pub device_id: String,
    pub check_in_time: NaiveDateTime,
    pub check_out_time: Option<NaiveDateTime>,
    pub status: CheckInStatus,
    pub payment_amount: Option<u32>,
}

impl CheckIn {
    pub fn close(&mut self, at: NaiveDateTime) {
        if self.status == CheckInStatus::CheckedIn {
            self.check_out_time = Some(at);
            self.status = CheckInStatus::CheckedOut;
        }
    }

    pub fn occupied_minutes(&self) -> Option<i64> {
        self.check_out_time
            .map(|out| (out - self.check_in_time).num_minutes())
    }
}
