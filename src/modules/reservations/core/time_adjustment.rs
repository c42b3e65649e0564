// Append-only corrections of actual start/end times, kept for billing reconciliation.
//
// The as-booked schedule on the reservation is never rewritten; only the
// `actual_start_time`/`actual_end_time` shadow fields follow the latest adjustment.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentReason {
    CustomerExtend,
    EarlyFinish,
    LateStart,
    SystemError,
    AdminAdjustment,
}

impl AdjustmentReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentReason::CustomerExtend => "customer_extend",
            AdjustmentReason::EarlyFinish => "early_finish",
            AdjustmentReason::LateStart => "late_start",
            AdjustmentReason::SystemError => "system_error",
            AdjustmentReason::AdminAdjustment => "admin_adjustment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeAdjustment {
    pub adjustment_id: String,
    pub reservation_id: String,
    pub original_start: NaiveDateTime,
    pub original_end: NaiveDateTime,
    pub actual_start: NaiveDateTime,
    pub actual_end: NaiveDateTime,
    pub reason: AdjustmentReason,
    pub reason_detail: Option<String>,
    pub adjusted_by: String,
    pub adjusted_at: NaiveDateTime,
}

impl TimeAdjustment {
    pub fn original_duration_minutes(&self) -> i64 {
        (self.original_end - self.original_start).num_minutes()
    }

    pub fn actual_duration_minutes(&self) -> i64 {
        (self.actual_end - self.actual_start).num_minutes()
    }

    /// Positive when the customer played longer than booked.
    pub fn delta_minutes(&self) -> i64 {
        self.actual_duration_minutes() - self.original_duration_minutes()
    }
}
