use chrono::NaiveDateTime;

use crate::modules::reservations::core::actor::Actor;
use crate::modules::reservations::core::time_adjustment::AdjustmentReason;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTimeAdjustment {
    pub adjustment_id: String,
    pub reservation_id: String,
    pub actual_start: NaiveDateTime,
    pub actual_end: NaiveDateTime,
    pub reason: AdjustmentReason,
    pub reason_detail: Option<String>,
    pub actor: Actor,
    pub adjusted_at: NaiveDateTime,
}
