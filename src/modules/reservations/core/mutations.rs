// Row changes outside the reservation itself that a transition requires.
//
// The store applies them in the same atomic write as the reservation status change, so a
// device can never be left occupied without an active reservation behind it.

use chrono::NaiveDateTime;

use crate::modules::reservations::core::check_in::CheckIn;
use crate::modules::reservations::core::time_adjustment::TimeAdjustment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Device goes `in_use`. Fails the whole write when the unit is out of service or occupied.
    OccupyDevice { device_id: String },
    /// Device goes back to `available` (if it is `in_use`) and `last_used_at` is stamped.
    FreeDevice { device_id: String, at: NaiveDateTime },
    /// Only `reserved -> available`. Any other device status is left alone.
    ReleaseHold { device_id: String },
    OpenCheckIn(CheckIn),
    CloseCheckIn { reservation_id: String, at: NaiveDateTime },
    IncrementNoShow { user_id: String },
    AppendTimeAdjustment(TimeAdjustment),
}
