use serde::{Deserialize, Serialize};

use crate::modules::reservations::core::time_adjustment::TimeAdjustment;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReservationTimeAdjustedV1 {
    pub adjustment: TimeAdjustment,
}
