use serde::Deserialize;

use crate::modules::reservations::core::time_model::{
    BookedSlot, TimeModelError, parse_date,
};

/// Hours use the display convention (0..=29) relative to `date`, the business day.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AvailabilityQuery {
    #[serde(alias = "deviceTypeId")]
    pub device_type_id: String,
    pub date: String,
    #[serde(alias = "startHour")]
    pub start_hour: u32,
    #[serde(alias = "endHour")]
    pub end_hour: u32,
}

impl AvailabilityQuery {
    pub fn requested_slot(&self) -> Result<BookedSlot, TimeModelError> {
        BookedSlot::from_display(parse_date(&self.date)?, self.start_hour, self.end_hour)
    }
}
