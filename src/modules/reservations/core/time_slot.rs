// Rental time-slot templates: the catalog of bookable windows per device type.
//
// Templates are admin-edited and read-only for scheduling. Pricing metadata (credit options,
// 2-player surcharge) is carried for the pricing collaborator and only validated here.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::modules::reservations::core::time_model::{
    BookedSlot, Interval, TimeModelError, to_absolute_interval,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Early,
    Overnight,
    Regular,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditType {
    Fixed,
    Freeplay,
    Unlimited,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditOption {
    pub credit_type: CreditType,
    pub hours: Vec<u32>,
    /// Price per offered duration, keyed by hours.
    pub prices: BTreeMap<u32, u32>,
    pub fixed_credits: Option<u32>,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("at least one credit option is required")]
    NoCreditOptions,

    #[error("credit option {0:?} offers no durations")]
    NoDurations(CreditType),

    #[error("credit option {credit_type:?} has no price for {hours}h")]
    MissingPrice { credit_type: CreditType, hours: u32 },

    #[error("fixed credit options must set a positive credit count")]
    MissingFixedCredits,

    #[error("2-player play requires a surcharge")]
    MissingTwoPlayerSurcharge,

    #[error(transparent)]
    Hours(#[from] TimeModelError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlotTemplate {
    pub template_id: String,
    pub device_type_id: String,
    pub name: String,
    pub kind: SlotKind,
    /// Display hours (0..=29).
    pub start_hour: u32,
    pub end_hour: u32,
    pub credit_options: Vec<CreditOption>,
    pub enable_two_player: bool,
    pub two_player_surcharge: Option<u32>,
    pub is_active: bool,
}

impl TimeSlotTemplate {
    pub fn validate(&self) -> Result<(), TemplateError> {
        to_absolute_interval(NaiveDate::MIN, self.start_hour, self.end_hour)?;
        if self.credit_options.is_empty() {
            return Err(TemplateError::NoCreditOptions);
        }
        for option in &self.credit_options {
            if option.hours.is_empty() {
                return Err(TemplateError::NoDurations(option.credit_type));
            }
            if let Some(hours) = option
                .hours
                .iter()
                .find(|h| !option.prices.contains_key(h))
            {
                return Err(TemplateError::MissingPrice {
                    credit_type: option.credit_type,
                    hours: *hours,
                });
            }
            if option.credit_type == CreditType::Fixed
                && option.fixed_credits.unwrap_or(0) == 0
            {
                return Err(TemplateError::MissingFixedCredits);
            }
        }
        if self.enable_two_player && self.two_player_surcharge.is_none() {
            return Err(TemplateError::MissingTwoPlayerSurcharge);
        }
        Ok(())
    }

    pub fn interval_on(&self, business_date: NaiveDate) -> Result<Interval, TimeModelError> {
        to_absolute_interval(business_date, self.start_hour, self.end_hour)
    }

    pub fn booked_slot_on(&self, business_date: NaiveDate) -> Result<BookedSlot, TimeModelError> {
        BookedSlot::from_display(business_date, self.start_hour, self.end_hour)
    }
}
