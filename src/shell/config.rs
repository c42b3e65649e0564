// Scheduling configuration read from the environment.
//
// Every key is optional and falls back to its default. A present but malformed value is an
// error rather than a silent default.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::modules::reservations::use_cases::transition_reservation::decide::TransitionPolicy;

pub const BIND_ADDR: &str = "ARCADE_BIND_ADDR";
pub const UTC_OFFSET_HOURS: &str = "ARCADE_UTC_OFFSET_HOURS";
pub const CHECK_IN_GRACE_MINUTES: &str = "ARCADE_CHECK_IN_GRACE_MINUTES";
pub const NO_SHOW_GRACE_MINUTES: &str = "ARCADE_NO_SHOW_GRACE_MINUTES";
pub const SWEEP_INTERVAL_SECS: &str = "ARCADE_SWEEP_INTERVAL_SECS";
pub const ALLOCATION_TIMEOUT_MS: &str = "ARCADE_ALLOCATION_TIMEOUT_MS";
pub const AUTO_APPROVE_STAFF_BOOKINGS: &str = "ARCADE_AUTO_APPROVE_STAFF_BOOKINGS";
pub const SWEEP_ON_REQUEST: &str = "ARCADE_SWEEP_ON_REQUEST";
pub const CATALOG_PATH: &str = "ARCADE_CATALOG_PATH";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulingConfig {
    pub bind_addr: String,
    pub utc_offset_hours: i32,
    pub check_in_grace_minutes: u32,
    pub no_show_grace_minutes: u32,
    pub sweep_interval_secs: u64,
    pub allocation_timeout_ms: u64,
    pub auto_approve_staff_bookings: bool,
    pub sweep_on_request: bool,
    pub catalog_path: Option<String>,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            utc_offset_hours: 9,
            check_in_grace_minutes: 60,
            no_show_grace_minutes: 30,
            sweep_interval_secs: 60,
            allocation_timeout_ms: 2_000,
            auto_approve_staff_bookings: true,
            sweep_on_request: true,
            catalog_path: None,
        }
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            value: raw.clone(),
        }),
    }
}

fn positive(key: &'static str, value: u64) -> Result<u64, ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        });
    }
    Ok(value)
}

impl SchedulingConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let utc_offset_hours = parse_or(&lookup, UTC_OFFSET_HOURS, defaults.utc_offset_hours)?;
        if !(-12..=14).contains(&utc_offset_hours) {
            return Err(ConfigError::Invalid {
                key: UTC_OFFSET_HOURS,
                value: utc_offset_hours.to_string(),
            });
        }
        Ok(Self {
            bind_addr: lookup(BIND_ADDR).unwrap_or(defaults.bind_addr),
            utc_offset_hours,
            check_in_grace_minutes: parse_or(
                &lookup,
                CHECK_IN_GRACE_MINUTES,
                defaults.check_in_grace_minutes,
            )?,
            no_show_grace_minutes: parse_or(
                &lookup,
                NO_SHOW_GRACE_MINUTES,
                defaults.no_show_grace_minutes,
            )?,
            sweep_interval_secs: positive(
                SWEEP_INTERVAL_SECS,
                parse_or(&lookup, SWEEP_INTERVAL_SECS, defaults.sweep_interval_secs)?,
            )?,
            allocation_timeout_ms: positive(
                ALLOCATION_TIMEOUT_MS,
                parse_or(&lookup, ALLOCATION_TIMEOUT_MS, defaults.allocation_timeout_ms)?,
            )?,
            auto_approve_staff_bookings: parse_or(
                &lookup,
                AUTO_APPROVE_STAFF_BOOKINGS,
                defaults.auto_approve_staff_bookings,
            )?,
            sweep_on_request: parse_or(&lookup, SWEEP_ON_REQUEST, defaults.sweep_on_request)?,
            catalog_path: lookup(CATALOG_PATH).filter(|p| !p.trim().is_empty()),
        })
    }

    pub fn transition_policy(&self) -> TransitionPolicy {
        TransitionPolicy {
            check_in_grace: chrono::Duration::minutes(i64::from(self.check_in_grace_minutes)),
            no_show_grace: chrono::Duration::minutes(i64::from(self.no_show_grace_minutes)),
        }
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn allocation_timeout(&self) -> Duration {
        Duration::from_millis(self.allocation_timeout_ms)
    }
}
