// Seed catalog for the in-memory store, loaded from a JSON file at startup.

use std::path::Path;

use anyhow::{Context, bail};
use serde::Deserialize;

use crate::modules::reservations::core::device::{Device, DeviceType};
use crate::modules::reservations::core::time_slot::TimeSlotTemplate;

#[derive(Debug, Default, Deserialize)]
pub struct CatalogSeed {
    pub device_types: Vec<DeviceType>,
    pub devices: Vec<Device>,
    #[serde(default)]
    pub templates: Vec<TimeSlotTemplate>,
}

impl CatalogSeed {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("loading catalog {}", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let seed: CatalogSeed = serde_json::from_str(raw)?;
        seed.validate()?;
        Ok(seed)
    }

    fn validate(&self) -> anyhow::Result<()> {
        for device in &self.devices {
            if !self
                .device_types
                .iter()
                .any(|t| t.device_type_id == device.device_type_id)
            {
                bail!(
                    "device {} references unknown type {}",
                    device.device_id,
                    device.device_type_id
                );
            }
            if self.devices.iter().any(|other| {
                other.device_id != device.device_id
                    && other.device_type_id == device.device_type_id
                    && other.device_number == device.device_number
            }) {
                bail!(
                    "device number {} is used twice for type {}",
                    device.device_number,
                    device.device_type_id
                );
            }
        }
        for template in &self.templates {
            template
                .validate()
                .with_context(|| format!("template {}", template.template_id))?;
        }
        Ok(())
    }
}
