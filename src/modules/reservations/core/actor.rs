// Who is asking. Authentication happens upstream; the core only evaluates role guards.

use serde::{Deserialize, Serialize};

pub const SYSTEM_ACTOR_ID: &str = "system";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Customer,
    Staff,
    System,
}

impl std::str::FromStr for ActorRole {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "customer" | "user" => Ok(ActorRole::Customer),
            "staff" | "admin" => Ok(ActorRole::Staff),
            "system" => Ok(ActorRole::System),
            other => Err(format!("unknown actor role '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub actor_id: String,
    pub role: ActorRole,
}

impl Actor {
    pub fn customer(actor_id: impl Into<String>) -> Self {
        Self {
            actor_id: actor_id.into(),
            role: ActorRole::Customer,
        }
    }

    pub fn staff(actor_id: impl Into<String>) -> Self {
        Self {
            actor_id: actor_id.into(),
            role: ActorRole::Staff,
        }
    }

    pub fn system() -> Self {
        Self {
            actor_id: SYSTEM_ACTOR_ID.to_string(),
            role: ActorRole::System,
        }
    }

    pub fn is_staff(&self) -> bool {
        self.role == ActorRole::Staff
    }

    pub fn is_system(&self) -> bool {
        self.role == ActorRole::System
    }

    pub fn is_staff_or_system(&self) -> bool {
        self.is_staff() || self.is_system()
    }

    pub fn owns(&self, user_id: &str) -> bool {
        self.actor_id == user_id
    }
}
