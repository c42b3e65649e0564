// The reservation lifecycle table.
//
// Every (status, transition) pair not listed in `target_status` is illegal. Guards that depend
// on the actor or the clock live in the transition decider; this table only knows shapes.

use serde::{Deserialize, Serialize};

use crate::modules::reservations::core::reservation::ReservationStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Approve,
    Reject,
    Cancel,
    CheckIn,
    NoShow,
    AutoStart,
    CheckOut,
}

impl TransitionKind {
    pub const ALL: [TransitionKind; 7] = [
        TransitionKind::Approve,
        TransitionKind::Reject,
        TransitionKind::Cancel,
        TransitionKind::CheckIn,
        TransitionKind::NoShow,
        TransitionKind::AutoStart,
        TransitionKind::CheckOut,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionKind::Approve => "approve",
            TransitionKind::Reject => "reject",
            TransitionKind::Cancel => "cancel",
            TransitionKind::CheckIn => "check_in",
            TransitionKind::NoShow => "no_show",
            TransitionKind::AutoStart => "auto_start",
            TransitionKind::CheckOut => "check_out",
        }
    }

    /// Notification topic emitted after the transition commits.
    pub fn topic(&self) -> &'static str {
        match self {
            TransitionKind::Approve => "reservation.approved",
            TransitionKind::Reject => "reservation.rejected",
            TransitionKind::Cancel => "reservation.cancelled",
            TransitionKind::CheckIn => "reservation.checked_in",
            TransitionKind::NoShow => "reservation.no_show",
            TransitionKind::AutoStart => "reservation.started",
            TransitionKind::CheckOut => "reservation.completed",
        }
    }
}

impl std::fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransitionKind {
    type Err = String;

    /// Accepts both `check_in` and the URL form `check-in`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().replace('-', "_");
        TransitionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| format!("unknown transition '{value}'"))
    }
}

pub fn target_status(from: ReservationStatus, kind: TransitionKind) -> Option<ReservationStatus> {
    use ReservationStatus::*;
    match (from, kind) {
        (Pending, TransitionKind::Approve) => Some(Approved),
        (Pending, TransitionKind::Reject) => Some(Rejected),
        (Pending | Approved, TransitionKind::Cancel) => Some(Cancelled),
        (Approved, TransitionKind::CheckIn) => Some(CheckedIn),
        (Approved, TransitionKind::NoShow) => Some(NoShow),
        (CheckedIn, TransitionKind::AutoStart) => Some(InUse),
        (CheckedIn | InUse, TransitionKind::CheckOut) => Some(Completed),
        _ => None,
    }
}
