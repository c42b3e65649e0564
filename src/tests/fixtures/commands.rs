use chrono::{Duration, NaiveDateTime};

use crate::modules::reservations::core::actor::Actor;
use crate::modules::reservations::core::reservation::Reservation;
use crate::modules::reservations::core::time_adjustment::AdjustmentReason;
use crate::modules::reservations::core::time_model::{BookedSlot, parse_date};
use crate::modules::reservations::core::transitions::TransitionKind;
use crate::modules::reservations::use_cases::record_time_adjustment::command::RecordTimeAdjustment;
use crate::modules::reservations::use_cases::reserve_device::command::ReserveDevices;
use crate::modules::reservations::use_cases::transition_reservation::command::TransitionReservation;
use crate::tests::fixtures::reservations::created_at;

/// `user-1` books one `type-a` device on 2025-03-01 from 14 to 16.
pub struct ReserveDevicesBuilder {
    command: ReserveDevices,
}

impl Default for ReserveDevicesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReserveDevicesBuilder {
    pub fn new() -> Self {
        Self {
            command: ReserveDevices {
                user_id: "user-1".into(),
                device_type_id: "type-a".into(),
                date: "2025-03-01".into(),
                start_hour: 14,
                end_hour: 16,
                preferred_device_id: None,
                units: 1,
                actor: Actor::customer("user-1"),
                requested_at: created_at(),
            },
        }
    }

    pub fn user(mut self, user_id: &str) -> Self {
        self.command.user_id = user_id.into();
        self.command.actor = Actor::customer(user_id);
        self
    }

    pub fn date(mut self, date: &str) -> Self {
        self.command.date = date.into();
        self
    }

    pub fn hours(mut self, start_hour: u32, end_hour: u32) -> Self {
        self.command.start_hour = start_hour;
        self.command.end_hour = end_hour;
        self
    }

    pub fn preferred_device_id(mut self, device_id: &str) -> Self {
        self.command.preferred_device_id = Some(device_id.into());
        self
    }

    pub fn units(mut self, units: u32) -> Self {
        self.command.units = units;
        self
    }

    pub fn actor(mut self, actor: Actor) -> Self {
        self.command.actor = actor;
        self
    }

    pub fn build_slot(&self) -> BookedSlot {
        BookedSlot::from_display(
            parse_date(&self.command.date).unwrap(),
            self.command.start_hour,
            self.command.end_hour,
        )
        .unwrap()
    }

    pub fn build(self) -> ReserveDevices {
        self.command
    }
}

pub fn transition(
    reservation_id: &str,
    kind: TransitionKind,
    actor: Actor,
    now: NaiveDateTime,
    reason: Option<&str>,
) -> TransitionReservation {
    TransitionReservation {
        reservation_id: reservation_id.into(),
        kind,
        actor,
        now,
        reason: reason.map(str::to_string),
        payment_amount: None,
    }
}

/// Staff correction that, unless changed, keeps the booked times and lands an hour after the end.
pub struct RecordTimeAdjustmentBuilder {
    command: RecordTimeAdjustment,
}

impl RecordTimeAdjustmentBuilder {
    pub fn for_reservation(reservation: &Reservation) -> Self {
        let interval = reservation.interval();
        Self {
            command: RecordTimeAdjustment {
                adjustment_id: "adj-1".into(),
                reservation_id: reservation.reservation_id.clone(),
                actual_start: interval.start,
                actual_end: interval.end,
                reason: AdjustmentReason::AdminAdjustment,
                reason_detail: None,
                actor: Actor::staff("staff-1"),
                adjusted_at: interval.end + Duration::hours(1),
            },
        }
    }

    pub fn id(mut self, adjustment_id: &str) -> Self {
        self.command.adjustment_id = adjustment_id.into();
        self
    }

    pub fn reason(mut self, reason: AdjustmentReason) -> Self {
        self.command.reason = reason;
        self
    }

    pub fn delay_start_by(mut self, by: Duration) -> Self {
        self.command.actual_start += by;
        self
    }

    pub fn extend_end_by(mut self, by: Duration) -> Self {
        self.command.actual_end += by;
        self
    }

    pub fn actor(mut self, actor: Actor) -> Self {
        self.command.actor = actor;
        self
    }

    pub fn build(self) -> RecordTimeAdjustment {
        self.command
    }
}
