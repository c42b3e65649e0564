use chrono::{NaiveDate, NaiveDateTime};

use crate::modules::reservations::core::events::ReservationEvent;
use crate::modules::reservations::core::events::v1::reservation_requested::ReservationRequestedV1;
use crate::modules::reservations::core::ports::ReservationInsert;
use crate::modules::reservations::core::reservation::{
    PaymentStatus, Reservation, ReservationStatus,
};
use crate::modules::reservations::core::time_model::BookedSlot;

pub fn created_at() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2025-02-20T12:00", "%Y-%m-%dT%H:%M").unwrap()
}

/// Approved booking of `device-a-1` on 2025-03-01 from 14:00 to 16:00 unless overridden.
/// `hours` takes storage clock hours on `date`.
pub struct ReservationBuilder {
    reservation_id: String,
    user_id: String,
    device_id: Option<String>,
    date: NaiveDate,
    start_hour: u32,
    end_hour: u32,
    status: ReservationStatus,
}

impl Default for ReservationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservationBuilder {
    pub fn new() -> Self {
        Self {
            reservation_id: "r-1".into(),
            user_id: "user-1".into(),
            device_id: Some("device-a-1".into()),
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            start_hour: 14,
            end_hour: 16,
            status: ReservationStatus::Approved,
        }
    }

    pub fn id(mut self, reservation_id: &str) -> Self {
        self.reservation_id = reservation_id.into();
        self
    }

    pub fn user(mut self, user_id: &str) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn device(mut self, device_id: &str) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    pub fn no_device(mut self) -> Self {
        self.device_id = None;
        self
    }

    pub fn date(mut self, date: &str) -> Self {
        self.date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        self
    }

    pub fn hours(mut self, start_hour: u32, end_hour: u32) -> Self {
        self.start_hour = start_hour;
        self.end_hour = end_hour;
        self
    }

    pub fn status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn build(self) -> Reservation {
        Reservation {
            reservation_number: format!("GP-{}-0001", self.date.format("%Y%m%d")),
            reservation_id: self.reservation_id,
            user_id: self.user_id.clone(),
            device_type_id: "type-a".into(),
            device_id: self.device_id,
            slot: BookedSlot {
                date: self.date,
                start_hour: self.start_hour,
                end_hour: self.end_hour,
                rolled_over: false,
            },
            status: self.status,
            payment_status: PaymentStatus::Pending,
            checked_in_at: None,
            actual_start_time: None,
            actual_end_time: None,
            rejection_reason: None,
            cancelled_at: None,
            cancelled_by: None,
            cancellation_reason: None,
            created_at: created_at(),
            created_by: self.user_id.clone(),
            updated_at: created_at(),
            updated_by: self.user_id,
        }
    }
}

/// Store row for an already-built reservation, as if it had just been requested.
pub fn insert_of(reservation: &Reservation) -> ReservationInsert {
    ReservationInsert {
        reservation: reservation.clone(),
        event: ReservationEvent::ReservationRequestedV1(ReservationRequestedV1 {
            reservation_id: reservation.reservation_id.clone(),
            reservation_number: reservation.reservation_number.clone(),
            user_id: reservation.user_id.clone(),
            device_type_id: reservation.device_type_id.clone(),
            device_id: reservation.device_id.clone(),
            slot: reservation.slot,
            initial_status: reservation.status,
            requested_at: reservation.created_at,
            requested_by: reservation.created_by.clone(),
        }),
    }
}
