//! A backend that refuses everything except listing canned bookings.

use carcare_core::api::BookingApi;
use carcare_types::booking::{BookingRecord, BookingStatus, CreateBookingRequest, CreatedBooking};
use carcare_types::error::ApiError;
use carcare_types::quote::{Quote, QuoteRequest};
use carcare_types::service::{PricingTable, Service};

#[derive(Clone, Default)]
pub struct OfflineApi {
    pub bookings: Vec<BookingRecord>,
}

fn refused<T>() -> Result<T, ApiError> {
    Err(ApiError::Transport("connection refused".to_string()))
}

impl BookingApi for OfflineApi {
    async fn list_services(&self) -> Result<Vec<Service>, ApiError> {
        refused()
    }

    async fn get_pricing(&self) -> Result<PricingTable, ApiError> {
        refused()
    }

    async fn request_quote(&self, _request: &QuoteRequest) -> Result<Quote, ApiError> {
        refused()
    }

    async fn create_booking(
        &self,
        _request: &CreateBookingRequest,
    ) -> Result<CreatedBooking, ApiError> {
        refused()
    }

    async fn list_bookings(
        &self,
        status: Option<BookingStatus>,
    ) -> Result<Vec<BookingRecord>, ApiError> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| status.is_none_or(|s| b.status == s))
            .cloned()
            .collect())
    }

    async fn update_status(&self, _id: &str, _status: BookingStatus) -> Result<(), ApiError> {
        Err(ApiError::Status {
            status: 500,
            body: "internal error".to_string(),
        })
    }
}

/// A listed booking in `status`.
pub fn booking(id: &str, status: BookingStatus) -> BookingRecord {
    serde_json::from_value(serde_json::json!({
        "_id": id,
        "customer_name": "Asha",
        "phone": "555-0101",
        "vehicle_make": "Maruti",
        "vehicle_model": "Swift",
        "service_name": "Wash",
        "preferred_date": "2026-10-20",
        "preferred_time": "10:30",
        "status": status,
    }))
    .unwrap()
}
