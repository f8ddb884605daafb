//! Booking backend trait definition (port).
//!
//! Implementations live in carcare-infra (e.g., `HttpBookingApi`). The page
//! state machines in this crate only ever talk to the backend through it.

use carcare_types::booking::{BookingRecord, BookingStatus, CreateBookingRequest, CreatedBooking};
use carcare_types::error::ApiError;
use carcare_types::quote::{Quote, QuoteRequest};
use carcare_types::service::{PricingTable, Service};

/// The booking backend as seen by the client.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait BookingApi: Send + Sync {
    /// `GET /api/services`: the service catalog.
    fn list_services(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Service>, ApiError>> + Send;

    /// `GET /api/pricing`: packages per service.
    fn get_pricing(
        &self,
    ) -> impl std::future::Future<Output = Result<PricingTable, ApiError>> + Send;

    /// `POST /api/quote`: estimate a total for a selection.
    fn request_quote(
        &self,
        request: &QuoteRequest,
    ) -> impl std::future::Future<Output = Result<Quote, ApiError>> + Send;

    /// `POST /api/bookings`: create a booking.
    fn create_booking(
        &self,
        request: &CreateBookingRequest,
    ) -> impl std::future::Future<Output = Result<CreatedBooking, ApiError>> + Send;

    /// `GET /api/bookings[?status=..]`: list bookings, optionally by status.
    fn list_bookings(
        &self,
        status: Option<BookingStatus>,
    ) -> impl std::future::Future<Output = Result<Vec<BookingRecord>, ApiError>> + Send;

    /// `PATCH /api/bookings/{id}/status`: move one booking to a new status.
    fn update_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;
}
