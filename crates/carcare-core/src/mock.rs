//! Recording mock of the booking backend for page tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use carcare_types::booking::{BookingRecord, BookingStatus, CreateBookingRequest, CreatedBooking};
use carcare_types::error::ApiError;
use carcare_types::quote::{Quote, QuoteRequest};
use carcare_types::service::{PricingTable, Service};

use crate::api::BookingApi;

/// One call the mock received, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    ListServices,
    GetPricing,
    RequestQuote(QuoteRequest),
    /// The serialized body, so tests can check which keys were sent.
    CreateBooking(serde_json::Value),
    ListBookings(Option<BookingStatus>),
    UpdateStatus { id: String, status: BookingStatus },
}

/// A backend that answers from canned data and records every call.
///
/// Each operation can be switched to failing at any point of a test.
#[derive(Default)]
pub struct MockApi {
    pub services: Vec<Service>,
    pub pricing: Option<PricingTable>,
    pub quote_total: Mutex<Option<f64>>,
    pub bookings: Mutex<Vec<BookingRecord>>,
    pub fail_services: AtomicBool,
    pub fail_quote: AtomicBool,
    pub fail_create: AtomicBool,
    pub fail_list: AtomicBool,
    pub fail_update: AtomicBool,
    calls: Mutex<Vec<ApiCall>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_services(mut self, services: Vec<Service>) -> Self {
        self.services = services;
        self
    }

    pub fn with_pricing(mut self, pricing: PricingTable) -> Self {
        self.pricing = Some(pricing);
        self
    }

    pub fn with_quote_total(self, total: f64) -> Self {
        self.set_quote_total(Some(total));
        self
    }

    pub fn with_bookings(self, bookings: Vec<BookingRecord>) -> Self {
        *self.bookings.lock().unwrap() = bookings;
        self
    }

    pub fn set_quote_total(&self, total: Option<f64>) {
        *self.quote_total.lock().unwrap() = total;
    }

    pub fn fail(flag: &AtomicBool, failing: bool) {
        flag.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn failure(flag: &AtomicBool) -> Result<(), ApiError> {
        if flag.load(Ordering::SeqCst) {
            Err(ApiError::Status {
                status: 500,
                body: "internal error".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl BookingApi for MockApi {
    async fn list_services(&self) -> Result<Vec<Service>, ApiError> {
        self.record(ApiCall::ListServices);
        Self::failure(&self.fail_services)?;
        Ok(self.services.clone())
    }

    async fn get_pricing(&self) -> Result<PricingTable, ApiError> {
        self.record(ApiCall::GetPricing);
        self.pricing
            .clone()
            .ok_or_else(|| ApiError::Transport("connection refused".to_string()))
    }

    async fn request_quote(&self, request: &QuoteRequest) -> Result<Quote, ApiError> {
        self.record(ApiCall::RequestQuote(request.clone()));
        Self::failure(&self.fail_quote)?;
        Ok(match *self.quote_total.lock().unwrap() {
            Some(total) => Quote::with_total(total),
            None => Quote::default(),
        })
    }

    async fn create_booking(
        &self,
        request: &CreateBookingRequest,
    ) -> Result<CreatedBooking, ApiError> {
        let body = serde_json::to_value(request)
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        self.record(ApiCall::CreateBooking(body));
        Self::failure(&self.fail_create)?;
        Ok(CreatedBooking {
            id: Some("new-booking".to_string()),
        })
    }

    async fn list_bookings(
        &self,
        status: Option<BookingStatus>,
    ) -> Result<Vec<BookingRecord>, ApiError> {
        self.record(ApiCall::ListBookings(status));
        Self::failure(&self.fail_list)?;
        let bookings = self.bookings.lock().unwrap();
        Ok(bookings
            .iter()
            .filter(|b| status.is_none_or(|s| b.status == s))
            .cloned()
            .collect())
    }

    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<(), ApiError> {
        self.record(ApiCall::UpdateStatus {
            id: id.to_string(),
            status,
        });
        Self::failure(&self.fail_update)?;
        let mut bookings = self.bookings.lock().unwrap();
        match bookings.iter_mut().find(|b| b.id == id) {
            Some(record) => {
                record.status = status;
                Ok(())
            }
            None => Err(ApiError::Status {
                status: 404,
                body: "booking not found".to_string(),
            }),
        }
    }
}

/// A minimal record for admin tests.
pub fn record(id: &str, status: BookingStatus) -> BookingRecord {
    BookingRecord {
        id: id.to_string(),
        customer_name: "Asha".to_string(),
        phone: "555-0101".to_string(),
        address: "12 MG Road".to_string(),
        vehicle_make: "Maruti".to_string(),
        vehicle_model: "Swift".to_string(),
        service_name: "Wash".to_string(),
        preferred_date: "2026-10-20".to_string(),
        preferred_time: "10:30".to_string(),
        notes: None,
        selected_addons: Vec::new(),
        package_name: None,
        latitude: None,
        longitude: None,
        status,
        quoted_price: None,
    }
}
