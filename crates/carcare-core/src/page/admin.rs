//! Admin page: the booking list, its status filter, and status transitions.

use carcare_types::booking::{BookingRecord, BookingStatus};
use carcare_types::error::{ApiError, TransitionError};
use tracing::{debug, info, warn};

use crate::api::BookingApi;
use crate::transition::check_transition;

pub struct AdminPage<A: BookingApi> {
    api: A,
    filter: Option<BookingStatus>,
    bookings: Vec<BookingRecord>,
}

impl<A: BookingApi> AdminPage<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            filter: None,
            bookings: Vec::new(),
        }
    }

    /// Start with `filter` already applied. Nothing is fetched until
    /// [`refresh`](Self::refresh).
    pub fn with_filter(mut self, filter: Option<BookingStatus>) -> Self {
        self.filter = filter;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn filter(&self) -> Option<BookingStatus> {
        self.filter
    }

    pub fn bookings(&self) -> &[BookingRecord] {
        &self.bookings
    }

    pub fn find(&self, id: &str) -> Option<&BookingRecord> {
        self.bookings.iter().find(|b| b.id == id)
    }

    /// Re-fetch the list under the current filter.
    ///
    /// On failure the previous list is kept and the error is logged and
    /// returned.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        match self.api.list_bookings(self.filter).await {
            Ok(bookings) => {
                debug!(
                    count = bookings.len(),
                    filter = self.filter.map(|s| s.as_str()).unwrap_or("all"),
                    "loaded bookings"
                );
                self.bookings = bookings;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to load bookings");
                Err(e)
            }
        }
    }

    /// Change the status filter. `None` shows every booking.
    ///
    /// Returns whether the filter changed; only a change re-fetches.
    pub async fn set_filter(&mut self, filter: Option<BookingStatus>) -> bool {
        if self.filter == filter {
            return false;
        }
        self.filter = filter;
        if let Err(e) = self.refresh().await {
            debug!(error = %e, "keeping previous booking list");
        }
        true
    }

    /// Move booking `id` to `to`, then re-fetch the list once.
    ///
    /// A transition the policy refuses for a listed booking is rejected
    /// without a request. Backend failures are logged and reported as
    /// `Ok(false)` with the list left as it was.
    pub async fn transition(
        &mut self,
        id: &str,
        to: BookingStatus,
    ) -> Result<bool, TransitionError> {
        if let Some(record) = self.find(id) {
            check_transition(record.status, to)?;
        }

        match self.api.update_status(id, to).await {
            Ok(()) => {
                info!(booking_id = %id, status = %to, "booking status updated");
                if let Err(e) = self.refresh().await {
                    debug!(error = %e, "keeping previous booking list");
                }
                Ok(true)
            }
            Err(e) => {
                warn!(booking_id = %id, status = %to, error = %e, "status update failed");
                Ok(false)
            }
        }
    }
}
