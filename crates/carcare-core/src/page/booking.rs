//! Customer booking page.
//!
//! Holds the service catalog, the pricing table, the draft, the current
//! quote and the last user-facing message. Catalog, pricing and quote
//! failures are logged and otherwise silent; a failed submission is the only
//! failure the customer is told about.

use carcare_types::booking::BookingDraft;
use carcare_types::error::{ApiError, DraftError};
use carcare_types::quote::Quote;
use carcare_types::service::{Package, PricingTable, Service};
use tracing::{debug, info, warn};

use crate::api::BookingApi;
use crate::draft::{BookingDraftExt, DraftField, new_draft};

/// Shown after the backend accepted a booking.
pub const SUBMIT_SUCCESS_MESSAGE: &str = "Booking received! We will confirm shortly.";

/// Shown after any failed submission, whatever the cause.
pub const SUBMIT_FAILURE_MESSAGE: &str = "Could not submit booking. Please try again.";

/// Result of [`BookingPage::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The backend accepted the booking. The draft and quote were cleared.
    Submitted { booking_id: Option<String> },
    /// The request failed. The draft is untouched.
    Failed,
    /// Required fields are blank; nothing was sent.
    Incomplete { missing: Vec<&'static str> },
}

pub struct BookingPage<A: BookingApi> {
    api: A,
    services: Vec<Service>,
    pricing: Option<PricingTable>,
    loading: bool,
    draft: BookingDraft,
    quote: Option<Quote>,
    message: Option<String>,
}

impl<A: BookingApi> BookingPage<A> {
    /// A page that has not loaded its catalog yet.
    pub fn new(api: A) -> Self {
        Self {
            api,
            services: Vec::new(),
            pricing: None,
            loading: true,
            draft: new_draft(),
            quote: None,
            message: None,
        }
    }

    /// Fetch the service catalog and the pricing table concurrently.
    ///
    /// Either failure is logged and leaves its collection empty/unset.
    pub async fn load(&mut self) {
        self.loading = true;

        let (services, pricing) = tokio::join!(self.api.list_services(), self.api.get_pricing());

        match services {
            Ok(services) => {
                debug!(count = services.len(), "loaded service catalog");
                self.services = services;
            }
            Err(e) => warn!(error = %e, "failed to load service catalog"),
        }

        match pricing {
            Ok(pricing) => {
                debug!(services = pricing.services.len(), "loaded pricing table");
                self.pricing = Some(pricing);
            }
            Err(e) => warn!(error = %e, "failed to load pricing table"),
        }

        self.loading = false;
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn pricing(&self) -> Option<&PricingTable> {
        self.pricing.as_ref()
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn quote(&self) -> Option<&Quote> {
        self.quote.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Packages for the currently selected service, derived on every call.
    pub fn packages(&self) -> &[Package] {
        self.draft.available_packages(self.pricing.as_ref())
    }

    /// Set one field. A change to the quoted selection drops the quote.
    pub fn set_field(&mut self, field: DraftField, value: &str) -> bool {
        let changed = self.draft.set_field(field, value);
        if changed && field.affects_quote() {
            self.invalidate_quote();
        }
        changed
    }

    /// Select a service (clearing any package chosen for another one).
    pub fn select_service(&mut self, name: &str) -> bool {
        self.set_field(DraftField::ServiceName, name)
    }

    /// Check or uncheck an add-on. A change drops the quote.
    pub fn toggle_addon(&mut self, code: &str, checked: bool) -> Result<bool, DraftError> {
        let changed = self.draft.toggle_addon(code, checked)?;
        if changed {
            self.invalidate_quote();
        }
        Ok(changed)
    }

    fn invalidate_quote(&mut self) {
        if self.quote.take().is_some() {
            debug!("selection changed; dropped stale quote");
        }
    }

    /// Ask the backend to price the current selection.
    ///
    /// On failure the error is logged and returned; any previous quote is
    /// kept as it was.
    pub async fn request_quote(&mut self) -> Result<&Quote, ApiError> {
        let request = self.draft.to_quote_request();
        debug!(service = %request.service_name, addons = request.selected_addons.len(), "requesting quote");

        match self.api.request_quote(&request).await {
            Ok(quote) => Ok(&*self.quote.insert(quote)),
            Err(e) => {
                warn!(error = %e, "quote request failed");
                Err(e)
            }
        }
    }

    /// Submit the draft as a new pending booking.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let missing = self.draft.missing_required_fields();
        if !missing.is_empty() {
            return SubmitOutcome::Incomplete { missing };
        }

        self.message = None;

        // The live draft stays untouched until the backend accepts it.
        let mut outgoing = self.draft.clone();
        outgoing.attach_quote(self.quote.as_ref());
        let request = outgoing.to_create_request();

        match self.api.create_booking(&request).await {
            Ok(created) => {
                info!(
                    booking_id = created.id.as_deref().unwrap_or("-"),
                    service = %request.service_name,
                    "booking submitted"
                );
                self.draft.reset();
                self.quote = None;
                self.message = Some(SUBMIT_SUCCESS_MESSAGE.to_string());
                SubmitOutcome::Submitted {
                    booking_id: created.id,
                }
            }
            Err(e) => {
                warn!(error = %e, "booking submission failed");
                self.message = Some(SUBMIT_FAILURE_MESSAGE.to_string());
                SubmitOutcome::Failed
            }
        }
    }
}
