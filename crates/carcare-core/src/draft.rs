//! Booking draft mutation logic.
//!
//! The `BookingDraft` struct lives in `carcare-types`; this module provides
//! an extension trait (`BookingDraftExt`) with the only sanctioned ways of
//! changing it: setting a named field, selecting a service, toggling an
//! add-on, attaching a quote, and resetting. It also builds the outgoing
//! quote and booking requests from the draft.

use std::fmt;

use carcare_types::addon::is_known_addon;
use carcare_types::booking::{BookingDraft, BookingStatus, CreateBookingRequest};
use carcare_types::error::DraftError;
use carcare_types::quote::{Quote, QuoteRequest};
use carcare_types::service::{Package, PricingTable};
use tracing::warn;

/// A single-valued draft field addressable by name.
///
/// Add-ons are not listed here: they have set semantics and go through
/// [`BookingDraftExt::toggle_addon`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    CustomerName,
    Phone,
    Address,
    VehicleMake,
    VehicleModel,
    ServiceName,
    PackageName,
    PreferredDate,
    PreferredTime,
    Latitude,
    Longitude,
    Notes,
}

impl DraftField {
    pub const ALL: [DraftField; 12] = [
        DraftField::CustomerName,
        DraftField::Phone,
        DraftField::Address,
        DraftField::VehicleMake,
        DraftField::VehicleModel,
        DraftField::ServiceName,
        DraftField::PackageName,
        DraftField::PreferredDate,
        DraftField::PreferredTime,
        DraftField::Latitude,
        DraftField::Longitude,
        DraftField::Notes,
    ];

    /// Form/JSON name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            DraftField::CustomerName => "customer_name",
            DraftField::Phone => "phone",
            DraftField::Address => "address",
            DraftField::VehicleMake => "vehicle_make",
            DraftField::VehicleModel => "vehicle_model",
            DraftField::ServiceName => "service_name",
            DraftField::PackageName => "package_name",
            DraftField::PreferredDate => "preferred_date",
            DraftField::PreferredTime => "preferred_time",
            DraftField::Latitude => "latitude",
            DraftField::Longitude => "longitude",
            DraftField::Notes => "notes",
        }
    }

    /// Whether the field is part of the selection a quote is computed for.
    pub fn affects_quote(&self) -> bool {
        matches!(
            self,
            DraftField::ServiceName
                | DraftField::PackageName
                | DraftField::Latitude
                | DraftField::Longitude
        )
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Create an empty draft, the shape a booking page starts from.
pub fn new_draft() -> BookingDraft {
    BookingDraft::default()
}

/// Extension trait for `BookingDraft` mutation and request building.
pub trait BookingDraftExt {
    /// Replace a field's value. Returns whether the draft changed.
    ///
    /// `ServiceName` behaves like [`select_service`](Self::select_service);
    /// an empty `PackageName` clears the package.
    fn set_field(&mut self, field: DraftField, value: &str) -> bool;

    /// Select a service. Choosing a different service clears the package,
    /// since packages are scoped to one service. Returns whether the draft
    /// changed.
    fn select_service(&mut self, name: &str) -> bool;

    /// Check (`checked = true`) or uncheck an add-on. Returns whether the
    /// selection changed; unknown codes are rejected and change nothing.
    fn toggle_addon(&mut self, code: &str, checked: bool) -> Result<bool, DraftError>;

    /// Record the quote's total as `quoted_price` (cleared when there is
    /// no quote or the quote has no total).
    fn attach_quote(&mut self, quote: Option<&Quote>);

    /// Return every field to its initial empty value.
    fn reset(&mut self);

    /// The parsed coordinate pair, when both are filled in and numeric.
    fn coordinates(&self) -> Option<(f64, f64)>;

    /// Packages selectable for the current service.
    fn available_packages<'a>(&self, pricing: Option<&'a PricingTable>) -> &'a [Package];

    /// Body for `POST /api/quote`.
    fn to_quote_request(&self) -> QuoteRequest;

    /// Body for `POST /api/bookings`, always with status `pending`.
    fn to_create_request(&self) -> CreateBookingRequest;
}

impl BookingDraftExt for BookingDraft {
    fn set_field(&mut self, field: DraftField, value: &str) -> bool {
        let slot = match field {
            DraftField::ServiceName => return self.select_service(value),
            DraftField::PackageName => {
                let package = (!value.is_empty()).then(|| value.to_string());
                if self.package_name == package {
                    return false;
                }
                self.package_name = package;
                return true;
            }
            DraftField::CustomerName => &mut self.customer_name,
            DraftField::Phone => &mut self.phone,
            DraftField::Address => &mut self.address,
            DraftField::VehicleMake => &mut self.vehicle_make,
            DraftField::VehicleModel => &mut self.vehicle_model,
            DraftField::PreferredDate => &mut self.preferred_date,
            DraftField::PreferredTime => &mut self.preferred_time,
            DraftField::Latitude => &mut self.latitude,
            DraftField::Longitude => &mut self.longitude,
            DraftField::Notes => &mut self.notes,
        };

        if slot.as_str() == value {
            return false;
        }
        *slot = value.to_string();
        true
    }

    fn select_service(&mut self, name: &str) -> bool {
        if self.service_name == name {
            return false;
        }
        self.service_name = name.to_string();
        self.package_name = None;
        true
    }

    fn toggle_addon(&mut self, code: &str, checked: bool) -> Result<bool, DraftError> {
        if !is_known_addon(code) {
            return Err(DraftError::UnknownAddon(code.to_string()));
        }

        let present = self.selected_addons.iter().any(|c| c == code);
        match (checked, present) {
            (true, false) => {
                self.selected_addons.push(code.to_string());
                Ok(true)
            }
            (false, true) => {
                self.selected_addons.retain(|c| c != code);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn attach_quote(&mut self, quote: Option<&Quote>) {
        self.quoted_price = quote.and_then(|q| q.total);
    }

    fn reset(&mut self) {
        *self = new_draft();
    }

    fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.latitude.trim();
        let lng = self.longitude.trim();
        if lat.is_empty() || lng.is_empty() {
            return None;
        }

        match (lat.parse::<f64>(), lng.parse::<f64>()) {
            (Ok(lat), Ok(lng)) if lat.is_finite() && lng.is_finite() => Some((lat, lng)),
            _ => {
                warn!(latitude = lat, longitude = lng, "ignoring non-numeric coordinates");
                None
            }
        }
    }

    fn available_packages<'a>(&self, pricing: Option<&'a PricingTable>) -> &'a [Package] {
        match pricing {
            Some(table) => table.packages_for(&self.service_name),
            None => &[],
        }
    }

    fn to_quote_request(&self) -> QuoteRequest {
        let coords = self.coordinates();
        QuoteRequest {
            service_name: self.service_name.clone(),
            package_name: self.package_name.clone().filter(|p| !p.is_empty()),
            selected_addons: self.selected_addons.clone(),
            latitude: coords.map(|(lat, _)| lat),
            longitude: coords.map(|(_, lng)| lng),
        }
    }

    fn to_create_request(&self) -> CreateBookingRequest {
        let coords = self.coordinates();
        CreateBookingRequest {
            customer_name: self.customer_name.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            vehicle_make: self.vehicle_make.clone(),
            vehicle_model: self.vehicle_model.clone(),
            service_name: self.service_name.clone(),
            preferred_date: self.preferred_date.clone(),
            preferred_time: self.preferred_time.clone(),
            notes: self.notes.clone(),
            selected_addons: self.selected_addons.clone(),
            package_name: self.package_name.clone().filter(|p| !p.is_empty()),
            latitude: coords.map(|(lat, _)| lat),
            longitude: coords.map(|(_, lng)| lng),
            quoted_price: self.quoted_price,
            status: BookingStatus::Pending,
        }
    }
}
