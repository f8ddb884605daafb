//! The fixed add-on catalog.
//!
//! Add-ons are defined client-side and never fetched from the backend.
//! A draft's `selected_addons` only ever holds codes from [`ADDONS`].

use serde::Serialize;

/// An optional extra that can be bundled with a booking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AddOn {
    /// Stable code sent to the backend.
    pub code: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Client-side price in dollars.
    pub price: f64,
}

pub const PICKUP_DROP: &str = "pickup_drop";
pub const SANITIZATION: &str = "sanitization";
pub const ENGINE_CHECK: &str = "engine_check";

/// Every add-on the booking form offers, in display order.
pub const ADDONS: [AddOn; 3] = [
    AddOn {
        code: PICKUP_DROP,
        label: "Pick-up & Drop",
        price: 8.0,
    },
    AddOn {
        code: SANITIZATION,
        label: "Interior Sanitization",
        price: 10.0,
    },
    AddOn {
        code: ENGINE_CHECK,
        label: "Engine Health Check",
        price: 12.0,
    },
];

/// Find an add-on by its code.
pub fn find_addon(code: &str) -> Option<&'static AddOn> {
    ADDONS.iter().find(|a| a.code == code)
}

/// Whether `code` names an add-on in the catalog.
pub fn is_known_addon(code: &str) -> bool {
    find_addon(code).is_some()
}

/// Sum of the client-side prices of the given codes. Unknown codes add nothing.
pub fn addons_total<S: AsRef<str>>(codes: &[S]) -> f64 {
    codes
        .iter()
        .filter_map(|c| find_addon(c.as_ref()))
        .map(|a| a.price)
        .sum()
}

impl AddOn {
    /// Checkbox-style label, e.g. `Pick-up & Drop (+$8)`.
    pub fn display(&self) -> String {
        format!("{} (+${})", self.label, self.price)
    }
}
