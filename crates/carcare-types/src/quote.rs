//! Quote request and response types for `POST /api/quote`.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/quote`.
///
/// `package_name` is omitted when no package is chosen. Coordinates are
/// only ever sent as a pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub service_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(default)]
    pub selected_addons: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// A server-computed estimate for one selection.
///
/// Only `total` is interpreted; the breakdown fields the backend adds are
/// kept verbatim in `details`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl Quote {
    /// A quote carrying only a total.
    pub fn with_total(total: f64) -> Self {
        Self {
            total: Some(total),
            details: serde_json::Map::new(),
        }
    }

    /// Total formatted for display, e.g. `$33.00`, or `-` when absent.
    pub fn display_total(&self) -> String {
        match self.total {
            Some(total) => format!("${total:.2}"),
            None => "-".to_string(),
        }
    }
}
