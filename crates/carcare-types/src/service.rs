//! Service catalog and pricing table types.

use serde::{Deserialize, Serialize};

/// A bookable service as returned by `GET /api/services`.
///
/// `name` is the identifier within the catalog: drafts, quotes and the
/// pricing table all refer to a service by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_price: f64,
    pub duration_minutes: u32,
}

impl Service {
    /// Price formatted for display, e.g. `$15.00`.
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.base_price)
    }

    /// Duration formatted for display, e.g. `~ 30 min`.
    pub fn display_duration(&self) -> String {
        format!("~ {} min", self.duration_minutes)
    }
}

/// A pricing tier scoped to one service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
}

/// The packages offered for one service, keyed by the service's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePricing {
    pub name: String,
    #[serde(default)]
    pub packages: Vec<Package>,
}

/// Pricing table as returned by `GET /api/pricing`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingTable {
    #[serde(default)]
    pub services: Vec<ServicePricing>,
}

impl PricingTable {
    /// Packages offered for `service_name`, or an empty slice when the
    /// table has no entry for it.
    pub fn packages_for(&self, service_name: &str) -> &[Package] {
        self.services
            .iter()
            .find(|s| s.name == service_name)
            .map(|s| s.packages.as_slice())
            .unwrap_or(&[])
    }
}

/// Look up a service by name in a fetched catalog.
pub fn find_service<'a>(services: &'a [Service], name: &str) -> Option<&'a Service> {
    services.iter().find(|s| s.name == name)
}
