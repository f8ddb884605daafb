use serde::{Deserialize, Deserializer, Serialize};

use std::fmt;
use std::str::FromStr;

/// Booking lifecycle states.
///
/// - Pending: submitted by a customer, not yet reviewed
/// - Confirmed: accepted by staff
/// - Completed: the service was performed
/// - Cancelled: will not be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// All states, in the order the admin view offers them.
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    /// Wire value, as used in JSON bodies and the `status` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("invalid booking status: '{other}'")),
        }
    }
}

/// The in-progress, not-yet-submitted booking.
///
/// Text fields hold exactly what the customer typed. Coordinates are kept
/// as text and only parsed when a quote or booking request is built.
/// Mutation goes through the draft operations in `carcare-core`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingDraft {
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub service_name: String,
    /// `YYYY-MM-DD`.
    pub preferred_date: String,
    /// `HH:MM`.
    pub preferred_time: String,
    pub notes: String,
    /// Add-on codes in insertion order; order carries no meaning.
    pub selected_addons: Vec<String>,
    pub package_name: Option<String>,
    pub latitude: String,
    pub longitude: String,
    /// Total of the last quote, attached right before submission.
    pub quoted_price: Option<f64>,
}

impl BookingDraft {
    /// Names of the required fields that are still blank.
    ///
    /// Whitespace-only values count as blank.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let required = [
            ("customer_name", &self.customer_name),
            ("phone", &self.phone),
            ("address", &self.address),
            ("vehicle_make", &self.vehicle_make),
            ("vehicle_model", &self.vehicle_model),
            ("service_name", &self.service_name),
            ("preferred_date", &self.preferred_date),
            ("preferred_time", &self.preferred_time),
        ];

        required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }
}

/// Body of `POST /api/bookings`.
///
/// Optional keys are omitted entirely rather than sent empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub service_name: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub notes: String,
    pub selected_addons: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted_price: Option<f64>,
    pub status: BookingStatus,
}

/// Body of `PATCH /api/bookings/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: BookingStatus,
}

/// What the backend acknowledges after `POST /api/bookings`.
///
/// Only the identifier is read; an acknowledgement without one is still a
/// successful submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatedBooking {
    #[serde(default, rename = "_id", alias = "id")]
    pub id: Option<String>,
}

/// A persisted booking as the backend returns it.
///
/// The backend keys records by `_id`; `id` is accepted as well. Fields the
/// backend may leave out default to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub vehicle_make: String,
    #[serde(default)]
    pub vehicle_model: String,
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub preferred_date: String,
    #[serde(default)]
    pub preferred_time: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub selected_addons: Vec<String>,
    #[serde(default)]
    pub package_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    pub status: BookingStatus,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub quoted_price: Option<f64>,
}

impl BookingRecord {
    /// `"<make> <model>"`, trimmed.
    pub fn vehicle(&self) -> String {
        format!("{} {}", self.vehicle_make, self.vehicle_model)
            .trim()
            .to_string()
    }

    /// `"<date> <time>"`, trimmed.
    pub fn scheduled_for(&self) -> String {
        format!("{} {}", self.preferred_date, self.preferred_time)
            .trim()
            .to_string()
    }
}

/// Accept a number, a numeric string, an empty string, or null.
///
/// Older records were stored from form text, so coordinates and prices can
/// come back as strings.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrText::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_and_parse() {
        for status in BookingStatus::ALL {
            let parsed: BookingStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert_eq!(
            "Confirmed".parse::<BookingStatus>().unwrap(),
            BookingStatus::Confirmed
        );
        assert!("archived".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let body = StatusUpdateRequest {
            status: BookingStatus::Confirmed,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"status":"confirmed"}"#
        );
    }

    #[test]
    fn test_empty_draft_misses_every_required_field() {
        let draft = BookingDraft::default();
        assert_eq!(draft.missing_required_fields().len(), 8);
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let draft = BookingDraft {
            customer_name: "Asha".to_string(),
            phone: "  ".to_string(),
            address: "12 MG Road".to_string(),
            vehicle_make: "Maruti".to_string(),
            vehicle_model: "Swift".to_string(),
            service_name: "Wash".to_string(),
            preferred_date: "2026-10-20".to_string(),
            preferred_time: "10:30".to_string(),
            ..Default::default()
        };
        assert_eq!(draft.missing_required_fields(), vec!["phone"]);
    }

    #[test]
    fn test_create_request_omits_empty_optionals() {
        let req = CreateBookingRequest {
            customer_name: "Asha".to_string(),
            phone: "555".to_string(),
            address: "12 MG Road".to_string(),
            vehicle_make: "Maruti".to_string(),
            vehicle_model: "Swift".to_string(),
            service_name: "Wash".to_string(),
            preferred_date: "2026-10-20".to_string(),
            preferred_time: "10:30".to_string(),
            notes: String::new(),
            selected_addons: Vec::new(),
            package_name: None,
            latitude: None,
            longitude: None,
            quoted_price: None,
            status: BookingStatus::Pending,
        };
        let value = serde_json::to_value(&req).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj["status"], "pending");
        assert!(!obj.contains_key("package_name"));
        assert!(!obj.contains_key("latitude"));
        assert!(!obj.contains_key("longitude"));
        assert!(!obj.contains_key("quoted_price"));
        assert_eq!(obj["selected_addons"], serde_json::json!([]));
    }

    #[test]
    fn test_record_accepts_underscore_id_and_text_numbers() {
        let json = r#"{
            "_id": "abc123",
            "customer_name": "Asha",
            "service_name": "Wash",
            "status": "pending",
            "latitude": "12.97",
            "longitude": "",
            "quoted_price": 33
        }"#;
        let record: BookingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "abc123");
        assert_eq!(record.status, BookingStatus::Pending);
        assert_eq!(record.latitude, Some(12.97));
        assert_eq!(record.longitude, None);
        assert_eq!(record.quoted_price, Some(33.0));
        assert!(record.package_name.is_none());
    }

    #[test]
    fn test_created_booking_id_is_optional() {
        let created: CreatedBooking =
            serde_json::from_str(r#"{"_id": "abc123", "status": "pending"}"#).unwrap();
        assert_eq!(created.id.as_deref(), Some("abc123"));

        let bare: CreatedBooking = serde_json::from_str(r#"{"ok": true}"#).unwrap();
        assert!(bare.id.is_none());
    }

    #[test]
    fn test_record_accepts_plain_id() {
        let json = r#"{"id": "b-1", "status": "completed", "vehicle_make": "Honda", "vehicle_model": "City"}"#;
        let record: BookingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "b-1");
        assert_eq!(record.vehicle(), "Honda City");
        assert_eq!(record.scheduled_for(), "");
    }
}
