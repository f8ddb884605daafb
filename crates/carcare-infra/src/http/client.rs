//! HttpBookingApi -- concrete [`BookingApi`] implementation over the backend's
//! JSON API.
//!
//! Every endpoint lives under `<base_url>/api`. Non-2xx responses become
//! [`ApiError::Status`] carrying the response body; transport failures
//! become [`ApiError::Transport`].

use std::time::Duration;

use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use carcare_core::api::BookingApi;
use carcare_types::booking::{
    BookingRecord, BookingStatus, CreateBookingRequest, CreatedBooking, StatusUpdateRequest,
};
use carcare_types::config::ClientConfig;
use carcare_types::error::ApiError;
use carcare_types::quote::{Quote, QuoteRequest};
use carcare_types::service::{PricingTable, Service};

/// Booking backend reached over HTTP.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpBookingApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBookingApi {
    /// Build a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid backend url '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidRequest(format!(
                "backend url '{base_url}' cannot carry a path"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Build a client from the resolved [`ClientConfig`].
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let base_url = config
            .normalized_backend_url()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        Self::new(&base_url, Duration::from_secs(config.request_timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// `<base_url>/api/<segments...>`, each segment percent-encoded on its own.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::InvalidRequest(format!("backend url '{}' cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    /// Send a request and turn non-2xx answers into [`ApiError::Status`].
    async fn execute(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("failed to parse response: {e}")))
    }
}

impl BookingApi for HttpBookingApi {
    async fn list_services(&self) -> Result<Vec<Service>, ApiError> {
        let url = self.endpoint(&["services"])?;
        debug!(%url, "GET services");
        let response = self.execute(self.client.get(url)).await?;
        Self::decode(response).await
    }

    async fn get_pricing(&self) -> Result<PricingTable, ApiError> {
        let url = self.endpoint(&["pricing"])?;
        debug!(%url, "GET pricing");
        let response = self.execute(self.client.get(url)).await?;
        Self::decode(response).await
    }

    async fn request_quote(&self, request: &QuoteRequest) -> Result<Quote, ApiError> {
        let url = self.endpoint(&["quote"])?;
        debug!(%url, service = %request.service_name, "POST quote");
        let response = self.execute(self.client.post(url).json(request)).await?;
        Self::decode(response).await
    }

    async fn create_booking(
        &self,
        request: &CreateBookingRequest,
    ) -> Result<CreatedBooking, ApiError> {
        let url = self.endpoint(&["bookings"])?;
        debug!(%url, service = %request.service_name, "POST booking");
        let response = self.execute(self.client.post(url).json(request)).await?;

        // The 2xx status is what makes the submission succeed; the body is
        // only read for the new id.
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<CreatedBooking>(&body) {
            Ok(created) => Ok(created),
            Err(e) => {
                debug!(error = %e, "booking acknowledgement had no readable id");
                Ok(CreatedBooking::default())
            }
        }
    }

    async fn list_bookings(
        &self,
        status: Option<BookingStatus>,
    ) -> Result<Vec<BookingRecord>, ApiError> {
        let url = self.endpoint(&["bookings"])?;
        debug!(%url, status = status.map(|s| s.as_str()).unwrap_or("all"), "GET bookings");

        let mut request = self.client.get(url);
        if let Some(status) = status {
            request = request.query(&[("status", status.as_str())]);
        }

        let response = self.execute(request).await?;
        Self::decode(response).await
    }

    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<(), ApiError> {
        let url = self.endpoint(&["bookings", id, "status"])?;
        debug!(%url, %status, "PATCH booking status");
        self.execute(self.client.patch(url).json(&StatusUpdateRequest { status }))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use axum::Router;
    use axum::extract::State;
    use axum::http::{Method, StatusCode, Uri};
    use axum::response::{IntoResponse, Response as AxumResponse};
    use serde_json::{Value, json};

    /// One request as the server saw it.
    #[derive(Debug, Clone)]
    struct Captured {
        method: Method,
        path: String,
        query: Option<String>,
        body: Option<Value>,
    }

    #[derive(Default)]
    struct Backend {
        captured: Mutex<Vec<Captured>>,
        fail: AtomicBool,
        plain_ack: AtomicBool,
    }

    impl Backend {
        fn captured(&self) -> Vec<Captured> {
            self.captured.lock().unwrap().clone()
        }
    }

    async fn handle(
        State(backend): State<Arc<Backend>>,
        method: Method,
        uri: Uri,
        body: String,
    ) -> AxumResponse {
        let body = serde_json::from_str::<Value>(&body).ok();
        backend.captured.lock().unwrap().push(Captured {
            method: method.clone(),
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            body: body.clone(),
        });

        if backend.fail.load(Ordering::SeqCst) {
            return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
        }

        match (method.as_str(), uri.path()) {
            ("GET", "/api/services") => axum::Json(json!([
                {"name": "Wash", "description": "Foam wash", "base_price": 15, "duration_minutes": 30}
            ]))
            .into_response(),
            ("GET", "/api/pricing") => axum::Json(json!({
                "services": [{"name": "Wash", "packages": [{"name": "Premium", "price": 5.0}]}]
            }))
            .into_response(),
            ("POST", "/api/quote") => {
                axum::Json(json!({"total": 33.5, "breakdown": {"base": 15}})).into_response()
            }
            ("POST", "/api/bookings") if backend.plain_ack.load(Ordering::SeqCst) => {
                (StatusCode::CREATED, "created").into_response()
            }
            ("POST", "/api/bookings") => (
                StatusCode::CREATED,
                axum::Json(json!({"_id": "abc123", "status": "pending"})),
            )
                .into_response(),
            ("GET", "/api/bookings") => axum::Json(json!([
                {"_id": "abc123", "customer_name": "Asha", "service_name": "Wash",
                 "status": "pending", "latitude": "12.97", "quoted_price": 33.5}
            ]))
            .into_response(),
            ("PATCH", p) if p.starts_with("/api/bookings/") && p.ends_with("/status") => {
                axum::Json(json!({"_id": "abc123", "status": "confirmed"})).into_response()
            }
            _ => (StatusCode::NOT_FOUND, "not found").into_response(),
        }
    }

    async fn spawn_backend() -> (HttpBookingApi, Arc<Backend>) {
        let backend = Arc::new(Backend::default());
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&backend));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let api = HttpBookingApi::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap();
        (api, backend)
    }

    fn create_request() -> CreateBookingRequest {
        CreateBookingRequest {
            customer_name: "Asha".to_string(),
            phone: "555-0101".to_string(),
            address: "12 MG Road".to_string(),
            vehicle_make: "Maruti".to_string(),
            vehicle_model: "Swift".to_string(),
            service_name: "Wash".to_string(),
            preferred_date: "2026-10-20".to_string(),
            preferred_time: "10:30".to_string(),
            notes: String::new(),
            selected_addons: vec!["pickup_drop".to_string()],
            package_name: None,
            latitude: None,
            longitude: None,
            quoted_price: Some(23.0),
            status: BookingStatus::Pending,
        }
    }

    #[tokio::test]
    async fn test_catalog_and_pricing() {
        let (api, backend) = spawn_backend().await;

        let services = api.list_services().await.unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].base_price, 15.0);
        assert_eq!(services[0].duration_minutes, 30);

        let pricing = api.get_pricing().await.unwrap();
        assert_eq!(pricing.packages_for("Wash")[0].name, "Premium");

        let paths: Vec<_> = backend.captured().into_iter().map(|c| c.path).collect();
        assert_eq!(paths, vec!["/api/services", "/api/pricing"]);
    }

    #[tokio::test]
    async fn test_quote_body_omits_absent_keys() {
        let (api, backend) = spawn_backend().await;
        let request = QuoteRequest {
            service_name: "Wash".to_string(),
            package_name: None,
            selected_addons: vec!["sanitization".to_string()],
            latitude: None,
            longitude: None,
        };

        let quote = api.request_quote(&request).await.unwrap();

        assert_eq!(quote.total, Some(33.5));
        assert!(quote.details.contains_key("breakdown"));
        let captured = backend.captured();
        assert_eq!(captured[0].method, Method::POST);
        assert_eq!(
            captured[0].body,
            Some(json!({"service_name": "Wash", "selected_addons": ["sanitization"]}))
        );
    }

    #[tokio::test]
    async fn test_create_booking_reads_id() {
        let (api, backend) = spawn_backend().await;

        let created = api.create_booking(&create_request()).await.unwrap();

        assert_eq!(created.id.as_deref(), Some("abc123"));
        let body = backend.captured()[0].body.clone().unwrap();
        assert_eq!(body["status"], "pending");
        assert_eq!(body["quoted_price"], 23.0);
        assert!(body.get("package_name").is_none());
        assert!(body.get("latitude").is_none());
    }

    #[tokio::test]
    async fn test_create_booking_accepts_unreadable_ack() {
        let (api, backend) = spawn_backend().await;
        backend.plain_ack.store(true, Ordering::SeqCst);

        let created = api.create_booking(&create_request()).await.unwrap();

        assert!(created.id.is_none());
    }

    #[tokio::test]
    async fn test_list_bookings_with_and_without_filter() {
        let (api, backend) = spawn_backend().await;

        let all = api.list_bookings(None).await.unwrap();
        assert_eq!(all[0].id, "abc123");
        assert_eq!(all[0].latitude, Some(12.97));

        api.list_bookings(Some(BookingStatus::Confirmed)).await.unwrap();

        let captured = backend.captured();
        assert_eq!(captured[0].query, None);
        assert_eq!(captured[1].query.as_deref(), Some("status=confirmed"));
    }

    #[tokio::test]
    async fn test_update_status_patch_target_and_body() {
        let (api, backend) = spawn_backend().await;

        api.update_status("abc123", BookingStatus::Confirmed)
            .await
            .unwrap();

        let captured = backend.captured();
        assert_eq!(captured[0].method, Method::PATCH);
        assert_eq!(captured[0].path, "/api/bookings/abc123/status");
        assert_eq!(captured[0].body, Some(json!({"status": "confirmed"})));
    }

    #[tokio::test]
    async fn test_booking_id_is_one_path_segment() {
        let (api, backend) = spawn_backend().await;

        api.update_status("a/b c", BookingStatus::Cancelled)
            .await
            .unwrap();

        assert_eq!(backend.captured()[0].path, "/api/bookings/a%2Fb%20c/status");
    }

    #[tokio::test]
    async fn test_non_success_maps_to_status_error() {
        let (api, backend) = spawn_backend().await;
        backend.fail.store(true, Ordering::SeqCst);

        let err = api.list_services().await.unwrap_err();

        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = HttpBookingApi::new(&format!("http://{addr}"), Duration::from_secs(2)).unwrap();
        let err = api.get_pricing().await.unwrap_err();

        assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
    }

    #[test]
    fn test_base_url_prefix_is_kept() {
        let api = HttpBookingApi::new("http://example.test/backend", Duration::from_secs(1)).unwrap();
        let url = api.endpoint(&["bookings"]).unwrap();
        assert_eq!(url.as_str(), "http://example.test/backend/api/bookings");

        let root = HttpBookingApi::new("http://example.test", Duration::from_secs(1)).unwrap();
        assert_eq!(
            root.endpoint(&["services"]).unwrap().as_str(),
            "http://example.test/api/services"
        );
    }

    #[test]
    fn test_from_config_rejects_bad_scheme() {
        let config = ClientConfig {
            backend_url: "localhost:8000".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            HttpBookingApi::from_config(&config),
            Err(ApiError::InvalidRequest(_))
        ));
    }
}
