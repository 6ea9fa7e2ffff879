//! HTTP client for the booking API.

use async_trait::async_trait;
use booking_config::GraphConfig;
use booking_core::{BookingError, BookingResult, Business, Collection, Service, StaffMember};
use booking_service::UpstreamSource;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

const BUSINESSES: &str = "bookingBusinesses";
const STAFF_MEMBERS: &str = "staffMembers";
const SERVICES: &str = "services";

/// Status reported when the booking API could not be reached or answered
/// with something unreadable.
const BAD_GATEWAY: u16 = 502;

/// Booking API client.
///
/// Every call is a single GET with bearer auth; list envelopes
/// (`{"value": [...]}`) are unwrapped.
pub struct GraphClient {
    client: Client,
    base_url: Url,
}

impl GraphClient {
    /// Creates a client for the configured API.
    pub fn new(config: &GraphConfig) -> BookingResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                BookingError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Self::with_client(client, &config.base_url)
    }

    /// Creates a client with a preconfigured `reqwest` client.
    pub fn with_client(client: Client, base_url: &str) -> BookingResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            BookingError::Configuration(format!("Invalid booking API base URL '{}': {}", base_url, e))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(BookingError::Configuration(format!(
                "Booking API base URL '{}' cannot carry a path",
                base_url
            )));
        }

        Ok(Self { client, base_url })
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_collection<T: DeserializeOwned>(&self, token: &str, url: Url) -> BookingResult<Vec<T>> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                error!("Booking API request to {} failed: {}", url, e);
                BookingError::upstream(BAD_GATEWAY, format!("Booking API unreachable: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Booking API returned {} for {}", status, url);
            return Err(BookingError::upstream(status.as_u16(), body));
        }

        let collection: Collection<T> = response.json().await.map_err(|e| {
            BookingError::upstream(BAD_GATEWAY, format!("Invalid booking API response: {}", e))
        })?;

        Ok(collection.into_inner())
    }
}

#[async_trait]
impl UpstreamSource for GraphClient {
    async fn fetch_businesses(&self, token: &str) -> BookingResult<Vec<Business>> {
        self.get_collection(token, self.endpoint(&[BUSINESSES])).await
    }

    async fn fetch_staff(&self, token: &str, business_id: &str) -> BookingResult<Vec<StaffMember>> {
        self.get_collection(token, self.endpoint(&[BUSINESSES, business_id, STAFF_MEMBERS]))
            .await
    }

    async fn fetch_services(&self, token: &str, business_id: &str) -> BookingResult<Vec<Service>> {
        self.get_collection(token, self.endpoint(&[BUSINESSES, business_id, SERVICES]))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GraphClient {
        GraphClient::with_client(Client::new(), &server.uri()).unwrap()
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client =
            GraphClient::with_client(Client::new(), "https://graph.microsoft.com/v1.0").unwrap();
        assert_eq!(
            client.endpoint(&[BUSINESSES]).as_str(),
            "https://graph.microsoft.com/v1.0/bookingBusinesses"
        );

        let trailing =
            GraphClient::with_client(Client::new(), "https://graph.microsoft.com/v1.0/").unwrap();
        assert_eq!(
            trailing.endpoint(&[BUSINESSES, "b1", SERVICES]).as_str(),
            "https://graph.microsoft.com/v1.0/bookingBusinesses/b1/services"
        );
    }

    #[test]
    fn test_endpoint_encodes_business_id() {
        let client = GraphClient::with_client(Client::new(), "https://api.test").unwrap();
        let url = client.endpoint(&[BUSINESSES, "team/one two", STAFF_MEMBERS]);
        assert_eq!(url.path(), "/bookingBusinesses/team%2Fone%20two/staffMembers");
    }

    #[test]
    fn test_invalid_base_url_is_configuration_error() {
        let result = GraphClient::with_client(Client::new(), "not a url");
        assert!(matches!(result, Err(BookingError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_fetch_businesses_unwraps_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bookingBusinesses"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "@odata.context": "ignored",
                "value": [
                    { "id": "b1", "displayName": "Alpha", "businessType": "Salon" },
                    { "id": "b2", "displayName": "Beta" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let businesses = client_for(&server).fetch_businesses("tok").await.unwrap();

        assert_eq!(businesses.len(), 2);
        assert_eq!(businesses[0].display_name, "Alpha");
        assert_eq!(businesses[0].business_type, "Salon");
    }

    #[tokio::test]
    async fn test_fetch_staff_keeps_unmodelled_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bookingBusinesses/b1/staffMembers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": [{
                    "id": "s1",
                    "displayName": "Jane",
                    "emailAddress": "jane@contoso.com",
                    "timeZone": "UTC"
                }]
            })))
            .mount(&server)
            .await;

        let staff = client_for(&server).fetch_staff("tok", "b1").await.unwrap();

        assert_eq!(staff[0].email_address, "jane@contoso.com");
        assert_eq!(staff[0].extra.get("timeZone"), Some(&json!("UTC")));
        assert!(staff[0].business_id.is_none());
    }

    #[tokio::test]
    async fn test_error_status_passes_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bookingBusinesses/b1/services"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_services("tok", "b1").await;

        match result {
            Err(BookingError::Upstream { status, message }) => {
                assert_eq!(status, 403);
                assert_eq!(message, "Forbidden");
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bookingBusinesses"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_businesses("tok").await;

        assert!(matches!(result, Err(BookingError::Upstream { status: 502, .. })));
    }

    #[tokio::test]
    async fn test_unreachable_api_is_bad_gateway() {
        let client = GraphClient::with_client(Client::new(), "http://127.0.0.1:1").unwrap();

        let result = client.fetch_businesses("tok").await;

        assert!(matches!(result, Err(BookingError::Upstream { status: 502, .. })));
    }
}
