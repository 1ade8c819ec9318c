use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use super::error::ApiError;

/// Production endpoint for homework review statuses.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Capability to fetch a raw status payload for a given cursor.
///
/// The production implementation is [`StatusClient`]; tests substitute
/// scripted fakes.
pub trait FetchStatus {
    fn fetch(&self, from_date: i64) -> impl Future<Output = Result<Value, ApiError>> + Send;
}

/// HTTP client for the status API.
pub struct StatusClient {
    token: String,
    client: Client,
    base_url: String,
}

impl StatusClient {
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, DEFAULT_ENDPOINT.to_string())
    }

    /// Create a client pointing at a custom base URL (useful for testing).
    pub fn with_base_url(token: String, base_url: String) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self {
            token,
            client,
            base_url,
        }
    }
}

impl FetchStatus for StatusClient {
    /// `GET <endpoint>?from_date=<cursor>` with an `OAuth` authorization
    /// header. Returns the decoded JSON body; shape validation happens in
    /// [`check_response`](super::response::check_response).
    async fn fetch(&self, from_date: i64) -> Result<Value, ApiError> {
        let response = self
            .client
            .get(&self.base_url)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Endpoint {
                url: self.base_url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
