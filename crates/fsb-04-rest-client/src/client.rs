//! # REST API Client

use crate::domain::config::RestClientConfig;
use crate::domain::entities::{ApiResponse, Problem};
use crate::domain::errors::RestError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared_types::{client_version, COMPATIBILITY_DATE};
use tracing::{debug, warn};

const SET_COMPATIBILITY_DATE: &str = "x-set-compatibility-date";

/// Client for the FreeStuff v2 API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct RestApiClient {
    client: Client,
    base_url: String,
}

impl RestApiClient {
    /// Build a client authenticating with `token`.
    pub fn new(token: &str, config: RestClientConfig) -> Result<Self, RestError> {
        let mut headers = HeaderMap::new();
        let mut authorization = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| RestError::InvalidHeader("Authorization"))?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&client_version())
                .map_err(|_| RestError::InvalidHeader("User-Agent"))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(SET_COMPATIBILITY_DATE),
            HeaderValue::from_static(COMPATIBILITY_DATE),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_ping(&self) -> Result<ApiResponse<Value>, RestError> {
        self.get("/ping").await
    }

    /// List of published JSON schemas.
    pub async fn get_schemas(&self) -> Result<ApiResponse<Value>, RestError> {
        self.get("/schemas").await
    }

    pub async fn get_schema(&self, urn: &str) -> Result<ApiResponse<Value>, RestError> {
        self.get(&format!("/schemas/{urn}")).await
    }

    /// Problem types the API can answer with.
    pub async fn get_problems(&self) -> Result<ApiResponse<Value>, RestError> {
        self.get("/problems").await
    }

    /// Webhook event types the API can deliver.
    pub async fn get_events(&self) -> Result<ApiResponse<Value>, RestError> {
        self.get("/events").await
    }

    /// GET `path` below the base URL and decode the body as `T`.
    ///
    /// # Errors
    ///
    /// - `Http` on transport failure
    /// - `Problem` for non-2xx answers carrying a JSON object
    /// - `Status` for other non-2xx answers
    /// - `Decode` when a 2xx body is not a `T`
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>, RestError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "GET");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(match serde_json::from_slice::<Value>(&body) {
                Ok(Value::Object(raw)) => {
                    let problem = Problem::from_raw(raw);
                    warn!(url = %url, status = %status, problem = %problem, "API returned a problem");
                    RestError::Problem { status, problem }
                }
                _ => RestError::Status {
                    status,
                    body: String::from_utf8_lossy(&body).into_owned(),
                },
            });
        }

        let data = serde_json::from_slice(&body).map_err(RestError::Decode)?;
        Ok(ApiResponse {
            data,
            status,
            headers,
        })
    }
}
