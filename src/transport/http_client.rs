use crate::config::Config;
use crate::constants::BODY_PREVIEW_CHARS;
use crate::error::{ApiError, AppError};
use crate::transport::headers::RequestHeaders;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Raw HTTP answer. Status classification is left to the caller because the
/// profile and media endpoints word their errors differently.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parses the body as JSON, attaching a preview of the body on failure.
    pub fn json(&self) -> Result<serde_json::Value, ApiError> {
        self.parse()
    }

    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| {
            ApiError::Parse(format!("{}. Respuesta: {}...", e, body_preview(&self.body)))
        })
    }
}

/// Read-only access to the Instagram web API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IgHttpClient: Send + Sync {
    /// Sends a GET to `endpoint` (path and query, relative to the base URL).
    ///
    /// Only transport-level failures are errors; any status code comes back as an
    /// [`HttpResponse`].
    async fn get(&self, endpoint: &str) -> Result<HttpResponse, ApiError>;
}

/// Represents the HTTP client for interacting with the Instagram API.
#[derive(Debug)]
pub struct IgRestClient {
    client: Client,
    base_url: String,
}

impl IgRestClient {
    /// Creates a new client carrying the run's request headers as defaults.
    ///
    /// # Arguments
    ///
    /// * `config` - Run configuration (credentials, base URL and timeout).
    ///
    /// # Returns
    ///
    /// A Result containing the IgRestClient instance or an error.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let headers = RequestHeaders::new(&config.credentials);
        Self::with_headers(&config.rest_api.base_url, &headers, config.rest_api.timeout)
    }

    pub fn with_headers(
        base_url: &str,
        headers: &RequestHeaders,
        timeout_secs: u64,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(headers.to_header_map()?)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

#[async_trait]
impl IgHttpClient for IgRestClient {
    #[instrument(skip(self))]
    async fn get(&self, endpoint: &str) -> Result<HttpResponse, ApiError> {
        let url = self.url(endpoint);
        debug!("Sending GET request to {}", url);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to send GET request: {:?}", e);
                return Err(classify_reqwest_error(&e));
            }
        };

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to read response body: {:?}", e);
                return Err(if e.is_timeout() {
                    classify_reqwest_error(&e)
                } else {
                    ApiError::Unknown(e.to_string())
                });
            }
        };

        debug!("Response Status: {}", status);
        Ok(HttpResponse { status, body })
    }
}

fn classify_reqwest_error(e: &reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout("La petición excedió el tiempo límite.".to_string())
    } else {
        ApiError::Transport(e.to_string())
    }
}

/// Maps a non-2xx status to its [`ApiError`]; `None` for success.
///
/// 401, 429 and 404 get their own variants. Any other failure status is a
/// transport error, like a raise-on-status client would report it.
pub fn classify_status(status: u16, not_found_message: &str) -> Option<ApiError> {
    match status {
        200..=299 => None,
        401 => Some(ApiError::unauthorized()),
        429 => Some(ApiError::rate_limited()),
        404 => Some(ApiError::NotFound(not_found_message.to_string())),
        other => Some(ApiError::Transport(format!("HTTP {other}"))),
    }
}

pub(crate) fn body_preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}
