/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 8/9/24
 ******************************************************************************/

use crate::config::Credentials;
use crate::constants::{APP_ID_HEADER_KEY, CSRF_COOKIE_KEY, CSRF_HEADER_KEY, USER_AGENT};
use crate::error::AppError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, COOKIE};
use std::collections::HashMap;
use std::fmt;
use std::fmt::Display;
use tracing::{debug, warn};

/// Headers sent with every request of a batch run.
///
/// Built once from [`Credentials`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestHeaders {
    pub(crate) user_agent: String,
    pub(crate) app_id: String,
    pub(crate) cookie: String,
    pub(crate) csrf_token: String,
}

impl RequestHeaders {
    /// Derives the request headers from the credentials.
    ///
    /// The CSRF token is read from the `csrftoken` segment of the cookie. A cookie
    /// without one still yields usable headers with an empty token; only a warning is
    /// logged.
    pub fn new(credentials: &Credentials) -> Self {
        let csrf_token = extract_csrf_token(&credentials.cookie).unwrap_or_else(|| {
            warn!("Could not extract csrftoken from cookie, X-CSRFToken will be empty");
            String::new()
        });

        Self {
            user_agent: USER_AGENT.to_string(),
            app_id: credentials.app_id.clone(),
            cookie: credentials.cookie.clone(),
            csrf_token,
        }
    }

    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    pub fn as_map(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("User-Agent".to_string(), self.user_agent.clone());
        headers.insert(APP_ID_HEADER_KEY.to_string(), self.app_id.clone());
        headers.insert("Cookie".to_string(), self.cookie.clone());
        headers.insert(CSRF_HEADER_KEY.to_string(), self.csrf_token.clone());
        headers
    }

    /// Converts the headers into a `HeaderMap` usable as client defaults.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidHeader` - A value contains characters not allowed in headers.
    pub fn to_header_map(&self) -> Result<HeaderMap, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(reqwest::header::USER_AGENT, header_value("User-Agent", &self.user_agent)?);
        headers.insert(
            HeaderName::from_static(APP_ID_HEADER_KEY),
            header_value(APP_ID_HEADER_KEY, &self.app_id)?,
        );
        let mut cookie = header_value("Cookie", &self.cookie)?;
        cookie.set_sensitive(true);
        headers.insert(COOKIE, cookie);
        headers.insert(
            HeaderName::from_static("x-csrftoken"),
            header_value(CSRF_HEADER_KEY, &self.csrf_token)?,
        );
        debug!("Request headers built (csrf token present: {})", !self.csrf_token.is_empty());
        Ok(headers)
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(value).map_err(|_| AppError::InvalidHeader(name.to_string()))
}

/// Scans the `;`-separated cookie segments for `csrftoken=` and returns its value.
pub fn extract_csrf_token(cookie: &str) -> Option<String> {
    cookie
        .split(';')
        .map(str::trim)
        .find_map(|segment| segment.strip_prefix(CSRF_COOKIE_KEY))
        .map(|token| token.trim().to_string())
}

impl Display for RequestHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"user_agent\":\"{}\",\"app_id\":\"{}\",\"cookie\":\"[REDACTED]\",\"csrf_token\":\"{}\"}}",
            self.user_agent,
            self.app_id,
            if self.csrf_token.is_empty() { "" } else { "[REDACTED]" }
        )
    }
}
