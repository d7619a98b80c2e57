use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::form_urlencoded::byte_serialize;

use crate::{
    application::models::profile::Profile,
    constants::USER_NOT_FOUND_MESSAGE,
    error::ApiError,
    transport::http_client::{classify_status, IgHttpClient},
};

/// Resolves a username into its public profile.
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Looks up `username` (already trimmed and without `@`).
    ///
    /// Every failure comes back as an [`ApiError`]; nothing escapes unclassified.
    async fn fetch_profile(&self, username: &str) -> Result<Profile, ApiError>;
}

pub struct ProfileServiceImpl<T: IgHttpClient> {
    client: Arc<T>,
}

impl<T: IgHttpClient> ProfileServiceImpl<T> {
    pub fn new(client: Arc<T>) -> Self {
        Self { client }
    }
}

/// Trims the raw input and drops every `@`. Blank input yields `None`.
pub fn normalize_username(raw: &str) -> Option<String> {
    let clean = raw.trim().replace('@', "");
    let clean = clean.trim();
    if clean.is_empty() {
        None
    } else {
        Some(clean.to_string())
    }
}

pub(crate) fn profile_endpoint(username: &str) -> String {
    let encoded: String = byte_serialize(username.as_bytes()).collect();
    format!("users/web_profile_info/?username={}", encoded)
}

#[async_trait]
impl<T: IgHttpClient + 'static> ProfileService for ProfileServiceImpl<T> {
    async fn fetch_profile(&self, username: &str) -> Result<Profile, ApiError> {
        info!("Fetching profile for {}", username);

        let response = self.client.get(&profile_endpoint(username)).await?;

        if let Some(err) = classify_status(response.status, USER_NOT_FOUND_MESSAGE) {
            warn!("Profile request for {} failed with status {}", username, response.status);
            return Err(err);
        }

        let body = response.json()?;
        let user = body
            .get("data")
            .and_then(|data| data.get("user"))
            .filter(|user| user.is_object())
            .ok_or_else(|| {
                warn!("Profile response for {} has no data.user", username);
                ApiError::invalid_response()
            })?;

        let profile: Profile = serde_json::from_value(user.clone()).map_err(|e| {
            warn!("Unexpected profile shape for {}: {}", username, e);
            ApiError::invalid_response()
        })?;

        debug!(
            "Profile {} resolved: id={}, followers={:?}",
            username,
            profile.id,
            profile.follower_count()
        );
        Ok(profile)
    }
}
