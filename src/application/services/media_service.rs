use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::form_urlencoded::byte_serialize;

use crate::{
    application::models::{
        media::{MediaItem, MediaPage},
        profile::Profile,
    },
    config::ScraperConfig,
    error::ApiError,
    transport::http_client::{classify_status, IgHttpClient},
    utils::pacing::courtesy_delay,
};

/// Collects the most recent posts of a resolved profile.
#[async_trait]
pub trait MediaService: Send + Sync {
    /// Pages through the user feed until `target` items are collected or the feed
    /// runs out. The result holds at most `target` entries, in feed order; `None`
    /// entries are the feed's own null items.
    async fn fetch_media(
        &self,
        profile: &Profile,
        username: &str,
        target: usize,
    ) -> Result<Vec<Option<MediaItem>>, ApiError>;
}

pub struct MediaServiceImpl<T: IgHttpClient> {
    client: Arc<T>,
    page_delay: Duration,
    max_page_size: usize,
    cancel: CancellationToken,
}

impl<T: IgHttpClient> MediaServiceImpl<T> {
    pub fn new(client: Arc<T>, scraper: &ScraperConfig) -> Self {
        Self {
            client,
            page_delay: scraper.page_delay(),
            max_page_size: scraper.max_page_size.max(1) as usize,
            cancel: CancellationToken::new(),
        }
    }

    /// Stops pagination between pages once `cancel` fires.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

pub(crate) fn feed_endpoint(user_id: &str, count: usize, max_id: Option<&str>) -> String {
    let mut endpoint = format!("feed/user/{}/?count={}", user_id, count);
    if let Some(cursor) = max_id {
        let encoded: String = byte_serialize(cursor.as_bytes()).collect();
        endpoint.push_str("&max_id=");
        endpoint.push_str(&encoded);
    }
    endpoint
}

/// Rewords transport-level failures for the media step.
fn media_error(err: ApiError, username: &str) -> ApiError {
    match err {
        ApiError::Timeout(_) => {
            ApiError::Timeout("La petición de medios excedió el tiempo límite.".to_string())
        }
        ApiError::Transport(m) => {
            ApiError::Transport(format!("Error al obtener medios para {}: {}", username, m))
        }
        ApiError::Parse(m) => {
            ApiError::Parse(format!("Error al parsear JSON para {}: {}", username, m))
        }
        ApiError::Unknown(m) => ApiError::Unknown(format!(
            "Error desconocido al obtener medios para {}: {}",
            username, m
        )),
        other => other,
    }
}

#[async_trait]
impl<T: IgHttpClient + 'static> MediaService for MediaServiceImpl<T> {
    async fn fetch_media(
        &self,
        profile: &Profile,
        username: &str,
        target: usize,
    ) -> Result<Vec<Option<MediaItem>>, ApiError> {
        let not_found = format!("No se encontraron medios para el usuario {}.", username);
        let mut items: Vec<Option<MediaItem>> = Vec::with_capacity(target);
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        while items.len() < target {
            let request_count = (target - items.len()).min(self.max_page_size);
            let endpoint = feed_endpoint(&profile.id, request_count, cursor.as_deref());
            debug!("Requesting page {} for {}: {}", pages + 1, username, endpoint);

            let response = self
                .client
                .get(&endpoint)
                .await
                .map_err(|e| media_error(e, username))?;

            if let Some(err) = classify_status(response.status, &not_found) {
                warn!(
                    "Media request for {} failed on page {} with status {}",
                    username,
                    pages + 1,
                    response.status
                );
                return Err(media_error(err, username));
            }

            let page: MediaPage = response.parse().map_err(|e| media_error(e, username))?;
            pages += 1;

            let page_len = page.items.len();
            let next_cursor = page.cursor().map(str::to_string);
            let more_available = page.has_more();
            items.extend(page.items);

            debug!(
                "Page {} for {}: {} items (total {}), more_available={}, cursor={}",
                pages,
                username,
                page_len,
                items.len(),
                more_available,
                next_cursor.is_some()
            );

            if items.len() >= target || !more_available || next_cursor.is_none() || page_len == 0 {
                break;
            }
            cursor = next_cursor;

            if courtesy_delay(self.page_delay, &self.cancel).await {
                info!("Pagination for {} cancelled after {} pages", username, pages);
                break;
            }
        }

        items.truncate(target);
        info!("Collected {} posts for {} in {} pages", items.len(), username, pages);
        Ok(items)
    }
}
