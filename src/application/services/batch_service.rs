use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::{
    application::{
        models::summary::AccountRecord,
        services::{
            aggregator::{media_placeholder, profile_placeholder, summarize},
            media_service::{MediaService, MediaServiceImpl},
            profile_service::{normalize_username, ProfileService, ProfileServiceImpl},
        },
    },
    config::ScraperConfig,
    error::ApiError,
    transport::http_client::IgHttpClient,
    utils::pacing::courtesy_delay,
};

/// Progress notification sent while a batch runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Human-readable log line.
    Log(String),
    /// Final result set, sent once when the batch ends (also after cancellation).
    Results(Vec<AccountRecord>),
}

/// Runs profile, media and aggregation steps for a list of usernames, one at a time.
pub struct BatchService<T: IgHttpClient> {
    profiles: ProfileServiceImpl<T>,
    media: MediaServiceImpl<T>,
    account_delay: Duration,
    cancel: CancellationToken,
}

impl<T: IgHttpClient + 'static> BatchService<T> {
    pub fn new(client: Arc<T>, scraper: &ScraperConfig) -> Self {
        Self {
            profiles: ProfileServiceImpl::new(client.clone()),
            media: MediaServiceImpl::new(client, scraper),
            account_delay: scraper.account_delay(),
            cancel: CancellationToken::new(),
        }
    }

    /// Checked between usernames and between pages of one username.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.media = self.media.with_cancellation(cancel.clone());
        self.cancel = cancel;
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Processes `usernames` in order and returns one record per valid username.
    ///
    /// A failing username never aborts the batch: it is recorded as a placeholder.
    /// The account delay is applied between usernames, not after the last one.
    pub async fn run(
        &self,
        usernames: &[String],
        posts: usize,
        progress: &UnboundedSender<ProgressEvent>,
    ) -> Vec<AccountRecord> {
        let mut queue = Vec::with_capacity(usernames.len());
        for raw in usernames {
            match normalize_username(raw) {
                Some(username) => queue.push(username),
                None => log(progress, format!("Nombre de usuario vacío ignorado: '{}'.", raw)),
            }
        }

        let total = queue.len();
        let mut records = Vec::with_capacity(total);
        let mut cancelled = false;

        for (index, username) in queue.iter().enumerate() {
            if index > 0 && courtesy_delay(self.account_delay, &self.cancel).await {
                cancelled = true;
                break;
            }
            if self.cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            log(
                progress,
                format!("[{}/{}] Analizando perfil: {}...", index + 1, total, username),
            );
            records.push(self.process_account(username, posts, progress).await);
        }

        if cancelled {
            log(
                progress,
                format!("Scraping cancelado tras {} de {} perfiles.", records.len(), total),
            );
        } else {
            log(progress, "Scraping completado.".to_string());
        }
        // A dropped receiver only means nobody is listening.
        let _ = progress.send(ProgressEvent::Results(records.clone()));
        records
    }

    async fn process_account(
        &self,
        username: &str,
        posts: usize,
        progress: &UnboundedSender<ProgressEvent>,
    ) -> AccountRecord {
        let profile = match self.profiles.fetch_profile(username).await {
            Ok(profile) => profile,
            Err(err) => {
                let message = match err {
                    ApiError::NotFound(_) => {
                        format!("El usuario ingresado '{}' no existe.", username)
                    }
                    _ => format!(
                        "Error al obtener perfil para {}: {}. Añadiendo datos no disponibles.",
                        username,
                        clause(&err)
                    ),
                };
                warn!("{}", message);
                log(progress, message);
                return AccountRecord::Placeholder(profile_placeholder(username, &err));
            }
        };

        match self.media.fetch_media(&profile, username, posts).await {
            Ok(items) => {
                log(progress, format!("Datos completos obtenidos para {}.", username));
                AccountRecord::Complete(summarize(&profile, username, &items))
            }
            Err(err) => {
                let message = format!(
                    "Error o datos incompletos para {}: {}. Añadiendo datos parciales.",
                    username,
                    clause(&err)
                );
                warn!("{}", message);
                log(progress, message);
                AccountRecord::Placeholder(media_placeholder(&profile, username, &err))
            }
        }
    }

    /// Runs the batch on its own Tokio task.
    pub fn spawn(
        self: Arc<Self>,
        usernames: Vec<String>,
        posts: usize,
        progress: UnboundedSender<ProgressEvent>,
    ) -> JoinHandle<Vec<AccountRecord>> {
        tokio::spawn(async move { self.run(&usernames, posts, &progress).await })
    }
}

/// Error message without its closing period, for embedding in a longer sentence.
fn clause(err: &ApiError) -> &str {
    err.message().trim_end_matches('.')
}

fn log(progress: &UnboundedSender<ProgressEvent>, message: String) {
    info!("{}", message);
    let _ = progress.send(ProgressEvent::Log(message));
}
