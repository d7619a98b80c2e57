/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 3/9/24
******************************************************************************/

//! Public profile and recent-post statistics for Instagram accounts.
//!
//! A batch of usernames goes through profile lookup, feed pagination and
//! aggregation, producing one [`AccountRecord`] per account. Failures degrade to
//! placeholder records; only missing credentials stop a run.

pub mod config;

pub mod constants;

pub mod error;

pub mod application;

pub mod presentation;

pub mod transport;

pub mod utils;

pub use application::models::summary::{AccountRecord, AccountSummary, PlaceholderSummary};
pub use application::services::batch_service::{BatchService, ProgressEvent};
pub use config::Config;
pub use error::{ApiError, AppError};
pub use transport::http_client::IgRestClient;
