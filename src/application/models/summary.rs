use super::media::MediaKind;
use crate::constants::{NO, UNAVAILABLE, YES};
use crate::error::{ApiError, ApiErrorKind};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A value that may be missing from the display contract.
///
/// Serializes as the bare value, or as the string `"No Disponible"`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Metric<T> {
    Available(T),
    #[default]
    Unavailable,
}

impl<T> Metric<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Metric::Available(_))
    }

    pub fn as_ref(&self) -> Metric<&T> {
        match self {
            Metric::Available(v) => Metric::Available(v),
            Metric::Unavailable => Metric::Unavailable,
        }
    }

    pub fn value(self) -> Option<T> {
        match self {
            Metric::Available(v) => Some(v),
            Metric::Unavailable => None,
        }
    }
}

impl<T> From<Option<T>> for Metric<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Metric::Unavailable, Metric::Available)
    }
}

impl<T: Serialize> Serialize for Metric<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Metric::Available(v) => v.serialize(serializer),
            Metric::Unavailable => serializer.serialize_str(UNAVAILABLE),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Metric<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) if s == UNAVAILABLE => Ok(Metric::Unavailable),
            serde_json::Value::Null => Ok(Metric::Unavailable),
            other => T::deserialize(other)
                .map(Metric::Available)
                .map_err(serde::de::Error::custom),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Metric<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Available(v) => write!(f, "{}", v),
            Metric::Unavailable => write!(f, "{}", UNAVAILABLE),
        }
    }
}

/// Localized yes/no flag of the display contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Flag {
    #[serde(rename = "Sí")]
    Yes,
    #[serde(rename = "No")]
    No,
    #[default]
    #[serde(rename = "No Disponible")]
    Unavailable,
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        if value {
            Flag::Yes
        } else {
            Flag::No
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Flag::Yes => YES,
            Flag::No => NO,
            Flag::Unavailable => UNAVAILABLE,
        };
        write!(f, "{}", label)
    }
}

/// Trimmed view of one post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub post_id: Metric<String>,
    pub kind: MediaKind,
    pub likes: u64,
    pub comments: u64,
    pub caption: String,
    pub timestamp_ms: u64,
    pub post_date: String,
    pub media_url: String,
    pub is_carousel: Flag,
}

/// Normalized per-account summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub username: String,
    pub user_id: Metric<String>,
    pub full_name: Metric<String>,
    pub biography: Metric<String>,
    pub country: Metric<String>,
    pub profile_url: String,
    pub category: Metric<String>,
    pub follower_count: Metric<u64>,
    pub following_count: Metric<u64>,
    pub post_count: Metric<u64>,
    pub is_verified: Flag,
    pub is_business_account: Flag,
    pub has_highlights: Flag,
    pub external_url: Metric<String>,
    pub public_email: Metric<String>,
    pub public_phone: Metric<String>,
    pub has_public_contact: Flag,
    pub bio_has_link: Flag,
    pub is_private: Flag,
    pub posts_for_average: u64,
    pub average_likes: Metric<f64>,
    pub average_comments: Metric<f64>,
    /// Percentage, e.g. `1.25` means 1.25 %.
    pub engagement_rate: Metric<f64>,
    pub recent_posts: Vec<PostView>,
}

/// Which retrieval step failed for a placeholder row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "camelCase")]
pub enum Failure {
    Profile { kind: ApiErrorKind, message: String },
    Media { kind: ApiErrorKind, message: String },
}

impl Failure {
    pub fn profile(error: &ApiError) -> Self {
        Failure::Profile {
            kind: error.kind(),
            message: error.message().to_string(),
        }
    }

    pub fn media(error: &ApiError) -> Self {
        Failure::Media {
            kind: error.kind(),
            message: error.message().to_string(),
        }
    }

    pub fn kind(&self) -> ApiErrorKind {
        match self {
            Failure::Profile { kind, .. } | Failure::Media { kind, .. } => *kind,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Failure::Profile { message, .. } | Failure::Media { message, .. } => message,
        }
    }

    pub fn profile_error(&self) -> Option<&str> {
        match self {
            Failure::Profile { message, .. } => Some(message),
            Failure::Media { .. } => None,
        }
    }

    pub fn media_error(&self) -> Option<&str> {
        match self {
            Failure::Media { message, .. } => Some(message),
            Failure::Profile { .. } => None,
        }
    }
}

/// Degraded summary emitted when the profile or its media could not be fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderSummary {
    #[serde(flatten)]
    pub summary: AccountSummary,
    pub failure: Failure,
}

/// One element of a batch result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum AccountRecord {
    Complete(AccountSummary),
    Placeholder(PlaceholderSummary),
}

impl AccountRecord {
    pub fn summary(&self) -> &AccountSummary {
        match self {
            AccountRecord::Complete(summary) => summary,
            AccountRecord::Placeholder(placeholder) => &placeholder.summary,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            AccountRecord::Complete(_) => None,
            AccountRecord::Placeholder(placeholder) => Some(&placeholder.failure),
        }
    }

    pub fn username(&self) -> &str {
        &self.summary().username
    }
}
