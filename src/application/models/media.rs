use super::profile::{de_lenient_count, de_null_default, de_optional_id};
use serde::{Deserialize, Serialize};

/// Media kind as reported by the feed's `media_type` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MediaKind {
    #[serde(rename = "Foto")]
    Photo,
    #[serde(rename = "Video")]
    Video,
    #[serde(rename = "Otro")]
    Other,
}

impl MediaKind {
    pub fn from_code(code: Option<u64>) -> Self {
        match code {
            Some(1) => MediaKind::Photo,
            Some(2) => MediaKind::Video,
            _ => MediaKind::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Photo => "Foto",
            MediaKind::Video => "Video",
            MediaKind::Other => "Otro",
        }
    }
}

/// One item of the user feed. Every field is optional; counts that are missing
/// or not numeric stay `None` so they can be told apart from a real zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(default, deserialize_with = "de_optional_id")]
    pub pk: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_count")]
    pub media_type: Option<u64>,
    #[serde(default, deserialize_with = "de_lenient_count")]
    pub like_count: Option<u64>,
    #[serde(default, deserialize_with = "de_lenient_count")]
    pub comment_count: Option<u64>,
    #[serde(default)]
    pub caption: Option<Caption>,
    #[serde(default, deserialize_with = "de_lenient_count")]
    pub taken_at: Option<u64>,
    #[serde(default)]
    pub image_versions2: Option<ImageVersions>,
    #[serde(default)]
    pub carousel_media: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageVersions {
    #[serde(default, deserialize_with = "de_null_default")]
    pub candidates: Vec<ImageCandidate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageCandidate {
    #[serde(default)]
    pub url: Option<String>,
}

impl MediaItem {
    pub fn kind(&self) -> MediaKind {
        MediaKind::from_code(self.media_type)
    }

    pub fn caption_text(&self) -> Option<&str> {
        self.caption.as_ref().and_then(|c| c.text.as_deref())
    }

    pub fn media_url(&self) -> Option<&str> {
        self.image_versions2
            .as_ref()
            .and_then(|v| v.candidates.first())
            .and_then(|c| c.url.as_deref())
    }

    pub fn is_carousel(&self) -> bool {
        self.carousel_media.as_ref().is_some_and(|m| !m.is_empty())
    }
}

/// One response of `feed/user/{id}/`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaPage {
    #[serde(default, deserialize_with = "de_items")]
    pub items: Vec<Option<MediaItem>>,
    #[serde(default, deserialize_with = "de_optional_id")]
    pub next_max_id: Option<String>,
    #[serde(default, deserialize_with = "de_optional_id")]
    pub next_max_id_v2: Option<String>,
    #[serde(default)]
    pub more_available: Option<bool>,
}

impl MediaPage {
    /// Cursor for the next request, falling back to `next_max_id_v2`.
    pub fn cursor(&self) -> Option<&str> {
        self.next_max_id
            .as_deref()
            .or(self.next_max_id_v2.as_deref())
            .filter(|c| !c.is_empty())
    }

    pub fn has_more(&self) -> bool {
        self.more_available.unwrap_or(false)
    }
}

/// Falsy entries (`null`, `{}`, `[]`, `""`, `0`, `false`) become `None`; any other
/// object is kept even when none of its keys are known.
fn de_items<'de, D>(deserializer: D) -> Result<Vec<Option<MediaItem>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Vec<serde_json::Value> = de_null_default(deserializer)?;
    raw.into_iter()
        .map(|value| {
            if is_falsy(&value) {
                Ok(None)
            } else {
                serde_json::from_value(value)
                    .map(Some)
                    .map_err(serde::de::Error::custom)
            }
        })
        .collect()
}

fn is_falsy(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
