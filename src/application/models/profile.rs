/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 13/5/25
******************************************************************************/
use serde::{Deserialize, Deserializer, Serialize};

/// Profile of a resolved user, as found under `data.user` of `web_profile_info`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    /// Not a documented attribute of the profile payload; usually absent.
    #[serde(default, rename = "country_block", deserialize_with = "de_lenient_string")]
    pub country: Option<String>,
    #[serde(default, rename = "category_name")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "de_flag")]
    pub is_verified: bool,
    #[serde(default, deserialize_with = "de_flag")]
    pub is_business_account: bool,
    #[serde(default, deserialize_with = "de_flag")]
    pub is_private: bool,
    #[serde(default, deserialize_with = "de_lenient_count")]
    pub highlight_reel_count: Option<u64>,
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    pub public_email: Option<String>,
    #[serde(default)]
    pub public_phone_number: Option<String>,
    #[serde(default, rename = "edge_followed_by", deserialize_with = "de_null_default")]
    pub followers: EdgeCount,
    #[serde(default, rename = "edge_follow", deserialize_with = "de_null_default")]
    pub following: EdgeCount,
    #[serde(default, rename = "edge_owner_to_timeline_media", deserialize_with = "de_null_default")]
    pub timeline_media: EdgeCount,
}

/// `{"count": n}` wrapper used by the profile edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeCount {
    #[serde(default, deserialize_with = "de_lenient_count")]
    pub count: Option<u64>,
}

impl Profile {
    pub fn follower_count(&self) -> Option<u64> {
        self.followers.count
    }

    pub fn following_count(&self) -> Option<u64> {
        self.following.count
    }

    pub fn post_count(&self) -> Option<u64> {
        self.timeline_media.count
    }

    pub fn has_highlights(&self) -> bool {
        self.highlight_reel_count.unwrap_or(0) > 0
    }

    pub fn has_public_contact(&self) -> bool {
        non_blank(&self.public_email).is_some() || non_blank(&self.public_phone_number).is_some()
    }

    pub fn bio_has_link(&self) -> bool {
        self.biography
            .as_deref()
            .is_some_and(|bio| bio.contains("http://") || bio.contains("https://"))
    }
}

pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// `null` behaves like an absent field.
pub(crate) fn de_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts string or numeric identifiers.
pub(crate) fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) if !s.is_empty() => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid id: {other}"))),
    }
}

pub(crate) fn de_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Non-negative integer, or `None` when absent, null or not a number.
pub(crate) fn de_lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        _ => None,
    })
}

fn de_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(
        serde_json::Value::deserialize(deserializer)?,
        serde_json::Value::Bool(true)
    ))
}

fn de_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    })
}
