// src/utils/engagement.rs
//
// Engagement calculation utilities for account summaries

use crate::constants::{CAPTION_ELLIPSIS, CAPTION_MAX_CHARS, NO_DATE, POST_DATE_FORMAT};
use chrono::{DateTime, Utc};

/// Round to two decimals, exact halves going to the even digit.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Average of `total` over `count` samples, rounded to two decimals
///
/// # Returns
///
/// * `Option<f64>` - The average, or None when there are no samples
pub fn average(total: u64, count: u64) -> Option<f64> {
    if count == 0 {
        return None;
    }
    Some(round2(total as f64 / count as f64))
}

/// Calculate the engagement rate as a percentage of followers
///
/// # Arguments
///
/// * `average_likes` - Rounded average likes per post
/// * `average_comments` - Rounded average comments per post
/// * `followers` - Follower count, if known
///
/// # Returns
///
/// * `Option<f64>` - `(likes + comments) / followers * 100` rounded to two decimals, or None
///   when either average is missing or the follower count is unknown or zero
pub fn engagement_rate(
    average_likes: Option<f64>,
    average_comments: Option<f64>,
    followers: Option<u64>,
) -> Option<f64> {
    let (likes, comments) = (average_likes?, average_comments?);
    let followers = followers.filter(|f| *f > 0)?;
    Some(round2((likes + comments) / followers as f64 * 100.0))
}

/// Cut a caption to 70 characters, appending "..." only when something was cut.
pub fn truncate_caption(caption: &str) -> String {
    if caption.chars().count() <= CAPTION_MAX_CHARS {
        return caption.to_string();
    }
    let mut truncated: String = caption.chars().take(CAPTION_MAX_CHARS).collect();
    truncated.push_str(CAPTION_ELLIPSIS);
    truncated
}

/// Post timestamp in milliseconds, 0 when unknown.
pub fn timestamp_millis(taken_at_secs: Option<u64>) -> u64 {
    taken_at_secs.unwrap_or(0).saturating_mul(1000)
}

/// `DD/MM/YYYY` (UTC) for a millisecond timestamp, "N/A" for zero.
pub fn format_post_date(timestamp_ms: u64) -> String {
    if timestamp_ms == 0 {
        return NO_DATE.to_string();
    }
    i64::try_from(timestamp_ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.format(POST_DATE_FORMAT).to_string())
        .unwrap_or_else(|| NO_DATE.to_string())
}
