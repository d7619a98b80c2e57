//! Reduction of a profile and its recent posts into an [`AccountSummary`].
//!
//! Nothing here performs I/O or fails: unknown counts are shown as 0 but kept out
//! of the averages.

use crate::{
    application::models::{
        media::MediaItem,
        profile::{non_blank, Profile},
        summary::{AccountSummary, Failure, Flag, Metric, PlaceholderSummary, PostView},
    },
    constants::{NO_CAPTION, NO_MEDIA_URL, PROFILE_URL_PREFIX},
    error::ApiError,
    utils::engagement::{
        average, engagement_rate, format_post_date, timestamp_millis, truncate_caption,
    },
};

pub fn profile_url(username: &str) -> String {
    format!("{}{}", PROFILE_URL_PREFIX, username)
}

/// Trimmed view of one feed item.
pub fn post_view(item: &MediaItem) -> PostView {
    let timestamp_ms = timestamp_millis(item.taken_at);
    PostView {
        post_id: item.pk.clone().into(),
        kind: item.kind(),
        likes: item.like_count.unwrap_or(0),
        comments: item.comment_count.unwrap_or(0),
        caption: truncate_caption(item.caption_text().unwrap_or(NO_CAPTION)),
        timestamp_ms,
        post_date: format_post_date(timestamp_ms),
        media_url: item.media_url().unwrap_or(NO_MEDIA_URL).to_string(),
        is_carousel: Flag::from(item.is_carousel()),
    }
}

/// Profile-derived part of a summary, with empty post aggregates.
fn profile_summary(profile: &Profile, username: &str) -> AccountSummary {
    let username = non_blank(&profile.username).unwrap_or(username).to_string();
    AccountSummary {
        profile_url: profile_url(&username),
        username,
        user_id: Metric::Available(profile.id.clone()),
        full_name: profile.full_name.clone().into(),
        biography: profile.biography.clone().into(),
        country: non_blank(&profile.country).map(str::to_string).into(),
        category: non_blank(&profile.category).map(str::to_string).into(),
        follower_count: profile.follower_count().into(),
        following_count: profile.following_count().into(),
        post_count: profile.post_count().into(),
        is_verified: Flag::from(profile.is_verified),
        is_business_account: Flag::from(profile.is_business_account),
        has_highlights: Flag::from(profile.has_highlights()),
        external_url: non_blank(&profile.external_url).map(str::to_string).into(),
        public_email: non_blank(&profile.public_email).map(str::to_string).into(),
        public_phone: non_blank(&profile.public_phone_number).map(str::to_string).into(),
        has_public_contact: Flag::from(profile.has_public_contact()),
        bio_has_link: Flag::from(profile.bio_has_link()),
        is_private: Flag::from(profile.is_private),
        posts_for_average: 0,
        average_likes: Metric::Unavailable,
        average_comments: Metric::Unavailable,
        engagement_rate: Metric::Unavailable,
        recent_posts: Vec::new(),
    }
}

/// Builds the full summary for a profile and the posts collected for it.
///
/// Null and empty feed entries (`None`) are skipped. A post enters the averages only when both
/// its like and comment counts are known.
pub fn summarize(profile: &Profile, username: &str, items: &[Option<MediaItem>]) -> AccountSummary {
    let mut summary = profile_summary(profile, username);

    let mut total_likes = 0u64;
    let mut total_comments = 0u64;
    let mut counted = 0u64;

    for item in items.iter().flatten() {
        if let (Some(likes), Some(comments)) = (item.like_count, item.comment_count) {
            total_likes = total_likes.saturating_add(likes);
            total_comments = total_comments.saturating_add(comments);
            counted += 1;
        }
        summary.recent_posts.push(post_view(item));
    }

    let average_likes = average(total_likes, counted);
    let average_comments = average(total_comments, counted);

    summary.posts_for_average = counted;
    summary.engagement_rate =
        engagement_rate(average_likes, average_comments, profile.follower_count()).into();
    summary.average_likes = average_likes.into();
    summary.average_comments = average_comments.into();
    summary
}

/// Placeholder for a username whose profile could not be resolved.
pub fn profile_placeholder(username: &str, error: &ApiError) -> PlaceholderSummary {
    PlaceholderSummary {
        summary: AccountSummary {
            username: username.to_string(),
            user_id: Metric::Unavailable,
            full_name: Metric::Unavailable,
            biography: Metric::Unavailable,
            country: Metric::Unavailable,
            profile_url: profile_url(username),
            category: Metric::Unavailable,
            follower_count: Metric::Unavailable,
            following_count: Metric::Unavailable,
            post_count: Metric::Unavailable,
            is_verified: Flag::Unavailable,
            is_business_account: Flag::Unavailable,
            has_highlights: Flag::Unavailable,
            external_url: Metric::Unavailable,
            public_email: Metric::Unavailable,
            public_phone: Metric::Unavailable,
            has_public_contact: Flag::Unavailable,
            bio_has_link: Flag::Unavailable,
            is_private: Flag::Unavailable,
            posts_for_average: 0,
            average_likes: Metric::Unavailable,
            average_comments: Metric::Unavailable,
            engagement_rate: Metric::Unavailable,
            recent_posts: Vec::new(),
        },
        failure: Failure::profile(error),
    }
}

/// Placeholder keeping every profile field when only the media step failed.
pub fn media_placeholder(profile: &Profile, username: &str, error: &ApiError) -> PlaceholderSummary {
    let mut summary = profile_summary(profile, username);
    summary.username = username.to_string();
    summary.profile_url = profile_url(username);
    PlaceholderSummary {
        summary,
        failure: Failure::media(error),
    }
}
