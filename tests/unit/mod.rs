mod batch_tests;
mod export_tests;
mod media_tests;
mod profile_tests;

use ig_stats::config::{Config, Credentials, RestApiConfig, ScraperConfig};
use ig_stats::transport::http_client::IgRestClient;
use ig_stats::utils::logger::setup_logger;
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Value};
use std::sync::Arc;

pub(crate) fn config(server: &ServerGuard) -> Config {
    Config {
        credentials: Credentials {
            app_id: "936619743392459".to_string(),
            cookie: "sessionid=abc; csrftoken=tok123; ds_user_id=9".to_string(),
        },
        rest_api: RestApiConfig {
            base_url: server.url(),
            timeout: 5,
        },
        scraper: ScraperConfig {
            page_delay_ms: 0,
            account_delay_ms: 0,
            max_page_size: 50,
        },
    }
}

pub(crate) fn client(server: &ServerGuard) -> Arc<IgRestClient> {
    setup_logger();
    Arc::new(IgRestClient::new(&config(server)).unwrap())
}

pub(crate) fn profile_json(id: &str, username: &str, followers: u64) -> Value {
    json!({
        "data": {"user": {
            "id": id,
            "username": username,
            "full_name": format!("{} oficial", username),
            "biography": "Fotos del mundo https://example.com",
            "category_name": "Media",
            "is_verified": true,
            "is_business_account": true,
            "is_private": false,
            "highlight_reel_count": 2,
            "external_url": "https://example.com",
            "public_email": "hola@example.com",
            "public_phone_number": "",
            "edge_followed_by": {"count": followers},
            "edge_follow": {"count": 10},
            "edge_owner_to_timeline_media": {"count": 120}
        }},
        "status": "ok"
    })
}

pub(crate) fn feed_items(start: usize, n: usize) -> Vec<Value> {
    (start..start + n)
        .map(|i| {
            json!({
                "pk": format!("{}", 1000 + i),
                "media_type": if i % 2 == 0 { 1 } else { 2 },
                "like_count": 10,
                "comment_count": 2,
                "caption": {"text": format!("post {}", i)},
                "taken_at": 1700000000u64 + i as u64,
                "image_versions2": {"candidates": [{"url": format!("https://cdn.example.com/{}.jpg", i)}]}
            })
        })
        .collect()
}

pub(crate) async fn mock_profile(
    server: &mut ServerGuard,
    username: &str,
    status: usize,
    body: String,
) -> Mock {
    server
        .mock("GET", "/users/web_profile_info/")
        .match_query(Matcher::UrlEncoded("username".into(), username.into()))
        .match_header("x-ig-app-id", "936619743392459")
        .match_header("x-csrftoken", "tok123")
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

pub(crate) async fn mock_feed_page(
    server: &mut ServerGuard,
    user_id: &str,
    query: Vec<(&str, &str)>,
    status: usize,
    body: String,
) -> Mock {
    let matchers = query
        .into_iter()
        .map(|(k, v)| Matcher::UrlEncoded(k.into(), v.into()))
        .collect();
    server
        .mock("GET", format!("/feed/user/{}/", user_id).as_str())
        .match_query(Matcher::AllOf(matchers))
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}
