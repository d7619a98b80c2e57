use super::{client, config, feed_items, mock_feed_page};
use ig_stats::application::models::profile::Profile;
use ig_stats::application::services::media_service::{MediaService, MediaServiceImpl};
use ig_stats::error::ApiErrorKind;
use mockito::Server;
use pretty_assertions::assert_eq;
use serde_json::json;

fn profile() -> Profile {
    Profile {
        id: "77".to_string(),
        username: Some("natgeo".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_pagination_returns_exact_target() {
    let mut server = Server::new_async().await;
    let first = mock_feed_page(
        &mut server,
        "77",
        vec![("count", "50")],
        200,
        json!({"items": feed_items(0, 50), "more_available": true, "next_max_id": "cursor_50"}).to_string(),
    )
    .await;
    let second = mock_feed_page(
        &mut server,
        "77",
        vec![("count", "10"), ("max_id", "cursor_50")],
        200,
        json!({"items": feed_items(50, 12), "more_available": true, "next_max_id": "cursor_62"}).to_string(),
    )
    .await;

    let service = MediaServiceImpl::new(client(&server), &config(&server).scraper);
    let items = service.fetch_media(&profile(), "natgeo", 60).await.unwrap();

    assert_eq!(items.len(), 60);
    let last = items[59].as_ref().unwrap();
    assert_eq!(last.pk.as_deref(), Some("1059"));
    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn test_pagination_stops_when_feed_is_exhausted() {
    let mut server = Server::new_async().await;
    let page = mock_feed_page(
        &mut server,
        "77",
        vec![("count", "24")],
        200,
        json!({"items": feed_items(0, 5), "more_available": false}).to_string(),
    )
    .await;

    let service = MediaServiceImpl::new(client(&server), &config(&server).scraper);
    let items = service.fetch_media(&profile(), "natgeo", 24).await.unwrap();

    assert_eq!(items.len(), 5);
    page.assert_async().await;
}

#[tokio::test]
async fn test_rate_limited_second_page() {
    let mut server = Server::new_async().await;
    let _first = mock_feed_page(
        &mut server,
        "77",
        vec![("count", "50")],
        200,
        json!({"items": feed_items(0, 50), "more_available": true, "next_max_id": "cursor_50"}).to_string(),
    )
    .await;
    let _second = mock_feed_page(
        &mut server,
        "77",
        vec![("count", "20"), ("max_id", "cursor_50")],
        429,
        String::new(),
    )
    .await;

    let service = MediaServiceImpl::new(client(&server), &config(&server).scraper);
    let err = service.fetch_media(&profile(), "natgeo", 70).await.unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::RateLimited);
}

#[tokio::test]
async fn test_feed_not_found_names_user() {
    let mut server = Server::new_async().await;
    let _page = mock_feed_page(&mut server, "77", vec![("count", "12")], 404, String::new()).await;

    let service = MediaServiceImpl::new(client(&server), &config(&server).scraper);
    let err = service.fetch_media(&profile(), "natgeo", 12).await.unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::NotFound);
    assert_eq!(err.message(), "No se encontraron medios para el usuario natgeo.");
}
