use super::{client, config, feed_items, mock_feed_page, mock_profile, profile_json};
use assert_json_diff::assert_json_include;
use ig_stats::application::models::summary::{AccountRecord, Flag, Metric};
use ig_stats::error::ApiErrorKind;
use ig_stats::{BatchService, ProgressEvent};
use mockito::{Server, ServerGuard};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc;

/// natgeo has 3 posts, ghost404 does not exist and limited is rate-limited on its feed.
pub(crate) async fn run_batch(server: &mut ServerGuard) -> (Vec<AccountRecord>, Vec<ProgressEvent>) {
    let _mocks = vec![
        mock_profile(server, "ghost404", 404, String::new()).await,
        mock_profile(server, "natgeo", 200, profile_json("1", "natgeo", 1000).to_string()).await,
        mock_profile(server, "limited", 200, profile_json("2", "limited", 50).to_string()).await,
        mock_feed_page(
            server,
            "1",
            vec![("count", "12")],
            200,
            json!({"items": feed_items(0, 3), "more_available": false}).to_string(),
        )
        .await,
        mock_feed_page(server, "2", vec![("count", "12")], 429, String::new()).await,
    ];

    let service = Arc::new(BatchService::new(client(server), &config(server).scraper));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let users = vec!["ghost404".to_string(), " @natgeo ".to_string(), "limited".to_string()];
    let records = service.spawn(users, 12, tx).await.unwrap();

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    (records, events)
}

#[tokio::test]
async fn test_batch_end_to_end() {
    let mut server = Server::new_async().await;
    let (records, _) = run_batch(&mut server).await;

    assert_eq!(records.len(), 3);
    let usernames: Vec<&str> = records.iter().map(|r| r.username()).collect();
    assert_eq!(usernames, vec!["ghost404", "natgeo", "limited"]);

    let ghost = &records[0];
    assert_eq!(ghost.failure().unwrap().kind(), ApiErrorKind::NotFound);
    assert_eq!(ghost.summary().follower_count, Metric::Unavailable);
    assert_eq!(ghost.summary().has_highlights, Flag::Unavailable);

    let natgeo = records[1].summary();
    assert!(records[1].failure().is_none());
    assert_eq!(natgeo.recent_posts.len(), 3);
    assert_eq!(natgeo.posts_for_average, 3);
    assert_eq!(natgeo.average_likes, Metric::Available(10.0));
    assert_eq!(natgeo.average_comments, Metric::Available(2.0));
    assert_eq!(natgeo.engagement_rate, Metric::Available(1.2));
    assert_eq!(natgeo.has_public_contact, Flag::Yes);
    assert_eq!(natgeo.public_phone, Metric::Unavailable);

    let limited = &records[2];
    let failure = limited.failure().unwrap();
    assert_eq!(failure.kind(), ApiErrorKind::RateLimited);
    assert!(failure.media_error().is_some());
    assert_eq!(
        limited.summary().full_name,
        Metric::Available("limited oficial".to_string())
    );
    assert_eq!(limited.summary().follower_count, Metric::Available(50));
    assert_eq!(limited.summary().average_likes, Metric::Unavailable);
}

#[tokio::test]
async fn test_batch_json_shape() {
    let mut server = Server::new_async().await;
    let (records, _) = run_batch(&mut server).await;

    assert_json_include!(
        actual: serde_json::to_value(&records).unwrap(),
        expected: json!([
            {
                "status": "placeholder",
                "username": "ghost404",
                "profileUrl": "https://www.instagram.com/ghost404",
                "engagementRate": "No Disponible",
                "failure": {"stage": "profile", "kind": "notFound", "message": "Usuario no encontrado"}
            },
            {
                "status": "complete",
                "username": "natgeo",
                "userId": "1",
                "isVerified": "Sí",
                "isPrivate": "No",
                "engagementRate": 1.2,
                "recentPosts": [
                    {"postId": "1000", "kind": "Foto", "caption": "post 0", "postDate": "14/11/2023"},
                    {"postId": "1001", "kind": "Video"}
                ]
            },
            {
                "status": "placeholder",
                "username": "limited",
                "followerCount": 50,
                "averageLikes": "No Disponible",
                "failure": {"stage": "media", "kind": "rateLimited"}
            }
        ])
    );
}

#[tokio::test]
async fn test_progress_events() {
    let mut server = Server::new_async().await;
    let (records, events) = run_batch(&mut server).await;

    let logs: Vec<&str> = events
        .iter()
        .filter_map(|e| match e {
            ProgressEvent::Log(line) => Some(line.as_str()),
            ProgressEvent::Results(_) => None,
        })
        .collect();
    assert_eq!(
        logs,
        vec![
            "[1/3] Analizando perfil: ghost404...",
            "El usuario ingresado 'ghost404' no existe.",
            "[2/3] Analizando perfil: natgeo...",
            "Datos completos obtenidos para natgeo.",
            "[3/3] Analizando perfil: limited...",
            "Error o datos incompletos para limited: Demasiadas peticiones. Espera un tiempo. Añadiendo datos parciales.",
            "Scraping completado.",
        ]
    );
    assert_eq!(events.last(), Some(&ProgressEvent::Results(records)));
}

#[tokio::test]
async fn test_rate_limit_on_second_page_keeps_profile() {
    let mut server = Server::new_async().await;
    let _mocks = vec![
        mock_profile(&mut server, "paged", 200, profile_json("3", "paged", 400).to_string()).await,
        mock_feed_page(
            &mut server,
            "3",
            vec![("count", "50")],
            200,
            json!({"items": feed_items(0, 50), "more_available": true, "next_max_id": "cursor_50"})
                .to_string(),
        )
        .await,
        mock_feed_page(
            &mut server,
            "3",
            vec![("count", "10"), ("max_id", "cursor_50")],
            429,
            String::new(),
        )
        .await,
    ];

    let service = Arc::new(BatchService::new(client(&server), &config(&server).scraper));
    let (tx, _rx) = mpsc::unbounded_channel();
    let records = service.spawn(vec!["paged".to_string()], 60, tx).await.unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert!(matches!(record, AccountRecord::Placeholder(_)));
    let failure = record.failure().unwrap();
    assert_eq!(failure.kind(), ApiErrorKind::RateLimited);
    assert!(failure.media_error().is_some());

    let summary = record.summary();
    assert_eq!(summary.full_name, Metric::Available("paged oficial".to_string()));
    assert_eq!(summary.follower_count, Metric::Available(400));
    assert_eq!(summary.post_count, Metric::Available(120));
    assert_eq!(summary.average_likes, Metric::Unavailable);
    assert!(summary.recent_posts.is_empty());
}
