use super::{client, mock_profile, profile_json};
use ig_stats::application::services::profile_service::{ProfileService, ProfileServiceImpl};
use ig_stats::error::{ApiError, ApiErrorKind};
use mockito::Server;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_profile_resolves_over_http() {
    let mut server = Server::new_async().await;
    let mock = mock_profile(&mut server, "natgeo", 200, profile_json("787132", "natgeo", 5000).to_string()).await;

    let service = ProfileServiceImpl::new(client(&server));
    let profile = service.fetch_profile("natgeo").await.unwrap();

    assert_eq!(profile.id, "787132");
    assert_eq!(profile.follower_count(), Some(5000));
    assert_eq!(profile.category.as_deref(), Some("Media"));
    assert!(profile.has_public_contact());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_profile_status_mapping() {
    let cases = [
        (401, ApiError::unauthorized()),
        (429, ApiError::rate_limited()),
        (404, ApiError::NotFound("Usuario no encontrado".to_string())),
        (503, ApiError::Transport("HTTP 503".to_string())),
    ];

    for (status, expected) in cases {
        let mut server = Server::new_async().await;
        let _mock = mock_profile(&mut server, "natgeo", status, String::new()).await;

        let service = ProfileServiceImpl::new(client(&server));
        let err = service.fetch_profile("natgeo").await.unwrap_err();
        assert_eq!(err, expected, "status {}", status);
    }
}

#[tokio::test]
async fn test_login_page_is_parse_error() {
    let mut server = Server::new_async().await;
    let html = format!("<!DOCTYPE html><html><body>{}</body></html>", "x".repeat(400));
    let _mock = mock_profile(&mut server, "natgeo", 200, html).await;

    let service = ProfileServiceImpl::new(client(&server));
    let err = service.fetch_profile("natgeo").await.unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::Parse);
    assert!(err.message().contains("Respuesta: <!DOCTYPE html>"));
    assert!(!err.message().contains("</html>"));
}

#[tokio::test]
async fn test_missing_user_object_is_invalid_response() {
    let mut server = Server::new_async().await;
    let _mock = mock_profile(&mut server, "natgeo", 200, r#"{"data": {"user": null}, "status": "ok"}"#.to_string()).await;

    let service = ProfileServiceImpl::new(client(&server));
    let err = service.fetch_profile("natgeo").await.unwrap_err();

    assert_eq!(err, ApiError::invalid_response());
}
