use axum::http::StatusCode;

use super::{failing_app, mock_app, send};

#[tokio::test]
async fn test_health_check_is_healthy() {
    let (status, body) = send(&mock_app(), "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");
}

#[tokio::test]
async fn test_health_check_ignores_store_failures() {
    let (status, body) = send(&failing_app(), "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "healthy");
}

#[tokio::test]
async fn test_metrics_reports_connected_store() {
    let (status, body) = send(&mock_app(), "GET", "/metrics", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["database"]["status"], "connected");
    assert!(body["data"]["timestamp"].is_string());
}

#[tokio::test]
async fn test_metrics_reports_disconnected_store() {
    let (status, body) = send(&failing_app(), "GET", "/metrics", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["database"]["status"], "disconnected");
}

#[tokio::test]
async fn test_unknown_route_uses_envelope() {
    let (status, body) = send(&mock_app(), "GET", "/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_unsupported_method_uses_envelope() {
    let (status, body) = send(&mock_app(), "PATCH", "/health-records/1", None).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Method PATCH not allowed for /health-records/1");
    assert!(body["data"].is_null());

    let (status, body) = send(&mock_app(), "DELETE", "/health-records", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["success"], false);
}
