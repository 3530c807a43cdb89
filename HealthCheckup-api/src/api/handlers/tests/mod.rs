use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use health_checkup_domain::testing::{
    create_failing_health_record_service, create_mock_health_record_service,
};

use crate::api::routes::{create_app, AppState};

mod health_test;

pub(crate) fn mock_app() -> Router {
    let service: AppState = Arc::new(create_mock_health_record_service());
    create_app(service)
}

pub(crate) fn failing_app() -> Router {
    let service: AppState = Arc::new(create_failing_health_record_service());
    create_app(service)
}

/// Send one request and decode the JSON body
pub(crate) async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}
