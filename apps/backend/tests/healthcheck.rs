mod common;
mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use support::{build_memory_state, build_test_state, create_test_app};

#[actix_web::test]
async fn root_returns_greeting() {
    let app = create_test_app(build_memory_state().await).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("Claims API"));
}

#[actix_web::test]
async fn health_reports_database_and_latest_migration() {
    let app = create_test_app(build_test_state().await).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = common::read_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert_eq!(body["migrations"], "m20261001_000001_init");
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
    assert!(body.get("db_error").is_none());
    assert!(body["time"].is_string());
}

#[actix_web::test]
async fn health_without_database_is_still_ok() {
    let app = create_test_app(build_memory_state().await).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = common::read_json(resp).await;
    assert_eq!(body["db"], "not_configured");
}

#[actix_web::test]
async fn every_response_carries_request_id() {
    let app = create_test_app(build_memory_state().await).await;

    let first = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let second = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

    let id = |resp: &actix_web::dev::ServiceResponse| {
        resp.headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .expect("x-request-id header")
    };
    assert_ne!(id(&first), id(&second));
}
