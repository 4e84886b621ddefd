#![allow(dead_code)]

use actix_web::dev::ServiceResponse;
use actix_web::test;
use serde_json::Value;

// Logging is auto-installed for every test binary that includes this module
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Read a response body as JSON, panicking with the raw text when it isn't.
pub async fn read_json<B>(resp: ServiceResponse<B>) -> Value
where
    B: actix_web::body::MessageBody,
{
    let body = test::read_body(resp).await;
    let body_str = std::str::from_utf8(&body).expect("Response body should be valid UTF-8");
    serde_json::from_str(body_str)
        .unwrap_or_else(|_| panic!("Response body is not JSON. Raw body: {body_str}"))
}

/// Assert a 401 carries `WWW-Authenticate: Bearer` and the expected problem code.
pub async fn assert_unauthorized<B>(resp: ServiceResponse<B>, expected_code: &str)
where
    B: actix_web::body::MessageBody,
{
    let www_auth = resp
        .headers()
        .get("WWW-Authenticate")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    assert_eq!(www_auth.as_deref(), Some("Bearer"));

    backend_test_support::problem_details::assert_problem_details_from_service_response(
        resp,
        expected_code,
        actix_web::http::StatusCode::UNAUTHORIZED,
        None,
    )
    .await;
}
