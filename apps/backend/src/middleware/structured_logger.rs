//! Access log: one `request_completed` event per request.
//!
//! Besides method, path, status and latency the event names the matched
//! route template (`/users/{user_id}/claims`) and, for authenticated calls,
//! the token subject that `JwtExtract` left in request extensions.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use super::request_trace::trace_id_of;
use crate::auth::jwt::AccessClaims;

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

/// What the access log records about a finished request.
#[derive(Debug)]
struct Completion {
    method: String,
    path: String,
    trace_id: String,
    route: Option<String>,
    caller: Option<String>,
    status: StatusCode,
    duration_us: u64,
}

impl Completion {
    fn emit(&self) {
        let route = self.route.as_deref().unwrap_or("-");
        let caller = self.caller.as_deref().unwrap_or("-");
        let status_code = self.status.as_u16();

        if self.status.is_server_error() {
            error!(http.method = %self.method, url.path = %self.path, http.route = route, caller, http.status_code = status_code, duration_us = self.duration_us, trace_id = %self.trace_id, "request_completed");
        } else if self.status.is_client_error() {
            warn!(http.method = %self.method, url.path = %self.path, http.route = route, caller, http.status_code = status_code, duration_us = self.duration_us, trace_id = %self.trace_id, "request_completed");
        } else {
            info!(http.method = %self.method, url.path = %self.path, http.route = route, caller, http.status_code = status_code, duration_us = self.duration_us, trace_id = %self.trace_id, "request_completed");
        }
    }
}

fn caller_of(req: &HttpRequest) -> Option<String> {
    req.extensions()
        .get::<AccessClaims>()
        .and_then(|claims| claims.sub.clone())
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let trace_id = trace_id_of(&req);

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, route, caller) = match &result {
                Ok(res) => (
                    res.status(),
                    res.request().match_pattern(),
                    caller_of(res.request()),
                ),
                Err(err) => (err.as_response_error().status_code(), None, None),
            };

            Completion {
                method,
                path,
                trace_id,
                route,
                caller,
                status,
                duration_us: start.elapsed().as_micros() as u64,
            }
            .emit();

            result
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{test, web, App, HttpResponse};

    use super::*;

    async fn with_caller(req: HttpRequest) -> HttpResponse {
        req.extensions_mut().insert(AccessClaims {
            sub: Some("svc-reporting".to_string()),
            iss: "iss".to_string(),
            exp: 0,
            iat: None,
        });
        HttpResponse::Ok().finish()
    }

    async fn open() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn caller_is_read_from_request_extensions() {
        let app = test::init_service(
            App::new()
                .wrap(StructuredLogger)
                .route("/users/{user_id}/claims", web::get().to(with_caller))
                .route("/open", web::get().to(open)),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/users/7/claims").to_request(),
        )
        .await;
        assert_eq!(caller_of(resp.request()).as_deref(), Some("svc-reporting"));
        assert_eq!(
            resp.request().match_pattern().as_deref(),
            Some("/users/{user_id}/claims")
        );

        let resp = test::call_service(&app, test::TestRequest::get().uri("/open").to_request()).await;
        assert_eq!(caller_of(resp.request()), None);
    }
}
