use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, App, Error};
use claims_api::middleware::request_trace::RequestTrace;
use claims_api::middleware::structured_logger::StructuredLogger;
use claims_api::middleware::trace_span::TraceSpan;
use claims_api::routes;
use claims_api::state::app_state::AppState;

/// Build the full application (routes, auth, and tracing middleware) for a test.
pub async fn create_test_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse, Error = Error> {
    test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .configure(|cfg| state.configure_data(cfg))
            .configure(routes::configure),
    )
    .await
}
