use actix_web::{App, HttpServer};
use claims_api::config::db::db_url;
use claims_api::config::jwt::security_config_from_env;
use claims_api::infra::db::redact_db_url;
use claims_api::infra::state::build_state;
use claims_api::middleware::cors::cors_middleware;
use claims_api::middleware::request_trace::RequestTrace;
use claims_api::middleware::structured_logger::StructuredLogger;
use claims_api::middleware::trace_span::TraceSpan;
use claims_api::routes;
use claims_api::telemetry;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // A missing .env file is fine; real deployments set the environment directly.
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
    {
        Ok(port) => port,
        Err(_) => {
            error!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        }
    };

    let security_config = match security_config_from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "startup.config_invalid");
            std::process::exit(1);
        }
    };

    let database_url = match db_url() {
        Ok(url) => url,
        Err(e) => {
            error!(error = %e, "startup.config_invalid");
            std::process::exit(1);
        }
    };

    let app_state = match build_state(security_config)
        .with_db_url(database_url.clone())
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, db = %redact_db_url(&database_url), "startup.state_failed");
            std::process::exit(1);
        }
    };

    info!(%host, port, "startup.listening");

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .configure(|cfg| app_state.configure_data(cfg))
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
