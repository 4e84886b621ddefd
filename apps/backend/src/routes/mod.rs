use actix_web::web;

use crate::middleware::jwt_extract::JwtExtract;

pub mod claims;
pub mod health;
pub mod user_claims;

/// Register every route. The claim endpoints sit behind `JwtExtract`;
/// `/` and `/health` stay open.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::root))
        .configure(health::configure_routes);

    cfg.service(
        web::scope("/claims")
            .wrap(JwtExtract)
            .configure(claims::configure_routes),
    );

    cfg.service(
        web::scope("/users")
            .wrap(JwtExtract)
            .configure(user_claims::configure_routes),
    );
}
