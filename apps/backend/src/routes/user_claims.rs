use actix_web::{web, HttpResponse};

use super::claims::ClaimRequest;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::repos::claim_catalog::ClaimCatalog;
use crate::repos::user_directory::UserDirectory;
use crate::services::user_claims;

async fn attach_claim(
    path: web::Path<String>,
    catalog: web::Data<dyn ClaimCatalog>,
    directory: web::Data<dyn UserDirectory>,
    body: ValidatedJson<ClaimRequest>,
) -> Result<HttpResponse, AppError> {
    user_claims::attach_claim(
        catalog.get_ref(),
        directory.get_ref(),
        &path,
        body.into_inner().into(),
    )
    .await?;
    Ok(HttpResponse::Ok().finish())
}

async fn list_claims(
    path: web::Path<String>,
    directory: web::Data<dyn UserDirectory>,
) -> Result<HttpResponse, AppError> {
    let claims = user_claims::list_user_claims(directory.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(claims))
}

async fn detach_claim(
    path: web::Path<String>,
    directory: web::Data<dyn UserDirectory>,
    body: ValidatedJson<ClaimRequest>,
) -> Result<HttpResponse, AppError> {
    user_claims::detach_claim(directory.get_ref(), &path, body.into_inner().into()).await?;
    Ok(HttpResponse::Ok().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{user_id}/claims")
            .route(web::post().to(attach_claim))
            .route(web::get().to(list_claims))
            .route(web::delete().to(detach_claim)),
    );
}
