use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::domain::Claim;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::repos::claim_catalog::ClaimCatalog;
use crate::services::catalog;

/// Body shared by the catalog and user-claim endpoints.
#[derive(Debug, Deserialize)]
pub struct ClaimRequest {
    #[serde(rename = "type", alias = "Type")]
    pub claim_type: String,
    #[serde(rename = "value", alias = "Value")]
    pub claim_value: String,
}

impl From<ClaimRequest> for Claim {
    fn from(req: ClaimRequest) -> Self {
        Claim::new(req.claim_type, req.claim_value)
    }
}

async fn create_claim(
    catalog: web::Data<dyn ClaimCatalog>,
    body: ValidatedJson<ClaimRequest>,
) -> Result<HttpResponse, AppError> {
    let created = catalog::create_definition(catalog.get_ref(), body.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(created))
}

async fn list_claims(catalog: web::Data<dyn ClaimCatalog>) -> Result<HttpResponse, AppError> {
    let definitions = catalog::list_definitions(catalog.get_ref()).await?;
    Ok(HttpResponse::Ok().json(definitions))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create_claim))
            .route(web::get().to(list_claims)),
    );
}

#[cfg(test)]
mod tests {
    use super::ClaimRequest;
    use crate::domain::Claim;

    #[test]
    fn accepts_lower_and_pascal_case_keys() {
        let lower: ClaimRequest = serde_json::from_str(r#"{"type":"dept","value":"eng"}"#).unwrap();
        let pascal: ClaimRequest = serde_json::from_str(r#"{"Type":"dept","Value":"eng"}"#).unwrap();
        assert_eq!(Claim::from(lower), Claim::new("dept", "eng"));
        assert_eq!(Claim::from(pascal), Claim::new("dept", "eng"));
    }

    #[test]
    fn requires_both_fields() {
        assert!(serde_json::from_str::<ClaimRequest>(r#"{"type":"dept"}"#).is_err());
        assert!(serde_json::from_str::<ClaimRequest>(r#"{"type":"dept","value":null}"#).is_err());
    }
}
