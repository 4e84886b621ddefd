//! SeaORM adapter for the claim catalog.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::claim_definitions;

pub mod dto;

pub use dto::ClaimDefinitionCreate;

/// Insert one catalog row. Duplicate `(type, value)` pairs are accepted.
pub async fn create_definition<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ClaimDefinitionCreate,
) -> Result<claim_definitions::Model, sea_orm::DbErr> {
    let active = claim_definitions::ActiveModel {
        id: NotSet,
        claim_type: Set(dto.claim_type),
        claim_value: Set(dto.claim_value),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    active.insert(conn).await
}

/// All catalog rows in insertion order.
pub async fn list_definitions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<claim_definitions::Model>, sea_orm::DbErr> {
    claim_definitions::Entity::find()
        .order_by_asc(claim_definitions::Column::Id)
        .all(conn)
        .await
}

/// First row (lowest id) matching both type and value.
pub async fn find_definition<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    claim_type: &str,
    claim_value: &str,
) -> Result<Option<claim_definitions::Model>, sea_orm::DbErr> {
    claim_definitions::Entity::find()
        .filter(claim_definitions::Column::ClaimType.eq(claim_type))
        .filter(claim_definitions::Column::ClaimValue.eq(claim_value))
        .order_by_asc(claim_definitions::Column::Id)
        .one(conn)
        .await
}
