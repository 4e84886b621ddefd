//! SeaORM adapter for the user directory.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::{user_claims, users};

pub mod dto;

pub use dto::{UserClaimCreate, UserCreate};

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let user_active = users::ActiveModel {
        id: Set(dto.id),
        user_name: Set(dto.user_name),
        email: Set(dto.email),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    user_active.insert(conn).await
}

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(user_id.to_string()).one(conn).await
}

/// Claims held by a user, in attachment order.
pub async fn list_user_claims<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
) -> Result<Vec<user_claims::Model>, sea_orm::DbErr> {
    user_claims::Entity::find()
        .filter(user_claims::Column::UserId.eq(user_id))
        .order_by_asc(user_claims::Column::Id)
        .all(conn)
        .await
}

pub async fn find_user_claim<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    claim_type: &str,
    claim_value: &str,
) -> Result<Option<user_claims::Model>, sea_orm::DbErr> {
    user_claims::Entity::find()
        .filter(user_claims::Column::UserId.eq(user_id))
        .filter(user_claims::Column::ClaimType.eq(claim_type))
        .filter(user_claims::Column::ClaimValue.eq(claim_value))
        .one(conn)
        .await
}

pub async fn insert_user_claim<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserClaimCreate,
) -> Result<user_claims::Model, sea_orm::DbErr> {
    let active = user_claims::ActiveModel {
        id: NotSet,
        user_id: Set(dto.user_id),
        claim_type: Set(dto.claim_type),
        claim_value: Set(dto.claim_value),
    };

    active.insert(conn).await
}

/// Delete every row matching the pair; returns the number of rows removed.
pub async fn delete_user_claims<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    claim_type: &str,
    claim_value: &str,
) -> Result<u64, sea_orm::DbErr> {
    let res = user_claims::Entity::delete_many()
        .filter(user_claims::Column::UserId.eq(user_id))
        .filter(user_claims::Column::ClaimType.eq(claim_type))
        .filter(user_claims::Column::ClaimValue.eq(claim_value))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}
