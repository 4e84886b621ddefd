use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum ClaimDefinitions {
    Table,
    Id,
    ClaimType,
    ClaimValue,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    UserName,
    Email,
    CreatedAt,
}

#[derive(Iden)]
enum UserClaims {
    Table,
    Id,
    UserId,
    ClaimType,
    ClaimValue,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // claim_definitions: no uniqueness on (claim_type, claim_value)
        manager
            .create_table(
                Table::create()
                    .table(ClaimDefinitions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClaimDefinitions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClaimDefinitions::ClaimType).string().not_null())
                    .col(ColumnDef::new(ClaimDefinitions::ClaimValue).string().not_null())
                    .col(
                        ColumnDef::new(ClaimDefinitions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_claim_definitions_type_value")
                    .table(ClaimDefinitions::Table)
                    .col(ClaimDefinitions::ClaimType)
                    .col(ClaimDefinitions::ClaimValue)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::UserName).string().null())
                    .col(ColumnDef::new(Users::Email).string().null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserClaims::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserClaims::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserClaims::UserId).string().not_null())
                    .col(ColumnDef::new(UserClaims::ClaimType).string().not_null())
                    .col(ColumnDef::new(UserClaims::ClaimValue).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_claims_user_id")
                            .from(UserClaims::Table, UserClaims::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_user_claims_user_type_value")
                    .table(UserClaims::Table)
                    .col(UserClaims::UserId)
                    .col(UserClaims::ClaimType)
                    .col(UserClaims::ClaimValue)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserClaims::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(ClaimDefinitions::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
