use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Resource::Table)
                    .if_not_exists()
                    .col(pk_auto(Resource::Id))
                    .col(integer(Resource::OwnerId))
                    .col(string(Resource::Title))
                    .col(text(Resource::Description))
                    .col(string(Resource::Category))
                    .col(string(Resource::Location))
                    .col(integer(Resource::Capacity).default(1))
                    .col(text_null(Resource::AvailabilityRules))
                    .col(boolean(Resource::RequiresApproval).default(false))
                    .col(string(Resource::Status).default("draft"))
                    .col(
                        timestamp_with_time_zone(Resource::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Resource::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_resource_owner_id")
                            .from(Resource::Table, Resource::OwnerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Resource::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Resource {
    Table,
    Id,
    OwnerId,
    Title,
    Description,
    Category,
    Location,
    Capacity,
    AvailabilityRules,
    RequiresApproval,
    Status,
    CreatedAt,
    UpdatedAt,
}
