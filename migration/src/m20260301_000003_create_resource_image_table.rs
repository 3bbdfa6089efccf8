use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000002_create_resource_table::Resource;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ResourceImage::Table)
                    .if_not_exists()
                    .col(pk_auto(ResourceImage::Id))
                    .col(integer(ResourceImage::ResourceId))
                    .col(string(ResourceImage::ImageUrl))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_resource_image_resource_id")
                            .from(ResourceImage::Table, ResourceImage::ResourceId)
                            .to(Resource::Table, Resource::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ResourceImage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ResourceImage {
    Table,
    Id,
    ResourceId,
    ImageUrl,
}
