pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_user_table;
mod m20260301_000002_create_resource_table;
mod m20260301_000003_create_resource_image_table;
mod m20260301_000004_create_resource_equipment_table;
mod m20260301_000005_create_booking_table;
mod m20260301_000006_create_review_table;
mod m20260301_000007_create_message_table;
mod m20260301_000008_create_notification_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_user_table::Migration),
            Box::new(m20260301_000002_create_resource_table::Migration),
            Box::new(m20260301_000003_create_resource_image_table::Migration),
            Box::new(m20260301_000004_create_resource_equipment_table::Migration),
            Box::new(m20260301_000005_create_booking_table::Migration),
            Box::new(m20260301_000006_create_review_table::Migration),
            Box::new(m20260301_000007_create_message_table::Migration),
            Box::new(m20260301_000008_create_notification_table::Migration),
        ]
    }
}
