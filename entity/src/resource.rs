use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "resource")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: String,
    pub location: String,
    pub capacity: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub availability_rules: Option<String>,
    pub requires_approval: bool,
    /// One of `draft`, `published` or `archived`.
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Owner,
    #[sea_orm(has_many = "super::booking::Entity")]
    Booking,
    #[sea_orm(has_many = "super::review::Entity")]
    Review,
    #[sea_orm(has_many = "super::resource_image::Entity")]
    ResourceImage,
    #[sea_orm(has_many = "super::resource_equipment::Entity")]
    ResourceEquipment,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Booking.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl Related<super::resource_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResourceImage.def()
    }
}

impl Related<super::resource_equipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResourceEquipment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
