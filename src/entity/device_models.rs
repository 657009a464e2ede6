use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "device_models")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub name: String,
    pub brand_id: Uuid,
    pub image_url: Option<String>,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::brands::Entity",
        from = "Column::BrandId",
        to = "super::brands::Column::Id"
    )]
    Brands,
    #[sea_orm(has_many = "super::part_models::Entity")]
    PartModels,
}

impl Related<super::brands::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brands.def()
    }
}

// Parts are reached through the part_models join table.
impl Related<super::parts::Entity> for Entity {
    fn to() -> RelationDef {
        super::part_models::Relation::Parts.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::part_models::Relation::DeviceModels.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
