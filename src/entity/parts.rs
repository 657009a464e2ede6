use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "parts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    pub stock: i32,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::part_models::Entity")]
    PartModels,
}

impl Related<super::device_models::Entity> for Entity {
    fn to() -> RelationDef {
        super::part_models::Relation::DeviceModels.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::part_models::Relation::Parts.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
