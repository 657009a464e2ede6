use sea_orm::entity::prelude::*;

/// Join table: which device models a spare part fits.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "part_models")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub part_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub model_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::parts::Entity",
        from = "Column::PartId",
        to = "super::parts::Column::Id"
    )]
    Parts,
    #[sea_orm(
        belongs_to = "super::device_models::Entity",
        from = "Column::ModelId",
        to = "super::device_models::Column::Id"
    )]
    DeviceModels,
}

impl Related<super::parts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Parts.def()
    }
}

impl Related<super::device_models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeviceModels.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
