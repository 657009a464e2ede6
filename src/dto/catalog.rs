use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Brand, DeviceModel, Part};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBrandRequest {
    pub name: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateModelRequest {
    pub name: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePartRequest {
    pub name: String,
    pub price: i64,
    pub stock: i32,
    pub model_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BrandList {
    pub items: Vec<Brand>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ModelList {
    pub items: Vec<DeviceModel>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PartList {
    pub items: Vec<Part>,
}
