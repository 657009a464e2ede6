use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Branch;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBranchRequest {
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub manager: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBranchRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub manager: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BranchList {
    pub items: Vec<Branch>,
}
