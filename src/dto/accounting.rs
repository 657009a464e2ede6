use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::AccountingEntry;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEntryRequest {
    pub amount: i64,
    pub description: String,
    pub entry_type: String,
    pub category: String,
    pub branch_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EntryList {
    pub items: Vec<AccountingEntry>,
}
