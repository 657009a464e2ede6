use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::workflow::status::OrderStatus;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub branch_id: Option<Uuid>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub contact_preference: String,
    pub branch_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Branch {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub manager: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A repair order. `items` carries the full nested brand/model/parts
/// breakdown; `total_amount` is always derived from it, never set directly.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub customer_id: Uuid,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub total_amount: i64,
    pub branch_id: Uuid,
    pub created_by: Uuid,
    pub notes: Option<String>,
    pub barcode: String,
    pub device_left: bool,
    pub sent_to_central_service: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One device handed in under an order: brand, model, and the parts quoted
/// for it. `total_price` is the sum of its part lines.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub parts: Vec<OrderPart>,
    pub total_price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderPart {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Brand {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeviceModel {
    pub id: Uuid,
    pub name: String,
    pub brand_id: Uuid,
    pub image_url: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Part {
    pub id: Uuid,
    pub name: String,
    pub model_ids: Vec<Uuid>,
    pub price: i64,
    pub stock: i32,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountingEntry {
    pub id: Uuid,
    pub amount: i64,
    pub description: String,
    pub entry_type: String,
    pub category: String,
    pub branch_id: Uuid,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct AccountingSummary {
    pub income: i64,
    pub expense: i64,
    pub balance: i64,
    pub entry_count: i64,
    pub last_updated: Option<DateTime<Utc>>,
}
