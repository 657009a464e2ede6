use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{models::Order, workflow::status::OrderStatus};

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewOrderPart {
    pub name: String,
    pub price: i64,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewOrderItem {
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub parts: Vec<NewOrderPart>,
}

/// Order number, barcode, status and all totals are assigned serverside;
/// clients only describe the work.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub customer_id: Uuid,
    pub branch_id: Uuid,
    pub items: Vec<NewOrderItem>,
    pub notes: Option<String>,
    #[serde(default)]
    pub device_left: bool,
    #[serde(default)]
    pub sent_to_central_service: bool,
}

/// Merge-update; absent fields keep their stored value. Replacing `items`
/// recomputes every total.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    pub customer_id: Option<Uuid>,
    pub items: Option<Vec<NewOrderItem>>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub device_left: Option<bool>,
    pub sent_to_central_service: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScanResult {
    pub order: Order,
    pub suggested_status: Option<OrderStatus>,
}
