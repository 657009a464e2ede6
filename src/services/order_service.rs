use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::{AuditAction, log_audit},
    db::OrmConn,
    dto::orders::{
        CreateOrderRequest, NewOrderItem, OrderList, ScanResult, UpdateOrderRequest,
        UpdateOrderStatusRequest,
    },
    entity::{
        branches::Entity as Branches,
        customers::Entity as Customers,
        order_items::{
            ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems,
            Model as OrderItemModel,
        },
        order_parts::{
            ActiveModel as OrderPartActive, Column as OrderPartCol, Entity as OrderParts,
            Model as OrderPartModel,
        },
        orders::{
            ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel,
        },
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Order, OrderItem, OrderPart},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    state::AppState,
    workflow::{self, OrderStore, barcode, status::OrderStatus},
};

const BARCODE_ALLOC_ATTEMPTS: usize = 5;

pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    if payload.items.is_empty() {
        return Err(AppError::Validation("order needs at least one item".into()));
    }
    let total_amount = validate_and_total(&payload.items)?;

    let txn = state.orm.begin().await?;

    if Customers::find_by_id(payload.customer_id)
        .one(&txn)
        .await?
        .is_none()
    {
        return Err(AppError::Validation("unknown customer".into()));
    }
    if Branches::find_by_id(payload.branch_id)
        .one(&txn)
        .await?
        .is_none()
    {
        return Err(AppError::Validation("unknown branch".into()));
    }

    let order_number = next_order_number(&txn).await?;
    let barcode = allocate_barcode(&txn).await?;

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        order_number: Set(order_number),
        customer_id: Set(payload.customer_id),
        branch_id: Set(payload.branch_id),
        created_by: Set(user.user_id),
        // New orders always start the workflow at the beginning.
        status: Set(OrderStatus::Pending.as_str().to_string()),
        total_amount: Set(total_amount),
        notes: Set(payload.notes),
        barcode: Set(barcode),
        device_left: Set(payload.device_left),
        sent_to_central_service: Set(payload.sent_to_central_service),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let items = insert_items(&txn, order.id, &payload.items).await?;

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        AuditAction::OrderCreate,
        Some(serde_json::json!({
            "order_id": order.id,
            "order_number": order.order_number.clone(),
        })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    let order = order_from_entity(order, items)?;
    Ok(ApiResponse::success(
        "Order created",
        order,
        Some(Meta::empty()),
    ))
}

pub async fn update_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    let txn = state.orm.begin().await?;

    let existing = Orders::find_by_id(id).one(&txn).await?;
    let existing = match existing {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    if let Some(customer_id) = payload.customer_id {
        if Customers::find_by_id(customer_id).one(&txn).await?.is_none() {
            return Err(AppError::Validation("unknown customer".into()));
        }
    }

    // A status edit from the detail page goes through the same rule as the
    // scanner confirm step.
    let new_status = match payload.status.as_deref() {
        Some(raw) => {
            let target: OrderStatus = raw.parse()?;
            let current: OrderStatus = existing.status.parse()?;
            state.workflow.check_transition(current, target)?;
            Some(target)
        }
        None => None,
    };

    let order_id = existing.id;
    let mut active: OrderActive = existing.into();
    if let Some(customer_id) = payload.customer_id {
        active.customer_id = Set(customer_id);
    }
    if let Some(status) = new_status {
        active.status = Set(status.as_str().to_string());
    }
    if let Some(notes) = payload.notes {
        active.notes = Set(Some(notes));
    }
    if let Some(device_left) = payload.device_left {
        active.device_left = Set(device_left);
    }
    if let Some(sent) = payload.sent_to_central_service {
        active.sent_to_central_service = Set(sent);
    }

    let items = match payload.items {
        Some(new_items) => {
            let total_amount = validate_and_total(&new_items)?;
            delete_items(&txn, order_id).await?;
            active.total_amount = Set(total_amount);
            Some(insert_items(&txn, order_id, &new_items).await?)
        }
        None => None,
    };

    active.updated_at = Set(Utc::now().into());
    let order = active.update(&txn).await?;

    let items = match items {
        Some(items) => items,
        None => load_items(&txn, order_id).await?,
    };

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        AuditAction::OrderUpdate,
        Some(serde_json::json!({ "order_id": order.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    let order = order_from_entity(order, items)?;
    Ok(ApiResponse::success("Updated", order, Some(Meta::empty())))
}

pub async fn update_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    let store = OrmOrderStore::new(state.orm.clone());
    let order = workflow::apply_status(&store, id, &payload.status, state.workflow).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        AuditAction::OrderStatusUpdate,
        Some(serde_json::json!({
            "order_id": order.id,
            "status": order.status,
        })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Status updated",
        order,
        Some(Meta::empty()),
    ))
}

/// Scan path: `code` is whatever the scanner read, barcode or order number.
pub async fn resolve_by_scan(state: &AppState, code: &str) -> AppResult<ApiResponse<ScanResult>> {
    let store = OrmOrderStore::new(state.orm.clone());
    let resolution = workflow::resolve_scan(&store, code, state.workflow).await?;

    Ok(ApiResponse::success(
        "Order resolved",
        ScanResult {
            order: resolution.order,
            suggested_status: resolution.suggested_status,
        },
        Some(Meta::empty()),
    ))
}

pub async fn get_order(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Order>> {
    let order = Orders::find_by_id(id).one(&state.orm).await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let items = load_items(&state.orm, order.id).await?;
    let order = order_from_entity(order, items)?;
    Ok(ApiResponse::success("OK", order, Some(Meta::empty())))
}

pub async fn list_orders(
    state: &AppState,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let branch_id = query
        .branch_id
        .ok_or_else(|| AppError::Validation("branch_id is required".into()))?;

    let (page, limit, offset) = query.pagination.normalize();
    let mut condition = Condition::all().add(OrderCol::BranchId.eq(branch_id));
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        // Reject typos instead of silently returning an empty page.
        let status: OrderStatus = status.parse()?;
        condition = condition.add(OrderCol::Status.eq(status.as_str()));
    }

    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);

    let mut finder = Orders::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let models = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;
    let items = assemble_orders(&state.orm, models).await?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Ok", OrderList { items }, Some(meta)))
}

/// SeaORM-backed [`OrderStore`] used by the HTTP handlers.
pub struct OrmOrderStore {
    conn: OrmConn,
}

impl OrmOrderStore {
    pub fn new(conn: OrmConn) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl OrderStore for OrmOrderStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>> {
        let model = Orders::find_by_id(id).one(&self.conn).await?;
        match model {
            Some(model) => {
                let items = load_items(&self.conn, model.id).await?;
                Ok(Some(order_from_entity(model, items)?))
            }
            None => Ok(None),
        }
    }

    async fn find_by_scan_code(&self, code: &str) -> AppResult<Vec<Order>> {
        let models = Orders::find()
            .filter(
                Condition::any()
                    .add(OrderCol::Barcode.eq(code))
                    .add(
                        Expr::expr(Func::lower(Expr::col(OrderCol::OrderNumber)))
                            .eq(code.to_ascii_lowercase()),
                    ),
            )
            .all(&self.conn)
            .await?;
        assemble_orders(&self.conn, models).await
    }

    async fn save_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Order> {
        let model = Orders::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or(AppError::NotFound)?;
        let mut active: OrderActive = model.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now().into());
        let model = active.update(&self.conn).await?;

        let items = load_items(&self.conn, model.id).await?;
        order_from_entity(model, items)
    }
}

fn validate_and_total(items: &[NewOrderItem]) -> AppResult<i64> {
    let mut total: i64 = 0;
    for item in items {
        if item.brand.trim().is_empty() || item.model.trim().is_empty() {
            return Err(AppError::Validation(
                "item brand and model are required".into(),
            ));
        }
        for part in &item.parts {
            if part.quantity <= 0 {
                return Err(AppError::Validation(format!(
                    "part {} has non-positive quantity",
                    part.name
                )));
            }
            if part.price < 0 {
                return Err(AppError::Validation(format!(
                    "part {} has negative price",
                    part.name
                )));
            }
            total += part.price * i64::from(part.quantity);
        }
    }
    Ok(total)
}

async fn next_order_number<C: ConnectionTrait>(conn: &C) -> AppResult<String> {
    let count = Orders::find().count(conn).await?;
    Ok(format!("ORD-{:04}", count + 1))
}

/// Barcode candidates are probabilistic; uniqueness is enforced here by
/// re-rolling until the candidate is unclaimed.
async fn allocate_barcode<C: ConnectionTrait>(conn: &C) -> AppResult<String> {
    for _ in 0..BARCODE_ALLOC_ATTEMPTS {
        let candidate = barcode::generate();
        let taken = Orders::find()
            .filter(OrderCol::Barcode.eq(candidate.as_str()))
            .count(conn)
            .await?
            > 0;
        if !taken {
            return Ok(candidate);
        }
    }
    Err(AppError::Internal(anyhow::anyhow!(
        "could not allocate a unique barcode"
    )))
}

async fn insert_items<C: ConnectionTrait>(
    conn: &C,
    order_id: Uuid,
    items: &[NewOrderItem],
) -> AppResult<Vec<OrderItem>> {
    let mut inserted = Vec::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        let item_total: i64 = item
            .parts
            .iter()
            .map(|p| p.price * i64::from(p.quantity))
            .sum();

        let item_model = OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order_id),
            brand: Set(item.brand.clone()),
            model: Set(item.model.clone()),
            total_price: Set(item_total),
            position: Set(position as i32),
        }
        .insert(conn)
        .await?;

        let mut parts = Vec::with_capacity(item.parts.len());
        for (part_position, part) in item.parts.iter().enumerate() {
            let part_model = OrderPartActive {
                id: Set(Uuid::new_v4()),
                order_item_id: Set(item_model.id),
                name: Set(part.name.clone()),
                price: Set(part.price),
                quantity: Set(part.quantity),
                position: Set(part_position as i32),
            }
            .insert(conn)
            .await?;
            parts.push(order_part_from_entity(part_model));
        }

        inserted.push(order_item_from_entity(item_model, parts));
    }
    Ok(inserted)
}

async fn delete_items<C: ConnectionTrait>(conn: &C, order_id: Uuid) -> AppResult<()> {
    let item_ids: Vec<Uuid> = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order_id))
        .all(conn)
        .await?
        .into_iter()
        .map(|i| i.id)
        .collect();

    if !item_ids.is_empty() {
        OrderParts::delete_many()
            .filter(OrderPartCol::OrderItemId.is_in(item_ids))
            .exec(conn)
            .await?;
        OrderItems::delete_many()
            .filter(OrderItemCol::OrderId.eq(order_id))
            .exec(conn)
            .await?;
    }
    Ok(())
}

async fn load_items<C: ConnectionTrait>(conn: &C, order_id: Uuid) -> AppResult<Vec<OrderItem>> {
    let item_models = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order_id))
        .order_by_asc(OrderItemCol::Position)
        .all(conn)
        .await?;
    let item_ids: Vec<Uuid> = item_models.iter().map(|i| i.id).collect();

    let part_models = if item_ids.is_empty() {
        Vec::new()
    } else {
        OrderParts::find()
            .filter(OrderPartCol::OrderItemId.is_in(item_ids))
            .order_by_asc(OrderPartCol::Position)
            .all(conn)
            .await?
    };

    let mut parts_by_item: HashMap<Uuid, Vec<OrderPart>> = HashMap::new();
    for part in part_models {
        parts_by_item
            .entry(part.order_item_id)
            .or_default()
            .push(order_part_from_entity(part));
    }

    Ok(item_models
        .into_iter()
        .map(|item| {
            let parts = parts_by_item.remove(&item.id).unwrap_or_default();
            order_item_from_entity(item, parts)
        })
        .collect())
}

/// Batch-load items and parts for a page of orders (two queries, not 2N).
pub(crate) async fn assemble_orders<C: ConnectionTrait>(
    conn: &C,
    orders: Vec<OrderModel>,
) -> AppResult<Vec<Order>> {
    if orders.is_empty() {
        return Ok(Vec::new());
    }

    let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    let item_models = OrderItems::find()
        .filter(OrderItemCol::OrderId.is_in(order_ids))
        .order_by_asc(OrderItemCol::Position)
        .all(conn)
        .await?;
    let item_ids: Vec<Uuid> = item_models.iter().map(|i| i.id).collect();

    let part_models = if item_ids.is_empty() {
        Vec::new()
    } else {
        OrderParts::find()
            .filter(OrderPartCol::OrderItemId.is_in(item_ids))
            .order_by_asc(OrderPartCol::Position)
            .all(conn)
            .await?
    };

    let mut parts_by_item: HashMap<Uuid, Vec<OrderPart>> = HashMap::new();
    for part in part_models {
        parts_by_item
            .entry(part.order_item_id)
            .or_default()
            .push(order_part_from_entity(part));
    }

    let mut items_by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
    for item in item_models {
        let parts = parts_by_item.remove(&item.id).unwrap_or_default();
        items_by_order
            .entry(item.order_id)
            .or_default()
            .push(order_item_from_entity(item, parts));
    }

    orders
        .into_iter()
        .map(|order| {
            let items = items_by_order.remove(&order.id).unwrap_or_default();
            order_from_entity(order, items)
        })
        .collect()
}

fn order_from_entity(model: OrderModel, items: Vec<OrderItem>) -> AppResult<Order> {
    let status: OrderStatus = model.status.parse()?;
    Ok(Order {
        id: model.id,
        order_number: model.order_number,
        customer_id: model.customer_id,
        items,
        status,
        total_amount: model.total_amount,
        branch_id: model.branch_id,
        created_by: model.created_by,
        notes: model.notes,
        barcode: model.barcode,
        device_left: model.device_left,
        sent_to_central_service: model.sent_to_central_service,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

fn order_item_from_entity(model: OrderItemModel, parts: Vec<OrderPart>) -> OrderItem {
    OrderItem {
        id: model.id,
        brand: model.brand,
        model: model.model,
        parts,
        total_price: model.total_price,
    }
}

fn order_part_from_entity(model: OrderPartModel) -> OrderPart {
    OrderPart {
        id: model.id,
        name: model.name,
        price: model.price,
        quantity: model.quantity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::orders::{NewOrderItem, NewOrderPart};

    fn item(parts: Vec<NewOrderPart>) -> NewOrderItem {
        NewOrderItem {
            brand: "Apple".into(),
            model: "iPhone 13".into(),
            parts,
        }
    }

    #[test]
    fn totals_derive_from_part_lines() {
        let items = vec![item(vec![
            NewOrderPart {
                name: "Screen Replacement".into(),
                price: 150,
                quantity: 1,
            },
            NewOrderPart {
                name: "Battery".into(),
                price: 80,
                quantity: 1,
            },
        ])];
        assert_eq!(validate_and_total(&items).unwrap(), 230);
    }

    #[test]
    fn quantities_multiply_into_the_total() {
        let items = vec![item(vec![NewOrderPart {
            name: "Screen Replacement".into(),
            price: 150,
            quantity: 2,
        }])];
        assert_eq!(validate_and_total(&items).unwrap(), 300);
    }

    #[test]
    fn items_without_parts_cost_nothing() {
        assert_eq!(validate_and_total(&[item(Vec::new())]).unwrap(), 0);
    }

    #[test]
    fn rejects_blank_brand_or_model() {
        let items = vec![NewOrderItem {
            brand: "  ".into(),
            model: "iPhone 13".into(),
            parts: Vec::new(),
        }];
        assert!(matches!(
            validate_and_total(&items),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn rejects_non_positive_quantities_and_negative_prices() {
        let zero_qty = vec![item(vec![NewOrderPart {
            name: "Battery".into(),
            price: 80,
            quantity: 0,
        }])];
        assert!(matches!(
            validate_and_total(&zero_qty),
            Err(AppError::Validation(_))
        ));

        let negative_price = vec![item(vec![NewOrderPart {
            name: "Battery".into(),
            price: -1,
            quantity: 1,
        }])];
        assert!(matches!(
            validate_and_total(&negative_price),
            Err(AppError::Validation(_))
        ));
    }
}
