use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit::{AuditAction, log_audit},
    dto::customers::{CreateCustomerRequest, CustomerList, UpdateCustomerRequest},
    dto::orders::OrderList,
    entity::{
        customers::{
            ActiveModel as CustomerActive, Column as CustomerCol, Entity as Customers,
            Model as CustomerModel,
        },
        orders::{Column as OrderCol, Entity as Orders},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Customer,
    response::{ApiResponse, Meta},
    routes::params::CustomerListQuery,
    state::AppState,
};

use super::order_service;

const SEARCH_LIMIT: u64 = 10;
const CONTACT_PREFERENCES: [&str; 3] = ["sms", "email", "whatsapp"];

pub async fn list_customers(
    state: &AppState,
    query: CustomerListQuery,
) -> AppResult<ApiResponse<CustomerList>> {
    let (page, limit, offset) = query.pagination.normalize();
    let mut condition = Condition::all();
    if let Some(branch_id) = query.branch_id {
        condition = condition.add(CustomerCol::BranchId.eq(branch_id));
    }

    let finder = Customers::find()
        .filter(condition)
        .order_by_desc(CustomerCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(customer_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Ok",
        CustomerList { items },
        Some(meta),
    ))
}

/// Front-desk search box: matches customer fields directly, then pulls in
/// customers reachable through a matching order number or barcode.
pub async fn search_customers(
    state: &AppState,
    query: &str,
) -> AppResult<ApiResponse<CustomerList>> {
    if query.is_empty() {
        return Err(AppError::Validation("search query is required".into()));
    }
    let pattern = format!("%{}%", query);

    let mut matched = Customers::find()
        .filter(
            Condition::any()
                .add(Expr::col(CustomerCol::Name).ilike(pattern.clone()))
                .add(Expr::col(CustomerCol::PhoneNumber).ilike(pattern.clone()))
                .add(Expr::col(CustomerCol::Email).ilike(pattern.clone()))
                .add(Expr::col(CustomerCol::Address).ilike(pattern.clone())),
        )
        .limit(SEARCH_LIMIT)
        .all(&state.orm)
        .await?;

    let customer_ids: Vec<Uuid> = Orders::find()
        .filter(
            Condition::any()
                .add(Expr::col(OrderCol::OrderNumber).ilike(pattern.clone()))
                .add(Expr::col(OrderCol::Barcode).ilike(pattern)),
        )
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|o| o.customer_id)
        .collect();

    if !customer_ids.is_empty() {
        let via_orders = Customers::find()
            .filter(CustomerCol::Id.is_in(customer_ids))
            .all(&state.orm)
            .await?;
        for customer in via_orders {
            if !matched.iter().any(|c| c.id == customer.id) {
                matched.push(customer);
            }
        }
    }

    let items: Vec<Customer> = matched.into_iter().map(customer_from_entity).collect();
    Ok(ApiResponse::success(
        "Ok",
        CustomerList { items },
        Some(Meta::empty()),
    ))
}

pub async fn find_by_phone(state: &AppState, phone: &str) -> AppResult<ApiResponse<Customer>> {
    if phone.is_empty() {
        return Err(AppError::Validation("phone number is required".into()));
    }
    let customer = Customers::find()
        .filter(CustomerCol::PhoneNumber.eq(phone))
        .one(&state.orm)
        .await?;
    let customer = match customer {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    Ok(ApiResponse::success(
        "Ok",
        customer_from_entity(customer),
        Some(Meta::empty()),
    ))
}

pub async fn create_customer(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    let contact_preference = validate_contact_preference(payload.contact_preference)?;

    let customer = CustomerActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        phone_number: Set(payload.phone_number),
        email: Set(payload.email),
        address: Set(payload.address),
        contact_preference: Set(contact_preference),
        branch_id: Set(payload.branch_id),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        AuditAction::CustomerCreate,
        Some(serde_json::json!({ "customer_id": customer.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Customer created",
        customer_from_entity(customer),
        Some(Meta::empty()),
    ))
}

pub async fn update_customer(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    let existing = Customers::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    let mut active: CustomerActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(phone_number) = payload.phone_number {
        active.phone_number = Set(phone_number);
    }
    if let Some(email) = payload.email {
        active.email = Set(Some(email));
    }
    if let Some(address) = payload.address {
        active.address = Set(Some(address));
    }
    if let Some(preference) = payload.contact_preference {
        active.contact_preference = Set(validate_contact_preference(Some(preference))?);
    }
    active.updated_at = Set(Utc::now().into());

    let customer = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        AuditAction::CustomerUpdate,
        Some(serde_json::json!({ "customer_id": customer.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        customer_from_entity(customer),
        Some(Meta::empty()),
    ))
}

/// Order history for one customer, newest first.
pub async fn customer_orders(state: &AppState, id: Uuid) -> AppResult<ApiResponse<OrderList>> {
    if Customers::find_by_id(id).one(&state.orm).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let models = Orders::find()
        .filter(OrderCol::CustomerId.eq(id))
        .order_by_desc(OrderCol::CreatedAt)
        .all(&state.orm)
        .await?;
    let items = order_service::assemble_orders(&state.orm, models).await?;

    Ok(ApiResponse::success(
        "Ok",
        OrderList { items },
        Some(Meta::empty()),
    ))
}

fn validate_contact_preference(preference: Option<String>) -> AppResult<String> {
    match preference {
        None => Ok("sms".to_string()),
        Some(p) if CONTACT_PREFERENCES.contains(&p.as_str()) => Ok(p),
        Some(p) => Err(AppError::Validation(format!(
            "unknown contact preference: {p}"
        ))),
    }
}

fn customer_from_entity(model: CustomerModel) -> Customer {
    Customer {
        id: model.id,
        name: model.name,
        phone_number: model.phone_number,
        email: model.email,
        address: model.address,
        contact_preference: model.contact_preference,
        branch_id: model.branch_id,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
