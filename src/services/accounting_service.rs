use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit::{AuditAction, log_audit},
    dto::accounting::{CreateEntryRequest, EntryList},
    entity::{
        accounting_entries::{
            ActiveModel as EntryActive, Column as EntryCol, Entity as AccountingEntries,
            Model as EntryModel,
        },
        branches::Entity as Branches,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{AccountingEntry, AccountingSummary},
    response::{ApiResponse, Meta},
    state::AppState,
};

const ENTRY_TYPES: [&str; 2] = ["income", "expense"];
const CATEGORIES: [&str; 6] = ["repair", "parts", "salary", "rent", "utilities", "other"];

pub async fn list_entries(
    state: &AppState,
    branch_id: Uuid,
) -> AppResult<ApiResponse<EntryList>> {
    let items = AccountingEntries::find()
        .filter(EntryCol::BranchId.eq(branch_id))
        .order_by_desc(EntryCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(entry_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Ok",
        EntryList { items },
        Some(Meta::empty()),
    ))
}

pub async fn create_entry(
    state: &AppState,
    user: &AuthUser,
    payload: CreateEntryRequest,
) -> AppResult<ApiResponse<AccountingEntry>> {
    if payload.amount <= 0 {
        return Err(AppError::Validation("amount must be positive".into()));
    }
    if !ENTRY_TYPES.contains(&payload.entry_type.as_str()) {
        return Err(AppError::Validation(format!(
            "unknown entry type: {}",
            payload.entry_type
        )));
    }
    if !CATEGORIES.contains(&payload.category.as_str()) {
        return Err(AppError::Validation(format!(
            "unknown category: {}",
            payload.category
        )));
    }
    if Branches::find_by_id(payload.branch_id)
        .one(&state.orm)
        .await?
        .is_none()
    {
        return Err(AppError::Validation("unknown branch".into()));
    }

    let entry = EntryActive {
        id: Set(Uuid::new_v4()),
        amount: Set(payload.amount),
        description: Set(payload.description),
        entry_type: Set(payload.entry_type),
        category: Set(payload.category),
        branch_id: Set(payload.branch_id),
        created_by: Set(user.user_id),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        AuditAction::EntryCreate,
        Some(serde_json::json!({ "entry_id": entry.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Entry created",
        entry_from_entity(entry),
        Some(Meta::empty()),
    ))
}

/// Branch totals for the accounting dashboard, computed in one pass.
pub async fn branch_summary(
    state: &AppState,
    branch_id: Uuid,
) -> AppResult<ApiResponse<AccountingSummary>> {
    let summary: AccountingSummary = sqlx::query_as(
        r#"
        SELECT
            COALESCE(SUM(CASE WHEN entry_type = 'income' THEN amount ELSE 0 END), 0)::bigint AS income,
            COALESCE(SUM(CASE WHEN entry_type = 'expense' THEN amount ELSE 0 END), 0)::bigint AS expense,
            COALESCE(SUM(CASE WHEN entry_type = 'income' THEN amount ELSE -amount END), 0)::bigint AS balance,
            COUNT(*)::bigint AS entry_count,
            MAX(created_at) AS last_updated
        FROM accounting_entries
        WHERE branch_id = $1
        "#,
    )
    .bind(branch_id)
    .fetch_one(&state.pool)
    .await?;

    Ok(ApiResponse::success("Ok", summary, Some(Meta::empty())))
}

fn entry_from_entity(model: EntryModel) -> AccountingEntry {
    AccountingEntry {
        id: model.id,
        amount: model.amount,
        description: model.description,
        entry_type: model.entry_type,
        category: model.category,
        branch_id: model.branch_id,
        created_by: model.created_by,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
