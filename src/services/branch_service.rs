use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit::{AuditAction, log_audit},
    dto::branches::{BranchList, CreateBranchRequest, UpdateBranchRequest},
    entity::branches::{
        ActiveModel as BranchActive, Column as BranchCol, Entity as Branches,
        Model as BranchModel,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Branch,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_branches(state: &AppState) -> AppResult<ApiResponse<BranchList>> {
    let items = Branches::find()
        .order_by_asc(BranchCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(branch_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Ok",
        BranchList { items },
        Some(Meta::empty()),
    ))
}

pub async fn get_branch(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Branch>> {
    let branch = Branches::find_by_id(id).one(&state.orm).await?;
    let branch = match branch {
        Some(b) => b,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success(
        "Ok",
        branch_from_entity(branch),
        Some(Meta::empty()),
    ))
}

pub async fn create_branch(
    state: &AppState,
    user: &AuthUser,
    payload: CreateBranchRequest,
) -> AppResult<ApiResponse<Branch>> {
    ensure_admin(user)?;

    let branch = BranchActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        address: Set(payload.address),
        phone_number: Set(payload.phone_number),
        email: Set(payload.email),
        manager: Set(payload.manager),
        active: Set(true),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        AuditAction::BranchCreate,
        Some(serde_json::json!({ "branch_id": branch.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Branch created",
        branch_from_entity(branch),
        Some(Meta::empty()),
    ))
}

pub async fn update_branch(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateBranchRequest,
) -> AppResult<ApiResponse<Branch>> {
    ensure_admin(user)?;

    let existing = Branches::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(b) => b,
        None => return Err(AppError::NotFound),
    };

    let mut active: BranchActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(address) = payload.address {
        active.address = Set(address);
    }
    if let Some(phone_number) = payload.phone_number {
        active.phone_number = Set(phone_number);
    }
    if let Some(email) = payload.email {
        active.email = Set(email);
    }
    if let Some(manager) = payload.manager {
        active.manager = Set(manager);
    }
    if let Some(is_active) = payload.active {
        active.active = Set(is_active);
    }
    active.updated_at = Set(Utc::now().into());

    let branch = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        AuditAction::BranchUpdate,
        Some(serde_json::json!({ "branch_id": branch.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        branch_from_entity(branch),
        Some(Meta::empty()),
    ))
}

fn branch_from_entity(model: BranchModel) -> Branch {
    Branch {
        id: model.id,
        name: model.name,
        address: model.address,
        phone_number: model.phone_number,
        email: model.email,
        manager: model.manager,
        active: model.active,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
