use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::{AuditAction, log_audit},
    dto::catalog::{
        BrandList, CreateBrandRequest, CreateModelRequest, CreatePartRequest, ModelList, PartList,
    },
    entity::{
        brands::{ActiveModel as BrandActive, Column as BrandCol, Entity as Brands, Model as BrandModel},
        device_models::{
            ActiveModel as DeviceModelActive, Column as DeviceModelCol, Entity as DeviceModels,
            Model as DeviceModelModel,
        },
        part_models::{ActiveModel as PartModelActive, Column as PartModelCol, Entity as PartModels},
        parts::{ActiveModel as PartActive, Entity as Parts, Model as PartModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Brand, DeviceModel, Part},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_brands(state: &AppState) -> AppResult<ApiResponse<BrandList>> {
    let items = Brands::find()
        .order_by_asc(BrandCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(brand_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Ok",
        BrandList { items },
        Some(Meta::empty()),
    ))
}

pub async fn create_brand(
    state: &AppState,
    user: &AuthUser,
    payload: CreateBrandRequest,
) -> AppResult<ApiResponse<Brand>> {
    ensure_admin(user)?;

    let brand = BrandActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        image_url: Set(payload.image_url),
        active: Set(true),
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        AuditAction::BrandCreate,
        Some(serde_json::json!({ "brand_id": brand.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Brand created",
        brand_from_entity(brand),
        Some(Meta::empty()),
    ))
}

/// Device models offered under one brand.
pub async fn list_models(state: &AppState, brand_id: Uuid) -> AppResult<ApiResponse<ModelList>> {
    if Brands::find_by_id(brand_id).one(&state.orm).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let items = DeviceModels::find()
        .filter(DeviceModelCol::BrandId.eq(brand_id))
        .order_by_asc(DeviceModelCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(device_model_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Ok",
        ModelList { items },
        Some(Meta::empty()),
    ))
}

pub async fn create_model(
    state: &AppState,
    user: &AuthUser,
    brand_id: Uuid,
    payload: CreateModelRequest,
) -> AppResult<ApiResponse<DeviceModel>> {
    ensure_admin(user)?;

    if Brands::find_by_id(brand_id).one(&state.orm).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let model = DeviceModelActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        brand_id: Set(brand_id),
        image_url: Set(payload.image_url),
        active: Set(true),
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        AuditAction::ModelCreate,
        Some(serde_json::json!({ "model_id": model.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Model created",
        device_model_from_entity(model),
        Some(Meta::empty()),
    ))
}

/// Spare parts that fit one device model.
pub async fn list_parts(state: &AppState, model_id: Uuid) -> AppResult<ApiResponse<PartList>> {
    let model = DeviceModels::find_by_id(model_id).one(&state.orm).await?;
    let model = match model {
        Some(m) => m,
        None => return Err(AppError::NotFound),
    };

    let part_models = model.find_related(Parts).all(&state.orm).await?;
    let items = attach_model_ids(state, part_models).await?;

    Ok(ApiResponse::success(
        "Ok",
        PartList { items },
        Some(Meta::empty()),
    ))
}

pub async fn create_part(
    state: &AppState,
    user: &AuthUser,
    payload: CreatePartRequest,
) -> AppResult<ApiResponse<Part>> {
    ensure_admin(user)?;

    let mut model_ids = payload.model_ids;
    model_ids.sort();
    model_ids.dedup();
    if model_ids.is_empty() {
        return Err(AppError::Validation(
            "part must fit at least one model".into(),
        ));
    }
    if payload.price < 0 {
        return Err(AppError::Validation("part price cannot be negative".into()));
    }

    let txn = state.orm.begin().await?;

    let known = DeviceModels::find()
        .filter(DeviceModelCol::Id.is_in(model_ids.clone()))
        .count(&txn)
        .await?;
    if known as usize != model_ids.len() {
        return Err(AppError::Validation("unknown device model".into()));
    }

    let part = PartActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        price: Set(payload.price),
        stock: Set(payload.stock),
        active: Set(true),
    }
    .insert(&txn)
    .await?;

    for model_id in &model_ids {
        PartModelActive {
            part_id: Set(part.id),
            model_id: Set(*model_id),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        AuditAction::PartCreate,
        Some(serde_json::json!({ "part_id": part.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Part created",
        part_from_entity(part, model_ids),
        Some(Meta::empty()),
    ))
}

async fn attach_model_ids(
    state: &AppState,
    part_models: Vec<PartModel>,
) -> AppResult<Vec<Part>> {
    if part_models.is_empty() {
        return Ok(Vec::new());
    }

    let part_ids: Vec<Uuid> = part_models.iter().map(|p| p.id).collect();
    let links = PartModels::find()
        .filter(PartModelCol::PartId.is_in(part_ids))
        .all(&state.orm)
        .await?;

    let mut fits_by_part: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for link in links {
        fits_by_part
            .entry(link.part_id)
            .or_default()
            .push(link.model_id);
    }

    Ok(part_models
        .into_iter()
        .map(|part| {
            let fits = fits_by_part.remove(&part.id).unwrap_or_default();
            part_from_entity(part, fits)
        })
        .collect())
}

fn brand_from_entity(model: BrandModel) -> Brand {
    Brand {
        id: model.id,
        name: model.name,
        image_url: model.image_url,
        active: model.active,
    }
}

fn device_model_from_entity(model: DeviceModelModel) -> DeviceModel {
    DeviceModel {
        id: model.id,
        name: model.name,
        brand_id: model.brand_id,
        image_url: model.image_url,
        active: model.active,
    }
}

fn part_from_entity(model: PartModel, model_ids: Vec<Uuid>) -> Part {
    Part {
        id: model.id,
        name: model.name,
        model_ids,
        price: model.price,
        stock: model.stock,
        active: model.active,
    }
}
