use serde_json::Value;
use uuid::Uuid;

use crate::{db::DbPool, error::AppResult};

/// Every mutating endpoint records exactly one of these. The audit row keeps
/// both the action name and the collection it touched.
#[derive(Debug, Clone, Copy)]
pub enum AuditAction {
    OrderCreate,
    OrderUpdate,
    OrderStatusUpdate,
    CustomerCreate,
    CustomerUpdate,
    BranchCreate,
    BranchUpdate,
    BrandCreate,
    ModelCreate,
    PartCreate,
    EntryCreate,
    UserRegister,
    UserLogin,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::OrderCreate => "order_create",
            AuditAction::OrderUpdate => "order_update",
            AuditAction::OrderStatusUpdate => "order_status_update",
            AuditAction::CustomerCreate => "customer_create",
            AuditAction::CustomerUpdate => "customer_update",
            AuditAction::BranchCreate => "branch_create",
            AuditAction::BranchUpdate => "branch_update",
            AuditAction::BrandCreate => "brand_create",
            AuditAction::ModelCreate => "model_create",
            AuditAction::PartCreate => "part_create",
            AuditAction::EntryCreate => "accounting_entry_create",
            AuditAction::UserRegister => "user_register",
            AuditAction::UserLogin => "user_login",
        }
    }

    fn resource(self) -> &'static str {
        match self {
            AuditAction::OrderCreate | AuditAction::OrderUpdate | AuditAction::OrderStatusUpdate => {
                "orders"
            }
            AuditAction::CustomerCreate | AuditAction::CustomerUpdate => "customers",
            AuditAction::BranchCreate | AuditAction::BranchUpdate => "branches",
            AuditAction::BrandCreate | AuditAction::ModelCreate | AuditAction::PartCreate => {
                "catalog"
            }
            AuditAction::EntryCreate => "accounting",
            AuditAction::UserRegister | AuditAction::UserLogin => "users",
        }
    }
}

/// Record a mutating action in the audit trail. Callers treat failures as
/// non-fatal: a lost audit row must never fail the request that caused it.
pub async fn log_audit(
    pool: &DbPool,
    user_id: Option<Uuid>,
    action: AuditAction,
    metadata: Option<Value>,
) -> AppResult<()> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO audit_logs (id, user_id, action, resource, metadata)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(action.as_str())
    .bind(action.resource())
    .bind(metadata)
    .execute(pool)
    .await?;

    Ok(())
}
