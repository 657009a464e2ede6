use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::status::OrderStatus;
use crate::{
    error::{AppError, AppResult},
    models::Order,
};

/// Persistence seam for the scan workflow. Implementations return orders with
/// their items fully loaded.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>>;

    /// Every order whose barcode equals `code` exactly, or whose order number
    /// equals `code` case-insensitively. Result ordering is unspecified; the
    /// engine applies the deterministic tie-break.
    async fn find_by_scan_code(&self, code: &str) -> AppResult<Vec<Order>>;

    /// Persist a status change and refresh the order's `updated_at`.
    async fn save_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Order>;
}

/// In-memory store with the same contract as the database-backed one. Keeps
/// the engine testable without Postgres (and usable embedded).
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: Mutex<Vec<Order>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, order: Order) {
        self.lock().push(order);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Order>> {
        self.orders.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>> {
        Ok(self.lock().iter().find(|o| o.id == id).cloned())
    }

    async fn find_by_scan_code(&self, code: &str) -> AppResult<Vec<Order>> {
        Ok(self
            .lock()
            .iter()
            .filter(|o| o.barcode == code || o.order_number.eq_ignore_ascii_case(code))
            .cloned()
            .collect())
    }

    async fn save_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Order> {
        let mut orders = self.lock();
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(AppError::NotFound)?;
        order.status = status;
        order.updated_at = Utc::now();
        Ok(order.clone())
    }
}
