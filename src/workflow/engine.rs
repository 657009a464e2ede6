use uuid::Uuid;

use super::{
    repository::OrderStore,
    status::{OrderStatus, WorkflowPolicy},
};
use crate::{
    error::{AppError, AppResult},
    models::Order,
};

/// A scanned order together with the status the workflow proposes next.
/// `suggested_status` is `None` for a closed order under the terminal policy.
#[derive(Debug, Clone)]
pub struct ScanResolution {
    pub order: Order,
    pub suggested_status: Option<OrderStatus>,
}

/// Resolve a scanned barcode or order number to a single order.
///
/// Duplicate matches resolve to the earliest-created record (ties broken by
/// id), so re-scanning the same label always lands on the same order no
/// matter what order the backend returned the candidates in.
pub async fn resolve_scan<S>(
    store: &S,
    code: &str,
    policy: WorkflowPolicy,
) -> AppResult<ScanResolution>
where
    S: OrderStore + ?Sized,
{
    let mut matches = store.find_by_scan_code(code).await?;
    matches.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    let Some(order) = matches.into_iter().next() else {
        return Err(AppError::NotFound);
    };
    let suggested_status = order.status.next(policy);
    Ok(ScanResolution {
        order,
        suggested_status,
    })
}

/// Apply a status chosen in the scanner confirm step or the detail page.
///
/// The target arrives as a wire string; anything outside the five known
/// values fails before the store is touched. There is no concurrency check:
/// two scanners racing on one order are last-write-wins, which is accepted
/// at single-shop scale.
pub async fn apply_status<S>(
    store: &S,
    order_id: Uuid,
    new_status: &str,
    policy: WorkflowPolicy,
) -> AppResult<Order>
where
    S: OrderStore + ?Sized,
{
    let status: OrderStatus = new_status.parse()?;
    let order = store
        .find_by_id(order_id)
        .await?
        .ok_or(AppError::NotFound)?;
    policy.check_transition(order.status, status)?;
    store.save_status(order_id, status).await
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::workflow::{
        repository::MemoryOrderStore,
        status::{ClosedBehavior, TransitionRule},
    };

    fn order(number: &str, barcode: &str, status: OrderStatus, age_secs: i64) -> Order {
        let created = Utc::now() - Duration::seconds(age_secs);
        Order {
            id: Uuid::new_v4(),
            order_number: number.to_string(),
            customer_id: Uuid::new_v4(),
            items: Vec::new(),
            status,
            total_amount: 230,
            branch_id: Uuid::new_v4(),
            created_by: Uuid::new_v4(),
            notes: None,
            barcode: barcode.to_string(),
            device_left: false,
            sent_to_central_service: false,
            created_at: created,
            updated_at: created,
        }
    }

    #[tokio::test]
    async fn resolves_by_barcode_and_falls_back_to_order_number() {
        let store = MemoryOrderStore::new();
        let first = order("ORD-0001", "111111111111", OrderStatus::Pending, 60);
        let second = order("ORD-0002", "222222222222", OrderStatus::Pending, 30);
        let first_id = first.id;
        let second_id = second.id;
        store.insert(first);
        store.insert(second);

        let by_barcode = resolve_scan(&store, "111111111111", WorkflowPolicy::default())
            .await
            .unwrap();
        assert_eq!(by_barcode.order.id, first_id);

        let by_number = resolve_scan(&store, "ORD-0002", WorkflowPolicy::default())
            .await
            .unwrap();
        assert_eq!(by_number.order.id, second_id);
    }

    #[tokio::test]
    async fn order_number_match_is_case_insensitive() {
        let store = MemoryOrderStore::new();
        let target = order("ORD-0007", "333333333333", OrderStatus::Pending, 10);
        let target_id = target.id;
        store.insert(target);

        let resolved = resolve_scan(&store, "ord-0007", WorkflowPolicy::default())
            .await
            .unwrap();
        assert_eq!(resolved.order.id, target_id);
    }

    #[tokio::test]
    async fn duplicate_barcodes_resolve_to_the_earliest_created() {
        let store = MemoryOrderStore::new();
        let older = order("ORD-0001", "444444444444", OrderStatus::Shipped, 3600);
        let newer = order("ORD-0002", "444444444444", OrderStatus::Pending, 5);
        let older_id = older.id;
        store.insert(newer);
        store.insert(older);

        let resolved = resolve_scan(&store, "444444444444", WorkflowPolicy::default())
            .await
            .unwrap();
        assert_eq!(resolved.order.id, older_id);
    }

    #[tokio::test]
    async fn unknown_code_is_not_found() {
        let store = MemoryOrderStore::new();
        let err = resolve_scan(&store, "nonexistent", WorkflowPolicy::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn scan_suggests_the_next_stage() {
        let store = MemoryOrderStore::new();
        store.insert(order(
            "ORD-0001",
            "555555555555",
            OrderStatus::Pending,
            10,
        ));

        let resolved = resolve_scan(&store, "555555555555", WorkflowPolicy::default())
            .await
            .unwrap();
        assert_eq!(resolved.suggested_status, Some(OrderStatus::InProcess));
    }

    #[tokio::test]
    async fn closed_order_has_no_suggestion_unless_wrapping() {
        let store = MemoryOrderStore::new();
        store.insert(order("ORD-0001", "666666666666", OrderStatus::Closed, 10));

        let terminal = resolve_scan(&store, "666666666666", WorkflowPolicy::default())
            .await
            .unwrap();
        assert_eq!(terminal.suggested_status, None);

        let wrap_policy = WorkflowPolicy {
            closed: ClosedBehavior::WrapToPending,
            ..WorkflowPolicy::default()
        };
        let wrapped = resolve_scan(&store, "666666666666", wrap_policy)
            .await
            .unwrap();
        assert_eq!(wrapped.suggested_status, Some(OrderStatus::Pending));
    }

    #[tokio::test]
    async fn applying_a_status_persists_it_and_is_idempotent() {
        let store = MemoryOrderStore::new();
        let target = order("ORD-0001", "777777777777", OrderStatus::InProcess, 10);
        let target_id = target.id;
        store.insert(target);

        let once = apply_status(&store, target_id, "shipped", WorkflowPolicy::default())
            .await
            .unwrap();
        assert_eq!(once.status, OrderStatus::Shipped);
        assert_eq!(once.total_amount, 230);

        let twice = apply_status(&store, target_id, "shipped", WorkflowPolicy::default())
            .await
            .unwrap();
        assert_eq!(twice.status, OrderStatus::Shipped);
    }

    #[tokio::test]
    async fn bogus_status_fails_without_touching_the_store() {
        let store = MemoryOrderStore::new();
        let target = order("ORD-0001", "888888888888", OrderStatus::Pending, 10);
        let target_id = target.id;
        store.insert(target);

        let err = apply_status(&store, target_id, "bogus_status", WorkflowPolicy::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidStatus(_)));

        let untouched = store.find_by_id(target_id).await.unwrap().unwrap();
        assert_eq!(untouched.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn monotonic_policy_rejects_moving_backward() {
        let store = MemoryOrderStore::new();
        let target = order("ORD-0001", "999999999999", OrderStatus::Completed, 10);
        let target_id = target.id;
        store.insert(target);

        let policy = WorkflowPolicy {
            rule: TransitionRule::Monotonic,
            ..WorkflowPolicy::default()
        };
        let err = apply_status(&store, target_id, "pending", policy)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidStatus(_)));

        let untouched = store.find_by_id(target_id).await.unwrap().unwrap();
        assert_eq!(untouched.status, OrderStatus::Completed);
    }

    #[tokio::test]
    async fn applying_to_a_missing_order_is_not_found() {
        let store = MemoryOrderStore::new();
        let err = apply_status(&store, Uuid::new_v4(), "shipped", WorkflowPolicy::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }
}
