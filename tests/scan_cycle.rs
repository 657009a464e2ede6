//! Scanner-terminal cycle against the in-memory store: no database needed.

use chrono::Utc;
use uuid::Uuid;

use axum_repairshop_api::{
    error::AppError,
    models::{Order, OrderItem, OrderPart},
    workflow::{
        MemoryOrderStore, OrderStatus, WorkflowPolicy, apply_status, barcode, resolve_scan,
    },
};

fn repair_order(number: &str, code: &str) -> Order {
    let now = Utc::now();
    let screen = OrderPart {
        id: Uuid::new_v4(),
        name: "Screen Replacement".into(),
        price: 150,
        quantity: 1,
    };
    let battery = OrderPart {
        id: Uuid::new_v4(),
        name: "Battery".into(),
        price: 80,
        quantity: 1,
    };
    let item = OrderItem {
        id: Uuid::new_v4(),
        brand: "Apple".into(),
        model: "iPhone 13".into(),
        total_price: 230,
        parts: vec![screen, battery],
    };
    Order {
        id: Uuid::new_v4(),
        order_number: number.to_string(),
        customer_id: Uuid::new_v4(),
        items: vec![item],
        status: OrderStatus::Pending,
        total_amount: 230,
        branch_id: Uuid::new_v4(),
        created_by: Uuid::new_v4(),
        notes: None,
        barcode: code.to_string(),
        device_left: true,
        sent_to_central_service: false,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn scan_confirm_cycle_advances_a_pending_order() {
    let store = MemoryOrderStore::new();
    let order = repair_order("ORD-0001", "111111111111");
    let order_id = order.id;
    store.insert(order);

    // Scan proposes the next stage without touching anything.
    let resolution = resolve_scan(&store, "111111111111", WorkflowPolicy::default())
        .await
        .unwrap();
    assert_eq!(resolution.order.id, order_id);
    assert_eq!(resolution.suggested_status, Some(OrderStatus::InProcess));
    assert_eq!(resolution.order.status, OrderStatus::Pending);

    // Confirming persists the suggestion; money and items stay untouched.
    let updated = apply_status(
        &store,
        order_id,
        resolution.suggested_status.unwrap().as_str(),
        WorkflowPolicy::default(),
    )
    .await
    .unwrap();
    assert_eq!(updated.status, OrderStatus::InProcess);
    assert_eq!(updated.total_amount, 230);
    assert_eq!(updated.items.len(), 1);
    assert_eq!(updated.items[0].total_price, 230);
}

#[tokio::test]
async fn scan_falls_back_to_the_order_number() {
    let store = MemoryOrderStore::new();
    store.insert(repair_order("ORD-0001", "111111111111"));
    store.insert(repair_order("ORD-0002", "222222222222"));

    let resolution = resolve_scan(&store, "ORD-0002", WorkflowPolicy::default())
        .await
        .unwrap();
    assert_eq!(resolution.order.order_number, "ORD-0002");
}

#[tokio::test]
async fn failed_scans_leave_prior_state_intact() {
    let store = MemoryOrderStore::new();
    let order = repair_order("ORD-0001", "111111111111");
    let order_id = order.id;
    store.insert(order);

    let err = resolve_scan(&store, "nonexistent", WorkflowPolicy::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let err = apply_status(&store, order_id, "bogus_status", WorkflowPolicy::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidStatus(_)));

    let untouched = resolve_scan(&store, "ORD-0001", WorkflowPolicy::default())
        .await
        .unwrap();
    assert_eq!(untouched.order.status, OrderStatus::Pending);
}

#[test]
fn generated_barcodes_are_printable_and_verifiable() {
    let code = barcode::generate();
    assert_eq!(code.len(), barcode::BARCODE_LEN);
    assert!(barcode::verify(&code));
}
