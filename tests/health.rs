use axum_repairshop_api::routes::health::ping;

#[tokio::test]
async fn ping_returns_pong() {
    let response = ping().await;
    assert!(response.0.success);
    assert_eq!(response.0.message, "pong");

    let data = response.0.data.expect("ping data");
    assert_eq!(data.status, "ok");
}
