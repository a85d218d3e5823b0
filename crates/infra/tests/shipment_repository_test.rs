//! ShipmentRepository 統合テスト
//!
//! データベースを使用したテスト。sqlx::test マクロを使用して、
//! テストごとに専用のデータベースを作成しマイグレーションを適用する。
//!
//! 実行方法:
//! ```bash
//! DATABASE_URL=postgres://... cargo test -p shipmail-infra --test shipment_repository_test -- --ignored
//! ```

use shipmail_domain::{
    shipment::{Shipment, ShipmentAttribute},
    test_support::shipment_for_test,
};
use shipmail_infra::{
    error::InfraErrorKind,
    repository::{PostgresShipmentRepository, ShipmentRepository},
};
use sqlx::PgPool;

/// 出荷行を挿入する（フラグはどちらも false）
async fn insert_shipment(pool: &PgPool, shipment: &Shipment) {
    sqlx::query(
        r#"
        INSERT INTO sales_shipments (id, order_id, increment_id)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(shipment.id().as_uuid())
    .bind(shipment.order().id().as_uuid())
    .bind(shipment.increment_id())
    .execute(pool)
    .await
    .expect("出荷の挿入に失敗");
}

async fn fetch_flags(pool: &PgPool, shipment: &Shipment) -> (bool, bool) {
    sqlx::query_as("SELECT send_email, email_sent FROM sales_shipments WHERE id = $1")
        .bind(shipment.id().as_uuid())
        .fetch_one(pool)
        .await
        .expect("出荷の取得に失敗")
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要"]
async fn test_send_emailのみを保存するとemail_sentは変わらない(pool: PgPool) {
    let mut shipment = shipment_for_test();
    insert_shipment(&pool, &shipment).await;
    let sut = PostgresShipmentRepository::new(pool.clone());

    shipment.set_send_email(true);
    shipment.set_email_sent(true);
    sut.save_attributes(&shipment, &[ShipmentAttribute::SendEmail])
        .await
        .unwrap();

    assert_eq!(fetch_flags(&pool, &shipment).await, (true, false));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要"]
async fn test_両属性を一度に保存できる(pool: PgPool) {
    let mut shipment = shipment_for_test();
    insert_shipment(&pool, &shipment).await;
    let sut = PostgresShipmentRepository::new(pool.clone());

    shipment.set_send_email(true);
    shipment.set_email_sent(true);
    sut.save_attributes(
        &shipment,
        &[ShipmentAttribute::SendEmail, ShipmentAttribute::EmailSent],
    )
    .await
    .unwrap();

    assert_eq!(fetch_flags(&pool, &shipment).await, (true, true));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要"]
async fn test_存在しない出荷はnot_foundを返す(pool: PgPool) {
    let sut = PostgresShipmentRepository::new(pool);
    let shipment = shipment_for_test();

    let err = sut
        .save_attributes(&shipment, &[ShipmentAttribute::SendEmail])
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), InfraErrorKind::NotFound { .. }));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要"]
async fn test_空の属性リストはクエリを発行しない(pool: PgPool) {
    let sut = PostgresShipmentRepository::new(pool);
    let shipment = shipment_for_test();

    // 行が存在しなくても空リストならエラーにならない
    let result = sut.save_attributes(&shipment, &[]).await;

    assert!(result.is_ok());
}
