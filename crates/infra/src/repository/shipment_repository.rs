//! # ShipmentRepository
//!
//! 出荷の送信フラグを永続化するリポジトリ。
//!
//! ## 設計方針
//!
//! - **部分更新**: 指定された属性のカラムだけを 1 回の `UPDATE` で書き込む
//! - **空リストは no-op**: 属性が 1 つもない場合はクエリを発行しない

use async_trait::async_trait;
use shipmail_domain::shipment::{Shipment, ShipmentAttribute};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::error::InfraError;

/// 出荷リポジトリトレイト
#[async_trait]
pub trait ShipmentRepository: Send + Sync {
    /// 出荷の指定属性を現在値で保存する
    ///
    /// 出荷が存在しない場合は `NotFound` を返す。
    async fn save_attributes(
        &self,
        shipment: &Shipment,
        attributes: &[ShipmentAttribute],
    ) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の ShipmentRepository
#[derive(Debug, Clone)]
pub struct PostgresShipmentRepository {
    pool: PgPool,
}

impl PostgresShipmentRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// 重複を除いた属性リストを返す（指定順を維持）
fn unique_attributes(attributes: &[ShipmentAttribute]) -> Vec<ShipmentAttribute> {
    let mut unique = Vec::with_capacity(attributes.len());
    for attribute in attributes {
        if !unique.contains(attribute) {
            unique.push(*attribute);
        }
    }
    unique
}

/// 属性更新用の `UPDATE` 文を組み立てる
fn build_update_query<'a>(
    shipment: &'a Shipment,
    attributes: &[ShipmentAttribute],
) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE sales_shipments SET ");
    {
        let mut assignments = builder.separated(", ");
        for attribute in attributes {
            let column: &'static str = (*attribute).into();
            assignments
                .push(column)
                .push_unseparated(" = ")
                .push_bind_unseparated(shipment.attribute_value(*attribute));
        }
    }
    builder
        .push(", updated_at = now() WHERE id = ")
        .push_bind(*shipment.id().as_uuid());
    builder
}

#[async_trait]
impl ShipmentRepository for PostgresShipmentRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(shipment_id = %shipment.id()))]
    async fn save_attributes(
        &self,
        shipment: &Shipment,
        attributes: &[ShipmentAttribute],
    ) -> Result<(), InfraError> {
        let attributes = unique_attributes(attributes);
        if attributes.is_empty() {
            return Ok(());
        }

        let result = build_update_query(shipment, &attributes)
            .build()
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(InfraError::not_found(
                "Shipment",
                shipment.id().as_uuid().to_string(),
            ));
        }

        Ok(())
    }
}
