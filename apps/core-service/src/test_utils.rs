//! テストユーティリティ
//!
//! 単体テストと統合テストで共有するフィクスチャビルダー。

mod shipment_test_builder;

pub use shipment_test_builder::ShipmentTestBuilder;
