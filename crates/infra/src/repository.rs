//! # リポジトリ実装
//!
//! 出荷通知に必要な永続化操作の具体的な実装を提供する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: ユースケース層はトレイトにのみ依存し、インフラ層が実装する
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod shipment_repository;

pub use shipment_repository::{PostgresShipmentRepository, ShipmentRepository};
