//! # ユースケース層
//!
//! Core Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: 協調オブジェクトを `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約
//!
//! ## モジュール構成
//!
//! - `shipment_email`: 出荷通知メールの送信判断と送信パイプライン

pub mod shipment_email;

pub use shipment_email::ShipmentSender;
