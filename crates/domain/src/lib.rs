//! # Shipmail ドメイン層
//!
//! 出荷通知メールの送信判断に必要なドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（[`shipment::Shipment`], [`order::Order`]）
//! - **値オブジェクト**: 識別子を持たない不変オブジェクト（[`address::Address`], [`payment::Payment`]）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! core-service → infra → domain
//!          ↘       ↓
//!            shared
//! ```
//!
//! ドメイン層はインフラ層（DB、メール送信）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`address`] - 住所と表示形式
//! - [`order`] - 注文（出荷メールから見て読み取り専用）
//! - [`shipment`] - 出荷と送信フラグ
//! - [`notification`] - メールメッセージと送信エラー
//!
//! ## 使用例
//!
//! ```rust
//! use shipmail_domain::shipment::ShipmentAttribute;
//!
//! let column: &str = ShipmentAttribute::EmailSent.into();
//! assert_eq!(column, "email_sent");
//! ```

#[macro_use]
mod macros;

pub mod address;
pub mod error;
pub mod notification;
pub mod order;
pub mod payment;
pub mod shipment;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use error::DomainError;
