//! # Shipmail 共有ユーティリティ
//!
//! Shipmail の各クレートから使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - domain / infra / core-service のすべてから依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - 外部クレートへの依存は feature で必要な分だけ有効化する

pub mod api_response;
pub mod error_response;
pub mod event_log;
pub mod health;
pub mod observability;

pub use api_response::ApiResponse;
pub use error_response::ErrorResponse;
pub use health::HealthResponse;
