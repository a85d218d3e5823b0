//! # Core Service ライブラリ
//!
//! Core Service の設定・ユースケース・ハンドラを公開する。
//! バイナリ（`main.rs`）と統合テストの両方から使用される。

pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;

// テストユーティリティ（内部実装、ドキュメントからは隠す）
#[cfg(any(test, feature = "test-utils"))]
#[doc(hidden)]
pub mod test_utils;
