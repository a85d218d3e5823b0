//! # ドメイン層エラー定義
//!
//! ビジネスルール違反を表現するエラー型。
//!
//! ## 使用例
//!
//! ```rust
//! use shipmail_domain::DomainError;
//!
//! fn validate_increment_id(id: &str) -> Result<(), DomainError> {
//!     if id.is_empty() {
//!         return Err(DomainError::Validation("注文番号は必須です".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値がビジネスルールに違反している場合に使用する。
    ///
    /// # 例
    ///
    /// - 注文番号が空
    /// - 顧客メールアドレスの形式が不正
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}
