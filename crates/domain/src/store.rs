//! # ストア
//!
//! 注文を受け付けたストア（ストアフロント）を表す。

use serde::{Deserialize, Serialize};

define_uuid_id! {
    /// ストア ID
    pub struct StoreId;
}

/// ストア
///
/// メールテンプレートではストア名を件名・本文に使用する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id:   StoreId,
    /// ストアコード（例: `default`）
    pub code: String,
    /// 顧客向けの表示名
    pub name: String,
}
