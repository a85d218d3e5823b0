//! # 支払い
//!
//! 注文に紐づく支払い情報。支払い方法ごとの表示ブロックの生成は
//! 支払い情報レンダラー（core-service）が担当する。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 注文の支払い情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// 支払い方法コード（例: `checkmo`, `banktransfer`）
    pub method:                 String,
    /// 顧客向けの支払い方法名
    pub method_title:           String,
    /// 支払い方法固有の追加情報（振込先など）
    #[serde(default)]
    pub additional_information: BTreeMap<String, String>,
}
