//! # 住所
//!
//! 注文の請求先・配送先住所を表す値オブジェクト。
//! 表示用文字列への変換はアドレスレンダラー（core-service）が担当し、
//! このモジュールは形式の種別と氏名の組み立てのみを提供する。

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// 住所の出力形式
///
/// アドレスレンダラーに渡す出力種別。snake_case で文字列化される。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AddressFormat {
    /// HTML（改行を `<br />` で表現）
    Html,
    /// プレーンテキスト（改行区切り）
    Text,
    /// 1 行（カンマ区切り）
    Oneline,
}

/// 住所
///
/// 出荷メール送信の過程では変更されない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub firstname:  String,
    pub lastname:   String,
    #[serde(default)]
    pub company:    Option<String>,
    /// 番地（複数行）
    pub street:     Vec<String>,
    pub city:       String,
    #[serde(default)]
    pub region:     Option<String>,
    pub postcode:   String,
    /// ISO 3166-1 alpha-2
    pub country_id: String,
    #[serde(default)]
    pub telephone:  Option<String>,
}

impl Address {
    /// 氏名（名 + 姓）を返す
    ///
    /// どちらかが空の場合は空白を詰める。
    pub fn name(&self) -> String {
        [self.firstname.trim(), self.lastname.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
