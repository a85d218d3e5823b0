//! # 通知
//!
//! メール通知に関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 |
//! |---|------------|
//! | [`EmailMessage`] | 送信するメール 1 通 |
//! | [`CopyMethod`] | 店舗宛てコピーの送り方 |
//! | [`NotificationError`] | レンダリング・送信の失敗 |
//!
//! ## 設計方針
//!
//! - **失敗は値として扱う**: 送信失敗は出荷処理を止めない。呼び出し側で bool に畳み込む
//! - **テンプレート分離**: メール生成（TemplateRenderer）は core-service、送信は infra

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use thiserror::Error;

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),
}

/// 店舗宛てコピーの送信方法
///
/// - `bcc`: 顧客宛てメールの Bcc に追加する
/// - `copy`: コピー先ごとに別メールとして送信する
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CopyMethod {
    #[default]
    Bcc,
    Copy,
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。NotificationSender に渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// Bcc 宛先
    pub bcc:       Vec<String>,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
    /// プレーンテキスト本文
    pub text_body: String,
}

impl EmailMessage {
    /// 宛先だけを差し替えた複製を作る（Bcc は引き継がない）
    pub fn redirected_to(&self, to: impl Into<String>) -> Self {
        Self {
            to:        to.into(),
            bcc:       Vec::new(),
            subject:   self.subject.clone(),
            html_body: self.html_body.clone(),
            text_body: self.text_body.clone(),
        }
    }
}
