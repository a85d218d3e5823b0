//! # Core Service 設定
//!
//! 環境変数から Core Service サーバーの設定を読み込む。
//!
//! 設定値は起動時に一度だけ解決し、以降は型付きの構造体として扱う。
//! 出荷メールの送信判断は [`GlobalConfig`] トレイト経由でフラグを参照する。

use std::{env, str::FromStr};

use shipmail_domain::notification::CopyMethod;
use thiserror::Error;

use crate::usecase::shipment_email::ShipmentIdentity;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("{0} が設定されていません（.env を確認してください）")]
    Missing(&'static str),

    /// 値の形式が不正
    #[error("{key} の値が不正です: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Core Service サーバーの設定
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// データベース接続 URL
    pub database_url: String,
    /// 販売メール設定
    pub sales_email: SalesEmailConfig,
    /// 通知設定
    pub notification: NotificationConfig,
}

/// 販売メール（出荷通知）の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesEmailConfig {
    /// 非同期送信モード（true の場合、通常の送信は後続ジョブに委ねる）
    pub async_sending: bool,
    /// 出荷メールの送信元設定
    pub shipment:      ShipmentIdentity,
}

/// 通知機能の設定
///
/// `NOTIFICATION_BACKEND` 環境変数で送信バックエンドを切り替える:
/// - `smtp`: Mailpit（開発）/ SMTP サーバー経由で送信
/// - `ses`: Amazon SES v2 経由で送信（本番）
/// - `noop`: 送信しない（ログ出力のみ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    /// 送信バックエンド
    pub backend:      NotificationBackend,
    /// SMTP ホスト（backend=smtp の場合に使用）
    pub smtp_host:    String,
    /// SMTP ポート（backend=smtp の場合に使用）
    pub smtp_port:    u16,
    /// 送信元メールアドレス
    pub from_address: String,
}

/// メール送信バックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum NotificationBackend {
    Smtp,
    Ses,
    Noop,
}

/// 送信判断に使う設定フラグ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFlag {
    /// `sales_email/general/async_sending`
    AsyncSending,
    /// `sales_email/shipment/enabled`
    ShipmentEmailEnabled,
}

/// グローバル設定の読み取り
///
/// 送信処理は呼び出しのたびにこのトレイトからフラグを読む。
pub trait GlobalConfig: Send + Sync {
    /// フラグが有効かどうか
    fn is_enabled(&self, flag: ConfigFlag) -> bool;
}

impl GlobalConfig for SalesEmailConfig {
    fn is_enabled(&self, flag: ConfigFlag) -> bool {
        match flag {
            ConfigFlag::AsyncSending => self.async_sending,
            ConfigFlag::ShipmentEmailEnabled => self.shipment.enabled,
        }
    }
}

impl CoreConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            host:         lookup("CORE_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port:         parse_value("CORE_PORT", &required(&lookup, "CORE_PORT")?)?,
            database_url: required(&lookup, "DATABASE_URL")?,
            sales_email:  SalesEmailConfig::from_lookup(&lookup)?,
            notification: NotificationConfig::from_lookup(&lookup)?,
        })
    }
}

impl SalesEmailConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            async_sending: parse_flag(lookup, "SALES_EMAIL_ASYNC_SENDING", false)?,
            shipment:      ShipmentIdentity {
                enabled:           parse_flag(lookup, "SALES_EMAIL_SHIPMENT_ENABLED", true)?,
                template_id:       lookup("SALES_EMAIL_SHIPMENT_TEMPLATE")
                    .unwrap_or_else(|| "shipment_new".to_string()),
                guest_template_id: lookup("SALES_EMAIL_SHIPMENT_GUEST_TEMPLATE")
                    .unwrap_or_else(|| "shipment_new_guest".to_string()),
                copy_to:           lookup("SALES_EMAIL_SHIPMENT_COPY_TO")
                    .map(|value| parse_list(&value))
                    .unwrap_or_default(),
                copy_method:       optional(lookup, "SALES_EMAIL_SHIPMENT_COPY_METHOD")?
                    .unwrap_or(CopyMethod::Bcc),
                sender_name:       lookup("SALES_EMAIL_SENDER_NAME")
                    .unwrap_or_else(|| "Shipmail Store".to_string()),
            },
        })
    }
}

impl NotificationConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            backend:      optional(lookup, "NOTIFICATION_BACKEND")?
                .unwrap_or(NotificationBackend::Noop),
            smtp_host:    lookup("SMTP_HOST").unwrap_or_else(|| "localhost".to_string()),
            smtp_port:    optional(lookup, "SMTP_PORT")?.unwrap_or(1025),
            from_address: lookup("NOTIFICATION_FROM_ADDRESS")
                .unwrap_or_else(|| "noreply@shipmail.example.com".to_string()),
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    lookup(key).ok_or(ConfigError::Missing(key))
}

fn optional<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    lookup(key).map(|value| parse_value(key, &value)).transpose()
}

fn parse_value<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

/// `true`/`false`/`1`/`0`/`yes`/`no` を受け付ける
fn parse_flag(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    let Some(value) = lookup(key) else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value }),
    }
}

/// カンマ区切りリスト（空要素は除外）
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
