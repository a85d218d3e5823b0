//! # ビジネスイベントログの構造化ヘルパー
//!
//! 出荷メール送信の結果を `jq` で追跡できるよう、ログフィールドの命名規約と
//! ヘルパーマクロを提供する。
//!
//! ## ビジネスイベント
//!
//! [`log_business_event!`] マクロで出力する。`event.kind = "business_event"` マーカーが
//! 自動付与され、`jq 'select(.["event.kind"] == "business_event")'` でフィルタできる。
//!
//! ## フィールド命名規約
//!
//! ドット記法（`event.category`、`event.action`）を使用する。tracing の
//! `$($field:ident).+` パターンでサポートされ、JSON 出力でフラットなキーになる。

/// ビジネスイベントを構造化ログとして出力する。
///
/// `event.kind = "business_event"` マーカーを自動付与し、
/// `tracing::info!` レベルで出力する。
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: イベントカテゴリ（[`event::category`] の定数を使用）
/// - `event.action`: アクション名（[`event::action`] の定数を使用）
/// - `event.result`: 結果（[`event::result`] の定数を使用）
///
/// ## 推奨フィールド
///
/// - `event.entity_type`: エンティティ種別（[`event::entity_type`] の定数を使用）
/// - `event.entity_id`: エンティティ ID
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const SHIPMENT_EMAIL: &str = "shipment_email";
    }

    /// イベントアクション
    pub mod action {
        /// 同期送信に成功し、送信済みフラグを記録した
        pub const SHIPMENT_EMAIL_SENT: &str = "shipment_email.sent";
        /// 送信パイプラインが失敗を返した
        pub const SHIPMENT_EMAIL_FAILED: &str = "shipment_email.failed";
        /// 非同期送信モードのため送信を後続ジョブに委ねた
        pub const SHIPMENT_EMAIL_DEFERRED: &str = "shipment_email.deferred";
        /// コピー送信（copy_method = copy）
        pub const SHIPMENT_EMAIL_COPY_SENT: &str = "shipment_email.copy_sent";
    }

    /// エンティティ種別
    pub mod entity_type {
        pub const SHIPMENT: &str = "shipment";
        pub const ORDER: &str = "order";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
        pub const DEFERRED: &str = "deferred";
    }
}

/// エラーコンテキストフィールドの定数
///
/// `tracing::error!` に `error.category` + `error.kind` として直接付与する。
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        /// インフラストラクチャ（DB）
        pub const INFRASTRUCTURE: &str = "infrastructure";
        /// 外部サービス呼び出し（SMTP、SES）
        pub const EXTERNAL_SERVICE: &str = "external_service";
    }

    /// エラー種別
    pub mod kind {
        pub const DATABASE: &str = "database";
        pub const TEMPLATE: &str = "template";
        pub const MAIL_TRANSPORT: &str = "mail_transport";
    }
}
