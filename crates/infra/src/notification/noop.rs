//! Noop 通知送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! 通知を無効化した環境やローカル開発で使用する。

use async_trait::async_trait;
use shipmail_domain::notification::{EmailMessage, NotificationError};

use super::NotificationSender;

/// Noop 通知送信（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopNotificationSender;

#[async_trait]
impl NotificationSender for NoopNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        tracing::info!(
            to = %email.to,
            bcc_count = email.bcc.len(),
            subject = %email.subject,
            "Noop: メール送信をスキップ"
        );
        Ok(())
    }
}
