//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! shipmail-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shipmail_domain::{
    notification::{EmailMessage, NotificationError},
    shipment::{Shipment, ShipmentAttribute, ShipmentId},
};

use crate::{error::InfraError, notification::NotificationSender, repository::ShipmentRepository};

// ===== MockShipmentRepository =====

/// `save_attributes` の呼び出し記録
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedAttributes {
    pub shipment_id: ShipmentId,
    /// 保存された属性と、その時点の値
    pub values:      Vec<(ShipmentAttribute, bool)>,
}

impl SavedAttributes {
    /// 保存された属性名の一覧
    pub fn attributes(&self) -> Vec<ShipmentAttribute> {
        self.values.iter().map(|(attribute, _)| *attribute).collect()
    }
}

#[derive(Clone, Default)]
pub struct MockShipmentRepository {
    saves:   Arc<Mutex<Vec<SavedAttributes>>>,
    failing: bool,
}

impl MockShipmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に失敗するリポジトリ
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// これまでの保存呼び出し
    pub fn saves(&self) -> Vec<SavedAttributes> {
        self.saves.lock().unwrap().clone()
    }
}

#[async_trait]
impl ShipmentRepository for MockShipmentRepository {
    async fn save_attributes(
        &self,
        shipment: &Shipment,
        attributes: &[ShipmentAttribute],
    ) -> Result<(), InfraError> {
        self.saves.lock().unwrap().push(SavedAttributes {
            shipment_id: shipment.id().clone(),
            values:      attributes
                .iter()
                .map(|attribute| (*attribute, shipment.attribute_value(*attribute)))
                .collect(),
        });
        if self.failing {
            return Err(InfraError::unexpected("mock repository failure"));
        }
        Ok(())
    }
}

// ===== MockNotificationSender =====

#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent_emails: Arc<Mutex<Vec<EmailMessage>>>,
    failing:     bool,
    failing_for: Option<String>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に送信に失敗する送信者
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// 指定した宛先への送信だけ失敗する送信者
    pub fn failing_for(address: impl Into<String>) -> Self {
        Self {
            failing_for: Some(address.into()),
            ..Self::default()
        }
    }

    /// 送信に成功したメール
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent_emails.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        if self.failing || self.failing_for.as_deref() == Some(email.to.as_str()) {
            return Err(NotificationError::SendFailed(format!(
                "mock sender failure: {}",
                email.to
            )));
        }
        self.sent_emails.lock().unwrap().push(email.clone());
        Ok(())
    }
}
