//! # 送信パイプライン
//!
//! テンプレート変数を受け取り、レンダリング → 送信 → コピー送信を行う。
//!
//! ## 設計方針
//!
//! - **戦略として注入**: 送信判断（[`super::ShipmentSender`]）は [`SendPipeline`] トレイトにのみ依存する
//! - **失敗は bool**: レンダリング・送信の失敗はログに残し、`false` を返す
//! - **コピー送信の失敗は結果に影響しない**: 顧客宛ての送信が成功していれば `true`

use std::sync::Arc;

use async_trait::async_trait;
use shipmail_domain::{
    address::Address,
    notification::EmailMessage,
    order::Order,
    shipment::Shipment,
    store::Store,
};
use shipmail_infra::notification::NotificationSender;
use shipmail_shared::{
    event_log::{error as log_error, event},
    log_business_event,
};

use super::{
    ShipmentIdentity,
    template_renderer::{ShipmentTemplateRenderer, TemplateOptions},
};
use crate::config::{ConfigFlag, GlobalConfig};

/// 出荷メールのテンプレート変数
#[derive(Debug, Clone)]
pub struct ShipmentTemplateVars<'a> {
    pub order:                      &'a Order,
    pub shipment:                   &'a Shipment,
    /// 顧客に通知するコメント（通知しない場合は空文字列）
    pub comment:                    String,
    pub billing:                    &'a Address,
    pub payment_html:               String,
    pub store:                      &'a Store,
    /// 配送先がない場合は空文字列
    pub formatted_shipping_address: String,
    pub formatted_billing_address:  String,
}

/// 1 回の送信に使うテンプレート入れ物
///
/// 送信ごとに作り直し、呼び出し間で共有しない。
#[derive(Debug, Clone, Default)]
pub struct TemplateContainer<'a> {
    vars: Option<ShipmentTemplateVars<'a>>,
}

impl<'a> TemplateContainer<'a> {
    pub fn new() -> Self {
        Self { vars: None }
    }

    /// テンプレート変数を設定する（既存の値は置き換える）
    pub fn set_template_vars(&mut self, vars: ShipmentTemplateVars<'a>) {
        self.vars = Some(vars);
    }

    pub fn template_vars(&self) -> Option<&ShipmentTemplateVars<'a>> {
        self.vars.as_ref()
    }
}

/// 送信パイプライン
#[async_trait]
pub trait SendPipeline: Send + Sync {
    /// 送信可否を確認して送信する
    ///
    /// 顧客宛ての送信に成功した場合のみ `true` を返す。
    async fn check_and_send(&self, order: &Order, template: TemplateContainer<'_>) -> bool;
}

/// テンプレートを使う送信パイプライン
pub struct TemplateSendPipeline {
    config:   Arc<dyn GlobalConfig>,
    identity: ShipmentIdentity,
    renderer: ShipmentTemplateRenderer,
    sender:   Arc<dyn NotificationSender>,
}

impl TemplateSendPipeline {
    pub fn new(
        config: Arc<dyn GlobalConfig>,
        identity: ShipmentIdentity,
        renderer: ShipmentTemplateRenderer,
        sender: Arc<dyn NotificationSender>,
    ) -> Self {
        Self {
            config,
            identity,
            renderer,
            sender,
        }
    }

    /// 顧客名（ゲストは請求先の氏名）
    fn customer_name(order: &Order) -> String {
        if order.customer_is_guest() {
            order.billing_address().name()
        } else {
            order.customer_name()
        }
    }

    /// コピー先ごとに別メールを送る
    async fn send_copies(&self, email: &EmailMessage, order: &Order) {
        for copy_to in self.identity.separate_copy_recipients() {
            let copy = email.redirected_to(copy_to.as_str());
            match self.sender.send_email(&copy).await {
                Ok(()) => log_business_event!(
                    event.category = event::category::SHIPMENT_EMAIL,
                    event.action = event::action::SHIPMENT_EMAIL_COPY_SENT,
                    event.entity_type = event::entity_type::ORDER,
                    event.entity_id = %order.id(),
                    event.result = event::result::SUCCESS,
                    notification.recipient = %copy_to,
                    "出荷メールのコピーを送信"
                ),
                Err(e) => tracing::warn!(
                    error.category = log_error::category::EXTERNAL_SERVICE,
                    error.kind = log_error::kind::MAIL_TRANSPORT,
                    order_id = %order.id(),
                    notification.recipient = %copy_to,
                    error = %e,
                    "出荷メールのコピー送信に失敗"
                ),
            }
        }
    }
}

#[async_trait]
impl SendPipeline for TemplateSendPipeline {
    async fn check_and_send(&self, order: &Order, template: TemplateContainer<'_>) -> bool {
        if !self.config.is_enabled(ConfigFlag::ShipmentEmailEnabled) {
            tracing::debug!(order_id = %order.id(), "出荷メールは無効化されている");
            return false;
        }

        let Some(vars) = template.template_vars() else {
            tracing::error!(order_id = %order.id(), "テンプレート変数が設定されていない");
            return false;
        };

        let customer_name = Self::customer_name(order);
        let options = TemplateOptions {
            template_id:   self.identity.template_id_for(order),
            customer_name: &customer_name,
            sender_name:   &self.identity.sender_name,
        };

        let rendered = match self.renderer.render(vars, &options) {
            Ok(rendered) => rendered,
            Err(e) => {
                tracing::error!(
                    error.category = log_error::category::INFRASTRUCTURE,
                    error.kind = log_error::kind::TEMPLATE,
                    order_id = %order.id(),
                    template_id = options.template_id,
                    error = %e,
                    "出荷メールのレンダリングに失敗"
                );
                return false;
            }
        };

        let email = EmailMessage {
            to:        order.customer_email().to_string(),
            bcc:       self.identity.bcc_recipients().to_vec(),
            subject:   rendered.subject,
            html_body: rendered.html_body,
            text_body: rendered.text_body,
        };

        if let Err(e) = self.sender.send_email(&email).await {
            log_business_event!(
                event.category = event::category::SHIPMENT_EMAIL,
                event.action = event::action::SHIPMENT_EMAIL_FAILED,
                event.entity_type = event::entity_type::SHIPMENT,
                event.entity_id = %vars.shipment.id(),
                event.result = event::result::FAILURE,
                notification.recipient = %email.to,
                error = %e,
                "出荷メール送信失敗"
            );
            return false;
        }

        log_business_event!(
            event.category = event::category::SHIPMENT_EMAIL,
            event.action = event::action::SHIPMENT_EMAIL_SENT,
            event.entity_type = event::entity_type::SHIPMENT,
            event.entity_id = %vars.shipment.id(),
            event.result = event::result::SUCCESS,
            notification.recipient = %email.to,
            notification.bcc_count = email.bcc.len(),
            "出荷メール送信成功"
        );

        self.send_copies(&email, order).await;
        true
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use shipmail_domain::notification::CopyMethod;
    use shipmail_infra::mock::MockNotificationSender;

    use super::*;
    use crate::{
        config::SalesEmailConfig,
        test_utils::ShipmentTestBuilder,
        usecase::shipment_email::DefaultAddressRenderer,
    };

    fn make_config(enabled: bool, copy_method: CopyMethod) -> SalesEmailConfig {
        SalesEmailConfig {
            async_sending: false,
            shipment:      ShipmentIdentity {
                enabled,
                template_id: "shipment_new".to_string(),
                guest_template_id: "shipment_new_guest".to_string(),
                copy_to: vec!["ops@example.com".to_string()],
                copy_method,
                sender_name: "Shipmail Store".to_string(),
            },
        }
    }

    fn make_pipeline(config: SalesEmailConfig, sender: MockNotificationSender) -> TemplateSendPipeline {
        let identity = config.shipment.clone();
        TemplateSendPipeline::new(
            Arc::new(config),
            identity,
            ShipmentTemplateRenderer::new(Arc::new(DefaultAddressRenderer)).unwrap(),
            Arc::new(sender),
        )
    }

    fn make_container(shipment: &Shipment) -> TemplateContainer<'_> {
        let order = shipment.order();
        let mut container = TemplateContainer::new();
        container.set_template_vars(ShipmentTemplateVars {
            order,
            shipment,
            comment: String::new(),
            billing: order.billing_address(),
            payment_html: "<p>Check / Money order</p>".to_string(),
            store: order.store(),
            formatted_shipping_address: String::new(),
            formatted_billing_address: "Taro Yamada".to_string(),
        });
        container
    }

    #[tokio::test]
    async fn 送信成功時に顧客宛てにbcc付きで送信しtrueを返す() {
        let sender = MockNotificationSender::new();
        let pipeline = make_pipeline(make_config(true, CopyMethod::Bcc), sender.clone());
        let shipment = ShipmentTestBuilder::new().build();

        let sent = pipeline
            .check_and_send(shipment.order(), make_container(&shipment))
            .await;

        assert!(sent);
        let emails = sender.sent_emails();
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].to, "taro@example.com");
        assert_eq!(emails[0].bcc, vec!["ops@example.com".to_string()]);
    }

    #[tokio::test]
    async fn copy方式ではコピー先ごとに別メールを送る() {
        let sender = MockNotificationSender::new();
        let pipeline = make_pipeline(make_config(true, CopyMethod::Copy), sender.clone());
        let shipment = ShipmentTestBuilder::new().build();

        let sent = pipeline
            .check_and_send(shipment.order(), make_container(&shipment))
            .await;

        assert!(sent);
        let recipients: Vec<String> = sender.sent_emails().into_iter().map(|e| e.to).collect();
        assert_eq!(
            recipients,
            vec!["taro@example.com".to_string(), "ops@example.com".to_string()]
        );
        assert!(sender.sent_emails()[0].bcc.is_empty());
    }

    #[tokio::test]
    async fn コピー送信の失敗は結果に影響しない() {
        let sender = MockNotificationSender::failing_for("ops@example.com");
        let pipeline = make_pipeline(make_config(true, CopyMethod::Copy), sender.clone());
        let shipment = ShipmentTestBuilder::new().build();

        let sent = pipeline
            .check_and_send(shipment.order(), make_container(&shipment))
            .await;

        assert!(sent);
        assert_eq!(sender.sent_emails().len(), 1);
    }

    #[tokio::test]
    async fn 無効化されている場合は送信せずfalseを返す() {
        let sender = MockNotificationSender::new();
        let pipeline = make_pipeline(make_config(false, CopyMethod::Bcc), sender.clone());
        let shipment = ShipmentTestBuilder::new().build();

        let sent = pipeline
            .check_and_send(shipment.order(), make_container(&shipment))
            .await;

        assert!(!sent);
        assert!(sender.sent_emails().is_empty());
    }

    #[tokio::test]
    async fn 送信失敗時はfalseを返す() {
        let sender = MockNotificationSender::failing();
        let pipeline = make_pipeline(make_config(true, CopyMethod::Copy), sender.clone());
        let shipment = ShipmentTestBuilder::new().build();

        let sent = pipeline
            .check_and_send(shipment.order(), make_container(&shipment))
            .await;

        assert!(!sent);
    }

    #[tokio::test]
    async fn テンプレート変数がない場合はfalseを返す() {
        let sender = MockNotificationSender::new();
        let pipeline = make_pipeline(make_config(true, CopyMethod::Bcc), sender.clone());
        let shipment = ShipmentTestBuilder::new().build();

        let sent = pipeline
            .check_and_send(shipment.order(), TemplateContainer::new())
            .await;

        assert!(!sent);
        assert!(sender.sent_emails().is_empty());
    }

    #[tokio::test]
    async fn 存在しないテンプレートidではfalseを返す() {
        let sender = MockNotificationSender::new();
        let mut config = make_config(true, CopyMethod::Bcc);
        config.shipment.template_id = "missing".to_string();
        let pipeline = make_pipeline(config, sender.clone());
        let shipment = ShipmentTestBuilder::new().build();

        let sent = pipeline
            .check_and_send(shipment.order(), make_container(&shipment))
            .await;

        assert!(!sent);
        assert!(sender.sent_emails().is_empty());
    }

    #[tokio::test]
    async fn ゲスト注文は請求先氏名とゲスト用テンプレートを使う() {
        let sender = MockNotificationSender::new();
        let pipeline = make_pipeline(make_config(true, CopyMethod::Bcc), sender.clone());
        let shipment = ShipmentTestBuilder::new()
            .guest("Hanako", "Suzuki", "hanako@example.com")
            .build();

        let sent = pipeline
            .check_and_send(shipment.order(), make_container(&shipment))
            .await;

        assert!(sent);
        let emails = sender.sent_emails();
        assert_eq!(emails[0].to, "hanako@example.com");
        assert!(emails[0].html_body.contains("Hanako Suzuki 様"));
        assert!(emails[0].html_body.contains("ゲスト購入"));
    }
}
