//! # 出荷メール送信の判断
//!
//! 出荷メールを今すぐ送るか、非同期送信ジョブに委ねるかを決め、
//! 送信フラグを永続化する。
//!
//! ## 処理の流れ
//!
//! 1. `send_email = true` を設定（結果に関わらず最初に行う）
//! 2. `async_sending` 設定と `force_sync` から即時送信するかを決める
//! 3. 即時送信する場合はテンプレート変数を組み立てて [`SendPipeline`] に渡す
//! 4. 成功時は `send_email` と `email_sent` を、それ以外は `send_email` のみを保存する
//!
//! 永続化は 1 回の呼び出しにつき必ず 1 回だけ行う。

use std::sync::Arc;

use shipmail_domain::{
    address::AddressFormat,
    shipment::{Shipment, ShipmentAttribute},
};
use shipmail_infra::{InfraError, repository::ShipmentRepository};
use shipmail_shared::{event_log::event, log_business_event};

use super::{
    AddressRenderer,
    PaymentInfoRenderer,
    pipeline::{SendPipeline, ShipmentTemplateVars, TemplateContainer},
};
use crate::config::{ConfigFlag, GlobalConfig};

/// 出荷メール送信者
///
/// 協調オブジェクトはすべて `Arc<dyn Trait>` で注入する。
/// 呼び出し間で可変状態を共有しない。
pub struct ShipmentSender {
    config:           Arc<dyn GlobalConfig>,
    address_renderer: Arc<dyn AddressRenderer>,
    payment_renderer: Arc<dyn PaymentInfoRenderer>,
    pipeline:         Arc<dyn SendPipeline>,
    repository:       Arc<dyn ShipmentRepository>,
}

impl ShipmentSender {
    pub fn new(
        config: Arc<dyn GlobalConfig>,
        address_renderer: Arc<dyn AddressRenderer>,
        payment_renderer: Arc<dyn PaymentInfoRenderer>,
        pipeline: Arc<dyn SendPipeline>,
        repository: Arc<dyn ShipmentRepository>,
    ) -> Self {
        Self {
            config,
            address_renderer,
            payment_renderer,
            pipeline,
            repository,
        }
    }

    /// 出荷メールを送信する
    ///
    /// 同期送信に成功した場合のみ `Ok(true)` を返す。
    /// 非同期送信モードで `force_sync = false` の場合は送信せず `Ok(false)` を返す。
    /// `Err` はフラグの永続化に失敗した場合のみ。
    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(shipment_id = %shipment.id(), force_sync = force_sync)
    )]
    pub async fn send(&self, shipment: &mut Shipment, force_sync: bool) -> Result<bool, InfraError> {
        shipment.set_send_email(true);

        let send_now = !self.config.is_enabled(ConfigFlag::AsyncSending) || force_sync;
        if !send_now {
            log_business_event!(
                event.category = event::category::SHIPMENT_EMAIL,
                event.action = event::action::SHIPMENT_EMAIL_DEFERRED,
                event.entity_type = event::entity_type::SHIPMENT,
                event.entity_id = %shipment.id(),
                event.result = event::result::DEFERRED,
                "出荷メールを非同期送信に委ねた"
            );
        } else if self.dispatch(shipment).await {
            shipment.set_email_sent(true);
            self.repository
                .save_attributes(
                    shipment,
                    &[ShipmentAttribute::SendEmail, ShipmentAttribute::EmailSent],
                )
                .await?;
            return Ok(true);
        }

        self.repository
            .save_attributes(shipment, &[ShipmentAttribute::SendEmail])
            .await?;
        Ok(false)
    }

    /// テンプレート変数を組み立てて送信パイプラインに渡す
    async fn dispatch(&self, shipment: &Shipment) -> bool {
        let order = shipment.order();

        let formatted_shipping_address = order
            .shipping_address()
            .map(|address| self.address_renderer.format(address, AddressFormat::Html))
            .unwrap_or_default();
        let formatted_billing_address = self
            .address_renderer
            .format(order.billing_address(), AddressFormat::Html);
        let payment_html = self
            .payment_renderer
            .info_block_html(order.payment(), &order.store().id);

        let mut template = TemplateContainer::new();
        template.set_template_vars(ShipmentTemplateVars {
            order,
            shipment,
            comment: shipment.customer_comment().to_string(),
            billing: order.billing_address(),
            payment_html,
            store: order.store(),
            formatted_shipping_address,
            formatted_billing_address,
        });

        self.pipeline.check_and_send(order, template).await
    }
}
