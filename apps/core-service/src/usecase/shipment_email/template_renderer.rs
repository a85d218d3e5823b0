//! # 出荷メールのテンプレートレンダラー
//!
//! tera テンプレートエンジンで出荷通知メールを HTML/plaintext 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **テンプレート ID**: `{template_id}.html` / `{template_id}.txt` の組で登録する
//! - **件名パターン**: `{ストア名}: ご注文 #{注文番号} の出荷のお知らせ`
//! - **HTML 断片**: 整形済み住所と支払い情報は `safe` フィルタでそのまま埋め込む
//! - **テキスト本文の住所**: [`AddressRenderer`] でテキスト形式に整形する

use std::sync::Arc;

use shipmail_domain::{address::AddressFormat, notification::NotificationError};
use tera::{Context, Tera};

use super::{AddressRenderer, pipeline::ShipmentTemplateVars};

/// レンダリング済みのメール内容（宛先は含まない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject:   String,
    pub html_body: String,
    pub text_body: String,
}

/// テンプレートに渡す送信者・宛先情報
#[derive(Debug, Clone)]
pub struct TemplateOptions<'a> {
    pub template_id:   &'a str,
    pub customer_name: &'a str,
    pub sender_name:   &'a str,
}

/// 出荷メールのテンプレートレンダラー
pub struct ShipmentTemplateRenderer {
    engine:           Tera,
    address_renderer: Arc<dyn AddressRenderer>,
}

impl ShipmentTemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `include_str!` で埋め込んだテンプレートを tera に登録する。
    pub fn new(address_renderer: Arc<dyn AddressRenderer>) -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    "shipment_new.html",
                    include_str!("../../../templates/shipment_email/shipment_new.html"),
                ),
                (
                    "shipment_new.txt",
                    include_str!("../../../templates/shipment_email/shipment_new.txt"),
                ),
                (
                    "shipment_new_guest.html",
                    include_str!("../../../templates/shipment_email/shipment_new_guest.html"),
                ),
                (
                    "shipment_new_guest.txt",
                    include_str!("../../../templates/shipment_email/shipment_new_guest.txt"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self {
            engine,
            address_renderer,
        })
    }

    /// テンプレート変数からメール内容を生成する
    pub fn render(
        &self,
        vars: &ShipmentTemplateVars<'_>,
        options: &TemplateOptions<'_>,
    ) -> Result<RenderedEmail, NotificationError> {
        let store_name = if vars.store.name.trim().is_empty() {
            options.sender_name
        } else {
            vars.store.name.as_str()
        };
        let context = self.build_context(vars, options, store_name);

        let html_body = self
            .engine
            .render(&format!("{}.html", options.template_id), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let text_body = self
            .engine
            .render(&format!("{}.txt", options.template_id), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(RenderedEmail {
            subject: format!(
                "{store_name}: ご注文 #{} の出荷のお知らせ",
                vars.order.increment_id()
            ),
            html_body,
            text_body,
        })
    }

    fn build_context(
        &self,
        vars: &ShipmentTemplateVars<'_>,
        options: &TemplateOptions<'_>,
        store_name: &str,
    ) -> Context {
        let mut context = Context::new();
        context.insert("order", vars.order);
        context.insert("shipment", vars.shipment);
        context.insert("store", vars.store);
        context.insert("billing", vars.billing);
        context.insert("store_name", store_name);
        context.insert("order_increment_id", vars.order.increment_id());
        context.insert("shipment_increment_id", vars.shipment.increment_id());
        context.insert("tracks", vars.shipment.tracks());
        context.insert("comment", &vars.comment);
        context.insert("payment_html", &vars.payment_html);
        context.insert("formatted_billing_address", &vars.formatted_billing_address);
        context.insert(
            "formatted_shipping_address",
            &vars.formatted_shipping_address,
        );
        context.insert(
            "billing_address_text",
            &self.address_renderer.format(vars.billing, AddressFormat::Text),
        );
        context.insert(
            "shipping_address_text",
            &vars
                .order
                .shipping_address()
                .map(|address| self.address_renderer.format(address, AddressFormat::Text))
                .unwrap_or_default(),
        );
        context.insert("customer_name", options.customer_name);
        context.insert("sender_name", options.sender_name);
        context
    }
}
