//! # 支払い情報レンダラー
//!
//! 注文の支払い方法をメール本文に埋め込む HTML ブロックに変換する。

use shipmail_domain::{payment::Payment, store::StoreId};

/// 支払い情報ブロックの HTML 生成
pub trait PaymentInfoRenderer: Send + Sync {
    /// 支払い情報の HTML ブロックを返す
    ///
    /// `store_id` はストアごとに表示を切り替える実装のために渡される。
    fn info_block_html(&self, payment: &Payment, store_id: &StoreId) -> String;
}

/// 既定の支払い情報レンダラー
///
/// 支払い方法名と、追加情報があれば定義リストを出力する。
#[derive(Debug, Clone, Default)]
pub struct DefaultPaymentInfoRenderer;

impl PaymentInfoRenderer for DefaultPaymentInfoRenderer {
    fn info_block_html(&self, payment: &Payment, _store_id: &StoreId) -> String {
        let mut html = format!(
            "<p class=\"payment-method\">{}</p>",
            tera::escape_html(&payment.method_title)
        );

        if !payment.additional_information.is_empty() {
            html.push_str("<dl class=\"payment-info\">");
            for (label, value) in &payment.additional_information {
                html.push_str(&format!(
                    "<dt>{}</dt><dd>{}</dd>",
                    tera::escape_html(label),
                    tera::escape_html(value)
                ));
            }
            html.push_str("</dl>");
        }

        html
    }
}
