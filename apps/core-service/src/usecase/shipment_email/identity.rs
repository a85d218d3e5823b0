//! # 出荷メールの送信元設定
//!
//! ストアごとの出荷メール設定（テンプレート、コピー先、送信者名）を保持する。

use shipmail_domain::{notification::CopyMethod, order::Order};

/// 出荷メールの送信元設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentIdentity {
    /// 出荷メールを送信するか
    pub enabled:           bool,
    /// 登録顧客向けテンプレート ID
    pub template_id:       String,
    /// ゲスト購入者向けテンプレート ID
    pub guest_template_id: String,
    /// 店舗側のコピー先
    pub copy_to:           Vec<String>,
    pub copy_method:       CopyMethod,
    /// 送信者の表示名
    pub sender_name:       String,
}

impl ShipmentIdentity {
    /// 注文の顧客種別に応じたテンプレート ID
    pub fn template_id_for(&self, order: &Order) -> &str {
        if order.customer_is_guest() {
            &self.guest_template_id
        } else {
            &self.template_id
        }
    }

    /// 顧客宛てメールの Bcc に加えるアドレス
    pub fn bcc_recipients(&self) -> &[String] {
        match self.copy_method {
            CopyMethod::Bcc => &self.copy_to,
            CopyMethod::Copy => &[],
        }
    }

    /// 別メールとして送るコピー先
    pub fn separate_copy_recipients(&self) -> &[String] {
        match self.copy_method {
            CopyMethod::Bcc => &[],
            CopyMethod::Copy => &self.copy_to,
        }
    }
}
