//! # 出荷
//!
//! 注文に対する出荷記録。出荷通知メールの送信対象であり、
//! 送信要求フラグ（`send_email`）と送信済みフラグ（`email_sent`）を持つ。
//!
//! ## フラグの意味
//!
//! | フラグ | 意味 | 更新タイミング |
//! |---|---|---|
//! | `send_email` | 送信が要求された（結果は問わない） | 送信処理の最初に必ず true |
//! | `email_sent` | 送信が確認された | 同期送信に成功したときのみ true |
//!
//! `send_email = true` かつ `email_sent = false` の出荷は、非同期送信ジョブが
//! 後から拾って送信する対象になる。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::order::Order;

define_uuid_id! {
    /// 出荷 ID
    pub struct ShipmentId;
}

/// 永続化対象の出荷属性
///
/// `IntoStaticStr` で DB のカラム名（snake_case）に変換される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ShipmentAttribute {
    /// 送信要求フラグ
    SendEmail,
    /// 送信済みフラグ
    EmailSent,
}

/// 追跡番号
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentTrack {
    /// 配送業者名（例: `ヤマト運輸`）
    pub carrier_title: String,
    pub track_number:  String,
}

/// 出荷集約
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shipment {
    id:                   ShipmentId,
    increment_id:         String,
    order:                Order,
    tracks:               Vec<ShipmentTrack>,
    customer_note:        Option<String>,
    customer_note_notify: bool,
    send_email:           bool,
    email_sent:           bool,
    created_at:           DateTime<Utc>,
}

/// 出荷の新規作成パラメータ
pub struct NewShipment {
    pub id:                   ShipmentId,
    pub increment_id:         String,
    pub order:                Order,
    pub tracks:               Vec<ShipmentTrack>,
    pub customer_note:        Option<String>,
    pub customer_note_notify: bool,
    pub now:                  DateTime<Utc>,
}

impl Shipment {
    /// 新しい出荷を作成する（フラグはどちらも false）
    pub fn new(params: NewShipment) -> Self {
        Self {
            id:                   params.id,
            increment_id:         params.increment_id,
            order:                params.order,
            tracks:               params.tracks,
            customer_note:        params.customer_note,
            customer_note_notify: params.customer_note_notify,
            send_email:           false,
            email_sent:           false,
            created_at:           params.now,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> &ShipmentId {
        &self.id
    }

    pub fn increment_id(&self) -> &str {
        &self.increment_id
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn tracks(&self) -> &[ShipmentTrack] {
        &self.tracks
    }

    pub fn customer_note(&self) -> Option<&str> {
        self.customer_note.as_deref()
    }

    pub fn customer_note_notify(&self) -> bool {
        self.customer_note_notify
    }

    pub fn send_email(&self) -> bool {
        self.send_email
    }

    pub fn email_sent(&self) -> bool {
        self.email_sent
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// 送信要求フラグを設定する
    pub fn set_send_email(&mut self, value: bool) {
        self.send_email = value;
    }

    /// 送信済みフラグを設定する
    pub fn set_email_sent(&mut self, value: bool) {
        self.email_sent = value;
    }

    /// 顧客に通知するコメントを返す
    ///
    /// 通知フラグが立っている場合のみ顧客メモを返し、それ以外は空文字列を返す。
    pub fn customer_comment(&self) -> &str {
        if self.customer_note_notify {
            self.customer_note.as_deref().unwrap_or("")
        } else {
            ""
        }
    }

    /// 属性の現在値を返す
    pub fn attribute_value(&self, attribute: ShipmentAttribute) -> bool {
        match attribute {
            ShipmentAttribute::SendEmail => self.send_email,
            ShipmentAttribute::EmailSent => self.email_sent,
        }
    }
}
