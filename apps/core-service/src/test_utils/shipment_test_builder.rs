//! 出荷テストビルダー
//!
//! テストコードの重複を削減するためのビルダーパターン実装。
//! 既定では登録顧客・配送先なし・顧客メモなしの出荷を生成する。
//!
//! # 使用例
//!
//! ```ignore
//! use shipmail_core_service::test_utils::ShipmentTestBuilder;
//!
//! let shipment = ShipmentTestBuilder::new()
//!     .guest("Hanako", "Suzuki", "hanako@example.com")
//!     .customer_note(Some("置き配希望"), true)
//!     .build();
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use shipmail_domain::{
    address::Address,
    order::{NewOrder, Order, OrderId},
    payment::Payment,
    shipment::{NewShipment, Shipment, ShipmentId, ShipmentTrack},
    store::{Store, StoreId},
};

/// 出荷テストビルダー
pub struct ShipmentTestBuilder {
    shipment_id:          ShipmentId,
    customer_email:       String,
    customer_firstname:   Option<String>,
    customer_lastname:    Option<String>,
    customer_is_guest:    bool,
    billing_address:      Address,
    shipping_address:     Option<Address>,
    payment:              Payment,
    tracks:               Vec<ShipmentTrack>,
    customer_note:        Option<String>,
    customer_note_notify: bool,
    now:                  DateTime<Utc>,
}

impl Default for ShipmentTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ShipmentTestBuilder {
    pub fn new() -> Self {
        Self {
            shipment_id:          ShipmentId::new(),
            customer_email:       "taro@example.com".to_string(),
            customer_firstname:   Some("Taro".to_string()),
            customer_lastname:    Some("Yamada".to_string()),
            customer_is_guest:    false,
            billing_address:      Self::address("Taro", "Yamada", "Chiyoda-ku"),
            shipping_address:     None,
            payment:              Payment {
                method:                 "checkmo".to_string(),
                method_title:           "Check / Money order".to_string(),
                additional_information: BTreeMap::new(),
            },
            tracks:               Vec::new(),
            customer_note:        None,
            customer_note_notify: false,
            now:                  Utc.with_ymd_and_hms(2026, 9, 1, 10, 0, 0).unwrap(),
        }
    }

    fn address(firstname: &str, lastname: &str, city: &str) -> Address {
        Address {
            firstname:  firstname.to_string(),
            lastname:   lastname.to_string(),
            company:    None,
            street:     vec!["1-2-3".to_string()],
            city:       city.to_string(),
            region:     Some("Tokyo".to_string()),
            postcode:   "100-0001".to_string(),
            country_id: "JP".to_string(),
            telephone:  None,
        }
    }

    /// 出荷 ID を固定する
    pub fn id(mut self, id: ShipmentId) -> Self {
        self.shipment_id = id;
        self
    }

    /// ゲスト購入の注文にする（請求先の氏名も合わせる）
    pub fn guest(mut self, firstname: &str, lastname: &str, email: &str) -> Self {
        self.customer_is_guest = true;
        self.customer_firstname = None;
        self.customer_lastname = None;
        self.customer_email = email.to_string();
        self.billing_address.firstname = firstname.to_string();
        self.billing_address.lastname = lastname.to_string();
        self
    }

    /// 請求先の会社名を設定する
    pub fn billing_company(mut self, company: &str) -> Self {
        self.billing_address.company = Some(company.to_string());
        self
    }

    /// 配送先住所を設定する
    pub fn shipping_city(mut self, city: &str) -> Self {
        let mut address = self.billing_address.clone();
        address.city = city.to_string();
        self.shipping_address = Some(address);
        self
    }

    /// 顧客メモと通知フラグを設定する
    pub fn customer_note(mut self, note: Option<&str>, notify: bool) -> Self {
        self.customer_note = note.map(str::to_string);
        self.customer_note_notify = notify;
        self
    }

    /// 追跡番号を追加する
    pub fn track(mut self, carrier_title: &str, track_number: &str) -> Self {
        self.tracks.push(ShipmentTrack {
            carrier_title: carrier_title.to_string(),
            track_number:  track_number.to_string(),
        });
        self
    }

    pub fn build_order(&self) -> Order {
        Order::new(NewOrder {
            id:                 OrderId::new(),
            increment_id:       "000000042".to_string(),
            store:              Store {
                id:   StoreId::new(),
                code: "default".to_string(),
                name: "Shipmail Store".to_string(),
            },
            customer_email:     self.customer_email.clone(),
            customer_firstname: self.customer_firstname.clone(),
            customer_lastname:  self.customer_lastname.clone(),
            customer_is_guest:  self.customer_is_guest,
            billing_address:    self.billing_address.clone(),
            shipping_address:   self.shipping_address.clone(),
            payment:            self.payment.clone(),
            now:                self.now,
        })
        .unwrap()
    }

    pub fn build(self) -> Shipment {
        let order = self.build_order();
        Shipment::new(NewShipment {
            id: self.shipment_id,
            increment_id: "000000017".to_string(),
            order,
            tracks: self.tracks,
            customer_note: self.customer_note,
            customer_note_notify: self.customer_note_notify,
            now: self.now,
        })
    }
}
