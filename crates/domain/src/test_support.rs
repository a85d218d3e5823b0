//! # テスト用フィクスチャ
//!
//! 他クレートのテストからも使える最小構成の注文・出荷を提供する。
//! `test-support` feature を有効にすると公開される。

use std::collections::BTreeMap;

use chrono::Utc;

use crate::{
    address::Address,
    order::{NewOrder, Order, OrderId},
    payment::Payment,
    shipment::{NewShipment, Shipment, ShipmentId},
    store::{Store, StoreId},
};

/// 東京の請求先住所
pub fn address_for_test() -> Address {
    Address {
        firstname:  "Taro".to_string(),
        lastname:   "Yamada".to_string(),
        company:    None,
        street:     vec!["1-2-3 Chiyoda".to_string()],
        city:       "Chiyoda-ku".to_string(),
        region:     Some("Tokyo".to_string()),
        postcode:   "100-0001".to_string(),
        country_id: "JP".to_string(),
        telephone:  Some("03-0000-0000".to_string()),
    }
}

/// 登録顧客の注文（配送先なし）
pub fn order_for_test() -> Order {
    Order::new(NewOrder {
        id:                 OrderId::new(),
        increment_id:       "000000001".to_string(),
        store:              Store {
            id:   StoreId::new(),
            code: "default".to_string(),
            name: "Shipmail Store".to_string(),
        },
        customer_email:     "taro@example.com".to_string(),
        customer_firstname: Some("Taro".to_string()),
        customer_lastname:  Some("Yamada".to_string()),
        customer_is_guest:  false,
        billing_address:    address_for_test(),
        shipping_address:   None,
        payment:            Payment {
            method:                 "checkmo".to_string(),
            method_title:           "Check / Money order".to_string(),
            additional_information: BTreeMap::new(),
        },
        now:                Utc::now(),
    })
    .expect("テスト用注文は常に妥当")
}

/// 顧客メモなしの出荷
pub fn shipment_for_test() -> Shipment {
    Shipment::new(NewShipment {
        id:                   ShipmentId::new(),
        increment_id:         "000000001".to_string(),
        order:                order_for_test(),
        tracks:               Vec::new(),
        customer_note:        None,
        customer_note_notify: false,
        now:                  Utc::now(),
    })
}
