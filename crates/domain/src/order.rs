//! # 注文
//!
//! 出荷の親となる注文集約。出荷メール送信から見て読み取り専用であり、
//! 請求先住所・配送先住所・支払い・ストアを公開する。
//!
//! ## 不変条件
//!
//! - 請求先住所は必ず存在する（型で強制）
//! - 配送先住所はダウンロード商品のみの注文などで存在しない場合がある（`Option`）

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{DomainError, address::Address, payment::Payment, store::Store};

define_uuid_id! {
    /// 注文 ID
    pub struct OrderId;
}

/// ゲスト注文の顧客名が解決できない場合の表示名
const GUEST_CUSTOMER_NAME: &str = "ゲスト";

/// 注文集約
///
/// 外部入力からは `Order::new` を経由してのみ構築する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    id:                 OrderId,
    /// 顧客向けの注文番号（例: `000000042`）
    increment_id:       String,
    store:              Store,
    customer_email:     String,
    customer_firstname: Option<String>,
    customer_lastname:  Option<String>,
    customer_is_guest:  bool,
    billing_address:    Address,
    shipping_address:   Option<Address>,
    payment:            Payment,
    created_at:         DateTime<Utc>,
}

/// 注文の新規作成パラメータ
pub struct NewOrder {
    pub id:                 OrderId,
    pub increment_id:       String,
    pub store:              Store,
    pub customer_email:     String,
    pub customer_firstname: Option<String>,
    pub customer_lastname:  Option<String>,
    pub customer_is_guest:  bool,
    pub billing_address:    Address,
    pub shipping_address:   Option<Address>,
    pub payment:            Payment,
    pub now:                DateTime<Utc>,
}

impl Order {
    /// 注文を作成する
    ///
    /// # Errors
    ///
    /// - 注文番号が空の場合
    /// - 顧客メールアドレスが空、または `@` を含まない場合
    pub fn new(params: NewOrder) -> Result<Self, DomainError> {
        if params.increment_id.trim().is_empty() {
            return Err(DomainError::Validation("注文番号は必須です".to_string()));
        }
        let customer_email = params.customer_email.trim().to_string();
        if customer_email.is_empty() || !customer_email.contains('@') {
            return Err(DomainError::Validation(format!(
                "顧客メールアドレスが不正です: {customer_email:?}"
            )));
        }

        Ok(Self {
            id: params.id,
            increment_id: params.increment_id,
            store: params.store,
            customer_email,
            customer_firstname: params.customer_firstname,
            customer_lastname: params.customer_lastname,
            customer_is_guest: params.customer_is_guest,
            billing_address: params.billing_address,
            shipping_address: params.shipping_address,
            payment: params.payment,
            created_at: params.now,
        })
    }

    // Getter メソッド

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn increment_id(&self) -> &str {
        &self.increment_id
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn customer_email(&self) -> &str {
        &self.customer_email
    }

    pub fn customer_is_guest(&self) -> bool {
        self.customer_is_guest
    }

    pub fn billing_address(&self) -> &Address {
        &self.billing_address
    }

    pub fn shipping_address(&self) -> Option<&Address> {
        self.shipping_address.as_ref()
    }

    pub fn payment(&self) -> &Payment {
        &self.payment
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// 会員顧客の氏名を返す
    ///
    /// 名・姓がどちらも未設定の場合は「ゲスト」を返す。
    pub fn customer_name(&self) -> String {
        let name = [
            self.customer_firstname.as_deref(),
            self.customer_lastname.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        if name.is_empty() {
            GUEST_CUSTOMER_NAME.to_string()
        } else {
            name
        }
    }
}
