//! # 出荷メールハンドラ
//!
//! 出荷確定後に呼ばれる内部 API。
//!
//! ## エンドポイント
//!
//! - `POST /internal/shipments/send-email` - 出荷メールの送信（または非同期送信の予約）

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shipmail_domain::{
    DomainError,
    address::Address,
    order::{NewOrder, Order, OrderId},
    payment::Payment,
    shipment::{NewShipment, Shipment, ShipmentId, ShipmentTrack},
    store::Store,
};
use shipmail_shared::ApiResponse;

use crate::{error::CoreError, usecase::ShipmentSender};

/// 出荷メール API の共有状態
pub struct ShipmentEmailState {
    pub sender: ShipmentSender,
}

/// 出荷メール送信リクエスト
#[derive(Debug, Deserialize)]
pub struct SendShipmentEmailRequest {
    pub shipment:   ShipmentRequest,
    /// 非同期送信モードでも即時送信する
    #[serde(default)]
    pub force_sync: bool,
}

/// リクエスト中の注文
#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    pub id:                 OrderId,
    pub increment_id:       String,
    pub store:              Store,
    pub customer_email:     String,
    #[serde(default)]
    pub customer_firstname: Option<String>,
    #[serde(default)]
    pub customer_lastname:  Option<String>,
    pub customer_is_guest:  bool,
    pub billing_address:    Address,
    #[serde(default)]
    pub shipping_address:   Option<Address>,
    pub payment:            Payment,
    pub created_at:         DateTime<Utc>,
}

/// リクエスト中の出荷
#[derive(Debug, Deserialize)]
pub struct ShipmentRequest {
    pub id:                   ShipmentId,
    pub increment_id:         String,
    pub order:                OrderRequest,
    #[serde(default)]
    pub tracks:               Vec<ShipmentTrack>,
    #[serde(default)]
    pub customer_note:        Option<String>,
    #[serde(default)]
    pub customer_note_notify: bool,
    /// 既に送信済みの出荷を再送する場合は true
    #[serde(default)]
    pub email_sent:           bool,
    pub created_at:           DateTime<Utc>,
}

impl TryFrom<OrderRequest> for Order {
    type Error = DomainError;

    fn try_from(req: OrderRequest) -> Result<Self, Self::Error> {
        Order::new(NewOrder {
            id:                 req.id,
            increment_id:       req.increment_id,
            store:              req.store,
            customer_email:     req.customer_email,
            customer_firstname: req.customer_firstname,
            customer_lastname:  req.customer_lastname,
            customer_is_guest:  req.customer_is_guest,
            billing_address:    req.billing_address,
            shipping_address:   req.shipping_address,
            payment:            req.payment,
            now:                req.created_at,
        })
    }
}

impl TryFrom<ShipmentRequest> for Shipment {
    type Error = DomainError;

    fn try_from(req: ShipmentRequest) -> Result<Self, Self::Error> {
        let mut shipment = Shipment::new(NewShipment {
            id:                   req.id,
            increment_id:         req.increment_id,
            order:                Order::try_from(req.order)?,
            tracks:               req.tracks,
            customer_note:        req.customer_note,
            customer_note_notify: req.customer_note_notify,
            now:                  req.created_at,
        });
        shipment.set_email_sent(req.email_sent);
        Ok(shipment)
    }
}

/// 送信後の出荷フラグ
#[derive(Debug, Serialize, Deserialize)]
pub struct ShipmentEmailFlagsDto {
    pub send_email: bool,
    pub email_sent: bool,
}

/// POST /internal/shipments/send-email
///
/// ## レスポンス
///
/// - `200 OK`: 送信後の `send_email` / `email_sent`
/// - `400 Bad Request`: 注文の内容が不正（注文番号が空、メールアドレスが不正など）
/// - `404 Not Found`: 出荷が DB に存在しない
/// - `500 Internal Server Error`: フラグの保存に失敗
#[tracing::instrument(skip_all, fields(shipment_id = %req.shipment.id))]
pub async fn send_shipment_email(
    State(state): State<Arc<ShipmentEmailState>>,
    Json(req): Json<SendShipmentEmailRequest>,
) -> Result<impl IntoResponse, CoreError> {
    let mut shipment =
        Shipment::try_from(req.shipment).map_err(|e| CoreError::BadRequest(e.to_string()))?;

    state.sender.send(&mut shipment, req.force_sync).await?;

    let response = ApiResponse::new(ShipmentEmailFlagsDto {
        send_email: shipment.send_email(),
        email_sent: shipment.email_sent(),
    });
    Ok((StatusCode::OK, Json(response)))
}
