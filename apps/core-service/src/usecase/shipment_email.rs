//! # 出荷メールユースケース
//!
//! 出荷通知メールの送信判断・テンプレート変数の組み立て・送信を統合する。
//!
//! ## モジュール構成
//!
//! - [`sender`] - 即時送信か非同期かの判断とフラグの永続化
//! - [`pipeline`] - テンプレートレンダリング + 送信 + コピー送信
//! - [`identity`] - ストアごとの出荷メール設定
//! - [`template_renderer`] - tera テンプレートエンジンによるメール生成
//! - [`address_renderer`] - 住所の表示形式への変換
//! - [`payment_info`] - 支払い情報ブロックの生成

pub mod address_renderer;
pub mod identity;
pub mod payment_info;
pub mod pipeline;
pub mod sender;
pub mod template_renderer;

pub use address_renderer::{AddressRenderer, DefaultAddressRenderer};
pub use identity::ShipmentIdentity;
pub use payment_info::{DefaultPaymentInfoRenderer, PaymentInfoRenderer};
pub use pipeline::{SendPipeline, ShipmentTemplateVars, TemplateContainer, TemplateSendPipeline};
pub use sender::ShipmentSender;
pub use template_renderer::ShipmentTemplateRenderer;
