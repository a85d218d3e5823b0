//! 出荷メール送信判断の統合テスト
//!
//! 公開 API（`ShipmentSender`）と infra のモックを組み合わせ、
//! 設定・強制同期フラグ・パイプラインの結果ごとの振る舞いを確認する。

use std::sync::{
    Arc,
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use shipmail_core_service::{
    config::{ConfigFlag, GlobalConfig, SalesEmailConfig},
    test_utils::ShipmentTestBuilder,
    usecase::shipment_email::{
        AddressRenderer,
        DefaultAddressRenderer,
        DefaultPaymentInfoRenderer,
        PaymentInfoRenderer,
        SendPipeline,
        ShipmentIdentity,
        ShipmentSender,
        ShipmentTemplateRenderer,
        TemplateContainer,
        TemplateSendPipeline,
    },
};
use shipmail_domain::{
    address::{Address, AddressFormat},
    notification::CopyMethod,
    order::Order,
    payment::Payment,
    shipment::ShipmentAttribute,
    store::StoreId,
};
use shipmail_infra::mock::{MockNotificationSender, MockShipmentRepository};

// --- テストダブル ---

struct StubConfig {
    async_sending: bool,
}

impl GlobalConfig for StubConfig {
    fn is_enabled(&self, flag: ConfigFlag) -> bool {
        match flag {
            ConfigFlag::AsyncSending => self.async_sending,
            ConfigFlag::ShipmentEmailEnabled => true,
        }
    }
}

/// 固定の結果を返し、受け取った整形済み住所を記録するパイプライン
struct StubPipeline {
    result:    bool,
    calls:     AtomicUsize,
    addresses: Mutex<Vec<(String, String)>>,
}

impl StubPipeline {
    fn returning(result: bool) -> Arc<Self> {
        Arc::new(Self {
            result,
            calls: AtomicUsize::new(0),
            addresses: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SendPipeline for StubPipeline {
    async fn check_and_send(&self, _order: &Order, template: TemplateContainer<'_>) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(vars) = template.template_vars() {
            self.addresses.lock().unwrap().push((
                vars.formatted_shipping_address.clone(),
                vars.formatted_billing_address.clone(),
            ));
        }
        self.result
    }
}

#[derive(Default)]
struct CountingAddressRenderer {
    calls: AtomicUsize,
}

impl AddressRenderer for CountingAddressRenderer {
    fn format(&self, address: &Address, format: AddressFormat) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        DefaultAddressRenderer.format(address, format)
    }
}

#[derive(Default)]
struct CountingPaymentRenderer {
    calls: AtomicUsize,
}

impl PaymentInfoRenderer for CountingPaymentRenderer {
    fn info_block_html(&self, payment: &Payment, store_id: &StoreId) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        DefaultPaymentInfoRenderer.info_block_html(payment, store_id)
    }
}

struct Fixture {
    sut:              ShipmentSender,
    pipeline:         Arc<StubPipeline>,
    address_renderer: Arc<CountingAddressRenderer>,
    payment_renderer: Arc<CountingPaymentRenderer>,
    repository:       MockShipmentRepository,
}

fn fixture(async_sending: bool, pipeline_result: bool) -> Fixture {
    let pipeline = StubPipeline::returning(pipeline_result);
    let address_renderer = Arc::new(CountingAddressRenderer::default());
    let payment_renderer = Arc::new(CountingPaymentRenderer::default());
    let repository = MockShipmentRepository::new();

    let sut = ShipmentSender::new(
        Arc::new(StubConfig { async_sending }),
        address_renderer.clone(),
        payment_renderer.clone(),
        pipeline.clone(),
        Arc::new(repository.clone()),
    );

    Fixture {
        sut,
        pipeline,
        address_renderer,
        payment_renderer,
        repository,
    }
}

// --- シナリオ ---

#[tokio::test]
async fn 非同期モードでは送信せず送信要求フラグだけを保存する() {
    // Arrange
    let fx = fixture(true, true);
    let mut shipment = ShipmentTestBuilder::new().build();

    // Act
    let result = fx.sut.send(&mut shipment, false).await.unwrap();

    // Assert
    assert!(!result);
    assert_eq!(fx.pipeline.calls(), 0);
    let saves = fx.repository.saves();
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].shipment_id, *shipment.id());
    assert_eq!(saves[0].values, vec![(ShipmentAttribute::SendEmail, true)]);
}

#[tokio::test]
async fn 同期モードで送信に成功すると両フラグを保存する() {
    // Arrange
    let fx = fixture(false, true);
    let mut shipment = ShipmentTestBuilder::new().build();

    // Act
    let result = fx.sut.send(&mut shipment, false).await.unwrap();

    // Assert
    assert!(result);
    assert_eq!(fx.pipeline.calls(), 1);
    assert_eq!(fx.address_renderer.calls.load(Ordering::SeqCst), 1);
    assert_eq!(fx.payment_renderer.calls.load(Ordering::SeqCst), 1);
    let saves = fx.repository.saves();
    assert_eq!(saves.len(), 1);
    assert_eq!(
        saves[0].values,
        vec![
            (ShipmentAttribute::SendEmail, true),
            (ShipmentAttribute::EmailSent, true),
        ]
    );
}

#[tokio::test]
async fn 強制同期で送信に失敗すると送信要求フラグだけを保存する() {
    // Arrange
    let fx = fixture(true, false);
    let mut shipment = ShipmentTestBuilder::new().build();

    // Act
    let result = fx.sut.send(&mut shipment, true).await.unwrap();

    // Assert
    assert!(!result);
    assert_eq!(fx.pipeline.calls(), 1);
    assert!(!shipment.email_sent());
    let saves = fx.repository.saves();
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].attributes(), vec![ShipmentAttribute::SendEmail]);
}

#[tokio::test]
async fn 配送先がない注文では配送先が空文字列で請求先は整形される() {
    // Arrange
    let fx = fixture(false, true);
    let mut shipment = ShipmentTestBuilder::new().build();

    // Act
    fx.sut.send(&mut shipment, false).await.unwrap();

    // Assert
    let addresses = fx.pipeline.addresses.lock().unwrap().clone();
    assert_eq!(addresses.len(), 1);
    let (shipping, billing) = &addresses[0];
    assert_eq!(shipping, "");
    assert!(billing.starts_with("Taro Yamada<br />"));
}

#[tokio::test]
async fn 配送先がある注文では住所レンダラーが二回呼ばれる() {
    // Arrange
    let fx = fixture(false, true);
    let mut shipment = ShipmentTestBuilder::new().shipping_city("Osaka-shi").build();

    // Act
    fx.sut.send(&mut shipment, false).await.unwrap();

    // Assert
    assert_eq!(fx.address_renderer.calls.load(Ordering::SeqCst), 2);
    let addresses = fx.pipeline.addresses.lock().unwrap().clone();
    assert!(addresses[0].0.contains("Osaka-shi"));
}

#[tokio::test]
async fn 同じ送信者で複数回呼んでも呼び出しごとに一度だけ保存する() {
    // Arrange
    let fx = fixture(false, false);
    let mut first = ShipmentTestBuilder::new().build();
    let mut second = ShipmentTestBuilder::new().build();

    // Act
    fx.sut.send(&mut first, false).await.unwrap();
    fx.sut.send(&mut second, false).await.unwrap();

    // Assert
    let saves = fx.repository.saves();
    assert_eq!(saves.len(), 2);
    assert_eq!(saves[0].shipment_id, *first.id());
    assert_eq!(saves[1].shipment_id, *second.id());
}

// --- テンプレート送信パイプラインとの結合 ---

fn sales_email_config(async_sending: bool, copy_method: CopyMethod) -> SalesEmailConfig {
    SalesEmailConfig {
        async_sending,
        shipment: ShipmentIdentity {
            enabled: true,
            template_id: "shipment_new".to_string(),
            guest_template_id: "shipment_new_guest".to_string(),
            copy_to: vec!["warehouse@example.com".to_string()],
            copy_method,
            sender_name: "Shipmail Store".to_string(),
        },
    }
}

fn sender_with_template_pipeline(
    config: SalesEmailConfig,
    notification_sender: MockNotificationSender,
    repository: MockShipmentRepository,
) -> ShipmentSender {
    let config = Arc::new(config);
    let pipeline = TemplateSendPipeline::new(
        config.clone(),
        config.shipment.clone(),
        ShipmentTemplateRenderer::new(Arc::new(DefaultAddressRenderer)).unwrap(),
        Arc::new(notification_sender),
    );
    ShipmentSender::new(
        config,
        Arc::new(DefaultAddressRenderer),
        Arc::new(DefaultPaymentInfoRenderer),
        Arc::new(pipeline),
        Arc::new(repository),
    )
}

#[tokio::test]
async fn 通知コメントと追跡番号がメール本文に入る() {
    // Arrange
    let notification_sender = MockNotificationSender::new();
    let repository = MockShipmentRepository::new();
    let sut = sender_with_template_pipeline(
        sales_email_config(false, CopyMethod::Bcc),
        notification_sender.clone(),
        repository.clone(),
    );
    let mut shipment = ShipmentTestBuilder::new()
        .customer_note(Some("宅配ボックスへ"), true)
        .track("佐川急便", "4000-1111-2222")
        .build();

    // Act
    let result = sut.send(&mut shipment, false).await.unwrap();

    // Assert
    assert!(result);
    let emails = notification_sender.sent_emails();
    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0].to, "taro@example.com");
    assert_eq!(emails[0].bcc, vec!["warehouse@example.com".to_string()]);
    assert_eq!(
        emails[0].subject,
        "Shipmail Store: ご注文 #000000042 の出荷のお知らせ"
    );
    assert!(emails[0].html_body.contains("宅配ボックスへ"));
    assert!(emails[0].text_body.contains("- 佐川急便: 4000-1111-2222"));
}

#[tokio::test]
async fn 送信が失敗するとemail_sentは保存されない() {
    // Arrange
    let repository = MockShipmentRepository::new();
    let sut = sender_with_template_pipeline(
        sales_email_config(false, CopyMethod::Bcc),
        MockNotificationSender::failing(),
        repository.clone(),
    );
    let mut shipment = ShipmentTestBuilder::new().build();

    // Act
    let result = sut.send(&mut shipment, false).await.unwrap();

    // Assert
    assert!(!result);
    assert!(!shipment.email_sent());
    assert_eq!(
        repository.saves()[0].attributes(),
        vec![ShipmentAttribute::SendEmail]
    );
}
