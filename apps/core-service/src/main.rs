//! # Core Service サーバー
//!
//! 出荷通知メールの送信判断を行う内部サービス。
//!
//! ## 役割
//!
//! - **送信判断**: 出荷確定時に即時送信するか非同期送信ジョブに委ねるかを決める
//! - **メール生成・送信**: tera テンプレートでレンダリングし、SMTP / SES で送信する
//! - **フラグ永続化**: `send_email` / `email_sent` を PostgreSQL に保存する
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `CORE_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `CORE_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `SALES_EMAIL_ASYNC_SENDING` | No | 非同期送信モード（デフォルト: `false`） |
//! | `SALES_EMAIL_SHIPMENT_ENABLED` | No | 出荷メールの有効化（デフォルト: `true`） |
//! | `SALES_EMAIL_SHIPMENT_COPY_TO` | No | コピー先（カンマ区切り） |
//! | `SALES_EMAIL_SHIPMENT_COPY_METHOD` | No | `bcc` / `copy`（デフォルト: `bcc`） |
//! | `NOTIFICATION_BACKEND` | No | `smtp` / `ses` / `noop`（デフォルト: `noop`） |
//! | `LOG_FORMAT` | No | `json` / `pretty` |
//!
//! ## 起動方法
//!
//! ```bash
//! CORE_PORT=13001 DATABASE_URL=postgres://... cargo run -p shipmail-core-service
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use axum::{
    Router,
    routing::{get, post},
};
use shipmail_core_service::{
    config::{CoreConfig, NotificationBackend, NotificationConfig},
    handler::{ShipmentEmailState, health_check, send_shipment_email},
    usecase::shipment_email::{
        DefaultAddressRenderer,
        DefaultPaymentInfoRenderer,
        ShipmentSender,
        ShipmentTemplateRenderer,
        TemplateSendPipeline,
    },
};
use shipmail_infra::{
    db,
    notification::{
        NoopNotificationSender,
        NotificationSender,
        SesNotificationSender,
        SmtpNotificationSender,
    },
    repository::PostgresShipmentRepository,
};
use shipmail_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// 設定に応じてメール送信バックエンドを構築する
async fn build_notification_sender(config: &NotificationConfig) -> Arc<dyn NotificationSender> {
    match config.backend {
        NotificationBackend::Smtp => Arc::new(SmtpNotificationSender::new(
            &config.smtp_host,
            config.smtp_port,
            config.from_address.clone(),
        )),
        NotificationBackend::Ses => {
            Arc::new(SesNotificationSender::from_env(config.from_address.clone()).await)
        }
        NotificationBackend::Noop => Arc::new(NoopNotificationSender),
    }
}

/// Core Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    init_tracing(&TracingConfig::from_env("core-service"));

    // 設定読み込み
    let config = CoreConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        backend = %config.notification.backend,
        async_sending = config.sales_email.async_sending,
        "Core Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベース接続に失敗しました")?;
    db::run_migrations(&pool)
        .await
        .context("マイグレーションに失敗しました")?;
    tracing::info!("データベースに接続しました");

    // 依存コンポーネントを初期化
    let sales_email = Arc::new(config.sales_email.clone());
    let notification_sender = build_notification_sender(&config.notification).await;
    let address_renderer = Arc::new(DefaultAddressRenderer);
    let renderer = ShipmentTemplateRenderer::new(address_renderer.clone())
        .context("テンプレートの登録に失敗しました")?;
    let pipeline = TemplateSendPipeline::new(
        sales_email.clone(),
        sales_email.shipment.clone(),
        renderer,
        notification_sender,
    );
    let sender = ShipmentSender::new(
        sales_email,
        address_renderer,
        Arc::new(DefaultPaymentInfoRenderer),
        Arc::new(pipeline),
        Arc::new(PostgresShipmentRepository::new(pool)),
    );
    let shipment_email_state = Arc::new(ShipmentEmailState { sender });

    // ルーター構築
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/internal/shipments/send-email", post(send_shipment_email))
        .with_state(shipment_email_state)
        .layer(TraceLayer::new_for_http());

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Core Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
