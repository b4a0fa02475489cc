//! ECPay checkout server.
//!
//! Serves the redirect and callback endpoints on the configured address.

use std::sync::Arc;

use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{self, TraceLayer};

use ecpay_checkout::adapters::http::{checkout_router, CheckoutAppState};
use ecpay_checkout::adapters::{
    InMemoryCorrelationStore, RandomTradeNoGenerator, RedisCorrelationStore, SystemClock,
};
use ecpay_checkout::config::{AppConfig, StoreBackend, StoreConfig, ValidationError};
use ecpay_checkout::logging::init_logging;
use ecpay_checkout::ports::CorrelationStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    init_logging(&config.server.log_level, config.server.log_format);

    let correlation_store = build_store(&config.store).await?;
    let state = CheckoutAppState {
        order_builder: config.payment.order_builder(),
        verifier: config.payment.callback_verifier(),
        correlation_store,
        clock: Arc::new(SystemClock),
        trade_no_generator: Arc::new(RandomTradeNoGenerator),
    };

    let app = checkout_router(state)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(
            TraceLayer::new_for_http()
                .on_request(trace::DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(tracing::Level::INFO)),
        );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        gateway = ?config.payment.mode,
        store = ?config.store.backend,
        "starting checkout server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn build_store(
    config: &StoreConfig,
) -> Result<Arc<dyn CorrelationStore>, Box<dyn std::error::Error>> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(InMemoryCorrelationStore::new())),
        StoreBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .ok_or(ValidationError::MissingRequired("STORE__REDIS_URL"))?;
            let store = RedisCorrelationStore::connect(url, config.ttl_secs).await?;
            Ok(Arc::new(store))
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
