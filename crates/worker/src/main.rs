mod http;
mod queue;

use std::sync::Arc;
use std::time::Duration;

use tower_http::trace::TraceLayer;

use crescendo_common::config::AppConfig;
use crescendo_common::error::AppError;
use crescendo_common::redis_pool::create_redis_pool;
use crescendo_dispatch::{Dispatcher, TelegramClient};
use crescendo_store::HttpStore;

use crate::queue::NotificationQueue;

/// How long each BLPOP blocks before the loop re-checks for shutdown.
const POP_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crescendo_worker=info,crescendo_dispatch=debug".into()),
        )
        .json()
        .init();

    tracing::info!("Crescendo worker starting...");

    // Load configuration
    let config = AppConfig::from_env()?;

    // Connect to the notification queue
    let redis = create_redis_pool(&config.redis_url).await?;
    let queue = NotificationQueue::new(redis, config.queue_key.clone());

    // Build the dispatch pipeline
    let http_timeout = Duration::from_secs(config.http_timeout_secs);
    let store = HttpStore::new(config.store_base_url.clone(), http_timeout)?;
    let telegram = TelegramClient::new(config.telegram_bot_token.clone(), http_timeout)?;
    let dispatcher = Arc::new(Dispatcher::new(
        store,
        telegram,
        config.page_size,
        Duration::from_millis(config.page_delay_ms),
    ));

    tracing::info!(
        queue_key = %config.queue_key,
        page_size = config.page_size,
        page_delay_ms = config.page_delay_ms,
        "Dispatch pipeline ready"
    );

    // Development-only HTTP trigger
    if let Some(addr) = config.dev_trigger_addr.clone() {
        let state = http::AppState {
            dispatcher: dispatcher.clone(),
        };
        let app = http::create_router(state).layer(TraceLayer::new_for_http());
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!(addr = %addr, "Dev trigger listening");

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Dev trigger server exited");
            }
        });
    }

    // Run with graceful shutdown on Ctrl+C
    tokio::select! {
        result = run_consumer(queue, dispatcher) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Queue consumer exited with error");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping gracefully...");
        }
    }

    tracing::info!("Crescendo worker stopped.");
    Ok(())
}

/// Consume envelopes until cancelled. A failed dispatch is logged and the
/// loop moves on; redelivery is the producer's at-least-once concern.
async fn run_consumer(
    mut queue: NotificationQueue,
    dispatcher: Arc<Dispatcher<HttpStore, TelegramClient>>,
) -> anyhow::Result<()> {
    loop {
        match queue.pop(POP_TIMEOUT).await {
            Ok(Some(envelope)) => {
                tracing::info!(
                    envelope_id = %envelope.id,
                    kind = envelope.payload.kind(),
                    "Picked up notification"
                );
                if let Err(e) = dispatcher.dispatch(&envelope.payload).await {
                    tracing::error!(
                        envelope_id = %envelope.id,
                        error = %e,
                        "Dispatch failed"
                    );
                }
            }
            Ok(None) => {
                // Idle timeout, poll again
            }
            Err(AppError::InvalidPayload(e)) => {
                tracing::error!(error = %e, "Skipping undecodable envelope");
            }
            Err(e) => {
                tracing::error!(error = %e, "Queue error, backing off");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }
    }
}
