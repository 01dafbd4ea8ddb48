use serde::Deserialize;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Telegram bot credential used for message delivery
    pub telegram_bot_token: String,

    /// Base URL of the document store HTTP API (groups and users collections)
    pub store_base_url: String,

    /// Redis connection string
    pub redis_url: String,

    /// Redis list key the worker consumes notification envelopes from
    pub queue_key: String,

    /// Number of recipients delivered concurrently per page (default: 10)
    pub page_size: usize,

    /// Pause between recipient pages in milliseconds (default: 100)
    pub page_delay_ms: u64,

    /// Timeout for outbound HTTP requests in seconds (default: 10)
    pub http_timeout_secs: u64,

    /// Bind address for the development trigger endpoint. Unset in production.
    pub dev_trigger_addr: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            telegram_bot_token: std::env::var("TELEGRAM_BOT_TOKEN").map_err(|_| {
                anyhow::anyhow!("TELEGRAM_BOT_TOKEN environment variable is required")
            })?,
            store_base_url: std::env::var("STORE_BASE_URL")
                .map_err(|_| anyhow::anyhow!("STORE_BASE_URL environment variable is required"))?,
            redis_url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            queue_key: std::env::var("QUEUE_KEY")
                .unwrap_or_else(|_| "crescendo:notifications".to_string()),
            page_size: std::env::var("PAGE_SIZE")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PAGE_SIZE must be a valid usize"))?,
            page_delay_ms: std::env::var("PAGE_DELAY_MS")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PAGE_DELAY_MS must be a valid u64"))?,
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("HTTP_TIMEOUT_SECS must be a valid u64"))?,
            dev_trigger_addr: std::env::var("DEV_TRIGGER_ADDR").ok(),
        })
    }
}
