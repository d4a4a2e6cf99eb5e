/// Service configuration loaded explicitly from environment variables.
///
/// Redis URL is optional; without it the service runs uncached. The catalog
/// and AI clients load their own config (see `aroma_common`).
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds, e.g. "0.0.0.0:8080".
    pub listen_addr: String,
    /// Redis connection URL (e.g. "redis://127.0.0.1:6379"). `None` disables caching.
    pub redis_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `LISTEN_ADDR`: bind address (default "0.0.0.0:8080")
    /// - `REDIS_URL`: Redis connection string (omit to disable caching)
    pub fn from_env() -> Self {
        let listen_addr =
            std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let redis_url = std::env::var("REDIS_URL").ok();

        Self {
            listen_addr,
            redis_url,
        }
    }
}
