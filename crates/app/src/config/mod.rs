//! Application configuration
//!
//! Every setting can come from a flag or an environment variable; `.env` is loaded first.

use std::{path::PathBuf, time::Duration};

use clap::Args;

mod observability;

pub use observability::{LogFormat, LoggingConfig};

/// RAWG catalog settings.
#[derive(Debug, Clone, Args)]
pub struct CatalogConfig {
    /// RAWG API key
    #[arg(long, env = "RAWG_API_KEY", hide_env_values = true, global = true)]
    pub rawg_api_key: Option<String>,

    /// RAWG API root
    #[arg(
        long,
        env = "RAWG_BASE_URL",
        default_value = "https://api.rawg.io/api",
        global = true
    )]
    pub rawg_base_url: String,
}

/// ViaCEP settings.
#[derive(Debug, Clone, Args)]
pub struct AddressConfig {
    /// ViaCEP API root
    #[arg(
        long,
        env = "VIACEP_BASE_URL",
        default_value = "https://viacep.com.br/ws",
        global = true
    )]
    pub viacep_base_url: String,
}

/// ReqRes settings.
#[derive(Debug, Clone, Args)]
pub struct AuthConfig {
    /// ReqRes API root
    #[arg(
        long,
        env = "REQRES_BASE_URL",
        default_value = "https://reqres.in/api",
        global = true
    )]
    pub reqres_base_url: String,

    /// ReqRes `x-api-key` header
    #[arg(
        long,
        env = "REQRES_API_KEY",
        default_value = "reqres-free-v1",
        hide_env_values = true,
        global = true
    )]
    pub reqres_api_key: String,
}

/// Local persistence settings.
#[derive(Debug, Clone, Args)]
pub struct StorageConfig {
    /// Directory holding the cart, orders and session
    #[arg(long, env = "IARA_DATA_DIR", default_value = ".iara", global = true)]
    pub data_dir: PathBuf,
}

/// Outbound HTTP settings.
#[derive(Debug, Clone, Args)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECONDS", default_value_t = 10_u64, global = true)]
    pub http_timeout_seconds: u64,
}

impl HttpConfig {
    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }
}

/// Checkout settings.
#[derive(Debug, Clone, Args)]
pub struct CheckoutConfig {
    /// Simulated card processing time in milliseconds
    #[arg(
        long,
        env = "CARD_SETTLEMENT_DELAY_MS",
        default_value_t = 2_000_u64,
        global = true
    )]
    pub card_settlement_delay_ms: u64,
}

impl CheckoutConfig {
    /// Simulated card processing time.
    pub fn settlement_delay(&self) -> Duration {
        Duration::from_millis(self.card_settlement_delay_ms)
    }
}

/// Iara application configuration
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Catalog API settings.
    #[command(flatten)]
    pub catalog: CatalogConfig,

    /// Address lookup settings.
    #[command(flatten)]
    pub address: AddressConfig,

    /// Auth API settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Local persistence settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Outbound HTTP settings.
    #[command(flatten)]
    pub http: HttpConfig,

    /// Checkout settings.
    #[command(flatten)]
    pub checkout: CheckoutConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
