use crate::core::money::{validate_tax_rate, DEFAULT_HST_RATE};
use crate::core::{AppError, Result};
use rust_decimal::Decimal;
use std::env;

pub mod server;

pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub commission: CommissionConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

/// Business policy applied by the commission engine
#[derive(Debug, Clone)]
pub struct CommissionConfig {
    /// Tax charged on GCI, as a fraction (0.13 for 13% HST)
    pub hst_rate: Decimal,
}

impl Default for CommissionConfig {
    fn default() -> Self {
        Self {
            hst_rate: DEFAULT_HST_RATE,
        }
    }
}

impl CommissionConfig {
    pub fn from_env() -> Result<Self> {
        let hst_rate = match env::var("HST_RATE") {
            Ok(raw) => raw
                .trim()
                .parse::<Decimal>()
                .map_err(|_| AppError::configuration(format!("Invalid HST_RATE: '{}'", raw)))?,
            Err(_) => DEFAULT_HST_RATE,
        };
        Ok(Self { hst_rate })
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            server: ServerConfig::from_env()?,
            commission: CommissionConfig::from_env()?,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::configuration("Server port must be greater than 0"));
        }

        if self.server.workers == 0 {
            return Err(AppError::configuration("Server workers must be greater than 0"));
        }

        validate_tax_rate(self.commission.hst_rate)
            .map_err(|e| AppError::configuration(format!("HST_RATE: {}", e)))?;

        Ok(())
    }
}
