//! Runtime configuration, read from the environment with defaults.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tracing::info;

pub const DATABASE_URL_ENV: &str = "REVENUE_SHARE_DATABASE_URL";
pub const BIND_ADDR_ENV: &str = "REVENUE_SHARE_BIND_ADDR";
pub const POOL_RATIO_ENV: &str = "REVENUE_SHARE_POOL_RATIO";

const DEFAULT_DATABASE_URL: &str = "sqlite:revenue_share.db?mode=rwc";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Share of department revenue set aside for distribution
pub const DEFAULT_POOL_RATIO: f64 = 0.30;

/// Parameters of the distribution computation
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionConfig {
    pub pool_ratio: f64,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            pool_ratio: DEFAULT_POOL_RATIO,
        }
    }
}

impl DistributionConfig {
    pub fn with_pool_ratio(pool_ratio: f64) -> Result<Self> {
        if !pool_ratio.is_finite() || !(0.0..=1.0).contains(&pool_ratio) {
            return Err(anyhow::anyhow!(
                "Pool ratio must be between 0 and 1, got {}",
                pool_ratio
            ));
        }
        Ok(Self { pool_ratio })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub distribution: DistributionConfig,
}

impl AppConfig {
    /// Build the configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL_ENV).unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let bind_addr_raw = lookup(BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr_raw
            .parse()
            .with_context(|| format!("Invalid {}: {}", BIND_ADDR_ENV, bind_addr_raw))?;

        let distribution = match lookup(POOL_RATIO_ENV) {
            Some(raw) => {
                let ratio: f64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid {}: {}", POOL_RATIO_ENV, raw))?;
                DistributionConfig::with_pool_ratio(ratio)?
            }
            None => DistributionConfig::default(),
        };

        info!(
            "Configuration: database={}, bind={}, pool_ratio={:.2}",
            database_url, bind_addr, distribution.pool_ratio
        );

        Ok(Self {
            database_url,
            bind_addr,
            distribution,
        })
    }
}
