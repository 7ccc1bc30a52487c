//! Configuration management

use anyhow::{Context, Result};

/// Default Google Directions API endpoint
pub const DEFAULT_DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Route planner configuration
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Directions API key
    pub api_key: String,

    /// Home address — origin and final destination of every trip
    pub home_address: String,

    /// Directions API endpoint (override for self-hosted proxies / tests)
    pub directions_url: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl PlannerConfig {
    pub fn new(api_key: impl Into<String>, home_address: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            home_address: home_address.into(),
            directions_url: DEFAULT_DIRECTIONS_URL.to_string(),
            timeout_seconds: 30,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let api_key = std::env::var("DIRECTIONS_API_KEY")
            .context("DIRECTIONS_API_KEY must be set")?;

        let home_address = std::env::var("HOME_ADDRESS")
            .context("HOME_ADDRESS must be set")?;

        let directions_url = std::env::var("DIRECTIONS_URL")
            .unwrap_or_else(|_| DEFAULT_DIRECTIONS_URL.to_string());

        let timeout_seconds = match std::env::var("DIRECTIONS_TIMEOUT_SECONDS") {
            Ok(raw) => raw
                .parse()
                .context("DIRECTIONS_TIMEOUT_SECONDS must be an integer")?,
            Err(_) => 30,
        };

        let config = Self {
            api_key,
            home_address,
            directions_url,
            timeout_seconds,
        };
        config.validate()?;

        Ok(config)
    }

    /// Up-front validation — planning never starts with an incomplete config.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!("directions API key is required");
        }
        if self.home_address.trim().is_empty() {
            anyhow::bail!("home address is required");
        }
        Ok(())
    }
}
