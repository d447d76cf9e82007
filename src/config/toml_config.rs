use crate::core::paginator::ThrottlePolicy;
use crate::core::resolver::{PhaseRegistry, PhasedFamily};
use crate::utils::error::{Result, ScoutError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://csfloat.com/api/v1/listings";
pub const DEFAULT_ITEM_URL_BASE: &str = "https://csfloat.com/item";
pub const DEFAULT_DISCORD_API_BASE: &str = "https://discord.com/api/v10";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Process-wide configuration, loaded once at startup and shared read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    pub marketplace: MarketplaceConfig,
    pub discord: Option<DiscordConfig>,
    pub delivery: Option<DeliveryConfig>,
    #[serde(default)]
    pub tiers: HashMap<String, Vec<String>>,
    pub phased_families: Option<HashMap<String, PhasedFamily>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    pub item_url_base: Option<String>,
    pub api_key: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscordConfig {
    pub bot_token: Option<String>,
    pub application_id: Option<String>,
    pub guild_id: Option<String>,
    pub api_base: Option<String>,
    pub webhook_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliveryConfig {
    pub page_size: Option<usize>,
    pub batch_size: Option<usize>,
    pub pause_ms: Option<u64>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl BotConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScoutError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string, substituting `${VAR}` from the environment
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScoutError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Unset variables are left in place so validation can name them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScoutError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("marketplace.endpoint", &self.marketplace.endpoint)?;
        validation::validate_url("marketplace.item_url_base", self.item_url_base())?;
        validation::validate_non_empty_string("marketplace.api_key", &self.marketplace.api_key)?;
        validation::validate_resolved("marketplace.api_key", &self.marketplace.api_key)?;

        if let Some(timeout) = self.marketplace.timeout_seconds {
            validation::validate_range("marketplace.timeout_seconds", timeout, 1, 300)?;
        }

        if let Some(delivery) = &self.delivery {
            if let Some(page_size) = delivery.page_size {
                validation::validate_positive_number("delivery.page_size", page_size, 1)?;
            }
            if let Some(batch_size) = delivery.batch_size {
                validation::validate_positive_number("delivery.batch_size", batch_size, 1)?;
            }
        }

        for (tier, seeds) in &self.tiers {
            for seed in seeds {
                validation::validate_non_empty_string(&format!("tiers.{}", tier), seed)?;
            }
        }

        if let Some(discord) = &self.discord {
            if let Some(webhook) = &discord.webhook_url {
                validation::validate_resolved("discord.webhook_url", webhook)?;
                validation::validate_url("discord.webhook_url", webhook)?;
            }
            if let Some(api_base) = &discord.api_base {
                validation::validate_url("discord.api_base", api_base)?;
            }
        }

        Ok(())
    }

    pub fn api_endpoint(&self) -> &str {
        &self.marketplace.endpoint
    }

    pub fn api_key(&self) -> &str {
        &self.marketplace.api_key
    }

    pub fn item_url_base(&self) -> &str {
        self.marketplace
            .item_url_base
            .as_deref()
            .unwrap_or(DEFAULT_ITEM_URL_BASE)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.marketplace
                .timeout_seconds
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        )
    }

    /// Seeds for a tier in table order; empty when the tier is unknown.
    pub fn tier_seeds(&self, tier: &str) -> &[String] {
        self.tiers.get(tier).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn page_size(&self) -> usize {
        self.delivery
            .as_ref()
            .and_then(|d| d.page_size)
            .unwrap_or(crate::core::paginator::DEFAULT_PAGE_SIZE)
    }

    pub fn throttle_policy(&self) -> ThrottlePolicy {
        let defaults = ThrottlePolicy::default();
        match &self.delivery {
            Some(delivery) => ThrottlePolicy {
                batch_size: delivery.batch_size.unwrap_or(defaults.batch_size),
                delay: delivery
                    .pause_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.delay),
            },
            None => defaults,
        }
    }

    /// Configured families replace the built-in table entirely.
    pub fn phase_registry(&self) -> PhaseRegistry {
        match &self.phased_families {
            Some(families) => PhaseRegistry::from_families(families.clone()),
            None => PhaseRegistry::default(),
        }
    }

    pub fn discord(&self) -> Result<&DiscordConfig> {
        self.discord
            .as_ref()
            .ok_or_else(|| ScoutError::MissingConfigError {
                field: "discord".to_string(),
            })
    }
}

impl DiscordConfig {
    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(DEFAULT_DISCORD_API_BASE)
    }
}

impl Validate for BotConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
