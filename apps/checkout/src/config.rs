//! Checkout configuration module.
//!
//! Configuration is layered with the `config` crate:
//!
//! 1. `THAIFOOD_*` environment variables (`__` between nested keys, e.g.
//!    `THAIFOOD_BILLING__VAT_PCT=7`)
//! 2. TOML file named by `THAIFOOD_CONFIG`, else `thaifood.toml` if present
//! 3. Built-in defaults
//!
//! ```toml
//! [billing]
//! service_charge_pct = 10
//! vat_pct = 7
//!
//! [menu]
//! fallback_image = "https://cdn.example.com/no-photo.png"
//!
//! [[menu.category_rules.rules]]
//! keywords = ["โกโก้"]
//! category = "drink"
//! ```

use std::env;
use std::path::PathBuf;

use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use thaifood_core::category::{CategoryResolver, CategoryRules};
use thaifood_core::normalize::MenuMapper;
use thaifood_core::types::PricingOptions;
use thaifood_core::validation::{validate_discount_fixed, validate_image_url, validate_percentage};
use thaifood_core::{CoreError, ValidationError, DEFAULT_IMAGE_URL};

/// Environment variable holding the config file path.
pub const CONFIG_PATH_ENV: &str = "THAIFOOD_CONFIG";

/// Config file read from the working directory when `THAIFOOD_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "thaifood.toml";

const ENV_PREFIX: &str = "THAIFOOD";

/// Checkout configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    pub billing: BillingConfig,
    pub menu: MenuConfig,
}

/// Default pricing, in percent and major units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    pub discount_pct: f64,
    pub discount_fixed: f64,
    pub service_charge_pct: f64,
    pub vat_pct: f64,
}

impl Default for BillingConfig {
    fn default() -> Self {
        BillingConfig {
            discount_pct: 0.0,
            discount_fixed: 0.0,
            service_charge_pct: 10.0,
            vat_pct: 7.0,
        }
    }
}

impl BillingConfig {
    /// Checks percentages are within 0..=100 and the fixed discount is not
    /// negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_percentage("billing.discount_pct", self.discount_pct)?;
        validate_discount_fixed(self.discount_fixed)?;
        validate_percentage("billing.service_charge_pct", self.service_charge_pct)?;
        validate_percentage("billing.vat_pct", self.vat_pct)?;
        Ok(())
    }

    pub fn pricing_options(&self) -> PricingOptions {
        PricingOptions::from_percentages(
            self.discount_pct,
            self.discount_fixed,
            self.service_charge_pct,
            self.vat_pct,
        )
    }
}

/// Menu normalization settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Image used for rows without a usable URL.
    pub fallback_image: String,

    /// Replacement category tables; the built-in tables when absent.
    pub category_rules: Option<CategoryRules>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        MenuConfig {
            fallback_image: DEFAULT_IMAGE_URL.to_string(),
            category_rules: None,
        }
    }
}

impl CheckoutConfig {
    /// Load configuration from the environment and the optional TOML file.
    pub fn load() -> Result<Self, ConfigError> {
        let (path, required) = match env::var(CONFIG_PATH_ENV) {
            Ok(path) => (PathBuf::from(path), true),
            Err(_) => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let file = File::from(path.as_path())
            .format(FileFormat::Toml)
            .required(required);

        let config = Self::from_sources(file, environment())?;
        tracing::debug!(path = %path.display(), billing = ?config.billing, "Configuration loaded");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text alone.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Self::finish(settings)
    }

    fn from_sources<F>(file: F, env: Environment) -> Result<Self, ConfigError>
    where
        F: ::config::Source + Send + Sync + 'static,
    {
        let settings = Config::builder().add_source(file).add_source(env).build()?;
        Self::finish(settings)
    }

    fn finish(settings: Config) -> Result<Self, ConfigError> {
        let config: CheckoutConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.billing.validate()?;

        if self.menu.fallback_image.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "menu.fallback_image".to_string(),
            }
            .into());
        }
        validate_image_url(&self.menu.fallback_image)?;

        if let Some(rules) = &self.menu.category_rules {
            rules.validate()?;
        }

        Ok(())
    }

    pub fn pricing_options(&self) -> PricingOptions {
        self.billing.pricing_options()
    }

    /// Builds the menu mapper, compiling custom category tables if any.
    pub fn mapper(&self) -> Result<MenuMapper, ConfigError> {
        let resolver = match &self.menu.category_rules {
            Some(rules) => CategoryResolver::from_rules(rules.clone())?,
            None => CategoryResolver::builtin().clone(),
        };
        Ok(MenuMapper::new(resolver, self.menu.fallback_image.clone()))
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid value: {0}")]
    InvalidValue(#[from] ValidationError),

    #[error("Invalid category rules: {0}")]
    InvalidRules(#[from] CoreError),
}
