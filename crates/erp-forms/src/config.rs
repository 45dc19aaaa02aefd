//! # Forms Configuration
//!
//! Display and default-value settings for the sales forms.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ERP_CURRENCY=USD                                                   │
//! │     ERP_PAYMENT_TERMS=net_15                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/erp/forms.toml (Linux)                                   │
//! │     ~/Library/Application Support/com.custom-erp.erp/forms.toml (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     PKR, net_30                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # forms.toml
//! [display]
//! currency_code = "PKR"
//!
//! [invoice]
//! default_payment_terms = "net_30"
//! ```

use erp_core::money::Currency;
use erp_core::{PaymentTerms, DEFAULT_CURRENCY_CODE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{FormError, FormResult};

/// File name inside the project config directory.
pub const CONFIG_FILE_NAME: &str = "forms.toml";

// =============================================================================
// Sections
// =============================================================================

/// How amounts are shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// ISO code passed to `format_currency`. Codes outside the supported
    /// list are allowed and render with the code as symbol.
    #[serde(default = "default_currency_code")]
    pub currency_code: String,
}

fn default_currency_code() -> String {
    DEFAULT_CURRENCY_CODE.to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_code: default_currency_code(),
        }
    }
}

/// Values a new invoice starts with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDefaults {
    #[serde(default)]
    pub default_payment_terms: PaymentTerms,
}

// =============================================================================
// Forms Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormsConfig {
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub invoice: InvoiceDefaults,
}

impl FormsConfig {
    /// Loads configuration from file and environment.
    ///
    /// `config_path` of `None` means the per-user default location; a
    /// missing file is not an error.
    pub fn load(config_path: Option<PathBuf>) -> FormResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading forms config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Like [`load`](Self::load), but falls back to defaults on any error.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load forms config, using defaults");
            Self::default()
        })
    }

    pub fn from_toml(contents: &str) -> FormResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Writes the config as pretty TOML, creating the parent directory.
    pub fn save(&self, config_path: Option<PathBuf>) -> FormResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| FormError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Forms config saved");
        Ok(())
    }

    /// Currency codes must look like ISO 4217: three uppercase letters.
    pub fn validate(&self) -> FormResult<()> {
        let code = &self.display.currency_code;
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(FormError::InvalidConfig(format!(
                "currency_code must be three uppercase letters, got: {:?}",
                code
            )));
        }

        if Currency::from_code(code).is_none() {
            debug!(currency = %code, "Unsupported currency, code will be shown as symbol");
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(code) = std::env::var("ERP_CURRENCY") {
            debug!(currency = %code, "Overriding currency from environment");
            self.display.currency_code = code.trim().to_uppercase();
        }

        if let Ok(terms) = std::env::var("ERP_PAYMENT_TERMS") {
            match terms.parse::<PaymentTerms>() {
                Ok(parsed) => {
                    debug!(terms = %parsed, "Overriding payment terms from environment");
                    self.invoice.default_payment_terms = parsed;
                }
                Err(e) => warn!(terms = %terms, error = %e, "Unknown payment terms in environment"),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "custom-erp", "erp")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn currency_code(&self) -> &str {
        &self.display.currency_code
    }

    pub fn default_payment_terms(&self) -> PaymentTerms {
        self.invoice.default_payment_terms
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
