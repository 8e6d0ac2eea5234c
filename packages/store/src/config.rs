//! # Marketplace configuration: `inspectnow.toml`
//!
//! Tunables for the data layer, read from a TOML file that the UI embeds at
//! build time (filename: [`MarketConfig::filename`] = `"inspectnow.toml"`).
//!
//! ## Structure
//!
//! ```toml
//! [storage]
//! key_prefix = "inspect_now"     # prefix of every localStorage key
//!
//! [seed]
//! demo_accounts = true           # seed demo client + inspector on first run
//! demo_password = "DemoPass123"
//!
//! [availability]
//! horizon_days = 90              # default end of a recurring slot series
//!
//! [inspector_defaults]
//! service_area = "San Francisco Bay Area"
//! base_price = 400
//! location = "San Francisco, CA"
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`MarketConfig`] | Top-level config with TOML (de)serialisation and the canonical filename. |
//! | [`StorageConfig`] | Key prefix for the partitioned documents. |
//! | [`SeedConfig`] | Demo account seeding. |
//! | [`AvailabilityConfig`] | Recurrence horizon for generated time slots. |
//! | [`InspectorDefaults`] | Starting values for a newly signed-up inspector's profile. |
//!
//! Every field has a serde default, so a missing or empty file is the
//! default configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `inspectnow.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub availability: AvailabilityConfig,
    #[serde(default)]
    pub inspector_defaults: InspectorDefaults,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

fn default_key_prefix() -> String {
    "inspect_now".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key_prefix: default_key_prefix(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "default_true")]
    pub demo_accounts: bool,
    #[serde(default = "default_demo_password")]
    pub demo_password: String,
}

fn default_true() -> bool {
    true
}

fn default_demo_password() -> String {
    "DemoPass123".to_string()
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            demo_accounts: true,
            demo_password: default_demo_password(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityConfig {
    /// Days after the start date that an open-ended recurring series runs.
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
}

fn default_horizon_days() -> u32 {
    90
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InspectorDefaults {
    #[serde(default = "default_service_area")]
    pub service_area: String,
    #[serde(default = "default_base_price")]
    pub base_price: u32,
    #[serde(default = "default_location")]
    pub location: String,
}

fn default_service_area() -> String {
    "San Francisco Bay Area".to_string()
}

fn default_base_price() -> u32 {
    400
}

fn default_location() -> String {
    "San Francisco, CA".to_string()
}

impl Default for InspectorDefaults {
    fn default() -> Self {
        Self {
            service_area: default_service_area(),
            base_price: default_base_price(),
            location: default_location(),
        }
    }
}

impl MarketConfig {
    /// Builder method to use a different key prefix.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.storage.key_prefix = prefix.into();
        self
    }

    /// Builder method to turn demo seeding on or off.
    pub fn with_demo_accounts(mut self, enabled: bool) -> Self {
        self.seed.demo_accounts = enabled;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "inspectnow.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = MarketConfig::from_toml("").unwrap();
        assert_eq!(config, MarketConfig::default());
        assert_eq!(config.storage.key_prefix, "inspect_now");
        assert_eq!(config.availability.horizon_days, 90);
        assert_eq!(config.seed.demo_password, "DemoPass123");
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = MarketConfig::from_toml(
            r#"
            [inspector_defaults]
            base_price = 550

            [seed]
            demo_accounts = false
            "#,
        )
        .unwrap();

        assert_eq!(config.inspector_defaults.base_price, 550);
        assert_eq!(config.inspector_defaults.location, "San Francisco, CA");
        assert!(!config.seed.demo_accounts);
        assert_eq!(config.seed.demo_password, "DemoPass123");
    }

    #[test]
    fn test_to_toml_parses_back() {
        let config = MarketConfig::default()
            .with_key_prefix("test_prefix")
            .with_demo_accounts(false);
        let text = config.to_toml().unwrap();
        assert!(text.contains("key_prefix = \"test_prefix\""));
        assert_eq!(MarketConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_wrong_types() {
        assert!(MarketConfig::from_toml("[availability]\nhorizon_days = \"soon\"").is_err());
    }
}
