//! CLI configuration.

use anyhow::{Context, Result};
use roswell_commerce::checkout::DEFAULT_DESTINATION;
use roswell_commerce::search::DEFAULT_PER_PAGE;
use serde::{Deserialize, Serialize};

/// CLI configuration file (`roswell.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Where products, images and the cart live.
    #[serde(default)]
    pub store: StoreConfig,

    /// Order handoff settings.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Admin account.
    #[serde(default)]
    pub admin: AdminConfig,

    /// Catalog browsing defaults.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }
}

/// Data directory settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Data directory, relative to the config file.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Prefix of public image URLs.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

fn default_data_dir() -> String {
    ".roswell".to_string()
}

fn default_public_base_url() -> String {
    "/images".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            public_base_url: default_public_base_url(),
        }
    }
}

/// Checkout settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutConfig {
    /// Store phone number for the order chat, digits only.
    #[serde(default = "default_destination")]
    pub destination: String,
}

fn default_destination() -> String {
    DEFAULT_DESTINATION.to_string()
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            destination: default_destination(),
        }
    }
}

/// Admin account settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminConfig {
    #[serde(default = "default_admin_username")]
    pub username: String,

    /// Argon2 PHC hash from `roswell admin hash-password`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,

    /// Key for signing session tokens. Defaults to the password hash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_secret: Option<String>,

    /// Session lifetime in hours.
    #[serde(default = "default_session_hours")]
    pub session_hours: i64,
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_session_hours() -> i64 {
    12
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password_hash: None,
            session_secret: None,
            session_hours: default_session_hours(),
        }
    }
}

/// Catalog browsing settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Products per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PER_PAGE
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Generate a starter config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Roswell storefront configuration

[store]
data_dir = "{data_dir}"
public_base_url = "{base_url}"

[checkout]
destination = "{destination}"

[admin]
username = "admin"
# password_hash = "$argon2id$..."   # roswell admin hash-password
# session_secret = "..."            # signs session tokens; defaults to the hash
session_hours = 12

[catalog]
page_size = {page_size}
"#,
        data_dir = default_data_dir(),
        base_url = default_public_base_url(),
        destination = DEFAULT_DESTINATION,
        page_size = DEFAULT_PER_PAGE,
    )
}
