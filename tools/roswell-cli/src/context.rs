//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use chrono::Duration;
use roswell_auth::{AdminGate, AdminSession, AuthError, CredentialGate};
use roswell_commerce::cart::Cart;
use roswell_commerce::CatalogStore;
use roswell_storage::{FileGateway, Layout};
use tracing::debug;

use crate::config::CliConfig;
use crate::output::Output;

const CONFIG_NAMES: [&str; 3] = ["roswell.toml", ".roswell.toml", "roswell.json"];
const CART_FILE: &str = "cart.json";
const SESSION_FILE: &str = "session.json";

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory relative paths in the config resolve against.
    pub base_dir: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, base_dir) = if let Some(path) = config_path {
            let config = CliConfig::load(path)?;
            let base = Path::new(path)
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| cwd.clone());
            (config, base)
        } else {
            Self::find_config(&cwd).unwrap_or_else(|| (CliConfig::default(), cwd.clone()))
        };

        Ok(Self {
            config,
            output,
            cwd,
            base_dir,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        debug!(path = %config_path.display(), "Using config file");
                        return Some((config, current));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Path of the config file commands write to.
    pub fn config_file(&self) -> PathBuf {
        CONFIG_NAMES
            .iter()
            .map(|name| self.base_dir.join(name))
            .find(|path| path.exists())
            .unwrap_or_else(|| self.cwd.join(CONFIG_NAMES[0]))
    }

    /// The data directory.
    pub fn data_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.store.data_dir)
    }

    /// Resolve a config path against the config file's directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.base_dir.join(path)
        }
    }

    /// Open the catalog and load every product.
    pub async fn catalog(&self) -> Result<CatalogStore<FileGateway>> {
        let layout = Layout::new(self.data_dir(), self.config.store.public_base_url.clone());
        let mut store = CatalogStore::new(Arc::new(FileGateway::new(layout)));
        store.refresh().await.context("Failed to load catalog")?;
        Ok(store)
    }

    /// Load the saved cart, or an empty one.
    pub fn load_cart(&self) -> Result<Cart> {
        let path = self.data_dir().join(CART_FILE);
        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse cart: {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Cart::new()),
            Err(e) => Err(e).with_context(|| format!("Failed to read cart: {}", path.display())),
        }
    }

    /// Save the cart.
    pub fn save_cart(&self, cart: &Cart) -> Result<()> {
        let path = self.data_dir().join(CART_FILE);
        write_json(&path, cart)
    }

    /// Build the admin gate from config.
    pub fn admin_gate(&self) -> Result<CredentialGate> {
        let Some(hash) = &self.config.admin.password_hash else {
            bail!("No admin password configured. Set admin.password_hash (see `roswell admin hash-password`).");
        };
        let mut gate = CredentialGate::new(self.config.admin.username.clone(), hash.clone())
            .context("Invalid admin.password_hash")?
            .with_session_duration(Duration::hours(self.config.admin.session_hours));
        if let Some(secret) = &self.config.admin.session_secret {
            gate = gate.with_signing_key(secret);
        }
        Ok(gate)
    }

    pub fn session_file(&self) -> PathBuf {
        self.data_dir().join(SESSION_FILE)
    }

    /// Save a session so later invocations stay logged in.
    pub fn save_session(&self, session: &AdminSession) -> Result<()> {
        write_json(&self.session_file(), session)
    }

    pub fn clear_session(&self) -> Result<()> {
        match std::fs::remove_file(self.session_file()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context("Failed to remove session file"),
        }
    }

    /// Load the saved session, if any.
    pub fn saved_session(&self) -> Result<Option<AdminSession>> {
        let path = self.session_file();
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(
                serde_json::from_str(&content).context("Failed to parse session file")?,
            )),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context("Failed to read session file"),
        }
    }

    /// Fail unless a live admin session is saved.
    pub async fn require_admin(&self) -> Result<AdminSession> {
        let gate = self.admin_gate()?;
        let Some(session) = self.saved_session()? else {
            bail!("Not logged in. Run `roswell admin login` first.");
        };

        match gate.restore(session.clone()) {
            Ok(()) => {}
            Err(AuthError::SessionExpired) => {
                bail!("Admin session expired. Run `roswell admin login` again.")
            }
            Err(AuthError::InvalidToken) => {
                bail!("Saved session is not valid. Run `roswell admin login` again.")
            }
            Err(e) => return Err(e).context("Saved session rejected"),
        }
        gate.validate(&session.token)
            .await
            .context("Saved session rejected")
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
