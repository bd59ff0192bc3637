//! Configuration file handling.
//!
//! The configuration file is stored at `$EXPENSES_HOME/config.json` and holds the few settings the
//! app has: which storage key the transaction list lives under and which currency symbol amounts
//! are printed with. Transactions themselves live in `$EXPENSES_HOME/store`.

use crate::storage::FileStore;
use crate::store::{TransactionStore, DEFAULT_STORAGE_KEY};
use crate::{fs, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "expenses";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const STORE_DIR: &str = "store";
const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$EXPENSES_HOME` and from there it loads `$EXPENSES_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    store_dir: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the data directory, its store subdirectory and an initial `config.json` with
    /// default settings. An existing `config.json` is left untouched and loaded instead.
    ///
    /// # Errors
    /// - Returns an error if any file operations fail.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        fs::create_dir_all(&maybe_relative)
            .context("Unable to create the expenses home directory")?;
        let root = fs::canonicalize(&maybe_relative)?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = if config_path.is_file() {
            ConfigFile::load(&config_path)?
        } else {
            let config_file = ConfigFile::default();
            config_file.save(&config_path)?;
            config_file
        };

        let store_dir = root.join(STORE_DIR);
        fs::create_dir_all(&store_dir)?;

        Ok(Self {
            root,
            config_path,
            store_dir,
            config_file,
        })
    }

    /// This will
    /// - validate that the home directory and the config file exist
    /// - load the config file
    /// - validate that the store directory exists
    /// - return the loaded configuration object
    pub fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = home.into();
        if !maybe_relative.is_dir() {
            bail!(
                "The expenses home directory '{}' is missing, run 'expenses init' to create it",
                maybe_relative.display()
            )
        }
        let root = fs::canonicalize(&maybe_relative)?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}', run 'expenses init' to create it",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path)?;

        let store_dir = root.join(STORE_DIR);
        if !store_dir.is_dir() {
            bail!("The store directory is missing '{}'", store_dir.display())
        }

        Ok(Self {
            root,
            config_path,
            store_dir,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    pub fn storage_key(&self) -> &str {
        &self.config_file.storage_key
    }

    pub fn currency_symbol(&self) -> &str {
        &self.config_file.currency_symbol
    }

    /// Opens the file-backed transaction store described by this configuration.
    pub fn open_store(&self) -> Result<TransactionStore<FileStore>> {
        let storage = FileStore::open(&self.store_dir)?;
        // Surface a bad key here rather than as a silently empty store.
        let _ = storage.path(self.storage_key())?;
        Ok(TransactionStore::load_key(storage, self.storage_key()))
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "expenses",
///   "config_version": 1,
///   "storage_key": "expenses",
///   "currency_symbol": "$"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "expenses"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// The key the transaction list is stored under
    #[serde(default = "default_storage_key")]
    storage_key: String,

    /// Printed in front of amounts
    #[serde(default = "default_currency_symbol")]
    currency_symbol: String,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            storage_key: default_storage_key(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.config_version <= CONFIG_VERSION,
            "Config file version {} is newer than this program supports ({})",
            config.config_version,
            CONFIG_VERSION
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        fs::write_all(p, data).context("Unable to write config file")
    }
}
