//! # Configuration
//!
//! Pokedex configuration is managed by [`confique`], which handles layered
//! loading from environment variables, a TOML file and compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `POKEDEX_BIND`, `POKEDEX_DATA_FILE`, etc.
//! 2. **Config file**: `--config <path>`, else `pokedex.toml` in the OS config
//!    directory (via the `directories` crate). A missing file is skipped.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! Command-line flags are applied on top by the CLI.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `bind` | `127.0.0.1:4000` | Address `pokedex serve` listens on |
//! | `data_file` | none | JSON file holding records; in-memory when absent |
//! | `default_page_size` | `5` | Page size when a request omits `pageSize` |
//! | `server_url` | `http://127.0.0.1:4000` | Server the client commands talk to |
//! | `request_timeout_secs` | `10` | Client request timeout |

use crate::error::{PokedexError, Result};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "pokedex.toml";

/// Configuration for pokedex, stored in `pokedex.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PokedexConfig {
    /// Address the HTTP server binds to.
    #[config(env = "POKEDEX_BIND", default = "127.0.0.1:4000")]
    pub bind: String,

    /// JSON file records are persisted to. Records are kept in memory only
    /// when absent.
    #[config(env = "POKEDEX_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Page size used when a listing request does not give one.
    #[config(env = "POKEDEX_DEFAULT_PAGE_SIZE", default = 5)]
    pub default_page_size: usize,

    /// Base URL of the server used by the client commands.
    #[config(env = "POKEDEX_SERVER_URL", default = "http://127.0.0.1:4000")]
    pub server_url: String,

    /// Client request timeout, in seconds.
    #[config(env = "POKEDEX_REQUEST_TIMEOUT_SECS", default = 10)]
    pub request_timeout_secs: u64,
}

impl Default for PokedexConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:4000".to_string(),
            data_file: None,
            default_page_size: 5,
            server_url: "http://127.0.0.1:4000".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl PokedexConfig {
    /// Loads the configuration, reading `file` when given and the default
    /// config location otherwise.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let path = file.map(Path::to_path_buf).or_else(default_config_path);
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        builder
            .load()
            .map_err(|e| PokedexError::Config(e.to_string()))
    }

    /// The default page size as a listing request parameter.
    pub fn page_size(&self) -> i64 {
        i64::try_from(self.default_page_size.max(1)).unwrap_or(i64::MAX)
    }
}

/// `pokedex.toml` in the OS-appropriate config directory.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "pokedex")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
