//! Configuration APIs for hashtab
//!
//! Tables are configured with a [`HashTableConfig`]: starting capacity, the
//! load factor that triggers growth, and whether growth is allowed at all.
//! The defaults describe a fixed-capacity table that never rehashes.
//!
//! # Preset Configurations
//!
//! ```rust
//! use hashtab::config::{Config, HashTableConfig};
//!
//! // Fixed capacity, no growth
//! let config = HashTableConfig::fixed_preset();
//! assert!(!config.auto_grow);
//!
//! // Rehash into a larger prime capacity past a 0.7 load factor
//! let config = HashTableConfig::growable_preset();
//! assert!(config.auto_grow);
//! ```
//!
//! # Environment Initialization
//!
//! ```rust
//! use hashtab::config::{Config, HashTableConfig};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads HASHTAB_CAPACITY, HASHTAB_MAX_LOAD_FACTOR and HASHTAB_AUTO_GROW
//! let config = HashTableConfig::from_env()?;
//!
//! // Same variables under a custom prefix
//! let config = HashTableConfig::from_env_with_prefix("MYAPP_")?;
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use std::env;
use std::fmt;
use std::path::Path;

pub mod hash_table;


pub use hash_table::HashTableConfig;

/// Prefix of the environment variables read by [`Config::from_env`]
pub const DEFAULT_ENV_PREFIX: &str = "HASHTAB_";

/// Common configuration trait providing validation, environment
/// initialization, presets and file persistence.
pub trait Config: Clone + fmt::Debug {
    /// Validate the configuration for correctness and consistency.
    fn validate(&self) -> Result<()>;

    /// Initialize configuration from environment variables with the
    /// `HASHTAB_` prefix.
    fn from_env() -> Result<Self>
    where
        Self: Default,
    {
        Self::from_env_with_prefix(DEFAULT_ENV_PREFIX)
    }

    /// Initialize configuration from environment variables with a custom
    /// prefix. Unset or unparsable variables keep their default value.
    fn from_env_with_prefix(prefix: &str) -> Result<Self>
    where
        Self: Default;

    /// Fixed-capacity preset: the table never rehashes.
    fn fixed_preset() -> Self;

    /// Growable preset: the table rehashes once the load factor is exceeded.
    fn growable_preset() -> Self;

    /// Sparse preset: larger tables kept at a low load factor, trading
    /// memory for shorter probe runs.
    fn sparse_preset() -> Self;

    /// Save configuration to a file as pretty JSON.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Load and validate a configuration from a JSON file.
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

/// Parse an environment variable, falling back to `default` when it is
/// unset or does not parse.
pub fn parse_env_var<T>(var_name: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    env::var(var_name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Parse a boolean environment variable.
///
/// Accepts "true", "1", "yes", "on" (case-insensitive) as true and
/// everything else as false.
pub fn parse_env_bool(var_name: &str, default: bool) -> bool {
    env::var(var_name)
        .ok()
        .map(|s| {
            let s = s.trim().to_lowercase();
            matches!(s.as_str(), "true" | "1" | "yes" | "on")
        })
        .unwrap_or(default)
}
