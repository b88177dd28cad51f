//! Hash table sizing and growth configuration.

use super::{parse_env_bool, parse_env_var, Config};
use crate::error::{HashTableError, Result};
use crate::hash_map::sizing::DEFAULT_MAX_LOAD_FACTOR;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Capacity used when none is given
pub const DEFAULT_CAPACITY: usize = 7;

/// Sizing and growth settings shared by both table kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashTableConfig {
    /// Buckets (chaining) or slots (probing) allocated at construction
    pub initial_capacity: usize,
    /// Load factor above which a growable table rehashes
    pub max_load_factor: f64,
    /// Rehash into a larger prime capacity instead of staying fixed
    pub auto_grow: bool,
}

impl Default for HashTableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            auto_grow: false,
        }
    }
}

impl HashTableConfig {
    /// Fixed-capacity configuration with `capacity` buckets or slots
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            initial_capacity: capacity,
            ..Self::default()
        }
    }

    /// Set the initial capacity
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set the load factor that triggers growth
    pub fn max_load_factor(mut self, load_factor: f64) -> Self {
        self.max_load_factor = load_factor;
        self
    }

    /// Enable or disable growth
    pub fn auto_grow(mut self, enabled: bool) -> Self {
        self.auto_grow = enabled;
        self
    }
}

impl Config for HashTableConfig {
    fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(HashTableError::configuration(
                "initial_capacity must be greater than 0",
            ));
        }
        if !self.max_load_factor.is_finite()
            || self.max_load_factor <= 0.0
            || self.max_load_factor > 1.0
        {
            return Err(HashTableError::configuration(format!(
                "max_load_factor must be in (0.0, 1.0], got {}",
                self.max_load_factor
            )));
        }
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.initial_capacity =
            parse_env_var(&format!("{}CAPACITY", prefix), config.initial_capacity);
        config.max_load_factor =
            parse_env_var(&format!("{}MAX_LOAD_FACTOR", prefix), config.max_load_factor);
        config.auto_grow = parse_env_bool(&format!("{}AUTO_GROW", prefix), config.auto_grow);
        config.validate()?;
        Ok(config)
    }

    fn fixed_preset() -> Self {
        Self::default()
    }

    fn growable_preset() -> Self {
        Self {
            initial_capacity: 17,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            auto_grow: true,
        }
    }

    fn sparse_preset() -> Self {
        Self {
            initial_capacity: 37,
            max_load_factor: 0.5,
            auto_grow: true,
        }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            HashTableError::configuration(format!("Failed to serialize hash table config: {}", e))
        })?;
        std::fs::write(path, serialized).map_err(|e| {
            HashTableError::configuration(format!("Failed to write hash table config file: {}", e))
        })?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HashTableError::configuration(format!("Failed to read hash table config file: {}", e))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            HashTableError::configuration(format!("Failed to parse hash table config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}
