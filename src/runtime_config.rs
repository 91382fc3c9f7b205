//! # Runtime Configuration Module
//!
//! Environment-variable configuration for registries built with
//! [`Registry::from_env`](crate::registry::Registry::from_env), including the
//! process-wide [`global()`](crate::registry::global) registry.
//!
//! ## Environment Variables
//!
//! ### `REPRESENT_SPEC_CACHE`
//!
//! Set to `off`, `false` or `0` to disable the Accept header cache. Every
//! match then parses its header. Default: enabled.
//!
//! ### `REPRESENT_SPEC_CACHE_SIZE`
//!
//! Maximum number of distinct Accept headers kept parsed. Invalid values
//! fall back to the default. Default: `256`.
//!
//! ## Usage
//!
//! ```rust
//! use represent::runtime_config::RegistryConfig;
//!
//! let config = RegistryConfig::from_env();
//! println!("spec cache capacity: {}", config.effective_cache_capacity());
//! ```

use crate::cache::DEFAULT_SPEC_CACHE_CAPACITY;
use std::env;

/// Registry tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Whether parsed Accept headers are cached
    pub spec_cache_enabled: bool,
    /// Maximum cached headers when enabled
    pub spec_cache_capacity: usize,
}

impl RegistryConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let spec_cache_enabled = match env::var("REPRESENT_SPEC_CACHE") {
            Ok(val) => !matches!(val.trim().to_lowercase().as_str(), "off" | "false" | "0"),
            Err(_) => true,
        };
        let spec_cache_capacity = env::var("REPRESENT_SPEC_CACHE_SIZE")
            .ok()
            .and_then(|val| val.trim().parse().ok())
            .unwrap_or(DEFAULT_SPEC_CACHE_CAPACITY);
        RegistryConfig {
            spec_cache_enabled,
            spec_cache_capacity,
        }
    }

    /// Capacity actually used: zero when the cache is disabled.
    #[must_use]
    pub fn effective_cache_capacity(&self) -> usize {
        if self.spec_cache_enabled {
            self.spec_cache_capacity
        } else {
            0
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            spec_cache_enabled: true,
            spec_cache_capacity: DEFAULT_SPEC_CACHE_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();
        assert!(config.spec_cache_enabled);
        assert_eq!(config.effective_cache_capacity(), DEFAULT_SPEC_CACHE_CAPACITY);
    }

    #[test]
    fn test_disabled_cache_has_no_capacity() {
        let config = RegistryConfig {
            spec_cache_enabled: false,
            spec_cache_capacity: 64,
        };
        assert_eq!(config.effective_cache_capacity(), 0);
    }
}
