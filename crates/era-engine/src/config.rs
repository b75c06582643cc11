//! Engine configuration, loadable from TOML.
//!
//! Every field has a default, so an empty file is a valid configuration:
//!
//! ```toml
//! namespace = "era-tycoon"
//! slot_count = 5
//! tick_interval_ms = 100
//! autosave_interval_ms = 10000
//! feedback_capacity = 50
//! max_ticks_per_advance = 600
//! seed = 42
//! ```

use std::path::{Path, PathBuf};

use era_save::StorageLayout;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Prefix of every storage key.
    pub namespace: String,
    pub slot_count: u32,
    /// Period of the production tick.
    pub tick_interval_ms: u64,
    pub autosave_interval_ms: u64,
    /// Events kept before the oldest are dropped.
    pub feedback_capacity: usize,
    /// Ticks run one by one in a single `advance`; any further elapsed
    /// ticks are applied as one combined step.
    pub max_ticks_per_advance: u64,
    /// Recruitment RNG seed. Derived from the clock when absent.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            namespace: StorageLayout::DEFAULT_NAMESPACE.to_string(),
            slot_count: StorageLayout::DEFAULT_SLOT_COUNT,
            tick_interval_ms: 100,
            autosave_interval_ms: 10_000,
            feedback_capacity: 50,
            max_ticks_per_advance: 600,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace.is_empty() {
            return Err(ConfigError::Invalid("namespace must not be empty".into()));
        }
        if self.slot_count == 0 {
            return Err(ConfigError::Invalid("slot_count must be at least 1".into()));
        }
        if self.tick_interval_ms == 0 || self.autosave_interval_ms == 0 {
            return Err(ConfigError::Invalid("intervals must be positive".into()));
        }
        if self.max_ticks_per_advance == 0 {
            return Err(ConfigError::Invalid(
                "max_ticks_per_advance must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Storage keys for this configuration.
    pub fn layout(&self) -> StorageLayout {
        StorageLayout::new(self.namespace.clone(), self.slot_count)
    }

    /// Fraction of a second covered by one tick.
    pub fn tick_seconds(&self) -> f64 {
        self.tick_interval_ms as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn partial_file_overrides_fields() {
        let c = EngineConfig::from_toml_str("slot_count = 3\nseed = 9\nnamespace = \"demo\"").unwrap();
        assert_eq!(c.slot_count, 3);
        assert_eq!(c.seed, Some(9));
        assert_eq!(c.tick_interval_ms, 100);
        assert_eq!(c.layout().slot_key(2), "demo-v15-slot-2");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            EngineConfig::from_toml_str("slot_count = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("tick_interval_ms = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("max_ticks_per_advance = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("slot_count = \"five\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        std::fs::write(&path, "autosave_interval_ms = 500\n").unwrap();
        assert_eq!(EngineConfig::load(&path).unwrap().autosave_interval_ms, 500);
        assert!(matches!(
            EngineConfig::load(&dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn tick_seconds() {
        assert_eq!(EngineConfig::default().tick_seconds(), 0.1);
    }
}
