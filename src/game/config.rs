use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Timing and randomness settings for a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Pause between ticks, not counting the time spent scanning the matrix
    pub tick_ms: u32,
    /// How long each lit LED is held during a scan
    pub persistence_ms: u32,
    /// How long the all-on frame is held after a collision
    pub flash_ms: u32,
    /// Random draws tried before food placement enumerates free cells
    pub max_food_attempts: u32,
    /// Seed for food placement; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_ms: 500,
            persistence_ms: 1,
            flash_ms: 1000,
            max_food_attempts: 64,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Default configuration with a fixed food seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Read a JSON config file. Missing fields take their default values.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize config")?;
        config
            .validate()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid config in {:?}", path))?;
        Ok(config)
    }

    /// Check that every duration and the retry bound are usable
    pub fn validate(&self) -> Result<(), String> {
        if self.tick_ms == 0 {
            return Err("tick_ms must be at least 1".to_string());
        }

        if self.persistence_ms == 0 {
            return Err("persistence_ms must be at least 1".to_string());
        }

        if self.flash_ms == 0 {
            return Err("flash_ms must be at least 1".to_string());
        }

        if self.max_food_attempts == 0 {
            return Err("max_food_attempts must be at least 1".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.tick_ms, 500);
        assert_eq!(config.persistence_ms, 1);
        assert_eq!(config.flash_ms, 1000);
        assert_eq!(config.max_food_attempts, 64);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_seeded_config() {
        let config = GameConfig::seeded(9);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.tick_ms, 500);
    }

    #[test]
    fn test_validation_zero_durations() {
        let mut config = GameConfig::default();
        config.tick_ms = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.persistence_ms = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.flash_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_attempts() {
        let mut config = GameConfig::default();
        config.max_food_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake.json");
        std::fs::write(&path, r#"{ "tick_ms": 250, "seed": 5 }"#).unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.tick_ms, 250);
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.flash_ms, 1000);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake.json");
        std::fs::write(&path, r#"{ "flash_ms": 0 }"#).unwrap();

        assert!(GameConfig::load(&path).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(GameConfig::load(&dir.path().join("absent.json")).is_err());
    }
}
