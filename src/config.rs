//! Configuration system for critter world simulations.
//!
//! Supports YAML configuration files with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::critter::Kind;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub world: WorldConfig,
    pub population: PopulationConfig,
    pub rules: RulesConfig,
    pub logging: LoggingConfig,
}

/// World/environment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Chance of each cell holding food at world creation (0.0 - 1.0)
    pub food_probability: f64,
}

/// Initial population per critter kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    pub grazers: usize,
    pub prowlers: usize,
    pub howlers: usize,
    pub sloths: usize,
}

impl PopulationConfig {
    pub fn count_for(&self, kind: Kind) -> usize {
        match kind {
            Kind::Grazer => self.grazers,
            Kind::Prowler => self.prowlers,
            Kind::Howler => self.howlers,
            Kind::Sloth => self.sloths,
        }
    }

    pub fn total(&self) -> usize {
        self.grazers + self.prowlers + self.howlers + self.sloths
    }
}

/// Turn-resolution rule periods
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Meals before a critter drops into a food coma
    pub coma_threshold: u32,
    /// Turns a food coma lasts
    pub sleep_duration: u32,
    /// Turns a mating pair gestates before offspring appear
    pub gestation_period: u32,
}

/// Logging and stats configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Turns between stats history snapshots
    pub stats_interval: u64,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            population: PopulationConfig::default(),
            rules: RulesConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 50,
            food_probability: 0.05,
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            grazers: 25,
            prowlers: 25,
            howlers: 25,
            sloths: 25,
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            coma_threshold: 2,
            sleep_duration: 20,
            gestation_period: 40,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 50,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.world.width == 0 || self.world.height == 0 {
            return Err("grid dimensions must be > 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.world.food_probability) {
            return Err("food_probability must be between 0.0 and 1.0".to_string());
        }
        if self.population.total() == 0 {
            return Err("initial population must be > 0".to_string());
        }
        if self.population.total() > self.world.width * self.world.height {
            return Err("initial population cannot exceed the cell count".to_string());
        }
        if self.rules.coma_threshold == 0 {
            return Err("coma_threshold must be > 0".to_string());
        }
        if self.rules.sleep_duration == 0 || self.rules.gestation_period == 0 {
            return Err("sleep_duration and gestation_period must be > 0".to_string());
        }
        if self.logging.stats_interval == 0 {
            return Err("stats_interval must be > 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let loaded: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.world.width, loaded.world.width);
        assert_eq!(config.rules.gestation_period, loaded.rules.gestation_period);
    }

    #[test]
    fn test_overcrowded_config_rejected() {
        let mut config = Config::default();
        config.world.width = 5;
        config.world.height = 5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_population_count_for() {
        let population = PopulationConfig {
            grazers: 1,
            prowlers: 2,
            howlers: 3,
            sloths: 4,
        };
        assert_eq!(population.count_for(Kind::Grazer), 1);
        assert_eq!(population.count_for(Kind::Sloth), 4);
        assert_eq!(population.total(), 10);
    }
}
