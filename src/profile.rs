use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

use crate::formula::{FitnessWeights, PopulationModel};
use crate::optimizer::{
    OptimizerInputs, TaxPolicy, DEFAULT_BASE_LAND, DEFAULT_INFRA, DEFAULT_TECH,
};

const MAX_WEIGHT: f64 = 2.0;
const MIN_HAPPINESS_FACTOR: f64 = 1.0;

fn default_name() -> String {
    "default".to_string()
}

fn default_infra() -> f64 {
    DEFAULT_INFRA
}

fn default_tech() -> f64 {
    DEFAULT_TECH
}

fn default_base_land() -> f64 {
    DEFAULT_BASE_LAND
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("profile validation error: {0}")]
    Validation(String),
}

/// A saved optimizer run: nation inputs plus tuning knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_infra")]
    pub infra: f64,
    #[serde(default = "default_tech")]
    pub tech: f64,
    #[serde(default = "default_base_land")]
    pub base_land: f64,
    /// `base_pop` and `happiness_factor` sit at the top level of the file.
    #[serde(flatten)]
    pub population: PopulationModel,
    #[serde(default)]
    pub weights: FitnessWeights,
    #[serde(default)]
    pub tax_policy: TaxPolicy,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: default_name(),
            infra: default_infra(),
            tech: default_tech(),
            base_land: default_base_land(),
            population: PopulationModel::default(),
            weights: FitnessWeights::default(),
            tax_policy: TaxPolicy::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Profile {
    /// Checks the input ranges the game itself allows.
    pub fn validate(&self) -> Result<(), ProfileError> {
        for (label, value) in [
            ("infra", self.infra),
            ("tech", self.tech),
            ("base_land", self.base_land),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(ProfileError::Validation(format!(
                    "{label} must be non-negative, got {value}"
                )));
            }
        }

        for (label, value) in [
            ("population weight", self.weights.population),
            ("land weight", self.weights.land),
        ] {
            if !(0.0..=MAX_WEIGHT).contains(&value) {
                return Err(ProfileError::Validation(format!(
                    "{label} must be within 0..={MAX_WEIGHT}, got {value}"
                )));
            }
        }

        let happiness_factor = self.population.happiness_factor;
        if happiness_factor.is_nan() || happiness_factor < MIN_HAPPINESS_FACTOR {
            return Err(ProfileError::Validation(format!(
                "happiness_factor must be at least {MIN_HAPPINESS_FACTOR}, got {happiness_factor}"
            )));
        }

        if self.tax_policy.is_empty() {
            return Err(ProfileError::Validation(format!(
                "tax range {:?} contains no rates",
                self.tax_policy.rates()
            )));
        }

        Ok(())
    }

    pub fn optimizer_inputs(&self) -> OptimizerInputs {
        OptimizerInputs {
            infra: self.infra,
            tech: self.tech,
            base_land: self.base_land,
            weights: self.weights,
            population: self.population,
            tax_policy: self.tax_policy,
        }
    }
}

pub struct ProfileLoader {
    base_dir: PathBuf,
}

impl ProfileLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Profile> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read profile file {}", path.display()))?;
        let profile: Profile = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        profile
            .validate()
            .with_context(|| format!("Invalid profile {}", path.display()))?;
        Ok(profile)
    }
}
