//! Population, land growth and fitness formulas.
//!
//! Everything here is pure arithmetic on `f64`. Inputs are taken at face
//! value; range checks belong to the profile layer.

use serde::{Deserialize, Serialize};

use crate::catalog::{Defcon, Government};

const TECH_BONUS_CAP_LEVEL: f64 = 200.0;
const TECH_BONUS_PER_LEVEL: f64 = 0.02;

fn default_base_pop() -> f64 {
    1000.0
}

fn default_happiness_factor() -> f64 {
    100.0
}

fn default_weight() -> f64 {
    1.0
}

/// One point in the search space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Configuration {
    pub government: Government,
    pub defcon: Defcon,
    pub war_mode: bool,
    pub tax_rate: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationModel {
    #[serde(default = "default_base_pop")]
    pub base_pop: f64,
    /// Scales the summed happiness adjustment into citizens.
    #[serde(default = "default_happiness_factor")]
    pub happiness_factor: f64,
}

impl Default for PopulationModel {
    fn default() -> Self {
        Self {
            base_pop: default_base_pop(),
            happiness_factor: default_happiness_factor(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessWeights {
    #[serde(default = "default_weight")]
    pub population: f64,
    #[serde(default = "default_weight")]
    pub land: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            population: default_weight(),
            land: default_weight(),
        }
    }
}

/// Happiness bonus granted by technology level, tiered.
pub fn tech_happiness_bonus(tech: f64) -> f64 {
    if tech <= 0.0 {
        -1.0
    } else if tech <= 0.5 {
        0.0
    } else if tech <= 1.0 {
        1.0
    } else if tech <= 3.0 {
        2.0
    } else if tech <= 6.0 {
        3.0
    } else if tech <= 10.0 {
        4.0
    } else if tech <= 15.0 {
        5.0
    } else {
        let bonus = 5.0 + tech * TECH_BONUS_PER_LEVEL;
        let max_bonus = 5.0 + TECH_BONUS_CAP_LEVEL * TECH_BONUS_PER_LEVEL;
        bonus.min(max_bonus)
    }
}

/// Sum of government, DEFCON and technology happiness.
pub fn total_happiness_adjustment(government: Government, defcon: Defcon, tech: f64) -> f64 {
    f64::from(government.happiness())
        + f64::from(defcon.happiness_delta())
        + tech_happiness_bonus(tech)
}

pub fn calculate_population(
    config: &Configuration,
    infra: f64,
    tech: f64,
    model: &PopulationModel,
) -> f64 {
    let base_population = model.base_pop + infra * 100.0 + tech * 10.0;
    let happiness = total_happiness_adjustment(config.government, config.defcon, tech);
    let adjusted_population = base_population + happiness * model.happiness_factor;
    let war_multiplier = if config.war_mode { 0.9 } else { 1.0 };
    let tax_multiplier = 1.0 - f64::from(config.tax_rate) / 200.0;
    adjusted_population * war_multiplier * tax_multiplier
}

/// Land growth for one government.
///
/// Natural growth already scales with `base_land`, so the result grows with
/// the square of the current land area.
pub fn calculate_land_growth(government: Government, infra: f64, base_land: f64) -> f64 {
    let natural_growth = 0.5 * (base_land / 1000.0);
    let infra_bonus = 1.0 + infra / 100_000.0;
    base_land * natural_growth * infra_bonus * government.land_multiplier()
}

pub fn fitness(population: f64, land: f64, weights: &FitnessWeights) -> f64 {
    weights.population * population + weights.land * land
}

/// Rounds the exact stored value to two decimals, once.
///
/// `{:.2}` formats from the full decimal expansion of the float, so a value
/// stored just below a half cent stays below it. Scaling by 100 first would
/// round the product and can push it onto the half.
pub(crate) fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(government: Government, defcon: u8, war_mode: bool, tax_rate: u32) -> Configuration {
        Configuration {
            government,
            defcon: Defcon::new(defcon).unwrap(),
            war_mode,
            tax_rate,
        }
    }

    #[test]
    fn population_follows_formula() {
        // base 1000 + 10*100 + 2*10 = 2020; happiness 1 + 2 + 2 = 5 -> +500
        let cfg = config(Government::Monarchy, 5, false, 30);
        let pop = calculate_population(&cfg, 10.0, 2.0, &PopulationModel::default());
        assert!((pop - 2520.0 * 0.85).abs() < 1e-9);

        let at_war = config(Government::Monarchy, 5, true, 30);
        let pop_war = calculate_population(&at_war, 10.0, 2.0, &PopulationModel::default());
        assert!((pop_war - 2520.0 * 0.9 * 0.85).abs() < 1e-9);
    }

    #[test]
    fn land_growth_uses_government_multiplier() {
        let plain = calculate_land_growth(Government::Anarchy, 0.0, 2000.0);
        assert!((plain - 2000.0).abs() < 1e-9);
        let boosted = calculate_land_growth(Government::Republic, 0.0, 2000.0);
        assert!((boosted - 2100.0).abs() < 1e-9);
    }

    #[test]
    fn fitness_is_weighted_sum() {
        let weights = FitnessWeights {
            population: 0.5,
            land: 2.0,
        };
        assert_eq!(fitness(100.0, 10.0, &weights), 70.0);
        assert_eq!(fitness(100.0, 10.0, &FitnessWeights::default()), 110.0);
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(540.754_9), 540.75);
        assert_eq!(round2(-1.236), -1.24);
    }

    #[test]
    fn round2_does_not_round_up_values_stored_below_half_cent() {
        // 13035.525 is stored as 13035.52499999999963...
        assert_eq!(round2(13035.525), 13035.52);
        // 2.675 is stored as 2.67499999999999982...
        assert_eq!(round2(2.675), 2.67);
        assert!(round2(f64::NAN).is_nan());
    }
}
