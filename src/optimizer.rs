use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::{Defcon, Government};
use crate::formula::{
    calculate_land_growth, calculate_population, fitness, round2, Configuration, FitnessWeights,
    PopulationModel,
};

pub const STANDARD_TAX_RATE: u32 = 30;
pub const DEFAULT_INFRA: f64 = 3000.0;
pub const DEFAULT_TECH: f64 = 1500.0;
pub const DEFAULT_BASE_LAND: f64 = 1000.0;
pub const MAX_TOLERABLE_TAX_RATE: u32 = 28;

const WAR_MODES: [bool; 2] = [true, false];

#[derive(Debug, Error, PartialEq)]
pub enum OptimizeError {
    #[error("tax range {min}..={max} is empty")]
    EmptyTaxRange { min: u32, max: u32 },
    #[error("no configuration produced a comparable fitness score")]
    NoFiniteFitness,
}

/// Which tax rates the search covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TaxPolicy {
    Fixed { rate: u32 },
    Range { min: u32, max: u32 },
}

impl Default for TaxPolicy {
    fn default() -> Self {
        TaxPolicy::Fixed {
            rate: STANDARD_TAX_RATE,
        }
    }
}

impl TaxPolicy {
    /// Every rate from 1% up to the highest rate players tolerate.
    pub fn tolerable_range() -> Self {
        TaxPolicy::Range {
            min: 1,
            max: MAX_TOLERABLE_TAX_RATE,
        }
    }

    pub fn rates(&self) -> RangeInclusive<u32> {
        match *self {
            TaxPolicy::Fixed { rate } => rate..=rate,
            TaxPolicy::Range { min, max } => min..=max,
        }
    }

    pub fn len(&self) -> usize {
        let rates = self.rates();
        if rates.is_empty() {
            0
        } else {
            (rates.end() - rates.start()) as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cartesian product of the four settings in enumeration order:
/// government, DEFCON, war mode, then tax rate innermost.
pub fn search_space(tax_policy: TaxPolicy) -> impl Iterator<Item = Configuration> {
    Government::ALL.into_iter().flat_map(move |government| {
        Defcon::ALL.into_iter().flat_map(move |defcon| {
            WAR_MODES.into_iter().flat_map(move |war_mode| {
                tax_policy.rates().map(move |tax_rate| Configuration {
                    government,
                    defcon,
                    war_mode,
                    tax_rate,
                })
            })
        })
    })
}

pub fn search_space_len(tax_policy: TaxPolicy) -> usize {
    Government::ALL.len() * Defcon::ALL.len() * WAR_MODES.len() * tax_policy.len()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizerInputs {
    pub infra: f64,
    pub tech: f64,
    pub base_land: f64,
    pub weights: FitnessWeights,
    pub population: PopulationModel,
    pub tax_policy: TaxPolicy,
}

impl Default for OptimizerInputs {
    fn default() -> Self {
        Self {
            infra: DEFAULT_INFRA,
            tech: DEFAULT_TECH,
            base_land: DEFAULT_BASE_LAND,
            weights: FitnessWeights::default(),
            population: PopulationModel::default(),
            tax_policy: TaxPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    #[serde(rename = "Government")]
    pub government: Government,
    #[serde(rename = "DEFCON")]
    pub defcon: Defcon,
    #[serde(rename = "War_Mode")]
    pub war_mode: bool,
    #[serde(rename = "Tax_Rate")]
    pub tax_rate: u32,
    #[serde(rename = "Population")]
    pub population: f64,
    #[serde(rename = "Land")]
    pub land: f64,
    #[serde(rename = "Fitness")]
    pub fitness: f64,
}

impl EvaluationResult {
    pub fn configuration(&self) -> Configuration {
        Configuration {
            government: self.government,
            defcon: self.defcon,
            war_mode: self.war_mode,
            tax_rate: self.tax_rate,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizationOutcome {
    pub best: EvaluationResult,
    /// Results in enumeration order.
    pub results: Vec<EvaluationResult>,
}

impl OptimizationOutcome {
    /// Results by fitness, highest first. Equal scores keep enumeration order.
    pub fn ranked(&self) -> Vec<&EvaluationResult> {
        let mut ranked: Vec<&EvaluationResult> = self.results.iter().collect();
        ranked.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        ranked
    }

    pub fn top(&self, count: usize) -> Vec<&EvaluationResult> {
        let mut ranked = self.ranked();
        ranked.truncate(count);
        ranked
    }
}

/// Scores one configuration, returning the rounded record and the raw
/// fitness used for comparisons.
pub fn evaluate(config: &Configuration, inputs: &OptimizerInputs) -> (EvaluationResult, f64) {
    let population = calculate_population(config, inputs.infra, inputs.tech, &inputs.population);
    let land = calculate_land_growth(config.government, inputs.infra, inputs.base_land);
    let score = fitness(population, land, &inputs.weights);
    let record = EvaluationResult {
        government: config.government,
        defcon: config.defcon,
        war_mode: config.war_mode,
        tax_rate: config.tax_rate,
        population: round2(population),
        land: round2(land),
        fitness: round2(score),
    };
    (record, score)
}

/// Exhaustively scores every configuration and keeps the highest.
///
/// The first configuration reaching the maximum wins ties.
pub fn optimize_settings(inputs: &OptimizerInputs) -> Result<OptimizationOutcome, OptimizeError> {
    if let TaxPolicy::Range { min, max } = inputs.tax_policy {
        if min > max {
            return Err(OptimizeError::EmptyTaxRange { min, max });
        }
    }

    let mut results = Vec::with_capacity(search_space_len(inputs.tax_policy));
    let mut best: Option<EvaluationResult> = None;
    let mut best_score = f64::NEG_INFINITY;

    for config in search_space(inputs.tax_policy) {
        let (record, score) = evaluate(&config, inputs);
        if score > best_score {
            debug!(
                government = %record.government,
                defcon = %record.defcon,
                war_mode = record.war_mode,
                tax_rate = record.tax_rate,
                fitness = record.fitness,
                "new best configuration"
            );
            best_score = score;
            best = Some(record);
        }
        results.push(record);
    }

    let best = best.ok_or(OptimizeError::NoFiniteFitness)?;
    info!(
        evaluated = results.len(),
        government = %best.government,
        fitness = best.fitness,
        "optimization finished"
    );
    Ok(OptimizationOutcome { best, results })
}
