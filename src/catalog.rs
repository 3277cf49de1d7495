use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown government '{0}'")]
    UnknownGovernment(String),
    #[error("DEFCON level {0} is outside 1..=5")]
    InvalidDefcon(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Government {
    Anarchy,
    Capitalist,
    Communist,
    Democracy,
    Dictatorship,
    #[serde(rename = "Federal Government")]
    FederalGovernment,
    Monarchy,
    Republic,
    #[serde(rename = "Revolutionary Government")]
    RevolutionaryGovernment,
    #[serde(rename = "Totalitarian State")]
    TotalitarianState,
    Transitional,
}

/// Chart attributes for one government type.
///
/// Multipliers are relative to 1.00; only `happiness` and `land_multiplier`
/// take part in the optimizer formulas.
#[derive(Debug, Clone, Copy)]
pub struct GovernmentDefinition {
    pub government: Government,
    pub name: &'static str,
    pub happiness: i32,
    pub land_multiplier: f64,
    pub soldier_efficiency: f64,
    pub infra_cost: f64,
    pub improvement_upkeep: f64,
    pub military_upkeep: f64,
    pub spy_attack: f64,
}

const GOVERNMENTS: &[GovernmentDefinition] = &[
    GovernmentDefinition {
        government: Government::Anarchy,
        name: "Anarchy",
        happiness: 0,
        land_multiplier: 1.00,
        soldier_efficiency: 1.00,
        infra_cost: 1.00,
        improvement_upkeep: 1.00,
        military_upkeep: 1.00,
        spy_attack: 1.00,
    },
    GovernmentDefinition {
        government: Government::Capitalist,
        name: "Capitalist",
        happiness: 0,
        land_multiplier: 1.05,
        soldier_efficiency: 1.00,
        infra_cost: 0.95,
        improvement_upkeep: 0.95,
        military_upkeep: 1.00,
        spy_attack: 1.00,
    },
    GovernmentDefinition {
        government: Government::Communist,
        name: "Communist",
        happiness: 0,
        land_multiplier: 1.05,
        soldier_efficiency: 1.08,
        infra_cost: 1.00,
        improvement_upkeep: 1.00,
        military_upkeep: 0.98,
        spy_attack: 1.10,
    },
    GovernmentDefinition {
        government: Government::Democracy,
        name: "Democracy",
        happiness: 1,
        land_multiplier: 1.00,
        soldier_efficiency: 1.08,
        infra_cost: 1.00,
        improvement_upkeep: 1.00,
        military_upkeep: 1.00,
        spy_attack: 1.00,
    },
    GovernmentDefinition {
        government: Government::Dictatorship,
        name: "Dictatorship",
        happiness: 0,
        land_multiplier: 1.00,
        soldier_efficiency: 1.08,
        infra_cost: 0.95,
        improvement_upkeep: 1.00,
        military_upkeep: 0.98,
        spy_attack: 1.00,
    },
    GovernmentDefinition {
        government: Government::FederalGovernment,
        name: "Federal Government",
        happiness: 0,
        land_multiplier: 1.00,
        soldier_efficiency: 1.08,
        infra_cost: 0.95,
        improvement_upkeep: 0.95,
        military_upkeep: 1.00,
        spy_attack: 1.00,
    },
    GovernmentDefinition {
        government: Government::Monarchy,
        name: "Monarchy",
        happiness: 1,
        land_multiplier: 1.05,
        soldier_efficiency: 1.00,
        infra_cost: 0.95,
        improvement_upkeep: 1.00,
        military_upkeep: 1.00,
        spy_attack: 1.00,
    },
    GovernmentDefinition {
        government: Government::Republic,
        name: "Republic",
        happiness: 0,
        land_multiplier: 1.05,
        soldier_efficiency: 1.00,
        infra_cost: 0.95,
        improvement_upkeep: 1.00,
        military_upkeep: 1.00,
        spy_attack: 1.10,
    },
    GovernmentDefinition {
        government: Government::RevolutionaryGovernment,
        name: "Revolutionary Government",
        happiness: 1,
        land_multiplier: 1.00,
        soldier_efficiency: 1.00,
        infra_cost: 0.95,
        improvement_upkeep: 0.95,
        military_upkeep: 1.00,
        spy_attack: 1.00,
    },
    GovernmentDefinition {
        government: Government::TotalitarianState,
        name: "Totalitarian State",
        happiness: 1,
        land_multiplier: 1.05,
        soldier_efficiency: 1.00,
        infra_cost: 1.00,
        improvement_upkeep: 1.00,
        military_upkeep: 0.98,
        spy_attack: 1.00,
    },
    GovernmentDefinition {
        government: Government::Transitional,
        name: "Transitional",
        happiness: 0,
        land_multiplier: 1.05,
        soldier_efficiency: 1.08,
        infra_cost: 1.00,
        improvement_upkeep: 0.95,
        military_upkeep: 1.00,
        spy_attack: 1.10,
    },
];

impl Government {
    /// Every government in catalog order.
    pub const ALL: [Government; 11] = [
        Government::Anarchy,
        Government::Capitalist,
        Government::Communist,
        Government::Democracy,
        Government::Dictatorship,
        Government::FederalGovernment,
        Government::Monarchy,
        Government::Republic,
        Government::RevolutionaryGovernment,
        Government::TotalitarianState,
        Government::Transitional,
    ];

    pub fn definition(self) -> &'static GovernmentDefinition {
        // GOVERNMENTS is laid out in declaration order of the enum.
        &GOVERNMENTS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.definition().name
    }

    pub fn happiness(self) -> i32 {
        self.definition().happiness
    }

    pub fn land_multiplier(self) -> f64 {
        self.definition().land_multiplier
    }
}

impl fmt::Display for Government {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Government {
    type Err = CatalogError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        definition_by_name(name).map(|def| def.government)
    }
}

pub fn definitions() -> &'static [GovernmentDefinition] {
    GOVERNMENTS
}

pub fn definition_by_name(name: &str) -> Result<&'static GovernmentDefinition, CatalogError> {
    let wanted = name.trim();
    GOVERNMENTS
        .iter()
        .find(|def| def.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| CatalogError::UnknownGovernment(name.to_string()))
}

/// Alert level, 1 (highest alert) through 5 (lowest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Defcon(u8);

impl Defcon {
    /// Enumeration order used by the optimizer.
    pub const ALL: [Defcon; 5] = [Defcon(5), Defcon(4), Defcon(3), Defcon(2), Defcon(1)];

    pub fn new(level: u8) -> Result<Self, CatalogError> {
        if (1..=5).contains(&level) {
            Ok(Self(level))
        } else {
            Err(CatalogError::InvalidDefcon(level))
        }
    }

    pub fn level(self) -> u8 {
        self.0
    }

    pub fn happiness_delta(self) -> i32 {
        i32::from(self.0) - 3
    }
}

impl TryFrom<u8> for Defcon {
    type Error = CatalogError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Defcon::new(level)
    }
}

impl From<Defcon> for u8 {
    fn from(defcon: Defcon) -> Self {
        defcon.0
    }
}

impl fmt::Display for Defcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
