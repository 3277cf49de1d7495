pub mod catalog;
pub mod formula;
pub mod optimizer;
pub mod profile;
pub mod report;

pub use catalog::{CatalogError, Defcon, Government, GovernmentDefinition};
pub use formula::{Configuration, FitnessWeights, PopulationModel};
pub use optimizer::{
    optimize_settings, EvaluationResult, OptimizationOutcome, OptimizeError, OptimizerInputs,
    TaxPolicy,
};
pub use profile::{Profile, ProfileLoader};
