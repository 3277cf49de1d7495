use std::path::PathBuf;

use cn_optimizer::{
    optimize_settings, report, FitnessWeights, Government, OptimizerInputs, PopulationModel,
    ProfileLoader, TaxPolicy,
};

fn profile_loader() -> ProfileLoader {
    ProfileLoader::new(env!("CARGO_MANIFEST_DIR"))
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn reference_inputs() -> OptimizerInputs {
    OptimizerInputs {
        infra: 3000.0,
        tech: 1500.0,
        base_land: 1000.0,
        weights: FitnessWeights {
            population: 1.0,
            land: 1.0,
        },
        population: PopulationModel {
            base_pop: 1000.0,
            happiness_factor: 100.0,
        },
        tax_policy: TaxPolicy::Fixed { rate: 30 },
    }
}

#[test]
fn reference_run_picks_peaceful_monarchy() {
    let outcome = optimize_settings(&reference_inputs()).unwrap();
    let best = outcome.best;
    assert_eq!(best.government, Government::Monarchy);
    assert_eq!(best.defcon.level(), 5);
    assert!(!best.war_mode);
    assert_eq!(best.tax_rate, 30);
    assert!(close(best.population, 269_620.0));
    assert!(close(best.land, 540.75));
    assert!(close(best.fitness, 270_160.75));
}

#[test]
fn repeated_runs_are_identical() {
    let first = optimize_settings(&reference_inputs()).unwrap();
    let second = optimize_settings(&reference_inputs()).unwrap();
    assert_eq!(first.best, second.best);
    assert_eq!(first.results, second.results);
    assert_eq!(first.best.configuration(), second.best.configuration());
}

#[test]
fn result_count_matches_search_space() {
    let fixed = optimize_settings(&reference_inputs()).unwrap();
    assert_eq!(fixed.results.len(), 110);

    let swept = optimize_settings(&OptimizerInputs {
        tax_policy: TaxPolicy::tolerable_range(),
        ..reference_inputs()
    })
    .unwrap();
    assert_eq!(swept.results.len(), 3_080);
    assert_eq!(swept.best.tax_rate, 1);
    assert_eq!(swept.best.government, Government::Monarchy);
}

#[test]
fn best_has_maximum_fitness() {
    let weight_sets = [(1.0, 1.0), (0.0, 2.0), (2.0, 0.0), (0.3, 1.7)];
    for (population, land) in weight_sets {
        let inputs = OptimizerInputs {
            weights: FitnessWeights { population, land },
            tax_policy: TaxPolicy::tolerable_range(),
            ..reference_inputs()
        };
        let outcome = optimize_settings(&inputs).unwrap();
        let max = outcome
            .results
            .iter()
            .map(|row| row.fitness)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(outcome.best.fitness, max, "weights {population}/{land}");
        assert_eq!(outcome.ranked()[0].fitness, max);
    }
}

#[test]
fn land_only_weights_favour_land_bonus_governments() {
    let outcome = optimize_settings(&OptimizerInputs {
        weights: FitnessWeights {
            population: 0.0,
            land: 1.0,
        },
        ..reference_inputs()
    })
    .unwrap();
    // Capitalist is the first government with the 1.05 land multiplier.
    assert_eq!(outcome.best.government, Government::Capitalist);
    assert!(close(outcome.best.fitness, 540.75));
}

#[test]
fn ranked_rows_are_sorted_descending() {
    let outcome = optimize_settings(&reference_inputs()).unwrap();
    let ranked = outcome.ranked();
    assert_eq!(ranked.len(), outcome.results.len());
    for pair in ranked.windows(2) {
        assert!(pair[0].fitness >= pair[1].fitness);
    }
    assert_eq!(outcome.top(20).len(), 20);
}

#[test]
fn default_profile_matches_reference_run() {
    let profile = profile_loader()
        .load(PathBuf::from("profiles/default.yaml"))
        .expect("profile parses");
    assert_eq!(profile.name, "default");
    assert_eq!(profile.optimizer_inputs(), reference_inputs());
}

#[test]
fn tax_sweep_profile_enumerates_tolerable_rates() {
    let profile = profile_loader()
        .load(PathBuf::from("profiles/tax_sweep.yaml"))
        .unwrap();
    assert_eq!(profile.tax_policy, TaxPolicy::tolerable_range());
    let outcome = optimize_settings(&profile.optimizer_inputs()).unwrap();
    assert_eq!(outcome.results.len(), 3_080);
}

#[test]
fn invalid_profile_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "weights:\n  population: 3.0\n").unwrap();
    let err = ProfileLoader::new(dir.path()).load("bad.yaml").unwrap_err();
    assert!(
        format!("{err:#}").contains("population weight"),
        "unexpected error: {err:#}"
    );
}

#[test]
fn csv_export_writes_every_row() {
    let outcome = optimize_settings(&reference_inputs()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(report::DEFAULT_CSV_FILE);
    report::export_csv(&path, outcome.ranked()).unwrap();

    let data = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = data.lines().collect();
    assert_eq!(lines.len(), 111);
    assert_eq!(
        lines[0],
        "Government,DEFCON,War_Mode,Tax_Rate,Population,Land,Fitness"
    );
    assert_eq!(lines[1], "Monarchy,5,False,30,269620.00,540.75,270160.75");
}

#[test]
fn json_uses_report_column_names() {
    let outcome = optimize_settings(&reference_inputs()).unwrap();
    let value = serde_json::to_value(outcome.best).unwrap();
    assert_eq!(value["Government"], "Monarchy");
    assert_eq!(value["DEFCON"], 5);
    assert_eq!(value["War_Mode"], false);
    assert_eq!(value["Tax_Rate"], 30);
}

#[test]
fn reported_values_round_the_stored_score_once() {
    // Raw fitness here is 13035.52499999999963..., just under the half cent.
    let outcome = optimize_settings(&OptimizerInputs {
        infra: 500.0,
        tech: 0.0,
        base_land: 100.0,
        weights: FitnessWeights {
            population: 0.3,
            land: 1.0,
        },
        ..reference_inputs()
    })
    .unwrap();
    let row = outcome
        .results
        .iter()
        .find(|row| {
            row.government == Government::Anarchy && row.defcon.level() == 5 && !row.war_mode
        })
        .expect("anarchy row exists");
    assert_eq!(row.population, 43_435.0);
    assert_eq!(row.land, 5.02);
    assert_eq!(row.fitness, 13_035.52);

    let csv = report::to_csv_string([row]).unwrap();
    assert_eq!(
        csv.lines().nth(1),
        Some("Anarchy,5,False,30,43435.00,5.02,13035.52")
    );
}
