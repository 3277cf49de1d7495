//! Tabular output: CSV export and plain-text tables for the terminal.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::catalog::GovernmentDefinition;
use crate::optimizer::EvaluationResult;

pub const DEFAULT_CSV_FILE: &str = "cyber_nations_population_land_optimization_results.csv";

pub const CSV_HEADER: [&str; 7] = [
    "Government",
    "DEFCON",
    "War_Mode",
    "Tax_Rate",
    "Population",
    "Land",
    "Fitness",
];

fn war_mode_label(war_mode: bool) -> &'static str {
    if war_mode {
        "True"
    } else {
        "False"
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn write_csv<'a, W, I>(mut writer: W, results: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a EvaluationResult>,
{
    writeln!(writer, "{}", CSV_HEADER.join(","))?;
    for row in results {
        writeln!(
            writer,
            "{},{},{},{},{:.2},{:.2},{:.2}",
            csv_field(row.government.name()),
            row.defcon,
            war_mode_label(row.war_mode),
            row.tax_rate,
            row.population,
            row.land,
            row.fitness
        )?;
    }
    writer.flush()
}

pub fn to_csv_string<'a, I>(results: I) -> io::Result<String>
where
    I: IntoIterator<Item = &'a EvaluationResult>,
{
    let mut buffer = Vec::new();
    write_csv(&mut buffer, results)?;
    String::from_utf8(buffer).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

pub fn export_csv<'a, I>(path: impl AsRef<Path>, results: I) -> io::Result<()>
where
    I: IntoIterator<Item = &'a EvaluationResult>,
{
    let file = File::create(path)?;
    write_csv(BufWriter::new(file), results)
}

pub fn render_best(best: &EvaluationResult) -> String {
    format!(
        "Government: {}\nDEFCON: {}\nWar mode: {}\nTax rate: {}%\nPopulation: {:.2}\nLand: {:.2}\nFitness: {:.2}\n",
        best.government,
        best.defcon,
        if best.war_mode { "at war" } else { "peace" },
        best.tax_rate,
        best.population,
        best.land,
        best.fitness
    )
}

pub fn render_table<'a, I>(results: I) -> String
where
    I: IntoIterator<Item = &'a EvaluationResult>,
{
    let mut out = format!(
        "{:>4}  {:<26} {:>6} {:>8} {:>8} {:>14} {:>12} {:>14}\n",
        "#", "Government", "DEFCON", "War_Mode", "Tax_Rate", "Population", "Land", "Fitness"
    );
    for (rank, row) in results.into_iter().enumerate() {
        out.push_str(&format!(
            "{:>4}  {:<26} {:>6} {:>8} {:>8} {:>14.2} {:>12.2} {:>14.2}\n",
            rank + 1,
            row.government.name(),
            row.defcon,
            war_mode_label(row.war_mode),
            row.tax_rate,
            row.population,
            row.land,
            row.fitness
        ));
    }
    out
}

pub fn render_governments(definitions: &[GovernmentDefinition]) -> String {
    let mut out = format!(
        "{:<26} {:>9} {:>5} {:>8} {:>10} {:>11} {:>12} {:>10}\n",
        "Government",
        "Happiness",
        "Land",
        "Soldier",
        "Infra_Cost",
        "Imp_Upkeep",
        "Mil_Upkeep",
        "Spy_Attack"
    );
    for def in definitions {
        out.push_str(&format!(
            "{:<26} {:>9} {:>5.2} {:>8.2} {:>10.2} {:>11.2} {:>12.2} {:>10.2}\n",
            def.name,
            def.happiness,
            def.land_multiplier,
            def.soldier_efficiency,
            def.infra_cost,
            def.improvement_upkeep,
            def.military_upkeep,
            def.spy_attack
        ));
    }
    out
}
