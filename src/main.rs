use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cn_optimizer::{
    catalog, optimize_settings,
    profile::{Profile, ProfileLoader},
    report, TaxPolicy,
};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Finds the government, DEFCON, war and tax settings that maximise population and land growth"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score every settings combination and report the best ones
    Optimize(OptimizeArgs),
    /// List the government catalog with all chart attributes
    Governments,
}

#[derive(Debug, Args)]
struct OptimizeArgs {
    /// Path to a profile YAML file (built-in defaults when omitted)
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Infrastructure level
    #[arg(long)]
    infra: Option<f64>,

    /// Technology level
    #[arg(long)]
    tech: Option<f64>,

    /// Current land area
    #[arg(long)]
    land: Option<f64>,

    /// Weight for population in the fitness score (0 to 2)
    #[arg(long)]
    weight_pop: Option<f64>,

    /// Weight for land growth in the fitness score (0 to 2)
    #[arg(long)]
    weight_land: Option<f64>,

    /// Citizens gained per point of total happiness adjustment
    #[arg(long)]
    happiness_factor: Option<f64>,

    /// Evaluate a single tax rate
    #[arg(long, conflicts_with = "tax_range")]
    tax_rate: Option<u32>,

    /// Evaluate every tax rate in MIN-MAX, e.g. 1-28
    #[arg(long, value_parser = parse_tax_range)]
    tax_range: Option<TaxPolicy>,

    /// Number of ranked rows to print
    #[arg(long, default_value_t = 20)]
    top: usize,

    /// Write every ranked row to a CSV file
    #[arg(long, num_args = 0..=1, default_missing_value = report::DEFAULT_CSV_FILE)]
    csv: Option<PathBuf>,

    /// Print JSON instead of text tables
    #[arg(long)]
    json: bool,
}

impl OptimizeArgs {
    fn apply(&self, profile: &mut Profile) {
        if let Some(infra) = self.infra {
            profile.infra = infra;
        }
        if let Some(tech) = self.tech {
            profile.tech = tech;
        }
        if let Some(land) = self.land {
            profile.base_land = land;
        }
        if let Some(weight) = self.weight_pop {
            profile.weights.population = weight;
        }
        if let Some(weight) = self.weight_land {
            profile.weights.land = weight;
        }
        if let Some(factor) = self.happiness_factor {
            profile.population.happiness_factor = factor;
        }
        if let Some(rate) = self.tax_rate {
            profile.tax_policy = TaxPolicy::Fixed { rate };
        }
        if let Some(policy) = self.tax_range {
            profile.tax_policy = policy;
        }
    }
}

fn parse_tax_range(value: &str) -> Result<TaxPolicy, String> {
    let (min, max) = value
        .split_once('-')
        .ok_or_else(|| format!("expected MIN-MAX, got '{value}'"))?;
    let min = min
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("unable to parse tax rate from '{min}'"))?;
    let max = max
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("unable to parse tax rate from '{max}'"))?;
    Ok(TaxPolicy::Range { min, max })
}

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_optimize(args: OptimizeArgs) -> Result<()> {
    let mut profile = match &args.profile {
        Some(path) => ProfileLoader::new(".").load(path)?,
        None => Profile::default(),
    };
    init_logging(&profile.logging.level);
    args.apply(&mut profile);
    profile.validate()?;

    info!(
        profile = %profile.name,
        infra = profile.infra,
        tech = profile.tech,
        base_land = profile.base_land,
        "optimizing settings"
    );
    let outcome = optimize_settings(&profile.optimizer_inputs())?;
    let ranked = outcome.ranked();

    if let Some(path) = &args.csv {
        report::export_csv(path, ranked.iter().copied())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), rows = ranked.len(), "results exported");
    }

    let top: Vec<_> = ranked.into_iter().take(args.top).collect();
    if args.json {
        let body = serde_json::json!({
            "profile": profile.name,
            "evaluated": outcome.results.len(),
            "best": outcome.best,
            "top": top,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("Best configuration ({} evaluated)", outcome.results.len());
        print!("{}", report::render_best(&outcome.best));
        println!();
        println!("Top {} configurations by fitness", top.len());
        print!("{}", report::render_table(top));
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Optimize(args) => run_optimize(args),
        Command::Governments => {
            print!("{}", report::render_governments(catalog::definitions()));
            Ok(())
        }
    }
}
