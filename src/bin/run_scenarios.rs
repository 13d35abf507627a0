//! Evaluate a batch of scenarios and write a CSV comparison table
//!
//! Reads a JSON array of scenario inputs (or falls back to the built-in
//! example scenario), evaluates them in parallel, and writes one row per
//! scenario with the full numeric result record.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;

use lonelyless_engine::model::{loader, ModelConfig};
use lonelyless_engine::{CostBenefitEngine, ScenarioInput, ScenarioResult};

#[derive(Debug, Parser)]
#[command(about = "Batch scenario evaluation for the LonelyLess decision aid")]
struct Args {
    /// JSON file holding an array of scenario inputs; defaults to the
    /// built-in example scenario
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output CSV path
    #[arg(long, default_value = "scenario_results.csv")]
    output: PathBuf,

    /// Recalibrated attribute catalog CSV (dimension,level,utility_coef,wtp_coef,baseline)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Recalibrated region multiplier CSV (region,multiplier)
    #[arg(long)]
    regions: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();

    let mut config = ModelConfig::default_lonelyless();
    if let Some(path) = &args.catalog {
        config.catalog = loader::load_catalog(path)
            .with_context(|| format!("loading catalog from {}", path.display()))?;
    }
    if let Some(path) = &args.regions {
        config.regions = loader::load_regions(path)
            .with_context(|| format!("loading regions from {}", path.display()))?;
    }
    let engine = CostBenefitEngine::new(config);

    let scenarios: Vec<ScenarioInput> = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening scenario file {}", path.display()))?;
            serde_json::from_reader(file)
                .with_context(|| format!("parsing scenarios from {}", path.display()))?
        }
        None => vec![ScenarioInput::example()],
    };
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let eval_start = Instant::now();
    let results: Vec<ScenarioResult> = scenarios
        .par_iter()
        .enumerate()
        .map(|(idx, input)| {
            engine
                .evaluate(input)
                .with_context(|| format!("evaluating scenario #{}", idx + 1))
        })
        .collect::<Result<_>>()?;
    println!("Evaluated in {:?}", eval_start.elapsed());

    write_csv(&args.output, &scenarios, &results)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("Output written to {}", args.output.display());

    // Summary for a quick read without opening the CSV
    for (input, result) in scenarios.iter().zip(&results) {
        println!(
            "  {:<32} uptake={:.1}%  totalCost=${:.0}  netBenefit=${:.0}  bcr={}",
            input.name.as_deref().unwrap_or("unnamed"),
            result.endorse_prob * 100.0,
            result.total_cost,
            result.net_benefit,
            result
                .bcr
                .map(|b| format!("{:.3}", b))
                .unwrap_or_else(|| "n/a".to_string()),
        );
    }

    println!("Total time: {:?}", start.elapsed());
    Ok(())
}

fn write_csv(
    path: &PathBuf,
    scenarios: &[ScenarioInput],
    results: &[ScenarioResult],
) -> Result<()> {
    let mut file = File::create(path)?;
    writeln!(
        file,
        "Name,EndorseProb,OptoutProb,WtpPerSession,EffectiveCostPerSession,\
TotalParticipants,EndorsedParticipants,TotalSessions,DirectCost,OpportunityCost,\
TotalCost,TotalBenefit,NetBenefit,BCR"
    )?;

    for (input, r) in scenarios.iter().zip(results) {
        writeln!(
            file,
            "{},{:.6},{:.6},{:.4},{:.4},{:.2},{:.4},{:.4},{:.2},{:.2},{:.2},{:.2},{:.2},{}",
            input.name.as_deref().unwrap_or("unnamed"),
            r.endorse_prob,
            r.optout_prob,
            r.wtp_per_session,
            r.effective_cost_per_session,
            r.total_participants,
            r.endorsed_participants,
            r.total_sessions,
            r.direct_cost,
            r.opportunity_cost,
            r.total_cost,
            r.total_benefit,
            r.net_benefit,
            r.bcr.map(|b| format!("{:.6}", b)).unwrap_or_default(),
        )?;
    }
    Ok(())
}
