//! Compound Growth CLI
//!
//! Projects a single scenario and prints its trajectory and summary

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use compound_growth::{
    ContributionTiming, Frequency, GrowthSimulator, ScenarioParameters, SimulationConfig,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Timing {
    /// Contribute at the end of each period (ordinary annuity)
    End,
    /// Contribute at the start of each period (annuity due)
    Start,
}

impl From<Timing> for ContributionTiming {
    fn from(timing: Timing) -> Self {
        match timing {
            Timing::End => ContributionTiming::EndOfPeriod,
            Timing::Start => ContributionTiming::StartOfPeriod,
        }
    }
}

/// Project the growth of a portfolio with periodic contributions
#[derive(Parser, Debug)]
#[command(name = "growth")]
#[command(version)]
struct Args {
    /// Starting capital
    #[arg(long, env = "GROWTH_PRINCIPAL", default_value_t = 1000.0)]
    principal: f64,

    /// Amount added every contribution period (negative for withdrawals)
    #[arg(long, env = "GROWTH_CONTRIBUTION", default_value_t = 100.0, allow_negative_numbers = true)]
    contribution: f64,

    /// Contributions per year (name like `monthly` or a count)
    #[arg(long, env = "GROWTH_CONTRIBUTION_FREQUENCY", default_value = "monthly")]
    contribution_frequency: Frequency,

    /// Nominal annual return as a decimal (0.05 = 5%)
    #[arg(long, env = "GROWTH_RATE", default_value_t = 0.05, allow_negative_numbers = true)]
    rate: f64,

    /// Compounding events per year (name like `monthly` or a count)
    #[arg(long, env = "GROWTH_COMPOUNDING_FREQUENCY", default_value = "monthly")]
    compounding_frequency: Frequency,

    /// Projection horizon in years
    #[arg(long, env = "GROWTH_YEARS", default_value_t = 10.0)]
    years: f64,

    /// Contribution timing convention
    #[arg(long, value_enum, env = "GROWTH_TIMING", default_value_t = Timing::End)]
    timing: Timing,

    /// Number of rows to print
    #[arg(long, default_value_t = 24)]
    rows: usize,

    /// Write the full series to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print series and findings as JSON instead of tables
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    params: &'a ScenarioParameters,
    findings: &'a compound_growth::SummaryFindings,
    series: &'a [compound_growth::GrowthPoint],
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let params = ScenarioParameters::new(
        args.principal,
        args.contribution,
        args.contribution_frequency,
        args.rate,
        args.compounding_frequency,
        args.years,
    )?;

    let config = SimulationConfig {
        contribution_timing: args.timing.into(),
        ..Default::default()
    };
    let series = GrowthSimulator::new(config).simulate(&params)?;
    let findings = series.summary()?;

    if let Some(path) = &args.csv {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        series.write_csv(BufWriter::new(file))?;
        log::info!("Wrote {} rows to {}", series.len(), path.display());
    }

    if args.json {
        let output = JsonOutput {
            params: &params,
            findings: &findings,
            series: series.points(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Compound Growth v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");
    println!("Scenario:");
    println!("  Starting Capital: ${:.2}", params.initial_principal());
    println!("  Contribution: ${:.2} {}", params.contribution_amount(), params.contribution_frequency());
    println!("  Annual Rate: {:.4} compounded {}", params.annual_rate(), params.compounding_frequency());
    println!("  Horizon: {} years ({} steps/year)", params.horizon_years(), series.steps_per_year());
    println!();

    println!("{:>6} {:>8} {:>14} {:>14} {:>14} {:>12}",
        "Step", "Years", "Value", "Contributed", "Gains", "StepGain");
    println!("{}", "-".repeat(73));
    for point in series.points().iter().take(args.rows) {
        println!("{:>6} {:>8.3} {:>14.2} {:>14.2} {:>14.2} {:>12.2}",
            point.step,
            point.time_years,
            point.portfolio_value,
            point.cumulative_contributions,
            point.cumulative_gains,
            point.period_gain,
        );
    }
    if series.len() > args.rows {
        println!("... ({} more steps)", series.len() - args.rows);
    }

    println!("\nSummary:");
    println!("  Final Value: ${:.2}", findings.final_value);
    println!("  Total Contributed: ${:.2}", findings.total_contributed);
    println!("  Accrued Gains: ${:.2}", findings.total_gains);
    match findings.end_start_ratio {
        Some(ratio) => println!("  Growth Multiple: {:.2}x", ratio),
        None => println!("  Growth Multiple: n/a (no starting capital)"),
    }
    match findings.doubling_time_years {
        Some(t) => println!("  Doubling Time: {:.2} years", t),
        None => println!("  Doubling Time: not reached"),
    }
    if let Some(t) = findings.gains_exceed_contribution_years {
        println!("  Growth exceeds contributions after {:.2} years", t);
    }

    if let Some(base) = findings.milestone_base {
        if !findings.milestones.is_empty() {
            println!("\nMilestones (multiples of ${:.2}):", base);
            for m in &findings.milestones {
                println!("  {:>3}x at {:>7.2} years", m.multiple, m.time_years);
            }
        }
    }

    Ok(())
}
