//! Compare scenarios from a CSV file against the first (baseline) scenario
//!
//! Usage: cargo run --bin compare_scenarios -- scenarios.csv [--timing start] [--json]

use std::path::PathBuf;

use clap::Parser;
use compound_growth::analysis::Leader;
use compound_growth::projection::{ContributionTiming, SimulationConfig};
use compound_growth::runner::{BatchReport, ScenarioRunner};
use compound_growth::scenario::load_scenarios;

/// Compare growth scenarios against a baseline
#[derive(Parser, Debug)]
#[command(name = "compare_scenarios")]
struct Args {
    /// CSV file of scenarios; the first row is the baseline
    scenarios: PathBuf,

    /// Contribute at the start of each period instead of the end
    #[arg(long, env = "GROWTH_START_OF_PERIOD")]
    start_of_period: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Loading scenarios from {}...", args.scenarios.display());
    let scenarios = load_scenarios(&args.scenarios)?;

    let timing = if args.start_of_period {
        ContributionTiming::StartOfPeriod
    } else {
        ContributionTiming::EndOfPeriod
    };
    let runner = ScenarioRunner::with_config(SimulationConfig {
        contribution_timing: timing,
        ..Default::default()
    });
    let report = runner.run_and_compare(&scenarios)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn fmt_years(t: Option<f64>) -> String {
    t.map(|t| format!("{:.2}", t)).unwrap_or_else(|| "-".to_string())
}

fn print_report(report: &BatchReport) {
    println!("\n  {:<16} {:>14} {:>14} {:>14} {:>8} {:>8}",
             "Scenario", "Final", "Contributed", "Gains", "Multiple", "Double");
    println!("  {:-<79}", "");
    for run in &report.runs {
        let f = &run.findings;
        println!("  {:<16} {:>14.2} {:>14.2} {:>14.2} {:>8} {:>8}",
                 run.name,
                 f.final_value,
                 f.total_contributed,
                 f.total_gains,
                 f.end_start_ratio.map(|r| format!("{:.2}x", r)).unwrap_or_else(|| "-".to_string()),
                 fmt_years(f.doubling_time_years));
    }

    for cmp in &report.comparisons {
        println!("\n  {} vs {}:", cmp.name, cmp.baseline);
        let result = &cmp.result;
        if let Some(diff) = result.final_difference() {
            println!("    Final difference: {:+.2}", diff);
        }
        if let Some(ratio) = result.final_ratio {
            println!("    Final ratio: {:.4}", ratio);
        }
        match result.overtake {
            Some(o) => {
                let leader = match o.leader {
                    Leader::A => &cmp.name,
                    Leader::B => &cmp.baseline,
                };
                println!("    {} takes the lead after {:.2} years", leader, o.time_years);
            }
            None => println!("    No overtake within the horizon"),
        }
    }
}
