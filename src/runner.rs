//! Scenario runner for batch projections
//!
//! Holds one simulation config and runs many scenarios against it, in
//! parallel, summarizing each and comparing them against a baseline.

use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::{compare, summarize, ComparisonResult, SummaryFindings};
use crate::error::{GrowthError, Result};
use crate::projection::{GrowthSeries, GrowthSimulator, SimulationConfig};
use crate::scenario::{NamedScenario, ScenarioParameters};

/// One simulated scenario with its findings
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioRun {
    pub name: String,
    pub series: GrowthSeries,
    pub findings: SummaryFindings,
}

/// Comparison of one scenario against the batch baseline
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioComparison {
    pub name: String,
    pub baseline: String,
    pub result: ComparisonResult,
}

/// Output of [`ScenarioRunner::run_and_compare`]
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Every scenario, baseline first, in input order
    pub runs: Vec<ScenarioRun>,

    /// Each non-baseline scenario compared against the baseline
    pub comparisons: Vec<ScenarioComparison>,
}

/// Runs scenarios with a shared simulation config
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let report = runner.run_and_compare(&load_scenarios("scenarios.csv")?)?;
/// for cmp in &report.comparisons {
///     println!("{} vs {}: {:?}", cmp.name, cmp.baseline, cmp.result.overtake);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    simulator: GrowthSimulator,
}

impl ScenarioRunner {
    /// Create runner with the default simulation config
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            simulator: GrowthSimulator::new(config),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        self.simulator.config()
    }

    /// Simulate a single scenario
    pub fn run(&self, params: &ScenarioParameters) -> Result<GrowthSeries> {
        self.simulator.simulate(params)
    }

    /// Simulate and summarize a named scenario
    pub fn run_named(&self, scenario: &NamedScenario) -> Result<ScenarioRun> {
        let series = self.simulator.simulate(&scenario.params)?;
        let findings = summarize(&series)?;
        Ok(ScenarioRun {
            name: scenario.name.clone(),
            series,
            findings,
        })
    }

    /// Simulate and summarize many scenarios in parallel, preserving order
    pub fn run_batch(&self, scenarios: &[NamedScenario]) -> Result<Vec<ScenarioRun>> {
        log::info!("Running {} scenarios", scenarios.len());
        scenarios.par_iter().map(|s| self.run_named(s)).collect()
    }

    /// Re-run one scenario at several annual rates
    pub fn run_rate_sweep(&self, params: &ScenarioParameters, rates: &[f64]) -> Result<Vec<GrowthSeries>> {
        rates
            .par_iter()
            .map(|&rate| self.simulator.simulate(&params.with_annual_rate(rate)?))
            .collect()
    }

    /// Run a batch and compare every scenario against the first one
    pub fn run_and_compare(&self, scenarios: &[NamedScenario]) -> Result<BatchReport> {
        let runs = self.run_batch(scenarios)?;
        let (baseline, others) = runs.split_first().ok_or(GrowthError::EmptySeries)?;

        let comparisons = others
            .iter()
            .map(|run| {
                let result = compare(&run.series, &baseline.series)?;
                Ok(ScenarioComparison {
                    name: run.name.clone(),
                    baseline: baseline.name.clone(),
                    result,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(BatchReport { runs, comparisons })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ContributionTiming;
    use crate::scenario::Frequency;

    fn scenario(name: &str, contribution: f64, rate: f64, years: f64) -> NamedScenario {
        let params =
            ScenarioParameters::new(10_000.0, contribution, Frequency::MONTHLY, rate, Frequency::MONTHLY, years)
                .unwrap();
        NamedScenario::new(name, params)
    }

    #[test]
    fn test_run_batch_preserves_order() {
        let runner = ScenarioRunner::new();
        let scenarios: Vec<_> = (0..8)
            .map(|i| scenario(&format!("s{i}"), 100.0 * i as f64, 0.05, 5.0))
            .collect();

        let runs = runner.run_batch(&scenarios).unwrap();
        let names: Vec<&str> = runs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7"]);
        assert!(runs.windows(2).all(|w| w[1].findings.final_value > w[0].findings.final_value));
    }

    #[test]
    fn test_rate_sweep() {
        let runner = ScenarioRunner::new();
        let base = scenario("base", 200.0, 0.04, 20.0).params;

        let results = runner.run_rate_sweep(&base, &[0.03, 0.04, 0.05]).unwrap();
        assert_eq!(results.len(), 3);

        // Higher rate should result in higher final value
        assert!(results[2].final_value().unwrap() > results[0].final_value().unwrap());
        assert_eq!(results[1], runner.run(&base).unwrap());
    }

    #[test]
    fn test_run_and_compare() {
        let runner = ScenarioRunner::with_config(SimulationConfig {
            contribution_timing: ContributionTiming::StartOfPeriod,
            ..Default::default()
        });
        let scenarios = vec![
            scenario("baseline", 500.0, 0.05, 10.0),
            scenario("saver", 800.0, 0.05, 10.0),
            scenario("stingy", 0.0, 0.05, 10.0),
        ];

        let report = runner.run_and_compare(&scenarios).unwrap();
        assert_eq!(report.runs.len(), 3);
        assert_eq!(report.comparisons.len(), 2);
        assert_eq!(report.comparisons[0].name, "saver");
        assert_eq!(report.comparisons[0].baseline, "baseline");
        assert!(report.comparisons[0].result.final_ratio.unwrap() > 1.0);
        assert!(report.comparisons[1].result.final_ratio.unwrap() < 1.0);
    }

    #[test]
    fn test_run_and_compare_rejects_mismatched_horizons() {
        let runner = ScenarioRunner::new();
        let scenarios = vec![scenario("ten", 100.0, 0.05, 10.0), scenario("five", 100.0, 0.05, 5.0)];
        let err = runner.run_and_compare(&scenarios).unwrap_err();
        assert!(matches!(err, GrowthError::IncompatibleSeries { .. }));
    }

    #[test]
    fn test_run_and_compare_needs_a_scenario() {
        let err = ScenarioRunner::new().run_and_compare(&[]).unwrap_err();
        assert_eq!(err, GrowthError::EmptySeries);
    }
}
