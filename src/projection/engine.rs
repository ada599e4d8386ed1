//! Growth simulation engine

use serde::{Deserialize, Serialize};

use super::series::GrowthSeries;
use super::state::SimulationState;
use crate::error::{GrowthError, Result};
use crate::scenario::ScenarioParameters;

/// Horizons within this fraction of a step of a grid boundary snap to it
const STEP_TOLERANCE: f64 = 1e-9;

/// Default cap on the number of simulation steps in one series
pub const DEFAULT_MAX_STEPS: u64 = 5_000_000;

/// When a contribution enters the portfolio relative to its period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContributionTiming {
    /// Ordinary annuity: added at the end of each contribution period,
    /// after that step's growth. Starts compounding at the next event.
    #[default]
    EndOfPeriod,
    /// Annuity due: added on the boundary where each contribution period
    /// begins, so it earns that period's growth. The first contribution is
    /// part of the time-zero point; no contribution is made at the horizon.
    StartOfPeriod,
}

/// Configuration for a simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Contribution timing convention
    pub contribution_timing: ContributionTiming,

    /// Reject scenarios whose grid would exceed this many steps
    pub max_steps: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            contribution_timing: ContributionTiming::EndOfPeriod,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// Step layout of one simulation
#[derive(Debug, Clone, Copy, PartialEq)]
struct StepPlan {
    steps_per_year: u64,
    full_steps: u64,
    /// Fraction of a step left after the full steps (0 when the horizon is on the grid)
    partial_fraction: f64,
}

impl StepPlan {
    fn for_params(params: &ScenarioParameters) -> Self {
        let steps_per_year = params.steps_per_year();
        let exact = params.horizon_years() * steps_per_year as f64;

        let mut full = exact.floor();
        let mut fraction = exact - full;
        if fraction > 1.0 - STEP_TOLERANCE {
            full += 1.0;
            fraction = 0.0;
        } else if fraction < STEP_TOLERANCE && full > 0.0 {
            // Horizons shorter than the tolerance keep their tiny partial step
            fraction = 0.0;
        }

        Self {
            steps_per_year,
            full_steps: full as u64,
            partial_fraction: fraction,
        }
    }

    fn total_steps(&self) -> u64 {
        self.full_steps + u64::from(self.partial_fraction > 0.0)
    }
}

/// Turns scenario parameters into growth series
#[derive(Debug, Clone, Default)]
pub struct GrowthSimulator {
    config: SimulationConfig,
}

impl GrowthSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulate one scenario over its full horizon
    pub fn simulate(&self, params: &ScenarioParameters) -> Result<GrowthSeries> {
        let plan = StepPlan::for_params(params);
        if plan.total_steps() > self.config.max_steps {
            return Err(GrowthError::invalid(
                "horizon_years",
                format!(
                    "{} years at {} steps/year needs {} steps, limit is {}",
                    params.horizon_years(),
                    plan.steps_per_year,
                    plan.total_steps(),
                    self.config.max_steps
                ),
            ));
        }

        log::debug!(
            "Simulating {} years on a {}-step/year grid ({} full steps, partial {:.6})",
            params.horizon_years(),
            plan.steps_per_year,
            plan.full_steps,
            plan.partial_fraction
        );

        let timing = self.config.contribution_timing;
        let steps_per_compounding = params.steps_per_compounding();
        let steps_per_contribution = params.steps_per_contribution();
        let periodic_rate = params.periodic_rate();
        let contribution = params.contribution_amount();

        let mut state = SimulationState::new(params.initial_principal());
        if timing == ContributionTiming::StartOfPeriod {
            state.contribute(contribution);
        }
        let mut points = Vec::with_capacity(plan.total_steps() as usize + 1);
        points.push(state.to_point(0.0));
        let mut went_negative = false;

        for k in 1..=plan.full_steps {
            state.advance_step();

            if k % steps_per_compounding == 0 {
                state.compound(periodic_rate);
            }
            if k % steps_per_contribution == 0 {
                // Start-of-period contributions only when another period begins before the horizon
                let period_starts = k < plan.full_steps || plan.partial_fraction > 0.0;
                match timing {
                    ContributionTiming::EndOfPeriod => state.contribute(contribution),
                    ContributionTiming::StartOfPeriod if period_starts => state.contribute(contribution),
                    ContributionTiming::StartOfPeriod => {}
                }
            }

            if state.value < 0.0 && !went_negative {
                went_negative = true;
                log::warn!(
                    "Portfolio value went negative ({:.2}) at step {}; withdrawals exceed the balance",
                    state.value,
                    k
                );
            }
            points.push(state.to_point(k as f64 / plan.steps_per_year as f64));
        }

        if plan.partial_fraction > 0.0 {
            let k = plan.full_steps + 1;
            state.advance_step();

            // Only the step's own compounding event is prorated; steps that
            // end between events earn nothing, full or partial
            if k % steps_per_compounding == 0 {
                state.compound(periodic_rate * plan.partial_fraction);
                log::debug!(
                    "Horizon ends {:.6} of the way through a compounding step; growth prorated",
                    plan.partial_fraction
                );
            }
            points.push(state.to_point(params.horizon_years()));
        }

        Ok(GrowthSeries::from_parts(*params, plan.steps_per_year, points))
    }
}

/// Simulate a scenario with the default configuration
pub fn simulate(params: ScenarioParameters) -> Result<GrowthSeries> {
    GrowthSimulator::default().simulate(&params)
}
