//! Running portfolio state during a simulation

use super::series::GrowthPoint;

/// Portfolio balances carried from one step to the next
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Current step (0 before the first step)
    pub step: u64,

    /// Portfolio value after everything applied so far
    pub value: f64,

    /// Running sum of contributions
    pub cumulative_contributions: f64,

    /// Growth credited in the current step
    pub step_gain: f64,

    /// Amount contributed in the current step
    pub step_contribution: f64,

    initial_principal: f64,
}

impl SimulationState {
    pub fn new(initial_principal: f64) -> Self {
        Self {
            step: 0,
            value: initial_principal,
            cumulative_contributions: 0.0,
            step_gain: 0.0,
            step_contribution: 0.0,
            initial_principal,
        }
    }

    /// Move to the next step, clearing per-step amounts
    pub fn advance_step(&mut self) {
        self.step += 1;
        self.step_gain = 0.0;
        self.step_contribution = 0.0;
    }

    /// Apply one compounding event at the given periodic rate
    pub fn compound(&mut self, rate: f64) {
        let grown = self.value * (1.0 + rate);
        self.step_gain += grown - self.value;
        self.value = grown;
    }

    /// Add a contribution (negative amounts are withdrawals)
    pub fn contribute(&mut self, amount: f64) {
        self.value += amount;
        self.cumulative_contributions += amount;
        self.step_contribution += amount;
    }

    /// Snapshot the state as a series point at the given time
    pub fn to_point(&self, time_years: f64) -> GrowthPoint {
        GrowthPoint::new(
            self.step,
            time_years,
            self.value,
            self.cumulative_contributions,
            self.step_gain,
            self.step_contribution,
            self.initial_principal,
        )
    }
}
