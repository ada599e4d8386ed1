//! Growth simulation engine

mod state;
mod engine;
mod series;

pub use state::SimulationState;
pub use engine::{simulate, ContributionTiming, GrowthSimulator, SimulationConfig, DEFAULT_MAX_STEPS};
pub use series::{GrowthPoint, GrowthSeries};
