//! Compound Growth - projection engine for portfolios with periodic contributions
//!
//! This library provides:
//! - Validated scenario parameters (principal, contributions, rate, frequencies, horizon)
//! - Step-wise growth simulation with configurable contribution timing
//! - Summary statistics (doubling time, end/start ratio, milestones, accrued gains)
//! - Pointwise scenario comparison with overtake detection
//! - Batch runs over CSV scenario files

pub mod error;
pub mod scenario;
pub mod projection;
pub mod analysis;
pub mod runner;

// Re-export commonly used types
pub use error::{GrowthError, Result};
pub use scenario::{Frequency, NamedScenario, ScenarioParameters};
pub use projection::{simulate, ContributionTiming, GrowthPoint, GrowthSeries, GrowthSimulator, SimulationConfig};
pub use analysis::{compare, summarize, ComparisonResult, SummaryFindings};
pub use runner::ScenarioRunner;
