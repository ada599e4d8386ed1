//! Scenario definitions and CSV loading

mod params;
pub mod loader;

pub use params::{Frequency, ScenarioParameters};
pub use loader::{load_scenarios, load_scenarios_from_reader, LoadError};

use serde::{Deserialize, Serialize};

/// Scenario parameters tagged with a display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedScenario {
    pub name: String,
    pub params: ScenarioParameters,
}

impl NamedScenario {
    pub fn new(name: impl Into<String>, params: ScenarioParameters) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}
