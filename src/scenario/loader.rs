//! Load named scenarios from CSV

use std::path::Path;

use csv::Reader;
use thiserror::Error;

use super::{Frequency, NamedScenario, ScenarioParameters};
use crate::error::GrowthError;

/// Errors raised while reading a scenario file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read scenario file: {0}")]
    Csv(#[from] csv::Error),

    /// Row numbers are 1-based and exclude the header
    #[error("scenario row {row} ('{name}'): {source}")]
    InvalidRow {
        row: usize,
        name: String,
        #[source]
        source: GrowthError,
    },

    #[error("scenario file contains no scenarios")]
    NoScenarios,
}

/// Raw CSV row matching the scenario file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    name: String,
    initial_principal: f64,
    contribution_amount: f64,
    contribution_frequency: String,
    annual_rate: f64,
    compounding_frequency: String,
    horizon_years: f64,
}

impl CsvRow {
    fn into_scenario(self) -> Result<NamedScenario, (String, GrowthError)> {
        let name = self.name;
        let build = || -> crate::Result<ScenarioParameters> {
            let contribution_frequency =
                Frequency::parse_field("contribution_frequency", &self.contribution_frequency)?;
            let compounding_frequency =
                Frequency::parse_field("compounding_frequency", &self.compounding_frequency)?;
            ScenarioParameters::new(
                self.initial_principal,
                self.contribution_amount,
                contribution_frequency,
                self.annual_rate,
                compounding_frequency,
                self.horizon_years,
            )
        };

        match build() {
            Ok(params) => Ok(NamedScenario { name, params }),
            Err(err) => Err((name, err)),
        }
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<NamedScenario>, LoadError> {
    let reader = Reader::from_path(path)?;
    collect_scenarios(reader)
}

/// Load scenarios from any reader (e.g., string buffer, stdin)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<NamedScenario>, LoadError> {
    collect_scenarios(Reader::from_reader(reader))
}

fn collect_scenarios<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<NamedScenario>, LoadError> {
    let mut scenarios = Vec::new();

    for (idx, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        let scenario = row
            .into_scenario()
            .map_err(|(name, source)| LoadError::InvalidRow { row: idx + 1, name, source })?;
        scenarios.push(scenario);
    }

    if scenarios.is_empty() {
        return Err(LoadError::NoScenarios);
    }

    log::debug!("Loaded {} scenarios", scenarios.len());
    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "name,initial_principal,contribution_amount,contribution_frequency,annual_rate,compounding_frequency,horizon_years\n";

    #[test]
    fn test_load_scenarios_from_reader() {
        let data = format!(
            "{}baseline,1000,100,monthly,0.06,monthly,10\naggressive,1000,100,12,0.08,annual,10\n",
            HEADER
        );
        let scenarios = load_scenarios_from_reader(data.as_bytes()).unwrap();
        assert_eq!(scenarios.len(), 2);

        assert_eq!(scenarios[0].name, "baseline");
        assert_eq!(scenarios[0].params.contribution_frequency(), Frequency::MONTHLY);

        assert_eq!(scenarios[1].name, "aggressive");
        assert_eq!(scenarios[1].params.compounding_frequency(), Frequency::ANNUAL);
        assert_eq!(scenarios[1].params.annual_rate(), 0.08);
    }

    #[test]
    fn test_invalid_row_is_reported_with_position() {
        let data = format!(
            "{}ok,1000,100,monthly,0.06,monthly,10\nbroken,-1,100,monthly,0.06,monthly,10\n",
            HEADER
        );
        let err = load_scenarios_from_reader(data.as_bytes()).unwrap_err();
        match err {
            LoadError::InvalidRow { row, name, source } => {
                assert_eq!(row, 2);
                assert_eq!(name, "broken");
                assert!(matches!(
                    source,
                    GrowthError::InvalidParameter { field: "initial_principal", .. }
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_frequency_names_field() {
        let data = format!("{}weird,1000,100,monthly,0.06,never,10\n", HEADER);
        let err = load_scenarios_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidRow {
                source: GrowthError::InvalidParameter { field: "compounding_frequency", .. },
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_number_is_csv_error() {
        let data = format!("{}bad,lots,100,monthly,0.06,monthly,10\n", HEADER);
        let err = load_scenarios_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn test_empty_file_rejected() {
        let err = load_scenarios_from_reader(HEADER.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::NoScenarios));
    }
}
