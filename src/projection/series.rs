//! Growth series output structures

use serde::{Deserialize, Serialize};

use crate::analysis::{summarize, SummaryFindings};
use crate::scenario::ScenarioParameters;

/// Portfolio state at the end of one simulation step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthPoint {
    /// Step index (0 = starting point)
    pub step: u64,

    /// Years elapsed since the start
    pub time_years: f64,

    pub portfolio_value: f64,

    /// Sum of all contributions made so far (excludes the principal)
    pub cumulative_contributions: f64,

    /// `portfolio_value - initial_principal - cumulative_contributions`
    pub cumulative_gains: f64,

    /// Growth credited during this step
    pub period_gain: f64,

    /// Amount contributed during this step
    pub period_contribution: f64,
}

impl GrowthPoint {
    /// Build a point, deriving cumulative gains from the other balances
    pub fn new(
        step: u64,
        time_years: f64,
        portfolio_value: f64,
        cumulative_contributions: f64,
        period_gain: f64,
        period_contribution: f64,
        initial_principal: f64,
    ) -> Self {
        Self {
            step,
            time_years,
            portfolio_value,
            cumulative_contributions,
            cumulative_gains: portfolio_value - initial_principal - cumulative_contributions,
            period_gain,
            period_contribution,
        }
    }

    /// Starting point of a series: the principal alone
    pub fn start(initial_principal: f64) -> Self {
        Self::new(0, 0.0, initial_principal, 0.0, 0.0, 0.0, initial_principal)
    }
}

/// Complete simulated trajectory of one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthSeries {
    /// Parameters the series was produced from
    params: ScenarioParameters,

    /// Grid resolution the simulation ran at
    steps_per_year: u64,

    /// One point per step, starting at time zero
    points: Vec<GrowthPoint>,
}

impl GrowthSeries {
    /// Assemble a series from already computed points.
    ///
    /// No checks are made on the points; [`summarize`] and
    /// [`compare`](crate::analysis::compare) validate what they need.
    pub fn from_parts(params: ScenarioParameters, steps_per_year: u64, points: Vec<GrowthPoint>) -> Self {
        Self {
            params,
            steps_per_year,
            points,
        }
    }

    pub fn params(&self) -> &ScenarioParameters {
        &self.params
    }

    pub fn steps_per_year(&self) -> u64 {
        self.steps_per_year
    }

    pub fn points(&self) -> &[GrowthPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn initial_principal(&self) -> f64 {
        self.params.initial_principal()
    }

    pub fn first(&self) -> Option<&GrowthPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&GrowthPoint> {
        self.points.last()
    }

    pub fn final_value(&self) -> Option<f64> {
        self.last().map(|p| p.portfolio_value)
    }

    pub fn time_points(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.time_years)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.portfolio_value)
    }

    /// Summary findings for this series
    pub fn summary(&self) -> crate::Result<SummaryFindings> {
        summarize(self)
    }

    /// Write every point as a CSV row (with header)
    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for point in &self.points {
            csv_writer.serialize(point)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Frequency;

    fn params() -> ScenarioParameters {
        ScenarioParameters::new(1000.0, 100.0, Frequency::ANNUAL, 0.1, Frequency::ANNUAL, 2.0).unwrap()
    }

    #[test]
    fn test_point_derives_gains() {
        let point = GrowthPoint::new(3, 0.25, 1450.0, 300.0, 12.5, 100.0, 1000.0);
        assert_eq!(point.cumulative_gains, 150.0);

        let start = GrowthPoint::start(1000.0);
        assert_eq!(start.portfolio_value, 1000.0);
        assert_eq!(start.cumulative_gains, 0.0);
    }

    #[test]
    fn test_series_accessors() {
        let points = vec![
            GrowthPoint::start(1000.0),
            GrowthPoint::new(1, 1.0, 1200.0, 100.0, 100.0, 100.0, 1000.0),
            GrowthPoint::new(2, 2.0, 1420.0, 200.0, 120.0, 100.0, 1000.0),
        ];
        let series = GrowthSeries::from_parts(params(), 1, points);

        assert_eq!(series.len(), 3);
        assert_eq!(series.final_value(), Some(1420.0));
        assert_eq!(series.time_points().collect::<Vec<_>>(), vec![0.0, 1.0, 2.0]);
        assert_eq!(series.last().unwrap().cumulative_gains, 220.0);
    }

    #[test]
    fn test_write_csv() {
        let points = vec![
            GrowthPoint::start(1000.0),
            GrowthPoint::new(1, 1.0, 1200.0, 100.0, 100.0, 100.0, 1000.0),
        ];
        let series = GrowthSeries::from_parts(params(), 1, points);

        let mut buf = Vec::new();
        series.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "step,time_years,portfolio_value,cumulative_contributions,cumulative_gains,period_gain,period_contribution"
        );
        assert_eq!(lines.next().unwrap(), "0,0.0,1000.0,0.0,0.0,0.0,0.0");
        assert_eq!(lines.next().unwrap(), "1,1.0,1200.0,100.0,100.0,100.0,100.0");
        assert!(lines.next().is_none());
    }
}
