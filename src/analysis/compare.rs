//! Pointwise comparison of two growth series

use serde::{Deserialize, Serialize};

use super::interpolate::time_at_value;
use crate::error::{GrowthError, Result};
use crate::projection::GrowthSeries;

/// Time points closer than this are considered the same grid point
const TIME_TOLERANCE: f64 = 1e-9;

/// Value differences within this band count as level
const LEVEL_TOLERANCE: f64 = 1e-9;

/// Which of the two compared series is ahead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Leader {
    A,
    B,
}

/// The first point at which the trailing series passes the leading one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Overtake {
    /// Interpolated crossing time
    pub time_years: f64,

    /// Index of the first grid point after the crossing
    pub point_index: usize,

    /// Series ahead after the crossing
    pub leader: Leader,
}

/// Comparison of two series on the same time grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub overtake: Option<Overtake>,

    /// Shared time grid
    pub time_points: Vec<f64>,

    /// `value_a - value_b` at every time point
    pub differences: Vec<f64>,

    /// `final_a / final_b`; `None` when series B ends at zero
    pub final_ratio: Option<f64>,
}

impl ComparisonResult {
    /// Difference at the horizon
    pub fn final_difference(&self) -> Option<f64> {
        self.differences.last().copied()
    }
}

fn level_sign(difference: f64) -> i8 {
    if difference > LEVEL_TOLERANCE {
        1
    } else if difference < -LEVEL_TOLERANCE {
        -1
    } else {
        0
    }
}

/// Compare two series built on an identical time grid
pub fn compare(series_a: &GrowthSeries, series_b: &GrowthSeries) -> Result<ComparisonResult> {
    if series_a.len() != series_b.len() {
        return Err(GrowthError::incompatible(format!(
            "point count {} vs {}",
            series_a.len(),
            series_b.len()
        )));
    }

    let points_a = series_a.points();
    let points_b = series_b.points();
    for (idx, (a, b)) in points_a.iter().zip(points_b).enumerate() {
        if (a.time_years - b.time_years).abs() > TIME_TOLERANCE {
            return Err(GrowthError::incompatible(format!(
                "time point {} differs: {} vs {} years",
                idx, a.time_years, b.time_years
            )));
        }
    }

    let time_points: Vec<f64> = series_a.time_points().collect();
    let differences: Vec<f64> = points_a
        .iter()
        .zip(points_b)
        .map(|(a, b)| a.portfolio_value - b.portfolio_value)
        .collect();

    let overtake = find_overtake(&time_points, &differences);
    if let Some(o) = &overtake {
        log::debug!("Series {:?} takes the lead at {:.4} years", o.leader, o.time_years);
    }

    let final_ratio = match (series_a.final_value(), series_b.final_value()) {
        (Some(a), Some(b)) if b != 0.0 => Some(a / b),
        _ => None,
    };

    Ok(ComparisonResult {
        overtake,
        time_points,
        differences,
        final_ratio,
    })
}

/// Compare every series in `others` against `baseline`
pub fn compare_all(baseline: &GrowthSeries, others: &[GrowthSeries]) -> Result<Vec<ComparisonResult>> {
    others.iter().map(|other| compare(other, baseline)).collect()
}

/// The reference sign is the sign at time zero, or the first non-level
/// difference when the series start level.
fn find_overtake(time_points: &[f64], differences: &[f64]) -> Option<Overtake> {
    let mut reference = 0i8;

    for (idx, &difference) in differences.iter().enumerate() {
        let sign = level_sign(difference);
        if reference == 0 {
            reference = sign;
            continue;
        }
        if sign == -reference {
            // idx > 0 here: the reference was set at an earlier point
            let time_years = time_at_value(
                time_points[idx - 1],
                differences[idx - 1],
                time_points[idx],
                difference,
                0.0,
            );
            let leader = if sign > 0 { Leader::A } else { Leader::B };
            return Some(Overtake {
                time_years,
                point_index: idx,
                leader,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::simulate;
    use crate::scenario::{Frequency, ScenarioParameters};
    use approx::assert_relative_eq;

    fn annual(principal: f64, contribution: f64, rate: f64, years: f64) -> GrowthSeries {
        let params =
            ScenarioParameters::new(principal, contribution, Frequency::ANNUAL, rate, Frequency::ANNUAL, years)
                .unwrap();
        simulate(params).unwrap()
    }

    #[test]
    fn test_series_compared_with_itself() {
        let params =
            ScenarioParameters::new(1000.0, 100.0, Frequency::MONTHLY, 0.06, Frequency::MONTHLY, 10.0).unwrap();
        let series = simulate(params).unwrap();
        let result = compare(&series, &series).unwrap();

        assert_eq!(result.overtake, None);
        assert_eq!(result.differences.len(), 121);
        assert!(result.differences.iter().all(|&d| d == 0.0));
        assert_eq!(result.final_ratio, Some(1.0));
    }

    #[test]
    fn test_different_horizons_incompatible() {
        let a = annual(1000.0, 100.0, 0.05, 10.0);
        let b = annual(1000.0, 100.0, 0.05, 5.0);
        let err = compare(&a, &b).unwrap_err();
        assert!(matches!(err, GrowthError::IncompatibleSeries { .. }));
    }

    #[test]
    fn test_different_grids_incompatible() {
        // Same point count, different spacing
        let a = annual(1000.0, 100.0, 0.05, 12.0);
        let params =
            ScenarioParameters::new(1000.0, 100.0, Frequency::MONTHLY, 0.05, Frequency::MONTHLY, 1.0).unwrap();
        let b = simulate(params).unwrap();
        assert_eq!(a.len(), b.len());

        let err = compare(&a, &b).unwrap_err();
        assert!(matches!(err, GrowthError::IncompatibleSeries { .. }));
    }

    #[test]
    fn test_growth_overtakes_head_start() {
        // A: 2000 at 0%. B: 1000 at 100%: 1000, 2000, 4000
        let a = annual(2000.0, 0.0, 0.0, 3.0);
        let b = annual(1000.0, 0.0, 1.0, 3.0);
        let result = compare(&a, &b).unwrap();

        // Level at year 1, B ahead from year 2
        assert_eq!(result.differences, vec![1000.0, 0.0, -2000.0, -6000.0]);
        let overtake = result.overtake.unwrap();
        assert_eq!(overtake.leader, Leader::B);
        assert_eq!(overtake.point_index, 2);
        assert_eq!(overtake.time_years, 1.0);
        assert_eq!(result.final_ratio, Some(0.25));
    }

    #[test]
    fn test_crossing_time_is_interpolated() {
        // A: 1500 flat. B: 1000 + 200/year: difference 500, 300, 100, -100
        let a = annual(1500.0, 0.0, 0.0, 3.0);
        let b = annual(1000.0, 200.0, 0.0, 3.0);
        let result = compare(&a, &b).unwrap();

        let overtake = result.overtake.unwrap();
        assert_eq!(overtake.leader, Leader::B);
        assert_eq!(overtake.point_index, 3);
        assert_relative_eq!(overtake.time_years, 2.5, max_relative = 1e-12);
    }

    #[test]
    fn test_level_start_uses_first_divergence() {
        // Same principal: the faster series pulls ahead but never "overtakes"
        let a = annual(1000.0, 0.0, 0.07, 10.0);
        let b = annual(1000.0, 0.0, 0.05, 10.0);
        let result = compare(&a, &b).unwrap();
        assert_eq!(result.overtake, None);
        assert!(result.final_difference().unwrap() > 0.0);

        // Same principal, A ahead early on contributions, B wins on growth
        let a = annual(1000.0, 300.0, 0.0, 20.0);
        let b = annual(1000.0, 0.0, 0.25, 20.0);
        let result = compare(&a, &b).unwrap();
        let overtake = result.overtake.unwrap();
        assert_eq!(overtake.leader, Leader::B);
        assert!(overtake.time_years > 1.0);
    }

    #[test]
    fn test_compare_all_against_baseline() {
        let baseline = annual(1000.0, 100.0, 0.05, 5.0);
        let others = vec![annual(1000.0, 100.0, 0.07, 5.0), annual(1000.0, 50.0, 0.05, 5.0)];
        let results = compare_all(&baseline, &others).unwrap();

        assert_eq!(results.len(), 2);
        assert!(results[0].final_ratio.unwrap() > 1.0);
        assert!(results[1].final_ratio.unwrap() < 1.0);

        let mismatched = vec![annual(1000.0, 100.0, 0.05, 6.0)];
        assert!(compare_all(&baseline, &mismatched).is_err());
    }
}
