//! Scalar findings derived from a single growth series

use serde::{Deserialize, Serialize};

use super::interpolate::first_time_reaching;
use crate::error::{GrowthError, Result};
use crate::projection::GrowthSeries;

/// Upper bound on reported milestones for one series
pub const MAX_MILESTONES: u32 = 100;

/// First time the portfolio reached an integer multiple of its base amount
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub multiple: u32,
    pub time_years: f64,
}

/// Summary statistics for one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryFindings {
    /// Interpolated years until value first reaches twice the principal.
    /// `None` when the principal is zero or the horizon is too short.
    pub doubling_time_years: Option<f64>,

    /// Final value over the principal; `None` for a zero principal
    pub end_start_ratio: Option<f64>,

    pub final_value: f64,

    /// Accrued gains at the horizon
    pub total_gains: f64,

    /// Contributions made over the horizon (excluding the principal)
    pub total_contributed: f64,

    /// Amount the milestones are multiples of: the principal, or the
    /// contribution amount when starting from nothing
    pub milestone_base: Option<f64>,

    pub milestones: Vec<Milestone>,

    /// First contribution event at which the growth credited over the
    /// preceding contribution period exceeded the contribution itself
    pub gains_exceed_contribution_years: Option<f64>,
}

/// Derive summary findings from a series
pub fn summarize(series: &GrowthSeries) -> Result<SummaryFindings> {
    let last = series.last().ok_or(GrowthError::EmptySeries)?;
    let principal = series.initial_principal();
    let params = series.params();

    let doubling_time_years = if principal > 0.0 {
        first_time_reaching(time_values(series), 2.0 * principal)
    } else {
        None
    };

    let end_start_ratio = if principal > 0.0 {
        Some(last.portfolio_value / principal)
    } else {
        None
    };

    let milestone_base = if principal > 0.0 {
        Some(principal)
    } else if params.contribution_amount() > 0.0 {
        Some(params.contribution_amount())
    } else {
        None
    };
    let milestones = match milestone_base {
        Some(base) => find_milestones(series, base, principal == 0.0),
        None => Vec::new(),
    };

    Ok(SummaryFindings {
        doubling_time_years,
        end_start_ratio,
        final_value: last.portfolio_value,
        total_gains: last.cumulative_gains,
        total_contributed: last.cumulative_contributions,
        milestone_base,
        milestones,
        gains_exceed_contribution_years: gains_exceed_contribution(series),
    })
}

fn time_values(series: &GrowthSeries) -> impl Iterator<Item = (f64, f64)> + '_ {
    series.points().iter().map(|p| (p.time_years, p.portfolio_value))
}

fn find_milestones(series: &GrowthSeries, base: f64, include_first: bool) -> Vec<Milestone> {
    let peak = series.values().fold(f64::NEG_INFINITY, f64::max);
    let reached = (peak / base).floor();
    if reached < 1.0 {
        return Vec::new();
    }
    let highest = if reached > MAX_MILESTONES as f64 {
        log::debug!(
            "Series reaches {}x its base of {:.2}; reporting the first {} milestones",
            reached,
            base,
            MAX_MILESTONES
        );
        MAX_MILESTONES
    } else {
        reached as u32
    };
    let lowest = if include_first { 1 } else { 2 };

    (lowest..=highest)
        .filter_map(|multiple| {
            first_time_reaching(time_values(series), multiple as f64 * base)
                .map(|time_years| Milestone { multiple, time_years })
        })
        .collect()
}

fn gains_exceed_contribution(series: &GrowthSeries) -> Option<f64> {
    let contribution = series.params().contribution_amount();
    if contribution <= 0.0 {
        return None;
    }

    let mut window_gain = 0.0;
    for point in series.points().iter().skip(1) {
        window_gain += point.period_gain;
        if point.period_contribution != 0.0 {
            if window_gain > contribution {
                return Some(point.time_years);
            }
            window_gain = 0.0;
        }
    }
    None
}
