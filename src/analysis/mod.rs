//! Summary statistics and scenario comparison

mod compare;
mod interpolate;
mod summary;

pub use compare::{compare, compare_all, ComparisonResult, Leader, Overtake};
pub use interpolate::{first_time_reaching, time_at_value};
pub use summary::{summarize, Milestone, SummaryFindings, MAX_MILESTONES};
