//! Scenario parameter types and validation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GrowthError, Result};

/// Number of events (contributions or compounding) per year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Frequency(u32);

impl Frequency {
    pub const ANNUAL: Frequency = Frequency(1);
    pub const SEMI_ANNUAL: Frequency = Frequency(2);
    pub const QUARTERLY: Frequency = Frequency(4);
    pub const MONTHLY: Frequency = Frequency(12);
    pub const BI_WEEKLY: Frequency = Frequency(26);
    pub const WEEKLY: Frequency = Frequency(52);
    pub const DAILY: Frequency = Frequency(365);

    /// Create a frequency from a raw count of events per year.
    /// Zero and negative counts are rejected.
    pub fn new(per_year: i64) -> Result<Self> {
        Self::for_field("frequency", per_year)
    }

    pub(crate) fn for_field(field: &'static str, per_year: i64) -> Result<Self> {
        if per_year <= 0 {
            return Err(GrowthError::invalid(
                field,
                format!("must be a positive number of events per year, got {}", per_year),
            ));
        }
        u32::try_from(per_year)
            .map(Frequency)
            .map_err(|_| GrowthError::invalid(field, format!("{} events per year is too many", per_year)))
    }

    /// Parse either a period name (`monthly`) or an integer count (`12`)
    pub(crate) fn parse_field(field: &'static str, s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let named = match trimmed.to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "annual" | "annually" | "yearly" => Some(Frequency::ANNUAL),
            "semiannual" | "semiannually" => Some(Frequency::SEMI_ANNUAL),
            "quarterly" => Some(Frequency::QUARTERLY),
            "monthly" => Some(Frequency::MONTHLY),
            "biweekly" => Some(Frequency::BI_WEEKLY),
            "weekly" => Some(Frequency::WEEKLY),
            "daily" => Some(Frequency::DAILY),
            _ => None,
        };
        if let Some(freq) = named {
            return Ok(freq);
        }

        let count: i64 = trimmed
            .parse()
            .map_err(|_| GrowthError::invalid(field, format!("unrecognized frequency '{}'", trimmed)))?;
        Self::for_field(field, count)
    }

    /// Events per year
    pub fn per_year(self) -> u32 {
        self.0
    }
}

impl FromStr for Frequency {
    type Err = GrowthError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_field("frequency", s)
    }
}

impl TryFrom<i64> for Frequency {
    type Error = GrowthError;

    fn try_from(per_year: i64) -> Result<Self> {
        Self::new(per_year)
    }
}

impl From<Frequency> for u32 {
    fn from(freq: Frequency) -> u32 {
        freq.0
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Frequency::ANNUAL => write!(f, "annual"),
            Frequency::SEMI_ANNUAL => write!(f, "semi-annual"),
            Frequency::QUARTERLY => write!(f, "quarterly"),
            Frequency::MONTHLY => write!(f, "monthly"),
            Frequency::BI_WEEKLY => write!(f, "bi-weekly"),
            Frequency::WEEKLY => write!(f, "weekly"),
            Frequency::DAILY => write!(f, "daily"),
            Frequency(n) => write!(f, "{}x/year", n),
        }
    }
}

/// Validated description of one growth scenario.
///
/// Only constructible through [`ScenarioParameters::new`] (or deserialization,
/// which runs the same checks), so every instance upholds:
/// - `initial_principal` is finite and non-negative
/// - `horizon_years` is finite and positive
/// - `annual_rate` is finite and keeps `1 + annual_rate / compounding_frequency` positive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParameters")]
pub struct ScenarioParameters {
    initial_principal: f64,
    contribution_amount: f64,
    contribution_frequency: Frequency,
    annual_rate: f64,
    compounding_frequency: Frequency,
    horizon_years: f64,
}

impl ScenarioParameters {
    pub fn new(
        initial_principal: f64,
        contribution_amount: f64,
        contribution_frequency: Frequency,
        annual_rate: f64,
        compounding_frequency: Frequency,
        horizon_years: f64,
    ) -> Result<Self> {
        if !initial_principal.is_finite() || initial_principal < 0.0 {
            return Err(GrowthError::invalid(
                "initial_principal",
                format!("must be a non-negative amount, got {}", initial_principal),
            ));
        }
        if !contribution_amount.is_finite() {
            return Err(GrowthError::invalid(
                "contribution_amount",
                format!("must be finite, got {}", contribution_amount),
            ));
        }
        if !annual_rate.is_finite() {
            return Err(GrowthError::invalid(
                "annual_rate",
                format!("must be finite, got {}", annual_rate),
            ));
        }
        // A periodic rate at or below -100% wipes out (or inverts) the balance
        let periodic_rate = annual_rate / compounding_frequency.per_year() as f64;
        if periodic_rate <= -1.0 {
            return Err(GrowthError::invalid(
                "annual_rate",
                format!(
                    "{} compounded {} loses the whole balance every period",
                    annual_rate, compounding_frequency
                ),
            ));
        }
        if !horizon_years.is_finite() || horizon_years <= 0.0 {
            return Err(GrowthError::invalid(
                "horizon_years",
                format!("must be positive, got {}", horizon_years),
            ));
        }

        Ok(Self {
            initial_principal,
            contribution_amount,
            contribution_frequency,
            annual_rate,
            compounding_frequency,
            horizon_years,
        })
    }

    pub fn initial_principal(&self) -> f64 {
        self.initial_principal
    }

    pub fn contribution_amount(&self) -> f64 {
        self.contribution_amount
    }

    pub fn contribution_frequency(&self) -> Frequency {
        self.contribution_frequency
    }

    pub fn annual_rate(&self) -> f64 {
        self.annual_rate
    }

    pub fn compounding_frequency(&self) -> Frequency {
        self.compounding_frequency
    }

    pub fn horizon_years(&self) -> f64 {
        self.horizon_years
    }

    /// Growth rate applied at each compounding event
    pub fn periodic_rate(&self) -> f64 {
        self.annual_rate / self.compounding_frequency.per_year() as f64
    }

    /// Simulation grid resolution: the least common multiple of both
    /// frequencies, so every contribution and compounding event lands on a step.
    pub fn steps_per_year(&self) -> u64 {
        lcm(
            self.contribution_frequency.per_year() as u64,
            self.compounding_frequency.per_year() as u64,
        )
    }

    /// Grid steps between two compounding events
    pub fn steps_per_compounding(&self) -> u64 {
        self.steps_per_year() / self.compounding_frequency.per_year() as u64
    }

    /// Grid steps between two contribution events
    pub fn steps_per_contribution(&self) -> u64 {
        self.steps_per_year() / self.contribution_frequency.per_year() as u64
    }

    /// Copy of these parameters with a different horizon
    pub fn with_horizon(&self, horizon_years: f64) -> Result<Self> {
        Self::new(
            self.initial_principal,
            self.contribution_amount,
            self.contribution_frequency,
            self.annual_rate,
            self.compounding_frequency,
            horizon_years,
        )
    }

    /// Copy of these parameters with a different annual rate
    pub fn with_annual_rate(&self, annual_rate: f64) -> Result<Self> {
        Self::new(
            self.initial_principal,
            self.contribution_amount,
            self.contribution_frequency,
            annual_rate,
            self.compounding_frequency,
            self.horizon_years,
        )
    }
}

/// Unvalidated mirror of [`ScenarioParameters`] used for deserialization
#[derive(Debug, Deserialize)]
struct RawParameters {
    initial_principal: f64,
    contribution_amount: f64,
    contribution_frequency: Frequency,
    annual_rate: f64,
    compounding_frequency: Frequency,
    horizon_years: f64,
}

impl TryFrom<RawParameters> for ScenarioParameters {
    type Error = GrowthError;

    fn try_from(raw: RawParameters) -> Result<Self> {
        ScenarioParameters::new(
            raw.initial_principal,
            raw.contribution_amount,
            raw.contribution_frequency,
            raw.annual_rate,
            raw.compounding_frequency,
            raw.horizon_years,
        )
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

fn lcm(a: u64, b: u64) -> u64 {
    a / gcd(a, b) * b
}
