use serde::Serialize;
use thiserror::Error;

pub type Year = u16;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Tier {
    Top,
    Mid,
    Standard,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TierRates {
    pub top: f64,
    pub mid: f64,
    pub standard: f64,
}

impl TierRates {
    pub const ZERO: TierRates = TierRates {
        top: 0.0,
        mid: 0.0,
        standard: 0.0,
    };

    pub fn rate(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Top => self.top,
            Tier::Mid => self.mid,
            Tier::Standard => self.standard,
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct PayScale {
    pub name: &'static str,
    pub rows: &'static [(Year, TierRates)],
}

impl PayScale {
    pub fn years(&self) -> Vec<Year> {
        self.rows.iter().map(|(year, _)| *year).collect()
    }

    pub fn base_year(&self) -> Year {
        self.rows[0].0
    }

    pub fn rate(&self, year: Year, tier: Tier) -> Result<f64, RateError> {
        self.rows
            .iter()
            .find(|(row_year, _)| *row_year == year)
            .map(|(_, rates)| rates.rate(tier))
            .ok_or(RateError::MissingRate {
                series: self.name,
                year,
            })
    }
}

#[derive(Copy, Clone, Debug)]
pub struct IndexTable {
    pub name: &'static str,
    pub label: &'static str,
    pub rows: &'static [(Year, f64)],
}

impl IndexTable {
    pub fn rate(&self, year: Year) -> Result<f64, RateError> {
        self.rows
            .iter()
            .find(|(row_year, _)| *row_year == year)
            .map(|(_, rate)| *rate)
            .ok_or(RateError::MissingRate {
                series: self.name,
                year,
            })
    }
}

/// Delta applies when the running value is at or below the ceiling.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Band {
    pub ceiling: f64,
    pub delta: f64,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AdjustmentKind {
    Flat(f64),
    Banded(&'static [Band]),
}

impl AdjustmentKind {
    /// First matching band wins; above every ceiling the delta is 0.
    pub fn delta_for(&self, value: f64) -> f64 {
        match self {
            AdjustmentKind::Flat(delta) => *delta,
            AdjustmentKind::Banded(bands) => bands
                .iter()
                .find(|band| value <= band.ceiling)
                .map(|band| band.delta)
                .unwrap_or(0.0),
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct AdjustmentRule {
    pub year: Year,
    pub id: &'static str,
    pub label: &'static str,
    pub kind: AdjustmentKind,
    pub enabled: bool,
}

#[derive(Copy, Clone, Debug)]
pub struct Scenario {
    pub id: &'static str,
    pub label: &'static str,
    pub scale: PayScale,
    pub rules: &'static [AdjustmentRule],
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trajectory {
    pub years: Vec<Year>,
    pub values: Vec<f64>,
    pub effective_rates: Vec<f64>,
}

impl Trajectory {
    pub fn final_value(&self) -> f64 {
        self.values.last().copied().unwrap_or(0.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum RateError {
    #[error("no rate defined for {series} in {year}")]
    MissingRate { series: &'static str, year: Year },
}
