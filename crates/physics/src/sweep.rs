//! One-parameter sweeps used to build charts of impact effects.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::{AsteroidParameters, ImpactError, ImpactResult, compute};

/// Parameter varied by a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SweepAxis {
    Radius,
    Density,
    Speed,
    Angle,
}

impl SweepAxis {
    /// Column name used in exported tables.
    pub fn column(self) -> &'static str {
        match self {
            Self::Radius => "radius_m",
            Self::Density => "density_kg_m3",
            Self::Speed => "speed_m_s",
            Self::Angle => "entry_angle_deg",
        }
    }

    fn apply(self, base: &AsteroidParameters, value: f64) -> AsteroidParameters {
        let mut params = *base;
        match self {
            Self::Radius => params.radius_m = value,
            Self::Density => params.density_kg_m3 = value,
            Self::Speed => params.speed_m_s = value,
            Self::Angle => params.entry_angle_deg = value,
        }
        params
    }
}

impl fmt::Display for SweepAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for SweepAxis {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "radius" | "radius_m" => Ok(Self::Radius),
            "density" | "density_kg_m3" => Ok(Self::Density),
            "speed" | "speed_m_s" => Ok(Self::Speed),
            "angle" | "entry_angle_deg" => Ok(Self::Angle),
            other => Err(SweepError::UnknownAxis(other.to_string())),
        }
    }
}

/// One sample of a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub value: f64,
    pub params: AsteroidParameters,
    pub result: ImpactResult,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SweepError {
    #[error("a sweep needs at least 2 steps, got {0}")]
    TooFewSteps(usize),
    #[error("unknown sweep axis '{0}' (expected radius, density, speed or angle)")]
    UnknownAxis(String),
    #[error(transparent)]
    Impact(#[from] ImpactError),
}

/// Vary `axis` linearly from `start` to `end` (inclusive) in `steps` samples.
///
/// Every sample is validated; the first invalid one aborts the sweep.
pub fn sweep(
    base: &AsteroidParameters,
    axis: SweepAxis,
    start: f64,
    end: f64,
    steps: usize,
) -> Result<Vec<SweepPoint>, SweepError> {
    if steps < 2 {
        return Err(SweepError::TooFewSteps(steps));
    }
    let last = (steps - 1) as f64;
    (0..steps)
        .map(|i| {
            let value = if i == steps - 1 {
                end
            } else {
                start + (end - start) * i as f64 / last
            };
            let params = axis.apply(base, value);
            let result = compute(&params)?;
            Ok(SweepPoint {
                value,
                params,
                result,
            })
        })
        .collect()
}
