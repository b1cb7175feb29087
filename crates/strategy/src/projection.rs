use std::cmp::Ordering;

use ndarray::Array1;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use common::models::ProjectionResult;

pub const DAYS_PER_YEAR: f64 = 365.0;

/// A simulated outcome counts toward the pump probability once it clears
/// this fractional gain over the spot price.
pub const PUMP_THRESHOLD: f64 = 0.15;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("price must be a positive number, got {0}")]
    InvalidPrice(f64),

    #[error("projection horizon must be at least one day")]
    InvalidHorizon,

    #[error("sample count must be positive")]
    InvalidSampleCount,

    #[error("drift must be finite, got {0}")]
    InvalidDrift(f64),

    #[error("volatility must be finite and non-negative, got {0}")]
    InvalidVolatility(f64),
}

/// Horizon and sample count for one projection run. More samples buy a
/// smoother distribution with CPU time; callers tune the trade-off.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProjectionConfig {
    pub horizon_days: u32,
    pub sample_count: usize,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_days: 3,
            sample_count: 50_000,
        }
    }
}

/// Monte Carlo price projection over `horizon_days`.
///
/// Draws `sample_count` log-return shocks from
/// `Normal(drift * dt, volatility * sqrt(dt))` with `dt = horizon_days / 365`
/// and maps each to a terminal price `price * exp(shock)`. Summarizes the
/// simulated distribution as the median and 95th-percentile returns plus the
/// fraction of outcomes beating [`PUMP_THRESHOLD`].
///
/// `volatility = 0` is valid and collapses to the single deterministic
/// outcome `exp(drift * dt) - 1`. The generator is caller-supplied so a
/// seeded run reproduces its numbers exactly.
pub fn project<R: Rng + ?Sized>(
    price: f64,
    horizon_days: u32,
    drift: f64,
    volatility: f64,
    sample_count: usize,
    rng: &mut R,
) -> Result<ProjectionResult, ProjectionError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ProjectionError::InvalidPrice(price));
    }
    if horizon_days == 0 {
        return Err(ProjectionError::InvalidHorizon);
    }
    if sample_count == 0 {
        return Err(ProjectionError::InvalidSampleCount);
    }
    if !drift.is_finite() {
        return Err(ProjectionError::InvalidDrift(drift));
    }
    if !volatility.is_finite() || volatility < 0.0 {
        return Err(ProjectionError::InvalidVolatility(volatility));
    }

    let dt = f64::from(horizon_days) / DAYS_PER_YEAR;
    let shocks = Normal::new(drift * dt, volatility * dt.sqrt())
        .map_err(|_| ProjectionError::InvalidVolatility(volatility))?;

    let simulated: Array1<f64> = (0..sample_count)
        .map(|_| price * shocks.sample(rng).exp())
        .collect();

    let pump_price = price * (1.0 + PUMP_THRESHOLD);
    let pumped = simulated.iter().filter(|&&s| s > pump_price).count();

    let mut returns = (&simulated / price - 1.0).to_vec();
    returns.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    Ok(ProjectionResult {
        median_return: percentile(&returns, 50.0),
        p95_return: percentile(&returns, 95.0),
        pump_probability: pumped as f64 / sample_count as f64,
    })
}

/// Linearly interpolated percentile over an ascending-sorted slice.
fn percentile(sorted: &[f64], pct: f64) -> f64 {
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;

    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (rank - lo as f64) * (sorted[hi] - sorted[lo])
    }
}
