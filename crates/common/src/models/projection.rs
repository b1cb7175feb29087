use serde::{Deserialize, Serialize};

/// Summary statistics derived from one simulated price distribution.
/// Returns are fractional (0.15 means +15%); `pump_probability` is in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub median_return: f64,
    pub p95_return: f64,
    pub pump_probability: f64,
}
