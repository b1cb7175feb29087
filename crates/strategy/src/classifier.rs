use common::models::{ProjectionResult, Signal, SignalKind};

pub const BUY_PUMP_PROBABILITY: f64 = 0.6;
pub const BUY_HYPE_SCORE: f64 = 0.6;
pub const BUY_MEDIAN_RETURN: f64 = 0.15;
pub const SELL_MEDIAN_RETURN: f64 = -0.10;

/// Maps a projection and a hype score to a trading signal.
///
/// The cascade is order-sensitive and every comparison strict: BUY needs the
/// pump probability, the hype score and the median return all above their
/// bars; SELL catches a deep negative median; everything else is NEUTRAL.
/// The decision reads only `result` and `hype` — `price` feeds the rationale
/// text and nothing else, so identical inputs always yield the identical
/// signal.
pub fn classify(price: f64, result: &ProjectionResult, hype: f64) -> Signal {
    if result.pump_probability > BUY_PUMP_PROBABILITY
        && hype > BUY_HYPE_SCORE
        && result.median_return > BUY_MEDIAN_RETURN
    {
        let rationale = format!(
            "Current price: US${:.2}\nProjection: +{:.1}% (median), +{:.1}% (95th pctile)\nPump probability: {:.0}% | Hype: {:.0}%",
            price,
            result.median_return * 100.0,
            result.p95_return * 100.0,
            result.pump_probability * 100.0,
            hype * 100.0
        );
        Signal::new(SignalKind::Buy, rationale)
    } else if result.median_return < SELL_MEDIAN_RETURN {
        let rationale = format!(
            "Current price: US${:.2}\nProjection: {:.1}% (median) | Sell to avoid the loss.",
            price,
            result.median_return * 100.0
        );
        Signal::new(SignalKind::Sell, rationale)
    } else {
        let rationale = format!(
            "Projection: {:+.1}% (median) | Hype: {:.0}% | No action.",
            result.median_return * 100.0,
            hype * 100.0
        );
        Signal::new(SignalKind::Neutral, rationale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn result(median: f64, p95: f64, pump: f64) -> ProjectionResult {
        ProjectionResult {
            median_return: median,
            p95_return: p95,
            pump_probability: pump,
        }
    }

    #[test]
    fn test_buy_needs_all_three_conditions() {
        let buy = classify(412.53, &result(0.182, 0.453, 0.72), 0.65);
        assert_eq!(buy.kind, SignalKind::Buy);

        // Drop each leg below its bar in turn.
        assert_eq!(
            classify(412.53, &result(0.182, 0.453, 0.55), 0.65).kind,
            SignalKind::Neutral
        );
        assert_eq!(
            classify(412.53, &result(0.182, 0.453, 0.72), 0.40).kind,
            SignalKind::Neutral
        );
        assert_eq!(
            classify(412.53, &result(0.10, 0.453, 0.72), 0.65).kind,
            SignalKind::Neutral
        );
    }

    #[test]
    fn test_buy_rationale_carries_the_numbers() {
        let signal = classify(412.53, &result(0.182, 0.453, 0.72), 0.65);

        assert!(signal.rationale.contains("412.53"));
        assert!(signal.rationale.contains("+18.2%"));
        assert!(signal.rationale.contains("+45.3%"));
        assert!(signal.rationale.contains("72%"));
        assert!(signal.rationale.contains("65%"));
    }

    #[test]
    fn test_median_return_boundary_is_strict() {
        // Exactly at the bar must not trigger a BUY.
        let signal = classify(100.0, &result(0.15, 0.40, 0.9), 0.9);

        assert_eq!(signal.kind, SignalKind::Neutral);
    }

    #[test]
    fn test_pump_and_hype_boundaries_are_strict() {
        assert_eq!(
            classify(100.0, &result(0.20, 0.40, 0.6), 0.9).kind,
            SignalKind::Neutral
        );
        assert_eq!(
            classify(100.0, &result(0.20, 0.40, 0.9), 0.6).kind,
            SignalKind::Neutral
        );
    }

    #[test]
    fn test_deep_negative_median_sells() {
        let signal = classify(412.53, &result(-0.15, 0.05, 0.1), 0.9);

        assert_eq!(signal.kind, SignalKind::Sell);
        assert!(signal.rationale.contains("-15.0%"));
        assert!(signal.rationale.contains("412.53"));
    }

    #[test]
    fn test_shallow_dip_stays_neutral() {
        let signal = classify(100.0, &result(-0.05, 0.10, 0.2), 0.5);

        assert_eq!(signal.kind, SignalKind::Neutral);
        assert!(signal.rationale.contains("-5.0%"));
        assert!(signal.rationale.contains("50%"));
    }

    #[test]
    fn test_classify_is_deterministic() {
        let first = classify(100.0, &result(0.182, 0.453, 0.72), 0.65);
        let second = classify(100.0, &result(0.182, 0.453, 0.72), 0.65);

        assert_eq!(first, second);
    }

    #[test]
    fn test_flat_projection_with_high_hype_stays_neutral() {
        let mut rng = StdRng::seed_from_u64(7);
        let result = project(100.0, 3, 0.0, 0.0, 1_000, &mut rng).unwrap();

        assert!(result.median_return.abs() < 1e-12);
        assert_eq!(result.pump_probability, 0.0);

        let signal = classify(100.0, &result, 0.9);
        assert_eq!(signal.kind, SignalKind::Neutral);
    }
}
