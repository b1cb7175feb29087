use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalKind {
    Buy,
    Sell,
    Neutral,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Buy => "BUY",
            SignalKind::Sell => "SELL",
            SignalKind::Neutral => "NEUTRAL",
        }
    }
}

/// Outcome of one classification: the decision plus a human-readable
/// rationale for the alert message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub kind: SignalKind,
    pub rationale: String,
}

impl Signal {
    pub fn new(kind: SignalKind, rationale: impl Into<String>) -> Self {
        Self {
            kind,
            rationale: rationale.into(),
        }
    }

    /// Only non-neutral signals are worth a notification.
    pub fn is_actionable(&self) -> bool {
        self.kind != SignalKind::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_non_neutral_signals_are_actionable() {
        assert!(Signal::new(SignalKind::Buy, "up").is_actionable());
        assert!(Signal::new(SignalKind::Sell, "down").is_actionable());
        assert!(!Signal::new(SignalKind::Neutral, "flat").is_actionable());
    }
}
