// Roll outcome value object

use serde::{Deserialize, Serialize};

/// Result of a single loss roll for an insured item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollOutcome {
    Delete,
    Keep,
    /// The trader (or its return chance) could not be resolved.
    NoDecision,
}

impl RollOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RollOutcome::Delete => "Delete",
            RollOutcome::Keep => "Keep",
            RollOutcome::NoDecision => "NoDecision",
        }
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, RollOutcome::Delete)
    }
}
