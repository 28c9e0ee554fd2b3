use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bonus entry whose score is added to the weekly total unweighted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardItem {
    pub id: Uuid,
    /// e.g. "Running intensity".
    pub name: String,
    /// Raw magnitude (kilometres, repetitions). Informational only.
    pub amount: f64,
    pub score: f64,
}

impl RewardItem {
    pub fn new(name: impl Into<String>, amount: f64, score: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            score,
        }
    }
}
