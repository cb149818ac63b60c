use serde::{Deserialize, Serialize};

/// Converted-score thresholds driving classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationThresholds {
    /// Candidate is clearly manifesting at or above this score.
    pub present_min: i32,
    /// Candidate is leaning at or above this score.
    pub leaning_min: i32,
    /// Balanced category must reach this score to be considered at all.
    pub balanced_min: i32,
    /// Every other category below this makes the balanced category `Present`.
    pub balanced_strict_ceiling: i32,
    /// Every other category below this (and no candidates) makes it `EssentiallyPresent`.
    pub balanced_loose_ceiling: i32,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            present_min: 40,
            leaning_min: 30,
            balanced_min: 60,
            balanced_strict_ceiling: 30,
            balanced_loose_ceiling: 40,
        }
    }
}
