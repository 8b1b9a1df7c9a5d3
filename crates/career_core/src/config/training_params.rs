//! Training Engine tuning

use serde::{Deserialize, Serialize};

/// Training Engine parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingParams {
    /// Attribute points a full-weight Normal session yields at age curve 1.0 (default: 3.0)
    pub base_gain: f32,
    /// Share of the gain credited to the focus's secondary attribute (default: 0.35)
    pub secondary_weight: f32,
    /// Effectiveness weight by ordinal position among concurrent sessions
    pub diminishing: Vec<f32>,
    /// Uniform variance band around the expected gain (default: 0.75..=1.25)
    pub variance_min: f32,
    pub variance_max: f32,
    /// Intense sessions rolling below this variance cost a physical point (default: 0.85)
    pub fatigue_threshold: f32,
    /// Effectiveness bonus per facility tier above the first (default: 0.05)
    pub facility_bonus_per_tier: f32,
    /// Outcome bands by actual/expected ratio
    pub excellent_ratio: f32,
    pub good_ratio: f32,
    pub neutral_ratio: f32,
    /// Nominal session length (default: 12)
    pub duration_weeks: u8,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            base_gain: 3.0,
            secondary_weight: 0.35,
            diminishing: vec![1.0, 0.6, 0.35, 0.15, 0.05],
            variance_min: 0.75,
            variance_max: 1.25,
            fatigue_threshold: 0.85,
            facility_bonus_per_tier: 0.05,
            excellent_ratio: 1.15,
            good_ratio: 0.95,
            neutral_ratio: 0.80,
            duration_weeks: 12,
        }
    }
}

impl TrainingParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.diminishing.is_empty() {
            return Err("training.diminishing must not be empty".into());
        }
        if self.diminishing.windows(2).any(|w| w[1] >= w[0]) {
            return Err("training.diminishing must be strictly decreasing".into());
        }
        if self.diminishing.iter().any(|w| *w <= 0.0 || *w > 1.0) {
            return Err("training.diminishing weights must be in (0, 1]".into());
        }
        if self.variance_min <= 0.0 || self.variance_min > self.variance_max {
            return Err("training.variance band is invalid".into());
        }
        if self.base_gain <= 0.0 {
            return Err("training.base_gain must be positive".into());
        }
        Ok(())
    }
}
