// Qualitative legacy bands
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LegacyTier {
    Journeyman,
    SolidProfessional,
    Established,
    Star,
    Legend,
    AllTimeGreat,
}

impl LegacyTier {
    pub fn from_score(score: i64, peak_overall: u8) -> Self {
        match (score, peak_overall) {
            (s, p) if s >= 14_000 && p >= 90 => LegacyTier::AllTimeGreat,
            (s, p) if s >= 10_000 && p >= 87 => LegacyTier::Legend,
            (s, p) if s >= 7_000 && p >= 83 => LegacyTier::Star,
            (s, p) if s >= 5_000 && p >= 78 => LegacyTier::Established,
            (s, _) if s >= 3_500 => LegacyTier::SolidProfessional,
            _ => LegacyTier::Journeyman,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            LegacyTier::Journeyman => "tier-journeyman",
            LegacyTier::SolidProfessional => "tier-solid-professional",
            LegacyTier::Established => "tier-established",
            LegacyTier::Star => "tier-star",
            LegacyTier::Legend => "tier-legend",
            LegacyTier::AllTimeGreat => "tier-all-time-great",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LegacyTier::Journeyman => "Journeyman",
            LegacyTier::SolidProfessional => "Solid Professional",
            LegacyTier::Established => "Established",
            LegacyTier::Star => "Star",
            LegacyTier::Legend => "Legend",
            LegacyTier::AllTimeGreat => "All-Time Great",
        }
    }
}

impl fmt::Display for LegacyTier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_needs_score_and_peak() {
        assert_eq!(LegacyTier::from_score(15_000, 91), LegacyTier::AllTimeGreat);
        assert_eq!(LegacyTier::from_score(15_000, 88), LegacyTier::Legend);
        assert_eq!(LegacyTier::from_score(15_000, 70), LegacyTier::SolidProfessional);
        assert_eq!(LegacyTier::from_score(5_200, 79), LegacyTier::Established);
        assert_eq!(LegacyTier::from_score(1_000, 99), LegacyTier::Journeyman);
        assert!(LegacyTier::Legend > LegacyTier::Star);
    }
}
