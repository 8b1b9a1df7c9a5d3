//! Player personality
//!
//! Numeric personality attributes (0-100) plus the discrete traits derived
//! from them. Traits drive deterministic morale rules in the transfer window
//! and conflict risk during the season.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const TRAIT_THRESHOLD: u8 = 70;
const TEMPERAMENT_THRESHOLD: u8 = 30;

/// Discrete personality trait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Trait {
    /// Wants to play at the highest level, resents ignoring better offers
    Ambitious,
    /// Attached to the current club
    Loyal,
    /// Has committed to spend the whole career at one club
    OneClub,
    /// Trains and behaves well, rarely in conflict
    Professional,
    /// Short-tempered, prone to conflicts
    Temperamental,
}

/// Personality archetypes used to generate a starting personality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersonalityArchetype {
    Leader,
    Mercenary,
    ClubServant,
    Maverick,
    Steady,
}

/// Player personality attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personality {
    /// Drive to reach higher levels
    pub ambition: u8,
    /// Attachment to club and teammates
    pub loyalty: u8,
    /// Work ethic
    pub professionalism: u8,
    /// Emotional stability (low = volatile)
    pub temperament: u8,
    /// Explicit one-club pledge
    #[serde(default)]
    pub one_club: bool,
}

impl Default for Personality {
    fn default() -> Self {
        Self { ambition: 50, loyalty: 50, professionalism: 50, temperament: 50, one_club: false }
    }
}

impl Personality {
    pub fn new(ambition: u8, loyalty: u8, professionalism: u8, temperament: u8) -> Self {
        Self {
            ambition: ambition.min(100),
            loyalty: loyalty.min(100),
            professionalism: professionalism.min(100),
            temperament: temperament.min(100),
            one_club: false,
        }
    }

    /// Personality with a single dominant trait, everything else average
    pub fn with_trait(t: Trait) -> Self {
        let mut p = Self::default();
        match t {
            Trait::Ambitious => p.ambition = 85,
            Trait::Loyal => p.loyalty = 85,
            Trait::OneClub => p.one_club = true,
            Trait::Professional => p.professionalism = 85,
            Trait::Temperamental => p.temperament = 15,
        }
        p
    }

    /// Generate personality based on archetype (±12 variation, seeded)
    pub fn generate_archetype(archetype: PersonalityArchetype, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (ambition, loyalty, professionalism, temperament) = match archetype {
            PersonalityArchetype::Leader => (75, 75, 80, 75),
            PersonalityArchetype::Mercenary => (85, 25, 60, 50),
            PersonalityArchetype::ClubServant => (45, 90, 75, 70),
            PersonalityArchetype::Maverick => (70, 40, 35, 20),
            PersonalityArchetype::Steady => (50, 55, 60, 60),
        };
        let mut vary = |base: i32| (base + rng.gen_range(-12..=12)).clamp(0, 100) as u8;

        Self {
            ambition: vary(ambition),
            loyalty: vary(loyalty),
            professionalism: vary(professionalism),
            temperament: vary(temperament),
            one_club: false,
        }
    }

    /// Traits derived from the numeric attributes
    pub fn traits(&self) -> BTreeSet<Trait> {
        let mut traits = BTreeSet::new();
        if self.ambition >= TRAIT_THRESHOLD {
            traits.insert(Trait::Ambitious);
        }
        if self.loyalty >= TRAIT_THRESHOLD {
            traits.insert(Trait::Loyal);
        }
        if self.one_club {
            traits.insert(Trait::OneClub);
        }
        if self.professionalism >= TRAIT_THRESHOLD {
            traits.insert(Trait::Professional);
        }
        if self.temperament <= TEMPERAMENT_THRESHOLD {
            traits.insert(Trait::Temperamental);
        }
        traits
    }

    pub fn has(&self, t: Trait) -> bool {
        self.traits().contains(&t)
    }

    /// Per-season probability of a dressing-room conflict
    pub fn conflict_risk(&self) -> f64 {
        let base = 0.04 + (100 - self.temperament.min(100)) as f64 / 100.0 * 0.16;
        if self.has(Trait::Professional) {
            base * 0.5
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traits_follow_thresholds() {
        let p = Personality::new(80, 20, 50, 25);
        let traits = p.traits();
        assert!(traits.contains(&Trait::Ambitious));
        assert!(traits.contains(&Trait::Temperamental));
        assert!(!traits.contains(&Trait::Loyal));
    }

    #[test]
    fn test_archetype_is_deterministic() {
        let a = Personality::generate_archetype(PersonalityArchetype::Mercenary, 7);
        let b = Personality::generate_archetype(PersonalityArchetype::Mercenary, 7);
        assert_eq!(a, b);
        assert!(a.ambition >= 73);
    }

    #[test]
    fn test_professional_players_conflict_less() {
        let calm = Personality::with_trait(Trait::Professional);
        let volatile = Personality::with_trait(Trait::Temperamental);
        assert!(calm.conflict_risk() < volatile.conflict_risk());
    }
}
