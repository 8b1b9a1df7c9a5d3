//! Trophy and award records
//!
//! Both are counted through `Tally<K>` and valued through a single
//! `weighted_sum` helper shared by scoring and leaderboard submission.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Prestige tier of a competition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Prestige {
    Domestic,
    Continental,
    World,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Trophy {
    LeagueTitle,
    DomesticCup,
    ContinentalCup,
    SecondaryContinentalCup,
    ClubWorldCup,
    ContinentalChampionship,
    WorldCup,
}

impl Trophy {
    pub const ALL: [Trophy; 7] = [
        Trophy::LeagueTitle,
        Trophy::DomesticCup,
        Trophy::ContinentalCup,
        Trophy::SecondaryContinentalCup,
        Trophy::ClubWorldCup,
        Trophy::ContinentalChampionship,
        Trophy::WorldCup,
    ];

    pub fn prestige(&self) -> Prestige {
        match self {
            Trophy::LeagueTitle | Trophy::DomesticCup => Prestige::Domestic,
            Trophy::ContinentalCup
            | Trophy::SecondaryContinentalCup
            | Trophy::ContinentalChampionship => Prestige::Continental,
            Trophy::ClubWorldCup | Trophy::WorldCup => Prestige::World,
        }
    }

    /// Won with the national team rather than the club
    pub fn is_international(&self) -> bool {
        matches!(self, Trophy::ContinentalChampionship | Trophy::WorldCup)
    }

    /// Localization key
    pub fn key(&self) -> &'static str {
        match self {
            Trophy::LeagueTitle => "trophy-league",
            Trophy::DomesticCup => "trophy-domestic-cup",
            Trophy::ContinentalCup => "trophy-continental-cup",
            Trophy::SecondaryContinentalCup => "trophy-secondary-continental-cup",
            Trophy::ClubWorldCup => "trophy-club-world-cup",
            Trophy::ContinentalChampionship => "trophy-continental-championship",
            Trophy::WorldCup => "trophy-world-cup",
        }
    }
}

impl fmt::Display for Trophy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Award {
    BallonDor,
    GoldenBoot,
    GoalkeeperOfTheYear,
    YoungPlayerOfTheYear,
    TeamOfTheYear,
    ClubPlayerOfTheSeason,
}

impl Award {
    pub const ALL: [Award; 6] = [
        Award::BallonDor,
        Award::GoldenBoot,
        Award::GoalkeeperOfTheYear,
        Award::YoungPlayerOfTheYear,
        Award::TeamOfTheYear,
        Award::ClubPlayerOfTheSeason,
    ];

    pub fn prestige(&self) -> Prestige {
        match self {
            Award::BallonDor => Prestige::World,
            Award::GoldenBoot | Award::GoalkeeperOfTheYear => Prestige::Continental,
            _ => Prestige::Domestic,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Award::BallonDor => "award-ballon-dor",
            Award::GoldenBoot => "award-golden-boot",
            Award::GoalkeeperOfTheYear => "award-goalkeeper",
            Award::YoungPlayerOfTheYear => "award-young-player",
            Award::TeamOfTheYear => "award-team-of-the-year",
            Award::ClubPlayerOfTheSeason => "award-club-player",
        }
    }
}

impl fmt::Display for Award {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Count of occurrences per key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tally<K: Ord> {
    counts: BTreeMap<K, u32>,
}

impl<K: Ord> Default for Tally<K> {
    fn default() -> Self {
        Self { counts: BTreeMap::new() }
    }
}

impl<K: Ord + Copy> Tally<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    pub fn count(&self, key: K) -> u32 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, u32)> + '_ {
        self.counts.iter().map(|(k, v)| (*k, *v))
    }

    pub fn merge(&mut self, other: &Tally<K>) {
        for (k, v) in other.iter() {
            *self.counts.entry(k).or_insert(0) += v;
        }
    }
}

impl<K: Ord + Copy> FromIterator<K> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for key in iter {
            tally.add(key);
        }
        tally
    }
}

/// Weight per key; keys missing from the table weigh zero
pub type WeightTable<K> = BTreeMap<K, i64>;

pub fn weighted_sum<K: Ord + Copy>(tally: &Tally<K>, table: &WeightTable<K>) -> i64 {
    tally.iter().map(|(k, n)| table.get(&k).copied().unwrap_or(0) * n as i64).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_sum_counts_repeats() {
        let tally: Tally<Trophy> =
            [Trophy::LeagueTitle, Trophy::LeagueTitle, Trophy::WorldCup].into_iter().collect();
        let table: WeightTable<Trophy> =
            [(Trophy::LeagueTitle, 10), (Trophy::WorldCup, 100)].into_iter().collect();
        assert_eq!(weighted_sum(&tally, &table), 120);
    }

    #[test]
    fn test_merge_adds_counts() {
        let mut a: Tally<Award> = [Award::GoldenBoot].into_iter().collect();
        let b: Tally<Award> = [Award::GoldenBoot, Award::BallonDor].into_iter().collect();
        a.merge(&b);
        assert_eq!(a.count(Award::GoldenBoot), 2);
        assert_eq!(a.total(), 3);
    }
}
