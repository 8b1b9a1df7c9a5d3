//! Clubs and the world registry they live in.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const LOWEST_TIER: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u32);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub country: String,
    /// 1 = top flight
    pub league_tier: u8,
    /// 0-100
    pub reputation: u8,
    /// Training facility tier 1-5
    pub facility_tier: u8,
    /// Average overall of the first-team squad
    pub squad_strength: u8,
    /// Academy / youth side
    #[serde(default)]
    pub is_youth: bool,
}

impl Team {
    pub fn new(id: u32, name: &str, country: &str, league_tier: u8, reputation: u8) -> Self {
        let squad_strength = (reputation as f32 * 0.45 + 40.0).round() as u8;
        let facility_tier = (reputation / 20).clamp(1, 5);
        Self {
            id: TeamId(id),
            name: name.to_string(),
            country: country.to_string(),
            league_tier: league_tier.clamp(1, LOWEST_TIER),
            reputation: reputation.min(100),
            facility_tier,
            squad_strength,
            is_youth: false,
        }
    }

    pub fn youth(id: u32, name: &str, country: &str) -> Self {
        let mut team = Self::new(id, name, country, LOWEST_TIER, 20);
        team.is_youth = true;
        team.squad_strength = 48;
        team
    }

    pub fn with_facility(mut self, tier: u8) -> Self {
        self.facility_tier = tier.clamp(1, 5);
        self
    }

    pub fn with_strength(mut self, strength: u8) -> Self {
        self.squad_strength = strength;
        self
    }

    /// Star rating 1-5 derived from reputation
    pub fn stars(&self) -> u8 {
        match self.reputation {
            85..=100 => 5,
            70..=84 => 4,
            55..=69 => 3,
            40..=54 => 2,
            _ => 1,
        }
    }

    /// Wage multiplier clubs apply over the market wage
    pub fn wage_factor(&self) -> f64 {
        0.6 + self.reputation as f64 / 100.0
    }

    pub fn adjust_reputation(&mut self, delta: i32) {
        self.reputation = (self.reputation as i32 + delta).clamp(0, 100) as u8;
    }
}

/// Registry of every club in the simulated world
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldTeams {
    teams: BTreeMap<TeamId, Team>,
}

impl WorldTeams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, team: Team) {
        self.teams.insert(team.id, team);
    }

    pub fn remove(&mut self, id: TeamId) -> Option<Team> {
        self.teams.remove(&id)
    }

    pub fn get(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(&id)
    }

    pub fn get_mut(&mut self, id: TeamId) -> Option<&mut Team> {
        self.teams.get_mut(&id)
    }

    pub fn contains(&self, id: TeamId) -> bool {
        self.teams.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Senior teams of one league group, in id order
    pub fn league(&self, country: &str, tier: u8) -> Vec<&Team> {
        self.teams
            .values()
            .filter(|t| !t.is_youth && t.country == country && t.league_tier == tier)
            .collect()
    }

    /// Youth academy of a country, if any
    pub fn academy(&self, country: &str) -> Option<&Team> {
        self.teams.values().find(|t| t.is_youth && t.country == country)
    }

    /// A small but complete world: three countries, four tiers in the first,
    /// two tiers elsewhere, and an academy per country.
    pub fn sample() -> Self {
        let mut world = Self::new();
        let clubs: &[(u32, &str, &str, u8, u8)] = &[
            (1, "Royal Albion", "England", 1, 92),
            (2, "Northbridge City", "England", 1, 86),
            (3, "Kingsport United", "England", 1, 78),
            (4, "Harbour Athletic", "England", 1, 70),
            (5, "Millbrook Rovers", "England", 1, 62),
            (6, "Ashford Town", "England", 1, 58),
            (7, "Castleford", "England", 2, 52),
            (8, "Westvale", "England", 2, 48),
            (9, "Redmoor Wanderers", "England", 2, 45),
            (10, "Stonegate", "England", 2, 40),
            (11, "Oakham Borough", "England", 3, 35),
            (12, "Elmfield", "England", 3, 32),
            (13, "Brightwater", "England", 3, 30),
            (14, "Fenwick Park", "England", 4, 24),
            (15, "Hollow Lane", "England", 4, 20),
            (16, "Marlow Vale", "England", 4, 18),
            (21, "Real Costa", "Spain", 1, 94),
            (22, "Atlético Sierra", "Spain", 1, 84),
            (23, "Deportivo Mar", "Spain", 1, 72),
            (24, "CD Llanura", "Spain", 1, 60),
            (25, "UD Ribera", "Spain", 2, 46),
            (26, "CF Meseta", "Spain", 2, 42),
            (31, "Rhein Union", "Germany", 1, 90),
            (32, "Borussia Tal", "Germany", 1, 80),
            (33, "SV Heide", "Germany", 1, 66),
            (34, "FC Auen", "Germany", 1, 56),
            (35, "TSV Hügel", "Germany", 2, 44),
            (36, "SC Moor", "Germany", 2, 38),
        ];
        for (id, name, country, tier, reputation) in clubs {
            world.insert(Team::new(*id, name, country, *tier, *reputation));
        }
        world.insert(Team::youth(100, "Royal Albion Academy", "England"));
        world.insert(Team::youth(101, "Real Costa Cantera", "Spain"));
        world.insert(Team::youth(102, "Rhein Union Jugend", "Germany"));
        world
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_world_has_league_groups() {
        let world = WorldTeams::sample();
        assert_eq!(world.league("England", 1).len(), 6);
        assert!(world.league("England", 1).iter().all(|t| !t.is_youth));
        assert!(world.academy("Spain").is_some());
    }

    #[test]
    fn test_reputation_is_clamped() {
        let mut team = Team::new(1, "A", "X", 1, 98);
        team.adjust_reputation(10);
        assert_eq!(team.reputation, 100);
        team.adjust_reputation(-150);
        assert_eq!(team.reputation, 0);
    }

    #[test]
    fn test_stars_follow_reputation() {
        assert_eq!(Team::new(1, "A", "X", 1, 90).stars(), 5);
        assert_eq!(Team::new(2, "B", "X", 3, 30).stars(), 1);
    }
}
