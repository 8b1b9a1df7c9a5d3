use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::{Builder, Uuid};

use crate::models::{Team, TeamId, WorldTeams};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OfferKind {
    /// Permanent move; `fee` is paid to the current club
    Transfer { fee: i64 },
    /// One-season loan; the borrowing club covers `wage_share` of the wage
    Loan { wage_share: f64 },
}

/// A club's offer for the player, valid for the window it was issued in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: Uuid,
    pub kind: OfferKind,
    pub team: TeamId,
    pub team_name: String,
    pub wage: i64,
    pub contract_length: u8,
    pub issued_season: u32,
}

impl Offer {
    pub fn transfer(team: &Team, fee: i64, wage: i64, contract_length: u8, issued_season: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: OfferKind::Transfer { fee },
            team: team.id,
            team_name: team.name.clone(),
            wage,
            contract_length,
            issued_season,
        }
    }

    pub fn loan(team: &Team, wage_share: f64, wage: i64, issued_season: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: OfferKind::Loan { wage_share },
            team: team.id,
            team_name: team.name.clone(),
            wage,
            contract_length: 1,
            issued_season,
        }
    }

    /// Replace the random id, e.g. with one drawn by [`offer_id`]
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn is_loan(&self) -> bool {
        matches!(self.kind, OfferKind::Loan { .. })
    }

    pub fn fee(&self) -> i64 {
        match self.kind {
            OfferKind::Transfer { fee } => fee,
            OfferKind::Loan { .. } => 0,
        }
    }

    /// Offers lapse once a new season begins
    pub fn is_valid(&self, current_season: u32) -> bool {
        self.issued_season == current_season
    }

    /// Ranking key: club prestige plus pay relative to the market
    pub fn attractiveness(&self, team_reputation: u8, market_wage: i64) -> f64 {
        let pay = if market_wage > 0 { self.wage as f64 / market_wage as f64 } else { 0.0 };
        team_reputation as f64 * 2.0 + pay * 40.0
    }
}

/// Offer id drawn from the caller's RNG, so seeded runs repeat exactly
pub fn offer_id<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// Drop offers whose club no longer exists or whose window has closed
pub fn prune_stale(offers: Vec<Offer>, world: &WorldTeams, current_season: u32) -> Vec<Offer> {
    offers
        .into_iter()
        .filter(|o| o.is_valid(current_season) && world.contains(o.team))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_lapses_next_season() {
        let team = Team::new(3, "Buyer", "England", 1, 80);
        let offer = Offer::transfer(&team, 1_000_000, 90_000, 4, 6);
        assert!(offer.is_valid(6));
        assert!(!offer.is_valid(7));
    }

    #[test]
    fn test_prune_stale_drops_missing_clubs() {
        let mut world = WorldTeams::new();
        let kept = Team::new(1, "Kept", "X", 1, 60);
        let gone = Team::new(2, "Gone", "X", 1, 60);
        world.insert(kept.clone());
        let offers = vec![
            Offer::transfer(&kept, 0, 1, 1, 3),
            Offer::transfer(&gone, 0, 1, 1, 3),
            Offer::transfer(&kept, 0, 1, 1, 2),
        ];
        let pruned = prune_stale(offers, &world, 3);
        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].team, TeamId(1));
    }

    #[test]
    fn test_attractiveness_weighs_reputation_and_pay() {
        let team = Team::new(1, "A", "X", 1, 60);
        let rich = Offer::transfer(&team, 0, 200, 3, 1);
        let poor = Offer::transfer(&team, 0, 100, 3, 1);
        assert!(rich.attractiveness(60, 100) > poor.attractiveness(60, 100));
        assert_eq!(poor.attractiveness(50, 100), 140.0);
    }
}
