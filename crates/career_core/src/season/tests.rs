use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::error::CareerError;
use crate::localization::KeyLocalizer;
use crate::models::{
    EventFlag, Flag, Morale, Personality, PlayerAttributes, PlayerState, Position, Team, TeamId,
    Trait, WorldTeams,
};

fn world() -> WorldTeams {
    WorldTeams::sample()
}

fn player_at(club: TeamId, level: u8) -> PlayerState {
    let world = world();
    let team = world.get(club).unwrap();
    let mut p = PlayerState::rookie("Test Player", Position::Forward, "England", team)
        .with_attributes(PlayerAttributes::uniform(level));
    p.age = 24;
    p.start_age = 18;
    p.current_season = 5;
    p
}

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

#[test]
fn test_same_seed_same_season() {
    let world = world();
    let p = player_at(TeamId(4), 72);
    let a = simulate_season(&p, Tactic::Balanced, &world, &KeyLocalizer, &mut rng(99)).unwrap();
    let b = simulate_season(&p, Tactic::Balanced, &world, &KeyLocalizer, &mut rng(99)).unwrap();
    assert_eq!(a.log, b.log);
    assert_eq!(a.state, b.state);
    assert_eq!(a.world, b.world);
}

#[test]
fn test_preconditions() {
    let world = world();
    let mut p = player_at(TeamId(4), 70);
    p.contract_length = 0;
    assert_eq!(
        simulate_season(&p, Tactic::Balanced, &world, &KeyLocalizer, &mut rng(1)).unwrap_err(),
        CareerError::ContractExpired
    );

    let mut p = player_at(TeamId(4), 70);
    p.club = TeamId(999);
    assert_eq!(
        simulate_season(&p, Tactic::Balanced, &world, &KeyLocalizer, &mut rng(1)).unwrap_err(),
        CareerError::UnknownTeam(TeamId(999))
    );

    let mut p = player_at(TeamId(4), 70);
    p.retire();
    assert_eq!(
        simulate_season(&p, Tactic::Balanced, &world, &KeyLocalizer, &mut rng(1)).unwrap_err(),
        CareerError::Retired
    );
}

#[test]
fn test_season_bookkeeping() {
    let world = world();
    let mut p = player_at(TeamId(4), 72);
    p.contract_length = 3;
    p.wage = 100_000;
    p.bank_balance = 0;
    let before_totals = p.totals;
    let out = simulate_season(&p, Tactic::Balanced, &world, &KeyLocalizer, &mut rng(7)).unwrap();
    assert_eq!(out.state.current_season, 6);
    assert_eq!(out.state.age, 25);
    assert_eq!(out.state.contract_length, 2);
    assert_eq!(out.state.bank_balance, 50_000);
    assert_eq!(out.state.totals, before_totals);
    assert_eq!(out.log.season, 5);
    assert_eq!(out.log.age, 24);
    assert_eq!(out.log.club, TeamId(4));
    assert!(!out.log.is_youth);
    assert_eq!(out.log.started_on, "2029-08-01");
    assert!(out.state.transfer_offers.is_empty());
}

#[test]
fn test_fixture_volume_bounds() {
    let world = world();
    for seed in 0..10 {
        // Reputation 92: league + cup + continental (+ club world cup)
        let p = player_at(TeamId(1), 99);
        let out = simulate_season(&p, Tactic::Attacking, &world, &KeyLocalizer, &mut rng(seed)).unwrap();
        assert!(out.log.stats.matches <= 38 + 6 + 13 + 2);
        assert!(out.log.stats.minutes_share > 0.3);
        // Tier 4 club, no continental football
        let p = player_at(TeamId(15), 60);
        let out = simulate_season(&p, Tactic::Balanced, &world, &KeyLocalizer, &mut rng(seed)).unwrap();
        assert!(out.log.stats.matches <= 46 + 6);
    }
}

#[test]
fn test_weak_player_is_benched_and_agitates_second_year() {
    let world = world();
    let mut p = player_at(TeamId(1), 40);
    p.personality = Personality::new(50, 50, 90, 90);
    p.flags.raise(Flag::Benched, 4);
    let out = simulate_season(&p, Tactic::Balanced, &world, &KeyLocalizer, &mut rng(3)).unwrap();
    assert!(out.log.stats.minutes_share < 0.35);
    assert!(out.log.has_event("event-benched"));
    assert!(out.agitating_for_transfer);
    assert_eq!(out.state.agitating_for_transfer, out.agitating_for_transfer);
}

#[test]
fn test_expired_flags_are_pruned() {
    let world = world();
    let mut p = player_at(TeamId(4), 72);
    p.flags.raise(Flag::WantsTransfer, 2);
    let out = simulate_season(&p, Tactic::Balanced, &world, &KeyLocalizer, &mut rng(5)).unwrap();
    assert!(!out.state.flags.iter().any(|f: &EventFlag| f.flag == Flag::WantsTransfer && f.issued_season == 2));
}

#[test]
fn test_contract_expiry_with_low_approval_forces_move() {
    let world = world();
    let mut p = player_at(TeamId(4), 72);
    p.contract_length = 1;
    p.club_approval = 5;
    let out = simulate_season(&p, Tactic::Balanced, &world, &KeyLocalizer, &mut rng(11)).unwrap();
    assert_eq!(out.state.contract_length, 0);
    assert!(out.is_forced_to_move);
    assert!(out.log.has_event("event-contract-expired"));
    assert!(out.log.has_event("event-released"));
}

#[test]
fn test_ambitious_unhappy_player_agitates() {
    let world = world();
    let mut p = player_at(TeamId(4), 72).with_personality(Personality::with_trait(Trait::Ambitious));
    p.morale = Morale::Furious;
    let out = simulate_season(&p, Tactic::Balanced, &world, &KeyLocalizer, &mut rng(2)).unwrap();
    if out.state.morale <= Morale::Unhappy {
        assert!(out.agitating_for_transfer);
    }
}

#[test]
fn test_veterans_decline_physically() {
    let world = world();
    let mut p = player_at(TeamId(4), 75);
    p.age = 33;
    let out = simulate_season(&p, Tactic::Balanced, &world, &KeyLocalizer, &mut rng(4)).unwrap();
    assert!(out.state.attributes.pace < p.attributes.pace);
    assert!(out.state.attributes.physical < p.attributes.physical);
    assert!(out.state.potential >= out.state.overall());
}

#[test]
fn test_world_feedback_changes_league_group() {
    let world = world();
    let p = player_at(TeamId(8), 70);
    let out = simulate_season(&p, Tactic::Balanced, &world, &KeyLocalizer, &mut rng(6)).unwrap();
    // Tier 2: the champion goes up, the bottom side goes down
    let promoted = world.league("England", 2).iter().filter(|t| out.world.get(t.id).unwrap().league_tier == 1).count();
    let relegated = world.league("England", 2).iter().filter(|t| out.world.get(t.id).unwrap().league_tier == 3).count();
    assert_eq!(promoted, 1);
    assert_eq!(relegated, 1);
    assert_eq!(world, WorldTeams::sample());
}

#[test]
fn test_star_gets_called_up() {
    let world = world();
    let p = player_at(TeamId(2), 85);
    let out = simulate_season(&p, Tactic::Balanced, &world, &KeyLocalizer, &mut rng(8)).unwrap();
    assert!(out.log.has_event("event-call-up"));
    assert!(out.state.called_up);
    // Season 5 only has friendlies on the calendar
    assert_eq!(out.log.international.len(), 1);
    assert_eq!(out.log.international[0].competition, "Friendly");
    assert_eq!(out.state.international_caps, 0);

    let again = simulate_season(&out.state, Tactic::Balanced, &world, &KeyLocalizer, &mut rng(8)).unwrap();
    assert!(!again.log.has_event("event-call-up"));
}

#[test]
fn test_competitive_internationals_earn_caps() {
    let world = world();
    let mut p = player_at(TeamId(2), 85);
    p.current_season = 6;
    let mut capped_seasons = 0;
    for seed in 0..10 {
        let out = simulate_season(&p, Tactic::Balanced, &world, &KeyLocalizer, &mut rng(seed)).unwrap();
        let competitive: u32 = out
            .log
            .international
            .iter()
            .filter(|e| e.competition != "Friendly")
            .map(|e| e.matches)
            .sum();
        assert_eq!(out.state.international_caps, competitive);
        if competitive > 0 {
            capped_seasons += 1;
        }
    }
    assert!(capped_seasons > 0);
}

#[test]
fn test_loan_spell_ends_with_return() {
    let world = world();
    let mut p = player_at(TeamId(9), 70);
    p.loan = Some(crate::models::LoanSpell { parent_club: TeamId(4), parent_wage: 77_000, ends_after_season: 5 });
    let out = simulate_season(&p, Tactic::Balanced, &world, &KeyLocalizer, &mut rng(12)).unwrap();
    assert_eq!(out.log.club, TeamId(9));
    assert_eq!(out.state.club, TeamId(4));
    assert_eq!(out.state.wage, 77_000);
    assert!(out.state.loan.is_none());
    assert!(out.log.has_event("event-loan-return"));
}
