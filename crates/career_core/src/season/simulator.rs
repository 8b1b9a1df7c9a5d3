//! Season Simulator
//!
//! One call plays a whole season for the player's club: every fixture of the
//! league, the domestic cup and any continental competition, the national
//! team calendar, awards, ageing, contract countdown and the transfer signals
//! the offer generator reacts to.
//!
//! The simulator never accumulates career totals and never retires the
//! player; both belong to the orchestrator that commits the outcome.

use rand::Rng;

use crate::config::SeasonParams;
use crate::error::{CareerError, Result};
use crate::localization::Localize;
use crate::models::team::LOWEST_TIER;
use crate::models::{
    season_start_date, Attribute, Award, Event, EventKind, Flag, InternationalEntry, Morale,
    PlayerState, Prestige, SeasonLog, SeasonStats, Tally, Team, TeamId, Trait, Trophy, WorldTeams,
};
use crate::scoring::totals::is_friendly;
use crate::season::competitions::{
    international_calendar, play_club_world_cup, play_continental, play_domestic_cup,
    play_international, play_league, season_awards, strongest_in_country, AwardContext,
    Competition, CompetitionRun, LeagueTable,
};
use crate::season::matches::{logistic, sample_line, MatchLine};
use crate::season::tactic::Tactic;

pub const GOAL_MILESTONES: [u32; 5] = [50, 100, 200, 300, 500];
pub const MATCH_MILESTONES: [u32; 4] = [100, 250, 500, 750];

/// Chance a called-up player features in a given international fixture
const INTERNATIONAL_APPEARANCE: f64 = 0.85;

/// Result of one simulated season. `state` has already moved on to the next
/// season; `log` is the immutable record of the one just played.
#[derive(Debug, Clone)]
pub struct SeasonOutcome {
    pub state: PlayerState,
    pub log: SeasonLog,
    pub agitating_for_transfer: bool,
    pub is_forced_to_move: bool,
    pub world: WorldTeams,
}

#[derive(Debug, Clone, Default)]
pub struct SeasonSimulator {
    params: SeasonParams,
}

impl SeasonSimulator {
    pub fn new(params: SeasonParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SeasonParams {
        &self.params
    }

    /// Expected share of fixtures the manager picks the player for
    pub fn selection_share(&self, state: &PlayerState, team: &Team, manager_conflict: bool) -> f64 {
        let conflict = if manager_conflict { 3.0 } else { 0.0 };
        let x = state.overall() as f64 - team.squad_strength as f64
            + state.morale.selection_modifier()
            + (state.team_chemistry as f64 - 50.0) / 25.0
            - conflict;
        logistic(x / self.params.selection_scale)
    }

    pub fn simulate<R: Rng + ?Sized>(
        &self,
        state: &PlayerState,
        tactic: Tactic,
        world: &WorldTeams,
        localize: &dyn Localize,
        rng: &mut R,
    ) -> Result<SeasonOutcome> {
        if state.is_retired() {
            return Err(CareerError::Retired);
        }
        if state.contract_length == 0 {
            return Err(CareerError::ContractExpired);
        }
        let club = world.get(state.club).cloned().ok_or(CareerError::UnknownTeam(state.club))?;

        let season = state.current_season;
        let draw_band = self.params.draw_band;
        let mut next = state.clone();
        let mut world = world.clone();
        let mut events: Vec<Event> = Vec::new();
        let describe = |kind: EventKind| Event::described(season, kind, localize);

        // Start of season
        next.transfer_offers.clear();
        next.flags.prune(season);
        let benched_last_season = next.flags.is_raised(Flag::Benched, season);

        // Dressing room
        let unsettled = if state.morale <= Morale::Unhappy { 1.5 } else { 1.0 };
        let risk = (state.personality.conflict_risk() * unsettled).clamp(0.0, 1.0);
        let manager_conflict = rng.gen_bool(risk);
        let teammate_conflict = rng.gen_bool(risk * 0.75);
        if manager_conflict {
            next.flags.raise(Flag::ManagerConflict, season);
            events.push(describe(EventKind::ManagerConflict));
        }
        if teammate_conflict {
            next.flags.raise(Flag::TeammateConflict, season);
            events.push(describe(EventKind::TeammateConflict));
        }

        let share = self.selection_share(&next, &club, manager_conflict).clamp(0.0, 1.0);
        let injury_weeks = self.roll_injury(&next, season, rng);
        if injury_weeks > 0 {
            events.push(describe(EventKind::Injury { weeks: injury_weeks }));
        }
        let unavailable = (injury_weeks as f64 / 40.0).clamp(0.0, 1.0);

        // Club fixtures
        let group: Vec<Team> = world.league(&club.country, club.league_tier).into_iter().cloned().collect();
        let group_refs: Vec<&Team> = group.iter().collect();
        let country: Vec<&Team> =
            world.iter().filter(|t| !t.is_youth && t.country == club.country).collect();
        let strongest = strongest_in_country(&country).unwrap_or(club.squad_strength);

        let league_matches = self.params.league_matches_for(club.league_tier);
        let mut runs = vec![
            play_league(&club, &group_refs, league_matches, tactic, draw_band, rng),
            play_domestic_cup(&club, strongest, self.params.cup_rounds, tactic, draw_band, rng),
        ];
        if club.reputation >= self.params.continental_reputation {
            let run = play_continental(
                Competition::ContinentalCup,
                &club,
                self.params.continental_matches,
                tactic,
                draw_band,
                rng,
            );
            let champions = run.won;
            runs.push(run);
            if champions {
                runs.push(play_club_world_cup(&club, tactic, draw_band, rng));
            }
        } else if club.reputation >= self.params.secondary_continental_reputation {
            runs.push(play_continental(
                Competition::SecondaryContinentalCup,
                &club,
                self.params.secondary_continental_matches,
                tactic,
                draw_band,
                rng,
            ));
        }

        // Player appearances
        let overall = next.overall();
        let mut lines: Vec<MatchLine> = Vec::new();
        let mut club_fixtures = 0u32;
        for run in &runs {
            for (fixture, result) in &run.fixtures {
                club_fixtures += 1;
                let fit = !rng.gen_bool(unavailable);
                if fit && rng.gen_bool(share) {
                    lines.push(sample_line(fixture, *result, next.position, overall, rng));
                }
            }
        }
        let stats = aggregate(&lines, club_fixtures);
        if state.totals.matches == 0 && stats.matches > 0 {
            events.push(describe(EventKind::Debut));
        }

        // League table, promotion and relegation
        let mut trophies: Tally<Trophy> = Tally::new();
        let table = LeagueTable::build(&group_refs, club.id, runs[0].ppg(), rng);
        if table.champion() == Some(club.id) {
            trophies.add(Trophy::LeagueTitle);
        }
        for run in runs.iter().skip(1).filter(|r| r.won) {
            if let Some(trophy) = run.competition.trophy() {
                trophies.add(trophy);
            }
        }
        self.apply_world_feedback(&mut world, &club, &table, &runs, &group, rng);
        if let Some(team) = world.get(club.id) {
            if team.league_tier < club.league_tier {
                events.push(describe(EventKind::Promoted));
            } else if team.league_tier > club.league_tier {
                events.push(describe(EventKind::Relegated));
            }
        }

        // National team
        let mut international = Vec::new();
        if overall >= self.params.call_up_overall {
            if !next.called_up {
                events.push(describe(EventKind::InternationalCallUp { country: next.nationality.clone() }));
                next.called_up = true;
            }
            for competition in international_calendar(season) {
                let run = play_international(competition, overall, draw_band, rng);
                let entry = international_entry(&run, next.position, overall, rng);
                if !is_friendly(&entry.competition) {
                    next.international_caps += entry.matches;
                }
                if run.won {
                    if let Some(trophy) = competition.trophy() {
                        trophies.add(trophy);
                    }
                }
                international.push(entry);
            }
        }
        for (trophy, count) in trophies.iter() {
            for _ in 0..count {
                events.push(describe(EventKind::TrophyWon { trophy }));
            }
        }

        // Awards
        let award_ctx = AwardContext {
            position: next.position,
            age: state.age,
            overall,
            matches: stats.matches,
            goals: stats.goals,
            clean_sheets: stats.clean_sheets,
            average_rating: stats.average_rating,
            league_tier: club.league_tier,
            major_trophy: trophies.iter().any(|(t, _)| t.prestige() >= Prestige::Continental),
        };
        let awards: Tally<Award> = season_awards(&award_ctx).into_iter().collect();
        for (award, _) in awards.iter() {
            events.push(describe(EventKind::AwardWon { award }));
        }

        // Milestones
        let (season_matches, season_goals) = counted_contribution(&stats, &international);
        for goals in crossed(&GOAL_MILESTONES, state.totals.goals, season_goals) {
            events.push(describe(EventKind::GoalMilestone { goals }));
        }
        for matches in crossed(&MATCH_MILESTONES, state.totals.matches, season_matches) {
            events.push(describe(EventKind::MatchMilestone { matches }));
        }

        // Morale, chemistry, approval
        let benched = stats.minutes_share < self.params.benched_share;
        if benched {
            next.morale = next.morale.step_down();
            next.flags.raise(Flag::Benched, season);
            events.push(describe(EventKind::Benched));
        } else if stats.average_rating >= 7.0 && stats.minutes_share >= 0.5 {
            next.morale = next.morale.step_up();
        }
        if manager_conflict {
            next.morale = next.morale.step_down();
        }
        next.adjust_chemistry(if stats.minutes_share >= 0.6 { 8 } else { -5 });
        if teammate_conflict {
            next.adjust_chemistry(-10);
        }
        let approval = if stats.matches > 0 {
            ((stats.average_rating as f64 - 6.5) * 10.0).round().clamp(-10.0, 10.0) as i32
        } else {
            -5
        };
        next.adjust_approval(approval - if manager_conflict { 15 } else { 0 });

        // Finances
        next.bank_balance += (next.wage as f64 * self.params.income_share).round() as i64;

        // Ageing and reputation
        self.age_player(&mut next, &stats, rng);
        let target = next.overall() as f64 * 0.7
            + if stats.matches > 0 { (stats.average_rating as f64 - 6.0) * 8.0 } else { 0.0 }
            + trophies.total() as f64 * 3.0
            + awards.total() as f64 * 4.0;
        let target = target.clamp(0.0, 100.0);
        let drift = ((target - next.reputation as f64) / 3.0).round() as i32;
        next.reputation = (next.reputation as i32 + drift).clamp(0, 100) as u8;
        if next.has_trait(Trait::Ambitious) && next.reputation as i32 > club.reputation as i32 + 10 {
            next.flags.raise(Flag::WantsTransfer, season);
        }

        // Contract and loan
        next.contract_length = next.contract_length.saturating_sub(1);
        let mut forced = false;
        if let Some(loan) = next.loan.clone() {
            if loan.ends_after_season <= season {
                next.loan = None;
                next.club = loan.parent_club;
                next.wage = loan.parent_wage;
                match world.get(loan.parent_club) {
                    Some(parent) => {
                        events.push(describe(EventKind::LoanReturn { to: parent.name.clone() }));
                        if next.overall() as i32 + (self.params.release_gap as i32) < parent.squad_strength as i32 {
                            forced = true;
                        }
                    }
                    None => forced = true,
                }
                if forced {
                    events.push(describe(EventKind::Released));
                }
            }
        }
        if !forced && next.contract_length == 0 {
            events.push(describe(EventKind::ContractExpired));
            if self.club_declines_renewal(&next, &world) {
                forced = true;
                events.push(describe(EventKind::Released));
            }
        }

        // Transfer signals
        let agitating = (benched && benched_last_season)
            || next.flags.is_raised(Flag::WantsTransfer, season)
            || (next.has_trait(Trait::Ambitious) && next.morale <= Morale::Unhappy)
            || manager_conflict;
        next.agitating_for_transfer = agitating;
        next.is_forced_to_move = forced;

        let log = SeasonLog {
            season,
            age: state.age,
            club: club.id,
            club_name: club.name.clone(),
            is_youth: club.is_youth,
            stats,
            international,
            events,
            trophies,
            awards,
            started_on: season_start_date(state.first_year, season),
        };

        next.current_season = season + 1;
        debug_assert!(next.bank_balance >= 0);
        debug_assert!(next.potential >= next.overall());

        log::debug!(
            "Season {} for {} at {}: {} apps, {} goals, rating {:.2}, forced={}, agitating={}",
            season,
            next.name,
            club.name,
            log.stats.matches,
            log.stats.goals,
            log.stats.average_rating,
            forced,
            agitating
        );

        Ok(SeasonOutcome { state: next, log, agitating_for_transfer: agitating, is_forced_to_move: forced, world })
    }

    fn roll_injury<R: Rng + ?Sized>(&self, state: &PlayerState, season: u32, rng: &mut R) -> u8 {
        let mut risk = self.params.injury_risk;
        if state.flags.raised_in(Flag::IntenseTraining, season) {
            risk *= 1.5;
        } else if state.flags.raised_in(Flag::LightTraining, season) {
            risk *= 0.7;
        }
        if state.age > 30 {
            risk *= 1.3;
        }
        if rng.gen_bool(risk.clamp(0.0, 1.0)) {
            rng.gen_range(2..=16)
        } else {
            0
        }
    }

    fn club_declines_renewal(&self, state: &PlayerState, world: &WorldTeams) -> bool {
        let Some(team) = world.get(state.club) else {
            return true;
        };
        state.club_approval < self.params.renewal_approval
            || (state.overall() as i32 + self.params.release_gap as i32) < team.squad_strength as i32
    }

    fn age_player<R: Rng + ?Sized>(&self, state: &mut PlayerState, stats: &SeasonStats, rng: &mut R) {
        state.age = state.age.saturating_add(1);
        if state.age > 30 {
            state.attributes.apply_delta(Attribute::Pace, -rng.gen_range(1..=3));
            state.attributes.apply_delta(Attribute::Physical, -rng.gen_range(1..=3));
        } else if state.age <= 23 && stats.matches >= 20 {
            state.attributes.apply_delta(Attribute::Mental, 1);
        }
        state.recalculate();
    }

    /// Trophy reputation, promotion/relegation and squad strength drift
    fn apply_world_feedback<R: Rng + ?Sized>(
        &self,
        world: &mut WorldTeams,
        club: &Team,
        table: &LeagueTable,
        runs: &[CompetitionRun],
        group: &[Team],
        rng: &mut R,
    ) {
        if let Some(champion) = table.champion() {
            if let Some(team) = world.get_mut(champion) {
                team.adjust_reputation(3);
                if team.league_tier > 1 {
                    team.league_tier -= 1;
                }
            }
        }
        if let Some(bottom) = table.bottom() {
            if let Some(team) = world.get_mut(bottom) {
                team.adjust_reputation(-2);
                if team.league_tier < LOWEST_TIER {
                    team.league_tier += 1;
                }
            }
        }
        let club_bonus: i32 = runs
            .iter()
            .skip(1)
            .filter(|r| r.won)
            .map(|r| match r.competition {
                Competition::DomesticCup => 1,
                Competition::ContinentalCup => 5,
                Competition::SecondaryContinentalCup => 2,
                Competition::ClubWorldCup => 2,
                _ => 0,
            })
            .sum();
        if let Some(team) = world.get_mut(club.id) {
            team.adjust_reputation(club_bonus);
        }
        let ids: Vec<TeamId> = group.iter().map(|t| t.id).collect();
        for id in ids {
            if let Some(team) = world.get_mut(id) {
                let drift: i32 = rng.gen_range(-1..=1);
                team.squad_strength = (team.squad_strength as i32 + drift).clamp(30, 99) as u8;
            }
        }
    }
}

/// Season figures from individual match lines
fn aggregate(lines: &[MatchLine], fixtures: u32) -> SeasonStats {
    let matches = lines.len() as u32;
    let average_rating = if lines.is_empty() {
        0.0
    } else {
        lines.iter().map(|l| l.rating).sum::<f32>() / matches as f32
    };
    SeasonStats {
        matches,
        goals: lines.iter().map(|l| l.goals).sum(),
        assists: lines.iter().map(|l| l.assists).sum(),
        clean_sheets: lines.iter().filter(|l| l.clean_sheet).count() as u32,
        average_rating,
        minutes_share: if fixtures == 0 { 0.0 } else { matches as f32 / fixtures as f32 },
    }
}

fn international_entry<R: Rng + ?Sized>(
    run: &CompetitionRun,
    position: crate::models::Position,
    overall: u8,
    rng: &mut R,
) -> InternationalEntry {
    let mut entry = InternationalEntry {
        competition: run.competition.name().to_string(),
        matches: 0,
        goals: 0,
        assists: 0,
    };
    for (fixture, result) in &run.fixtures {
        if rng.gen_bool(INTERNATIONAL_APPEARANCE) {
            let line = sample_line(fixture, *result, position, overall, rng);
            entry.matches += 1;
            entry.goals += line.goals;
            entry.assists += line.assists;
        }
    }
    entry
}

/// Matches and goals this season that count toward career totals
fn counted_contribution(stats: &SeasonStats, international: &[InternationalEntry]) -> (u32, u32) {
    international
        .iter()
        .filter(|e| !is_friendly(&e.competition))
        .fold((stats.matches, stats.goals), |(m, g), e| (m + e.matches, g + e.goals))
}

/// Milestones passed when going from `before` to `before + added`
fn crossed(milestones: &[u32], before: u32, added: u32) -> Vec<u32> {
    let after = before + added;
    milestones.iter().copied().filter(|m| before < *m && after >= *m).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crossed_milestones() {
        assert_eq!(crossed(&GOAL_MILESTONES, 45, 10), vec![50]);
        assert_eq!(crossed(&GOAL_MILESTONES, 50, 10), Vec::<u32>::new());
        assert_eq!(crossed(&GOAL_MILESTONES, 90, 120), vec![100, 200]);
    }

    #[test]
    fn test_friendlies_do_not_count() {
        let stats = SeasonStats { matches: 30, goals: 10, ..Default::default() };
        let international = vec![
            InternationalEntry { competition: "Friendly".into(), matches: 5, goals: 3, assists: 0 },
            InternationalEntry { competition: "World Cup".into(), matches: 7, goals: 4, assists: 1 },
        ];
        assert_eq!(counted_contribution(&stats, &international), (37, 14));
    }

    #[test]
    fn test_aggregate_shares() {
        let line = MatchLine { goals: 1, assists: 0, clean_sheet: false, rating: 7.0 };
        let stats = aggregate(&[line, line], 4);
        assert_eq!(stats.matches, 2);
        assert_eq!(stats.goals, 2);
        assert!((stats.minutes_share - 0.5).abs() < 1e-6);
        assert!((stats.average_rating - 7.0).abs() < 1e-6);
        assert_eq!(aggregate(&[], 0).minutes_share, 0.0);
    }
}
