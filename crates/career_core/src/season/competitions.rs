//! Competition formats: league table, knockout cups, national-team tournaments
//! and the end-of-season award rules.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::models::{Award, Position, Team, TeamId, Trophy};
use crate::season::matches::{sample_result, Fixture, MatchResult};
use crate::season::tactic::Tactic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Competition {
    League,
    DomesticCup,
    ContinentalCup,
    SecondaryContinentalCup,
    ClubWorldCup,
    Friendly,
    WorldCup,
    ContinentalChampionship,
}

impl Competition {
    pub fn trophy(&self) -> Option<Trophy> {
        match self {
            Competition::League => Some(Trophy::LeagueTitle),
            Competition::DomesticCup => Some(Trophy::DomesticCup),
            Competition::ContinentalCup => Some(Trophy::ContinentalCup),
            Competition::SecondaryContinentalCup => Some(Trophy::SecondaryContinentalCup),
            Competition::ClubWorldCup => Some(Trophy::ClubWorldCup),
            Competition::WorldCup => Some(Trophy::WorldCup),
            Competition::ContinentalChampionship => Some(Trophy::ContinentalChampionship),
            Competition::Friendly => None,
        }
    }

    pub fn is_international(&self) -> bool {
        matches!(
            self,
            Competition::Friendly | Competition::WorldCup | Competition::ContinentalChampionship
        )
    }

    /// Name recorded in `InternationalEntry::competition`
    pub fn name(&self) -> &'static str {
        match self {
            Competition::League => "League",
            Competition::DomesticCup => "Domestic Cup",
            Competition::ContinentalCup => "Continental Cup",
            Competition::SecondaryContinentalCup => "Secondary Continental Cup",
            Competition::ClubWorldCup => "Club World Cup",
            Competition::Friendly => "Friendly",
            Competition::WorldCup => "World Cup",
            Competition::ContinentalChampionship => "Continental Championship",
        }
    }
}

/// A team's fixtures in one competition
#[derive(Debug, Clone)]
pub struct CompetitionRun {
    pub competition: Competition,
    pub fixtures: Vec<(Fixture, MatchResult)>,
    pub won: bool,
}

impl CompetitionRun {
    fn new(competition: Competition) -> Self {
        Self { competition, fixtures: Vec::new(), won: false }
    }

    fn play<R: Rng + ?Sized>(&mut self, fixture: Fixture, draw_band: f64, rng: &mut R) -> MatchResult {
        let result = sample_result(&fixture, draw_band, rng);
        self.fixtures.push((fixture, result));
        result
    }

    pub fn points(&self) -> u32 {
        self.fixtures.iter().map(|(_, r)| r.points()).sum()
    }

    pub fn ppg(&self) -> f64 {
        if self.fixtures.is_empty() {
            return 0.0;
        }
        self.points() as f64 / self.fixtures.len() as f64
    }
}

/// One knockout round: number of legs and opponent strength
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    pub legs: u32,
    pub opponent: f64,
}

/// League fixtures against the rest of the group, round-robin order
pub fn play_league<R: Rng + ?Sized>(
    club: &Team,
    group: &[&Team],
    matches: u32,
    tactic: Tactic,
    draw_band: f64,
    rng: &mut R,
) -> CompetitionRun {
    let mut run = CompetitionRun::new(Competition::League);
    let opponents: Vec<f64> =
        group.iter().filter(|t| t.id != club.id).map(|t| t.squad_strength as f64).collect();
    for i in 0..matches as usize {
        let opponent = match opponents.len() {
            0 => club.squad_strength as f64,
            n => opponents[i % n],
        };
        let fixture = Fixture { team_strength: club.squad_strength as f64, opponent_strength: opponent, tactic };
        run.play(fixture, draw_band, rng);
    }
    run
}

/// Knockout ties until elimination; level ties go to a coin-flip shoot-out
pub fn play_knockout<R: Rng + ?Sized>(
    run: &mut CompetitionRun,
    strength: f64,
    stages: &[Stage],
    tactic: Tactic,
    draw_band: f64,
    rng: &mut R,
) -> bool {
    if stages.is_empty() {
        return false;
    }
    for stage in stages {
        let mut balance = 0i32;
        for _ in 0..stage.legs {
            let fixture = Fixture { team_strength: strength, opponent_strength: stage.opponent, tactic };
            balance += match run.play(fixture, draw_band, rng) {
                MatchResult::Win => 1,
                MatchResult::Draw => 0,
                MatchResult::Loss => -1,
            };
        }
        let through = match balance {
            b if b > 0 => true,
            0 => rng.gen_bool(0.5),
            _ => false,
        };
        if !through {
            return false;
        }
    }
    true
}

/// Group stage of `games` fixtures; a points-per-game of 1.5 goes through
pub fn play_group<R: Rng + ?Sized>(
    run: &mut CompetitionRun,
    strength: f64,
    opponent: f64,
    games: u32,
    tactic: Tactic,
    draw_band: f64,
    rng: &mut R,
) -> bool {
    let mut points = 0;
    for _ in 0..games {
        let fixture = Fixture { team_strength: strength, opponent_strength: opponent, tactic };
        points += run.play(fixture, draw_band, rng).points();
    }
    points as f64 >= games as f64 * 1.5
}

/// Domestic cup: each round is harder, the final is against the country's best
pub fn play_domestic_cup<R: Rng + ?Sized>(
    club: &Team,
    strongest_in_country: u8,
    rounds: u32,
    tactic: Tactic,
    draw_band: f64,
    rng: &mut R,
) -> CompetitionRun {
    let mut run = CompetitionRun::new(Competition::DomesticCup);
    let top = strongest_in_country as f64;
    let stages: Vec<Stage> = (0..rounds)
        .map(|round| Stage { legs: 1, opponent: top - (rounds - 1 - round) as f64 * 3.0 })
        .collect();
    run.won = play_knockout(&mut run, club.squad_strength as f64, &stages, tactic, draw_band, rng);
    run
}

/// Group stage plus two-legged knockout rounds and a one-off final
pub fn play_continental<R: Rng + ?Sized>(
    competition: Competition,
    club: &Team,
    matches: u32,
    tactic: Tactic,
    draw_band: f64,
    rng: &mut R,
) -> CompetitionRun {
    let mut run = CompetitionRun::new(competition);
    let (group_level, step) = match competition {
        Competition::ContinentalCup => (74.0, 2.5),
        _ => (66.0, 2.0),
    };
    let group_games = 6.min(matches);
    let ko_matches = matches.saturating_sub(group_games);
    let strength = club.squad_strength as f64;
    if !play_group(&mut run, strength, group_level, group_games, tactic, draw_band, rng) {
        return run;
    }
    // Two-legged rounds, the final is one match
    let two_legged = ko_matches.saturating_sub(1) / 2;
    let mut stages: Vec<Stage> = (0..two_legged)
        .map(|i| Stage { legs: 2, opponent: group_level + step * (i + 1) as f64 })
        .collect();
    if ko_matches > 0 {
        stages.push(Stage { legs: 1, opponent: group_level + step * (two_legged + 1) as f64 });
    }
    run.won = play_knockout(&mut run, strength, &stages, tactic, draw_band, rng);
    run
}

pub fn play_club_world_cup<R: Rng + ?Sized>(club: &Team, tactic: Tactic, draw_band: f64, rng: &mut R) -> CompetitionRun {
    let mut run = CompetitionRun::new(Competition::ClubWorldCup);
    let stages = [Stage { legs: 1, opponent: 74.0 }, Stage { legs: 1, opponent: 82.0 }];
    run.won = play_knockout(&mut run, club.squad_strength as f64, &stages, tactic, draw_band, rng);
    run
}

/// National-team strength as seen through its best player
pub fn nation_strength(overall: u8) -> f64 {
    overall as f64 * 0.6 + 30.0
}

/// International competitions held in a season
pub fn international_calendar(season: u32) -> Vec<Competition> {
    let mut calendar = vec![Competition::Friendly];
    match season % 4 {
        2 => calendar.push(Competition::WorldCup),
        0 => calendar.push(Competition::ContinentalChampionship),
        _ => {}
    }
    calendar
}

pub fn play_international<R: Rng + ?Sized>(
    competition: Competition,
    overall: u8,
    draw_band: f64,
    rng: &mut R,
) -> CompetitionRun {
    let mut run = CompetitionRun::new(competition);
    let strength = nation_strength(overall);
    let tactic = Tactic::Balanced;
    match competition {
        Competition::WorldCup => {
            if play_group(&mut run, strength, 72.0, 3, tactic, draw_band, rng) {
                let stages: Vec<Stage> =
                    [76.0, 78.0, 80.0, 82.0].iter().map(|&o| Stage { legs: 1, opponent: o }).collect();
                run.won = play_knockout(&mut run, strength, &stages, tactic, draw_band, rng);
            }
        }
        Competition::ContinentalChampionship => {
            if play_group(&mut run, strength, 70.0, 3, tactic, draw_band, rng) {
                let stages: Vec<Stage> =
                    [75.0, 77.0, 79.0].iter().map(|&o| Stage { legs: 1, opponent: o }).collect();
                run.won = play_knockout(&mut run, strength, &stages, tactic, draw_band, rng);
            }
        }
        _ => {
            let games = rng.gen_range(4..=6);
            for _ in 0..games {
                let opponent = rng.gen_range(66.0..78.0);
                run.play(Fixture { team_strength: strength, opponent_strength: opponent, tactic }, draw_band, rng);
            }
        }
    }
    run
}

#[derive(Debug, Clone, Copy)]
pub struct Standing {
    pub team: TeamId,
    pub ppg: f64,
}

/// Final league standings, best first
#[derive(Debug, Clone)]
pub struct LeagueTable {
    pub standings: Vec<Standing>,
}

impl LeagueTable {
    /// The club's ppg comes from its simulated fixtures; the rest from strength plus noise
    pub fn build<R: Rng + ?Sized>(group: &[&Team], club: TeamId, club_ppg: f64, rng: &mut R) -> Self {
        let average = if group.is_empty() {
            0.0
        } else {
            group.iter().map(|t| t.squad_strength as f64).sum::<f64>() / group.len() as f64
        };
        let noise = Normal::new(0.0, 0.18).ok();
        let mut standings: Vec<Standing> = group
            .iter()
            .map(|team| {
                let ppg = if team.id == club {
                    club_ppg
                } else {
                    let jitter = noise.as_ref().map(|n| n.sample(rng)).unwrap_or(0.0);
                    (1.35 + (team.squad_strength as f64 - average) / 12.0 + jitter).clamp(0.2, 2.8)
                };
                Standing { team: team.id, ppg }
            })
            .collect();
        if !standings.iter().any(|s| s.team == club) {
            standings.push(Standing { team: club, ppg: club_ppg });
        }
        standings.sort_by(|a, b| b.ppg.total_cmp(&a.ppg).then(a.team.cmp(&b.team)));
        Self { standings }
    }

    pub fn champion(&self) -> Option<TeamId> {
        self.standings.first().map(|s| s.team)
    }

    pub fn bottom(&self) -> Option<TeamId> {
        if self.standings.len() < 2 {
            return None;
        }
        self.standings.last().map(|s| s.team)
    }

    /// 1-based finishing position
    pub fn position_of(&self, team: TeamId) -> Option<usize> {
        self.standings.iter().position(|s| s.team == team).map(|i| i + 1)
    }
}

/// Strongest senior squad among `teams`
pub fn strongest_in_country(teams: &[&Team]) -> Option<u8> {
    teams.iter().map(|t| t.squad_strength).max()
}

/// Season figures the award panel looks at
#[derive(Debug, Clone, Copy)]
pub struct AwardContext {
    pub position: Position,
    pub age: u8,
    pub overall: u8,
    pub matches: u32,
    pub goals: u32,
    pub clean_sheets: u32,
    pub average_rating: f32,
    pub league_tier: u8,
    /// Continental or world trophy won this season
    pub major_trophy: bool,
}

pub fn season_awards(ctx: &AwardContext) -> Vec<Award> {
    let mut awards = Vec::new();
    if ctx.overall >= 88 && ctx.average_rating >= 7.6 && (ctx.major_trophy || ctx.goals >= 35) {
        awards.push(Award::BallonDor);
    }
    if ctx.goals >= 28 && ctx.league_tier == 1 {
        awards.push(Award::GoldenBoot);
    }
    if ctx.position.is_goalkeeper() && ctx.clean_sheets >= 18 {
        awards.push(Award::GoalkeeperOfTheYear);
    }
    if ctx.age <= 21 && ctx.average_rating >= 7.1 && ctx.matches >= 20 {
        awards.push(Award::YoungPlayerOfTheYear);
    }
    if ctx.average_rating >= 7.4 && ctx.matches >= 25 {
        awards.push(Award::TeamOfTheYear);
    }
    if ctx.average_rating >= 7.2 && ctx.matches >= 20 {
        awards.push(Award::ClubPlayerOfTheSeason);
    }
    awards
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_international_calendar() {
        assert_eq!(international_calendar(1), vec![Competition::Friendly]);
        assert_eq!(international_calendar(2), vec![Competition::Friendly, Competition::WorldCup]);
        assert_eq!(
            international_calendar(4),
            vec![Competition::Friendly, Competition::ContinentalChampionship]
        );
    }

    #[test]
    fn test_league_table_orders_by_ppg() {
        let teams: Vec<Team> = (1..=4).map(|i| Team::new(i, "T", "X", 1, 40 + i as u8 * 10)).collect();
        let group: Vec<&Team> = teams.iter().collect();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let table = LeagueTable::build(&group, TeamId(1), 3.0, &mut rng);
        assert_eq!(table.champion(), Some(TeamId(1)));
        assert_eq!(table.position_of(TeamId(1)), Some(1));
        assert!(table.standings.windows(2).all(|w| w[0].ppg >= w[1].ppg));
    }

    #[test]
    fn test_continental_fixture_volume() {
        let club = Team::new(1, "Big", "X", 1, 95).with_strength(99);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for _ in 0..20 {
            let run = play_continental(Competition::ContinentalCup, &club, 13, Tactic::Balanced, 0.25, &mut rng);
            assert!(run.fixtures.len() >= 6 && run.fixtures.len() <= 13);
            if run.won {
                assert_eq!(run.fixtures.len(), 13);
            }
            let run =
                play_continental(Competition::SecondaryContinentalCup, &club, 11, Tactic::Balanced, 0.25, &mut rng);
            if run.won {
                assert_eq!(run.fixtures.len(), 11);
            }
        }
    }

    #[test]
    fn test_domestic_cup_rounds_bounded() {
        let club = Team::new(1, "A", "X", 1, 70);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..50 {
            let run = play_domestic_cup(&club, 80, 6, Tactic::Balanced, 0.25, &mut rng);
            assert!(!run.fixtures.is_empty() && run.fixtures.len() <= 6);
            if run.won {
                assert_eq!(run.fixtures.len(), 6);
            }
        }
    }

    #[test]
    fn test_cup_without_fixtures_is_not_won() {
        let club = Team::new(1, "A", "X", 1, 70);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let run = play_domestic_cup(&club, 80, 0, Tactic::Balanced, 0.25, &mut rng);
        assert!(run.fixtures.is_empty());
        assert!(!run.won);
    }

    #[test]
    fn test_award_thresholds() {
        let ctx = AwardContext {
            position: Position::Forward,
            age: 20,
            overall: 89,
            matches: 40,
            goals: 36,
            clean_sheets: 0,
            average_rating: 7.8,
            league_tier: 1,
            major_trophy: false,
        };
        let awards = season_awards(&ctx);
        assert!(awards.contains(&Award::BallonDor));
        assert!(awards.contains(&Award::GoldenBoot));
        assert!(awards.contains(&Award::YoungPlayerOfTheYear));
        assert!(!awards.contains(&Award::GoalkeeperOfTheYear));

        let quiet = AwardContext { goals: 3, average_rating: 6.5, ..ctx };
        assert!(season_awards(&quiet).is_empty());
    }
}
