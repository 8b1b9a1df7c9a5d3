//! Career CLI
//!
//! Plays a whole career in dynamic mode, or resumes a saved one, and prints
//! the final score and legacy tier.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use career_core::models::{
    CareerMode, Personality, PersonalityArchetype, PlayerState, Position, WorldTeams,
};
use career_core::scoring::LeaderboardCategory;
use career_core::{
    CareerConfig, CareerCycle, FileRepository, FluentLocalizer, KeyLocalizer,
    Localize, LoggingObserver, WindowDecision,
};

#[derive(Parser)]
#[command(name = "career")]
#[command(about = "Simulate football careers from academy to retirement", long_about = None)]
struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Config preset (realistic, arcade, hardcore)
    #[arg(long, default_value = "realistic", global = true)]
    preset: String,

    /// YAML or JSON config file; overrides the preset
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding saved careers
    #[arg(long, default_value = "saves", global = true)]
    save_dir: PathBuf,

    /// Narrative locale, e.g. en-US
    #[arg(long, default_value = "en-US", global = true)]
    locale: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a new career until retirement
    Run {
        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, default_value = "Sam Carter")]
        name: String,

        #[arg(long, value_enum, default_value_t = PositionArg::Forward)]
        position: PositionArg,

        #[arg(long, default_value = "England")]
        nationality: String,

        /// Starting club name; defaults to the weakest club of the country
        #[arg(long)]
        club: Option<String>,

        #[arg(long, value_enum)]
        personality: Option<ArchetypeArg>,

        /// Retire after this birthday
        #[arg(long, default_value_t = 35)]
        retire_at: u8,

        /// Stop after this many seasons even before the retirement age
        #[arg(long)]
        seasons: Option<u32>,

        /// Save under this key when the career ends
        #[arg(long)]
        save_as: Option<String>,
    },

    /// Continue a saved career until retirement
    Resume {
        key: String,

        #[arg(long, default_value_t = 35)]
        retire_at: u8,

        #[arg(long)]
        seasons: Option<u32>,
    },

    /// List saved careers
    List,

    /// Print the active configuration as YAML
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum PositionArg {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl From<PositionArg> for Position {
    fn from(arg: PositionArg) -> Self {
        match arg {
            PositionArg::Goalkeeper => Position::Goalkeeper,
            PositionArg::Defender => Position::Defender,
            PositionArg::Midfielder => Position::Midfielder,
            PositionArg::Forward => Position::Forward,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ArchetypeArg {
    Leader,
    Mercenary,
    ClubServant,
    Maverick,
    Steady,
}

impl From<ArchetypeArg> for PersonalityArchetype {
    fn from(arg: ArchetypeArg) -> Self {
        match arg {
            ArchetypeArg::Leader => PersonalityArchetype::Leader,
            ArchetypeArg::Mercenary => PersonalityArchetype::Mercenary,
            ArchetypeArg::ClubServant => PersonalityArchetype::ClubServant,
            ArchetypeArg::Maverick => PersonalityArchetype::Maverick,
            ArchetypeArg::Steady => PersonalityArchetype::Steady,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = std::str::FromStr::from_str(&cli.log_level).unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new().filter_level(level).format_timestamp(None).init();

    let config = load_config(&cli)?;
    let mut repository = FileRepository::new(&cli.save_dir);

    match cli.command {
        Commands::Run { seed, name, position, nationality, club, personality, retire_at, seasons, save_as } => {
            let world = WorldTeams::sample();
            let club = pick_club(&world, &nationality, club.as_deref())?;
            let mut rookie = PlayerState::rookie(&name, position.into(), &nationality, &club)
                .with_mode(CareerMode::Dynamic);
            if let Some(archetype) = personality {
                rookie = rookie.with_personality(Personality::generate_archetype(archetype.into(), seed));
            }

            let career = CareerCycle::new(rookie, world, seed, &config, localizer(&cli.locale))?
                .with_observer(Box::new(LoggingObserver));
            let career = play(career, retire_at, seasons)?;

            if let Some(key) = save_as {
                career.save_to(&mut repository, &key)?;
                println!("Saved to {}", repository.path_for(&key).display());
            }
        }

        Commands::Resume { key, retire_at, seasons } => {
            let career = CareerCycle::load_from(&repository, &key, &config, localizer(&cli.locale))
                .with_context(|| format!("loading career '{}'", key))?
                .with_observer(Box::new(LoggingObserver));
            let career = play(career, retire_at, seasons)?;
            career.save_to(&mut repository, &key)?;
        }

        Commands::List => {
            let saves = repository.all_info();
            if saves.is_empty() {
                println!("No saved careers in {}", cli.save_dir.display());
            }
            for info in saves {
                println!("{}  [{}]", info.display_text(), info.format_timestamp());
            }
        }

        Commands::Config => {
            print!("{}", config.to_yaml()?);
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<CareerConfig> {
    if let Some(path) = &cli.config {
        return CareerConfig::load(path).with_context(|| format!("reading {}", path.display()));
    }
    let from_env = CareerConfig::from_env()?;
    if from_env != CareerConfig::default() {
        return Ok(from_env);
    }
    CareerConfig::preset(&cli.preset).ok_or_else(|| anyhow!("unknown preset '{}'", cli.preset))
}

/// Fluent narrative for the requested locale, plain keys when it cannot load
fn localizer(locale: &str) -> Box<dyn Localize> {
    match FluentLocalizer::new() {
        Ok(mut fluent) => {
            let negotiated = fluent.negotiate_locale(&[locale]);
            if let Err(err) = fluent.set_locale(&negotiated) {
                log::warn!("Locale {} unavailable: {}", negotiated, err);
            }
            Box::new(fluent)
        }
        Err(err) => {
            log::warn!("Falling back to message keys: {}", err);
            Box::new(KeyLocalizer)
        }
    }
}

fn pick_club(
    world: &WorldTeams,
    country: &str,
    name: Option<&str>,
) -> Result<career_core::models::Team> {
    let club = match name {
        Some(name) => world.iter().find(|t| !t.is_youth && t.name.eq_ignore_ascii_case(name)),
        None => world
            .iter()
            .filter(|t| !t.is_youth && t.country == country)
            .min_by_key(|t| (t.reputation, t.id)),
    };
    match club {
        Some(club) => Ok(club.clone()),
        None => bail!("no club found for {}", name.unwrap_or(country)),
    }
}

fn play(mut career: CareerCycle, retire_at: u8, seasons: Option<u32>) -> Result<CareerCycle> {
    let mut played = 0u32;
    while !career.state().is_retired() {
        if career.state().age >= retire_at || seasons.is_some_and(|limit| played >= limit) {
            break;
        }
        let log = career.simulate_season()?;
        println!(
            "Season {:>2} | age {} | {:<22} | {:>2} apps {:>2} goals {:>2} assists | rating {:.2}",
            log.season,
            log.age,
            log.club_name,
            log.stats.matches,
            log.stats.goals,
            log.stats.assists,
            log.stats.average_rating
        );
        played += 1;

        match career.resolve_window()? {
            WindowDecision::Accepted(_) | WindowDecision::Released => {
                let club = career.world().get(career.state().club).map(|t| t.name.as_str()).unwrap_or("?");
                println!("          moved to {}", club);
            }
            WindowDecision::Renewed => println!("          renewed contract"),
            WindowDecision::Stayed => {}
        }
    }

    if !career.state().is_retired() && career.state().age >= retire_at {
        career.retire()?;
    }
    print_summary(&career);
    Ok(career)
}

fn print_summary(career: &CareerCycle) {
    let state = career.state();
    let breakdown = career.breakdown();
    println!();
    println!("{} ({:?}, {})", state.name, state.position, state.nationality);
    println!(
        "   Totals:  {} matches, {} goals, {} assists, {} caps",
        state.totals.matches, state.totals.goals, state.totals.assists, state.international_caps
    );
    println!("   Peak:    {} overall", state.peak_overall);
    println!("   Score:   {}", breakdown.total);
    println!("   Tier:    {}", career.tier().label());

    if let Some(best) = career.leaderboard().top(LeaderboardCategory::Score).first() {
        println!("   Best on record: {} with {}", best.name, best.score);
    }
    if let Ok(json) = serde_json::to_string_pretty(&breakdown) {
        log::debug!("Score breakdown:\n{}", json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use career_core::CareerRepository;
    use std::io::Write;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("career").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_config_file_overrides_preset() {
        let mut cfg = CareerConfig::hardcore();
        cfg.season.cup_rounds = 4;
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(cfg.to_yaml().unwrap().as_bytes()).unwrap();

        let path = file.path().to_str().unwrap();
        let cli = parse(&["--preset", "arcade", "--config", path, "config"]);
        assert_eq!(load_config(&cli).unwrap(), cfg);
    }

    #[test]
    fn test_broken_config_file_is_reported() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(b"season:\n  cup_rounds: 0\n").unwrap();
        let cli = parse(&["--config", file.path().to_str().unwrap(), "config"]);
        let err = load_config(&cli).unwrap_err();
        assert!(format!("{:#}", err).contains("reading"));
    }

    #[test]
    fn test_pick_club_defaults_to_weakest_home_club() {
        let world = WorldTeams::sample();
        assert_eq!(pick_club(&world, "Spain", None).unwrap().name, "CF Meseta");
        assert_eq!(pick_club(&world, "England", Some("royal albion")).unwrap().id.0, 1);
        assert!(pick_club(&world, "Narnia", None).is_err());
        // Academies are never a starting club
        assert!(pick_club(&world, "England", Some("Royal Albion Academy")).is_err());
    }

    #[test]
    fn test_played_career_saves_and_resumes() {
        let dir = TempDir::new().unwrap();
        let mut repository = FileRepository::new(dir.path());
        let config = CareerConfig::default();

        let world = WorldTeams::sample();
        let club = pick_club(&world, "England", None).unwrap();
        let rookie = PlayerState::rookie("Cli Test", Position::Midfielder, "England", &club)
            .with_mode(CareerMode::Dynamic);
        let career = CareerCycle::new(rookie, world, 9, &config, Box::new(KeyLocalizer)).unwrap();
        let career = play(career, 35, Some(2)).unwrap();
        assert_eq!(career.history().len(), 3);
        assert!(!career.state().is_retired());

        career.save_to(&mut repository, "cli-test").unwrap();
        assert!(repository.exists("cli-test"));
        let resumed = CareerCycle::load_from(&repository, "cli-test", &config, Box::new(KeyLocalizer)).unwrap();
        assert_eq!(resumed.state(), career.state());
        assert_eq!(repository.all_info().len(), 1);
    }

    #[test]
    fn test_veteran_retires_at_the_age_limit() {
        let world = WorldTeams::sample();
        let club = pick_club(&world, "Germany", None).unwrap();
        let mut rookie = PlayerState::rookie("Old Hand", Position::Defender, "Germany", &club)
            .with_mode(CareerMode::Dynamic);
        rookie.age = 34;
        let career = CareerCycle::new(rookie, world, 4, &CareerConfig::default(), Box::new(KeyLocalizer)).unwrap();
        let career = play(career, 35, None).unwrap();
        assert!(career.state().is_retired());
        assert_eq!(career.leaderboard().len(), 1);
    }
}
