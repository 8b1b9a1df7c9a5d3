//! JSON API for the career engines
//!
//! Requests carry the whole career state; the engines run with default
//! parameters and the same per-season random streams as `CareerCycle`.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{error, info, warn};
use validator::Validate;

use crate::error::CareerError;
use crate::localization::{FluentLocalizer, KeyLocalizer, Localize};
use crate::models::{History, PlayerState, SeasonLog, WorldTeams};
use crate::rng::{stream_rng, Stream};
use crate::scoring::{CareerScorer, LegacyTier, ScoreBreakdown};
use crate::season::{SeasonSimulator, Tactic};
use crate::training::{Intensity, TrainerTier, TrainingContext, TrainingEngine, TrainingFocus, TrainingPlan, TrainingResult};
use crate::transfers::{Offer, OfferGenerator};

/// API version for schema compatibility
pub const API_VERSION: &str = "v1";

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: String,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Structured API error with codes and details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub details: Option<HashMap<String, serde_json::Value>>,
}

impl ApiError {
    pub fn new(code: &str, message: &str) -> Self {
        Self { code: code.to_string(), message: message.to_string(), details: None }
    }

    pub fn from_career_error(error: &CareerError) -> Self {
        let code = match error {
            CareerError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            CareerError::SlotLimitExceeded { .. } => "SLOT_LIMIT_EXCEEDED",
            CareerError::IneligibleFocus(_) => "INELIGIBLE_FOCUS",
            CareerError::DuplicateFocus(_) => "DUPLICATE_FOCUS",
            CareerError::ContractExpired => "CONTRACT_EXPIRED",
            CareerError::NegotiationRequired => "NEGOTIATION_REQUIRED",
            CareerError::NegotiationRejected(_) => "NEGOTIATION_REJECTED",
            CareerError::ForcedToMove => "FORCED_TO_MOVE",
            CareerError::Retired => "RETIRED",
            CareerError::OfferNotFound(_) => "OFFER_NOT_FOUND",
            CareerError::UnknownTeam(_) => "UNKNOWN_TEAM",
            CareerError::InvalidPhase(_) => "INVALID_PHASE",
            CareerError::SimulationFailed(_) => "SIMULATION_FAILED",
            CareerError::Persistence(_) => "PERSISTENCE_FAILED",
        };
        let mut error_json = Self::new(code, &error.to_string());
        if let CareerError::InsufficientFunds { required, available } = error {
            let details = HashMap::from([
                ("required".to_string(), serde_json::json!(required)),
                ("available".to_string(), serde_json::json!(available)),
            ]);
            error_json.details = Some(details);
        }
        error_json
    }

    pub fn from_validation_errors(errors: validator::ValidationErrors) -> Self {
        let details: HashMap<String, serde_json::Value> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let codes: Vec<String> = errs.iter().map(|e| e.code.to_string()).collect();
                (field.to_string(), serde_json::json!(codes))
            })
            .collect();
        Self { code: "VALIDATION_FAILED".to_string(), message: errors.to_string(), details: Some(details) }
    }
}

/// Training request: a plan for the coming season
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TrainRequest {
    #[validate(length(min = 1, max = 8))]
    pub schema_version: Option<String>,
    pub player: PlayerState,
    #[validate(length(max = 8))]
    pub focuses: Vec<TrainingFocus>,
    #[serde(default)]
    pub intensity: Intensity,
    pub trainer: Option<TrainerTier>,
    /// Defaults to the sample world
    pub world: Option<WorldTeams>,
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainResponse {
    pub player: PlayerState,
    pub results: Vec<TrainingResult>,
    pub total_cost: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SimulateSeasonRequest {
    #[validate(length(min = 1, max = 8))]
    pub schema_version: Option<String>,
    pub player: PlayerState,
    #[serde(default)]
    pub tactic: Tactic,
    pub world: Option<WorldTeams>,
    pub seed: u64,
    /// BCP 47 tag for event descriptions; keys are echoed when absent
    #[validate(length(min = 2, max = 35))]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateSeasonResponse {
    pub player: PlayerState,
    pub log: SeasonLog,
    pub world: WorldTeams,
    pub agitating_for_transfer: bool,
    pub is_forced_to_move: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OffersRequest {
    #[validate(length(min = 1, max = 8))]
    pub schema_version: Option<String>,
    pub player: PlayerState,
    pub world: Option<WorldTeams>,
    pub seed: u64,
    /// Override the pressure stored on the player
    pub agitating: Option<bool>,
    pub forced: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OffersResponse {
    pub offers: Vec<Offer>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScoreRequest {
    #[validate(length(min = 1, max = 8))]
    pub schema_version: Option<String>,
    pub player: PlayerState,
    pub history: History,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub score: i64,
    pub tier: LegacyTier,
    pub tier_label: String,
    pub breakdown: ScoreBreakdown,
}

/// Execute a training plan
pub fn train_json(request_json: &str) -> String {
    info!("Processing training request");
    respond(parse::<TrainRequest>(request_json).and_then(|request| {
        let world = request.world.unwrap_or_else(WorldTeams::sample);
        let team = world
            .get(request.player.club)
            .ok_or_else(|| ApiError::from_career_error(&CareerError::UnknownTeam(request.player.club)))?;
        let plan = TrainingPlan::new(request.focuses, request.intensity, request.trainer);
        let mut rng = stream_rng(request.seed, request.player.current_season, Stream::Training);

        let (player, results) = TrainingEngine::default()
            .apply_training(&request.player, &plan, &TrainingContext::new(team), &mut rng)
            .map_err(|e| career_failure("training", e))?;
        let total_cost: i64 = results.iter().map(|r| r.cost_total).sum();
        info!("Trained {} focus(es) for {}, cost {}", results.len(), player.name, total_cost);
        Ok(TrainResponse { player, results, total_cost })
    }))
}

/// Simulate one season
pub fn simulate_season_json(request_json: &str) -> String {
    info!("Processing season simulation request");
    respond(parse::<SimulateSeasonRequest>(request_json).and_then(|request| {
        let world = request.world.unwrap_or_else(WorldTeams::sample);
        let localizer = localizer_for(request.locale.as_deref());
        let mut rng = stream_rng(request.seed, request.player.current_season, Stream::Season);

        let outcome = SeasonSimulator::default()
            .simulate(&request.player, request.tactic, &world, localizer.as_ref(), &mut rng)
            .map_err(|e| career_failure("season simulation", e))?;
        info!("Simulated season {} for {}", outcome.log.season, outcome.state.name);
        Ok(SimulateSeasonResponse {
            player: outcome.state,
            log: outcome.log,
            world: outcome.world,
            agitating_for_transfer: outcome.agitating_for_transfer,
            is_forced_to_move: outcome.is_forced_to_move,
        })
    }))
}

/// Generate transfer offers
pub fn offers_json(request_json: &str) -> String {
    info!("Processing transfer offers request");
    respond(parse::<OffersRequest>(request_json).and_then(|request| {
        let world = request.world.unwrap_or_else(WorldTeams::sample);
        let agitating = request.agitating.unwrap_or(request.player.agitating_for_transfer);
        let forced = request.forced.unwrap_or(request.player.is_forced_to_move);
        let mut rng = stream_rng(request.seed, request.player.current_season, Stream::Transfers);

        let offers = OfferGenerator::default()
            .generate_offers(&request.player, &world, agitating, forced, &mut rng)
            .map_err(|e| career_failure("offer generation", e))?;
        info!("Generated {} offer(s) for {}", offers.len(), request.player.name);
        Ok(OffersResponse { offers })
    }))
}

/// Score a career
pub fn score_json(request_json: &str) -> String {
    info!("Processing career score request");
    respond(parse::<ScoreRequest>(request_json).map(|request| {
        let scorer = CareerScorer::default();
        let breakdown = scorer.breakdown(&request.player, &request.history);
        let tier = scorer.tier(&request.player, &request.history);
        ScoreResponse { score: breakdown.total, tier, tier_label: tier.label().to_string(), breakdown }
    }))
}

fn parse<T: DeserializeOwned + Validate>(request_json: &str) -> Result<T, ApiError> {
    let request: T = serde_json::from_str(request_json).map_err(|e| {
        error!("Failed to parse request: {}", e);
        ApiError::new("INVALID_JSON", &format!("Invalid JSON format: {}", e))
    })?;
    request.validate().map_err(|e| {
        warn!("Request validation failed: {}", e);
        ApiError::from_validation_errors(e)
    })?;
    Ok(request)
}

fn career_failure(operation: &str, err: CareerError) -> ApiError {
    if err.is_validation() {
        warn!("{} rejected: {}", operation, err);
    } else {
        error!("{} failed: {}", operation, err);
    }
    ApiError::from_career_error(&err)
}

fn respond<T: Serialize>(result: Result<T, ApiError>) -> String {
    let response = match result {
        Ok(data) => ApiResponse::success(data),
        Err(error) => ApiResponse::error(error),
    };
    serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
}

fn localizer_for(locale: Option<&str>) -> Box<dyn Localize> {
    let Some(locale) = locale else {
        return Box::new(KeyLocalizer);
    };
    match FluentLocalizer::new() {
        Ok(mut fluent) => {
            let negotiated = fluent.negotiate_locale(&[locale]);
            if let Err(e) = fluent.set_locale(&negotiated) {
                warn!("Locale {} unavailable: {}", negotiated, e);
            }
            Box::new(fluent)
        }
        Err(e) => {
            warn!("Fluent bundle failed to load, echoing keys: {}", e);
            Box::new(KeyLocalizer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localization::KeyLocalizer;
    use crate::models::{Position, TeamId};
    use serde_json::{json, Value};

    fn player() -> PlayerState {
        let world = WorldTeams::sample();
        PlayerState::rookie("Api Test", Position::Forward, "England", world.get(TeamId(5)).unwrap())
    }

    fn parse_response(raw: &str) -> Value {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_train_json_success() {
        let request = json!({
            "schema_version": "v1",
            "player": player(),
            "focuses": ["Shooting"],
            "trainer": null,
            "world": null,
            "seed": 3
        });
        let response = parse_response(&train_json(&request.to_string()));
        assert_eq!(response["success"], true);
        assert_eq!(response["schema_version"], API_VERSION);
        assert_eq!(response["data"]["total_cost"], 0);
        assert_eq!(response["data"]["results"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_train_json_rejects_ineligible_focus() {
        let request = json!({
            "player": player(),
            "focuses": ["Goalkeeping"],
            "trainer": null,
            "world": null,
            "seed": 3
        });
        let response = parse_response(&train_json(&request.to_string()));
        assert_eq!(response["success"], false);
        assert_eq!(response["error"]["code"], "INELIGIBLE_FOCUS");
    }

    #[test]
    fn test_invalid_json_and_validation() {
        let response = parse_response(&offers_json("{not json"));
        assert_eq!(response["error"]["code"], "INVALID_JSON");

        let request = json!({
            "schema_version": "",
            "player": player(),
            "world": null,
            "seed": 1,
            "agitating": null,
            "forced": null
        });
        let response = parse_response(&offers_json(&request.to_string()));
        assert_eq!(response["error"]["code"], "VALIDATION_FAILED");
        assert!(response["error"]["details"]["schema_version"].is_array());
    }

    #[test]
    fn test_simulate_season_json_is_deterministic() {
        let request = json!({
            "player": player(),
            "world": null,
            "seed": 12,
            "locale": "en-US"
        })
        .to_string();
        let a = parse_response(&simulate_season_json(&request));
        let b = parse_response(&simulate_season_json(&request));
        assert_eq!(a["success"], true);
        assert_eq!(a["data"]["log"], b["data"]["log"]);
        assert_eq!(a["data"]["player"]["current_season"], 2);
    }

    #[test]
    fn test_score_json() {
        let history = History::baseline(TeamId(100), "Royal Albion Academy", 16, 2024, &KeyLocalizer);
        let request = json!({ "player": player(), "history": history });
        let response = parse_response(&score_json(&request.to_string()));
        assert_eq!(response["success"], true);
        let score = response["data"]["score"].as_i64().unwrap();
        assert_eq!(score, CareerScorer::default().score(&player(), &history));
        let tier = CareerScorer::default().tier(&player(), &history);
        assert_eq!(response["data"]["tier_label"], tier.label());
    }
}
