//! JSON API
//!
//! String-in, string-out entry points for hosts that talk JSON. Every
//! response is wrapped in an [`ApiResponse`] carrying the schema version.

pub mod career_json;

pub use career_json::{
    offers_json, score_json, simulate_season_json, train_json, ApiError, ApiResponse,
    OffersRequest, OffersResponse, ScoreRequest, ScoreResponse, SimulateSeasonRequest,
    SimulateSeasonResponse, TrainRequest, TrainResponse, API_VERSION,
};
