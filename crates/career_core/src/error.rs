use thiserror::Error;

use crate::models::TeamId;
use crate::training::TrainingFocus;

/// Errors raised by the career engines and the orchestration layer.
///
/// Validation variants are raised before any state is mutated; the caller is
/// expected to offer the user a corrected choice.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CareerError {
    #[error("Insufficient funds: {required} required, {available} available")]
    InsufficientFunds { required: i64, available: i64 },

    #[error("Training slot limit exceeded: at most {max} focuses")]
    SlotLimitExceeded { max: usize },

    #[error("Training focus {0:?} is not available for this position")]
    IneligibleFocus(TrainingFocus),

    #[error("Training focus {0:?} is already selected")]
    DuplicateFocus(TrainingFocus),

    #[error("Contract has expired: renew or transfer before the next season")]
    ContractExpired,

    #[error("Contract negotiation required before staying")]
    NegotiationRequired,

    #[error("Negotiation rejected: {0}")]
    NegotiationRejected(String),

    #[error("Player is being forced out by the club")]
    ForcedToMove,

    #[error("Player has retired")]
    Retired,

    #[error("Offer not found: {0}")]
    OfferNotFound(String),

    #[error("Unknown team: {0}")]
    UnknownTeam(TeamId),

    #[error("Operation not allowed in phase {0}")]
    InvalidPhase(&'static str),

    #[error("Season simulation failed: {0}")]
    SimulationFailed(String),

    #[error("Persistence failed: {0}")]
    Persistence(String),
}

impl CareerError {
    /// Validation errors can be retried with a corrected choice.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CareerError::InsufficientFunds { .. }
                | CareerError::SlotLimitExceeded { .. }
                | CareerError::IneligibleFocus(_)
                | CareerError::DuplicateFocus(_)
                | CareerError::NegotiationRequired
                | CareerError::NegotiationRejected(_)
                | CareerError::ForcedToMove
        )
    }
}

impl From<crate::save::SaveError> for CareerError {
    fn from(err: crate::save::SaveError) -> Self {
        CareerError::Persistence(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CareerError>;
