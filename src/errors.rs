use crate::models::Asset;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// A caller/core contract mismatch. Always fatal for the action that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("Unknown action kind: {0}")]
    UnknownAction(String),

    #[error("Beta amount is derived from alpha and the rate; it cannot be set")]
    BetaAmountIsDerived,

    #[error("Alpha and beta both reference {0}")]
    AssetCollision(Asset),

    #[error("Malformed action: {0}")]
    MalformedAction(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Contract violation: {0}")]
    Contract(#[from] ContractViolation),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Quote not ready")]
    QuoteNotReady,

    #[error("Payload error: {0}")]
    Payload(String),

    #[error("Signing error: {0}")]
    Signing(String),
}
