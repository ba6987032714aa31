//! Error types for the Verso & Paz app core
//!
//! All errors use thiserror for structured error handling.
//! Storage corruption is intentionally absent from this taxonomy: corrupt
//! or missing persisted values are defaulted at read time, never surfaced.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Scheduler error: {0}")]
    Scheduler(String),

    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Invalid payment amount: {0}")]
    InvalidAmount(i64),

    #[error("Payments temporarily unavailable: payment provider is not configured")]
    PaymentNotConfigured,

    #[error("Payment provider error: {0}")]
    Payment(String),

    #[error("{0}")]
    Generic(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
