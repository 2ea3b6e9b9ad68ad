//! Error types for delivery-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Date out of range: {0}")]
    OutOfRange(String),
}

pub type Result<T> = std::result::Result<T, DeliveryError>;
