//! The module contains the errors the engine can return.
//!
//! Reconciliation itself never fails. Errors only come from the edges:
//!
//! - [`InvalidConfig`] returned by the builder when a unit table, rule list
//!   or default category is unusable.
//! - [`KeyNotFound`] returned by list operations addressing an unknown entry.
//! - [`InvalidQuantity`] returned when an amount string cannot be parsed
//!   through [`FromStr`].
//!
//!  [`InvalidConfig`]: EngineError::InvalidConfig
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidQuantity`]: EngineError::InvalidQuantity
//!  [`FromStr`]: std::str::FromStr
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),
}
