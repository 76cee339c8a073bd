//! Unified error types for the domain layer
//!
//! Every structural failure in the world model surfaces as a `DomainError`.
//! Collisions and trapped aliens are normal outcomes and never appear here.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A direction outside North/East/South/West was supplied
    #[error("Invalid direction: {0}")]
    InvalidDirection(String),

    /// A city reference was absent or unusable where a live one was required
    #[error("Invalid city: {0}")]
    InvalidCity(String),

    /// An alien reference was absent or unusable where a live one was required
    #[error("Invalid alien: {0}")]
    InvalidAlien(String),

    /// The named city is not currently registered in the world
    #[error("City {name} does not exist")]
    CityNotFound { name: String },

    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Create an invalid direction error
    pub fn invalid_direction(msg: impl Into<String>) -> Self {
        Self::InvalidDirection(msg.into())
    }

    /// Create an invalid city error
    pub fn invalid_city(msg: impl Into<String>) -> Self {
        Self::InvalidCity(msg.into())
    }

    /// Create an invalid alien error
    pub fn invalid_alien(msg: impl Into<String>) -> Self {
        Self::InvalidAlien(msg.into())
    }

    /// Create a city not found error
    pub fn city_not_found(name: impl Into<String>) -> Self {
        Self::CityNotFound { name: name.into() }
    }

    /// Creates a validation error for value-object constraint violations.
    ///
    /// # Example
    /// ```ignore
    /// if name.is_empty() {
    ///     return Err(DomainError::validation("City name cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Check if this is a CityNotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CityNotFound { .. })
    }
}
