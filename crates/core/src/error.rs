//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is recoverable: callers surface the message to the user and
/// carry on. A failed operation never leaves partial state behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A referenced product does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A quantity was zero or exceeded the available stock.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// Checkout or view was attempted on a cart with no (live) entries.
    #[error("cart is empty")]
    EmptyCart,

    /// A required admin field was missing or blank.
    #[error("{0} is required")]
    ValidationRequired(String),

    /// A value failed validation (malformed or negative input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The persistence layer rejected a write; state was left unchanged.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_quantity(msg: impl Into<String>) -> Self {
        Self::InvalidQuantity(msg.into())
    }

    pub fn required(field: impl Into<String>) -> Self {
        Self::ValidationRequired(field.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Stable machine-readable code, used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::NotFound(_) => "not_found",
            DomainError::InvalidQuantity(_) => "invalid_quantity",
            DomainError::EmptyCart => "empty_cart",
            DomainError::ValidationRequired(_) => "validation_required",
            DomainError::Validation(_) => "validation_error",
            DomainError::InvalidId(_) => "invalid_id",
            DomainError::Storage(_) => "storage_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(DomainError::required("name").to_string(), "name is required");
        assert_eq!(DomainError::EmptyCart.to_string(), "cart is empty");
        assert_eq!(
            DomainError::not_found("product 7").to_string(),
            "not found: product 7"
        );
    }

    #[test]
    fn codes_are_distinct() {
        let all = [
            DomainError::not_found(""),
            DomainError::invalid_quantity(""),
            DomainError::EmptyCart,
            DomainError::required(""),
            DomainError::validation(""),
            DomainError::invalid_id(""),
            DomainError::storage(""),
        ];
        let mut codes: Vec<_> = all.iter().map(DomainError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
    }
}
