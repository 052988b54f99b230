use thiserror::Error;

use super::status::OrderStatus;

/// Business-rule failures surfaced synchronously to the caller. Anything
/// outside this taxonomy (pool exhaustion, unexpected query failure) is
/// wrapped in `Internal` and rendered as an opaque 500 at the boundary.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Product '{0}' is not available")]
    NotAvailable(String),

    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error("{0}")]
    InvalidRole(String),

    #[error("Order is already assigned to a courier")]
    AlreadyAssigned,

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("You do not have permission to perform this action")]
    Forbidden,

    #[error("Invalid credentials")]
    InvalidCredential,

    #[error("Credentials have expired")]
    Expired,

    #[error("Email is already registered")]
    DuplicateEmail,

    #[error("Internal error: {0}")]
    Internal(String),
}
