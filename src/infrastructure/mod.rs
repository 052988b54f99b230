pub mod memory;
pub mod models;
pub mod order_store;
pub mod product_store;
pub mod user_store;

pub use memory::MemoryStore;
pub use order_store::DieselOrderStore;
pub use product_store::DieselProductStore;
pub use user_store::DieselUserStore;

use crate::domain::errors::DomainError;

// ── Error conversions (infrastructure concern only) ──────────────────────────
//
// Unique-constraint conflicts carry business meaning (DuplicateEmail,
// AlreadyAssigned) and are mapped at the insert sites; everything that falls
// through here is an opaque storage fault.

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}
