// Domain layer - Pure business logic
// No dependencies on infrastructure or presentation layers

pub mod shared;
pub mod sign_in;

// Re-exports for convenience
pub use shared::{DomainError, UserId};
