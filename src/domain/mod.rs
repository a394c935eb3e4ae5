//! Domain layer - Pure business abstractions
//!
//! This layer contains NO web framework dependencies.
//! Trait definitions, value types and domain error types.

pub mod errors;
pub mod repositories;
pub mod resource;
pub mod values;

pub use errors::DomainError;
pub use repositories::*;
pub use resource::Resource;
pub use values::{Login, PostalCode};
