//! Domain layer: entities, repository traits, and domain errors

pub mod error;
pub mod news;
pub mod user;

pub use error::DomainError;
