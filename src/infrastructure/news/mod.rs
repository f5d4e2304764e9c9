//! News infrastructure module
//!
//! In-memory and PostgreSQL repositories plus the news service, which
//! covers tracking, listings, reading progress and statistics.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresNewsRepository;
pub use repository::InMemoryNewsRepository;
pub use service::{NewsService, NewsStats};
