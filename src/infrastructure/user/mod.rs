//! User infrastructure module
//!
//! Implementations for user registration, authentication and profile
//! management: Argon2 password hashing, in-memory and PostgreSQL
//! repositories, and the user service.

mod password;
mod postgres_repository;
mod repository;
mod service;

pub use password::{Argon2Hasher, PasswordHasher};
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{
    ChangePasswordRequest, RegisterUserRequest, UpdateProfileRequest, UserService,
};
