//! Database error types.

/// Database operation errors.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Database connection pool error.
    #[error(transparent)]
    R2D2(#[from] diesel::r2d2::PoolError),

    /// Diesel ORM operation error.
    #[error(transparent)]
    Diesel(#[from] diesel::result::Error),

    /// Pending migrations could not be applied.
    #[error("Failed to run database migrations: {0}")]
    Migration(String),

    /// Required environment variable is not set.
    #[error("Env Variable '{0}' missing")]
    MissingEnv(&'static str),

    /// A user with the same email is already stored.
    #[error("User already exists")]
    DuplicateEmail,

    /// In-memory store lock was poisoned by a panicking writer.
    #[error("User store lock poisoned")]
    Poisoned,
}
