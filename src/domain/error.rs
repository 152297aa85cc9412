#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error("Ingestion failed with: {0}")]
    Ingestion(String),

    #[error("Store record error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Negative value: {count}")]
    NegativeCount { count: i64 },

    #[error("Not enough shares: requested {requested}, held {held}")]
    InsufficientShares { requested: i64, held: i64 },

    #[error("Value overflow: {0}")]
    Overflow(String),

    #[error("Invalid {field}: must be non-empty and contain no whitespace")]
    InvalidField { field: &'static str },

    #[error("Login failed for user: {0}")]
    Authentication(String),

    #[error("Password hashing failed with: {0}")]
    Hashing(String),
}
