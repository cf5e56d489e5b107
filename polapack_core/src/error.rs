use thiserror::Error;

/// Rejected configuration values. Raised once at construction; configuration
/// is never re-validated or coerced mid-session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("angle table needs at least two entries, got {0}")]
    AngleTableTooShort(usize),
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
}

/// Fatal initialization failures. The game refuses to start rather than run
/// partially initialized.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InitError {
    #[error("carousel needs at least one card")]
    NoCards,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failures of the reward request. A timeout is treated exactly like a
/// network failure: the current reveal is abandoned and the carousel is
/// restored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewardError {
    #[error("reward request failed: {0}")]
    Network(String),
    #[error("reward request timed out")]
    Timeout,
}
