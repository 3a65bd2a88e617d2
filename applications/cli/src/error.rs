/// CLI error types
use soundmint_core::MarketError;
use soundmint_playback::PlaybackError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Market(#[from] MarketError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),
}
