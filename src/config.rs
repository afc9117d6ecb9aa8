use std::env;
use std::time::Duration;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub action_delay_ms: u64,
    pub archive_delay_ms: u64,
    pub event_buffer_size: usize,
    pub seed_fixtures: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            action_delay_ms: parse_or_default("ACTION_DELAY_MS", 1000)?,
            archive_delay_ms: parse_or_default("ARCHIVE_DELAY_MS", 500)?,
            event_buffer_size: parse_or_default("EVENT_BUFFER_SIZE", 1024)?,
            seed_fixtures: parse_or_default("SEED_FIXTURES", true)?,
        })
    }

    pub fn delays(&self) -> Delays {
        Delays {
            action: Duration::from_millis(self.action_delay_ms),
            archive: Duration::from_millis(self.archive_delay_ms),
        }
    }
}

/// Artificial latency applied to simulated backend calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Delays {
    pub action: Duration,
    pub archive: Duration,
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}
