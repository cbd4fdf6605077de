//! Configuration validation.
//!
//! Checks every journal setting before any trades are loaded.

use crate::domain::error::JournalError;
use crate::domain::period::Granularity;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_POOL_SIZE: u32 = 4;
pub const MAX_POOL_SIZE: u32 = 64;

pub fn validate_journal_config(config: &dyn ConfigPort) -> Result<(), JournalError> {
    validate_store(config)?;
    pool_size(config)?;
    validate_granularity(config)?;
    validate_positive(config, "top_symbols")?;
    validate_positive(config, "recent_trades")?;
    validate_positive(config, "max_trades")?;
    Ok(())
}

fn validate_store(config: &dyn ConfigPort) -> Result<(), JournalError> {
    let store = config
        .get_string("journal", "store")
        .unwrap_or_else(|| "csv".to_string());

    match store.trim().to_ascii_lowercase().as_str() {
        "csv" => require_non_empty(config, "journal", "trades_file"),
        "sqlite" => require_non_empty(config, "sqlite", "path"),
        other => Err(JournalError::ConfigInvalid {
            section: "journal".to_string(),
            key: "store".to_string(),
            reason: format!("unknown store '{other}' (expected csv or sqlite)"),
        }),
    }
}

fn require_non_empty(config: &dyn ConfigPort, section: &str, key: &str) -> Result<(), JournalError> {
    match config.get_string(section, key) {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(JournalError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }),
    }
}

fn validate_granularity(config: &dyn ConfigPort) -> Result<(), JournalError> {
    match config.get_string("analytics", "granularity") {
        None => Ok(()),
        Some(s) => s
            .parse::<Granularity>()
            .map(|_| ())
            .map_err(|reason| JournalError::ConfigInvalid {
                section: "analytics".to_string(),
                key: "granularity".to_string(),
                reason,
            }),
    }
}

/// `[sqlite] pool_size`, which must lie in `1..=MAX_POOL_SIZE`.
pub fn pool_size(config: &dyn ConfigPort) -> Result<u32, JournalError> {
    let value = config.get_int("sqlite", "pool_size", i64::from(DEFAULT_POOL_SIZE));
    u32::try_from(value)
        .ok()
        .filter(|n| (1..=MAX_POOL_SIZE).contains(n))
        .ok_or_else(|| JournalError::ConfigInvalid {
            section: "sqlite".to_string(),
            key: "pool_size".to_string(),
            reason: format!("{value} is outside 1..={MAX_POOL_SIZE}"),
        })
}

fn validate_positive(config: &dyn ConfigPort, key: &str) -> Result<(), JournalError> {
    let value = config.get_int("analytics", key, 1);
    if value < 1 {
        return Err(JournalError::ConfigInvalid {
            section: "analytics".to_string(),
            key: key.to_string(),
            reason: format!("{key} must be at least 1"),
        });
    }
    Ok(())
}
