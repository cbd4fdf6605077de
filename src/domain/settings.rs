//! Journal settings resolved from configuration.

use std::path::PathBuf;

use crate::domain::config_validation::pool_size;
use crate::domain::error::JournalError;
use crate::domain::period::Granularity;
use crate::domain::review::{ReviewParams, DEFAULT_TOP_SYMBOLS};
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_RECENT_TRADES: usize = 5;
pub const DEFAULT_MAX_TRADES: usize = 100_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    Csv {
        trades_file: PathBuf,
        notes_file: PathBuf,
        plans_file: PathBuf,
    },
    Sqlite { path: String, pool_size: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalSettings {
    pub store: StoreKind,
    pub review: ReviewParams,
    pub recent_trades: usize,
    /// Upper bound on the number of trades a single analysis will accept.
    pub max_trades: usize,
    pub template_path: Option<String>,
    pub include_trade_log: bool,
}

impl JournalSettings {
    /// Build settings from an already validated config.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, JournalError> {
        let store_name = config
            .get_string("journal", "store")
            .unwrap_or_else(|| "csv".to_string())
            .trim()
            .to_ascii_lowercase();

        let store = match store_name.as_str() {
            "sqlite" => StoreKind::Sqlite {
                path: required(config, "sqlite", "path")?,
                pool_size: pool_size(config)?,
            },
            "csv" => {
                let trades_file = PathBuf::from(required(config, "journal", "trades_file")?);
                let sibling = |key: &str, name: &str| {
                    config
                        .get_string("journal", key)
                        .filter(|s| !s.trim().is_empty())
                        .map(PathBuf::from)
                        .unwrap_or_else(|| trades_file.with_file_name(name))
                };
                StoreKind::Csv {
                    notes_file: sibling("notes_file", "notes.csv"),
                    plans_file: sibling("plans_file", "plans.csv"),
                    trades_file,
                }
            }
            other => {
                return Err(JournalError::ConfigInvalid {
                    section: "journal".into(),
                    key: "store".into(),
                    reason: format!("unknown store '{other}'"),
                })
            }
        };

        let granularity = match config.get_string("analytics", "granularity") {
            Some(s) => s.parse::<Granularity>().map_err(|reason| JournalError::ConfigInvalid {
                section: "analytics".into(),
                key: "granularity".into(),
                reason,
            })?,
            None => Granularity::default(),
        };

        Ok(JournalSettings {
            store,
            review: ReviewParams {
                granularity,
                top_symbols: positive(config, "top_symbols", DEFAULT_TOP_SYMBOLS),
            },
            recent_trades: positive(config, "recent_trades", DEFAULT_RECENT_TRADES),
            max_trades: positive(config, "max_trades", DEFAULT_MAX_TRADES),
            template_path: config
                .get_string("report", "template_path")
                .filter(|s| !s.trim().is_empty()),
            include_trade_log: config.get_bool("report", "include_trade_log", true),
        })
    }

    /// Reject trade sets larger than `max_trades`.
    pub fn check_capacity(&self, count: usize) -> Result<(), JournalError> {
        if count > self.max_trades {
            return Err(JournalError::TooManyTrades {
                count,
                limit: self.max_trades,
            });
        }
        Ok(())
    }
}

fn required(config: &dyn ConfigPort, section: &str, key: &str) -> Result<String, JournalError> {
    config
        .get_string(section, key)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| JournalError::ConfigMissing {
            section: section.into(),
            key: key.into(),
        })
}

fn positive(config: &dyn ConfigPort, key: &str, default: usize) -> usize {
    let value = config.get_int("analytics", key, default as i64);
    if value < 1 { default } else { value as usize }
}
