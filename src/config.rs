//! Game configuration: prices, prizes and where the wallet lives.
//!
//! Values come from defaults, then an optional TOML file, then command-line
//! flags (applied by the binary). Every key in the file is optional.
//!
//! ```toml
//! ticket_cost = 2
//! line_prize = 10
//! # bingo_prize defaults to 4 x line_prize
//! starting_balance = 50
//! wallet_path = "data/wallet.json"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub const DEFAULT_TICKET_COST: u64 = 1;
pub const DEFAULT_LINE_PRIZE: u64 = 5;
pub const DEFAULT_STARTING_BALANCE: u64 = 10;
/// Bingo pays this many line prizes unless configured otherwise.
pub const BINGO_MULTIPLIER: u64 = 4;
pub const DEFAULT_WALLET_PATH: &str = "data/wallet.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub ticket_cost: u64,
    pub line_prize: u64,
    /// `None` means `BINGO_MULTIPLIER * line_prize`.
    pub bingo_prize: Option<u64>,
    pub starting_balance: u64,
    pub wallet_path: PathBuf,
    /// Put the wallet back to `starting_balance` before play.
    pub reset_wallet: bool,
    /// Fixed RNG seed for reproducible games.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ticket_cost: DEFAULT_TICKET_COST,
            line_prize: DEFAULT_LINE_PRIZE,
            bingo_prize: None,
            starting_balance: DEFAULT_STARTING_BALANCE,
            wallet_path: PathBuf::from(DEFAULT_WALLET_PATH),
            reset_wallet: false,
            seed: None,
        }
    }
}

/// The three amounts the wallet trades in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeTable {
    pub ticket_cost: u64,
    pub line_prize: u64,
    pub bingo_prize: u64,
}

impl Default for PrizeTable {
    fn default() -> Self {
        GameConfig::default().prizes()
    }
}

impl GameConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config: GameConfig = toml::from_str(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        config.validate()?;
        Ok(config)
    }

    /// The configured full-house prize, or four times the line prize.
    /// Saturates on absurd line prizes; `validate` rejects those.
    pub fn bingo_prize(&self) -> u64 {
        self.bingo_prize
            .unwrap_or_else(|| self.line_prize.saturating_mul(BINGO_MULTIPLIER))
    }

    pub fn prizes(&self) -> PrizeTable {
        PrizeTable {
            ticket_cost: self.ticket_cost,
            line_prize: self.line_prize,
            bingo_prize: self.bingo_prize(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ticket_cost == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ticket_cost".to_string(),
                value: "0".to_string(),
                reason: "Tickets cannot be free".to_string(),
            });
        }

        if self.bingo_prize.is_none() && self.line_prize.checked_mul(BINGO_MULTIPLIER).is_none() {
            return Err(ConfigError::InvalidValue {
                field: "line_prize".to_string(),
                value: self.line_prize.to_string(),
                reason: format!("Full house prize ({} x line prize) would overflow", BINGO_MULTIPLIER),
            });
        }

        if self.bingo_prize() < self.line_prize {
            return Err(ConfigError::InvalidValue {
                field: "bingo_prize".to_string(),
                value: self.bingo_prize().to_string(),
                reason: format!("Must be at least the line prize ({})", self.line_prize),
            });
        }

        if self.wallet_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "wallet_path".to_string(),
                value: String::new(),
                reason: "Wallet path cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}
