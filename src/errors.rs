//! Error types for ticket generation, play, wallet and configuration.
//!
//! Generation, persistence and configuration failures travel up to the binary.
//! Claim errors and pool exhaustion are ordinary gameplay results and are
//! handled where they occur.

use std::path::PathBuf;

/// The generator could not produce a valid ticket.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("no valid row layout found after {attempts} attempts")]
    LayoutExhausted { attempts: usize },

    #[error("only {generated} of {requested} unique tickets could be generated")]
    NotEnoughUnique { requested: usize, generated: usize },
}

/// Every number from 1 to 90 has been drawn.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
#[error("all 90 numbers have been drawn")]
pub struct DrawPoolExhausted;

/// A staged draw order that is not a set of distinct balls from 1 to 90.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum DrawOrderError {
    #[error("ball {0} is outside 1-90")]
    OutOfRange(u8),

    #[error("ball {0} appears more than once")]
    Duplicate(u8),
}

/// A claim the current ticket does not support. Rejected claims never touch
/// the wallet or the claim record.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ClaimError {
    #[error("there is no ticket in play")]
    NoActiveTicket,

    #[error("row {} does not exist (rows are 1-3)", .row + 1)]
    RowOutOfRange { row: usize },

    #[error("row {} is not complete, {missing} number(s) still to come", .row + 1)]
    LineIncomplete { row: usize, missing: usize },

    #[error("row {} has already been paid", .row + 1)]
    LineAlreadyClaimed { row: usize },

    #[error("full house is not complete, {missing} number(s) still to come")]
    FullHouseIncomplete { missing: usize },

    #[error("this ticket has already paid out a full house")]
    TicketClosed,
}

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("insufficient balance: have {balance}, need {required}")]
    InsufficientFunds { balance: u64, required: u64 },

    #[error("amount must be positive")]
    InvalidAmount,

    #[error("wallet storage at {} failed: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("wallet file at {} is malformed: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value {value} for {field}: {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Failure to start a new round.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Wallet(#[from] WalletError),
}

/// Root error reported by the binary.
#[derive(Debug, thiserror::Error)]
pub enum BingoError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("ticket generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SessionError> for BingoError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Generation(e) => BingoError::Generation(e),
            SessionError::Wallet(e) => BingoError::Wallet(e),
        }
    }
}

pub type BingoResult<T> = Result<T, BingoError>;
