//! Player wallet and its JSON persistence.
//!
//! The wallet is loaded once at start and saved after every change. If a save
//! fails the in-memory balance stays authoritative for the rest of the
//! session: the change is kept and the failure is handed back in
//! [`BalanceUpdate::save_error`] for the caller to report.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, PrizeTable};
use crate::errors::WalletError;

/// On-disk shape of the wallet file.
#[derive(Debug, Serialize, Deserialize)]
struct WalletRecord {
    balance: u64,
    #[serde(flatten)]
    prizes: PrizeTable,
}

/// Only the balance is read back; prices always come from the live config.
#[derive(Debug, Deserialize)]
struct StoredBalance {
    balance: u64,
}

/// A JSON wallet file at a fixed path.
#[derive(Debug, Clone)]
pub struct WalletStore {
    path: PathBuf,
}

impl WalletStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored balance, or `None` if no wallet has been saved yet.
    pub fn load(&self) -> Result<Option<u64>, WalletError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(WalletError::Persistence { path: self.path.clone(), source }),
        };
        let stored: StoredBalance = serde_json::from_str(&text)
            .map_err(|source| WalletError::Corrupt { path: self.path.clone(), source })?;
        Ok(Some(stored.balance))
    }

    /// Overwrite the file atomically: write a sibling temp file, then rename.
    pub fn save(&self, balance: u64, prizes: PrizeTable) -> Result<(), WalletError> {
        let io_err = |source| WalletError::Persistence { path: self.path.clone(), source };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let record = WalletRecord { balance, prizes };
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| io_err(std::io::Error::new(ErrorKind::InvalidData, e)))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

/// Result of a successful balance change.
#[derive(Debug)]
pub struct BalanceUpdate {
    pub balance: u64,
    /// Set when the new balance could not be written to disk.
    pub save_error: Option<WalletError>,
}

#[derive(Debug)]
pub struct Wallet {
    balance: u64,
    starting_balance: u64,
    prizes: PrizeTable,
    store: Option<WalletStore>,
}

impl Wallet {
    /// A wallet that is never written anywhere.
    pub fn in_memory(starting_balance: u64, prizes: PrizeTable) -> Self {
        Self { balance: starting_balance, starting_balance, prizes, store: None }
    }

    /// Load from `store`. A missing file starts fresh; a malformed one is
    /// logged and replaced by the starting balance on the next save.
    pub fn open(store: WalletStore, starting_balance: u64, prizes: PrizeTable) -> Result<Self, WalletError> {
        let balance = match store.load() {
            Ok(Some(balance)) => {
                info!("loaded wallet from {}: balance {}", store.path().display(), balance);
                balance
            }
            Ok(None) => {
                info!("no wallet at {}, starting with {}", store.path().display(), starting_balance);
                starting_balance
            }
            Err(err @ WalletError::Corrupt { .. }) => {
                warn!("{}; starting with {}", err, starting_balance);
                starting_balance
            }
            Err(err) => return Err(err),
        };
        Ok(Self { balance, starting_balance, prizes, store: Some(store) })
    }

    pub fn from_config(config: &GameConfig) -> Result<Self, WalletError> {
        Self::open(WalletStore::new(&config.wallet_path), config.starting_balance, config.prizes())
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn prizes(&self) -> PrizeTable {
        self.prizes
    }

    pub fn store(&self) -> Option<&WalletStore> {
        self.store.as_ref()
    }

    pub fn can_afford_ticket(&self) -> bool {
        self.balance >= self.prizes.ticket_cost
    }

    /// Debit one ticket. Nothing changes if the balance is short.
    pub fn buy_ticket(&mut self) -> Result<BalanceUpdate, WalletError> {
        self.debit(self.prizes.ticket_cost)
    }

    pub fn award_line(&mut self) -> BalanceUpdate {
        self.credit(self.prizes.line_prize)
    }

    pub fn award_bingo(&mut self) -> BalanceUpdate {
        self.credit(self.prizes.bingo_prize)
    }

    pub fn deposit(&mut self, amount: u64) -> Result<BalanceUpdate, WalletError> {
        if amount == 0 {
            return Err(WalletError::InvalidAmount);
        }
        Ok(self.credit(amount))
    }

    pub fn withdraw(&mut self, amount: u64) -> Result<BalanceUpdate, WalletError> {
        if amount == 0 {
            return Err(WalletError::InvalidAmount);
        }
        self.debit(amount)
    }

    /// Back to the starting balance, saved immediately.
    pub fn reset(&mut self) -> BalanceUpdate {
        info!("wallet reset to {}", self.starting_balance);
        self.set(self.starting_balance)
    }

    fn debit(&mut self, amount: u64) -> Result<BalanceUpdate, WalletError> {
        let balance = self.balance.checked_sub(amount).ok_or(WalletError::InsufficientFunds {
            balance: self.balance,
            required: amount,
        })?;
        Ok(self.set(balance))
    }

    fn credit(&mut self, amount: u64) -> BalanceUpdate {
        self.set(self.balance.saturating_add(amount))
    }

    fn set(&mut self, balance: u64) -> BalanceUpdate {
        self.balance = balance;
        let save_error = self.persist().err();
        if let Some(err) = &save_error {
            warn!("balance {} kept in memory only: {}", balance, err);
        }
        BalanceUpdate { balance, save_error }
    }

    fn persist(&self) -> Result<(), WalletError> {
        match &self.store {
            Some(store) => store.save(self.balance, self.prizes),
            None => Ok(()),
        }
    }
}
