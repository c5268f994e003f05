//! # bingo90
//!
//! UK-style 90-ball bingo: a ticket generator, a number draw, and a small
//! turn-based game with a persisted wallet.
//!
//! ## How it works
//!
//! 1. [`generate_ticket`] lays out a 3x9 ticket: five numbers per row, one to
//!    three per column, each column drawn from its own range (1-9, 10-19, ...,
//!    80-90) and ascending top to bottom.
//! 2. A [`DrawPool`] calls the 90 balls in a uniformly random order.
//! 3. [`check_line`] and [`check_full_house`] are pure predicates over the set
//!    of called numbers. [`ClaimState`] makes sure each prize pays once.
//! 4. [`GameSession`] ties a ticket, a pool and a [`Wallet`] together; the
//!    [`terminal`] module puts a text prompt in front of it.
//!
//! ## Key features
//!
//! - **Deterministic**: every random choice flows through one `Rng`, so a seed
//!   reproduces the same tickets and the same draw order.
//! - **Fair**: every valid ticket can be generated; ties are broken by the RNG,
//!   never by position.
//! - **Bounded**: generation is a capped retry loop returning `Result`.
//!
//! ## Quick start
//!
//! ```rust
//! use bingo90::{check_line, generate_ticket_seeded, DrawPool};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let ticket = generate_ticket_seeded(Some(42)).expect("valid ticket");
//! assert!(ticket.validate().is_ok());
//!
//! let mut pool = DrawPool::new_shuffled(&mut StdRng::seed_from_u64(7));
//! while pool.draw_next().is_ok() {}
//! assert!(check_line(&ticket, 0, &pool.drawn_set()));
//! ```

pub mod bingo_engine;
pub mod config;
pub mod errors;
pub mod session;
pub mod terminal;
pub mod wallet;

pub use bingo_engine::{
    check_full_house, check_line, column_range, generate_ticket, generate_ticket_seeded,
    generate_unique_tickets, numbers_to_go, Cell, ClaimState, DrawPool, Ticket, TicketPhase,
    TicketViolation,
};
pub use config::{GameConfig, PrizeTable};
pub use errors::{
    BingoError, BingoResult, ClaimError, ConfigError, DrawOrderError, DrawPoolExhausted, GenerationError,
    SessionError, WalletError,
};
pub use session::{DrawOutcome, GameSession, Payout, Purchase};
pub use wallet::{Wallet, WalletStore};

#[cfg(test)]
mod tests;
