//! One player's game: the wallet plus the ticket currently in play.
//!
//! The session is plain state driven by method calls, with no I/O of its
//! own beyond wallet saves, so the terminal front end and tests drive it the
//! same way. Play is endless: when a ticket closes (full house) or the balls
//! run out the player may buy another, with the balance carried over.

use log::{debug, info, warn};
use rand::rngs::StdRng;

use crate::bingo_engine::{
    claims::ClaimState,
    draw::DrawPool,
    evaluator::{check_full_house, complete_lines, numbers_to_go},
    generator::generate_ticket,
    helpers::rng_from_seed,
    models::{Ticket, TicketPhase},
};
use crate::errors::{ClaimError, DrawPoolExhausted, SessionError, WalletError};
use crate::wallet::Wallet;

/// The ticket being played and everything drawn against it.
#[derive(Debug, Clone)]
pub struct Round {
    pub ticket: Ticket,
    pub pool: DrawPool,
    pub claims: ClaimState,
}

impl Round {
    pub fn new(ticket: Ticket, pool: DrawPool) -> Self {
        Self { ticket, pool, claims: ClaimState::new() }
    }

    pub fn phase(&self) -> TicketPhase {
        self.claims.phase(self.pool.drawn().len())
    }

    /// No more prizes can come from this round.
    pub fn is_over(&self) -> bool {
        self.claims.is_closed() || self.pool.is_exhausted()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOutcome {
    Drawn {
        number: u8,
        /// `(row, col)` when the ball was on the ticket.
        daubed: Option<(usize, usize)>,
        /// Rows complete and still unpaid.
        lines_ready: Vec<usize>,
        full_house_ready: bool,
    },
    /// All 90 balls are out; the round is over.
    Exhausted,
}

/// A ticket that was paid for.
#[derive(Debug)]
pub struct Purchase {
    pub cost: u64,
    pub balance: u64,
    /// The debit stands in memory even when this is set.
    pub save_error: Option<WalletError>,
}

/// A prize that was paid.
#[derive(Debug)]
pub struct Payout {
    pub prize: u64,
    pub balance: u64,
    /// The prize is credited in memory even when this is set.
    pub save_error: Option<WalletError>,
}

#[derive(Debug)]
pub struct GameSession {
    wallet: Wallet,
    rng: StdRng,
    round: Option<Round>,
}

impl GameSession {
    pub fn new(wallet: Wallet, seed: Option<u64>) -> Self {
        Self { wallet, rng: rng_from_seed(seed), round: None }
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn wallet_mut(&mut self) -> &mut Wallet {
        &mut self.wallet
    }

    pub fn balance(&self) -> u64 {
        self.wallet.balance()
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn ticket(&self) -> Option<&Ticket> {
        self.round.as_ref().map(|r| &r.ticket)
    }

    pub fn drawn(&self) -> &[u8] {
        self.round.as_ref().map(|r| r.pool.drawn()).unwrap_or(&[])
    }

    pub fn phase(&self) -> Option<TicketPhase> {
        self.round.as_ref().map(Round::phase)
    }

    /// Pay for a ticket and start a new round with a fresh draw pool.
    ///
    /// The ticket is generated before any money moves, so a generation
    /// failure costs nothing. An unfinished round is abandoned.
    pub fn buy_ticket(&mut self) -> Result<Purchase, SessionError> {
        if !self.wallet.can_afford_ticket() {
            return Err(WalletError::InsufficientFunds {
                balance: self.wallet.balance(),
                required: self.wallet.prizes().ticket_cost,
            }
            .into());
        }
        let ticket = generate_ticket(&mut self.rng)?;
        let pool = DrawPool::new_shuffled(&mut self.rng);
        self.start_round(ticket, pool)
    }

    /// Pay for a ticket and play it against a known pool. Lets callers stage
    /// a game, e.g. to replay one or to force a quick result in tests.
    pub fn buy_staged(&mut self, ticket: Ticket, pool: DrawPool) -> Result<Purchase, SessionError> {
        self.start_round(ticket, pool)
    }

    fn start_round(&mut self, ticket: Ticket, pool: DrawPool) -> Result<Purchase, SessionError> {
        let update = self.wallet.buy_ticket()?;
        if let Some(old) = &self.round {
            if !old.is_over() {
                warn!("abandoning unfinished ticket after {} draws", old.pool.drawn().len());
            }
        }
        info!("ticket bought, balance now {}", update.balance);
        self.round = Some(Round::new(ticket, pool));
        Ok(Purchase {
            cost: self.wallet.prizes().ticket_cost,
            balance: update.balance,
            save_error: update.save_error,
        })
    }

    /// Call the next ball and daub it.
    pub fn draw(&mut self) -> Result<DrawOutcome, ClaimError> {
        let round = self.round.as_mut().ok_or(ClaimError::NoActiveTicket)?;
        if round.claims.is_closed() {
            return Err(ClaimError::TicketClosed);
        }
        let number = match round.pool.draw_next() {
            Ok(number) => number,
            Err(DrawPoolExhausted) => {
                info!("draw pool exhausted after 90 balls");
                return Ok(DrawOutcome::Exhausted);
            }
        };
        let daubed = round.ticket.daub(number);
        let drawn = round.pool.drawn_set();
        let lines_ready = complete_lines(&round.ticket, &drawn)
            .into_iter()
            .filter(|&row| !round.claims.line_claimed(row))
            .collect();
        let full_house_ready = check_full_house(&round.ticket, &drawn);
        debug!("{} to go", numbers_to_go(&round.ticket, &drawn));

        Ok(DrawOutcome::Drawn { number, daubed, lines_ready, full_house_ready })
    }

    /// Claim the line prize for `row` (0-based).
    pub fn claim_line(&mut self, row: usize) -> Result<Payout, ClaimError> {
        let round = self.round.as_mut().ok_or(ClaimError::NoActiveTicket)?;
        let drawn = round.pool.drawn_set();
        if let Err(err) = round.claims.claim_line(&round.ticket, row, &drawn) {
            warn!("line claim rejected: {}", err);
            return Err(err);
        }
        let prize = self.wallet.prizes().line_prize;
        let update = self.wallet.award_line();
        info!("line {} paid {}, balance {}", row + 1, prize, update.balance);
        Ok(Payout { prize, balance: update.balance, save_error: update.save_error })
    }

    /// Claim the full house. Closes the ticket.
    pub fn claim_full_house(&mut self) -> Result<Payout, ClaimError> {
        let round = self.round.as_mut().ok_or(ClaimError::NoActiveTicket)?;
        let drawn = round.pool.drawn_set();
        if let Err(err) = round.claims.claim_full_house(&round.ticket, &drawn) {
            warn!("full house claim rejected: {}", err);
            return Err(err);
        }
        let prize = self.wallet.prizes().bingo_prize;
        let update = self.wallet.award_bingo();
        info!(
            "full house after {} balls paid {}, balance {}",
            round.pool.drawn().len(), prize, update.balance
        );
        Ok(Payout { prize, balance: update.balance, save_error: update.save_error })
    }
}
