use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::ClaimError;
use crate::bingo_engine::{
    evaluator::{check_full_house, check_line, line_missing, numbers_to_go},
    models::{Ticket, TicketPhase, ROWS},
};

/// Which prizes a ticket has already paid.
///
/// A claim is checked against the drawn numbers before anything is recorded,
/// so a rejected claim leaves the state exactly as it was.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimState {
    lines: [bool; ROWS],
    full_house: bool,
}

impl ClaimState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line_claimed(&self, row: usize) -> bool {
        self.lines.get(row).copied().unwrap_or(false)
    }

    pub fn lines_claimed(&self) -> usize {
        self.lines.iter().filter(|&&c| c).count()
    }

    pub fn full_house_claimed(&self) -> bool {
        self.full_house
    }

    /// Closed tickets accept no further claims.
    pub fn is_closed(&self) -> bool {
        self.full_house
    }

    /// Record a line win for `row` if it is complete and unpaid.
    pub fn claim_line(&mut self, ticket: &Ticket, row: usize, drawn: &HashSet<u8>) -> Result<(), ClaimError> {
        if self.full_house {
            return Err(ClaimError::TicketClosed);
        }
        if row >= ROWS {
            return Err(ClaimError::RowOutOfRange { row });
        }
        if self.lines[row] {
            return Err(ClaimError::LineAlreadyClaimed { row });
        }
        if !check_line(ticket, row, drawn) {
            return Err(ClaimError::LineIncomplete { row, missing: line_missing(ticket, row, drawn) });
        }
        self.lines[row] = true;
        Ok(())
    }

    /// Record the full house if every number is drawn. Closes the ticket
    /// whatever lines were paid before.
    pub fn claim_full_house(&mut self, ticket: &Ticket, drawn: &HashSet<u8>) -> Result<(), ClaimError> {
        if self.full_house {
            return Err(ClaimError::TicketClosed);
        }
        if !check_full_house(ticket, drawn) {
            return Err(ClaimError::FullHouseIncomplete { missing: numbers_to_go(ticket, drawn) });
        }
        self.full_house = true;
        Ok(())
    }

    /// Ticket lifecycle given how many balls have been called.
    pub fn phase(&self, draws: usize) -> TicketPhase {
        if self.full_house {
            TicketPhase::FullHouseClaimed
        } else if self.lines_claimed() > 0 {
            TicketPhase::LineClaimed(self.lines_claimed())
        } else if draws == 0 {
            TicketPhase::NotStarted
        } else {
            TicketPhase::InPlay
        }
    }
}
