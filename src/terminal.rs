//! Text front end: reads commands, drives a [`GameSession`], prints results.
//!
//! Generic over any `BufRead` / `Write` pair so a whole game can be scripted
//! in tests. Gameplay problems (a premature claim, no ticket, an empty pool)
//! are printed and play continues; only I/O and generation failures end the
//! loop with an error.

use std::io::{BufRead, Write};

use crate::bingo_engine::models::{Cell, Ticket, COLUMNS};
use crate::errors::{BingoResult, SessionError, WalletError};
use crate::session::{DrawOutcome, GameSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Buy,
    Draw,
    /// 0-based row.
    Line(usize),
    House,
    Ticket,
    Wallet,
    Help,
    Quit,
}

/// Parse one input line. Rows are typed 1-3 and stored 0-based. A blank
/// line draws.
pub fn parse_command(input: &str) -> Option<Command> {
    let mut words = input.split_whitespace();
    let head = match words.next() {
        Some(word) => word.to_ascii_lowercase(),
        None => return Some(Command::Draw),
    };
    let command = match head.as_str() {
        "b" | "buy"                    => Command::Buy,
        "d" | "draw"                   => Command::Draw,
        "l" | "line"                   => {
            let row: usize = words.next()?.parse().ok()?;
            Command::Line(row.checked_sub(1)?)
        }
        "h" | "house" | "bingo"        => Command::House,
        "t" | "ticket"                 => Command::Ticket,
        "w" | "wallet" | "balance"     => Command::Wallet,
        "?" | "help"                   => Command::Help,
        "q" | "quit" | "exit"          => Command::Quit,
        _ => return None,
    };
    if words.next().is_some() {
        return None;
    }
    Some(command)
}

const HELP: &str = "\
Commands:
  buy          buy a ticket and start a round
  draw         call the next ball (or just press Enter)
  line <1-3>   claim a completed row
  house        claim a full house
  ticket       show your ticket and the balls called
  wallet       show balance and prices
  quit         leave the game";

/// Render a ticket as a boxed grid. Called numbers carry a `*`.
pub fn render_ticket(ticket: &Ticket) -> String {
    let border = format!("+{}\n", "-----+".repeat(COLUMNS));
    let mut out = border.clone();
    for (r, row) in ticket.rows().iter().enumerate() {
        out.push('|');
        for (c, cell) in row.iter().enumerate() {
            match cell {
                Cell::Number(n) => {
                    let mark = if ticket.is_daubed(r, c) { '*' } else { ' ' };
                    out.push_str(&format!(" {:>2}{} |", n, mark));
                }
                Cell::Blank => out.push_str("     |"),
            }
        }
        out.push('\n');
        out.push_str(&border);
    }
    out
}

pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Play until the player quits or input ends.
    pub fn run(&mut self, session: &mut GameSession) -> BingoResult<()> {
        let prizes = session.wallet().prizes();
        writeln!(self.output, "90-ball bingo. Balance: {}", session.balance())?;
        writeln!(
            self.output,
            "Tickets cost {}, a line pays {}, a full house pays {}.",
            prizes.ticket_cost, prizes.line_prize, prizes.bingo_prize
        )?;
        writeln!(self.output, "Type `help` for commands.")?;

        let mut line = String::new();
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            match parse_command(line.trim()) {
                Some(Command::Quit) => break,
                Some(command) => self.handle(session, command)?,
                None => writeln!(self.output, "Unknown command `{}`.\n{}", line.trim(), HELP)?,
            }
        }

        writeln!(self.output, "Goodbye. Final balance: {}", session.balance())?;
        Ok(())
    }

    fn handle(&mut self, session: &mut GameSession, command: Command) -> BingoResult<()> {
        match command {
            Command::Buy => match session.buy_ticket() {
                Ok(purchase) => {
                    writeln!(self.output, "Ticket bought for {}. Balance: {}", purchase.cost, purchase.balance)?;
                    self.report_save(purchase.save_error)?;
                    if let Some(ticket) = session.ticket() {
                        write!(self.output, "{}", render_ticket(ticket))?;
                    }
                }
                Err(SessionError::Wallet(err @ WalletError::InsufficientFunds { .. })) => {
                    writeln!(self.output, "Cannot buy a ticket: {}", err)?;
                }
                Err(err) => return Err(err.into()),
            },

            Command::Draw => match session.draw() {
                Ok(DrawOutcome::Drawn { number, daubed, lines_ready, full_house_ready }) => {
                    let hit = if daubed.is_some() { " (on your ticket!)" } else { "" };
                    writeln!(self.output, "Ball {}: {}{}", session.drawn().len(), number, hit)?;
                    if full_house_ready {
                        writeln!(self.output, "Full house! Type `house` to claim.")?;
                    } else {
                        for row in lines_ready {
                            writeln!(self.output, "Row {} is complete. Type `line {}` to claim.", row + 1, row + 1)?;
                        }
                    }
                }
                Ok(DrawOutcome::Exhausted) => {
                    writeln!(self.output, "All 90 balls have been called. Round over; `buy` to play again.")?;
                }
                Err(err) => writeln!(self.output, "Cannot draw: {}", err)?,
            },

            Command::Line(row) => match session.claim_line(row) {
                Ok(payout) => {
                    writeln!(self.output, "Line {} pays {}! Balance: {}", row + 1, payout.prize, payout.balance)?;
                    self.report_save(payout.save_error)?;
                }
                Err(err) => writeln!(self.output, "Claim rejected: {}", err)?,
            },

            Command::House => match session.claim_full_house() {
                Ok(payout) => {
                    writeln!(self.output, "BINGO! Full house pays {}. Balance: {}", payout.prize, payout.balance)?;
                    self.report_save(payout.save_error)?;
                    writeln!(self.output, "Ticket closed; `buy` to play again.")?;
                }
                Err(err) => writeln!(self.output, "Claim rejected: {}", err)?,
            },

            Command::Ticket => match (session.ticket(), session.phase()) {
                (Some(ticket), Some(phase)) => {
                    write!(self.output, "{}", render_ticket(ticket))?;
                    let called: Vec<String> = session.drawn().iter().map(|n| n.to_string()).collect();
                    writeln!(self.output, "Status: {}. Called ({}): {}", phase, called.len(), called.join(" "))?;
                }
                _ => writeln!(self.output, "No ticket yet; type `buy`.")?,
            },

            Command::Wallet => {
                let prizes = session.wallet().prizes();
                writeln!(
                    self.output,
                    "Balance: {} (ticket {}, line {}, full house {})",
                    session.balance(), prizes.ticket_cost, prizes.line_prize, prizes.bingo_prize
                )?;
            }

            Command::Help => writeln!(self.output, "{}", HELP)?,

            Command::Quit => {}
        }
        Ok(())
    }

    fn report_save(&mut self, save_error: Option<WalletError>) -> BingoResult<()> {
        if let Some(err) = save_error {
            writeln!(self.output, "Warning: balance not saved ({}). Play continues.", err)?;
        }
        Ok(())
    }
}
