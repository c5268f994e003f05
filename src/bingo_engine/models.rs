use std::collections::HashSet;
use std::fmt;
use std::ops::RangeInclusive;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Ticket geometry
// ---------------------------------------------------------------------------

pub const ROWS: usize = 3;
pub const COLUMNS: usize = 9;
pub const NUMBERS_PER_ROW: usize = 5;
pub const NUMBERS_PER_TICKET: usize = ROWS * NUMBERS_PER_ROW;
/// Highest ball in a 90-ball game.
pub const MAX_NUMBER: u8 = 90;

/// Numbers allowed in column `col`: 1-9, 10-19, ..., 70-79, 80-90.
///
/// Column 0 is one short (no zero ball) and column 8 is one long (90 joins
/// the eighties), so callers must size draws with `range.len()`, never 10.
pub fn column_range(col: usize) -> RangeInclusive<u8> {
    match col {
        0 => 1..=9,
        8 => 80..=MAX_NUMBER,
        c => {
            let lo = (c * 10) as u8;
            lo..=lo + 9
        }
    }
}

/// Column a number belongs to, or `None` outside 1..=90.
pub fn column_of(number: u8) -> Option<usize> {
    match number {
        1..=79 => Some(number as usize / 10),
        80..=MAX_NUMBER => Some(8),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Cells
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Number(u8),
    Blank,
}

impl Cell {
    pub fn number(self) -> Option<u8> {
        match self {
            Cell::Number(n) => Some(n),
            Cell::Blank => None,
        }
    }

    pub fn is_blank(self) -> bool {
        matches!(self, Cell::Blank)
    }
}

impl From<Option<u8>> for Cell {
    fn from(value: Option<u8>) -> Self {
        match value {
            Some(n) => Cell::Number(n),
            None => Cell::Blank,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Blank => write!(f, "_"),
        }
    }
}

// ---------------------------------------------------------------------------
// Ticket
// ---------------------------------------------------------------------------

/// First invariant a grid breaks, as reported by [`Ticket::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketViolation {
    RowCount { row: usize, numbers: usize },
    EmptyColumn { col: usize },
    OutOfColumnRange { row: usize, col: usize, number: u8 },
    ColumnNotAscending { col: usize },
    Duplicate { number: u8 },
}

impl fmt::Display for TicketViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketViolation::RowCount { row, numbers } =>
                write!(f, "row {} holds {} numbers, expected {}", row, numbers, NUMBERS_PER_ROW),
            TicketViolation::EmptyColumn { col } =>
                write!(f, "column {} is blank in every row", col),
            TicketViolation::OutOfColumnRange { row, col, number } =>
                write!(f, "{} at row {} is outside column {}'s range", number, row, col),
            TicketViolation::ColumnNotAscending { col } =>
                write!(f, "column {} is not ascending top to bottom", col),
            TicketViolation::Duplicate { number } =>
                write!(f, "{} appears more than once", number),
        }
    }
}

/// A 3x9 UK-style ticket. The numbers never change after construction;
/// only the daub marks do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredTicket")]
pub struct Ticket {
    cells: [[Cell; COLUMNS]; ROWS],
    daubed: [[bool; COLUMNS]; ROWS],
}

/// Wire shape of a [`Ticket`]; only becomes one after `validate` passes.
#[derive(Deserialize)]
struct StoredTicket {
    cells: [[Cell; COLUMNS]; ROWS],
    daubed: [[bool; COLUMNS]; ROWS],
}

impl TryFrom<StoredTicket> for Ticket {
    type Error = TicketViolation;

    fn try_from(stored: StoredTicket) -> Result<Self, Self::Error> {
        let mut ticket = Ticket::from_cells(stored.cells);
        ticket.validate()?;
        for (row, marks) in stored.daubed.iter().enumerate() {
            for (col, &marked) in marks.iter().enumerate() {
                // Blank cells cannot carry a mark.
                ticket.daubed[row][col] = marked && !ticket.cells[row][col].is_blank();
            }
        }
        Ok(ticket)
    }
}

impl Ticket {
    /// Wrap a grid the generator has already laid out.
    pub(crate) fn from_cells(cells: [[Cell; COLUMNS]; ROWS]) -> Self {
        Ticket { cells, daubed: [[false; COLUMNS]; ROWS] }
    }

    /// Build a ticket from plain rows (`None` = blank), checking every rule.
    pub fn from_rows(rows: [[Option<u8>; COLUMNS]; ROWS]) -> Result<Self, TicketViolation> {
        let cells = rows.map(|row| row.map(Cell::from));
        let ticket = Ticket::from_cells(cells);
        ticket.validate()?;
        Ok(ticket)
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    pub fn rows(&self) -> &[[Cell; COLUMNS]; ROWS] {
        &self.cells
    }

    /// Numbers in `row`, left to right.
    pub fn row_numbers(&self, row: usize) -> Vec<u8> {
        self.cells[row].iter().filter_map(|c| c.number()).collect()
    }

    /// Numbers in `col`, top to bottom.
    pub fn column_numbers(&self, col: usize) -> Vec<u8> {
        self.cells.iter().filter_map(|row| row[col].number()).collect()
    }

    /// All 15 numbers in reading order.
    pub fn numbers(&self) -> Vec<u8> {
        self.cells.iter().flatten().filter_map(|c| c.number()).collect()
    }

    pub fn number_set(&self) -> HashSet<u8> {
        self.numbers().into_iter().collect()
    }

    /// `(row, col)` of `number` if it is on the ticket.
    pub fn position_of(&self, number: u8) -> Option<(usize, usize)> {
        let col = column_of(number)?;
        (0..ROWS)
            .find(|&row| self.cells[row][col] == Cell::Number(number))
            .map(|row| (row, col))
    }

    /// Mark `number` as drawn. Returns its position when it is on the ticket.
    pub fn daub(&mut self, number: u8) -> Option<(usize, usize)> {
        let (row, col) = self.position_of(number)?;
        self.daubed[row][col] = true;
        Some((row, col))
    }

    pub fn is_daubed(&self, row: usize, col: usize) -> bool {
        self.daubed[row][col]
    }

    pub fn daubed_count(&self) -> usize {
        self.daubed.iter().flatten().filter(|&&d| d).count()
    }

    /// Check every ticket rule, returning the first one broken.
    pub fn validate(&self) -> Result<(), TicketViolation> {
        for (row, cells) in self.cells.iter().enumerate() {
            let numbers = cells.iter().filter(|c| !c.is_blank()).count();
            if numbers != NUMBERS_PER_ROW {
                return Err(TicketViolation::RowCount { row, numbers });
            }
            for (col, cell) in cells.iter().enumerate() {
                if let Cell::Number(number) = *cell {
                    if !column_range(col).contains(&number) {
                        return Err(TicketViolation::OutOfColumnRange { row, col, number });
                    }
                }
            }
        }

        for col in 0..COLUMNS {
            let values = self.column_numbers(col);
            if values.is_empty() {
                return Err(TicketViolation::EmptyColumn { col });
            }
            if values.windows(2).any(|w| w[0] >= w[1]) {
                return Err(TicketViolation::ColumnNotAscending { col });
            }
        }

        // Implied by disjoint column ranges plus ascending columns.
        let mut seen = HashSet::new();
        for number in self.numbers() {
            if !seen.insert(number) {
                return Err(TicketViolation::Duplicate { number });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Round progress
// ---------------------------------------------------------------------------

/// Where a ticket is in its life: no draws yet, being played, some lines
/// paid, or closed by a full house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketPhase {
    NotStarted,
    InPlay,
    LineClaimed(usize),
    FullHouseClaimed,
}

impl fmt::Display for TicketPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketPhase::NotStarted       => write!(f, "Not started"),
            TicketPhase::InPlay           => write!(f, "In play"),
            TicketPhase::LineClaimed(1)   => write!(f, "1 line claimed"),
            TicketPhase::LineClaimed(n)   => write!(f, "{} lines claimed", n),
            TicketPhase::FullHouseClaimed => write!(f, "Full house"),
        }
    }
}
