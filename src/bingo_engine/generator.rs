//! Ticket generation.
//!
//! A ticket is built in three passes:
//!
//! 1. **Column counts**: every column starts with one number and the six
//!    spare numbers go, one at a time, to a uniformly chosen column that is
//!    still below three.
//! 2. **Row layout**: columns are visited in random order. For each column the
//!    generator lists the row sets of the right size that keep the rest of the
//!    grid solvable and picks one uniformly, so any valid layout can come out.
//! 3. **Numbers**: each column samples its count from its own range without
//!    replacement and writes them top to bottom in ascending order.
//!
//! The layout pass cannot dead-end while the solvability check holds, so the
//! retry cap only trips on a logic error and surfaces as
//! [`GenerationError::LayoutExhausted`].

use std::collections::HashSet;

use log::{debug, warn};
use rand::Rng;

use crate::errors::GenerationError;
use crate::bingo_engine::{
    helpers::{pick, rng_from_seed, sample_without_replacement, shuffle},
    models::{column_range, Cell, Ticket, COLUMNS, NUMBERS_PER_ROW, NUMBERS_PER_TICKET, ROWS},
};

/// Layout attempts before generation gives up.
pub const MAX_LAYOUT_ATTEMPTS: usize = 32;
/// Budget per requested ticket in [`generate_unique_tickets`].
pub const UNIQUE_ATTEMPTS_PER_TICKET: usize = 50;

const MAX_PER_COLUMN: usize = ROWS;

type Layout = [[bool; COLUMNS]; ROWS];

/// Generate one valid ticket using `rng`.
pub fn generate_ticket<R: Rng>(rng: &mut R) -> Result<Ticket, GenerationError> {
    generate_with_counts(rng, column_counts)
}

/// The retry loop, with the column-count pass supplied by the caller.
fn generate_with_counts<R, F>(rng: &mut R, mut counts_for: F) -> Result<Ticket, GenerationError>
where
    R: Rng,
    F: FnMut(&mut R) -> [usize; COLUMNS],
{
    for attempt in 1..=MAX_LAYOUT_ATTEMPTS {
        let counts = counts_for(rng);
        match row_layout(rng, &counts) {
            Some(layout) => return Ok(fill_numbers(rng, &layout)),
            None => warn!("layout attempt {} failed for column counts {:?}", attempt, counts),
        }
    }
    Err(GenerationError::LayoutExhausted { attempts: MAX_LAYOUT_ATTEMPTS })
}

/// Generate one ticket from a seed, or from entropy when `seed` is `None`.
pub fn generate_ticket_seeded(seed: Option<u64>) -> Result<Ticket, GenerationError> {
    let mut rng = rng_from_seed(seed);
    generate_ticket(&mut rng)
}

/// Generate `count` tickets whose number sets all differ.
///
/// Tickets may still share individual numbers. Gives up after
/// `count * UNIQUE_ATTEMPTS_PER_TICKET` generations.
pub fn generate_unique_tickets(count: usize, seed: Option<u64>) -> Result<Vec<Ticket>, GenerationError> {
    let mut rng = rng_from_seed(seed);
    let mut tickets = Vec::with_capacity(count);
    let mut seen: HashSet<Vec<u8>> = HashSet::new();
    let budget = count * UNIQUE_ATTEMPTS_PER_TICKET;

    let mut attempts = 0;
    while tickets.len() < count && attempts < budget {
        attempts += 1;
        let ticket = generate_ticket(&mut rng)?;
        let mut key = ticket.numbers();
        key.sort_unstable();
        if seen.insert(key) {
            tickets.push(ticket);
        } else {
            debug!("duplicate ticket discarded after {} attempts", attempts);
        }
    }

    if tickets.len() < count {
        return Err(GenerationError::NotEnoughUnique { requested: count, generated: tickets.len() });
    }
    Ok(tickets)
}

// ---------------------------------------------------------------------------
// Pass 1: how many numbers each column carries
// ---------------------------------------------------------------------------

fn column_counts<R: Rng>(rng: &mut R) -> [usize; COLUMNS] {
    let mut counts = [1usize; COLUMNS];
    for _ in COLUMNS..NUMBERS_PER_TICKET {
        let open: Vec<usize> = (0..COLUMNS).filter(|&c| counts[c] < MAX_PER_COLUMN).collect();
        // 9 columns x 3 slots always leaves room for 15 numbers.
        if let Some(col) = pick(rng, &open) {
            counts[col] += 1;
        }
    }
    counts
}

// ---------------------------------------------------------------------------
// Pass 2: which rows each column's numbers sit in
// ---------------------------------------------------------------------------

fn row_layout<R: Rng>(rng: &mut R, counts: &[usize; COLUMNS]) -> Option<Layout> {
    let mut order: Vec<usize> = (0..COLUMNS).collect();
    shuffle(rng, &mut order);

    let mut capacity = [NUMBERS_PER_ROW; ROWS];
    let mut pending = *counts;
    let mut layout = [[false; COLUMNS]; ROWS];

    for col in order {
        let need = pending[col];
        pending[col] = 0;

        let options: Vec<[bool; ROWS]> = row_sets(need)
            .filter(|rows| (0..ROWS).all(|r| !rows[r] || capacity[r] > 0))
            .filter(|rows| {
                let mut left = capacity;
                for r in (0..ROWS).filter(|&r| rows[r]) {
                    left[r] -= 1;
                }
                solvable(&left, &pending)
            })
            .collect();

        let chosen = pick(rng, &options)?;
        for r in (0..ROWS).filter(|&r| chosen[r]) {
            capacity[r] -= 1;
            layout[r][col] = true;
        }
    }
    Some(layout)
}

/// Every choice of `size` rows out of three.
fn row_sets(size: usize) -> impl Iterator<Item = [bool; ROWS]> {
    (0u8..1 << ROWS)
        .filter(move |mask| mask.count_ones() as usize == size)
        .map(|mask| {
            let mut rows = [false; ROWS];
            for (r, slot) in rows.iter_mut().enumerate() {
                *slot = mask & (1 << r) != 0;
            }
            rows
        })
}

/// Gale-Ryser test: can rows with free slots `capacity` absorb columns that
/// still need `pending` numbers, one number per row per column?
fn solvable(capacity: &[usize; ROWS], pending: &[usize; COLUMNS]) -> bool {
    if capacity.iter().sum::<usize>() != pending.iter().sum::<usize>() {
        return false;
    }
    let mut sorted = *capacity;
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let mut prefix = 0;
    for k in 1..=ROWS {
        prefix += sorted[k - 1];
        let reachable: usize = pending.iter().map(|&p| p.min(k)).sum();
        if prefix > reachable {
            return false;
        }
    }
    true
}

// ---------------------------------------------------------------------------
// Pass 3: the numbers themselves
// ---------------------------------------------------------------------------

fn fill_numbers<R: Rng>(rng: &mut R, layout: &Layout) -> Ticket {
    let mut cells = [[Cell::Blank; COLUMNS]; ROWS];
    for col in 0..COLUMNS {
        let rows: Vec<usize> = (0..ROWS).filter(|&r| layout[r][col]).collect();
        let pool: Vec<u8> = column_range(col).collect();
        let mut numbers = sample_without_replacement(rng, &pool, rows.len());
        numbers.sort_unstable();
        for (row, number) in rows.into_iter().zip(numbers) {
            cells[row][col] = Cell::Number(number);
        }
    }
    Ticket::from_cells(cells)
}
