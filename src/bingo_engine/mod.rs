//! Core bingo engine: ticket generation, the draw pool, and win checks.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | Ticket grid, cells, column ranges, ticket phase |
//! | `helpers`   | Seeded RNG construction, shuffling, sampling without replacement |
//! | `generator` | `generate_ticket()` and friends: the 3x9 layout algorithm |
//! | `draw`      | `DrawPool`: the shrinking set of 90 balls |
//! | `evaluator` | Pure line / full-house predicates over a drawn set |
//! | `claims`    | `ClaimState`: which prizes a ticket has paid |

pub mod claims;
pub mod draw;
pub mod evaluator;
pub mod generator;
pub mod helpers;
pub mod models;

pub use claims::ClaimState;
pub use draw::DrawPool;
pub use evaluator::{check_full_house, check_line, numbers_to_go};
pub use generator::{generate_ticket, generate_ticket_seeded, generate_unique_tickets};
pub use models::{column_range, Cell, Ticket, TicketPhase, TicketViolation, COLUMNS, ROWS};
