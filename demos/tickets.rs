//! Print a handful of distinct tickets.
//!
//! Run with: `cargo run --example tickets -- [count] [seed]`
//!
//! The same seed always prints the same tickets.

use bingo90::generate_unique_tickets;
use bingo90::terminal::render_ticket;

fn main() {
    let mut args = std::env::args().skip(1);
    let count: usize = args.next().and_then(|a| a.parse().ok()).unwrap_or(3);
    let seed: Option<u64> = args.next().and_then(|a| a.parse().ok());

    let tickets = match generate_unique_tickets(count, seed) {
        Ok(tickets) => tickets,
        Err(err) => {
            eprintln!("could not generate tickets: {err}");
            std::process::exit(1);
        }
    };

    for (i, ticket) in tickets.iter().enumerate() {
        println!("Ticket {}", i + 1);
        print!("{}", render_ticket(ticket));
        let columns: Vec<String> = (0..bingo90::bingo_engine::COLUMNS)
            .map(|c| ticket.column_numbers(c).len().to_string())
            .collect();
        println!("Numbers per column: {}", columns.join(" "));
        println!();
    }
}
