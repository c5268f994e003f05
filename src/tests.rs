//! Crate-level tests for `bingo90`.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Ticket invariants | 15 distinct numbers, 5 per row, ranges, ascending columns, no empty column |
//! | Determinism | Same seed gives the same ticket and draw order |
//! | Predicates | `check_line` / `check_full_house` superset semantics |
//! | Draw pool | 90 distinct balls, then exhaustion |
//! | Wallet | Purchase, line win, rejected claim, persistence across sessions |
//! | Endless play | Several rounds on one persisted wallet |

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::bingo_engine::models::{column_range, COLUMNS, NUMBERS_PER_ROW, ROWS};
use crate::{
    check_full_house, check_line, generate_ticket, generate_ticket_seeded, ClaimError, DrawOutcome,
    DrawPool, DrawPoolExhausted, GameSession, PrizeTable, Ticket, Wallet, WalletStore,
};

// ── helpers ──────────────────────────────────────────────────────────────────

fn house_prizes() -> PrizeTable {
    PrizeTable { ticket_cost: 1, line_prize: 5, bingo_prize: 20 }
}

/// Assert every ticket rule directly, independent of `Ticket::validate`.
fn assert_ticket_rules(t: &Ticket) {
    let numbers = t.numbers();
    assert_eq!(numbers.len(), 15);
    let distinct: HashSet<u8> = numbers.iter().copied().collect();
    assert_eq!(distinct.len(), 15, "duplicates in {numbers:?}");
    assert!(numbers.iter().all(|n| (1..=90).contains(n)));

    for row in 0..ROWS {
        let filled = t.rows()[row].iter().filter(|c| !c.is_blank()).count();
        assert_eq!(filled, NUMBERS_PER_ROW, "row {row}");
        assert_eq!(COLUMNS - filled, 4);
    }

    for col in 0..COLUMNS {
        let values = t.column_numbers(col);
        assert!(!values.is_empty(), "column {col} empty");
        assert!(values.len() <= 3);
        assert!(values.windows(2).all(|w| w[0] < w[1]), "column {col}: {values:?}");
        assert!(values.iter().all(|n| column_range(col).contains(n)), "column {col}: {values:?}");
    }
}

/// Pool that calls `first` before everything else.
fn pool_starting_with(first: &[u8]) -> DrawPool {
    let mut order = first.to_vec();
    order.extend((1..=90).filter(|n| !first.contains(n)));
    DrawPool::from_order(order).unwrap()
}

// ── ticket invariants ────────────────────────────────────────────────────────

#[test]
fn generated_tickets_satisfy_every_rule() {
    let mut rng = StdRng::seed_from_u64(0xB1_4C0);
    for _ in 0..1000 {
        let ticket = generate_ticket(&mut rng).expect("generation never fails");
        assert_ticket_rules(&ticket);
        assert!(ticket.validate().is_ok());
    }
}

#[test]
fn entropy_seeded_ticket_is_valid() {
    let ticket = generate_ticket_seeded(None).unwrap();
    assert_ticket_rules(&ticket);
}

#[test]
fn column_counts_take_every_size() {
    let mut rng = StdRng::seed_from_u64(31);
    let mut sizes = HashSet::new();
    for _ in 0..200 {
        let t = generate_ticket(&mut rng).unwrap();
        sizes.extend((0..COLUMNS).map(|c| t.column_numbers(c).len()));
    }
    assert_eq!(sizes, HashSet::from([1, 2, 3]));
}

#[test]
fn row_patterns_vary() {
    // Which columns row 0 fills should not be stuck on one pattern.
    let mut rng = StdRng::seed_from_u64(77);
    let mut patterns = HashSet::new();
    for _ in 0..200 {
        let t = generate_ticket(&mut rng).unwrap();
        let pattern: Vec<bool> = t.rows()[0].iter().map(|c| !c.is_blank()).collect();
        patterns.insert(pattern);
    }
    assert!(patterns.len() > 20, "only {} row patterns seen", patterns.len());
}

// ── determinism ──────────────────────────────────────────────────────────────

#[test]
fn same_seed_same_ticket() {
    for seed in [1u64, 42, 999, 0xDEAD_BEEF] {
        assert_eq!(generate_ticket_seeded(Some(seed)), generate_ticket_seeded(Some(seed)));
    }
}

#[test]
fn different_seeds_produce_varied_tickets() {
    let tickets: HashSet<Vec<u8>> = (0..40u64)
        .map(|seed| generate_ticket_seeded(Some(seed)).unwrap().numbers())
        .collect();
    assert!(tickets.len() > 35);
}

// ── predicates ───────────────────────────────────────────────────────────────

#[test]
fn example_row_line_check() {
    let ticket = Ticket::from_rows([
        [Some(5), None, Some(23), None, Some(47), None, Some(68), None, Some(81)],
        [Some(8), Some(14), None, Some(35), None, Some(51), None, Some(72), None],
        [None, Some(19), Some(26), None, Some(48), Some(59), None, Some(77), None],
    ])
    .unwrap();

    let mut drawn: HashSet<u8> = [5, 23, 47, 68, 81].into_iter().collect();
    assert!(check_line(&ticket, 0, &drawn));
    assert!(!check_full_house(&ticket, &drawn));

    drawn.remove(&81);
    assert!(!check_line(&ticket, 0, &drawn));
}

#[test]
fn full_house_iff_superset_of_all_numbers() {
    let ticket = generate_ticket_seeded(Some(5)).unwrap();
    let mut drawn = ticket.number_set();
    drawn.extend([1, 2, 3]);
    assert!(check_full_house(&ticket, &drawn));
    for n in ticket.numbers() {
        let mut partial = drawn.clone();
        partial.remove(&n);
        assert!(!check_full_house(&ticket, &partial), "complete without {n}");
    }
}

// ── draw pool ────────────────────────────────────────────────────────────────

#[test]
fn pool_yields_ninety_distinct_then_exhausts() {
    let mut pool = DrawPool::new_shuffled(&mut StdRng::seed_from_u64(9));
    let drawn: HashSet<u8> = (0..90).map(|_| pool.draw_next().unwrap()).collect();
    assert_eq!(drawn, (1..=90).collect::<HashSet<u8>>());
    assert_eq!(pool.draw_next(), Err(DrawPoolExhausted));
}

// ── wallet through the session ───────────────────────────────────────────────

#[test]
fn buy_line_and_rejected_claim_balances() {
    let mut session = GameSession::new(Wallet::in_memory(10, house_prizes()), Some(3));
    let ticket = generate_ticket_seeded(Some(3)).unwrap();
    let row0 = ticket.row_numbers(0);
    session.buy_staged(ticket, pool_starting_with(&row0)).unwrap();
    assert_eq!(session.balance(), 9);

    for _ in 0..5 {
        session.draw().unwrap();
    }
    assert_eq!(session.claim_line(0).unwrap().balance, 14);

    assert!(matches!(session.claim_line(2), Err(ClaimError::LineIncomplete { .. })));
    assert_eq!(session.balance(), 14);
}

#[test]
fn endless_rounds_persist_balance() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wallet.json");

    let wallet = Wallet::open(WalletStore::new(&path), 10, house_prizes()).unwrap();
    let mut session = GameSession::new(wallet, Some(100));
    let mut expected = 10;

    for round in 0..2u64 {
        let ticket = generate_ticket_seeded(Some(100 + round)).unwrap();
        let numbers = ticket.numbers();
        session.buy_staged(ticket, pool_starting_with(&numbers)).unwrap();
        expected -= 1;

        let mut draws = 0;
        loop {
            draws += 1;
            match session.draw().unwrap() {
                DrawOutcome::Drawn { full_house_ready: true, .. } => break,
                DrawOutcome::Drawn { .. } => {}
                DrawOutcome::Exhausted => panic!("pool ran out before a full house"),
            }
        }
        assert_eq!(draws, 15, "ticket numbers were called first");

        session.claim_full_house().unwrap();
        expected += 20;
    }

    assert_eq!(session.balance(), expected);
    let reloaded = Wallet::open(WalletStore::new(&path), 1, house_prizes()).unwrap();
    assert_eq!(reloaded.balance(), expected);
}

#[test]
fn random_round_plays_to_a_result() {
    // Draw until full house, claiming each line as it completes.
    let mut session = GameSession::new(Wallet::in_memory(10, house_prizes()), Some(2024));
    session.buy_ticket().unwrap();

    let mut lines_paid = 0;
    loop {
        match session.draw().unwrap() {
            DrawOutcome::Drawn { lines_ready, full_house_ready, .. } => {
                for row in lines_ready {
                    session.claim_line(row).unwrap();
                    lines_paid += 1;
                }
                if full_house_ready {
                    session.claim_full_house().unwrap();
                    break;
                }
            }
            DrawOutcome::Exhausted => panic!("a full house always lands within 90 balls"),
        }
    }

    // Every row is complete by the time the full house lands.
    assert_eq!(lines_paid, 3);
    assert_eq!(session.balance(), 9 + 3 * 5 + 20);
}
