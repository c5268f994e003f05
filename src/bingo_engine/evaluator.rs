use std::collections::HashSet;

use crate::bingo_engine::models::{Ticket, ROWS};

/// True when every number in `row` has been drawn. Rows past the bottom of
/// the ticket are never complete.
pub fn check_line(ticket: &Ticket, row: usize, drawn: &HashSet<u8>) -> bool {
    row < ROWS && ticket.row_numbers(row).iter().all(|n| drawn.contains(n))
}

/// True when all 15 numbers on the ticket have been drawn.
pub fn check_full_house(ticket: &Ticket, drawn: &HashSet<u8>) -> bool {
    ticket.numbers().iter().all(|n| drawn.contains(n))
}

/// Numbers in `row` not yet drawn.
pub fn line_missing(ticket: &Ticket, row: usize, drawn: &HashSet<u8>) -> usize {
    if row >= ROWS {
        return 0;
    }
    ticket.row_numbers(row).iter().filter(|n| !drawn.contains(n)).count()
}

/// Numbers on the ticket not yet drawn.
pub fn numbers_to_go(ticket: &Ticket, drawn: &HashSet<u8>) -> usize {
    ticket.numbers().iter().filter(|n| !drawn.contains(n)).count()
}

/// Rows whose line is currently complete.
pub fn complete_lines(ticket: &Ticket, drawn: &HashSet<u8>) -> Vec<usize> {
    (0..ROWS).filter(|&row| check_line(ticket, row, drawn)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bingo_engine::models::{COLUMNS, ROWS};

    fn ticket() -> Ticket {
        let rows: [[Option<u8>; COLUMNS]; ROWS] = [
            [Some(5), None, Some(23), None, Some(47), None, Some(68), None, Some(81)],
            [Some(7), Some(14), None, Some(36), None, Some(55), None, Some(72), None],
            [None, Some(19), Some(28), None, Some(49), Some(58), None, None, Some(90)],
        ];
        Ticket::from_rows(rows).expect("valid ticket")
    }

    fn set(numbers: &[u8]) -> HashSet<u8> {
        numbers.iter().copied().collect()
    }

    #[test]
    fn line_complete_only_with_all_five() {
        let t = ticket();
        let drawn = set(&[5, 23, 47, 68, 81]);
        assert!(check_line(&t, 0, &drawn));

        let without_81 = set(&[5, 23, 47, 68]);
        assert!(!check_line(&t, 0, &without_81));
        assert_eq!(line_missing(&t, 0, &without_81), 1);
    }

    #[test]
    fn extra_numbers_do_not_matter() {
        let t = ticket();
        let drawn = set(&[1, 2, 3, 5, 23, 47, 68, 81, 88, 89]);
        assert!(check_line(&t, 0, &drawn));
        assert!(!check_line(&t, 1, &drawn));
        assert_eq!(complete_lines(&t, &drawn), vec![0]);
    }

    #[test]
    fn every_proper_subset_of_a_row_fails() {
        let t = ticket();
        let row = t.row_numbers(1);
        for skip in 0..row.len() {
            let drawn: HashSet<u8> = row
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != skip)
                .map(|(_, &n)| n)
                .collect();
            assert!(!check_line(&t, 1, &drawn), "row 1 complete without {}", row[skip]);
        }
    }

    #[test]
    fn row_out_of_range_is_never_complete() {
        let t = ticket();
        let everything: HashSet<u8> = (1..=90).collect();
        assert!(!check_line(&t, ROWS, &everything));
        assert_eq!(line_missing(&t, ROWS, &everything), 0);
    }

    #[test]
    fn full_house_needs_all_fifteen() {
        let t = ticket();
        let mut drawn = t.number_set();
        assert!(check_full_house(&t, &drawn));
        assert_eq!(numbers_to_go(&t, &drawn), 0);

        drawn.remove(&90);
        assert!(!check_full_house(&t, &drawn));
        assert_eq!(numbers_to_go(&t, &drawn), 1);
        assert!(check_line(&t, 0, &drawn) && check_line(&t, 1, &drawn));
        assert!(!check_line(&t, 2, &drawn));
    }

    #[test]
    fn nothing_drawn_nothing_complete() {
        let t = ticket();
        let empty = HashSet::new();
        assert!(!check_full_house(&t, &empty));
        assert!(complete_lines(&t, &empty).is_empty());
        assert_eq!(numbers_to_go(&t, &empty), 15);
    }
}
