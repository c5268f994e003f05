use std::collections::HashSet;

use log::debug;
use rand::Rng;

use crate::errors::{DrawOrderError, DrawPoolExhausted};
use crate::bingo_engine::{helpers::shuffle, models::MAX_NUMBER};

/// The 90 balls, shuffled once up front and drawn in order. Drawing from a
/// uniform shuffle is the same as picking uniformly among what is left.
#[derive(Debug, Clone)]
pub struct DrawPool {
    order: Vec<u8>,
    cursor: usize,
}

impl DrawPool {
    /// All 90 balls in a random order taken from `rng`.
    pub fn new_shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut order: Vec<u8> = (1..=MAX_NUMBER).collect();
        shuffle(rng, &mut order);
        DrawPool { order, cursor: 0 }
    }

    /// Draw in exactly this order. Used to stage a known game. The order may
    /// leave balls out but every ball must be in 1-90 and appear once.
    pub fn from_order(order: Vec<u8>) -> Result<Self, DrawOrderError> {
        let mut seen = HashSet::with_capacity(order.len());
        for &number in &order {
            if !(1..=MAX_NUMBER).contains(&number) {
                return Err(DrawOrderError::OutOfRange(number));
            }
            if !seen.insert(number) {
                return Err(DrawOrderError::Duplicate(number));
            }
        }
        Ok(DrawPool { order, cursor: 0 })
    }

    /// Remove and return the next ball.
    pub fn draw_next(&mut self) -> Result<u8, DrawPoolExhausted> {
        let number = *self.order.get(self.cursor).ok_or(DrawPoolExhausted)?;
        self.cursor += 1;
        debug!("drew {} ({} left)", number, self.remaining_count());
        Ok(number)
    }

    pub fn remaining_count(&self) -> usize {
        self.order.len() - self.cursor
    }

    /// Undrawn balls, ascending.
    pub fn remaining(&self) -> Vec<u8> {
        let mut left = self.order[self.cursor..].to_vec();
        left.sort_unstable();
        left
    }

    /// Balls drawn so far, in call order.
    pub fn drawn(&self) -> &[u8] {
        &self.order[..self.cursor]
    }

    pub fn drawn_set(&self) -> HashSet<u8> {
        self.drawn().iter().copied().collect()
    }

    pub fn last_drawn(&self) -> Option<u8> {
        self.drawn().last().copied()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.order.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn ninety_draws_cover_one_to_ninety_then_exhaust() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut pool = DrawPool::new_shuffled(&mut rng);
        let mut all: Vec<u8> = (0..90).map(|_| pool.draw_next().unwrap()).collect();

        assert!(pool.is_exhausted());
        assert_eq!(pool.draw_next(), Err(DrawPoolExhausted));
        assert_eq!(pool.draw_next(), Err(DrawPoolExhausted), "exhaustion is terminal");

        all.sort_unstable();
        assert_eq!(all, (1..=90).collect::<Vec<u8>>());
    }

    #[test]
    fn remaining_and_drawn_partition_the_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pool = DrawPool::new_shuffled(&mut rng);
        for _ in 0..30 {
            pool.draw_next().unwrap();
        }
        assert_eq!(pool.remaining_count(), 60);
        assert_eq!(pool.drawn().len(), 30);
        let drawn = pool.drawn_set();
        assert!(pool.remaining().iter().all(|n| !drawn.contains(n)));
        assert_eq!(pool.last_drawn(), pool.drawn().last().copied());
    }

    #[test]
    fn draw_order_is_deterministic_with_seed() {
        let make = |seed: u64| -> Vec<u8> {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut pool = DrawPool::new_shuffled(&mut rng);
            (0..10).map(|_| pool.draw_next().unwrap()).collect()
        };
        assert_eq!(make(99), make(99));
        assert_ne!(make(99), make(100));
    }

    #[test]
    fn staged_order_is_respected() {
        let mut pool = DrawPool::from_order(vec![90, 1, 45]).unwrap();
        assert_eq!(pool.draw_next(), Ok(90));
        assert_eq!(pool.draw_next(), Ok(1));
        assert_eq!(pool.remaining(), vec![45]);
        assert_eq!(pool.draw_next(), Ok(45));
        assert_eq!(pool.draw_next(), Err(DrawPoolExhausted));
    }

    #[test]
    fn staged_order_rejects_bad_balls() {
        assert_eq!(DrawPool::from_order(vec![5, 5]).unwrap_err(), DrawOrderError::Duplicate(5));
        assert_eq!(DrawPool::from_order(vec![0]).unwrap_err(), DrawOrderError::OutOfRange(0));
        assert_eq!(DrawPool::from_order(vec![7, 91]).unwrap_err(), DrawOrderError::OutOfRange(91));
        assert!(DrawPool::from_order(vec![]).unwrap().is_exhausted());
    }
}
