//! Price update rules.
//!
//! A `PriceModel` turns the last committed price into the next one. The
//! production model is `PiecewiseWalk`, an asymmetric ±500 random walk clamped
//! to `[MIN_PRICE, MAX_PRICE]` that drifts down from the ceiling and back up from
//! the floor:
//!
//! | last price     | change                         |
//! |----------------|--------------------------------|
//! | `>= 5000`      | −500 with p 0.48, else 0       |
//! | `[3000, 4000)` | +500 with p 0.58, else −500    |
//! | `<= 2500`      | +500 with p 0.7, else 0        |
//! | otherwise      | ±500 with equal odds           |

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const MIN_PRICE: i64 = 2500;
pub const MAX_PRICE: i64 = 5000;
/// Size of one price move.
pub const STEP: i64 = 500;

/// Produces the next price from the last one.
pub trait PriceModel: Send {
    fn next_price(&mut self, last_price: i64) -> i64;
}

/// Apply `change` to `last_price` and clamp into the trading band.
pub fn apply_change(last_price: i64, change: i64) -> i64 {
    (last_price + change).clamp(MIN_PRICE, MAX_PRICE)
}

/// Randomized piecewise walk driven by any `rand::Rng`.
#[derive(Debug, Clone)]
pub struct PiecewiseWalk<R> {
    rng: R,
}

impl PiecewiseWalk<StdRng> {
    /// Walk seeded from the operating system. `ThreadRng` is not `Send`, so the
    /// simulator thread owns its own generator.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> PiecewiseWalk<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw the raw change for `last_price`, before clamping.
    pub fn draw_change(&mut self, last_price: i64) -> i64 {
        if last_price >= MAX_PRICE {
            if self.rng.random_bool(0.48) { -STEP } else { 0 }
        } else if (3000..4000).contains(&last_price) {
            if self.rng.random_bool(0.58) { STEP } else { -STEP }
        } else if last_price <= MIN_PRICE {
            if self.rng.random_bool(0.7) { STEP } else { 0 }
        } else if self.rng.random_bool(0.5) {
            STEP
        } else {
            -STEP
        }
    }
}

impl<R: Rng + Send> PriceModel for PiecewiseWalk<R> {
    fn next_price(&mut self, last_price: i64) -> i64 {
        let change = self.draw_change(last_price);
        apply_change(last_price, change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    const DRAWS: usize = 2000;
    const WIDE_DRAWS: usize = 20_000;

    fn changes_at(last_price: i64) -> (BTreeSet<i64>, usize) {
        let mut walk = PiecewiseWalk::new(StdRng::seed_from_u64(7));
        let mut seen = BTreeSet::new();
        let mut ups = 0;
        for _ in 0..DRAWS {
            let change = walk.draw_change(last_price);
            if change > 0 {
                ups += 1;
            }
            seen.insert(change);
        }
        (seen, ups)
    }

    /// Up-moves out of `WIDE_DRAWS` draws, enough to tell p 0.5 from p 0.58.
    fn ups_at(last_price: i64) -> usize {
        let mut walk = PiecewiseWalk::new(StdRng::seed_from_u64(11));
        (0..WIDE_DRAWS)
            .filter(|_| walk.draw_change(last_price) > 0)
            .count()
    }

    #[test]
    fn ceiling_moves_down_or_holds() {
        let (seen, _) = changes_at(5000);
        assert_eq!(seen, BTreeSet::from([-500, 0]));
    }

    #[test]
    fn below_ceiling_is_symmetric_walk() {
        let (seen, ups) = changes_at(4500);
        assert_eq!(seen, BTreeSet::from([-500, 500]));
        assert!((800..1200).contains(&ups), "ups = {ups}");
        let (seen, _) = changes_at(4000);
        assert_eq!(seen, BTreeSet::from([-500, 500]));
    }

    #[test]
    fn middle_band_ends_below_4000() {
        let at_4000 = ups_at(4000);
        assert!((9500..10500).contains(&at_4000), "ups at 4000 = {at_4000}");
        let at_3999 = ups_at(3999);
        assert!((11100..12100).contains(&at_3999), "ups at 3999 = {at_3999}");
    }

    #[test]
    fn middle_band_leans_up() {
        let (seen, ups) = changes_at(3000);
        assert_eq!(seen, BTreeSet::from([-500, 500]));
        assert!((1040..1280).contains(&ups), "ups = {ups}");
        let (seen, ups) = changes_at(3500);
        assert_eq!(seen, BTreeSet::from([-500, 500]));
        assert!((1040..1280).contains(&ups), "ups = {ups}");
    }

    #[test]
    fn just_above_floor_is_symmetric_walk() {
        let (seen, _) = changes_at(2999);
        assert_eq!(seen, BTreeSet::from([-500, 500]));
    }

    #[test]
    fn floor_moves_up_or_holds() {
        let (seen, ups) = changes_at(2500);
        assert_eq!(seen, BTreeSet::from([0, 500]));
        assert!((1280..1520).contains(&ups), "ups = {ups}");
    }

    #[test]
    fn next_price_never_leaves_band() {
        let mut walk = PiecewiseWalk::new(StdRng::seed_from_u64(42));
        for _ in 0..DRAWS {
            assert!(walk.next_price(5000) <= MAX_PRICE);
            assert!(walk.next_price(2500) >= MIN_PRICE);
        }
        let mut price = 5000;
        for _ in 0..DRAWS {
            price = walk.next_price(price);
            assert!((MIN_PRICE..=MAX_PRICE).contains(&price));
            assert_eq!(price % STEP, 0);
        }
    }

    #[test]
    fn apply_change_clamps() {
        assert_eq!(apply_change(5000, 500), 5000);
        assert_eq!(apply_change(2500, -500), 2500);
        assert_eq!(apply_change(5000, -500), 4500);
        assert_eq!(apply_change(2700, -500), 2500);
    }
}
