use crate::Indicator;
use rust_decimal::Decimal;

/// Exponential Moving Average (EMA).
///
/// Smoothing factor α = 2 / (period + 1). The first output at position
/// `period - 1` is the plain SMA of the seed window; afterwards
/// `ema = α·value + (1 − α)·prev`.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    alpha: Decimal,
    seed_sum: Decimal,
    seen: usize,
    current: Option<Decimal>,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "EMA period must be > 0");
        Self {
            period,
            alpha: Decimal::TWO / (Decimal::from(period) + Decimal::ONE),
            seed_sum: Decimal::ZERO,
            seen: 0,
            current: None,
        }
    }

    pub fn value(&self) -> Option<Decimal> {
        self.current
    }
}

impl Indicator for Ema {
    fn next(&mut self, value: Decimal) -> Option<Decimal> {
        self.seen += 1;

        self.current = match self.current {
            None => {
                self.seed_sum += value;
                if self.seen < self.period {
                    None
                } else {
                    Some(self.seed_sum / Decimal::from(self.period))
                }
            }
            Some(prev) => Some(self.alpha * value + (Decimal::ONE - self.alpha) * prev),
        };

        self.current
    }

    fn reset(&mut self) {
        self.seed_sum = Decimal::ZERO;
        self.seen = 0;
        self.current = None;
    }

    fn period(&self) -> usize {
        self.period
    }

    fn is_ready(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn seeds_with_sma_of_first_window() {
        let mut ema = Ema::new(3);
        assert_eq!(ema.next(dec!(2)), None);
        assert_eq!(ema.next(dec!(4)), None);
        // seed = (2 + 4 + 6) / 3
        assert_eq!(ema.next(dec!(6)), Some(dec!(4)));
    }

    #[test]
    fn follows_recurrence_after_seed() {
        let mut ema = Ema::new(3);
        ema.next(dec!(2));
        ema.next(dec!(4));
        ema.next(dec!(6)); // seed = 4, alpha = 0.5
        assert_eq!(ema.next(dec!(8)), Some(dec!(6)));
        assert_eq!(ema.next(dec!(6)), Some(dec!(6)));
    }

    #[test]
    fn constant_input_stays_constant() {
        let mut ema = Ema::new(4);
        let mut last = None;
        for _ in 0..20 {
            last = ema.next(dec!(50));
        }
        assert_eq!(last, Some(dec!(50)));
    }

    #[test]
    fn reset_restarts_seeding() {
        let mut ema = Ema::new(2);
        ema.next(dec!(10));
        ema.next(dec!(20));
        ema.reset();
        assert!(!ema.is_ready());
        assert_eq!(ema.next(dec!(30)), None);
    }
}
