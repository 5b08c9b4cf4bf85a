use crate::Indicator;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::VecDeque;

/// Relative Strength Index (RSI).
///
/// Average gain and average loss are plain means over the trailing window
/// of per-period changes (Cutler's variant, not Wilder smoothing).
/// `RS = avg_gain / avg_loss`; when the average loss is zero RS is treated
/// as infinite and RSI reads 100 — this also covers a flat series, where
/// both averages are zero. Output is always within [0, 100].
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    prev_close: Option<Decimal>,
    gains: VecDeque<Decimal>,
    losses: VecDeque<Decimal>,
    gain_sum: Decimal,
    loss_sum: Decimal,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "RSI period must be > 0");
        Self {
            period,
            prev_close: None,
            gains: VecDeque::with_capacity(period),
            losses: VecDeque::with_capacity(period),
            gain_sum: Decimal::ZERO,
            loss_sum: Decimal::ZERO,
        }
    }

    pub fn value(&self) -> Option<Decimal> {
        if self.gains.len() < self.period {
            return None;
        }
        if self.loss_sum.is_zero() {
            return Some(dec!(100));
        }
        // averages share the same divisor, so RS reduces to the sum ratio
        let rs = self.gain_sum / self.loss_sum;
        Some(dec!(100) - dec!(100) / (Decimal::ONE + rs))
    }
}

impl Indicator for Rsi {
    fn next(&mut self, value: Decimal) -> Option<Decimal> {
        if let Some(prev) = self.prev_close {
            let change = value - prev;
            let gain = change.max(Decimal::ZERO);
            let loss = (-change).max(Decimal::ZERO);

            self.gains.push_back(gain);
            self.losses.push_back(loss);
            self.gain_sum += gain;
            self.loss_sum += loss;

            if self.gains.len() > self.period {
                if let Some(old) = self.gains.pop_front() {
                    self.gain_sum -= old;
                }
                if let Some(old) = self.losses.pop_front() {
                    self.loss_sum -= old;
                }
            }
        }
        self.prev_close = Some(value);
        self.value()
    }

    fn reset(&mut self) {
        self.prev_close = None;
        self.gains.clear();
        self.losses.clear();
        self.gain_sum = Decimal::ZERO;
        self.loss_sum = Decimal::ZERO;
    }

    fn period(&self) -> usize {
        // one extra data point for the first change
        self.period + 1
    }

    fn is_ready(&self) -> bool {
        self.gains.len() == self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warmup_needs_period_plus_one_closes() {
        let mut rsi = Rsi::new(3);
        assert_eq!(rsi.next(dec!(10)), None);
        assert_eq!(rsi.next(dec!(11)), None);
        assert_eq!(rsi.next(dec!(10)), None);
        assert!(rsi.next(dec!(12)).is_some());
    }

    #[test]
    fn all_gains_read_one_hundred() {
        let mut rsi = Rsi::new(14);
        let mut value = None;
        for i in 0..20 {
            value = rsi.next(Decimal::from(100 + i));
        }
        assert_eq!(value, Some(dec!(100)));
    }

    #[test]
    fn all_losses_read_zero() {
        let mut rsi = Rsi::new(14);
        let mut value = None;
        for i in 0..20 {
            value = rsi.next(Decimal::from(100 - i));
        }
        assert_eq!(value, Some(Decimal::ZERO));
    }

    #[test]
    fn flat_series_reads_one_hundred() {
        // both averages zero → the avg_loss = 0 rule applies
        let mut rsi = Rsi::new(5);
        let mut value = None;
        for _ in 0..10 {
            value = rsi.next(dec!(42));
        }
        assert_eq!(value, Some(dec!(100)));
    }

    #[test]
    fn trailing_window_means() {
        // changes: +2, -1, +2 over window 3 → RS = 4/1, RSI = 80
        let mut rsi = Rsi::new(3);
        rsi.next(dec!(10));
        rsi.next(dec!(12));
        rsi.next(dec!(11));
        assert_eq!(rsi.next(dec!(13)), Some(dec!(80)));
    }

    #[test]
    fn bounded_between_zero_and_one_hundred() {
        let closes = [
            dec!(44), dec!(44.34), dec!(44.09), dec!(43.61), dec!(44.33), dec!(44.83),
            dec!(45.10), dec!(45.42), dec!(45.84), dec!(46.08), dec!(45.89), dec!(46.03),
            dec!(45.61), dec!(46.28), dec!(46.28), dec!(46.00), dec!(46.03),
        ];
        let mut rsi = Rsi::new(14);
        for close in closes {
            if let Some(value) = rsi.next(close) {
                assert!(value >= Decimal::ZERO && value <= dec!(100));
            }
        }
        assert!(rsi.is_ready());
    }
}
