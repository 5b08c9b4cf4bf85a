use crate::ema::Ema;
use crate::Indicator;
use rust_decimal::Decimal;
use serde::Serialize;

/// MACD (Moving Average Convergence Divergence).
///
/// macd line = EMA(fast) − EMA(slow); signal line = EMA(signal) over the
/// macd-line values. The (12, 26, 9) defaults are fixed constants of the
/// indicator and independent of whatever moving-average windows the rest
/// of an analysis uses.
#[derive(Debug, Clone)]
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
    line: Option<Decimal>,
    signal_line: Option<Decimal>,
}

/// MACD line and signal line at one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MacdPoint {
    pub macd: Decimal,
    pub signal: Decimal,
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        assert!(
            fast_period < slow_period,
            "Fast period must be less than slow period"
        );
        Self {
            fast: Ema::new(fast_period),
            slow: Ema::new(slow_period),
            signal: Ema::new(signal_period),
            line: None,
            signal_line: None,
        }
    }

    /// Standard MACD (12, 26, 9).
    pub fn default_periods() -> Self {
        Self::new(12, 26, 9)
    }

    /// Current lines, if both are defined.
    pub fn point(&self) -> Option<MacdPoint> {
        match (self.line, self.signal_line) {
            (Some(macd), Some(signal)) => Some(MacdPoint { macd, signal }),
            _ => None,
        }
    }

    /// Feed the next close and return both lines once the signal EMA has
    /// seen enough macd-line values.
    pub fn next_point(&mut self, value: Decimal) -> Option<MacdPoint> {
        let fast = self.fast.next(value);
        let slow = self.slow.next(value);

        if let (Some(f), Some(s)) = (fast, slow) {
            let macd = f - s;
            self.line = Some(macd);
            self.signal_line = self.signal.next(macd);
        }

        self.point()
    }
}

impl Indicator for Macd {
    fn next(&mut self, value: Decimal) -> Option<Decimal> {
        self.next_point(value).map(|p| p.macd)
    }

    fn reset(&mut self) {
        self.fast.reset();
        self.slow.reset();
        self.signal.reset();
        self.line = None;
        self.signal_line = None;
    }

    fn period(&self) -> usize {
        // slow EMA seed plus the signal EMA seed over macd-line values
        self.slow.period() + self.signal.period() - 1
    }

    fn is_ready(&self) -> bool {
        self.signal_line.is_some()
    }
}
