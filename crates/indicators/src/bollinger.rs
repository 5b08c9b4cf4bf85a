use crate::math;
use crate::Indicator;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::VecDeque;

/// Bollinger Bands.
///
/// Middle band is the SMA of the trailing window; upper and lower bands sit
/// `k` population standard deviations (σ computed with ÷ n, not n − 1)
/// above and below it. Zero variance collapses both bands onto the middle
/// band, which keeps `upper >= middle >= lower` for any input.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    k: Decimal,
    window: VecDeque<Decimal>,
    sum: Decimal,
}

/// One Bollinger observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BollingerPoint {
    pub middle: Decimal,
    pub upper: Decimal,
    pub lower: Decimal,
}

impl BollingerBands {
    pub fn new(period: usize, k: Decimal) -> Self {
        assert!(period > 0, "Bollinger period must be > 0");
        Self {
            period,
            k,
            window: VecDeque::with_capacity(period),
            sum: Decimal::ZERO,
        }
    }

    /// Standard Bollinger Bands (20, 2).
    pub fn default_periods() -> Self {
        Self::new(20, Decimal::TWO)
    }

    /// Current bands without feeding new data.
    pub fn point(&self) -> Option<BollingerPoint> {
        if self.window.len() < self.period {
            return None;
        }
        let middle = self.sum / Decimal::from(self.period);
        let variance = self
            .window
            .iter()
            .map(|v| {
                let d = *v - middle;
                d * d
            })
            .sum::<Decimal>()
            / Decimal::from(self.period);
        let spread = self.k * math::sqrt(variance);
        Some(BollingerPoint {
            middle,
            upper: middle + spread,
            lower: middle - spread,
        })
    }

    /// Feed the next value and return the bands if the window is full.
    pub fn next_point(&mut self, value: Decimal) -> Option<BollingerPoint> {
        self.window.push_back(value);
        self.sum += value;
        if self.window.len() > self.period {
            if let Some(evicted) = self.window.pop_front() {
                self.sum -= evicted;
            }
        }
        self.point()
    }
}

impl Indicator for BollingerBands {
    fn next(&mut self, value: Decimal) -> Option<Decimal> {
        self.next_point(value).map(|p| p.middle)
    }

    fn reset(&mut self) {
        self.window.clear();
        self.sum = Decimal::ZERO;
    }

    fn period(&self) -> usize {
        self.period
    }

    fn is_ready(&self) -> bool {
        self.window.len() == self.period
    }
}
