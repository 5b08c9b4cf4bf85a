pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod math;
pub mod rsi;
pub mod sma;

use rust_decimal::Decimal;

/// Trait for streaming (incremental) indicators.
/// Feed one value at a time; the indicator maintains internal state.
///
/// Output is `None` until the warm-up window is full. Warm-up values are
/// never fabricated — callers that need aligned tabular output drop the
/// undefined region instead of zero-filling it.
pub trait Indicator: Send + Sync {
    /// Process the next value and return the indicator output (if ready).
    fn next(&mut self, value: Decimal) -> Option<Decimal>;

    /// Reset the indicator to its initial state.
    fn reset(&mut self);

    /// The minimum number of data points needed before the indicator produces output.
    fn period(&self) -> usize;

    /// Whether the indicator has enough data to produce output.
    fn is_ready(&self) -> bool;
}
