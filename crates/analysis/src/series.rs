use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use stockscope_core::{AnalysisError, PriceSeries};
use stockscope_indicators::bollinger::BollingerBands;
use stockscope_indicators::ema::Ema;
use stockscope_indicators::macd::Macd;
use stockscope_indicators::rsi::Rsi;
use stockscope_indicators::sma::Sma;
use stockscope_indicators::Indicator;

/// A single derived column, truncated to its defined region.
///
/// `dates[i]` is the trading day `values[i]` belongs to; the warm-up
/// prefix of the input is omitted, so for a window of `w` over `n` closes
/// the output holds `n − w + 1` points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndicatorSeries {
    pub dates: Vec<NaiveDate>,
    pub values: Vec<Decimal>,
}

/// Bollinger bands, truncated to the defined region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BollingerSeries {
    pub dates: Vec<NaiveDate>,
    pub middle: Vec<Decimal>,
    pub upper: Vec<Decimal>,
    pub lower: Vec<Decimal>,
}

/// MACD and signal lines, truncated to where the signal line is defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MacdSeries {
    pub dates: Vec<NaiveDate>,
    pub macd: Vec<Decimal>,
    pub signal: Vec<Decimal>,
}

/// Reject a computation whose warm-up would consume the whole series.
///
/// `window` is the window length reported in the error; `min_points` the
/// number of observations the indicator needs before its first output
/// (one more than the window for RSI).
fn check_window(window: usize, min_points: usize, len: usize) -> Result<(), AnalysisError> {
    if min_points > len {
        return Err(AnalysisError::InvalidWindow { window, len });
    }
    Ok(())
}

/// Drive a streaming indicator across the series, keeping defined points.
fn collect(series: &PriceSeries, indicator: &mut dyn Indicator) -> IndicatorSeries {
    let mut dates = Vec::new();
    let mut values = Vec::new();
    for point in series.points() {
        if let Some(value) = indicator.next(point.close) {
            dates.push(point.date);
            values.push(value);
        }
    }
    IndicatorSeries { dates, values }
}

/// Simple moving average of the closes over `window` days.
pub fn sma(series: &PriceSeries, window: usize) -> Result<IndicatorSeries, AnalysisError> {
    check_window(window, window, series.len())?;
    Ok(collect(series, &mut Sma::new(window)))
}

/// Exponential moving average of the closes over `window` days.
pub fn ema(series: &PriceSeries, window: usize) -> Result<IndicatorSeries, AnalysisError> {
    check_window(window, window, series.len())?;
    Ok(collect(series, &mut Ema::new(window)))
}

/// Relative strength index over `window` per-day changes.
///
/// Needs `window + 1` closes for its first output, so the result holds
/// `len − window` points.
pub fn rsi(series: &PriceSeries, window: usize) -> Result<IndicatorSeries, AnalysisError> {
    check_window(window, window + 1, series.len())?;
    Ok(collect(series, &mut Rsi::new(window)))
}

/// Bollinger bands over `window` days, `k` standard deviations wide.
pub fn bollinger(
    series: &PriceSeries,
    window: usize,
    k: Decimal,
) -> Result<BollingerSeries, AnalysisError> {
    check_window(window, window, series.len())?;

    let mut bands = BollingerBands::new(window, k);
    let mut out = BollingerSeries {
        dates: Vec::new(),
        middle: Vec::new(),
        upper: Vec::new(),
        lower: Vec::new(),
    };
    for point in series.points() {
        if let Some(bb) = bands.next_point(point.close) {
            out.dates.push(point.date);
            out.middle.push(bb.middle);
            out.upper.push(bb.upper);
            out.lower.push(bb.lower);
        }
    }
    Ok(out)
}

/// MACD with the standard (12, 26, 9) constants.
pub fn macd(series: &PriceSeries) -> Result<MacdSeries, AnalysisError> {
    let mut indicator = Macd::default_periods();
    // report the combined warm-up (slow 26 + signal 9 − 1), not the bare
    // slow window, so the error's counts stay coherent
    let min_points = indicator.period();
    check_window(min_points, min_points, series.len())?;

    let mut out = MacdSeries {
        dates: Vec::new(),
        macd: Vec::new(),
        signal: Vec::new(),
    };
    for point in series.points() {
        if let Some(lines) = indicator.next_point(point.close) {
            out.dates.push(point.date);
            out.macd.push(lines.macd);
            out.signal.push(lines.signal);
        }
    }
    Ok(out)
}
