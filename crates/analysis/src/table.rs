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

/// Short moving-average window shown on the dashboard.
pub const MA_SHORT: usize = 20;
/// Long moving-average window shown on the dashboard.
pub const MA_LONG: usize = 50;
/// Bollinger window.
pub const BOLLINGER_WINDOW: usize = 20;
/// RSI window.
pub const RSI_WINDOW: usize = 14;

/// One fully defined row of the combined indicator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndicatorRow {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub sma_20: Decimal,
    pub sma_50: Decimal,
    pub ema_20: Decimal,
    pub ema_50: Decimal,
    pub bollinger_high: Decimal,
    pub bollinger_low: Decimal,
    pub macd: Decimal,
    pub macd_signal: Decimal,
    pub rsi: Decimal,
}

/// The combined indicator table: gap-free, every column defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndicatorTable {
    rows: Vec<IndicatorRow>,
}

impl IndicatorTable {
    pub fn rows(&self) -> &[IndicatorRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Compute every dashboard indicator over the series in one pass.
///
/// Rows where any derived value is still warming up are dropped, so the
/// first row lands where the slowest column (the 50-day averages) becomes
/// defined. Volume is not carried; the dashboard's indicator view drops it
/// before computing anything.
pub fn indicator_table(series: &PriceSeries) -> Result<IndicatorTable, AnalysisError> {
    let len = series.len();
    for window in [MA_SHORT, MA_LONG] {
        if window > len {
            return Err(AnalysisError::InvalidWindow { window, len });
        }
    }

    let mut sma_20 = Sma::new(MA_SHORT);
    let mut sma_50 = Sma::new(MA_LONG);
    let mut ema_20 = Ema::new(MA_SHORT);
    let mut ema_50 = Ema::new(MA_LONG);
    let mut bands = BollingerBands::new(BOLLINGER_WINDOW, Decimal::TWO);
    let mut macd = Macd::default_periods();
    let mut rsi = Rsi::new(RSI_WINDOW);

    let mut rows = Vec::new();
    for point in series.points() {
        let close = point.close;
        let columns = (
            sma_20.next(close),
            sma_50.next(close),
            ema_20.next(close),
            ema_50.next(close),
            bands.next_point(close),
            macd.next_point(close),
            rsi.next(close),
        );

        // drop-incomplete-rows: a row exists only once every column does
        if let (Some(s20), Some(s50), Some(e20), Some(e50), Some(bb), Some(md), Some(rs)) = columns
        {
            rows.push(IndicatorRow {
                date: point.date,
                open: point.open,
                high: point.high,
                low: point.low,
                close,
                sma_20: s20,
                sma_50: s50,
                ema_20: e20,
                ema_50: e50,
                bollinger_high: bb.upper,
                bollinger_low: bb.lower,
                macd: md.macd,
                macd_signal: md.signal,
                rsi: rs,
            });
        }
    }

    tracing::debug!(
        observations = len,
        rows = rows.len(),
        dropped = len - rows.len(),
        "Indicator table computed"
    );

    Ok(IndicatorTable { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;
    use stockscope_core::PricePoint;

    fn series(n: u32) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        let points = (0..n)
            .map(|i| {
                // mild oscillation so no column degenerates
                let close = Decimal::from(100 + (i % 7)) + Decimal::new(i as i64, 2);
                PricePoint {
                    date: start + Duration::days(i as i64),
                    open: close,
                    high: close + dec!(2),
                    low: close - dec!(2),
                    close,
                    volume: 5_000,
                }
            })
            .collect();
        PriceSeries::new(points).unwrap()
    }

    #[test]
    fn first_row_waits_for_the_long_window() {
        let input = series(60);
        let table = indicator_table(&input).unwrap();
        // 50-day columns define rows 50..=60
        assert_eq!(table.len(), 11);
        assert_eq!(table.rows()[0].date, input.dates()[49]);
    }

    #[test]
    fn rows_carry_price_columns_unchanged() {
        let input = series(60);
        let table = indicator_table(&input).unwrap();
        let last_in = *input.last().unwrap();
        let last_row = *table.rows().last().unwrap();
        assert_eq!(last_row.date, last_in.date);
        assert_eq!(last_row.close, last_in.close);
        assert_eq!(last_row.high, last_in.high);
    }

    #[test]
    fn short_series_is_rejected_not_empty() {
        let input = series(49);
        let err = indicator_table(&input).unwrap_err();
        assert_eq!(err, AnalysisError::InvalidWindow { window: 50, len: 49 });
    }

    #[test]
    fn exactly_long_window_yields_one_row() {
        let input = series(50);
        let table = indicator_table(&input).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn bollinger_columns_straddle_close_mean() {
        let input = series(60);
        let table = indicator_table(&input).unwrap();
        for row in table.rows() {
            assert!(row.bollinger_high >= row.sma_20);
            assert!(row.bollinger_low <= row.sma_20);
        }
    }
}
