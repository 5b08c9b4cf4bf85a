use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use stockscope_core::{AnalysisError, PriceSeries};

/// The latest-session numbers shown in the dashboard's metric tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub date: NaiveDate,
    pub close: Decimal,
    /// Close minus the previous session's close.
    pub change: Decimal,
    pub change_percent: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub volume: u64,
}

/// Summarize the most recent session against the one before it.
pub fn snapshot(series: &PriceSeries) -> Result<Snapshot, AnalysisError> {
    let len = series.len();
    if len < 2 {
        return Err(AnalysisError::InsufficientData {
            required: 2,
            actual: len,
        });
    }

    let points = series.points();
    let last = points[len - 1];
    let prev = points[len - 2];

    let change = last.close - prev.close;
    // prev.close > 0 by series invariant
    let change_percent = change / prev.close * Decimal::ONE_HUNDRED;

    Ok(Snapshot {
        date: last.date,
        close: last.close,
        change,
        change_percent,
        high: last.high,
        low: last.low,
        volume: last.volume,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use stockscope_core::PricePoint;

    fn point(day: u32, close: Decimal, volume: u64) -> PricePoint {
        PricePoint {
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            open: close,
            high: close + dec!(3),
            low: close - dec!(2),
            close,
            volume,
        }
    }

    #[test]
    fn change_is_against_previous_close() {
        let series =
            PriceSeries::new(vec![point(1, dec!(200), 10), point(2, dec!(205), 42)]).unwrap();
        let snap = snapshot(&series).unwrap();
        assert_eq!(snap.date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        assert_eq!(snap.close, dec!(205));
        assert_eq!(snap.change, dec!(5));
        assert_eq!(snap.change_percent, dec!(2.5));
        assert_eq!(snap.volume, 42);
    }

    #[test]
    fn single_session_is_not_enough() {
        let series = PriceSeries::new(vec![point(1, dec!(200), 10)]).unwrap();
        let err = snapshot(&series).unwrap_err();
        assert_eq!(err, AnalysisError::InsufficientData { required: 2, actual: 1 });
    }
}
