use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DataError;

// ---------------------------------------------------------------------------
// Price data
// ---------------------------------------------------------------------------

/// A single daily OHLCV bar for one trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: u64,
}

impl PricePoint {
    /// Check the OHLC range invariants for this bar.
    ///
    /// Prices must be positive, the high must be at or above every other
    /// price, and the low at or below every other price.
    pub fn validate(&self) -> Result<(), DataError> {
        let invalid = |reason: &str| DataError::InvalidBar {
            date: self.date,
            reason: reason.to_string(),
        };

        if self.open <= Decimal::ZERO
            || self.high <= Decimal::ZERO
            || self.low <= Decimal::ZERO
            || self.close <= Decimal::ZERO
        {
            return Err(invalid("prices must be positive"));
        }
        if self.high < self.open || self.high < self.close || self.high < self.low {
            return Err(invalid("high is below another price"));
        }
        if self.low > self.open || self.low > self.close {
            return Err(invalid("low is above another price"));
        }
        Ok(())
    }
}

/// An ordered daily price history for one ticker.
///
/// Dates are unique and strictly increasing; gaps for non-trading days
/// (weekends, holidays) are expected and nothing here assumes calendar
/// contiguity. The series is immutable after construction — all derived
/// series are pure functions of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from bars, enforcing ordering and range invariants.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, DataError> {
        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(DataError::OutOfOrder { date: pair[1].date });
            }
        }
        for point in &points {
            point.validate()?;
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Closing prices in date order.
    pub fn closes(&self) -> Vec<Decimal> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Trading dates in order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// The sub-series with dates in `[start, end]`, inclusive.
    ///
    /// Invariants are preserved by construction, so no re-validation.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> PriceSeries {
        let points = self
            .points
            .iter()
            .filter(|p| p.date >= start && p.date <= end)
            .copied()
            .collect();
        Self { points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, n).unwrap()
    }

    fn bar(n: u32, close: Decimal) -> PricePoint {
        PricePoint {
            date: day(n),
            open: close,
            high: close + dec!(1),
            low: close - dec!(1),
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn accepts_ordered_bars_with_gaps() {
        // Friday then Monday — weekend gap is fine
        let series = PriceSeries::new(vec![bar(5, dec!(10)), bar(8, dec!(11))]).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![dec!(10), dec!(11)]);
    }

    #[test]
    fn rejects_duplicate_dates() {
        let err = PriceSeries::new(vec![bar(5, dec!(10)), bar(5, dec!(11))]).unwrap_err();
        assert!(matches!(err, DataError::OutOfOrder { .. }));
    }

    #[test]
    fn rejects_out_of_order_dates() {
        let err = PriceSeries::new(vec![bar(8, dec!(10)), bar(5, dec!(11))]).unwrap_err();
        assert!(matches!(err, DataError::OutOfOrder { .. }));
    }

    #[test]
    fn rejects_high_below_close() {
        let point = PricePoint {
            date: day(1),
            open: dec!(10),
            high: dec!(9),
            low: dec!(8),
            close: dec!(10),
            volume: 0,
        };
        let err = PriceSeries::new(vec![point]).unwrap_err();
        assert!(matches!(err, DataError::InvalidBar { .. }));
    }

    #[test]
    fn rejects_non_positive_prices() {
        let point = PricePoint {
            date: day(1),
            open: dec!(0),
            high: dec!(1),
            low: dec!(0.5),
            close: dec!(1),
            volume: 0,
        };
        assert!(PriceSeries::new(vec![point]).is_err());
    }

    #[test]
    fn between_is_inclusive() {
        let series =
            PriceSeries::new(vec![bar(1, dec!(10)), bar(2, dec!(11)), bar(3, dec!(12))]).unwrap();
        let window = series.between(day(2), day(3));
        assert_eq!(window.dates(), vec![day(2), day(3)]);
    }
}
