use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use stockscope_core::{DataError, PricePoint, PriceSeries};

/// Load a daily OHLCV history from a CSV file.
///
/// Expected columns (case-insensitive, flexible ordering):
/// `date` (or `timestamp`), `open`, `high`, `low`, `close`, `volume`.
/// Rows are sorted by date before series construction; ordering and OHLC
/// range invariants are then enforced by [`PriceSeries::new`].
pub fn load_series(path: &Path) -> Result<PriceSeries, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| DataError::ParseError(format!("Failed to open CSV: {}", e)))?;

    let headers = reader
        .headers()
        .map_err(|e| DataError::ParseError(format!("Failed to read headers: {}", e)))?
        .clone();
    let columns = resolve_columns(&headers)?;

    let mut points = Vec::new();
    for result in reader.records() {
        let record =
            result.map_err(|e| DataError::ParseError(format!("CSV record error: {}", e)))?;

        points.push(PricePoint {
            date: parse_date(&record[columns.date])?,
            open: parse_price(&record[columns.open], "open")?,
            high: parse_price(&record[columns.high], "high")?,
            low: parse_price(&record[columns.low], "low")?,
            close: parse_price(&record[columns.close], "close")?,
            volume: match columns.volume {
                Some(idx) => parse_volume(&record[idx])?,
                None => 0,
            },
        });
    }

    points.sort_by_key(|p| p.date);
    let series = PriceSeries::new(points)?;

    tracing::debug!(
        path = %path.display(),
        days = series.len(),
        "Loaded price history"
    );
    Ok(series)
}

struct ColumnMap {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: Option<usize>,
}

fn resolve_columns(headers: &csv::StringRecord) -> Result<ColumnMap, DataError> {
    let required = |names: &[&str]| {
        find_column(headers, names)
            .ok_or_else(|| DataError::ParseError(format!("No {} column found", names[0])))
    };

    Ok(ColumnMap {
        date: required(&["date", "timestamp", "datetime"])?,
        open: required(&["open", "o"])?,
        high: required(&["high", "h"])?,
        low: required(&["low", "l"])?,
        close: required(&["close", "adj close", "c"])?,
        volume: find_column(headers, &["volume", "vol", "v"]),
    })
}

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|header| names.contains(&header.trim().to_lowercase().as_str()))
}

fn parse_price(s: &str, field: &str) -> Result<Decimal, DataError> {
    Decimal::from_str(s.trim())
        .map_err(|e| DataError::ParseError(format!("Failed to parse {} '{}': {}", field, s, e)))
}

fn parse_volume(s: &str) -> Result<u64, DataError> {
    s.trim()
        .parse::<u64>()
        .map_err(|e| DataError::ParseError(format!("Failed to parse volume '{}': {}", s, e)))
}

fn parse_date(s: &str) -> Result<NaiveDate, DataError> {
    let s = s.trim();
    for format in ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(date);
        }
    }
    // tolerate datetime stamps by keeping the date part
    if let Some((prefix, _)) = s.split_once([' ', 'T']) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Ok(date);
        }
    }
    Err(DataError::ParseError(format!(
        "Unable to parse date: '{}'",
        s
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_fixture(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("stockscope-{}-{}", std::process::id(), name));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_and_sorts_daily_bars() {
        let path = write_fixture(
            "basic.csv",
            "Date,Open,High,Low,Close,Volume\n\
             2024-01-03,102,104,101,103,900\n\
             2024-01-02,100,103,99,102,1200\n",
        );
        let series = load_series(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(
            series.first().unwrap().date,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
        assert_eq!(series.last().unwrap().volume, 900);
    }

    #[test]
    fn header_case_and_order_are_flexible() {
        let path = write_fixture(
            "headers.csv",
            "volume,close,LOW,HIGH,open,date\n\
             500,20.5,19,21,20,2024-02-01\n",
        );
        let series = load_series(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let point = series.first().unwrap();
        assert_eq!(point.close, Decimal::from_str("20.5").unwrap());
        assert_eq!(point.volume, 500);
    }

    #[test]
    fn bad_price_reports_the_field() {
        let path = write_fixture(
            "bad.csv",
            "date,open,high,low,close,volume\n\
             2024-02-01,20,21,x,20.5,500\n",
        );
        let err = load_series(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        match err {
            DataError::ParseError(message) => assert!(message.contains("low")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_column_is_rejected() {
        let path = write_fixture(
            "nocol.csv",
            "date,open,high,low,volume\n2024-02-01,20,21,19,500\n",
        );
        let err = load_series(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, DataError::ParseError(_)));
    }

    #[test]
    fn invariant_violations_surface_as_data_errors() {
        // high below close
        let path = write_fixture(
            "invariant.csv",
            "date,open,high,low,close,volume\n2024-02-01,20,20.5,19,21,500\n",
        );
        let err = load_series(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, DataError::InvalidBar { .. }));
    }
}
