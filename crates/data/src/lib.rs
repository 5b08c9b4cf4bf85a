pub mod csv_history;

use std::path::PathBuf;

use stockscope_core::{DataError, PriceHistory, PriceSeries};

/// A directory of per-ticker daily CSV files (`<directory>/<TICKER>.csv`).
///
/// Stands in for the dashboard's remote price feed: histories are fetched
/// ahead of time and read here, so the analysis pipeline itself never does
/// I/O.
pub struct CsvPriceHistory {
    directory: PathBuf,
}

impl CsvPriceHistory {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

impl PriceHistory for CsvPriceHistory {
    fn history(&self, ticker: &str) -> Result<PriceSeries, DataError> {
        let path = self.directory.join(format!("{ticker}.csv"));
        if !path.exists() {
            return Err(DataError::NotFound(format!(
                "No history for {ticker}: {} does not exist",
                path.display()
            )));
        }
        csv_history::load_series(&path)
    }

    fn available_tickers(&self) -> Result<Vec<String>, DataError> {
        let mut tickers = Vec::new();
        for entry in std::fs::read_dir(&self.directory)? {
            let path = entry?.path();
            if path.extension().map(|e| e == "csv").unwrap_or(false) {
                if let Some(stem) = path.file_stem() {
                    tickers.push(stem.to_string_lossy().to_string());
                }
            }
        }
        tickers.sort();
        Ok(tickers)
    }
}
