use crate::error::DataError;
use crate::models::PriceSeries;

/// Provides already-fetched price history for analysis.
///
/// The pipeline never fetches data itself; it receives a full history from
/// a provider and slices the requested date window off it. Implementations
/// own all I/O and are invoked once per analysis request.
pub trait PriceHistory: Send + Sync {
    /// Load the maximum available daily history for a ticker.
    fn history(&self, ticker: &str) -> Result<PriceSeries, DataError>;

    /// List tickers this provider can serve.
    fn available_tickers(&self) -> Result<Vec<String>, DataError>;
}
