//! Batch analysis pipeline over a [`PriceSeries`].
//!
//! Everything here is a pure, stateless transform of an immutable input:
//! one analysis request builds one series and every derived series is a
//! function of it, so independent requests can run concurrently without
//! any shared state. Warm-up values are omitted from output, never
//! interpolated or zero-filled; with `Decimal` there is no NaN, so
//! `Option<Decimal>` (`None` = undefined) is the sentinel wherever a
//! sequence must stay index-aligned.
//!
//! [`PriceSeries`]: stockscope_core::PriceSeries

pub mod decompose;
pub mod series;
pub mod snapshot;
pub mod table;

pub use decompose::{decompose, Decomposition, DecompositionModel};
pub use series::{bollinger, ema, macd, rsi, sma, BollingerSeries, IndicatorSeries, MacdSeries};
pub use snapshot::{snapshot, Snapshot};
pub use table::{indicator_table, IndicatorRow, IndicatorTable};
