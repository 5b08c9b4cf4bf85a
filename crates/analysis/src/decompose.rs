use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockscope_core::{AnalysisError, PriceSeries};

/// How the components combine to reproduce the observed series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecompositionModel {
    /// observed = trend + seasonal + residual
    Additive,
    /// observed = trend × seasonal × residual
    Multiplicative,
}

/// Classical decomposition of the close-price series.
///
/// All four sequences share the input's length and date index. Trend and
/// residual are undefined (`None`) for `period / 2` points at each edge,
/// where the centered moving average has no full window; the seasonal
/// component is defined everywhere. Undefined points are the sentinel for
/// every impossible value here, including a zero denominator in the
/// multiplicative residual — nothing is interpolated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decomposition {
    pub model: DecompositionModel,
    pub period: usize,
    pub dates: Vec<NaiveDate>,
    pub observed: Vec<Decimal>,
    pub trend: Vec<Option<Decimal>>,
    pub seasonal: Vec<Decimal>,
    pub residual: Vec<Option<Decimal>>,
}

/// Decompose the closes into trend, seasonal, and residual components.
///
/// Requires a period of at least 2 and at least `2 × period` observations —
/// two full seasonal cycles — reporting `InvalidPeriod` or
/// `InsufficientData` (with both counts) otherwise. Both are checked up
/// front; neither may surface as an arithmetic error downstream.
pub fn decompose(
    series: &PriceSeries,
    model: DecompositionModel,
    period: usize,
) -> Result<Decomposition, AnalysisError> {
    if period < 2 {
        return Err(AnalysisError::InvalidPeriod { period });
    }

    let len = series.len();
    let required = 2 * period;
    if len < required {
        return Err(AnalysisError::InsufficientData {
            required,
            actual: len,
        });
    }

    let observed = series.closes();
    let trend = centered_trend(&observed, period);

    // Detrend wherever the trend is defined.
    let detrended: Vec<Option<Decimal>> = observed
        .iter()
        .zip(&trend)
        .map(|(x, t)| {
            t.and_then(|t| match model {
                DecompositionModel::Additive => Some(*x - t),
                DecompositionModel::Multiplicative => x.checked_div(t),
            })
        })
        .collect();

    let seasonal = seasonal_component(&detrended, period, model, len);

    let residual: Vec<Option<Decimal>> = observed
        .iter()
        .zip(&trend)
        .zip(&seasonal)
        .map(|((x, t), s)| {
            t.and_then(|t| match model {
                DecompositionModel::Additive => Some(*x - t - *s),
                DecompositionModel::Multiplicative => x.checked_div(t * *s),
            })
        })
        .collect();

    tracing::debug!(
        observations = len,
        period,
        model = ?model,
        "Series decomposed"
    );

    Ok(Decomposition {
        model,
        period,
        dates: series.dates(),
        observed,
        trend,
        seasonal,
        residual,
    })
}

/// Centered moving average of length `period`.
///
/// Even periods use the symmetric filter of length `period + 1` with
/// half-weight endpoints, so the average stays centered on the output
/// index (the classical-decomposition convention).
fn centered_trend(observed: &[Decimal], period: usize) -> Vec<Option<Decimal>> {
    let n = observed.len();
    let half = period / 2;
    let divisor = Decimal::from(period);
    let mut trend = vec![None; n];

    for i in half..n - half {
        let window_sum = if period % 2 == 0 {
            let ends = (observed[i - half] + observed[i + half]) / Decimal::TWO;
            let inner: Decimal = observed[i - half + 1..i + half].iter().sum();
            ends + inner
        } else {
            observed[i - half..=i + half].iter().sum()
        };
        trend[i] = Some(window_sum / divisor);
    }
    trend
}

/// Average the detrended series by seasonal phase and tile the result.
///
/// Phase averages are recentered so the seasonal component carries no
/// trend of its own: zero mean for the additive model, unit mean for the
/// multiplicative one.
fn seasonal_component(
    detrended: &[Option<Decimal>],
    period: usize,
    model: DecompositionModel,
    len: usize,
) -> Vec<Decimal> {
    let mut sums = vec![Decimal::ZERO; period];
    let mut counts = vec![0u32; period];
    for (i, value) in detrended.iter().enumerate() {
        if let Some(v) = value {
            sums[i % period] += *v;
            counts[i % period] += 1;
        }
    }

    let mut phase_means: Vec<Decimal> = sums
        .iter()
        .zip(&counts)
        .map(|(sum, count)| {
            if *count == 0 {
                Decimal::ZERO
            } else {
                sum / Decimal::from(*count)
            }
        })
        .collect();

    let grand_mean = phase_means.iter().sum::<Decimal>() / Decimal::from(period);
    match model {
        DecompositionModel::Additive => {
            for mean in &mut phase_means {
                *mean -= grand_mean;
            }
        }
        DecompositionModel::Multiplicative => {
            if !grand_mean.is_zero() {
                for mean in &mut phase_means {
                    *mean /= grand_mean;
                }
            }
        }
    }

    (0..len).map(|i| phase_means[i % period]).collect()
}
