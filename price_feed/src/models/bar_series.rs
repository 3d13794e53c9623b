//! A collection of daily bars for one symbol.

use heikin_ashi::{HeikinAshiBar, PriceBar, PriceSeries, SeriesError, Trend};
use serde::Serialize;

/// Daily bars for a single symbol, in the order the provider returned them.
///
/// Providers do not agree on ordering; call [`BarSeries::normalized`] or
/// [`BarSeries::heikin_ashi`] to get validated, ascending data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    /// The symbol this data represents (e.g., "IBM").
    pub symbol: String,
    /// The daily OHLCV bars.
    pub bars: Vec<PriceBar>,
}

/// A symbol's smoothed candles, ascending by date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeikinAshiSeries<C = HeikinAshiBar> {
    pub symbol: String,
    pub candles: Vec<C>,
}

/// A candle with its reading attached, serialised as the candle's fields
/// plus `"trend"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendCandle {
    #[serde(flatten)]
    pub candle: HeikinAshiBar,
    pub trend: Trend,
}

impl From<HeikinAshiBar> for TrendCandle {
    fn from(candle: HeikinAshiBar) -> Self {
        Self {
            candle,
            trend: candle.trend(),
        }
    }
}

impl HeikinAshiSeries {
    pub fn with_trends(self) -> HeikinAshiSeries<TrendCandle> {
        HeikinAshiSeries {
            symbol: self.symbol,
            candles: self.candles.into_iter().map(TrendCandle::from).collect(),
        }
    }
}

impl BarSeries {
    /// Validated bars in ascending date order.
    pub fn normalized(&self) -> Result<PriceSeries, SeriesError> {
        PriceSeries::new(self.bars.clone())
    }

    pub fn heikin_ashi(&self) -> Result<HeikinAshiSeries, SeriesError> {
        let candles = self.normalized()?.heikin_ashi();
        Ok(HeikinAshiSeries {
            symbol: self.symbol.clone(),
            candles,
        })
    }
}
