//! Value types for raw daily bars and their Heikin-Ashi counterparts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::BarDefect;

/// One daily OHLCV bar as supplied by a price source.
///
/// Construction does not validate; [`PriceSeries::new`](crate::series::PriceSeries::new)
/// checks every bar before anything is computed from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading day this bar covers.
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Shares traded. Not every source reports it and the transform ignores it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

impl PriceBar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    pub fn with_volume(mut self, volume: u64) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Checks the price fields: finite, strictly positive, and
    /// `low <= min(open, close) <= max(open, close) <= high`.
    pub fn validate(&self) -> Result<(), BarDefect> {
        let fields = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(BarDefect::NotFinite { field });
            }
            if value <= 0.0 {
                return Err(BarDefect::NotPositive { field });
            }
        }

        let body_low = self.open.min(self.close);
        let body_high = self.open.max(self.close);
        if self.low > body_low || body_high > self.high {
            return Err(BarDefect::InvertedRange);
        }
        Ok(())
    }
}

/// A smoothed candle, shaped for a candlestick widget:
/// `{"time": "YYYY-MM-DD", "open", "high", "low", "close"}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeikinAshiBar {
    /// Copied unchanged from the source bar's `date`.
    pub time: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Reading of a single Heikin-Ashi candle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Up candle with no lower wick.
    StrongBullish,
    Bullish,
    /// Down candle with no upper wick.
    StrongBearish,
    Bearish,
    /// Open equals close.
    Neutral,
}

impl HeikinAshiBar {
    pub fn trend(&self) -> Trend {
        // low/high are taken with min/max over open and close, so a missing
        // wick means exact equality with the body edge.
        if self.close > self.open {
            if self.low == self.open {
                Trend::StrongBullish
            } else {
                Trend::Bullish
            }
        } else if self.close < self.open {
            if self.high == self.open {
                Trend::StrongBearish
            } else {
                Trend::Bearish
            }
        } else {
            Trend::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn valid_bar_passes() {
        let bar = PriceBar::new(day(1), 10.0, 12.0, 9.0, 11.0);
        assert_eq!(bar.validate(), Ok(()));
    }

    #[test]
    fn nan_close_is_not_finite() {
        let bar = PriceBar::new(day(1), 10.0, 12.0, 9.0, f64::NAN);
        assert_eq!(
            bar.validate(),
            Err(BarDefect::NotFinite { field: "close" })
        );
    }

    #[test]
    fn zero_open_is_rejected() {
        let bar = PriceBar::new(day(1), 0.0, 12.0, 0.0, 11.0);
        assert_eq!(bar.validate(), Err(BarDefect::NotPositive { field: "open" }));
    }

    #[test]
    fn close_above_high_is_inverted() {
        let bar = PriceBar::new(day(1), 10.0, 12.0, 9.0, 12.5);
        assert_eq!(bar.validate(), Err(BarDefect::InvertedRange));
    }

    fn candle(open: f64, high: f64, low: f64, close: f64) -> HeikinAshiBar {
        HeikinAshiBar {
            time: day(1),
            open,
            high,
            low,
            close,
        }
    }

    #[test]
    fn trend_classification() {
        assert_eq!(candle(10.0, 12.0, 10.0, 11.0).trend(), Trend::StrongBullish);
        assert_eq!(candle(10.0, 12.0, 9.5, 11.0).trend(), Trend::Bullish);
        assert_eq!(candle(11.0, 11.0, 9.0, 10.0).trend(), Trend::StrongBearish);
        assert_eq!(candle(11.0, 11.5, 9.0, 10.0).trend(), Trend::Bearish);
        assert_eq!(candle(10.0, 11.0, 9.0, 10.0).trend(), Trend::Neutral);
    }

    #[test]
    fn heikin_ashi_bar_serializes_chart_shape() {
        let bar = HeikinAshiBar {
            time: day(2),
            open: 10.25,
            high: 13.0,
            low: 10.25,
            close: 11.5,
        };
        let json = serde_json::to_value(bar).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "time": "2024-01-02",
                "open": 10.25,
                "high": 13.0,
                "low": 10.25,
                "close": 11.5
            })
        );
    }
}
