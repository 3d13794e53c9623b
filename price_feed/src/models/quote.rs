use chrono::NaiveDate;
use serde::Serialize;

/// Latest trading snapshot for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub symbol: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    /// Last traded price.
    pub price: f64,
    pub volume: u64,
    pub latest_trading_day: NaiveDate,
    pub previous_close: f64,
    /// `price - previous_close`.
    pub change: f64,
    /// Percentage change, e.g. `1.25` for +1.25%.
    pub change_percent: f64,
}
