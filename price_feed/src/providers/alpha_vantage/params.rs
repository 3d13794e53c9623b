use crate::models::request_params::{DailyBarsParams, Symbol};

/// `function` value for the daily OHLCV time series.
pub const TIME_SERIES_DAILY: &str = "TIME_SERIES_DAILY";
/// `function` value for the latest quote.
pub const GLOBAL_QUOTE: &str = "GLOBAL_QUOTE";

/// Query pairs for a daily series request, without the API key.
pub fn daily_query(params: &DailyBarsParams) -> Vec<(&'static str, String)> {
    vec![
        ("function", TIME_SERIES_DAILY.to_string()),
        ("symbol", params.symbol.to_string()),
        ("outputsize", params.output_size.as_str().to_string()),
    ]
}

/// Query pairs for a quote request, without the API key.
pub fn quote_query(symbol: &Symbol) -> Vec<(&'static str, String)> {
    vec![
        ("function", GLOBAL_QUOTE.to_string()),
        ("symbol", symbol.to_string()),
    ]
}
