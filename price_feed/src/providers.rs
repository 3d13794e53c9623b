//! Provider abstraction for market data sources.
//!
//! This module defines the [`DataProvider`] trait, the interface the rest of
//! the workspace uses to get daily bars and latest quotes without knowing
//! which vendor serves them.
//!
//! The trait is async and object safe, so a provider can be picked at runtime
//! and held as `Box<dyn DataProvider>`.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use price_feed::models::{
//!     bar_series::BarSeries,
//!     quote::Quote,
//!     request_params::{DailyBarsParams, Symbol},
//! };
//! use price_feed::providers::{DataProvider, NotFoundSnafu, ProviderError};
//!
//! struct EmptyProvider;
//!
//! #[async_trait]
//! impl DataProvider for EmptyProvider {
//!     async fn fetch_quote(&self, symbol: &Symbol) -> Result<Quote, ProviderError> {
//!         NotFoundSnafu { symbol: symbol.as_str() }.fail()
//!     }
//!
//!     async fn fetch_daily_bars(
//!         &self,
//!         params: &DailyBarsParams,
//!     ) -> Result<BarSeries, ProviderError> {
//!         Ok(BarSeries { symbol: params.symbol.to_string(), bars: vec![] })
//!     }
//! }
//! ```

pub mod alpha_vantage;

use async_trait::async_trait;
use heikin_ashi::SeriesError;
use shared_utils::env::MissingEnvVarError;
use snafu::{Backtrace, Snafu};

use crate::models::{
    bar_series::BarSeries,
    quote::Quote,
    request_params::{DailyBarsParams, Symbol},
};

/// Fetches price data for a symbol from one market data vendor.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Latest quote for `symbol`.
    async fn fetch_quote(&self, symbol: &Symbol) -> Result<Quote, ProviderError>;

    /// Daily OHLCV bars for the requested symbol.
    ///
    /// Bars are returned in the vendor's order; they are not yet validated.
    async fn fetch_daily_bars(&self, params: &DailyBarsParams) -> Result<BarSeries, ProviderError>;
}

/// Errors that can occur during the creation of a provider instance
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// missed environment variable.
    #[snafu(display("Missing environment variable: {source}"))]
    MissingEnvVar {
        source: MissingEnvVarError,
        backtrace: Backtrace,
    },

    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// The request could not be sent or the body could not be read
    /// (connection failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The server answered with a non-success HTTP status.
    #[snafu(display("HTTP {status}: {body}"))]
    Http {
        status: u16,
        body: String,
        backtrace: Backtrace,
    },

    /// The provider's API rejected the request (e.g. unknown symbol, bad key).
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// The provider refused to serve the request because of a usage limit.
    #[snafu(display("API usage limit reached: {message}"))]
    Throttled {
        message: String,
        backtrace: Backtrace,
    },

    /// The provider knows nothing about this symbol.
    #[snafu(display("No data for symbol {symbol}"))]
    NotFound {
        symbol: String,
        backtrace: Backtrace,
    },

    /// The response did not have the expected shape.
    #[snafu(display("Unexpected response: {message}"))]
    Parse {
        message: String,
        backtrace: Backtrace,
    },

    /// The request parameters were invalid for this specific provider.
    #[snafu(display("Invalid parameters for provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },

    /// The bars returned could not be turned into a price series.
    #[snafu(display("Bad bar data: {source}"))]
    Series {
        source: SeriesError,
        backtrace: Backtrace,
    },
}
