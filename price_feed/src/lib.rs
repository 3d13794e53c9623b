//! Daily price data for the Heikin-Ashi dashboard.
//!
//! [`providers`] fetch quotes and daily bars from a market data API,
//! [`models`] carry them, and [`io`] writes chart-ready JSON. The smoothing
//! itself lives in the `heikin_ashi` crate.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod io;
pub mod models;
pub mod providers;
