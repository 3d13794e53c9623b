//! Heikin-Ashi smoothing for daily OHLC price series.
//!
//! Raw bars come in as [`PriceBar`]s (or as JSON records through [`raw`]),
//! are validated and put in ascending date order by [`PriceSeries`], and are
//! turned into [`HeikinAshiBar`]s by a single left-to-right scan.
//!
//! Everything here is pure: no I/O, no configuration, no shared state.

pub mod bar;
pub mod errors;
pub mod raw;
pub mod series;
pub mod transform;

pub use bar::{HeikinAshiBar, PriceBar, Trend};
pub use errors::{BarDefect, SeriesError};
pub use series::PriceSeries;
pub use transform::{HeikinAshiStream, append_heikin_ashi, heikin_ashi};
