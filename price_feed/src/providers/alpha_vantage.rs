//! [Alpha Vantage](https://www.alphavantage.co/documentation/) REST provider.
//!
//! Both endpoints answer HTTP 200 even for failures; errors and usage-limit
//! notices arrive as `"Error Message"`, `"Note"` or `"Information"` keys in
//! the JSON body and are mapped to [`ProviderError`](crate::providers::ProviderError)
//! variants by [`response`].

pub mod params;
pub mod provider;
pub mod response;

pub use provider::{AlphaVantageProvider, DEFAULT_BASE_URL};
