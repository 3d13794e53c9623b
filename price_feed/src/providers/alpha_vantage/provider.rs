use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::get_env_var;
use snafu::ResultExt;

use crate::{
    config::FeedConfig,
    models::{bar_series::BarSeries, quote::Quote, request_params::{DailyBarsParams, Symbol}},
    providers::{
        ClientBuildSnafu, DataProvider, HttpSnafu, MissingEnvVarSnafu, ProviderError,
        ProviderInitError, ReqwestSnafu,
        alpha_vantage::{
            params::{daily_query, quote_query},
            response::{parse_daily_response, parse_quote_response},
        },
    },
};

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

pub struct AlphaVantageProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl AlphaVantageProvider {
    /// Creates a provider from `config`.
    ///
    /// Reads the API key from the environment variable named by
    /// `config.api_key_env` (`ALPHA_VANTAGE_API_KEY` by default).
    pub fn new(config: &FeedConfig) -> Result<Self, ProviderInitError> {
        let api_key = SecretString::new(
            get_env_var(&config.api_key_env)
                .context(MissingEnvVarSnafu)?
                .into(),
        );
        Self::with_api_key(&config.base_url, api_key, config.timeout())
    }

    /// Creates a provider with explicitly supplied endpoint and key.
    pub fn with_api_key(
        base_url: impl Into<String>,
        api_key: SecretString,
        timeout: Duration,
    ) -> Result<Self, ProviderInitError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("price_feed/", env!("CARGO_PKG_VERSION")))
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self::with_client(client, base_url, api_key))
    }

    /// Uses a caller-built HTTP client (custom proxy, TLS or timeout settings).
    pub fn with_client(client: Client, base_url: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Sends one GET and returns the body of a successful response.
    async fn get(&self, query: &[(&'static str, String)]) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(query)
            .query(&[("apikey", self.api_key.expose_secret())])
            .send()
            .await
            // the URL carries the key
            .map_err(reqwest::Error::without_url)
            .context(ReqwestSnafu)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return HttpSnafu {
                status: status.as_u16(),
                body,
            }
            .fail();
        }

        response
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .context(ReqwestSnafu)
    }
}

#[async_trait]
impl DataProvider for AlphaVantageProvider {
    async fn fetch_quote(&self, symbol: &Symbol) -> Result<Quote, ProviderError> {
        tracing::debug!(%symbol, "requesting quote");
        let body = self.get(&quote_query(symbol)).await?;
        let quote = parse_quote_response(&body, symbol)?;
        tracing::info!(
            %symbol,
            price = quote.price,
            day = %quote.latest_trading_day,
            "quote received"
        );
        Ok(quote)
    }

    async fn fetch_daily_bars(&self, params: &DailyBarsParams) -> Result<BarSeries, ProviderError> {
        tracing::debug!(
            symbol = %params.symbol,
            output_size = params.output_size.as_str(),
            "requesting daily bars"
        );
        let body = self.get(&daily_query(params)).await?;
        let series = parse_daily_response(&body, &params.symbol)?;
        tracing::info!(
            symbol = %params.symbol,
            bars = series.bars.len(),
            "daily bars received"
        );
        Ok(series)
    }
}
