use anyhow::Context;
use clap::Parser;
use price_feed::{
    cli::{
        commands::{Cli, Commands},
        params::{emit, emit_candles, extend_document, read_input, transform_document},
    },
    config::FeedConfig,
    models::{
        bar_series::BarSeries,
        request_params::{DailyBarsParams, OutputSize, Symbol},
    },
    providers::{DataProvider, alpha_vantage::AlphaVantageProvider},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the key may already be exported.
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("price_feed=info,heikin_ashi=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = FeedConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Quote { symbol } => {
            let symbol = Symbol::parse(&symbol)?;
            let provider = AlphaVantageProvider::new(&config)?;
            let quote = provider.fetch_quote(&symbol).await?;
            emit(&quote, None).await?;
        }

        Commands::History {
            symbol,
            full,
            heikin_ashi,
            trend,
            output,
        } => {
            let symbol = Symbol::parse(&symbol)?;
            let output_size = if full { OutputSize::Full } else { config.output_size };
            let params = DailyBarsParams::new(symbol).with_output_size(output_size);

            let provider = AlphaVantageProvider::new(&config)?;
            let series = provider.fetch_daily_bars(&params).await?;

            if heikin_ashi {
                let smoothed = series
                    .heikin_ashi()
                    .with_context(|| format!("Cannot smooth bars for {}", series.symbol))?;
                if trend {
                    emit(&smoothed.with_trends(), output.as_deref()).await?;
                } else {
                    emit(&smoothed, output.as_deref()).await?;
                }
            } else {
                let ascending = BarSeries {
                    bars: series.normalized()?.into_bars(),
                    symbol: series.symbol,
                };
                emit(&ascending, output.as_deref()).await?;
            }
        }

        Commands::Transform {
            input,
            trend,
            output,
        } => {
            let json = read_input(&input)?;
            let candles = transform_document(&json)
                .with_context(|| format!("Cannot transform bars from {input}"))?;
            tracing::info!(candles = candles.len(), "transform complete");
            emit_candles(&candles, trend, output.as_deref()).await?;
        }

        Commands::Extend {
            candles,
            input,
            trend,
            output,
        } => {
            let existing = std::fs::read_to_string(&candles)
                .with_context(|| format!("Failed to read candles from {}", candles.display()))?;
            let json = read_input(&input)?;
            let extended = extend_document(&existing, &json)
                .with_context(|| format!("Cannot extend {} with {input}", candles.display()))?;
            emit_candles(&extended, trend, output.as_deref()).await?;
        }
    }

    Ok(())
}
