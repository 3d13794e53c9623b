use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Fetch daily prices and render Heikin-Ashi candles")]
pub struct Cli {
    /// Path to the config file (price_feed.toml). Defaults apply when omitted.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the latest quote for a symbol
    Quote {
        /// Ticker symbol (e.g. "IBM")
        #[arg(short, long)]
        symbol: String,
    },

    /// Fetch daily bars for a symbol, oldest first
    History {
        /// Ticker symbol (e.g. "IBM")
        #[arg(short, long)]
        symbol: String,

        /// Request the full history instead of the configured size
        #[arg(long)]
        full: bool,

        /// Emit Heikin-Ashi candles instead of raw bars
        #[arg(long)]
        heikin_ashi: bool,

        /// Add each candle's trend reading (needs --heikin-ashi)
        #[arg(long, requires = "heikin_ashi")]
        trend: bool,

        /// Write JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Transform a JSON array of daily bars into Heikin-Ashi candles (offline)
    Transform {
        /// JSON file with [{"date", "open", "high", "low", "close"}, ...]; "-" reads stdin
        #[arg(short, long)]
        input: String,

        /// Add each candle's trend reading
        #[arg(long)]
        trend: bool,

        /// Write JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Append new daily bars to previously computed Heikin-Ashi candles
    Extend {
        /// JSON file of candles written by `transform`
        #[arg(long)]
        candles: PathBuf,

        /// JSON file of daily bars; bars already covered are skipped; "-" reads stdin
        #[arg(short, long)]
        input: String,

        /// Add each candle's trend reading
        #[arg(long)]
        trend: bool,

        /// Write JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
