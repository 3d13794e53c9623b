//! Input and output helpers for the CLI commands.

use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
};

use anyhow::Context;
use heikin_ashi::{HeikinAshiBar, append_heikin_ashi, heikin_ashi, raw::parse_bars_json};
use serde::Serialize;

use crate::{
    io::sink::{DataSink, JsonFileSink},
    models::bar_series::TrendCandle,
};

/// Reads the `transform` input: a file path, or `-` for stdin.
pub fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read bars from stdin")?;
        return Ok(buffer);
    }
    fs::read_to_string(input).with_context(|| format!("Failed to read bars from {input}"))
}

/// Parses a canonical bar document and smooths it.
pub fn transform_document(json: &str) -> anyhow::Result<Vec<HeikinAshiBar>> {
    let bars = parse_bars_json(json)?;
    Ok(heikin_ashi(&bars)?)
}

/// Appends the bars in `bars_json` to the candles in `candles_json`.
pub fn extend_document(candles_json: &str, bars_json: &str) -> anyhow::Result<Vec<HeikinAshiBar>> {
    let mut candles: Vec<HeikinAshiBar> =
        serde_json::from_str(candles_json).context("Candles are not a Heikin-Ashi candle array")?;
    let bars = parse_bars_json(bars_json)?;
    let added = append_heikin_ashi(&mut candles, &bars)?;
    tracing::info!(added, total = candles.len(), "candles extended");
    Ok(candles)
}

/// Emits bare candles, or candles with their trend reading.
pub async fn emit_candles(
    candles: &[HeikinAshiBar],
    trend: bool,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    if trend {
        let annotated: Vec<TrendCandle> = candles.iter().copied().map(TrendCandle::from).collect();
        emit(&annotated, output).await
    } else {
        emit(candles, output).await
    }
}

/// Writes `data` as JSON to `output`, or pretty-prints it to stdout.
///
/// When a file is written its path goes to stdout, so callers can pipe it on.
pub async fn emit<T>(data: &T, output: Option<&Path>) -> anyhow::Result<()>
where
    T: Serialize + Sync + ?Sized,
{
    match output {
        Some(path) => {
            let written = JsonFileSink::new(path).write(data).await?;
            println!("{}", written.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, data)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use heikin_ashi::SeriesError;
    use tempfile::{NamedTempFile, TempDir};

    use super::*;

    #[test]
    fn transform_document_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"date": "2024-01-02", "open": 11, "high": 13, "low": 10, "close": 12}},
                {{"date": "2024-01-01", "open": 10, "high": 12, "low": 9, "close": 11}}]"#
        )
        .unwrap();

        let json = read_input(file.path().to_str().unwrap()).unwrap();
        let candles = transform_document(&json).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[1].low, 10.25);
    }

    #[test]
    fn empty_document_reports_empty_series() {
        let err = transform_document("[]").unwrap_err();
        assert!(matches!(err.downcast_ref::<SeriesError>(), Some(SeriesError::EmptySeries)));
    }

    #[test]
    fn missing_input_file_has_context() {
        let err = read_input("/no/such/bars.json").unwrap_err();
        assert!(err.to_string().contains("/no/such/bars.json"));
    }

    const CANDLES: &str = r#"[
        {"time": "2024-01-01", "open": 10.0, "high": 12.0, "low": 9.0, "close": 10.5},
        {"time": "2024-01-02", "open": 10.25, "high": 13.0, "low": 10.25, "close": 11.5}
    ]"#;

    #[test]
    fn extend_document_appends_only_new_days() {
        let bars = r#"[
            {"date": "2024-01-03", "open": 12, "high": 12.5, "low": 10.5, "close": 11},
            {"date": "2024-01-02", "open": 11, "high": 13, "low": 10, "close": 12}
        ]"#;
        let candles = extend_document(CANDLES, bars).unwrap();
        assert_eq!(candles.len(), 3);
        assert_eq!(candles[2].open, (10.25 + 11.5) / 2.0);
        assert_eq!(candles[2].close, 11.5);
    }

    #[test]
    fn extend_document_rejects_bad_candles() {
        let err = extend_document(r#"{"time": "2024-01-01"}"#, "[]").unwrap_err();
        assert!(err.to_string().contains("candle array"));
    }

    #[tokio::test]
    async fn trend_candles_round_trip_as_candles() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ha.json");
        let candles: Vec<HeikinAshiBar> = serde_json::from_str(CANDLES).unwrap();

        emit_candles(&candles, true, Some(path.as_path())).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains(r#""trend": "strong_bullish""#));
        let reread: Vec<HeikinAshiBar> = serde_json::from_str(&written).unwrap();
        assert_eq!(reread, candles);
    }

    #[tokio::test]
    async fn emit_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        emit(&vec![1, 2], Some(path.as_path())).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[\n  1,\n  2\n]");
    }
}
