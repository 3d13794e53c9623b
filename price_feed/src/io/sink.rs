use std::path::PathBuf;

use async_trait::async_trait;
use serde::Serialize;
use snafu::{Backtrace, ResultExt, Snafu};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// The payload could not be encoded.
    #[snafu(display("Failed to serialize data: {source}"))]
    Serialize {
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// A generic I/O error.
    #[snafu(display("I/O error on {}: {source}", path.display()))]
    Io {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },
}

#[async_trait]
pub trait DataSink {
    /// The type of output returned after a successful write operation.
    ///
    /// A file sink returns the path it wrote; other sinks may report a count.
    type Output;

    /// Writes `data` to the destination.
    async fn write<T>(&self, data: &T) -> Result<Self::Output, SinkError>
    where
        T: Serialize + Sync + ?Sized;
}

/// Writes payloads as JSON to a single file, replacing it.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
    pretty: bool,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: true,
        }
    }

    /// Single-line output instead of indented JSON.
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}

#[async_trait]
impl DataSink for JsonFileSink {
    type Output = PathBuf;

    async fn write<T>(&self, data: &T) -> Result<PathBuf, SinkError>
    where
        T: Serialize + Sync + ?Sized,
    {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(data)
        } else {
            serde_json::to_vec(data)
        }
        .context(SerializeSnafu)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .context(IoSnafu { path: parent })?;
        }
        tokio::fs::write(&self.path, &bytes)
            .await
            .context(IoSnafu { path: &self.path })?;

        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "json written");
        Ok(self.path.clone())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use heikin_ashi::HeikinAshiBar;
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn writes_candles_into_new_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("charts").join("ibm.json");
        let candles = vec![HeikinAshiBar {
            time: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            open: 10.0,
            high: 12.0,
            low: 9.0,
            close: 10.5,
        }];

        let written = JsonFileSink::new(&path).compact().write(&candles).await.unwrap();
        assert_eq!(written, path);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            r#"[{"time":"2024-01-01","open":10.0,"high":12.0,"low":9.0,"close":10.5}]"#
        );
    }

    #[tokio::test]
    async fn unwritable_path_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        // a directory cannot be overwritten as a file
        let err = JsonFileSink::new(dir.path()).write(&[1, 2, 3]).await.unwrap_err();
        assert!(matches!(err, SinkError::Io { .. }));
    }
}
