//! The canonical input record, before it is trusted.
//!
//! Input is a JSON array of
//! `{"date": "YYYY-MM-DD", "open", "high", "low", "close", "volume"?}`.
//! Price fields may be JSON numbers or numeric strings, because market-data
//! APIs commonly send `"187.1500"`. Anything else is reported as a
//! [`SeriesError::MalformedBar`] naming the bar, never turned into `NaN`.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    bar::PriceBar,
    errors::{BarDefect, SeriesError},
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A field value as it arrived on the wire.
///
/// `Other` catches booleans, arrays and objects so that they fail against
/// their bar rather than failing the whole document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawValue {
    /// Reads the value as a number. Text is trimmed and parsed.
    pub fn to_f64(&self, field: &'static str) -> Result<f64, BarDefect> {
        match self {
            RawValue::Number(n) => Ok(*n),
            RawValue::Text(s) => s.trim().parse::<f64>().map_err(|_| BarDefect::NotNumeric {
                field,
                value: s.clone(),
            }),
            RawValue::Other(v) => Err(BarDefect::NotNumeric {
                field,
                value: v.to_string(),
            }),
        }
    }

    /// Reads the value as a whole, non-negative count.
    pub fn to_u64(&self, field: &'static str) -> Result<u64, BarDefect> {
        if let RawValue::Text(s) = self {
            if let Ok(n) = s.trim().parse::<u64>() {
                return Ok(n);
            }
        }

        let n = self.to_f64(field)?;
        if !n.is_finite() {
            return Err(BarDefect::NotFinite { field });
        }
        if n < 0.0 {
            return Err(BarDefect::NegativeVolume);
        }
        // u64::MAX as f64 rounds up to 2^64, which is already out of range
        if n.fract() != 0.0 || n >= u64::MAX as f64 {
            return Err(BarDefect::NotInteger { field });
        }
        Ok(n as u64)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

/// One unchecked bar record. Every field is optional here so that a missing
/// field can be reported against its bar instead of failing the whole document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPriceBar {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub open: Option<RawValue>,
    #[serde(default)]
    pub high: Option<RawValue>,
    #[serde(default)]
    pub low: Option<RawValue>,
    #[serde(default)]
    pub close: Option<RawValue>,
    #[serde(default)]
    pub volume: Option<RawValue>,
}

impl RawPriceBar {
    /// Converts this record into a [`PriceBar`]. `index` is the record's
    /// position in its document and is carried into any error.
    ///
    /// Only presence and numeric form are checked here; range checks happen in
    /// [`PriceSeries::new`](crate::series::PriceSeries::new).
    pub fn into_bar(self, index: usize) -> Result<PriceBar, SeriesError> {
        let Some(date_text) = self.date else {
            return Err(SeriesError::malformed(
                index,
                "<no date>",
                BarDefect::Missing { field: "date" },
            ));
        };
        let fail = |defect| SeriesError::malformed(index, date_text.clone(), defect);

        let date = NaiveDate::parse_from_str(date_text.trim(), DATE_FORMAT)
            .map_err(|_| fail(BarDefect::BadDate))?;

        let open = price(self.open.as_ref(), "open").map_err(fail)?;
        let high = price(self.high.as_ref(), "high").map_err(fail)?;
        let low = price(self.low.as_ref(), "low").map_err(fail)?;
        let close = price(self.close.as_ref(), "close").map_err(fail)?;
        let volume = self
            .volume
            .as_ref()
            .map(|v| v.to_u64("volume"))
            .transpose()
            .map_err(fail)?;

        Ok(PriceBar {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

fn price(value: Option<&RawValue>, field: &'static str) -> Result<f64, BarDefect> {
    value
        .ok_or(BarDefect::Missing { field })?
        .to_f64(field)
}

/// Converts records in order, stopping at the first bad one.
pub fn into_bars<I>(records: I) -> Result<Vec<PriceBar>, SeriesError>
where
    I: IntoIterator<Item = RawPriceBar>,
{
    records
        .into_iter()
        .enumerate()
        .map(|(index, raw)| raw.into_bar(index))
        .collect()
}

/// Parses a canonical JSON bar array.
///
/// # Errors
///
/// [`SeriesError::Json`] if the document is not an array of objects,
/// [`SeriesError::MalformedBar`] for the first record with a missing or
/// non-numeric field or an unparseable date.
pub fn parse_bars_json(json: &str) -> Result<Vec<PriceBar>, SeriesError> {
    let records: Vec<RawPriceBar> = serde_json::from_str(json)?;
    into_bars(records)
}
