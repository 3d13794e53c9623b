use thiserror::Error;

/// Errors raised while building a [`PriceSeries`](crate::series::PriceSeries)
/// or transforming it.
#[derive(Debug, Error)]
pub enum SeriesError {
    /// The input contained no bars.
    #[error("price series is empty")]
    EmptySeries,

    /// A bar failed validation. `index` is its position in the input as supplied.
    #[error("malformed bar at index {index} ({date}): {defect}")]
    MalformedBar {
        index: usize,
        date: String,
        defect: BarDefect,
    },

    /// Two bars share the same calendar date.
    #[error("duplicate bar for date {date}")]
    DuplicateDate { date: String },

    /// An incrementally pushed bar is older than the one before it.
    #[error("bar for {date} arrived after {previous}")]
    OutOfOrder { date: String, previous: String },

    /// The input document was not an array of bar records.
    #[error("invalid bar document: {0}")]
    Json(#[from] serde_json::Error),
}

/// What exactly is wrong with a malformed bar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BarDefect {
    #[error("missing field `{field}`")]
    Missing { field: &'static str },

    #[error("field `{field}` is not numeric: {value:?}")]
    NotNumeric { field: &'static str, value: String },

    #[error("field `{field}` is not a finite number")]
    NotFinite { field: &'static str },

    #[error("field `{field}` must be positive")]
    NotPositive { field: &'static str },

    /// `low <= min(open, close) <= max(open, close) <= high` does not hold.
    #[error("open/close outside the low..high range")]
    InvertedRange,

    #[error("field `{field}` is not a whole number in range")]
    NotInteger { field: &'static str },

    #[error("date is not a YYYY-MM-DD calendar date")]
    BadDate,

    #[error("volume must not be negative")]
    NegativeVolume,
}

impl SeriesError {
    pub(crate) fn malformed(index: usize, date: impl Into<String>, defect: BarDefect) -> Self {
        SeriesError::MalformedBar {
            index,
            date: date.into(),
            defect,
        }
    }
}
