use std::fmt;

use serde::{Deserialize, Serialize};

use crate::providers::{ProviderError, ValidationSnafu};

const MAX_SYMBOL_LEN: usize = 12;

/// A ticker symbol, normalised to upper case (e.g. `"IBM"`, `"BRK.B"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Trims and upper-cases `input`, then checks it looks like a ticker:
    /// 1 to 12 characters from `A-Z`, `0-9`, `.` and `-`.
    pub fn parse(input: &str) -> Result<Self, ProviderError> {
        let symbol = input.trim().to_ascii_uppercase();
        if symbol.is_empty() {
            return ValidationSnafu {
                message: "symbol must not be empty",
            }
            .fail();
        }
        if symbol.len() > MAX_SYMBOL_LEN {
            return ValidationSnafu {
                message: format!("symbol {symbol:?} is longer than {MAX_SYMBOL_LEN} characters"),
            }
            .fail();
        }
        if let Some(bad) = symbol
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '.' || *c == '-'))
        {
            return ValidationSnafu {
                message: format!("symbol {symbol:?} contains invalid character {bad:?}"),
            }
            .fail();
        }
        Ok(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How much daily history to request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputSize {
    /// The latest 100 trading days.
    #[default]
    Compact,
    /// The full available history.
    Full,
}

impl OutputSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputSize::Compact => "compact",
            OutputSize::Full => "full",
        }
    }
}

/// Parameters for a daily bar request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailyBarsParams {
    pub symbol: Symbol,
    pub output_size: OutputSize,
}

impl DailyBarsParams {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            output_size: OutputSize::default(),
        }
    }

    pub fn with_output_size(mut self, output_size: OutputSize) -> Self {
        self.output_size = output_size;
        self
    }
}
