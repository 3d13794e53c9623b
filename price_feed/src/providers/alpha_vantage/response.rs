use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use heikin_ashi::raw::{RawPriceBar, RawValue, into_bars};
use serde::{
    Deserialize, Deserializer,
    de::{MapAccess, Visitor},
};
use snafu::ResultExt;

use crate::{
    models::{bar_series::BarSeries, quote::Quote, request_params::Symbol},
    providers::{
        ApiSnafu, NotFoundSnafu, ParseSnafu, ProviderError, SeriesSnafu, ThrottledSnafu,
    },
};

/// Keys Alpha Vantage uses instead of an HTTP error status.
#[derive(Deserialize, Debug, Default)]
pub struct ApiNotice {
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,
    #[serde(rename = "Note")]
    pub note: Option<String>,
    #[serde(rename = "Information")]
    pub information: Option<String>,
}

impl ApiNotice {
    /// The error this notice stands for, if the body carried one.
    pub fn check(self) -> Result<(), ProviderError> {
        if let Some(message) = self.error_message {
            return ApiSnafu { message }.fail();
        }
        if let Some(message) = self.note {
            tracing::warn!(%message, "alpha vantage usage note");
            return ThrottledSnafu { message }.fail();
        }
        if let Some(message) = self.information {
            let lower = message.to_lowercase();
            if lower.contains("rate limit") || lower.contains("requests per") {
                tracing::warn!(%message, "alpha vantage rate limit");
                return ThrottledSnafu { message }.fail();
            }
            return ApiSnafu { message }.fail();
        }
        Ok(())
    }
}

/// One entry of `"Time Series (Daily)"`; values arrive as strings.
#[derive(Deserialize, Debug)]
pub struct DailyEntry {
    #[serde(rename = "1. open", default)]
    pub open: Option<RawValue>,
    #[serde(rename = "2. high", default)]
    pub high: Option<RawValue>,
    #[serde(rename = "3. low", default)]
    pub low: Option<RawValue>,
    #[serde(rename = "4. close", default)]
    pub close: Option<RawValue>,
    #[serde(rename = "5. volume", default)]
    pub volume: Option<RawValue>,
}

#[derive(Deserialize, Debug)]
pub struct DailyResponse {
    /// `(YYYY-MM-DD, entry)` pairs in body order, newest first.
    #[serde(
        rename = "Time Series (Daily)",
        default,
        deserialize_with = "entries_in_body_order"
    )]
    pub time_series: Option<Vec<(String, DailyEntry)>>,
    #[serde(flatten)]
    pub notice: ApiNotice,
}

/// Reads the date-keyed map as a list so a repeated date survives to be
/// rejected by series validation instead of overwriting the earlier entry.
fn entries_in_body_order<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<(String, DailyEntry)>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct Entries(Vec<(String, DailyEntry)>);

    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Entries;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of dates to daily bars")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Entries, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, DailyEntry>()? {
                entries.push(entry);
            }
            Ok(Entries(entries))
        }
    }

    impl<'de> Deserialize<'de> for Entries {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_map(EntriesVisitor)
        }
    }

    Ok(Option::<Entries>::deserialize(deserializer)?.map(|Entries(entries)| entries))
}

#[derive(Deserialize, Debug)]
pub struct QuoteResponse {
    #[serde(rename = "Global Quote")]
    pub global_quote: Option<GlobalQuote>,
    #[serde(flatten)]
    pub notice: ApiNotice,
}

/// The `"Global Quote"` object. Empty (`{}`) for unknown symbols.
#[derive(Deserialize, Debug, Default)]
pub struct GlobalQuote {
    #[serde(rename = "01. symbol")]
    pub symbol: Option<String>,
    #[serde(rename = "02. open")]
    pub open: Option<String>,
    #[serde(rename = "03. high")]
    pub high: Option<String>,
    #[serde(rename = "04. low")]
    pub low: Option<String>,
    #[serde(rename = "05. price")]
    pub price: Option<String>,
    #[serde(rename = "06. volume")]
    pub volume: Option<String>,
    #[serde(rename = "07. latest trading day")]
    pub latest_trading_day: Option<String>,
    #[serde(rename = "08. previous close")]
    pub previous_close: Option<String>,
    #[serde(rename = "09. change")]
    pub change: Option<String>,
    #[serde(rename = "10. change percent")]
    pub change_percent: Option<String>,
}

/// Parses a `TIME_SERIES_DAILY` body into a [`BarSeries`] in upstream
/// (newest-first) order.
///
/// A bar whose value is not numeric fails the whole response with
/// [`ProviderError::Series`], naming the bar's date.
pub fn parse_daily_response(body: &str, symbol: &Symbol) -> Result<BarSeries, ProviderError> {
    let response: DailyResponse = serde_json::from_str(body).map_err(|e| {
        ParseSnafu {
            message: format!("daily series body: {e}"),
        }
        .build()
    })?;
    response.notice.check()?;

    let Some(time_series) = response.time_series else {
        return ParseSnafu {
            message: "daily series body has no \"Time Series (Daily)\"",
        }
        .fail();
    };

    let records = time_series.into_iter().map(|(date, entry)| RawPriceBar {
        date: Some(date),
        open: entry.open,
        high: entry.high,
        low: entry.low,
        close: entry.close,
        volume: entry.volume,
    });
    let bars = into_bars(records).context(SeriesSnafu)?;

    Ok(BarSeries {
        symbol: symbol.to_string(),
        bars,
    })
}

/// Parses a `GLOBAL_QUOTE` body.
pub fn parse_quote_response(body: &str, symbol: &Symbol) -> Result<Quote, ProviderError> {
    let response: QuoteResponse = serde_json::from_str(body).map_err(|e| {
        ParseSnafu {
            message: format!("quote body: {e}"),
        }
        .build()
    })?;
    response.notice.check()?;

    let quote = response.global_quote.unwrap_or_default();
    let Some(quoted_symbol) = quote.symbol else {
        return NotFoundSnafu {
            symbol: symbol.as_str(),
        }
        .fail();
    };

    let trading_day: String = field(quote.latest_trading_day, "07. latest trading day")?;
    let latest_trading_day = NaiveDate::parse_from_str(&trading_day, "%Y-%m-%d").map_err(|_| {
        ParseSnafu {
            message: format!("latest trading day {trading_day:?} is not a date"),
        }
        .build()
    })?;

    let change_percent = quote
        .change_percent
        .map(|p| p.trim().trim_end_matches('%').to_string());

    Ok(Quote {
        symbol: quoted_symbol,
        open: field(quote.open, "02. open")?,
        high: field(quote.high, "03. high")?,
        low: field(quote.low, "04. low")?,
        price: field(quote.price, "05. price")?,
        volume: field(quote.volume, "06. volume")?,
        latest_trading_day,
        previous_close: field(quote.previous_close, "08. previous close")?,
        change: field(quote.change, "09. change")?,
        change_percent: field(change_percent, "10. change percent")?,
    })
}

fn field<T: FromStr>(value: Option<String>, name: &str) -> Result<T, ProviderError> {
    let Some(text) = value else {
        return ParseSnafu {
            message: format!("quote is missing {name:?}"),
        }
        .fail();
    };
    text.trim().parse().map_err(|_| {
        ParseSnafu {
            message: format!("quote field {name:?} has invalid value {text:?}"),
        }
        .build()
    })
}
