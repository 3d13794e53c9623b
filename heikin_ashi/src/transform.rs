//! The Heikin-Ashi recurrence.
//!
//! For bar `i` of an ascending series with raw prices `(O, H, L, C)`:
//!
//! ```text
//! close_i = (O_i + H_i + L_i + C_i) / 4
//! open_0  = O_0
//! open_i  = (open_{i-1} + close_{i-1}) / 2
//! high_i  = max(H_i, open_i, close_i)
//! low_i   = min(L_i, open_i, close_i)
//! ```
//!
//! `open_i` depends on the previous *smoothed* bar, so the scan is strictly
//! sequential and only meaningful oldest-to-newest.

use chrono::NaiveDate;

use crate::{
    bar::{HeikinAshiBar, PriceBar},
    errors::SeriesError,
    series::PriceSeries,
};

/// Validates, normalises to ascending order and transforms `bars`.
///
/// Either the whole series transforms or nothing is returned.
///
/// # Errors
///
/// Whatever [`PriceSeries::new`] rejects: an empty input, a malformed bar,
/// or a repeated date.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use heikin_ashi::{PriceBar, heikin_ashi};
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
/// let bars = vec![
///     PriceBar::new(day(2), 11.0, 13.0, 10.0, 12.0),
///     PriceBar::new(day(1), 10.0, 12.0, 9.0, 11.0),
/// ];
/// let ha = heikin_ashi(&bars).unwrap();
/// assert_eq!(ha[0].time, day(1));
/// assert_eq!(ha[1].open, 10.25);
/// ```
pub fn heikin_ashi(bars: &[PriceBar]) -> Result<Vec<HeikinAshiBar>, SeriesError> {
    let series = PriceSeries::new(bars.to_vec())?;
    Ok(series.heikin_ashi())
}

impl PriceSeries {
    /// Heikin-Ashi candles for this series, one per bar, ascending by date.
    pub fn heikin_ashi(&self) -> Vec<HeikinAshiBar> {
        let mut out: Vec<HeikinAshiBar> = Vec::with_capacity(self.len());
        for bar in self.bars() {
            let next = step(out.last(), bar);
            out.push(next);
        }
        tracing::debug!(
            bars = out.len(),
            from = %self.first().date,
            to = %self.last().date,
            "heikin-ashi series computed"
        );
        out
    }
}

fn step(previous: Option<&HeikinAshiBar>, bar: &PriceBar) -> HeikinAshiBar {
    let close = (bar.open + bar.high + bar.low + bar.close) / 4.0;
    let open = match previous {
        Some(prev) => (prev.open + prev.close) / 2.0,
        None => bar.open,
    };

    HeikinAshiBar {
        time: bar.date,
        open,
        high: bar.high.max(open).max(close),
        low: bar.low.min(open).min(close),
        close,
    }
}

/// Incremental form of the transform, for appending bars one at a time
/// (e.g. today's bar onto an already smoothed history).
///
/// Produces exactly the numbers the batch scan would.
#[derive(Debug, Clone, Default)]
pub struct HeikinAshiStream {
    previous: Option<HeikinAshiBar>,
    pushed: usize,
}

impl HeikinAshiStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continues after `last`, the newest candle of a previously computed series.
    pub fn resume(last: HeikinAshiBar) -> Self {
        Self {
            previous: Some(last),
            pushed: 0,
        }
    }

    /// Smooths the next bar. Dates must be strictly increasing.
    ///
    /// On error the stream is left unchanged. The `index` of a
    /// [`SeriesError::MalformedBar`] counts bars pushed into this stream.
    pub fn push(&mut self, bar: &PriceBar) -> Result<HeikinAshiBar, SeriesError> {
        bar.validate()
            .map_err(|defect| SeriesError::malformed(self.pushed, bar.date.to_string(), defect))?;

        if let Some(prev) = &self.previous {
            check_follows(prev.time, bar.date)?;
        }

        let next = step(self.previous.as_ref(), bar);
        self.previous = Some(next);
        self.pushed += 1;
        Ok(next)
    }

    /// The most recent candle, if any.
    pub fn last(&self) -> Option<&HeikinAshiBar> {
        self.previous.as_ref()
    }
}

/// Smooths `bars` onto the end of `candles`, continuing the recurrence from
/// the newest candle. Returns the number of candles added.
///
/// Bars dated on or before the newest candle are already covered and are
/// skipped; the rest may arrive in any order. Nothing is appended unless every
/// new bar is valid.
///
/// # Errors
///
/// [`SeriesError::MalformedBar`] (indexed among the new bars) or
/// [`SeriesError::DuplicateDate`].
pub fn append_heikin_ashi(
    candles: &mut Vec<HeikinAshiBar>,
    bars: &[PriceBar],
) -> Result<usize, SeriesError> {
    let newest = candles.last().map(|c| c.time);
    let fresh: Vec<PriceBar> = bars
        .iter()
        .filter(|bar| newest.is_none_or(|time| bar.date > time))
        .copied()
        .collect();
    if fresh.is_empty() {
        return Ok(0);
    }
    let fresh = PriceSeries::new(fresh)?;

    let mut stream = match candles.last() {
        Some(last) => HeikinAshiStream::resume(*last),
        None => HeikinAshiStream::new(),
    };
    let added = fresh
        .bars()
        .iter()
        .map(|bar| stream.push(bar))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        added = added.len(),
        skipped = bars.len() - added.len(),
        "heikin-ashi candles appended"
    );
    candles.extend_from_slice(&added);
    Ok(added.len())
}

fn check_follows(previous: NaiveDate, date: NaiveDate) -> Result<(), SeriesError> {
    if date == previous {
        return Err(SeriesError::DuplicateDate {
            date: date.to_string(),
        });
    }
    if date < previous {
        return Err(SeriesError::OutOfOrder {
            date: date.to_string(),
            previous: previous.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BarDefect;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn two_bars() -> Vec<PriceBar> {
        vec![
            PriceBar::new(day(1), 10.0, 12.0, 9.0, 11.0),
            PriceBar::new(day(2), 11.0, 13.0, 10.0, 12.0),
        ]
    }

    #[test]
    fn two_bar_scenario() {
        let ha = heikin_ashi(&two_bars()).unwrap();

        assert_eq!(
            ha[0],
            HeikinAshiBar {
                time: day(1),
                open: 10.0,
                high: 12.0,
                low: 9.0,
                close: 10.5,
            }
        );
        assert_eq!(
            ha[1],
            HeikinAshiBar {
                time: day(2),
                open: 10.25,
                high: 13.0,
                low: 10.25,
                close: 11.5,
            }
        );
    }

    #[test]
    fn descending_input_gives_same_result() {
        let mut reversed = two_bars();
        reversed.reverse();
        assert_eq!(heikin_ashi(&reversed).unwrap(), heikin_ashi(&two_bars()).unwrap());
    }

    #[test]
    fn single_bar_uses_seed_rule() {
        let bar = PriceBar::new(day(5), 20.0, 21.0, 18.0, 19.0);
        let ha = heikin_ashi(&[bar]).unwrap();
        assert_eq!(ha.len(), 1);
        assert_eq!(ha[0].open, 20.0);
        assert_eq!(ha[0].close, 19.5);
        assert_eq!(ha[0].high, 21.0);
        assert_eq!(ha[0].low, 18.0);
    }

    #[test]
    fn empty_input_fails() {
        assert!(matches!(heikin_ashi(&[]), Err(SeriesError::EmptySeries)));
    }

    #[test]
    fn smoothed_open_can_escape_raw_range() {
        // A gap down: the smoothed open stays near the previous body, far above
        // today's raw high, so high must come from the smoothed open.
        let bars = vec![
            PriceBar::new(day(1), 100.0, 110.0, 95.0, 105.0),
            PriceBar::new(day(2), 50.0, 55.0, 45.0, 52.0),
        ];
        let ha = heikin_ashi(&bars).unwrap();
        assert!(ha[1].open > 55.0);
        assert_eq!(ha[1].high, ha[1].open);
    }

    #[test]
    fn stream_matches_batch() {
        let bars = vec![
            PriceBar::new(day(1), 10.0, 12.0, 9.0, 11.0),
            PriceBar::new(day(2), 11.0, 13.0, 10.0, 12.0),
            PriceBar::new(day(3), 12.0, 12.5, 10.5, 11.0),
            PriceBar::new(day(4), 11.0, 11.5, 9.5, 10.0),
        ];
        let batch = heikin_ashi(&bars).unwrap();

        let mut stream = HeikinAshiStream::new();
        let streamed: Vec<HeikinAshiBar> = bars.iter().map(|b| stream.push(b).unwrap()).collect();
        assert_eq!(streamed, batch);

        let mut resumed = HeikinAshiStream::resume(batch[1]);
        assert_eq!(resumed.push(&bars[2]).unwrap(), batch[2]);
        assert_eq!(resumed.push(&bars[3]).unwrap(), batch[3]);
        assert_eq!(resumed.last(), Some(&batch[3]));
    }

    #[test]
    fn append_continues_from_newest_candle() {
        let bars = vec![
            PriceBar::new(day(1), 10.0, 12.0, 9.0, 11.0),
            PriceBar::new(day(2), 11.0, 13.0, 10.0, 12.0),
            PriceBar::new(day(3), 12.0, 12.5, 10.5, 11.0),
            PriceBar::new(day(4), 11.0, 11.5, 9.5, 10.0),
        ];
        let batch = heikin_ashi(&bars).unwrap();

        let mut candles = heikin_ashi(&bars[..2]).unwrap();
        // overlapping history plus the new days, newest first
        let refetched = vec![bars[3], bars[2], bars[1]];
        assert_eq!(append_heikin_ashi(&mut candles, &refetched).unwrap(), 2);
        assert_eq!(candles, batch);

        assert_eq!(append_heikin_ashi(&mut candles, &bars).unwrap(), 0);
        assert_eq!(candles, batch);
    }

    #[test]
    fn append_onto_nothing_is_a_batch_transform() {
        let bars = two_bars();
        let mut candles = Vec::new();
        assert_eq!(append_heikin_ashi(&mut candles, &bars).unwrap(), 2);
        assert_eq!(candles, heikin_ashi(&bars).unwrap());
    }

    #[test]
    fn append_is_all_or_nothing() {
        let mut candles = heikin_ashi(&two_bars()).unwrap();
        let before = candles.clone();
        let new_bars = vec![
            PriceBar::new(day(3), 12.0, 12.5, 10.5, 11.0),
            PriceBar::new(day(4), 11.0, 11.5, 9.5, f64::NAN),
        ];
        let err = append_heikin_ashi(&mut candles, &new_bars).unwrap_err();
        assert!(matches!(err, SeriesError::MalformedBar { index: 1, .. }));
        assert_eq!(candles, before);
    }

    #[test]
    fn stream_rejects_out_of_order_and_keeps_state() {
        let mut stream = HeikinAshiStream::new();
        let first = stream.push(&PriceBar::new(day(2), 10.0, 12.0, 9.0, 11.0)).unwrap();

        let err = stream.push(&PriceBar::new(day(1), 10.0, 12.0, 9.0, 11.0)).unwrap_err();
        assert!(matches!(err, SeriesError::OutOfOrder { .. }));

        let err = stream.push(&PriceBar::new(day(2), 10.0, 12.0, 9.0, 11.0)).unwrap_err();
        assert!(matches!(err, SeriesError::DuplicateDate { .. }));

        assert_eq!(stream.last(), Some(&first));
    }

    #[test]
    fn stream_reports_malformed_bar() {
        let mut stream = HeikinAshiStream::new();
        stream.push(&PriceBar::new(day(1), 10.0, 12.0, 9.0, 11.0)).unwrap();
        let err = stream.push(&PriceBar::new(day(2), 10.0, 12.0, 9.0, f64::NAN)).unwrap_err();
        match err {
            SeriesError::MalformedBar { index, date, defect } => {
                assert_eq!(index, 1);
                assert_eq!(date, "2024-01-02");
                assert_eq!(defect, BarDefect::NotFinite { field: "close" });
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
