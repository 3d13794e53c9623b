//! A validated, date-ascending sequence of [`PriceBar`]s.

use serde::Serialize;

use crate::{bar::PriceBar, errors::SeriesError};

/// Non-empty, ascending by date, no duplicate dates, every bar valid.
///
/// The only way to get one is [`PriceSeries::new`], so code holding a
/// `PriceSeries` never has to re-check any of that.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Validates `bars` and normalises them to ascending date order.
    ///
    /// Sources disagree on ordering (newest-first is common), so any order is
    /// accepted. Bars are validated in the order supplied, and the reported
    /// index refers to that order.
    ///
    /// # Errors
    ///
    /// * [`SeriesError::EmptySeries`] if `bars` is empty.
    /// * [`SeriesError::MalformedBar`] for the first bar failing [`PriceBar::validate`].
    /// * [`SeriesError::DuplicateDate`] if two bars share a date.
    pub fn new(mut bars: Vec<PriceBar>) -> Result<Self, SeriesError> {
        if bars.is_empty() {
            return Err(SeriesError::EmptySeries);
        }

        for (index, bar) in bars.iter().enumerate() {
            bar.validate()
                .map_err(|defect| SeriesError::malformed(index, bar.date.to_string(), defect))?;
        }

        bars.sort_by_key(|bar| bar.date);

        if let Some(pair) = bars.windows(2).find(|pair| pair[0].date == pair[1].date) {
            return Err(SeriesError::DuplicateDate {
                date: pair[0].date.to_string(),
            });
        }

        tracing::trace!(bars = bars.len(), "price series normalised");
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Oldest bar.
    pub fn first(&self) -> &PriceBar {
        &self.bars[0]
    }

    /// Newest bar.
    pub fn last(&self) -> &PriceBar {
        &self.bars[self.bars.len() - 1]
    }

    pub fn into_bars(self) -> Vec<PriceBar> {
        self.bars
    }
}
