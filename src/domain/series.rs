//! Aligned market input series.
//!
//! The engine consumes parallel, index-aligned vectors: one price per bar,
//! four boolean signal flags, and a volatility-range (ATR-equivalent) value.
//! Alignment and numeric sanity are checked once, before any simulation
//! state exists.

use chrono::NaiveDateTime;

use crate::domain::error::VoltraderError;

/// One simulation input set. All vectors must have the same non-zero length.
#[derive(Debug, Clone, Default)]
pub struct MarketSeries {
    pub prices: Vec<f64>,
    pub long_entry: Vec<bool>,
    pub short_entry: Vec<bool>,
    pub long_exit: Vec<bool>,
    pub short_exit: Vec<bool>,
    pub volatility_range: Vec<f64>,
}

impl MarketSeries {
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Check alignment and numeric preconditions.
    ///
    /// Length mismatches and empty input are validation errors; non-finite
    /// or non-positive prices and non-finite or negative volatility values
    /// are arithmetic errors (they would otherwise surface later as NaN
    /// position sizes).
    pub fn validate(&self) -> Result<(), VoltraderError> {
        if self.prices.is_empty() {
            return Err(VoltraderError::validation("price series is empty"));
        }

        let n = self.prices.len();
        for (name, len) in [
            ("long_entry", self.long_entry.len()),
            ("short_entry", self.short_entry.len()),
            ("long_exit", self.long_exit.len()),
            ("short_exit", self.short_exit.len()),
            ("volatility_range", self.volatility_range.len()),
        ] {
            if len != n {
                return Err(VoltraderError::validation(format!(
                    "{} length {} != prices length {}",
                    name, len, n
                )));
            }
        }

        for (i, &p) in self.prices.iter().enumerate() {
            if !p.is_finite() || p <= 0.0 {
                return Err(VoltraderError::arithmetic(format!(
                    "price {} at index {} is not a positive finite number",
                    p, i
                )));
            }
        }
        for (i, &v) in self.volatility_range.iter().enumerate() {
            if !v.is_finite() || v < 0.0 {
                return Err(VoltraderError::arithmetic(format!(
                    "volatility_range {} at index {} is not a non-negative finite number",
                    v, i
                )));
            }
        }

        Ok(())
    }

    /// Realized move over the whole series: `|last - first| / first`.
    ///
    /// This is the figure the sizing regime switch keys on when the caller
    /// does not supply one.
    pub fn realized_volatility(&self) -> f64 {
        match (self.prices.first(), self.prices.last()) {
            (Some(&first), Some(&last)) if first > 0.0 => ((last - first) / first).abs(),
            _ => 0.0,
        }
    }
}

/// A loaded series plus whatever per-bar timestamps the source carried.
///
/// Timestamps never enter the engine; reports join them back by bar index.
#[derive(Debug, Clone)]
pub struct MarketData {
    pub series: MarketSeries,
    pub timestamps: Option<Vec<NaiveDateTime>>,
}

impl MarketData {
    pub fn timestamp_at(&self, index: usize) -> Option<NaiveDateTime> {
        self.timestamps.as_ref().and_then(|ts| ts.get(index)).copied()
    }
}
