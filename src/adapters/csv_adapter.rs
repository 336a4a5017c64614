//! CSV file data adapter.
//!
//! Loads the aligned input series from a single CSV file with a header row:
//! `timestamp,price,long_entry,short_entry,long_exit,short_exit,volatility_range`.
//! The timestamp column is optional; when present it holds kline-style epoch
//! milliseconds and is carried through to reports.

use chrono::{DateTime, NaiveDateTime};
use std::fs;
use std::path::PathBuf;

use crate::domain::error::VoltraderError;
use crate::domain::series::{MarketData, MarketSeries};
use crate::ports::data_port::DataPort;

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

fn data_err(reason: impl Into<String>) -> VoltraderError {
    VoltraderError::Data {
        reason: reason.into(),
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

fn require_column(headers: &csv::StringRecord, name: &str) -> Result<usize, VoltraderError> {
    column_index(headers, name).ok_or_else(|| data_err(format!("missing column '{}'", name)))
}

fn parse_f64(record: &csv::StringRecord, index: usize, name: &str, row: usize) -> Result<f64, VoltraderError> {
    record
        .get(index)
        .ok_or_else(|| data_err(format!("row {}: missing {} field", row, name)))?
        .trim()
        .parse()
        .map_err(|e| data_err(format!("row {}: invalid {} value: {}", row, name, e)))
}

fn parse_flag(record: &csv::StringRecord, index: usize, name: &str, row: usize) -> Result<bool, VoltraderError> {
    let raw = record
        .get(index)
        .ok_or_else(|| data_err(format!("row {}: missing {} field", row, name)))?
        .trim();
    match raw {
        "1" | "true" | "True" => Ok(true),
        "0" | "false" | "False" => Ok(false),
        other => Err(data_err(format!(
            "row {}: invalid {} flag '{}', expected 0/1 or true/false",
            row, name, other
        ))),
    }
}

fn parse_timestamp(record: &csv::StringRecord, index: usize, row: usize) -> Result<NaiveDateTime, VoltraderError> {
    let raw = record
        .get(index)
        .ok_or_else(|| data_err(format!("row {}: missing timestamp field", row)))?
        .trim();
    let millis: i64 = raw
        .parse()
        .map_err(|e| data_err(format!("row {}: invalid timestamp '{}': {}", row, raw, e)))?;
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| data_err(format!("row {}: timestamp {} out of range", row, millis)))
}

impl DataPort for CsvAdapter {
    fn load_series(&self) -> Result<MarketData, VoltraderError> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            data_err(format!("failed to read {}: {}", self.path.display(), e))
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| data_err(format!("CSV header error: {}", e)))?
            .clone();

        let ts_col = column_index(&headers, "timestamp");
        let price_col = require_column(&headers, "price")?;
        let long_entry_col = require_column(&headers, "long_entry")?;
        let short_entry_col = require_column(&headers, "short_entry")?;
        let long_exit_col = require_column(&headers, "long_exit")?;
        let short_exit_col = require_column(&headers, "short_exit")?;
        let vr_col = require_column(&headers, "volatility_range")?;

        let mut series = MarketSeries::default();
        let mut timestamps = Vec::new();

        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| data_err(format!("CSV parse error: {}", e)))?;

            if let Some(ts_col) = ts_col {
                timestamps.push(parse_timestamp(&record, ts_col, row)?);
            }
            series.prices.push(parse_f64(&record, price_col, "price", row)?);
            series
                .long_entry
                .push(parse_flag(&record, long_entry_col, "long_entry", row)?);
            series
                .short_entry
                .push(parse_flag(&record, short_entry_col, "short_entry", row)?);
            series
                .long_exit
                .push(parse_flag(&record, long_exit_col, "long_exit", row)?);
            series
                .short_exit
                .push(parse_flag(&record, short_exit_col, "short_exit", row)?);
            series
                .volatility_range
                .push(parse_f64(&record, vr_col, "volatility_range", row)?);
        }

        Ok(MarketData {
            series,
            timestamps: ts_col.map(|_| timestamps),
        })
    }
}
