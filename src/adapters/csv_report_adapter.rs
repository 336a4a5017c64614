//! CSV trade-log report adapter.
//!
//! Writes one row per closed trade. When the source data carried
//! timestamps, entry/exit times are joined back in by bar index.

use std::path::Path;

use crate::domain::error::VoltraderError;
use crate::domain::position::{ExitReason, Side};
use crate::domain::series::MarketData;
use crate::domain::simulate::SimulationResult;
use crate::ports::report_port::ReportPort;

pub struct CsvReportAdapter;

fn side_label(side: Side) -> &'static str {
    match side {
        Side::Long => "LONG",
        Side::Short => "SHORT",
    }
}

fn reason_label(reason: ExitReason) -> &'static str {
    match reason {
        ExitReason::StopLoss => "stop_loss",
        ExitReason::TakeProfit => "take_profit",
        ExitReason::Signal => "signal",
        ExitReason::EndOfData => "end_of_data",
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(
        &self,
        result: &SimulationResult,
        data: &MarketData,
        output_path: &Path,
    ) -> Result<(), VoltraderError> {
        let mut wtr = csv::Writer::from_path(output_path).map_err(|e| VoltraderError::Data {
            reason: format!("failed to open {}: {}", output_path.display(), e),
        })?;

        wtr.write_record([
            "entry_index",
            "exit_index",
            "entry_time",
            "exit_time",
            "side",
            "units",
            "usd_size",
            "entry_price",
            "exit_price",
            "pnl",
            "costs",
            "exit_reason",
        ])
        .map_err(|e| VoltraderError::Data {
            reason: format!("CSV write error: {}", e),
        })?;

        for trade in &result.trades {
            let entry_time = data
                .timestamp_at(trade.entry_index)
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default();
            let exit_time = data
                .timestamp_at(trade.exit_index)
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default();

            wtr.write_record([
                trade.entry_index.to_string(),
                trade.exit_index.to_string(),
                entry_time,
                exit_time,
                side_label(trade.side).to_string(),
                format!("{:.8}", trade.units),
                format!("{:.2}", trade.usd_size),
                format!("{:.8}", trade.entry_price),
                format!("{:.8}", trade.exit_price),
                format!("{:.8}", trade.pnl),
                format!("{:.8}", trade.costs),
                reason_label(trade.exit_reason).to_string(),
            ])
            .map_err(|e| VoltraderError::Data {
                reason: format!("CSV write error: {}", e),
            })?;
        }

        wtr.flush().map_err(|e| VoltraderError::Data {
            reason: format!("CSV flush error: {}", e),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::series::MarketSeries;
    use crate::domain::simulate::{simulate, SimulationParams};
    use crate::domain::sizing::SizingConfig;
    use chrono::DateTime;
    use std::fs;
    use tempfile::TempDir;

    fn run_one_trade() -> (SimulationResult, MarketData) {
        let n = 4;
        let mut series = MarketSeries {
            prices: vec![100.0, 101.0, 102.0, 103.0],
            long_entry: vec![false; n],
            short_entry: vec![false; n],
            long_exit: vec![false; n],
            short_exit: vec![false; n],
            volatility_range: vec![5.0; n],
        };
        series.long_entry[0] = true;
        series.long_exit[2] = true;

        let params = SimulationParams {
            atr_multiple: 2.0,
            fixed_stop_loss_pct: 0.2,
            take_profit_multiple: 10.0,
            initial_capital: 1000.0,
            spread_pct: 0.0,
            slippage_pct: 0.0,
            daily_volatility: 0.05,
            sizing: SizingConfig::default(),
        };

        let result = simulate(&series, &params).unwrap();
        let timestamps = (0..n)
            .map(|i| {
                DateTime::from_timestamp_millis(1_700_000_000_000 + i as i64 * 60_000)
                    .unwrap()
                    .naive_utc()
            })
            .collect();
        let data = MarketData {
            series,
            timestamps: Some(timestamps),
        };
        (result, data)
    }

    #[test]
    fn writes_one_row_per_trade_with_times() {
        let (result, data) = run_one_trade();
        assert_eq!(result.num_trades, 1);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trades.csv");
        CsvReportAdapter.write(&result, &data, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("entry_index,exit_index,entry_time,exit_time,side"));
        assert!(lines[1].contains("LONG"));
        assert!(lines[1].contains("signal"));
        assert!(lines[1].contains("2023-11-14"));
    }

    #[test]
    fn empty_times_without_timestamps() {
        let (result, mut data) = run_one_trade();
        data.timestamps = None;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trades.csv");
        CsvReportAdapter.write(&result, &data, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let row = content.lines().nth(1).unwrap();
        assert!(row.starts_with("0,2,,,LONG"));
    }

    #[test]
    fn unwritable_path_is_a_data_error() {
        let (result, data) = run_one_trade();
        let err = CsvReportAdapter
            .write(&result, &data, Path::new("/nonexistent/dir/trades.csv"))
            .unwrap_err();
        assert!(matches!(err, VoltraderError::Data { .. }));
    }
}
