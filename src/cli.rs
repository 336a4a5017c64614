//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::error::VoltraderError;
use crate::domain::series::MarketData;
use crate::domain::simulate::{simulate, SimulationParams, SimulationResult};
use crate::domain::sizing::SizingConfig;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "voltrader", about = "Signal-driven trade simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one simulation over a data file
    Simulate {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        data: PathBuf,
        /// Write the trade log to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the full results record as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Validate simulation parameters without running
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show summary information about a data file
    Info {
        #[arg(short, long)]
        data: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Simulate {
            config,
            data,
            output,
            json,
        } => run_simulate(&config, &data, output.as_ref(), json),
        Command::Validate { config } => run_validate(&config),
        Command::Info { data } => run_info(&data),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = VoltraderError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Assemble simulation parameters from config, deriving `daily_volatility`
/// from the price series when the config does not pin one.
pub fn build_params(
    config: &dyn ConfigPort,
    data: &MarketData,
) -> Result<SimulationParams, VoltraderError> {
    let daily_volatility = match config.get_string("simulation", "daily_volatility") {
        Some(raw) => raw.trim().parse().map_err(|_| VoltraderError::ConfigInvalid {
            section: "simulation".into(),
            key: "daily_volatility".into(),
            reason: format!("'{}' is not a number", raw),
        })?,
        None => data.series.realized_volatility(),
    };

    let defaults = SizingConfig::default();
    let sizing = SizingConfig {
        high_volatility_threshold: config.get_double(
            "sizing",
            "high_volatility_threshold",
            defaults.high_volatility_threshold,
        ),
        high_volatility_fraction: config.get_double(
            "sizing",
            "high_volatility_fraction",
            defaults.high_volatility_fraction,
        ),
        base_fraction: config.get_double("sizing", "base_fraction", defaults.base_fraction),
        strong_avg_pnl: config.get_double("sizing", "strong_avg_pnl", defaults.strong_avg_pnl),
        min_fraction: config.get_double("sizing", "min_fraction", defaults.min_fraction),
        max_fraction: config.get_double("sizing", "max_fraction", defaults.max_fraction),
    };

    Ok(SimulationParams {
        atr_multiple: config.get_double("simulation", "atr_multiple", 2.0),
        fixed_stop_loss_pct: config.get_double("simulation", "fixed_stop_loss_pct", 0.01),
        take_profit_multiple: config.get_double("simulation", "take_profit_multiple", 1.5),
        initial_capital: config.get_double("simulation", "initial_capital", 100.0),
        spread_pct: config.get_double("simulation", "spread_pct", 0.01),
        slippage_pct: config.get_double("simulation", "slippage_pct", 0.0005),
        daily_volatility,
        sizing,
    })
}

/// Load, simulate, report. Factored out of [`run_simulate`] so tests can
/// drive it with any data port.
pub fn run_simulation_pipeline(
    data_port: &dyn DataPort,
    config: &dyn ConfigPort,
    output_path: Option<&PathBuf>,
    json: bool,
) -> Result<SimulationResult, VoltraderError> {
    let data = data_port.load_series()?;
    eprintln!("Loaded {} bars", data.series.len());

    let params = build_params(config, &data)?;
    eprintln!(
        "Running simulation (daily_volatility = {:.4})",
        params.daily_volatility
    );

    let result = simulate(&data.series, &params)?;

    if let Some(path) = output_path {
        CsvReportAdapter.write(&result, &data, path)?;
        eprintln!("Wrote trade log to {}", path.display());
    }

    if json {
        let line = serde_json::to_string(&result).map_err(|e| VoltraderError::Data {
            reason: format!("failed to serialize results: {}", e),
        })?;
        println!("{line}");
    }

    Ok(result)
}

fn run_simulate(
    config_path: &PathBuf,
    data_path: &PathBuf,
    output_path: Option<&PathBuf>,
    json: bool,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let data_port = CsvAdapter::new(data_path.clone());
    match run_simulation_pipeline(&data_port, &config, output_path, json) {
        Ok(result) => {
            print_summary(&result);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn print_summary(result: &SimulationResult) {
    eprintln!("  Final Capital: {:.2}", result.final_capital);
    eprintln!("  Total Profit/Loss: {:.2}", result.total_profit_loss);
    eprintln!("  Total Costs: {:.2}", result.total_costs);
    eprintln!("  Total Trades: {}", result.num_trades);
    eprintln!("  Winning Trades: {}", result.winning_trades);
    eprintln!("  Losing Trades: {}", result.losing_trades);
    eprintln!("  Win Rate: {:.2}%", result.win_rate);
    eprintln!(
        "  Long Trades: {}, Profit: {:.2}",
        result.num_long_trades, result.long_profit
    );
    eprintln!(
        "  Short Trades: {}, Profit: {:.2}",
        result.num_short_trades, result.short_profit
    );
    eprintln!("  Max Drawdown: {:.2}%", result.max_drawdown * 100.0);
    eprintln!("  Sharpe Ratio: {:.4}", result.sharpe_ratio);
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    // Parameter validation needs no data; an empty series stands in and
    // daily_volatility falls back to zero if unset.
    let empty = MarketData {
        series: Default::default(),
        timestamps: None,
    };
    let params = match build_params(&config, &empty) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match params.validate() {
        Ok(()) => {
            eprintln!("Config OK");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(data_path: &PathBuf) -> ExitCode {
    let data_port = CsvAdapter::new(data_path.clone());
    let data = match data_port.load_series() {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("  Bars: {}", data.series.len());
    if let Some(timestamps) = &data.timestamps {
        if let (Some(first), Some(last)) = (timestamps.first(), timestamps.last()) {
            eprintln!("  From: {}", first.format("%Y-%m-%d %H:%M:%S"));
            eprintln!("  To:   {}", last.format("%Y-%m-%d %H:%M:%S"));
        }
    }
    eprintln!(
        "  Realized volatility: {:.4}",
        data.series.realized_volatility()
    );
    ExitCode::SUCCESS
}
