#![allow(dead_code)]

use voltrader::domain::error::VoltraderError;
use voltrader::domain::series::{MarketData, MarketSeries};
use voltrader::domain::simulate::SimulationParams;
use voltrader::domain::sizing::SizingConfig;
use voltrader::ports::data_port::DataPort;

/// A series with the given prices and all signals off.
pub fn quiet_series(prices: Vec<f64>) -> MarketSeries {
    let n = prices.len();
    MarketSeries {
        prices,
        long_entry: vec![false; n],
        short_entry: vec![false; n],
        long_exit: vec![false; n],
        short_exit: vec![false; n],
        volatility_range: vec![1.0; n],
    }
}

/// The reference parameter set used across the scenario tests.
pub fn sample_params() -> SimulationParams {
    SimulationParams {
        atr_multiple: 2.0,
        fixed_stop_loss_pct: 0.1,
        take_profit_multiple: 2.0,
        initial_capital: 1000.0,
        spread_pct: 0.01,
        slippage_pct: 0.0005,
        daily_volatility: 0.05,
        sizing: SizingConfig::default(),
    }
}

/// Same as [`sample_params`] but frictionless, for exact-arithmetic checks.
pub fn frictionless_params() -> SimulationParams {
    SimulationParams {
        spread_pct: 0.0,
        slippage_pct: 0.0,
        ..sample_params()
    }
}

pub struct MockDataPort {
    pub data: Option<MarketData>,
    pub error: Option<String>,
}

impl MockDataPort {
    pub fn with_series(series: MarketSeries) -> Self {
        Self {
            data: Some(MarketData {
                series,
                timestamps: None,
            }),
            error: None,
        }
    }

    pub fn with_error(reason: &str) -> Self {
        Self {
            data: None,
            error: Some(reason.to_string()),
        }
    }
}

impl DataPort for MockDataPort {
    fn load_series(&self) -> Result<MarketData, VoltraderError> {
        if let Some(reason) = &self.error {
            return Err(VoltraderError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.data.clone().expect("mock has data"))
    }
}
