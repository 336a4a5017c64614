//! The simulation engine.
//!
//! A single sequential pass over the input series replays one strategy:
//! at most one open position at a time, entries on signal, exits by stop,
//! target, signal, or end of data, in that precedence order. The engine is
//! a deterministic function of its inputs; identical inputs reproduce
//! identical results.

use serde::Serialize;

use crate::domain::account::CapitalAccount;
use crate::domain::error::VoltraderError;
use crate::domain::execution::CostModel;
use crate::domain::metrics::{self, TradeStats};
use crate::domain::position::{ClosedTrade, ExitReason, Position, Side};
use crate::domain::series::MarketSeries;
use crate::domain::sizing::{self, RecentPerformance, SizingConfig};
use crate::domain::stops;

/// Scalar risk parameters for one simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    pub atr_multiple: f64,
    pub fixed_stop_loss_pct: f64,
    pub take_profit_multiple: f64,
    pub initial_capital: f64,
    pub spread_pct: f64,
    pub slippage_pct: f64,
    /// Realized 24h move of the instrument, supplied by the caller.
    pub daily_volatility: f64,
    pub sizing: SizingConfig,
}

impl SimulationParams {
    pub fn validate(&self) -> Result<(), VoltraderError> {
        if !(self.atr_multiple > 0.0) {
            return Err(VoltraderError::validation(format!(
                "atr_multiple must be positive, got {}",
                self.atr_multiple
            )));
        }
        if !(self.fixed_stop_loss_pct > 0.0 && self.fixed_stop_loss_pct < 1.0) {
            return Err(VoltraderError::validation(format!(
                "fixed_stop_loss_pct must be in (0, 1), got {}",
                self.fixed_stop_loss_pct
            )));
        }
        if !(self.take_profit_multiple > 0.0) {
            return Err(VoltraderError::validation(format!(
                "take_profit_multiple must be positive, got {}",
                self.take_profit_multiple
            )));
        }
        if !(self.initial_capital > 0.0) {
            return Err(VoltraderError::validation(format!(
                "initial_capital must be positive, got {}",
                self.initial_capital
            )));
        }
        if !(self.spread_pct >= 0.0 && self.spread_pct < 1.0) {
            return Err(VoltraderError::validation(format!(
                "spread_pct must be in [0, 1), got {}",
                self.spread_pct
            )));
        }
        if !(self.slippage_pct >= 0.0 && self.slippage_pct < 1.0) {
            return Err(VoltraderError::validation(format!(
                "slippage_pct must be in [0, 1), got {}",
                self.slippage_pct
            )));
        }
        if !(self.daily_volatility >= 0.0 && self.daily_volatility.is_finite()) {
            return Err(VoltraderError::validation(format!(
                "daily_volatility must be a non-negative finite number, got {}",
                self.daily_volatility
            )));
        }
        if self.sizing.min_fraction > self.sizing.max_fraction {
            return Err(VoltraderError::validation(
                "sizing min_fraction exceeds max_fraction",
            ));
        }
        Ok(())
    }
}

/// Everything a run produces: the summary consumed by optimization and
/// reporting layers, plus the ordered trade log and equity curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub final_capital: f64,
    pub total_profit_loss: f64,
    pub total_costs: f64,
    pub num_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Percentage in [0, 100].
    pub win_rate: f64,
    pub num_long_trades: usize,
    pub num_short_trades: usize,
    pub long_profit: f64,
    pub short_profit: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
    pub trades: Vec<ClosedTrade>,
    pub equity_curve: Vec<f64>,
}

/// Replay the strategy described by `series` under `params`.
///
/// Fails with a validation or arithmetic error before any account state
/// exists; a returned `Ok` always accounts for 100% of capital (any
/// position surviving the last bar is force-closed at the last price).
pub fn simulate(
    series: &MarketSeries,
    params: &SimulationParams,
) -> Result<SimulationResult, VoltraderError> {
    params.validate()?;
    series.validate()?;

    let costs = CostModel::new(params.spread_pct, params.slippage_pct);
    let mut account = CapitalAccount::new(params.initial_capital);
    let mut recent = RecentPerformance::default();
    let mut open: Option<Position> = None;

    let n = series.len();
    for i in 0..n {
        let price = series.prices[i];

        match open.take() {
            None => {
                // A position opened here is first exit-evaluated next bar.
                if series.long_entry[i] {
                    open = Some(open_position(
                        Side::Long,
                        i,
                        price,
                        series.volatility_range[i],
                        params,
                        &costs,
                        &mut account,
                        &recent,
                    ));
                } else if series.short_entry[i] {
                    open = Some(open_position(
                        Side::Short,
                        i,
                        price,
                        series.volatility_range[i],
                        params,
                        &costs,
                        &mut account,
                        &recent,
                    ));
                }
            }
            Some(position) => {
                let exit = if position.stop_hit(price) {
                    Some((position.stop_price, ExitReason::StopLoss))
                } else if position.take_profit_hit(price) {
                    Some((position.take_profit_price, ExitReason::TakeProfit))
                } else if exit_signal_fired(series, i, position.side) {
                    Some((price, ExitReason::Signal))
                } else {
                    None
                };

                match exit {
                    Some((exit_price, reason)) => {
                        close_position(
                            position,
                            i,
                            exit_price,
                            reason,
                            &costs,
                            &mut account,
                            &mut recent,
                        );
                    }
                    None => open = Some(position),
                }
            }
        }

        let marked = open
            .as_ref()
            .map(|p| p.usd_size + p.gross_pnl(price))
            .unwrap_or(0.0);
        account.record_equity(account.available + marked);
    }

    // Mark-to-close: whatever survived the last bar exits at the last price.
    if let Some(position) = open.take() {
        let last = n - 1;
        close_position(
            position,
            last,
            series.prices[last],
            ExitReason::EndOfData,
            &costs,
            &mut account,
            &mut recent,
        );
        if let Some(final_equity) = account.equity_curve.last_mut() {
            *final_equity = account.available;
        }
    }

    let stats = TradeStats::compute(&account.closed_trades);
    let final_capital = account.available;

    Ok(SimulationResult {
        final_capital,
        total_profit_loss: final_capital - params.initial_capital,
        total_costs: stats.total_costs,
        num_trades: stats.num_trades,
        winning_trades: stats.winning_trades,
        losing_trades: stats.losing_trades,
        win_rate: stats.win_rate,
        num_long_trades: stats.num_long_trades,
        num_short_trades: stats.num_short_trades,
        long_profit: stats.long_profit,
        short_profit: stats.short_profit,
        max_drawdown: metrics::max_drawdown(&account.equity_curve),
        sharpe_ratio: metrics::sharpe_ratio(&account.equity_curve),
        trades: account.closed_trades,
        equity_curve: account.equity_curve,
    })
}

fn exit_signal_fired(series: &MarketSeries, index: usize, side: Side) -> bool {
    match side {
        Side::Long => series.long_exit[index],
        Side::Short => series.short_exit[index],
    }
}

fn open_position(
    side: Side,
    index: usize,
    price: f64,
    volatility_range: f64,
    params: &SimulationParams,
    costs: &CostModel,
    account: &mut CapitalAccount,
    recent: &RecentPerformance,
) -> Position {
    let fraction = sizing::position_fraction(&params.sizing, params.daily_volatility, recent);
    let usd_size = account.available * fraction;
    let units = usd_size / price;

    let distance = stops::stop_distance(
        params.atr_multiple,
        volatility_range,
        params.fixed_stop_loss_pct,
        price,
    );

    account.reserve(usd_size);

    Position {
        side,
        entry_price: price,
        entry_index: index,
        units,
        usd_size,
        stop_price: stops::stop_price(side, price, distance),
        take_profit_price: stops::take_profit_price(
            side,
            price,
            distance,
            params.take_profit_multiple,
        ),
        entry_cost: costs.entry_cost(usd_size),
    }
}

fn close_position(
    position: Position,
    index: usize,
    exit_price: f64,
    reason: ExitReason,
    costs: &CostModel,
    account: &mut CapitalAccount,
    recent: &mut RecentPerformance,
) {
    let exit_cost = costs.exit_cost(position.units * exit_price);
    let pnl = position.gross_pnl(exit_price) - position.entry_cost - exit_cost;

    account.settle(position.usd_size, pnl);
    recent.record(pnl);
    account.record_trade(ClosedTrade {
        side: position.side,
        entry_price: position.entry_price,
        exit_price,
        entry_index: position.entry_index,
        exit_index: index,
        units: position.units,
        usd_size: position.usd_size,
        pnl,
        costs: position.entry_cost + exit_cost,
        exit_reason: reason,
    });
}
