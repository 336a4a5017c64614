//! Summary statistics over the trade log and equity curve.

use serde::Serialize;

use crate::domain::position::{ClosedTrade, Side};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeStats {
    pub num_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Percentage in [0, 100].
    pub win_rate: f64,
    pub num_long_trades: usize,
    pub num_short_trades: usize,
    pub long_profit: f64,
    pub short_profit: f64,
    pub profit_factor: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub total_costs: f64,
}

impl TradeStats {
    pub fn compute(trades: &[ClosedTrade]) -> Self {
        let mut winning_trades = 0usize;
        let mut losing_trades = 0usize;
        let mut num_long_trades = 0usize;
        let mut num_short_trades = 0usize;
        let mut long_profit = 0.0_f64;
        let mut short_profit = 0.0_f64;
        let mut total_wins = 0.0_f64;
        let mut total_losses = 0.0_f64;
        let mut total_costs = 0.0_f64;

        for trade in trades {
            if trade.pnl > 0.0 {
                winning_trades += 1;
                total_wins += trade.pnl;
            } else if trade.pnl < 0.0 {
                losing_trades += 1;
                total_losses += trade.pnl.abs();
            }

            match trade.side {
                Side::Long => {
                    num_long_trades += 1;
                    long_profit += trade.pnl;
                }
                Side::Short => {
                    num_short_trades += 1;
                    short_profit += trade.pnl;
                }
            }

            total_costs += trade.costs;
        }

        let num_trades = trades.len();
        let win_rate = if num_trades > 0 {
            winning_trades as f64 / num_trades as f64 * 100.0
        } else {
            0.0
        };

        let profit_factor = if total_losses > 0.0 {
            total_wins / total_losses
        } else if total_wins > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        let avg_win = if winning_trades > 0 {
            total_wins / winning_trades as f64
        } else {
            0.0
        };

        let avg_loss = if losing_trades > 0 {
            total_losses / losing_trades as f64
        } else {
            0.0
        };

        TradeStats {
            num_trades,
            winning_trades,
            losing_trades,
            win_rate,
            num_long_trades,
            num_short_trades,
            long_profit,
            short_profit,
            profit_factor,
            avg_win,
            avg_loss,
            total_costs,
        }
    }
}

/// Largest peak-to-trough decline of the equity curve, as a fraction of
/// the peak.
pub fn max_drawdown(equity_curve: &[f64]) -> f64 {
    if equity_curve.is_empty() {
        return 0.0;
    }

    let mut peak = equity_curve[0];
    let mut max_dd = 0.0_f64;

    for &equity in equity_curve {
        if equity > peak {
            peak = equity;
        } else if peak > 0.0 {
            let dd = (peak - equity) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd
}

/// Mean over standard deviation of per-bar equity returns. Not annualized;
/// bars carry no fixed wall-clock duration here.
pub fn sharpe_ratio(equity_curve: &[f64]) -> f64 {
    if equity_curve.len() < 2 {
        return 0.0;
    }

    let returns: Vec<f64> = equity_curve
        .windows(2)
        .map(|w| if w[0] > 0.0 { (w[1] - w[0]) / w[0] } else { 0.0 })
        .collect();

    let n = returns.len() as f64;
    let mean: f64 = returns.iter().sum::<f64>() / n;
    let variance: f64 = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    if std_dev > 0.0 { mean / std_dev } else { 0.0 }
}
