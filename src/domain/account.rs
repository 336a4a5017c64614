//! Capital account and trade log.
//!
//! The account owns the only mutable money state in a simulation run:
//! available capital, the append-only log of closed trades, and the
//! per-bar equity curve. Invariant at every bar boundary:
//! `available + committed == initial_capital + realized_pnl`.

use crate::domain::position::ClosedTrade;

#[derive(Debug, Clone, PartialEq)]
pub struct CapitalAccount {
    pub available: f64,
    pub initial_capital: f64,
    pub closed_trades: Vec<ClosedTrade>,
    pub equity_curve: Vec<f64>,
}

impl CapitalAccount {
    pub fn new(initial_capital: f64) -> Self {
        CapitalAccount {
            available: initial_capital,
            initial_capital,
            closed_trades: Vec::new(),
            equity_curve: Vec::new(),
        }
    }

    /// Move `usd_size` from available into a new position.
    pub fn reserve(&mut self, usd_size: f64) {
        self.available -= usd_size;
    }

    /// Return a closed position's reserved capital plus its net P&L.
    pub fn settle(&mut self, usd_size: f64, pnl: f64) {
        self.available += usd_size + pnl;
    }

    pub fn record_trade(&mut self, trade: ClosedTrade) {
        self.closed_trades.push(trade);
    }

    pub fn record_equity(&mut self, equity: f64) {
        self.equity_curve.push(equity);
    }

    pub fn realized_pnl(&self) -> f64 {
        self.closed_trades.iter().map(|t| t.pnl).sum()
    }
}
