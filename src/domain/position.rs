//! Position state and closed-trade records.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Long,
    Short,
}

/// Which mechanism closed a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    StopLoss,
    TakeProfit,
    Signal,
    EndOfData,
}

/// The single open trade. Created on an entry signal, consumed on close,
/// never partially modified in between.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub side: Side,
    pub entry_price: f64,
    pub entry_index: usize,
    /// Size in base-asset units.
    pub units: f64,
    /// Size in quote-currency units reserved from the account.
    pub usd_size: f64,
    pub stop_price: f64,
    pub take_profit_price: f64,
    /// Friction paid on the entry leg, realized when the trade closes.
    pub entry_cost: f64,
}

impl Position {
    pub fn stop_hit(&self, price: f64) -> bool {
        match self.side {
            Side::Long => price <= self.stop_price,
            Side::Short => price >= self.stop_price,
        }
    }

    pub fn take_profit_hit(&self, price: f64) -> bool {
        match self.side {
            Side::Long => price >= self.take_profit_price,
            Side::Short => price <= self.take_profit_price,
        }
    }

    /// Price P&L at `price`, before friction.
    pub fn gross_pnl(&self, price: f64) -> f64 {
        match self.side {
            Side::Long => (price - self.entry_price) * self.units,
            Side::Short => (self.entry_price - price) * self.units,
        }
    }
}

/// Immutable record of a completed round trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosedTrade {
    pub side: Side,
    pub entry_price: f64,
    pub exit_price: f64,
    pub entry_index: usize,
    pub exit_index: usize,
    pub units: f64,
    pub usd_size: f64,
    /// Net of both friction legs.
    pub pnl: f64,
    /// Sum of the entry and exit friction legs.
    pub costs: f64,
    pub exit_reason: ExitReason,
}

impl ClosedTrade {
    pub fn is_win(&self) -> bool {
        self.pnl > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_position() -> Position {
        Position {
            side: Side::Long,
            entry_price: 100.0,
            entry_index: 0,
            units: 1.9,
            usd_size: 190.0,
            stop_price: 98.0,
            take_profit_price: 104.0,
            entry_cost: 1.0,
        }
    }

    fn short_position() -> Position {
        Position {
            side: Side::Short,
            entry_price: 100.0,
            entry_index: 0,
            units: 1.9,
            usd_size: 190.0,
            stop_price: 102.0,
            take_profit_price: 96.0,
            entry_cost: 1.0,
        }
    }

    #[test]
    fn stop_hit_long() {
        let pos = long_position();
        assert!(pos.stop_hit(97.0));
        assert!(pos.stop_hit(98.0));
        assert!(!pos.stop_hit(99.0));
    }

    #[test]
    fn stop_hit_short() {
        let pos = short_position();
        assert!(pos.stop_hit(103.0));
        assert!(pos.stop_hit(102.0));
        assert!(!pos.stop_hit(101.0));
    }

    #[test]
    fn take_profit_hit_long() {
        let pos = long_position();
        assert!(pos.take_profit_hit(105.0));
        assert!(pos.take_profit_hit(104.0));
        assert!(!pos.take_profit_hit(103.0));
    }

    #[test]
    fn take_profit_hit_short() {
        let pos = short_position();
        assert!(pos.take_profit_hit(95.0));
        assert!(pos.take_profit_hit(96.0));
        assert!(!pos.take_profit_hit(97.0));
    }

    #[test]
    fn gross_pnl_long() {
        let pos = long_position();
        assert!((pos.gross_pnl(110.0) - 19.0).abs() < f64::EPSILON);
        assert!((pos.gross_pnl(90.0) - (-19.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn gross_pnl_short() {
        let pos = short_position();
        assert!((pos.gross_pnl(90.0) - 19.0).abs() < f64::EPSILON);
        assert!((pos.gross_pnl(110.0) - (-19.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn closed_trade_win_classification() {
        let mut trade = ClosedTrade {
            side: Side::Long,
            entry_price: 100.0,
            exit_price: 104.0,
            entry_index: 0,
            exit_index: 3,
            units: 1.9,
            usd_size: 190.0,
            pnl: 5.5,
            costs: 2.1,
            exit_reason: ExitReason::TakeProfit,
        };
        assert!(trade.is_win());

        trade.pnl = 0.0;
        assert!(!trade.is_win());

        trade.pnl = -0.5;
        assert!(!trade.is_win());
    }
}
