//! Stop-loss and take-profit placement.

use crate::domain::position::Side;

/// Distance from entry to the stop: the tighter of the volatility-scaled
/// stop and the fixed percentage stop. An atypically low volatility-range
/// value therefore narrows the stop rather than widening the risk.
pub fn stop_distance(
    atr_multiple: f64,
    volatility_range: f64,
    fixed_stop_loss_pct: f64,
    entry_price: f64,
) -> f64 {
    let volatility_stop = atr_multiple * volatility_range;
    let fixed_stop = fixed_stop_loss_pct * entry_price;
    volatility_stop.min(fixed_stop)
}

pub fn stop_price(side: Side, entry_price: f64, distance: f64) -> f64 {
    match side {
        Side::Long => entry_price - distance,
        Side::Short => entry_price + distance,
    }
}

/// Target at a risk-reward multiple of the stop distance.
pub fn take_profit_price(
    side: Side,
    entry_price: f64,
    distance: f64,
    take_profit_multiple: f64,
) -> f64 {
    match side {
        Side::Long => entry_price + take_profit_multiple * distance,
        Side::Short => entry_price - take_profit_multiple * distance,
    }
}
