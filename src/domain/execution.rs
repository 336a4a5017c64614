//! Transaction-cost model.
//!
//! A round trip pays the full bid-ask spread and slippage on both legs.
//! The spread is split half per leg; slippage applies in full to each
//! leg's notional.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    pub spread_pct: f64,
    pub slippage_pct: f64,
}

impl CostModel {
    pub fn new(spread_pct: f64, slippage_pct: f64) -> Self {
        CostModel {
            spread_pct,
            slippage_pct,
        }
    }

    /// Cost rate charged on a single leg's notional.
    fn leg_rate(&self) -> f64 {
        self.spread_pct / 2.0 + self.slippage_pct
    }

    /// Friction on the entry leg.
    pub fn entry_cost(&self, notional: f64) -> f64 {
        notional * self.leg_rate()
    }

    /// Friction on the exit leg.
    pub fn exit_cost(&self, notional: f64) -> f64 {
        notional * self.leg_rate()
    }
}
