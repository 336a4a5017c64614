//! Position-sizing policy.
//!
//! Hybrid regime switch on the instrument's realized daily move: above the
//! threshold the policy commits a fixed, near-maximal fraction of available
//! capital; below it the fraction adapts to the outcome of the last three
//! closed trades. The adaptive branch reads a fixed-capacity ring buffer
//! instead of rescanning the trade log, keeping each bar O(1).

/// Number of closed trades the adaptive branch looks back over.
pub const PERFORMANCE_WINDOW: usize = 3;

const STRONG_MULTIPLIER: f64 = 2.0;
const MAJORITY_WIN_MULTIPLIER: f64 = 1.8;
const SINGLE_WIN_MULTIPLIER: f64 = 1.0;
const NO_WIN_MULTIPLIER: f64 = 0.3;

/// Sizing thresholds, passed explicitly into the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingConfig {
    /// Daily move above which fixed sizing takes over.
    pub high_volatility_threshold: f64,
    /// Fraction committed under fixed sizing.
    pub high_volatility_fraction: f64,
    /// Base fraction for the adaptive branch.
    pub base_fraction: f64,
    /// Window-average P&L above which the strong multiplier applies.
    pub strong_avg_pnl: f64,
    pub min_fraction: f64,
    pub max_fraction: f64,
}

impl Default for SizingConfig {
    fn default() -> Self {
        SizingConfig {
            high_volatility_threshold: 0.20,
            high_volatility_fraction: 0.95,
            base_fraction: 0.20,
            strong_avg_pnl: 5.0,
            min_fraction: 0.05,
            max_fraction: 0.95,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Outcome {
    pnl: f64,
    win: bool,
}

/// Trailing view of the last [`PERFORMANCE_WINDOW`] closed trades.
///
/// Slots not yet filled count as zero-P&L non-winners, so a fresh window
/// sizes as conservatively as a losing streak.
#[derive(Debug, Clone, Default)]
pub struct RecentPerformance {
    outcomes: [Outcome; PERFORMANCE_WINDOW],
    next: usize,
    filled: usize,
}

impl RecentPerformance {
    pub fn record(&mut self, pnl: f64) {
        self.outcomes[self.next] = Outcome { pnl, win: pnl > 0.0 };
        self.next = (self.next + 1) % PERFORMANCE_WINDOW;
        if self.filled < PERFORMANCE_WINDOW {
            self.filled += 1;
        }
    }

    pub fn wins(&self) -> usize {
        self.outcomes.iter().filter(|o| o.win).count()
    }

    /// Average P&L over the full window; empty slots contribute zero.
    pub fn average_pnl(&self) -> f64 {
        let total: f64 = self.outcomes.iter().map(|o| o.pnl).sum();
        total / PERFORMANCE_WINDOW as f64
    }

    pub fn trade_count(&self) -> usize {
        self.filled
    }
}

/// Fraction of available capital to commit to the next position,
/// clamped to `[min_fraction, max_fraction]`.
pub fn position_fraction(
    config: &SizingConfig,
    daily_volatility: f64,
    recent: &RecentPerformance,
) -> f64 {
    let raw = if daily_volatility > config.high_volatility_threshold {
        config.high_volatility_fraction
    } else {
        let multiplier = if recent.average_pnl() > config.strong_avg_pnl {
            STRONG_MULTIPLIER
        } else {
            match recent.wins() {
                w if w >= 2 => MAJORITY_WIN_MULTIPLIER,
                1 => SINGLE_WIN_MULTIPLIER,
                _ => NO_WIN_MULTIPLIER,
            }
        };
        config.base_fraction * multiplier
    };

    raw.clamp(config.min_fraction, config.max_fraction)
}
