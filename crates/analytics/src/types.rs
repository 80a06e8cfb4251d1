use rust_decimal::Decimal;
use serde::Serialize;

/// Statistics derived purely from the extracted trade list, before any
/// reconciliation against the report's own summary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecomputedStats {
    pub total_trades: u32,
    pub winning_trades: u32,
    pub losing_trades: u32,
    pub win_rate: f64,
    pub total_profit: Decimal,
    pub profit_factor: f64,
    pub consecutive_wins: u32,
    pub consecutive_losses: u32,
    pub sharpe_ratio: f64,
    pub max_drawdown: Decimal,
    pub max_drawdown_percent: f64,
}

/// The published metric block of a backtest result after reconciliation:
/// per metric, either the recomputed or the self-reported figure, per the
/// adoption rules in [`crate::engine`].
#[derive(Debug, Clone, Serialize)]
pub struct ReconciledMetrics {
    pub total_trades: u32,
    pub winning_trades: u32,
    pub losing_trades: u32,
    pub win_rate: f64,
    pub initial_balance: Decimal,
    pub final_balance: Decimal,
    pub profit: Decimal,
    pub profit_factor: f64,
    pub expected_payoff: Decimal,
    pub max_drawdown: Decimal,
    pub max_drawdown_percent: f64,
    pub consecutive_wins: u32,
    pub consecutive_losses: u32,
    pub sharpe_ratio: f64,
    pub recovery_factor: f64,
    pub risk_reward_ratio: f64,
}
