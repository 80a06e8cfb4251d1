use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One closed trade taken from the report's ledger table.
///
/// `number` and `open_time` stay opaque strings: the two report dialects
/// format them differently and nothing downstream needs them as typed values.
/// A `Trade` only exists for rows whose profit is non-zero; zero-profit rows
/// are open or non-terminal positions and are dropped at extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub number: String,
    pub open_time: String,
    pub order: String,
    pub volume: Decimal,
    pub open_price: Decimal,
    /// Stop-loss price, 0 when the trade had none.
    pub sl: Decimal,
    /// Take-profit price, 0 when the trade had none.
    pub tp: Decimal,
    pub profit: Decimal,
    /// Account balance immediately after this trade closed.
    pub balance: Decimal,
}

/// The summary figures a report states about itself, read verbatim from the
/// document. A missing label and a genuine zero are indistinguishable here;
/// the reconciliation engine decides which of these figures to trust.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryBlock {
    pub total_trades: u32,
    pub winning_trades: u32,
    pub losing_trades: u32,
    pub win_rate: f64,
    pub initial_balance: Decimal,
    pub final_balance: Decimal,
    pub total_profit: Decimal,
    pub profit_factor: f64,
    pub max_drawdown: Decimal,
    pub max_drawdown_percent: f64,
    pub consecutive_wins: u32,
    pub consecutive_losses: u32,
}

/// One fully reconciled, scored result of ingesting a single report.
///
/// Invariant: `final_balance == initial_balance + profit` exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestRecord {
    pub id: String,
    pub instrument_id: String,
    pub strategy: String,
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,

    pub total_trades: u32,
    pub winning_trades: u32,
    pub losing_trades: u32,
    /// Percent in [0, 100].
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

    /// Composite score in [0, 1], pre-rounded to 2 decimals.
    pub score: f64,

    pub trades: Vec<Trade>,
    /// First 2000 characters of the source document, kept for inspection.
    pub raw_preview: Option<String>,
}

/// A catalogued trading instrument (symbol).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instrument {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Rollup over every record sharing an (instrument, strategy) key.
///
/// Aggregates are a derived view: the catalogue owns the records, an
/// aggregate only references them by id and is rebuilt from scratch whenever
/// the member set changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyAggregate {
    pub id: String,
    pub instrument_id: String,
    pub strategy: String,
    pub member_ids: Vec<String>,
    pub average_score: f64,
    pub best_score: f64,
    pub total_backtests: u32,
    pub note: Option<String>,
}

/// Weights for the composite score. The defaults sum to 1.0; callers
/// supplying their own weights are responsible for normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub win_rate: f64,
    pub profit_factor: f64,
    pub max_drawdown: f64,
    pub consecutive_wins: f64,
    pub consecutive_losses: f64,
    pub sharpe_ratio: f64,
    pub recovery_factor: f64,
    pub risk_reward_ratio: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            win_rate: 0.2,
            profit_factor: 0.2,
            max_drawdown: 0.2,
            consecutive_wins: 0.15,
            consecutive_losses: 0.15,
            sharpe_ratio: 0.0,
            recovery_factor: 0.1,
            risk_reward_ratio: 0.0,
        }
    }
}
