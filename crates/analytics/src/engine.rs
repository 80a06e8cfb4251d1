use core_types::{Error, Result, SummaryBlock, Trade};
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::types::{ReconciledMetrics, RecomputedStats};

/// Starting capital assumed when the report declares none; a report cannot
/// state zero or negative initial capital.
pub const DEFAULT_INITIAL_BALANCE: Decimal = dec!(10_000);

/// Recomputes summary statistics from the extracted trades and decides,
/// per metric, whether to trust the report's own summary or the recomputed
/// value.
#[derive(Default)]
pub struct ReconciliationEngine;

impl ReconciliationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the published metric block from both sources.
    ///
    /// Adoption rules: counts, win rate, profit, profit factor and streaks
    /// take the recomputed values whenever the ledger is non-empty, and fall
    /// back to the self-reported figures otherwise. Drawdown keeps the
    /// self-reported figure when its amount is positive (reports sample the
    /// equity curve more finely than post-trade balances); the recomputed
    /// walk substitutes when it is not. The final balance is always derived
    /// from the adopted profit so that `final == initial + profit` holds
    /// exactly.
    ///
    /// The single hard failure is a report with no ledger rows and a zero
    /// self-reported final balance; every other gap degrades to 0.
    pub fn reconcile(&self, summary: &SummaryBlock, trades: &[Trade]) -> Result<ReconciledMetrics> {
        if trades.is_empty() && summary.final_balance.is_zero() {
            return Err(Error::InsufficientData);
        }

        let initial_balance = if summary.initial_balance > dec!(0) {
            summary.initial_balance
        } else {
            DEFAULT_INITIAL_BALANCE
        };

        let recomputed = self.recompute(initial_balance, trades);
        let ledger_backed = !trades.is_empty();
        if !ledger_backed {
            debug!("no ledger rows extracted, adopting self-reported summary");
        }

        let total_trades = if ledger_backed { recomputed.total_trades } else { summary.total_trades };
        let winning_trades = if ledger_backed { recomputed.winning_trades } else { summary.winning_trades };
        let losing_trades = if ledger_backed { recomputed.losing_trades } else { summary.losing_trades };
        let win_rate = if ledger_backed { recomputed.win_rate } else { summary.win_rate };
        let profit = if ledger_backed { recomputed.total_profit } else { summary.total_profit };
        let profit_factor = if ledger_backed { recomputed.profit_factor } else { summary.profit_factor };
        let consecutive_wins = if ledger_backed { recomputed.consecutive_wins } else { summary.consecutive_wins };
        let consecutive_losses = if ledger_backed { recomputed.consecutive_losses } else { summary.consecutive_losses };

        let (max_drawdown, max_drawdown_percent) = if summary.max_drawdown > dec!(0) {
            (summary.max_drawdown, summary.max_drawdown_percent)
        } else {
            (recomputed.max_drawdown, recomputed.max_drawdown_percent)
        };

        let final_balance = initial_balance + profit;
        let expected_payoff = if total_trades > 0 {
            profit / Decimal::from(total_trades)
        } else {
            Decimal::ZERO
        };
        let recovery_factor = if max_drawdown > dec!(0) {
            (profit / max_drawdown).to_f64().unwrap_or(0.0)
        } else {
            0.0
        };

        Ok(ReconciledMetrics {
            total_trades,
            winning_trades,
            losing_trades,
            win_rate,
            initial_balance,
            final_balance,
            profit,
            profit_factor,
            expected_payoff,
            max_drawdown,
            max_drawdown_percent,
            consecutive_wins,
            consecutive_losses,
            sharpe_ratio: recomputed.sharpe_ratio,
            recovery_factor,
            risk_reward_ratio: 0.0, // TODO: derive from average win / average loss
        })
    }

    /// Derives statistics from the retained trades alone.
    pub fn recompute(&self, initial_balance: Decimal, trades: &[Trade]) -> RecomputedStats {
        let mut stats = RecomputedStats::default();
        if trades.is_empty() {
            return stats;
        }

        // 1. Counts and win rate. Zero-profit rows were dropped at
        // extraction, so winners and losers partition the list.
        stats.winning_trades = trades.iter().filter(|t| t.profit > dec!(0)).count() as u32;
        stats.losing_trades = trades.iter().filter(|t| t.profit < dec!(0)).count() as u32;
        stats.total_trades = stats.winning_trades + stats.losing_trades;
        if stats.total_trades > 0 {
            stats.win_rate = (stats.winning_trades as f64 / stats.total_trades as f64) * 100.0;
        }

        // 2. Total profit and profit factor.
        stats.total_profit = trades.iter().map(|t| t.profit).sum();
        let gross_profit: Decimal = trades
            .iter()
            .filter(|t| t.profit > dec!(0))
            .map(|t| t.profit)
            .sum();
        let gross_loss: Decimal = trades
            .iter()
            .filter(|t| t.profit < dec!(0))
            .map(|t| t.profit)
            .sum::<Decimal>()
            .abs();
        if gross_loss > dec!(0) {
            stats.profit_factor = (gross_profit / gross_loss).to_f64().unwrap_or(0.0);
        }

        // 3. Streaks: one forward pass in extraction order; exactly one
        // branch fires per trade.
        let mut current_wins = 0u32;
        let mut current_losses = 0u32;
        for trade in trades {
            if trade.profit > dec!(0) {
                current_wins += 1;
                current_losses = 0;
                stats.consecutive_wins = stats.consecutive_wins.max(current_wins);
            } else {
                current_losses += 1;
                current_wins = 0;
                stats.consecutive_losses = stats.consecutive_losses.max(current_losses);
            }
        }

        // 4. Sharpe-like ratio over per-trade returns, population sigma.
        let capital = initial_balance.to_f64().unwrap_or(0.0);
        if capital > 0.0 {
            let returns: Vec<f64> = trades
                .iter()
                .map(|t| t.profit.to_f64().unwrap_or(0.0) / capital)
                .collect();
            let mean = returns.iter().sum::<f64>() / returns.len() as f64;
            let variance =
                returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / returns.len() as f64;
            let std_dev = variance.sqrt();
            if std_dev > 0.0 {
                stats.sharpe_ratio = mean / std_dev;
            }
        }

        // 5. Drawdown walked from the post-trade balance sequence. The
        // percent is captured against the peak at the moment the gap is
        // largest, not the final peak.
        let mut max_equity = initial_balance;
        for trade in trades {
            if trade.balance > max_equity {
                max_equity = trade.balance;
            }
            let drawdown = max_equity - trade.balance;
            if drawdown > stats.max_drawdown {
                stats.max_drawdown = drawdown;
                if max_equity > dec!(0) {
                    stats.max_drawdown_percent =
                        (drawdown / max_equity).to_f64().unwrap_or(0.0) * 100.0;
                }
            }
        }

        stats
    }
}
