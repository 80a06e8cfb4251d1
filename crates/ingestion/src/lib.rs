//! The report ingestion pipeline.
//!
//! One uploaded report runs start-to-finish on the calling thread: parse the
//! document once, read the self-reported summary and the trade ledger from
//! it, reconcile the two into a single metric block, score it, and hand back
//! a complete record. Nothing partial is ever returned; the caller merges
//! the record into catalogue state only on success.

use analytics::{calculate_score, ReconciliationEngine};
use chrono::Utc;
use core_types::{BacktestRecord, Error, Result, ScoreWeights};
use report_parser::ReportDocument;
use tracing::info;
use uuid::Uuid;

/// How much of the source document is retained on the record for inspection.
const RAW_PREVIEW_LEN: usize = 2000;

/// Ingests one raw report document into a scored [`BacktestRecord`].
///
/// The record is scored with the default weights; the catalogue reducer
/// re-scores on insert with whatever weights are configured, so the two
/// never drift. Fails only on an empty strategy name or when the report
/// carries no usable data at all (no ledger rows and a zero self-reported
/// final balance).
pub fn ingest_report(
    document: &str,
    instrument_id: &str,
    strategy: &str,
    file_name: &str,
) -> Result<BacktestRecord> {
    if strategy.trim().is_empty() {
        return Err(Error::EmptyStrategyName);
    }

    let doc = ReportDocument::parse(document);
    let summary = doc.summary();
    let trades = doc.extract_trades();
    info!(
        file = file_name,
        ledger_rows = trades.len(),
        reported_final_balance = %summary.final_balance,
        "extracted report data"
    );

    let metrics = ReconciliationEngine::new().reconcile(&summary, &trades)?;

    let mut record = BacktestRecord {
        id: Uuid::new_v4().to_string(),
        instrument_id: instrument_id.to_string(),
        strategy: strategy.trim().to_string(),
        file_name: file_name.to_string(),
        uploaded_at: Utc::now(),
        total_trades: metrics.total_trades,
        winning_trades: metrics.winning_trades,
        losing_trades: metrics.losing_trades,
        win_rate: metrics.win_rate,
        initial_balance: metrics.initial_balance,
        final_balance: metrics.final_balance,
        profit: metrics.profit,
        profit_factor: metrics.profit_factor,
        expected_payoff: metrics.expected_payoff,
        max_drawdown: metrics.max_drawdown,
        max_drawdown_percent: metrics.max_drawdown_percent,
        consecutive_wins: metrics.consecutive_wins,
        consecutive_losses: metrics.consecutive_losses,
        sharpe_ratio: metrics.sharpe_ratio,
        recovery_factor: metrics.recovery_factor,
        risk_reward_ratio: metrics.risk_reward_ratio,
        score: 0.0,
        trades,
        raw_preview: Some(document.chars().take(RAW_PREVIEW_LEN).collect()),
    };
    record.score = calculate_score(&record, &ScoreWeights::default());

    info!(
        id = %record.id,
        strategy = %record.strategy,
        trades = record.total_trades,
        score = record.score,
        "report ingested"
    );
    Ok(record)
}

/// Prints a reconciled record in a readable format.
pub fn print_report(record: &BacktestRecord) {
    println!("\n--- Backtest Report: {} ---", record.file_name);
    println!("-----------------------------------");
    println!("Strategy:              {}", record.strategy);
    println!("Instrument:            {}", record.instrument_id);
    println!("Total Trades:          {}", record.total_trades);
    println!(
        "Win Rate:              {:.2}% ({} / {})",
        record.win_rate, record.winning_trades, record.total_trades
    );
    println!("Net Profit:            ${:.2}", record.profit);
    println!(
        "Balance:               ${:.2} -> ${:.2}",
        record.initial_balance, record.final_balance
    );
    println!("Profit Factor:         {:.2}", record.profit_factor);
    println!("Expected Payoff:       ${:.2}", record.expected_payoff);
    println!(
        "Max Drawdown:          ${:.2} ({:.2}%)",
        record.max_drawdown, record.max_drawdown_percent
    );
    println!(
        "Consecutive W/L:       {} / {}",
        record.consecutive_wins, record.consecutive_losses
    );
    println!("Sharpe Ratio:          {:.3}", record.sharpe_ratio);
    println!("Recovery Factor:       {:.3}", record.recovery_factor);
    println!("Score:                 {:.2}", record.score);
    println!("-----------------------------------");
}
