use core_types::{BacktestRecord, ScoreWeights};
use std::fmt;

/// Rounds to the 2-decimal precision every published score uses.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Maps a reconciled record to a single comparable score.
///
/// Each metric is squashed into [0, 1] before weighting; the drawdown
/// sub-score may go negative past 100% drawdown and is deliberately not
/// clamped below zero. Pure and deterministic, so records can be re-scored
/// when the weights change without re-parsing anything.
pub fn calculate_score(record: &BacktestRecord, weights: &ScoreWeights) -> f64 {
    let win_rate = record.win_rate / 100.0;
    let profit_factor = (record.profit_factor / 5.0).min(1.0);
    let max_drawdown = 1.0 - record.max_drawdown_percent / 100.0;
    let consecutive_wins = (record.consecutive_wins as f64 / 20.0).min(1.0);
    let consecutive_losses = 1.0 - (record.consecutive_losses as f64 / 10.0).min(1.0);
    let sharpe_ratio = (record.sharpe_ratio / 3.0).clamp(0.0, 1.0);
    let recovery_factor = (record.recovery_factor / 10.0).min(1.0);
    let risk_reward_ratio = (record.risk_reward_ratio / 3.0).min(1.0);

    let score = win_rate * weights.win_rate
        + profit_factor * weights.profit_factor
        + max_drawdown * weights.max_drawdown
        + consecutive_wins * weights.consecutive_wins
        + consecutive_losses * weights.consecutive_losses
        + sharpe_ratio * weights.sharpe_ratio
        + recovery_factor * weights.recovery_factor
        + risk_reward_ratio * weights.risk_reward_ratio;

    round2(score)
}

/// Qualitative band for a score, used by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn classify(score: f64) -> Self {
        if score >= 0.8 {
            Self::Excellent
        } else if score >= 0.6 {
            Self::Good
        } else if score >= 0.4 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        };
        f.write_str(label)
    }
}

/// Rollup statistics over the member scores of one (instrument, strategy)
/// group.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AggregateStats {
    pub average_score: f64,
    pub best_score: f64,
    pub total_backtests: u32,
}

/// Mean and best of the member scores, rounded to 2 decimals; zeroes for an
/// empty group.
pub fn aggregate_stats(scores: &[f64]) -> AggregateStats {
    if scores.is_empty() {
        return AggregateStats::default();
    }
    let average = scores.iter().sum::<f64>() / scores.len() as f64;
    let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    AggregateStats {
        average_score: round2(average),
        best_score: round2(best),
        total_backtests: scores.len() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn record() -> BacktestRecord {
        BacktestRecord {
            id: "1".into(),
            instrument_id: "eurusd".into(),
            strategy: "atr-breakout".into(),
            file_name: "report.html".into(),
            uploaded_at: Utc::now(),
            total_trades: 2,
            winning_trades: 1,
            losing_trades: 1,
            win_rate: 50.0,
            initial_balance: Decimal::new(10_000, 0),
            final_balance: Decimal::new(10_100, 0),
            profit: Decimal::new(100, 0),
            profit_factor: 3.0,
            expected_payoff: Decimal::new(50, 0),
            max_drawdown: Decimal::new(300, 0),
            max_drawdown_percent: 2.9,
            consecutive_wins: 4,
            consecutive_losses: 2,
            sharpe_ratio: 0.9,
            recovery_factor: 0.33,
            risk_reward_ratio: 0.0,
            score: 0.0,
            trades: Vec::new(),
            raw_preview: None,
        }
    }

    #[test]
    fn matches_the_hand_computed_value() {
        // win_rate 0.5*0.2 + pf 0.6*0.2 + dd 0.971*0.2 + cw 0.2*0.15
        // + cl 0.8*0.15 + sharpe 0.3*0.0 + recovery 0.033*0.1 + rr 0*0.0
        let expected = 0.5 * 0.2
            + (3.0 / 5.0) * 0.2
            + (1.0 - 0.029) * 0.2
            + (4.0 / 20.0) * 0.15
            + (1.0 - 0.2) * 0.15
            + 0.033 * 0.1;
        let score = calculate_score(&record(), &ScoreWeights::default());

        assert_eq!(score, round2(expected));
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn deterministic_and_idempotent() {
        let record = record();
        let weights = ScoreWeights::default();
        assert_eq!(
            calculate_score(&record, &weights),
            calculate_score(&record, &weights)
        );
    }

    #[test]
    fn sub_scores_are_capped() {
        let mut r = record();
        r.win_rate = 100.0;
        r.profit_factor = 50.0;
        r.consecutive_wins = 200;
        r.consecutive_losses = 0;
        r.sharpe_ratio = 99.0;
        r.recovery_factor = 99.0;
        r.max_drawdown_percent = 0.0;
        let score = calculate_score(&r, &ScoreWeights::default());

        assert_eq!(score, 1.0);
    }

    #[test]
    fn drawdown_past_100_percent_drags_the_score_negative() {
        let mut r = record();
        r.win_rate = 0.0;
        r.profit_factor = 0.0;
        r.consecutive_wins = 0;
        r.consecutive_losses = 10;
        r.sharpe_ratio = 0.0;
        r.recovery_factor = 0.0;
        r.max_drawdown_percent = 250.0;
        let score = calculate_score(&r, &ScoreWeights::default());

        assert!(score < 0.0);
    }

    #[test]
    fn bands() {
        assert_eq!(ScoreBand::classify(0.85), ScoreBand::Excellent);
        assert_eq!(ScoreBand::classify(0.8), ScoreBand::Excellent);
        assert_eq!(ScoreBand::classify(0.65), ScoreBand::Good);
        assert_eq!(ScoreBand::classify(0.45), ScoreBand::Fair);
        assert_eq!(ScoreBand::classify(0.1), ScoreBand::Poor);
    }

    #[test]
    fn aggregate_stats_round_and_count() {
        let stats = aggregate_stats(&[0.61, 0.62, 0.9]);

        assert_eq!(stats.total_backtests, 3);
        assert_eq!(stats.best_score, 0.9);
        assert_eq!(stats.average_score, 0.71);
        assert!(stats.best_score >= stats.average_score);
    }

    #[test]
    fn empty_group_is_all_zeroes() {
        assert_eq!(aggregate_stats(&[]), AggregateStats::default());
    }
}
