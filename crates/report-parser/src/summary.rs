use core_types::SummaryBlock;
use rust_decimal::prelude::ToPrimitive;

use crate::document::ReportDocument;
use crate::numeric::extract_number;

// Label alternatives for the two supported report dialects, Spanish first.
const TOTAL_TRADES: [&str; 2] = ["Total de transacciones", "Total Trades"];
const WINNING_TRADES: [&str; 2] = ["Transacciones rentables", "Profitable Trades"];
const LOSING_TRADES: [&str; 2] = ["Transacciones perdedoras", "Loss Trades"];
const WIN_RATE: [&str; 2] = ["Porcentaje de rentabilidad", "Win Rate"];
const INITIAL_BALANCE: [&str; 2] = ["Depósito inicial", "Initial Deposit"];
const FINAL_BALANCE: [&str; 2] = ["Balance final", "Final Balance"];
const TOTAL_PROFIT: [&str; 2] = ["Beneficio total", "Total Profit"];
const PROFIT_FACTOR: [&str; 2] = ["Factor de beneficio", "Profit Factor"];
const MAX_DRAWDOWN: [&str; 2] = ["Máximo retroceso", "Maximum Drawdown"];
const MAX_DRAWDOWN_PERCENT: [&str; 2] = ["Máximo retroceso %", "Maximum Drawdown %"];
const CONSECUTIVE_WINS: [&str; 2] = ["Ganancia máxima consecutiva", "Maximum Consecutive Wins"];
const CONSECUTIVE_LOSSES: [&str; 2] = ["Pérdida máxima consecutiva", "Maximum Consecutive Losses"];

impl ReportDocument {
    /// Reads the self-reported summary block.
    ///
    /// Every figure degrades to 0 when its label is missing, so a zero here
    /// may mean "absent" just as well as "reported zero". The reconciliation
    /// rules account for that ambiguity.
    pub fn summary(&self) -> SummaryBlock {
        let value = |labels| extract_number(&self.find_labeled_value_any(labels));
        let count = |labels| value(labels).to_u32().unwrap_or(0);
        let ratio = |labels| value(labels).to_f64().unwrap_or(0.0);

        SummaryBlock {
            total_trades: count(TOTAL_TRADES),
            winning_trades: count(WINNING_TRADES),
            losing_trades: count(LOSING_TRADES),
            win_rate: ratio(WIN_RATE),
            initial_balance: value(INITIAL_BALANCE),
            final_balance: value(FINAL_BALANCE),
            total_profit: value(TOTAL_PROFIT),
            profit_factor: ratio(PROFIT_FACTOR),
            max_drawdown: value(MAX_DRAWDOWN),
            max_drawdown_percent: ratio(MAX_DRAWDOWN_PERCENT),
            consecutive_wins: count(CONSECUTIVE_WINS),
            consecutive_losses: count(CONSECUTIVE_LOSSES),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SPANISH: &str = r#"
        <table>
          <tr><td>Depósito inicial</td><td>10000.00</td></tr>
          <tr><td>Balance final</td><td>11250.00</td></tr>
          <tr><td>Beneficio total</td><td>1250.00</td></tr>
          <tr><td>Factor de beneficio</td><td>1.85</td></tr>
          <tr><td>Total de transacciones</td><td>42</td></tr>
          <tr><td>Transacciones rentables</td><td>25</td></tr>
          <tr><td>Transacciones perdedoras</td><td>17</td></tr>
          <tr><td>Porcentaje de rentabilidad</td><td>59.52</td></tr>
          <tr><td>Máximo retroceso</td><td>320.00</td></tr>
          <tr><td>Máximo retroceso %</td><td>2.90</td></tr>
          <tr><td>Ganancia máxima consecutiva</td><td>6</td></tr>
          <tr><td>Pérdida máxima consecutiva</td><td>3</td></tr>
        </table>"#;

    #[test]
    fn reads_the_spanish_dialect() {
        let doc = ReportDocument::parse(SPANISH);
        let summary = doc.summary();

        assert_eq!(summary.total_trades, 42);
        assert_eq!(summary.winning_trades, 25);
        assert_eq!(summary.losing_trades, 17);
        assert_eq!(summary.win_rate, 59.52);
        assert_eq!(summary.initial_balance, dec!(10000.00));
        assert_eq!(summary.final_balance, dec!(11250.00));
        assert_eq!(summary.total_profit, dec!(1250.00));
        assert_eq!(summary.profit_factor, 1.85);
        assert_eq!(summary.max_drawdown, dec!(320.00));
        assert_eq!(summary.max_drawdown_percent, 2.9);
        assert_eq!(summary.consecutive_wins, 6);
        assert_eq!(summary.consecutive_losses, 3);
    }

    #[test]
    fn falls_back_to_the_english_dialect() {
        let doc = ReportDocument::parse(
            r#"<table>
              <tr><td>Initial Deposit</td><td>5000</td></tr>
              <tr><td>Maximum Drawdown</td><td>150.00</td></tr>
            </table>"#,
        );
        let summary = doc.summary();

        assert_eq!(summary.initial_balance, dec!(5000));
        assert_eq!(summary.max_drawdown, dec!(150.00));
    }

    #[test]
    fn missing_labels_default_to_zero() {
        let doc = ReportDocument::parse("<table><tr><td>irrelevant</td></tr></table>");
        let summary = doc.summary();

        assert_eq!(summary.total_trades, 0);
        assert_eq!(summary.initial_balance, dec!(0));
        assert_eq!(summary.final_balance, dec!(0));
        assert_eq!(summary.max_drawdown, dec!(0));
        assert_eq!(summary.win_rate, 0.0);
    }
}
