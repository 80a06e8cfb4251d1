use core_types::Trade;
use scraper::ElementRef;
use tracing::debug;

use crate::document::{cell_text, ReportDocument};
use crate::numeric::extract_number;

/// Minimum cells for a full ledger row: the seven fixed leading columns plus
/// at least one middle column plus profit and balance at the end.
const MIN_LEDGER_CELLS: usize = 10;

impl ReportDocument {
    /// Isolates and parses the trade ledger.
    ///
    /// The ledger is the first table containing a row whose first cell trims
    /// to exactly `"#"`; rows after that header become trades. The leading
    /// columns sit at fixed offsets, while profit and balance are taken from
    /// the last two cells by position, which tolerates a variable number of
    /// middle columns (commission, swap) between them. Column 2, the
    /// report's own type column, is skipped: both dialects fill it
    /// unreliably.
    ///
    /// Zero-profit rows are open or non-terminal positions and are dropped.
    /// An empty result is not an error, merely "no trade detail available".
    pub fn extract_trades(&self) -> Vec<Trade> {
        let mut trades = Vec::new();
        for table in self.tables() {
            let rows: Vec<ElementRef> = table.select(self.rows()).collect();
            let Some(header) = rows.iter().position(|row| {
                row.select(self.cells())
                    .next()
                    .is_some_and(|cell| cell_text(cell).trim() == "#")
            }) else {
                continue;
            };

            for row in &rows[header + 1..] {
                let cells: Vec<ElementRef> = row.select(self.cells()).collect();
                if cells.len() < MIN_LEDGER_CELLS {
                    continue;
                }
                let profit = extract_number(&cell_text(cells[cells.len() - 2]));
                if profit.is_zero() {
                    continue;
                }
                trades.push(Trade {
                    number: cell_text(cells[0]).trim().to_string(),
                    open_time: cell_text(cells[1]).trim().to_string(),
                    order: cell_text(cells[3]).trim().to_string(),
                    volume: extract_number(&cell_text(cells[4])),
                    open_price: extract_number(&cell_text(cells[5])),
                    sl: extract_number(&cell_text(cells[6])),
                    tp: extract_number(&cell_text(cells[7])),
                    profit,
                    balance: extract_number(&cell_text(cells[cells.len() - 1])),
                });
            }

            debug!(trades = trades.len(), "parsed trade ledger");
            // Only one ledger table is expected per document.
            break;
        }
        trades
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ledger_row(cells: &[&str]) -> String {
        let tds: String = cells.iter().map(|c| format!("<td>{c}</td>")).collect();
        format!("<tr>{tds}</tr>")
    }

    fn document_with_ledger(rows: &[String]) -> String {
        format!(
            r#"<html><body>
            <table><tr><td>Depósito inicial</td><td>10000</td></tr></table>
            <table>
              <tr><td>#</td><td>Tiempo</td><td>Tipo</td><td>Orden</td>
                  <td>Volumen</td><td>Precio</td><td>S/L</td><td>T/P</td>
                  <td>Beneficios</td><td>Balance</td></tr>
              {}
            </table>
            </body></html>"#,
            rows.join("\n")
        )
    }

    #[test]
    fn parses_rows_after_the_header() {
        let rows = [
            ledger_row(&["1", "2024.01.02 10:00", "buy", "1001", "0.10", "1.1050", "0", "0", "150.00", "10150.00"]),
            ledger_row(&["2", "2024.01.03 11:00", "sell", "1002", "0.10", "1.1020", "0", "0", "-50.00", "10100.00"]),
        ];
        let doc = ReportDocument::parse(&document_with_ledger(&rows));
        let trades = doc.extract_trades();

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].number, "1");
        assert_eq!(trades[0].order, "1001");
        assert_eq!(trades[0].volume, dec!(0.10));
        assert_eq!(trades[0].profit, dec!(150.00));
        assert_eq!(trades[0].balance, dec!(10150.00));
        assert_eq!(trades[1].profit, dec!(-50.00));
    }

    #[test]
    fn zero_profit_rows_are_discarded() {
        let rows = [
            ledger_row(&["1", "t", "buy", "1001", "0.10", "1.1", "0", "0", "0.00", "10000.00"]),
            ledger_row(&["2", "t", "sell", "1002", "0.10", "1.1", "0", "0", "25.00", "10025.00"]),
        ];
        let doc = ReportDocument::parse(&document_with_ledger(&rows));
        let trades = doc.extract_trades();

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].number, "2");
    }

    #[test]
    fn short_rows_are_skipped() {
        let rows = [
            ledger_row(&["1", "t", "buy", "1001", "0.10", "1.1", "0", "0", "99.00"]),
            ledger_row(&["2", "t", "sell", "1002", "0.10", "1.1", "0", "0", "25.00", "10025.00"]),
        ];
        let doc = ReportDocument::parse(&document_with_ledger(&rows));
        let trades = doc.extract_trades();

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].profit, dec!(25.00));
    }

    #[test]
    fn profit_and_balance_come_from_the_last_two_cells() {
        // Extra commission and swap columns in the middle must not shift them.
        let rows = [ledger_row(&[
            "1", "t", "buy", "1001", "0.10", "1.1", "0", "0", "-1.20", "0.00", "80.00", "10080.00",
        ])];
        let doc = ReportDocument::parse(&document_with_ledger(&rows));
        let trades = doc.extract_trades();

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].profit, dec!(80.00));
        assert_eq!(trades[0].balance, dec!(10080.00));
    }

    #[test]
    fn no_ledger_table_yields_an_empty_list() {
        let doc = ReportDocument::parse(
            r#"<table><tr><td>Beneficio total</td><td>100</td></tr></table>"#,
        );
        assert!(doc.extract_trades().is_empty());
    }

    #[test]
    fn only_the_first_ledger_table_is_processed() {
        let first = document_with_ledger(&[ledger_row(&[
            "1", "t", "buy", "1001", "0.10", "1.1", "0", "0", "10.00", "10010.00",
        ])]);
        let second = document_with_ledger(&[ledger_row(&[
            "9", "t", "sell", "9009", "0.10", "1.1", "0", "0", "99.00", "10099.00",
        ])]);
        let doc = ReportDocument::parse(&format!("{first}{second}"));
        let trades = doc.extract_trades();

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].number, "1");
    }
}
