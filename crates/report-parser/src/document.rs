use scraper::{ElementRef, Html, Selector};

/// A parsed report document plus the selectors every pass needs.
///
/// Parsing happens once; the summary locator and the ledger extractor both
/// walk the same tree. The scan order is always tables in document order,
/// then rows, then cells.
pub struct ReportDocument {
    html: Html,
    table: Selector,
    row: Selector,
    cell: Selector,
}

impl ReportDocument {
    pub fn parse(text: &str) -> Self {
        Self {
            html: Html::parse_document(text),
            table: Selector::parse("table").expect("static selector"),
            row: Selector::parse("tr").expect("static selector"),
            cell: Selector::parse("td").expect("static selector"),
        }
    }

    /// Finds the value cell next to the first cell containing `label`.
    ///
    /// The match is a case-sensitive substring test over the whole document;
    /// only the first hit counts. Returns the trimmed text of the following
    /// cell in the same row, or `"0"` when the matched cell is the last of
    /// its row or no cell matches at all. "Not found" and "found 0" are
    /// therefore indistinguishable, which the reconciliation rules account
    /// for.
    pub fn find_labeled_value(&self, label: &str) -> String {
        for table in self.tables() {
            for row in table.select(&self.row) {
                let cells: Vec<ElementRef> = row.select(&self.cell).collect();
                for (i, cell) in cells.iter().enumerate() {
                    if cell_text(*cell).contains(label) {
                        return match cells.get(i + 1) {
                            Some(next) => cell_text(*next).trim().to_string(),
                            None => "0".to_string(),
                        };
                    }
                }
            }
        }
        "0".to_string()
    }

    /// Tries each label alternative in turn; a default `"0"` result falls
    /// through to the next one. Used to cover both report dialects.
    pub fn find_labeled_value_any(&self, labels: [&str; 2]) -> String {
        for label in labels {
            let value = self.find_labeled_value(label);
            if value != "0" {
                return value;
            }
        }
        "0".to_string()
    }

    pub(crate) fn tables(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html.select(&self.table)
    }

    pub(crate) fn rows(&self) -> &Selector {
        &self.row
    }

    pub(crate) fn cells(&self) -> &Selector {
        &self.cell
    }
}

/// Concatenated text content of a cell, like DOM `textContent`.
pub(crate) fn cell_text(cell: ElementRef) -> String {
    cell.text().collect()
}
