//! Parsing of exported backtest reports.
//!
//! A report is an HTML file of nested tables in one of two dialects (Spanish
//! or English labels). Two independent passes run over the same parsed
//! document: the locator reads the self-reported summary figures, and the
//! ledger extractor pulls the row-level trade list. Both degrade softly;
//! deciding what to trust is the reconciliation engine's job, not ours.

pub mod document;
pub mod numeric;
pub mod summary;
pub mod trades;

pub use document::ReportDocument;
pub use numeric::extract_number;
