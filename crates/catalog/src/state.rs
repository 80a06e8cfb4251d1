use core_types::{BacktestRecord, Instrument, ScoreWeights, StrategyAggregate};
use serde::{Deserialize, Serialize};

/// The full catalogue: instruments and records are owned here, aggregates
/// are a rebuildable view over the records.
///
/// The struct is the snapshot format: the persistence wrapper serializes a
/// state verbatim and hands a deserialized one back to resume from.
/// Timestamps round-trip through RFC 3339 text. Older snapshots without a
/// `weights` field pick up the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogState {
    pub instruments: Vec<Instrument>,
    pub selected_instrument: Option<String>,
    pub records: Vec<BacktestRecord>,
    pub aggregates: Vec<StrategyAggregate>,
    pub weights: ScoreWeights,
}

impl CatalogState {
    pub fn instrument(&self, id: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.id == id)
    }

    pub fn record(&self, id: &str) -> Option<&BacktestRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn aggregate(&self, id: &str) -> Option<&StrategyAggregate> {
        self.aggregates.iter().find(|a| a.id == id)
    }
}
