use core_types::{BacktestRecord, Instrument, ScoreWeights};

/// One state transition. Actions referring to unknown ids are no-ops.
#[derive(Debug, Clone)]
pub enum Action {
    AddInstrument(Instrument),
    /// Cascades: drops the instrument's records and, through the rebuild,
    /// the aggregates that become empty.
    DeleteInstrument(String),
    SelectInstrument(String),
    /// The record is re-scored with the state's weights before insertion.
    AddRecord(BacktestRecord),
    UpdateRecord(BacktestRecord),
    DeleteRecord(String),
    /// Deletes an aggregate together with every member record.
    DeleteAggregate(String),
    SetAggregateNote { id: String, note: Option<String> },
    /// Stores new weights and re-scores every record.
    SetWeights(ScoreWeights),
}
