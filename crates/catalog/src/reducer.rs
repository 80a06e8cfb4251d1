use std::collections::BTreeMap;

use analytics::{aggregate_stats, calculate_score};
use core_types::{BacktestRecord, StrategyAggregate};
use tracing::debug;

use crate::actions::Action;
use crate::state::CatalogState;

/// The pure state-transition function: every mutation of the catalogue goes
/// through here, and the caller persists the returned state wholesale.
///
/// Any action that changes the record set ends in a full aggregate rebuild,
/// so readers never observe a partially updated rollup.
pub fn apply(mut state: CatalogState, action: Action) -> CatalogState {
    match action {
        Action::AddInstrument(instrument) => {
            debug!(id = %instrument.id, name = %instrument.name, "adding instrument");
            state.instruments.push(instrument);
        }

        Action::DeleteInstrument(id) => {
            state.instruments.retain(|i| i.id != id);
            state.records.retain(|r| r.instrument_id != id);
            if state.selected_instrument.as_deref() == Some(id.as_str()) {
                state.selected_instrument = None;
            }
            state.aggregates = rebuild_aggregates(&state.records, &state.aggregates);
        }

        Action::SelectInstrument(id) => {
            state.selected_instrument = Some(id);
        }

        Action::AddRecord(mut record) => {
            record.score = calculate_score(&record, &state.weights);
            state.records.push(record);
            state.aggregates = rebuild_aggregates(&state.records, &state.aggregates);
        }

        Action::UpdateRecord(mut record) => {
            record.score = calculate_score(&record, &state.weights);
            if let Some(slot) = state.records.iter_mut().find(|r| r.id == record.id) {
                *slot = record;
                state.aggregates = rebuild_aggregates(&state.records, &state.aggregates);
            }
        }

        Action::DeleteRecord(id) => {
            state.records.retain(|r| r.id != id);
            state.aggregates = rebuild_aggregates(&state.records, &state.aggregates);
        }

        Action::DeleteAggregate(id) => {
            let key = state
                .aggregates
                .iter()
                .find(|a| a.id == id)
                .map(|a| (a.instrument_id.clone(), a.strategy.clone()));
            if let Some((instrument_id, strategy)) = key {
                state
                    .records
                    .retain(|r| !(r.instrument_id == instrument_id && r.strategy == strategy));
                state.aggregates = rebuild_aggregates(&state.records, &state.aggregates);
            }
        }

        Action::SetAggregateNote { id, note } => {
            if let Some(aggregate) = state.aggregates.iter_mut().find(|a| a.id == id) {
                aggregate.note = note;
            }
        }

        Action::SetWeights(weights) => {
            state.weights = weights;
            for record in &mut state.records {
                record.score = calculate_score(record, &state.weights);
            }
            state.aggregates = rebuild_aggregates(&state.records, &state.aggregates);
        }
    }
    state
}

/// Rebuilds every aggregate from the record set.
///
/// Grouping is by (instrument, strategy); output order is deterministic.
/// Annotations are not derivable from the records, so they carry over from
/// the previous aggregate with the same key.
pub fn rebuild_aggregates(
    records: &[BacktestRecord],
    previous: &[StrategyAggregate],
) -> Vec<StrategyAggregate> {
    let mut groups: BTreeMap<(String, String), Vec<&BacktestRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry((record.instrument_id.clone(), record.strategy.clone()))
            .or_default()
            .push(record);
    }

    groups
        .into_iter()
        .map(|((instrument_id, strategy), members)| {
            let id = format!("{instrument_id}-{strategy}");
            let scores: Vec<f64> = members.iter().map(|r| r.score).collect();
            let stats = aggregate_stats(&scores);
            let note = previous
                .iter()
                .find(|a| a.id == id)
                .and_then(|a| a.note.clone());
            StrategyAggregate {
                id,
                instrument_id,
                strategy,
                member_ids: members.iter().map(|r| r.id.clone()).collect(),
                average_score: stats.average_score,
                best_score: stats.best_score,
                total_backtests: stats.total_backtests,
                note,
            }
        })
        .collect()
}
