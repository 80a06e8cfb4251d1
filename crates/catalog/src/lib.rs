//! Catalogue state and its transitions.
//!
//! The whole collection lives in one [`CatalogState`] value and every
//! mutation goes through the pure [`apply`] function, so the transition
//! logic is testable in isolation and persistence stays a thin wrapper
//! around serializing the full state. Strategy aggregates are a derived
//! view: they are rebuilt from scratch on every change to the record set,
//! never patched incrementally.

pub mod actions;
pub mod reducer;
pub mod state;

pub use actions::Action;
pub use reducer::apply;
pub use state::CatalogState;
