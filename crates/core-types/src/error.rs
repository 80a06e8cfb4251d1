use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The one hard ingestion failure: the report yielded no usable data at
    /// all (no ledger rows and a zero self-reported final balance).
    #[error("insufficient data extracted from the report")]
    InsufficientData,

    #[error("strategy name must not be empty")]
    EmptyStrategyName,
}

pub type Result<T> = std::result::Result<T, Error>;
