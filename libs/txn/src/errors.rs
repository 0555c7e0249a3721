// [libs/txn/src/errors.rs]
#[derive(thiserror::Error, Debug)]
pub enum TxnError {
    #[error("Already in transaction")]
    AlreadyInTransaction,

    #[error("No transaction in progress")]
    NoTransactionInProgress,

    /// `keys` is already sorted and formatted for display (a comma-joined
    /// list) by the time this variant is constructed.
    #[error("Atomicity failure ({keys})")]
    AtomicityFailure { keys: String },

    #[error("engine failure: {0}")]
    Engine(#[from] cube_engine::EngineError),
}
