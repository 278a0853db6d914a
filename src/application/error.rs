use thiserror::Error;

use crate::domain::LedgerError;

#[derive(Error, Debug)]
pub enum AppError {
    /// Business-rule rejection from the ledger: recoverable, reported to the
    /// operator, the offending operation is a no-op.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Snapshot could not be loaded at startup. Fatal: the in-memory store
    /// must never start half-populated.
    #[error("failed to load customer snapshot: {0:#}")]
    LoadFailed(#[source] anyhow::Error),

    /// Snapshot could not be written. The session still terminates, but the
    /// operator is told their data may not have been persisted.
    #[error("failed to save customer snapshot: {0:#}")]
    SaveFailed(#[source] anyhow::Error),
}
