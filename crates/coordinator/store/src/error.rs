use std::borrow::Cow;

use crate::persistence::store::StoreError;

pub type Result<T, E = ApprovalStoreError> = core::result::Result<T, E>;

/// Errors that can occur when interacting with the store
#[derive(Debug, thiserror::Error)]
pub enum ApprovalStoreError {
    /// A database-level error occurred.
    ///
    /// This wraps errors from the underlying persistence layer, including
    /// connection issues, query failures, and transaction errors.
    #[error("database error: {0}")]
    Store(StoreError),

    /// A validation error occurred while processing input data.
    ///
    /// This is returned when data references rows that do not exist, such as
    /// unknown approvers or an unknown contract creator.
    #[error("validation error: {0}")]
    Validation(Cow<'static, str>),

    /// The requested resource was not found in the database.
    #[error("not found error: {0}")]
    NotFound(Cow<'static, str>),

    /// There is no pending approval row for the approver on the contract.
    ///
    /// Covers a second decision by the same approver, an approver that was never
    /// assigned, and a contract that does not exist.
    #[error("approver already decided or is not an approver of the contract")]
    DuplicateOrUnknownApprover,

    /// The contract already reached a terminal status.
    #[error("contract is already finalized")]
    ContractAlreadyFinalized,

    /// A uniqueness constraint was violated.
    #[error("conflict error: {0}")]
    Conflict(Cow<'static, str>),

    /// Failed to acquire a database connection from the pool.
    ///
    /// This typically indicates the connection pool is exhausted or
    /// the database is unavailable.
    #[error("pool error")]
    Pool,

    /// An invalid value was encountered during processing.
    ///
    /// This is returned when data retrieved from the database cannot be
    /// converted to the expected type or format.
    #[error("invalid value error")]
    InvalidValue,

    /// An unclassified error occurred.
    #[error("other error: {0}")]
    Other(Cow<'static, str>),
}

impl ApprovalStoreError {
    pub(crate) fn other<E>(err: E) -> Self
    where
        Cow<'static, str>: From<E>,
    {
        Self::Other(From::from(err))
    }
}

impl From<StoreError> for ApprovalStoreError {
    fn from(err: StoreError) -> Self {
        if err.is_unique_violation() {
            return Self::Conflict(err.to_string().into());
        }

        Self::Store(err)
    }
}

impl From<diesel::result::Error> for ApprovalStoreError {
    fn from(err: diesel::result::Error) -> Self {
        StoreError::from(err).into()
    }
}
