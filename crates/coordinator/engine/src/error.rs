use std::borrow::Cow;

use approval_coordinator_store::ApprovalStoreError;

/// Error returned by every [`ApprovalEngine`](crate::ApprovalEngine) operation.
#[derive(Debug, thiserror::Error)]
#[error("approval engine error: {0}")]
pub struct ApprovalEngineError(#[from] ApprovalEngineErrorKind);

impl ApprovalEngineError {
    /// Returns the kind of failure.
    pub fn kind(&self) -> &ApprovalEngineErrorKind {
        &self.0
    }
}

/// The kinds of failure an engine operation can report.
#[derive(Debug, thiserror::Error)]
pub enum ApprovalEngineErrorKind {
    /// The request violates the contract's mode policy or references invalid rows.
    /// Nothing was mutated.
    #[error("validation error: {0}")]
    Validation(Cow<'static, str>),

    /// The approver has no pending row on the contract, or the contract doesn't exist.
    #[error("duplicate or unknown approver")]
    DuplicateOrUnknownApprover,

    /// The contract is already completed or rejected.
    #[error("contract already finalized")]
    ContractAlreadyFinalized,

    /// The referenced entity doesn't exist.
    #[error("not found error: {0}")]
    NotFound(Cow<'static, str>),

    /// The acting user may not perform the operation.
    #[error("unauthorized error: {0}")]
    Unauthorized(Cow<'static, str>),

    /// The operation collides with existing data.
    #[error("conflict error: {0}")]
    Conflict(Cow<'static, str>),

    /// The store failed; the operation had no effect and may be retried.
    #[error("persistence error: {0}")]
    Persistence(ApprovalStoreError),
}

impl ApprovalEngineErrorKind {
    pub(crate) fn validation<E>(err: E) -> Self
    where
        Cow<'static, str>: From<E>,
    {
        Self::Validation(err.into())
    }

    pub(crate) fn not_found<E>(err: E) -> Self
    where
        Cow<'static, str>: From<E>,
    {
        Self::NotFound(err.into())
    }

    pub(crate) fn unauthorized<E>(err: E) -> Self
    where
        Cow<'static, str>: From<E>,
    {
        Self::Unauthorized(err.into())
    }
}

impl From<ApprovalStoreError> for ApprovalEngineErrorKind {
    fn from(err: ApprovalStoreError) -> Self {
        match err {
            ApprovalStoreError::DuplicateOrUnknownApprover => Self::DuplicateOrUnknownApprover,
            ApprovalStoreError::ContractAlreadyFinalized => Self::ContractAlreadyFinalized,
            ApprovalStoreError::Validation(msg) => Self::Validation(msg),
            ApprovalStoreError::NotFound(msg) => Self::NotFound(msg),
            ApprovalStoreError::Conflict(msg) => Self::Conflict(msg),
            err => Self::Persistence(err),
        }
    }
}

impl From<ApprovalStoreError> for ApprovalEngineError {
    fn from(err: ApprovalStoreError) -> Self {
        Self(err.into())
    }
}
