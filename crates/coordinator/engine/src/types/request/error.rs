use std::borrow::Cow;

/// Top-level error for request validation.
///
/// This enum wraps all possible request validation errors.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// Error creating a contract creation request.
    #[error("create contract error: {0}")]
    CreateContract(#[from] CreateContractRequestError),

    /// Error creating a document registration request.
    #[error("record document error: {0}")]
    RecordDocument(#[from] RecordDocumentRequestError),

    /// Error creating a user registration request.
    #[error("register user error: {0}")]
    RegisterUser(#[from] RegisterUserRequestError),
}

/// Errors that can occur when validating a contract creation request.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CreateContractRequestError {
    /// The title is empty or whitespace only
    #[error("blank title error")]
    BlankTitle,

    /// The threshold is zero
    #[error("zero threshold error: at least one approval is required")]
    ZeroThreshold,

    /// The approvers list is empty
    #[error("empty approvers error")]
    EmptyApprovers,

    /// The same approver is listed more than once
    #[error("duplicate approver error")]
    DuplicateApprover,

    /// The threshold exceeds the number of approvers
    #[error("excess threshold error: threshold exceeds number of approvers")]
    ExcessThreshold,

    /// A fee was declared for an off-chain contract
    #[error("fee error: only onchain contracts may declare a fee")]
    FeeOnOffchainContract,

    /// Other validation error
    #[error("other error: {0}")]
    Other(Cow<'static, str>),
}

impl CreateContractRequestError {
    pub(crate) fn other<E>(err: E) -> Self
    where
        Cow<'static, str>: From<E>,
    {
        Self::Other(err.into())
    }
}

/// Errors that can occur when validating a document registration request.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RecordDocumentRequestError {
    /// The file name is empty or whitespace only
    #[error("blank file name error")]
    BlankFileName,

    /// The content hash is empty or whitespace only
    #[error("blank content hash error")]
    BlankContentHash,

    /// The storage pointer is empty or whitespace only
    #[error("blank storage pointer error")]
    BlankStoragePointer,
}

/// Errors that can occur when validating a user registration request.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegisterUserRequestError {
    /// The email is not of the form `local@domain`
    #[error("invalid email error")]
    InvalidEmail,

    /// The display name is empty or whitespace only
    #[error("blank display name error")]
    BlankDisplayName,
}
