//! Response types for approval engine operations.

use approval_coordinator_domain::{
    contract::ContractDetails,
    document::Document,
    user::User,
};
use dissolve_derive::Dissolve;

/// Response from creating a contract.
#[derive(Debug, Dissolve)]
pub struct CreateContractResponse {
    /// The created contract with its pending approvals
    contract: ContractDetails,
}

/// Response from submitting an approval.
#[derive(Debug, Dissolve)]
pub struct SubmitApprovalResponse {
    /// The contract snapshot after the approval committed
    contract: ContractDetails,

    /// The approved count the finalization decision was based on
    approved_count: u64,

    /// Whether this approval completed the contract
    finalized: bool,
}

/// Response from rejecting a contract.
#[derive(Debug, Dissolve)]
pub struct RejectApprovalResponse {
    /// The contract snapshot after the rejection committed
    contract: ContractDetails,
}

/// Response from retrieving a contract.
#[derive(Debug, Dissolve)]
pub struct GetContractResponse {
    /// The contract if found, `None` otherwise
    contract: Option<ContractDetails>,
}

/// Response from listing contracts.
#[derive(Debug, Dissolve)]
pub struct ListContractsResponse {
    /// Contracts matching the query criteria
    contracts: Vec<ContractDetails>,
}

/// Response from attaching a document.
#[derive(Debug, Dissolve)]
pub struct RecordDocumentResponse {
    /// The recorded document
    document: Document,
}

/// Response from a user operation.
#[derive(Debug, Dissolve)]
pub struct UserResponse {
    /// The registered or updated user
    user: User,
}

/// Response from listing users.
#[derive(Debug, Dissolve)]
pub struct ListUsersResponse {
    /// All users, newest first
    users: Vec<User>,
}

/// Response carrying the message an on-chain approver signs.
#[derive(Debug, Dissolve)]
pub struct ApprovalMessageResponse {
    /// The plain-text approval message
    message: String,

    /// The `0x`-prefixed EIP-191 digest of `message`
    digest: String,
}

#[bon::bon]
impl CreateContractResponse {
    #[builder]
    pub(crate) fn new(contract: ContractDetails) -> Self {
        Self { contract }
    }
}

#[bon::bon]
impl SubmitApprovalResponse {
    #[builder]
    pub(crate) fn new(contract: ContractDetails, approved_count: u64, finalized: bool) -> Self {
        Self { contract, approved_count, finalized }
    }
}

#[bon::bon]
impl RejectApprovalResponse {
    #[builder]
    pub(crate) fn new(contract: ContractDetails) -> Self {
        Self { contract }
    }
}

#[bon::bon]
impl GetContractResponse {
    #[builder]
    pub(crate) fn new(contract: Option<ContractDetails>) -> Self {
        Self { contract }
    }
}

#[bon::bon]
impl ListContractsResponse {
    #[builder]
    pub(crate) fn new(contracts: Vec<ContractDetails>) -> Self {
        Self { contracts }
    }
}

#[bon::bon]
impl RecordDocumentResponse {
    #[builder]
    pub(crate) fn new(document: Document) -> Self {
        Self { document }
    }
}

#[bon::bon]
impl UserResponse {
    #[builder]
    pub(crate) fn new(user: User) -> Self {
        Self { user }
    }
}

#[bon::bon]
impl ListUsersResponse {
    #[builder]
    pub(crate) fn new(users: Vec<User>) -> Self {
        Self { users }
    }
}

#[bon::bon]
impl ApprovalMessageResponse {
    #[builder]
    pub(crate) fn new(message: String, digest: String) -> Self {
        Self { message, digest }
    }
}
