use bon::Builder;
use serde::Serialize;

use crate::payload::{ContractPayload, DocumentPayload, UserPayload};

#[derive(Debug, Builder, Serialize)]
pub struct ContractResponsePayload {
    contract: ContractPayload,
}

#[derive(Debug, Builder, Serialize)]
pub struct SubmitApprovalResponsePayload {
    contract: ContractPayload,
    approved_count: u64,
    finalized: bool,
}

#[derive(Debug, Builder, Serialize)]
pub struct ListContractsResponsePayload {
    contracts: Vec<ContractPayload>,
}

#[derive(Debug, Builder, Serialize)]
pub struct RecordDocumentResponsePayload {
    document: DocumentPayload,
}

#[derive(Debug, Builder, Serialize)]
pub struct UserResponsePayload {
    user: UserPayload,
}

#[derive(Debug, Builder, Serialize)]
pub struct ListUsersResponsePayload {
    users: Vec<UserPayload>,
}

#[derive(Debug, Builder, Serialize)]
pub struct ApprovalMessageResponsePayload {
    message: String,
    digest: String,
}
