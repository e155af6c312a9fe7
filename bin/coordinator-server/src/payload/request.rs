use dissolve_derive::Dissolve;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Dissolve, Deserialize)]
pub struct CreateContractRequestPayload {
    title: String,

    #[serde(default)]
    description: String,

    mode: String,
    threshold: u32,
    creator_id: Uuid,
    approver_ids: Vec<Uuid>,
    fee: Option<String>,
}

#[derive(Debug, Dissolve, Deserialize)]
pub struct GetContractRequestPayload {
    contract_id: Uuid,
}

#[derive(Debug, Dissolve, Deserialize)]
pub struct ListContractsRequestPayload {
    status_filter: Option<String>,
}

/// An approval; on-chain contracts take a signature and the transaction hashes, off-chain
/// contracts take none of them.
#[derive(Debug, Dissolve, Deserialize)]
pub struct SubmitApprovalRequestPayload {
    contract_id: Uuid,
    approver_id: Uuid,
    signature: Option<String>,
    tx_hash: Option<String>,
    fee_payment_tx_hash: Option<String>,
}

#[derive(Debug, Dissolve, Deserialize)]
pub struct RejectApprovalRequestPayload {
    contract_id: Uuid,
    approver_id: Uuid,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InboxPayload {
    Pending,
    History,
}

#[derive(Debug, Dissolve, Deserialize)]
pub struct ListForApproverRequestPayload {
    approver_id: Uuid,
    inbox: InboxPayload,
}

#[derive(Debug, Dissolve, Deserialize)]
pub struct RecordDocumentRequestPayload {
    contract_id: Uuid,
    file_name: String,
    mime_type: String,
    size: u64,
    content_hash: String,
    storage_pointer: String,
    uploaded_by: Uuid,
}

#[derive(Debug, Dissolve, Deserialize)]
pub struct RegisterUserRequestPayload {
    email: String,
    display_name: String,
    role: Option<String>,
}

#[derive(Debug, Dissolve, Deserialize)]
pub struct ConnectWalletRequestPayload {
    user_id: Uuid,
    wallet_address: String,
}

#[derive(Debug, Dissolve, Deserialize)]
pub struct UpdateUserRoleRequestPayload {
    acting_user_id: Uuid,
    user_id: Uuid,
    role: String,
}

#[derive(Debug, Dissolve, Deserialize)]
pub struct ApprovalMessageRequestPayload {
    contract_id: Uuid,
}
