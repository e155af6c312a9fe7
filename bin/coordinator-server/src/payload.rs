pub mod request;
pub mod response;

use core::num::NonZeroU32;

use approval_coordinator_domain::{
    approval::{Approval, ApprovalDissolved, ApprovalStatus},
    contract::{ContractDetails, ContractDetailsDissolved, ContractMode, ContractStatus},
    document::{Document, DocumentDissolved, DocumentMetaDissolved},
    proof::{BlockchainProof, BlockchainProofDissolved},
    user::{User, UserDissolved, UserRole},
};
use bon::Builder;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_with::DisplayFromStr;
use uuid::Uuid;

#[serde_with::serde_as]
#[derive(Debug, Builder, Serialize)]
pub struct UserPayload {
    id: Uuid,
    email: String,
    display_name: String,

    #[serde_as(as = "DisplayFromStr")]
    role: UserRole,

    #[serde(skip_serializing_if = "Option::is_none")]
    wallet_address: Option<String>,

    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[serde_with::serde_as]
#[derive(Debug, Builder, Serialize)]
pub struct ContractPayload {
    id: Uuid,
    title: String,
    description: String,

    #[serde_as(as = "DisplayFromStr")]
    mode: ContractMode,

    threshold: NonZeroU32,

    #[serde_as(as = "DisplayFromStr")]
    status: ContractStatus,

    creator: UserPayload,

    #[serde(skip_serializing_if = "Option::is_none")]
    fee: Option<String>,

    approved_count: usize,
    approvals: Vec<ApprovalPayload>,
    documents: Vec<DocumentPayload>,
    proofs: Vec<ProofPayload>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[serde_with::serde_as]
#[derive(Debug, Builder, Serialize)]
pub struct ApprovalPayload {
    id: Uuid,
    approver: UserPayload,

    #[serde_as(as = "DisplayFromStr")]
    status: ApprovalStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    approved_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    signature: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    tx_hash: Option<String>,

    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Builder, Serialize)]
pub struct DocumentPayload {
    id: Uuid,
    contract_id: Uuid,
    file_name: String,
    mime_type: String,
    size: u64,
    content_hash: String,
    storage_pointer: String,
    uploaded_by: Uuid,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Builder, Serialize)]
pub struct ProofPayload {
    id: Uuid,
    tx_hash: String,
    network: String,
    proven_at: DateTime<Utc>,
}

impl From<User> for UserPayload {
    fn from(user: User) -> Self {
        let UserDissolved {
            id,
            email,
            display_name,
            role,
            wallet_address,
            aux,
        } = user.dissolve();

        Self::builder()
            .id(id.into())
            .email(email)
            .display_name(display_name)
            .role(role)
            .maybe_wallet_address(wallet_address.map(|w| w.to_string()))
            .created_at(aux.created_at())
            .updated_at(aux.updated_at())
            .build()
    }
}

impl From<ContractDetails> for ContractPayload {
    fn from(details: ContractDetails) -> Self {
        let approved_count = details.approved_count();

        let ContractDetailsDissolved {
            contract,
            creator,
            approvals,
            documents,
            proofs,
        } = details.dissolve();

        Self::builder()
            .id(contract.id().into())
            .title(contract.title().to_owned())
            .description(contract.description().to_owned())
            .mode(contract.mode())
            .threshold(contract.threshold())
            .status(contract.status())
            .creator(creator.into())
            .maybe_fee(contract.fee().map(ToString::to_string))
            .approved_count(approved_count)
            .approvals(approvals.into_iter().map(From::from).collect())
            .documents(documents.into_iter().map(From::from).collect())
            .proofs(proofs.into_iter().map(From::from).collect())
            .created_at(contract.aux().created_at())
            .updated_at(contract.aux().updated_at())
            .build()
    }
}

impl From<Approval> for ApprovalPayload {
    fn from(approval: Approval) -> Self {
        let ApprovalDissolved {
            id,
            approver,
            status,
            approved_at,
            signature,
            tx_hash,
            aux,
            ..
        } = approval.dissolve();

        Self::builder()
            .id(id.into())
            .approver(approver.into())
            .status(status)
            .maybe_approved_at(approved_at)
            .maybe_signature(signature.map(|s| s.to_string()))
            .maybe_tx_hash(tx_hash.map(|h| h.to_string()))
            .created_at(aux.created_at())
            .updated_at(aux.updated_at())
            .build()
    }
}

impl From<Document> for DocumentPayload {
    fn from(document: Document) -> Self {
        let DocumentDissolved { id, contract_id, meta, created_at } = document.dissolve();

        let DocumentMetaDissolved {
            file_name,
            mime_type,
            size,
            content_hash,
            storage_pointer,
            uploaded_by,
        } = meta.dissolve();

        Self::builder()
            .id(id.into())
            .contract_id(contract_id.into())
            .file_name(file_name)
            .mime_type(mime_type)
            .size(size)
            .content_hash(content_hash)
            .storage_pointer(storage_pointer)
            .uploaded_by(uploaded_by.into())
            .created_at(created_at)
            .build()
    }
}

impl From<BlockchainProof> for ProofPayload {
    fn from(proof: BlockchainProof) -> Self {
        let BlockchainProofDissolved { id, tx_hash, network, proven_at, .. } = proof.dissolve();

        Self::builder()
            .id(id.into())
            .tx_hash(tx_hash.to_string())
            .network(network)
            .proven_at(proven_at)
            .build()
    }
}
