//! Request types for approval engine operations.

mod error;

pub use self::error::{
    CreateContractRequestError, RecordDocumentRequestError, RegisterUserRequestError,
    RequestError,
};

use core::num::NonZeroU32;

use std::collections::HashSet;

use approval_coordinator_domain::{
    ContractId, UserId,
    chain::{FeeAmount, Signature, TxHash, WalletAddress},
    contract::{ContractMode, ContractStatus},
    document::DocumentMeta,
    user::UserRole,
};
use approval_coordinator_store::ApproverInbox;
use bon::Builder;
use dissolve_derive::Dissolve;

/// Request to create a new contract and its pending approval rows.
///
/// # Validation
///
/// The request validates that:
/// - `title` is not blank
/// - `threshold` is at least one and doesn't exceed the number of approvers
/// - `approvers` is non-empty and lists each approver once
/// - a `fee` is only declared for an [`Onchain`](ContractMode::Onchain) contract
#[derive(Debug, Dissolve)]
pub struct CreateContractRequest {
    /// Short human-readable title
    title: String,

    /// Free-form description
    description: String,

    /// How approvals are corroborated
    mode: ContractMode,

    /// Minimum number of approvals required for completion
    threshold: NonZeroU32,

    /// The user creating the contract
    creator_id: UserId,

    /// Users whose approval is requested, in display order
    approvers: Vec<UserId>,

    /// The fee each approver pays on-chain
    fee: Option<FeeAmount>,
}

/// The evidence an approver submits along with an approval.
///
/// The variant must match the contract's [`ContractMode`].
#[derive(Debug, Clone)]
pub enum ApprovalProof {
    /// An approval on an off-chain contract; carries no evidence.
    Offchain,

    /// An approval on an on-chain contract.
    Onchain(OnchainApproval),
}

/// Evidence accompanying an approval on an on-chain contract.
#[derive(Debug, Clone, Builder, Dissolve)]
pub struct OnchainApproval {
    /// The approver's wallet signature over the approval message
    signature: Signature,

    /// The transaction recording the approval on-chain
    tx_hash: Option<TxHash>,

    /// The transaction that paid the contract's fee, when separate from `tx_hash`
    fee_payment_tx_hash: Option<TxHash>,
}

/// Request to approve a contract.
#[derive(Debug, Builder, Dissolve)]
pub struct SubmitApprovalRequest {
    /// The contract being approved
    contract_id: ContractId,

    /// The approver submitting the approval
    approver_id: UserId,

    /// Mode-specific evidence
    proof: ApprovalProof,
}

/// Request to reject a contract.
#[derive(Debug, Builder, Dissolve)]
pub struct RejectApprovalRequest {
    /// The contract being rejected
    contract_id: ContractId,

    /// The approver submitting the rejection
    approver_id: UserId,
}

/// Request to retrieve a contract with its approvals, documents and proofs.
#[derive(Debug, Builder, Dissolve)]
pub struct GetContractRequest {
    /// The contract to look up
    contract_id: ContractId,
}

/// Request to list contracts.
#[derive(Debug, Builder, Dissolve)]
pub struct ListContractsRequest {
    /// Optional status filter. If `None`, returns contracts of every status.
    status_filter: Option<ContractStatus>,
}

/// Request to list an approver's inbox.
#[derive(Debug, Builder, Dissolve)]
pub struct ListForApproverRequest {
    /// The approver whose inbox is listed
    approver_id: UserId,

    /// Which inbox to list
    inbox: ApproverInbox,
}

/// Request to attach document metadata to a contract.
///
/// The document content lives in an external blob store; only its metadata is recorded.
#[derive(Debug, Dissolve)]
pub struct RecordDocumentRequest {
    /// The contract the document belongs to
    contract_id: ContractId,

    /// The document metadata
    meta: DocumentMeta,
}

/// Request to register a new user.
///
/// The email is trimmed and lower-cased.
#[derive(Debug, Dissolve)]
pub struct RegisterUserRequest {
    /// Normalized email
    email: String,

    /// The name shown to other users
    display_name: String,

    /// The user's role
    role: UserRole,
}

/// Request to store the wallet a user connected.
#[derive(Debug, Builder, Dissolve)]
pub struct ConnectWalletRequest {
    /// The user connecting a wallet
    user_id: UserId,

    /// The connected wallet address
    wallet_address: WalletAddress,
}

/// Request to change a user's role. Only administrators may do this.
#[derive(Debug, Builder, Dissolve)]
pub struct UpdateUserRoleRequest {
    /// The user performing the change
    acting_user_id: UserId,

    /// The user whose role changes
    user_id: UserId,

    /// The new role
    role: UserRole,
}

/// Request to build the message an on-chain approver signs.
#[derive(Debug, Builder, Dissolve)]
pub struct ApprovalMessageRequest {
    /// The contract to build the message for
    contract_id: ContractId,
}

#[bon::bon]
impl CreateContractRequest {
    /// Creates a new contract creation request with validation.
    ///
    /// # Parameters
    ///
    /// * `title` - Contract title (must not be blank)
    /// * `description` - Contract description
    /// * `mode` - Approval mode, immutable once created
    /// * `threshold` - Number of approvals required (at least one, at most the approver count)
    /// * `creator_id` - The creating user
    /// * `approvers` - Distinct approver user ids
    /// * `fee` - Optional on-chain fee
    ///
    /// Returns an error if validation fails.
    #[builder]
    pub fn new(
        #[builder(into)] title: String,
        #[builder(into, default)] description: String,
        mode: ContractMode,
        threshold: u32,
        creator_id: UserId,
        approvers: Vec<UserId>,
        fee: Option<FeeAmount>,
    ) -> Result<Self, CreateContractRequestError> {
        let title = title.trim().to_owned();

        if title.is_empty() {
            return Err(CreateContractRequestError::BlankTitle);
        }

        let threshold = NonZeroU32::new(threshold).ok_or(CreateContractRequestError::ZeroThreshold)?;

        if approvers.is_empty() {
            return Err(CreateContractRequestError::EmptyApprovers);
        }

        let mut seen = HashSet::with_capacity(approvers.len());

        if !approvers.iter().all(|approver| seen.insert(approver)) {
            return Err(CreateContractRequestError::DuplicateApprover);
        }

        let threshold_usize = usize::try_from(threshold.get())
            .map_err(|e| CreateContractRequestError::other(e.to_string()))?;

        if threshold_usize > approvers.len() {
            return Err(CreateContractRequestError::ExcessThreshold);
        }

        if fee.is_some() && mode == ContractMode::Offchain {
            return Err(CreateContractRequestError::FeeOnOffchainContract);
        }

        Ok(Self { title, description, mode, threshold, creator_id, approvers, fee })
    }
}

#[bon::bon]
impl RecordDocumentRequest {
    /// Creates a new document registration request with validation.
    ///
    /// The file name, content hash and storage pointer must not be blank. The content hash is
    /// stored verbatim.
    #[builder]
    pub fn new(
        contract_id: ContractId,
        #[builder(into)] file_name: String,
        #[builder(into)] mime_type: String,
        size: u64,
        #[builder(into)] content_hash: String,
        #[builder(into)] storage_pointer: String,
        uploaded_by: UserId,
    ) -> Result<Self, RecordDocumentRequestError> {
        if file_name.trim().is_empty() {
            return Err(RecordDocumentRequestError::BlankFileName);
        }

        if content_hash.trim().is_empty() {
            return Err(RecordDocumentRequestError::BlankContentHash);
        }

        if storage_pointer.trim().is_empty() {
            return Err(RecordDocumentRequestError::BlankStoragePointer);
        }

        let meta = DocumentMeta::builder()
            .file_name(file_name)
            .mime_type(mime_type)
            .size(size)
            .content_hash(content_hash)
            .storage_pointer(storage_pointer)
            .uploaded_by(uploaded_by)
            .build();

        Ok(Self { contract_id, meta })
    }
}

#[bon::bon]
impl RegisterUserRequest {
    /// Creates a new user registration request with validation.
    ///
    /// The role defaults to [`UserRole::Member`].
    #[builder]
    pub fn new(
        #[builder(into)] email: String,
        #[builder(into)] display_name: String,
        #[builder(default = UserRole::Member)] role: UserRole,
    ) -> Result<Self, RegisterUserRequestError> {
        let email = email.trim().to_lowercase();

        let valid_email = email
            .split_once('@')
            .is_some_and(|(local, domain)| {
                !local.is_empty() && !domain.is_empty() && !domain.contains('@')
            })
            && !email.chars().any(char::is_whitespace);

        if !valid_email {
            return Err(RegisterUserRequestError::InvalidEmail);
        }

        let display_name = display_name.trim().to_owned();

        if display_name.is_empty() {
            return Err(RegisterUserRequestError::BlankDisplayName);
        }

        Ok(Self { email, display_name, role })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn user(n: u128) -> UserId {
        Uuid::from_u128(n).into()
    }

    fn create(
        threshold: u32,
        approvers: Vec<UserId>,
        mode: ContractMode,
        fee: Option<&str>,
    ) -> Result<CreateContractRequest, CreateContractRequestError> {
        CreateContractRequest::builder()
            .title("Partnership Agreement")
            .mode(mode)
            .threshold(threshold)
            .creator_id(user(1))
            .approvers(approvers)
            .maybe_fee(fee.map(|f| f.parse().unwrap()))
            .build()
    }

    #[test]
    fn valid_contract_request_keeps_approver_order() {
        let request =
            create(3, vec![user(4), user(2), user(3), user(5)], ContractMode::Offchain, None)
                .unwrap();

        let CreateContractRequestDissolved { threshold, approvers, description, .. } =
            request.dissolve();

        assert_eq!(threshold.get(), 3);
        assert_eq!(approvers, vec![user(4), user(2), user(3), user(5)]);
        assert!(description.is_empty());
    }

    #[test]
    fn zero_threshold_is_rejected() {
        assert_eq!(
            create(0, vec![user(2)], ContractMode::Offchain, None).unwrap_err(),
            CreateContractRequestError::ZeroThreshold
        );
    }

    #[test]
    fn threshold_above_approver_count_is_rejected() {
        assert_eq!(
            create(3, vec![user(2), user(3)], ContractMode::Offchain, None).unwrap_err(),
            CreateContractRequestError::ExcessThreshold
        );
    }

    #[test]
    fn empty_or_duplicate_approvers_are_rejected() {
        assert_eq!(
            create(1, vec![], ContractMode::Offchain, None).unwrap_err(),
            CreateContractRequestError::EmptyApprovers
        );
        assert_eq!(
            create(1, vec![user(2), user(2)], ContractMode::Offchain, None).unwrap_err(),
            CreateContractRequestError::DuplicateApprover
        );
    }

    #[test]
    fn blank_title_is_rejected() {
        let err = CreateContractRequest::builder()
            .title("   ")
            .mode(ContractMode::Offchain)
            .threshold(1)
            .creator_id(user(1))
            .approvers(vec![user(2)])
            .build()
            .unwrap_err();

        assert_eq!(err, CreateContractRequestError::BlankTitle);
    }

    #[test]
    fn fee_is_only_accepted_onchain() {
        assert_eq!(
            create(1, vec![user(2)], ContractMode::Offchain, Some("0.1")).unwrap_err(),
            CreateContractRequestError::FeeOnOffchainContract
        );
        assert!(create(1, vec![user(2)], ContractMode::Onchain, Some("0.1")).is_ok());
    }

    #[test]
    fn document_request_requires_hash_and_name() {
        let build = |file_name: &str, content_hash: &str| {
            RecordDocumentRequest::builder()
                .contract_id(Uuid::from_u128(9).into())
                .file_name(file_name)
                .mime_type("application/pdf")
                .size(1024)
                .content_hash(content_hash)
                .storage_pointer("contracts/9/1700000000000-agreement.pdf")
                .uploaded_by(user(1))
                .build()
        };

        assert_eq!(build("", "ab12").unwrap_err(), RecordDocumentRequestError::BlankFileName);
        assert_eq!(
            build("agreement.pdf", " ").unwrap_err(),
            RecordDocumentRequestError::BlankContentHash
        );

        let RecordDocumentRequestDissolved { meta, .. } =
            build("agreement.pdf", "ab12").unwrap().dissolve();
        assert_eq!(meta.content_hash(), "ab12");
        assert_eq!(meta.size(), 1024);
    }

    #[test]
    fn email_is_normalized() {
        let request = RegisterUserRequest::builder()
            .email("  Alice@Example.COM ")
            .display_name("Alice")
            .build()
            .unwrap();

        let RegisterUserRequestDissolved { email, role, .. } = request.dissolve();

        assert_eq!(email, "alice@example.com");
        assert_eq!(role, UserRole::Member);
    }

    #[test]
    fn malformed_email_is_rejected() {
        for email in ["alice", "@example.com", "alice@", "a b@example.com", "a@b@c"] {
            let err = RegisterUserRequest::builder()
                .email(email)
                .display_name("Alice")
                .build()
                .unwrap_err();

            assert_eq!(err, RegisterUserRequestError::InvalidEmail, "{email}");
        }
    }
}
