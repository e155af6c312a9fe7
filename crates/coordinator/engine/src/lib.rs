//! The approval engine: the action interface of the contract approval coordinator.
//!
//! [`ApprovalEngine`] validates requests against each contract's mode policy and drives the
//! store's transactional approval protocol. Every operation takes a validated request type
//! and returns a typed response or an [`ApprovalEngineError`].

#![allow(missing_docs)]

mod error;
mod policy;
mod types;

pub use self::{
    error::{ApprovalEngineError, ApprovalEngineErrorKind},
    types::{request, response},
};

pub use approval_coordinator_store::ApproverInbox;

use approval_coordinator_domain::{
    ContractId, UserId,
    approval::ApprovalStatus,
    contract::{Contract, ContractStatus},
};
use approval_coordinator_store::ApprovalStore;
use uuid::Uuid;

use self::types::{
    request::{
        ApprovalMessageRequest, ApprovalMessageRequestDissolved, ConnectWalletRequest,
        ConnectWalletRequestDissolved, CreateContractRequest, CreateContractRequestDissolved,
        GetContractRequest, GetContractRequestDissolved, ListContractsRequest,
        ListContractsRequestDissolved, ListForApproverRequest, ListForApproverRequestDissolved,
        RecordDocumentRequest, RecordDocumentRequestDissolved, RegisterUserRequest,
        RegisterUserRequestDissolved, RejectApprovalRequest, RejectApprovalRequestDissolved,
        SubmitApprovalRequest, SubmitApprovalRequestDissolved, UpdateUserRoleRequest,
        UpdateUserRoleRequestDissolved,
    },
    response::{
        ApprovalMessageResponse, CreateContractResponse, GetContractResponse,
        ListContractsResponse, ListUsersResponse, RecordDocumentResponse, RejectApprovalResponse,
        SubmitApprovalResponse, UserResponse,
    },
};

type Result<T, E = ApprovalEngineError> = core::result::Result<T, E>;

pub struct ApprovalEngine {
    store: ApprovalStore,
    network: String,
}

impl ApprovalEngine {
    /// Creates an engine over `store`. `network` labels every blockchain proof it records.
    pub fn new<N>(store: ApprovalStore, network: N) -> Self
    where
        String: From<N>,
    {
        Self { store, network: network.into() }
    }

    pub fn network(&self) -> &str {
        &self.network
    }
}

// CONTRACT REGISTRY
// ================================================================================================

impl ApprovalEngine {
    #[tracing::instrument(skip_all)]
    pub async fn create_contract(
        &self,
        request: CreateContractRequest,
    ) -> Result<CreateContractResponse> {
        let CreateContractRequestDissolved {
            title,
            description,
            mode,
            threshold,
            creator_id,
            approvers,
            fee,
        } = request.dissolve();

        let contract = Contract::builder()
            .id(Uuid::new_v4().into())
            .title(title)
            .description(description)
            .mode(mode)
            .threshold(threshold)
            .status(ContractStatus::Pending)
            .creator_id(creator_id)
            .maybe_fee(fee)
            .aux(())
            .build()
            .with_approvers(approvers)
            .ok_or(ApprovalEngineErrorKind::validation("threshold exceeds number of approvers"))?;

        let contract = self.store.create_contract(contract).await?;

        tracing::info!(
            contract_id = %contract.contract().id(),
            approvals = contract.approvals().len(),
            "contract created",
        );

        Ok(CreateContractResponse::builder().contract(contract).build())
    }

    #[tracing::instrument(skip_all)]
    pub async fn get_contract(&self, request: GetContractRequest) -> Result<GetContractResponse> {
        let GetContractRequestDissolved { contract_id } = request.dissolve();

        let contract = self.store.get_contract_details(contract_id).await?;

        Ok(GetContractResponse::builder().maybe_contract(contract).build())
    }

    #[tracing::instrument(skip_all)]
    pub async fn list_contracts(
        &self,
        request: ListContractsRequest,
    ) -> Result<ListContractsResponse> {
        let ListContractsRequestDissolved { status_filter } = request.dissolve();

        let contracts = self.store.list_contracts(status_filter).await?;

        Ok(ListContractsResponse::builder().contracts(contracts).build())
    }

    #[tracing::instrument(skip_all)]
    pub async fn list_for_approver(
        &self,
        request: ListForApproverRequest,
    ) -> Result<ListContractsResponse> {
        let ListForApproverRequestDissolved { approver_id, inbox } = request.dissolve();

        let contracts = self.store.list_contracts_for_approver(approver_id, inbox).await?;

        Ok(ListContractsResponse::builder().contracts(contracts).build())
    }
}

// APPROVALS
// ================================================================================================

impl ApprovalEngine {
    /// Approves a contract on behalf of one approver.
    ///
    /// The approver's row and the contract status are checked first, then the proof is
    /// checked against the contract's mode, all before anything is written. The approval, the
    /// threshold evaluation, the possible completion of the contract and the blockchain proofs
    /// then commit together or not at all.
    ///
    /// # Errors
    ///
    /// - [`ApprovalEngineErrorKind::DuplicateOrUnknownApprover`] if the approver has no pending
    ///   row on the contract or the contract doesn't exist
    /// - [`ApprovalEngineErrorKind::ContractAlreadyFinalized`] if the contract is no longer
    ///   pending
    /// - [`ApprovalEngineErrorKind::Validation`] if the proof doesn't fit the contract's mode
    /// - [`ApprovalEngineErrorKind::Persistence`] if the store fails
    #[tracing::instrument(skip_all)]
    pub async fn submit_approval(
        &self,
        request: SubmitApprovalRequest,
    ) -> Result<SubmitApprovalResponse> {
        let SubmitApprovalRequestDissolved { contract_id, approver_id, proof } = request.dissolve();

        let contract = self
            .open_contract_for(contract_id, approver_id)
            .await
            .inspect_err(|err| tracing::warn!(%contract_id, %approver_id, %err, "approval refused"))?;

        let evidence = policy::evidence_for(&contract, proof, &self.network)?;

        let outcome = self
            .store
            .approve(contract_id, approver_id, &evidence)
            .await
            .inspect_err(|err| tracing::warn!(%contract_id, %approver_id, %err, "approval refused"))?;

        let approved_count = outcome.approved_count();
        let finalized = outcome.finalized();
        let contract = outcome.dissolve().details;

        tracing::info!(%contract_id, %approver_id, approved_count, finalized, "approval recorded");

        Ok(SubmitApprovalResponse::builder()
            .contract(contract)
            .approved_count(approved_count)
            .finalized(finalized)
            .build())
    }

    /// Rejects a contract on behalf of one approver.
    ///
    /// Only the approver's row moves to rejected; the contract stays pending.
    ///
    /// # Errors
    ///
    /// Same as [`submit_approval`](Self::submit_approval), without the mode check.
    #[tracing::instrument(skip_all)]
    pub async fn reject_approval(
        &self,
        request: RejectApprovalRequest,
    ) -> Result<RejectApprovalResponse> {
        let RejectApprovalRequestDissolved { contract_id, approver_id } = request.dissolve();

        let contract = self
            .store
            .reject(contract_id, approver_id)
            .await
            .inspect_err(|err| tracing::warn!(%contract_id, %approver_id, %err, "rejection refused"))?;

        tracing::info!(%contract_id, %approver_id, "rejection recorded");

        Ok(RejectApprovalResponse::builder().contract(contract).build())
    }

    /// Returns the contract if `approver_id` still has an open vote on it and it is pending.
    ///
    /// The store repeats both checks under the contract lock; this early pass only makes sure
    /// a closed vote is reported as such rather than as a proof mismatch.
    async fn open_contract_for(
        &self,
        contract_id: ContractId,
        approver_id: UserId,
    ) -> Result<Contract> {
        let contract = self
            .store
            .get_contract(contract_id)
            .await?
            .ok_or(ApprovalEngineErrorKind::DuplicateOrUnknownApprover)?;

        let open_vote = self
            .store
            .get_approval(contract_id, approver_id)
            .await?
            .is_some_and(|approval| approval.status().can_transition_to(ApprovalStatus::Approved));

        if !open_vote {
            return Err(ApprovalEngineErrorKind::DuplicateOrUnknownApprover.into());
        }

        if contract.status().is_terminal() {
            return Err(ApprovalEngineErrorKind::ContractAlreadyFinalized.into());
        }

        Ok(contract)
    }

    /// Builds the message an on-chain approver signs for a contract, bound to its latest
    /// document.
    #[tracing::instrument(skip_all)]
    pub async fn approval_message(
        &self,
        request: ApprovalMessageRequest,
    ) -> Result<ApprovalMessageResponse> {
        let ApprovalMessageRequestDissolved { contract_id } = request.dissolve();

        let contract = self
            .store
            .get_contract(contract_id)
            .await?
            .ok_or(ApprovalEngineErrorKind::not_found("contract not found"))?;

        let document = self.store.get_latest_document(contract_id).await?;
        let document_hash = document.as_ref().map(|d| d.meta().content_hash());

        let message =
            approval_coordinator_utils::approval_message(contract_id, contract.title(), document_hash);

        let digest = approval_coordinator_utils::approval_message_digest(
            contract_id,
            contract.title(),
            document_hash,
        );

        Ok(ApprovalMessageResponse::builder().message(message).digest(digest).build())
    }
}

// DOCUMENTS
// ================================================================================================

impl ApprovalEngine {
    #[tracing::instrument(skip_all)]
    pub async fn record_document(
        &self,
        request: RecordDocumentRequest,
    ) -> Result<RecordDocumentResponse> {
        let RecordDocumentRequestDissolved { contract_id, meta } = request.dissolve();

        let document = self.store.record_document(contract_id, &meta).await?;

        tracing::info!(%contract_id, document_id = %document.id(), "document recorded");

        Ok(RecordDocumentResponse::builder().document(document).build())
    }
}

// USERS
// ================================================================================================

impl ApprovalEngine {
    #[tracing::instrument(skip_all)]
    pub async fn register_user(&self, request: RegisterUserRequest) -> Result<UserResponse> {
        let RegisterUserRequestDissolved { email, display_name, role } = request.dissolve();

        let user = self.store.register_user(&email, &display_name, role).await?;

        tracing::info!(user_id = %user.id(), %role, "user registered");

        Ok(UserResponse::builder().user(user).build())
    }

    #[tracing::instrument(skip_all)]
    pub async fn list_users(&self) -> Result<ListUsersResponse> {
        let users = self.store.list_users().await?;

        Ok(ListUsersResponse::builder().users(users).build())
    }

    #[tracing::instrument(skip_all)]
    pub async fn connect_wallet(&self, request: ConnectWalletRequest) -> Result<UserResponse> {
        let ConnectWalletRequestDissolved { user_id, wallet_address } = request.dissolve();

        let user = self
            .store
            .update_user_wallet(user_id, &wallet_address)
            .await?
            .ok_or(ApprovalEngineErrorKind::not_found("user not found"))?;

        Ok(UserResponse::builder().user(user).build())
    }

    /// Changes a user's role.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalEngineErrorKind::Unauthorized`] unless the acting user is an
    /// administrator, and [`ApprovalEngineErrorKind::NotFound`] if the target user doesn't
    /// exist.
    #[tracing::instrument(skip_all)]
    pub async fn update_user_role(&self, request: UpdateUserRoleRequest) -> Result<UserResponse> {
        let UpdateUserRoleRequestDissolved { acting_user_id, user_id, role } = request.dissolve();

        let acting_user = self
            .store
            .get_user(acting_user_id)
            .await?
            .ok_or(ApprovalEngineErrorKind::unauthorized("unknown acting user"))?;

        if !acting_user.is_admin() {
            tracing::warn!(%acting_user_id, %user_id, "role change refused");
            return Err(ApprovalEngineErrorKind::unauthorized("only admins may change roles").into());
        }

        let user = self
            .store
            .update_user_role(user_id, role)
            .await?
            .ok_or(ApprovalEngineErrorKind::not_found("user not found"))?;

        tracing::info!(%acting_user_id, %user_id, %role, "user role changed");

        Ok(UserResponse::builder().user(user).build())
    }
}
