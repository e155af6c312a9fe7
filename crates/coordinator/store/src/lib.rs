//! Persistence layer for the contract approval coordinator.
//!
//! This crate provides database storage and retrieval operations for users, contracts, the
//! per-approver approval ledger, attached documents and blockchain proofs. It acts as the data
//! access layer for the coordinator, handling all interactions with the PostgreSQL database.
//!
//! # Architecture
//!
//! The store is built on top of [diesel](diesel.rs) with async PostgreSQL support, providing:
//! - Connection pooling via [deadpool](docs.rs/deadpool) for efficient resource management
//! - Transaction support for atomic operations
//! - Type-safe database queries and conversions
//!
//! Approval decisions run inside a single read-committed transaction that locks the contract
//! row first, so concurrent decisions on one contract are serialized and every approved count
//! observes all committed predecessors.
//!
//! # Main Components
//!
//! - [`ApprovalStore`] - The primary interface for database operations
//! - [`DbPool`] - Connection pool type for managing database connections
//! - [`DbConn`] - Individual database connection from the pool
//! - [`ApprovalStoreError`] - Error types for store operations
//!
//! # Usage
//!
//! ```ignore
//! // Establish a connection pool
//! let pool = establish_pool(database_url, max_connections).await?;
//!
//! // Create the store
//! let store = ApprovalStore::new(pool);
//!
//! // Store operations
//! let details = store.get_contract_details(contract_id).await?;
//! let outcome = store.approve(contract_id, approver_id, &evidence).await?;
//! ```

mod error;
mod persistence;
mod types;

pub use self::{
    error::ApprovalStoreError,
    persistence::pool::{DbConn, DbPool, PoolError, establish_pool},
    types::{ApprovalEvidence, ApprovalOutcome, ApproverInbox},
};

use core::num::NonZeroU32;

use std::collections::HashMap;

use approval_coordinator_domain::{
    ContractId, Timestamps, UserId,
    approval::{Approval, ApprovalStatus as DomainApprovalStatus},
    chain::{FeeAmount, Signature, TxHash, WalletAddress},
    contract::{
        Contract, ContractDetails, ContractStatus as DomainContractStatus, WithApprovers,
    },
    document::{Document, DocumentMeta},
    proof::BlockchainProof,
    user::{User, UserRole as DomainUserRole},
};
use chrono::Utc;
use diesel_async::AsyncConnection;
use futures::{StreamExt, TryStreamExt};
use itertools::Itertools;
use uuid::Uuid;

use self::{
    error::Result,
    persistence::{
        record::{
            ContractStatus,
            insert::{
                NewApprovalRecord, NewContractRecord, NewDocumentRecord, NewProofRecord,
                NewUserRecord,
            },
            select::{
                ApprovalRecord, ApprovalRecordDissolved, ContractRecord, ContractRecordDissolved,
                DocumentRecord, DocumentRecordDissolved, ProofRecord, ProofRecordDissolved,
                UserRecord, UserRecordDissolved,
            },
        },
        store,
    },
};

/// The main store interface for approval coordinator persistence operations.
///
/// `ApprovalStore` provides high-level methods for interacting with the database,
/// managing users, contracts, approvals, documents and proofs.
pub struct ApprovalStore {
    pool: DbPool,
}

impl ApprovalStore {
    /// Creates a new `ApprovalStore` instance with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        ApprovalStore { pool }
    }
}

// CONTRACTS
// ================================================================================================

impl ApprovalStore {
    /// Creates a new contract together with one pending approval row per approver.
    ///
    /// The contract row and every approval row are inserted in a single database
    /// transaction; any failure leaves no trace.
    ///
    /// # Returns
    ///
    /// Returns the created contract with its creator and approvals embedded.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The creator or any approver is not a registered user
    /// - A contract with the same id already exists
    /// - The database transaction fails
    #[tracing::instrument(
        skip_all,
        fields(
            contract_id = %contract.id(),
            mode = %contract.mode(),
            threshold = contract.threshold().get(),
            approver_count = contract.approvers().len(),
        ),
    )]
    pub async fn create_contract(
        &self,
        contract: Contract<WithApprovers, ()>,
    ) -> Result<ContractDetails> {
        self.get_conn()
            .await?
            .transaction(|conn| {
                Box::pin(async move {
                    let approver_ids: Vec<Uuid> =
                        contract.approvers().iter().map(Uuid::from).collect();

                    let known_approvers =
                        store::user::count_users_by_ids(conn, &approver_ids).await?;

                    // casting usize to u64 is lossless on every supported target
                    if known_approvers.get() != approver_ids.len() as u64 {
                        return Err(ApprovalStoreError::Validation(
                            "approvers must be registered users".into(),
                        ));
                    }

                    if store::user::fetch_user_by_id(conn, contract.creator_id().into())
                        .await?
                        .is_none()
                    {
                        return Err(ApprovalStoreError::Validation(
                            "creator must be a registered user".into(),
                        ));
                    }

                    let threshold = i32::try_from(contract.threshold().get())
                        .map_err(|_| ApprovalStoreError::Validation("threshold too large".into()))?;

                    let new_contract = NewContractRecord::builder()
                        .id(contract.id().into())
                        .title(contract.title())
                        .description(contract.description())
                        .mode(contract.mode().into())
                        .threshold(threshold)
                        .creator_id(contract.creator_id().into())
                        .maybe_fee(contract.fee().map(FeeAmount::as_str))
                        .build();

                    let contract_record =
                        store::contract::save_new_contract(conn, new_contract).await?;

                    let new_approvals = approver_ids
                        .iter()
                        .enumerate()
                        .map(|(idx, &approver_id)| {
                            i32::try_from(idx).map(|approver_index| {
                                NewApprovalRecord::builder()
                                    .contract_id(contract_record.id())
                                    .approver_id(approver_id)
                                    .approver_index(approver_index)
                                    .build()
                            })
                        })
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(|_| ApprovalStoreError::Validation("too many approvers".into()))?;

                    store::approval::save_new_approvals(conn, &new_approvals).await?;

                    load_contract_details(conn, vec![contract_record])
                        .await?
                        .pop()
                        .ok_or(ApprovalStoreError::other("created contract not found"))
                })
            })
            .await
    }

    /// Retrieves a contract by its id, without any embedded rows.
    ///
    /// # Returns
    ///
    /// Returns `Some(contract)` if found, or `None` if the contract doesn't exist.
    #[tracing::instrument(skip_all, fields(%id))]
    pub async fn get_contract(&self, id: ContractId) -> Result<Option<Contract>> {
        store::contract::fetch_contract_by_id(&mut self.get_conn().await?, id.into())
            .await?
            .map(make_contract)
            .transpose()
    }

    /// Retrieves a contract with its creator, approvals, documents and proofs embedded.
    ///
    /// # Returns
    ///
    /// Returns `Some(details)` if found, or `None` if the contract doesn't exist.
    #[tracing::instrument(skip_all, fields(%id))]
    pub async fn get_contract_details(&self, id: ContractId) -> Result<Option<ContractDetails>> {
        let conn = &mut self.get_conn().await?;

        let Some(record) = store::contract::fetch_contract_by_id(conn, id.into()).await? else {
            return Ok(None);
        };

        Ok(load_contract_details(conn, vec![record]).await?.pop())
    }

    /// Retrieves all contracts, newest first, optionally filtered by status.
    #[tracing::instrument(skip_all, fields(status_filter = ?status_filter))]
    pub async fn list_contracts(
        &self,
        status_filter: Option<DomainContractStatus>,
    ) -> Result<Vec<ContractDetails>> {
        let conn = &mut self.get_conn().await?;

        let records: Vec<ContractRecord> = match status_filter {
            Some(status) => {
                store::contract::stream_contracts_by_status(conn, ContractStatus::from(status))
                    .await?
                    .try_collect()
                    .await?
            },
            None => store::contract::stream_contracts(conn).await?.try_collect().await?,
        };

        load_contract_details(conn, records).await
    }

    /// Retrieves the contracts in an approver's inbox.
    ///
    /// The pending inbox lists contracts on which the approver's row is still pending, newest
    /// first. The history lists contracts the approver already approved or rejected, most
    /// recently updated first.
    #[tracing::instrument(skip_all, fields(%approver_id, ?inbox))]
    pub async fn list_contracts_for_approver(
        &self,
        approver_id: UserId,
        inbox: ApproverInbox,
    ) -> Result<Vec<ContractDetails>> {
        let conn = &mut self.get_conn().await?;

        let records: Vec<ContractRecord> = match inbox {
            ApproverInbox::Pending => {
                store::contract::stream_contracts_pending_for_approver(conn, approver_id.into())
                    .await?
                    .try_collect()
                    .await?
            },
            ApproverInbox::History => {
                store::contract::stream_contracts_decided_by_approver(conn, approver_id.into())
                    .await?
                    .try_collect()
                    .await?
            },
        };

        load_contract_details(conn, records).await
    }
}

// APPROVAL LEDGER
// ================================================================================================

impl ApprovalStore {
    /// Records an approval by `approver_id` on `contract_id`.
    ///
    /// Runs as one transaction: the contract row is locked, the approver's pending row is
    /// marked approved, the approved count is re-derived from the ledger, the contract is
    /// completed if the count meets the threshold, and a blockchain proof is appended for
    /// every transaction hash in `evidence`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The approver has no pending row on the contract, or the contract doesn't exist
    ///   ([`ApprovalStoreError::DuplicateOrUnknownApprover`])
    /// - The contract is no longer pending ([`ApprovalStoreError::ContractAlreadyFinalized`])
    /// - The database transaction fails
    #[tracing::instrument(skip_all, fields(%contract_id, %approver_id))]
    pub async fn approve(
        &self,
        contract_id: ContractId,
        approver_id: UserId,
        evidence: &ApprovalEvidence,
    ) -> Result<ApprovalOutcome> {
        self.get_conn()
            .await?
            .transaction(|conn| {
                Box::pin(async move {
                    let (contract, approval) = lock_pending_approval(
                        conn,
                        contract_id,
                        approver_id,
                        DomainApprovalStatus::Approved,
                    )
                    .await?;

                    let recorded = store::approval::update_decision_by_approval_id(
                        conn,
                        approval.id(),
                        DomainApprovalStatus::Approved.into(),
                        Some(Utc::now()),
                        evidence.signature().map(Signature::as_str),
                        evidence.tx_hash().map(TxHash::as_str),
                    )
                    .await?;

                    if !recorded {
                        return Err(ApprovalStoreError::DuplicateOrUnknownApprover);
                    }

                    let approved_count =
                        store::approval::count_approved_by_contract_id(conn, contract_id.into())
                            .await?
                            .get();

                    let finalized = contract.is_threshold_met(approved_count)
                        && contract.status().can_transition_to(DomainContractStatus::Completed);

                    if finalized {
                        store::contract::update_status_by_contract_id(
                            conn,
                            contract_id.into(),
                            DomainContractStatus::Completed.into(),
                        )
                        .await?;
                    } else {
                        store::contract::touch_contract_by_id(conn, contract_id.into()).await?;
                    }

                    for tx_hash in evidence.proof_tx_hashes().iter().unique() {
                        let new_proof = NewProofRecord::builder()
                            .contract_id(contract_id.into())
                            .tx_hash(tx_hash.as_str())
                            .network(evidence.network())
                            .build();

                        store::proof::save_new_proof(conn, new_proof).await?;
                    }

                    let details = load_single_contract_details(conn, contract_id).await?;

                    Ok(ApprovalOutcome::builder()
                        .details(details)
                        .approved_count(approved_count)
                        .finalized(finalized)
                        .build())
                })
            })
            .await
    }

    /// Records a rejection by `approver_id` on `contract_id`.
    ///
    /// The approver's pending row is marked rejected. The contract itself stays pending; only
    /// reaching the threshold changes its status.
    ///
    /// # Errors
    ///
    /// Same as [`approve`](Self::approve).
    #[tracing::instrument(skip_all, fields(%contract_id, %approver_id))]
    pub async fn reject(
        &self,
        contract_id: ContractId,
        approver_id: UserId,
    ) -> Result<ContractDetails> {
        self.get_conn()
            .await?
            .transaction(|conn| {
                Box::pin(async move {
                    let (_, approval) = lock_pending_approval(
                        conn,
                        contract_id,
                        approver_id,
                        DomainApprovalStatus::Rejected,
                    )
                    .await?;

                    let recorded = store::approval::update_decision_by_approval_id(
                        conn,
                        approval.id(),
                        DomainApprovalStatus::Rejected.into(),
                        None,
                        None,
                        None,
                    )
                    .await?;

                    if !recorded {
                        return Err(ApprovalStoreError::DuplicateOrUnknownApprover);
                    }

                    store::contract::touch_contract_by_id(conn, contract_id.into()).await?;

                    load_single_contract_details(conn, contract_id).await
                })
            })
            .await
    }

    /// Retrieves the approval rows of a contract in approver order.
    #[tracing::instrument(skip_all, fields(%contract_id))]
    pub async fn get_approvals(&self, contract_id: ContractId) -> Result<Vec<Approval>> {
        store::approval::load_approvals_with_approver_by_contract_ids(
            &mut self.get_conn().await?,
            &[contract_id.into()],
        )
        .await?
        .into_iter()
        .map(|(approval, approver)| make_approval(approval, approver))
        .collect()
    }

    /// Retrieves the approval row of one approver on a contract.
    #[tracing::instrument(skip_all, fields(%contract_id, %approver_id))]
    pub async fn get_approval(
        &self,
        contract_id: ContractId,
        approver_id: UserId,
    ) -> Result<Option<Approval>> {
        Ok(self
            .get_approvals(contract_id)
            .await?
            .into_iter()
            .find(|approval| approval.approver().id() == approver_id))
    }

    /// Counts the approved rows of a contract.
    #[tracing::instrument(skip_all, fields(%contract_id))]
    pub async fn count_approved(&self, contract_id: ContractId) -> Result<u64> {
        store::approval::count_approved_by_contract_id(
            &mut self.get_conn().await?,
            contract_id.into(),
        )
        .await
        .map(|count| count.get())
        .map_err(From::from)
    }
}

// DOCUMENTS AND PROOFS
// ================================================================================================

impl ApprovalStore {
    /// Attaches document metadata to a contract.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The contract doesn't exist ([`ApprovalStoreError::NotFound`])
    /// - The uploader is not a registered user
    /// - The document size does not fit the storage column
    #[tracing::instrument(
        skip_all,
        fields(%contract_id, file_name = meta.file_name(), size = meta.size()),
    )]
    pub async fn record_document(
        &self,
        contract_id: ContractId,
        meta: &DocumentMeta,
    ) -> Result<Document> {
        let conn = &mut self.get_conn().await?;

        if !store::contract::exists_contract_by_id(conn, contract_id.into()).await? {
            return Err(ApprovalStoreError::NotFound("contract not found".into()));
        }

        if store::user::fetch_user_by_id(conn, meta.uploaded_by().into()).await?.is_none() {
            return Err(ApprovalStoreError::Validation(
                "uploader must be a registered user".into(),
            ));
        }

        let size = i64::try_from(meta.size())
            .map_err(|_| ApprovalStoreError::Validation("document too large".into()))?;

        let new_document = NewDocumentRecord::builder()
            .contract_id(contract_id.into())
            .file_name(meta.file_name())
            .mime_type(meta.mime_type())
            .size(size)
            .content_hash(meta.content_hash())
            .storage_pointer(meta.storage_pointer())
            .uploaded_by(meta.uploaded_by().into())
            .build();

        store::document::save_new_document(conn, new_document)
            .await
            .map_err(ApprovalStoreError::from)
            .and_then(make_document)
    }

    /// Retrieves the documents of a contract, oldest first.
    #[tracing::instrument(skip_all, fields(%contract_id))]
    pub async fn get_documents(&self, contract_id: ContractId) -> Result<Vec<Document>> {
        store::document::load_documents_by_contract_ids(
            &mut self.get_conn().await?,
            &[contract_id.into()],
        )
        .await?
        .into_iter()
        .map(make_document)
        .collect()
    }

    /// Retrieves the most recently attached document of a contract.
    #[tracing::instrument(skip_all, fields(%contract_id))]
    pub async fn get_latest_document(&self, contract_id: ContractId) -> Result<Option<Document>> {
        store::document::fetch_latest_document_by_contract_id(
            &mut self.get_conn().await?,
            contract_id.into(),
        )
        .await?
        .map(make_document)
        .transpose()
    }

    /// Appends a blockchain proof to a contract.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalStoreError::NotFound`] if the contract doesn't exist.
    #[tracing::instrument(skip_all, fields(%contract_id, %tx_hash, network))]
    pub async fn record_proof(
        &self,
        contract_id: ContractId,
        tx_hash: &TxHash,
        network: &str,
    ) -> Result<BlockchainProof> {
        let conn = &mut self.get_conn().await?;

        if !store::contract::exists_contract_by_id(conn, contract_id.into()).await? {
            return Err(ApprovalStoreError::NotFound("contract not found".into()));
        }

        let new_proof = NewProofRecord::builder()
            .contract_id(contract_id.into())
            .tx_hash(tx_hash.as_str())
            .network(network)
            .build();

        store::proof::save_new_proof(conn, new_proof)
            .await
            .map_err(ApprovalStoreError::from)
            .and_then(make_proof)
    }

    /// Retrieves the blockchain proofs of a contract, oldest first.
    #[tracing::instrument(skip_all, fields(%contract_id))]
    pub async fn get_proofs(&self, contract_id: ContractId) -> Result<Vec<BlockchainProof>> {
        store::proof::load_proofs_by_contract_ids(&mut self.get_conn().await?, &[contract_id.into()])
            .await?
            .into_iter()
            .map(make_proof)
            .collect()
    }
}

// USERS
// ================================================================================================

impl ApprovalStore {
    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalStoreError::Conflict`] if the email is already registered.
    #[tracing::instrument(skip_all, fields(%role))]
    pub async fn register_user(
        &self,
        email: &str,
        display_name: &str,
        role: DomainUserRole,
    ) -> Result<User> {
        let new_user = NewUserRecord::builder()
            .email(email)
            .display_name(display_name)
            .role(role.into())
            .build();

        store::user::save_new_user(&mut self.get_conn().await?, new_user)
            .await
            .map_err(ApprovalStoreError::from)
            .and_then(make_user)
    }

    /// Retrieves a user by id.
    #[tracing::instrument(skip_all, fields(%id))]
    pub async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        store::user::fetch_user_by_id(&mut self.get_conn().await?, id.into())
            .await?
            .map(make_user)
            .transpose()
    }

    /// Retrieves all users, newest first.
    #[tracing::instrument(skip_all)]
    pub async fn list_users(&self) -> Result<Vec<User>> {
        store::user::stream_users(&mut self.get_conn().await?)
            .await?
            .map_err(ApprovalStoreError::from)
            .map_ok(make_user)
            .map(Result::flatten)
            .try_collect()
            .await
    }

    /// Stores the wallet a user connected.
    ///
    /// # Returns
    ///
    /// Returns the updated user, or `None` if the user doesn't exist.
    #[tracing::instrument(skip_all, fields(%id, %wallet_address))]
    pub async fn update_user_wallet(
        &self,
        id: UserId,
        wallet_address: &WalletAddress,
    ) -> Result<Option<User>> {
        store::user::update_wallet_address_by_user_id(
            &mut self.get_conn().await?,
            id.into(),
            wallet_address.as_str(),
        )
        .await?
        .map(make_user)
        .transpose()
    }

    /// Changes a user's role.
    ///
    /// # Returns
    ///
    /// Returns the updated user, or `None` if the user doesn't exist.
    #[tracing::instrument(skip_all, fields(%id, %role))]
    pub async fn update_user_role(&self, id: UserId, role: DomainUserRole) -> Result<Option<User>> {
        store::user::update_role_by_user_id(&mut self.get_conn().await?, id.into(), role.into())
            .await?
            .map(make_user)
            .transpose()
    }
}

impl ApprovalStore {
    async fn get_conn(&self) -> Result<DbConn> {
        self.pool.get().await.map_err(|_| ApprovalStoreError::Pool)
    }
}

/// Locks the contract row and returns it together with the approver's row, provided that row
/// may move to `decision`.
async fn lock_pending_approval(
    conn: &mut DbConn,
    contract_id: ContractId,
    approver_id: UserId,
    decision: DomainApprovalStatus,
) -> Result<(Contract, ApprovalRecord)> {
    let Some(contract_record) =
        store::contract::fetch_contract_by_id_for_update(conn, contract_id.into()).await?
    else {
        tracing::debug!("contract not found");
        return Err(ApprovalStoreError::DuplicateOrUnknownApprover);
    };

    let approval = store::approval::fetch_approval_by_contract_id_and_approver_id(
        conn,
        contract_id.into(),
        approver_id.into(),
    )
    .await?
    .filter(|approval| approval.status().into_inner().can_transition_to(decision))
    .ok_or(ApprovalStoreError::DuplicateOrUnknownApprover)?;

    if contract_record.status().into_inner().is_terminal() {
        return Err(ApprovalStoreError::ContractAlreadyFinalized);
    }

    Ok((make_contract(contract_record)?, approval))
}

async fn load_single_contract_details(
    conn: &mut DbConn,
    contract_id: ContractId,
) -> Result<ContractDetails> {
    let record = store::contract::fetch_contract_by_id(conn, contract_id.into())
        .await?
        .ok_or(ApprovalStoreError::NotFound("contract not found".into()))?;

    load_contract_details(conn, vec![record])
        .await?
        .pop()
        .ok_or(ApprovalStoreError::NotFound("contract not found".into()))
}

/// Embeds creators, approvals, documents and proofs into the given contracts, preserving
/// their order.
async fn load_contract_details(
    conn: &mut DbConn,
    records: Vec<ContractRecord>,
) -> Result<Vec<ContractDetails>> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let contract_ids: Vec<Uuid> = records.iter().map(ContractRecord::id).collect();

    let creator_ids: Vec<Uuid> = records.iter().map(ContractRecord::creator_id).unique().collect();

    let creators: HashMap<Uuid, User> = store::user::load_users_by_ids(conn, &creator_ids)
        .await?
        .into_iter()
        .map(|record| make_user(record).map(|user| (user.id().into(), user)))
        .collect::<Result<_>>()?;

    let mut approvals = store::approval::load_approvals_with_approver_by_contract_ids(
        conn,
        &contract_ids,
    )
    .await?
    .into_iter()
    .map(|(approval, approver)| make_approval(approval, approver))
    .collect::<Result<Vec<_>>>()?
    .into_iter()
    .into_group_map_by(|approval| Uuid::from(approval.contract_id()));

    let mut documents = store::document::load_documents_by_contract_ids(conn, &contract_ids)
        .await?
        .into_iter()
        .map(make_document)
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .into_group_map_by(|document| Uuid::from(document.contract_id()));

    let mut proofs = store::proof::load_proofs_by_contract_ids(conn, &contract_ids)
        .await?
        .into_iter()
        .map(make_proof)
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .into_group_map_by(|proof| Uuid::from(proof.contract_id()));

    records
        .into_iter()
        .map(|record| {
            let id = record.id();

            let creator = creators
                .get(&record.creator_id())
                .cloned()
                .ok_or(ApprovalStoreError::InvalidValue)?;

            let details = ContractDetails::builder()
                .contract(make_contract(record)?)
                .creator(creator)
                .approvals(approvals.remove(&id).unwrap_or_default())
                .documents(documents.remove(&id).unwrap_or_default())
                .proofs(proofs.remove(&id).unwrap_or_default())
                .build();

            Ok(details)
        })
        .collect()
}

fn make_contract(contract_record: ContractRecord) -> Result<Contract> {
    let ContractRecordDissolved {
        id,
        title,
        description,
        mode,
        threshold,
        status,
        creator_id,
        fee,
        created_at,
        updated_at,
    } = contract_record.dissolve();

    let threshold = threshold
        .try_into()
        .map(NonZeroU32::new)
        .map_err(|_| ApprovalStoreError::InvalidValue)?
        .ok_or(ApprovalStoreError::InvalidValue)?;

    let fee = fee
        .as_deref()
        .map(str::parse::<FeeAmount>)
        .transpose()
        .map_err(|_| ApprovalStoreError::InvalidValue)?;

    let timestamps = Timestamps::builder().created_at(created_at).updated_at(updated_at).build();

    let contract = Contract::builder()
        .id(id.into())
        .title(title)
        .description(description)
        .mode(mode.into_inner())
        .threshold(threshold)
        .status(status.into_inner())
        .creator_id(creator_id.into())
        .maybe_fee(fee)
        .aux(timestamps)
        .build();

    Ok(contract)
}

fn make_user(user_record: UserRecord) -> Result<User> {
    let UserRecordDissolved {
        id,
        email,
        display_name,
        role,
        wallet_address,
        created_at,
        updated_at,
    } = user_record.dissolve();

    let wallet_address = wallet_address
        .as_deref()
        .map(str::parse::<WalletAddress>)
        .transpose()
        .map_err(|_| ApprovalStoreError::InvalidValue)?;

    let timestamps = Timestamps::builder().created_at(created_at).updated_at(updated_at).build();

    let user = User::builder()
        .id(id.into())
        .email(email)
        .display_name(display_name)
        .role(role.into_inner())
        .maybe_wallet_address(wallet_address)
        .aux(timestamps)
        .build();

    Ok(user)
}

fn make_approval(approval_record: ApprovalRecord, approver_record: UserRecord) -> Result<Approval> {
    let ApprovalRecordDissolved {
        id,
        contract_id,
        status,
        approved_at,
        signature,
        tx_hash,
        created_at,
        updated_at,
        ..
    } = approval_record.dissolve();

    let signature = signature
        .as_deref()
        .map(str::parse::<Signature>)
        .transpose()
        .map_err(|_| ApprovalStoreError::InvalidValue)?;

    let tx_hash = tx_hash
        .as_deref()
        .map(str::parse::<TxHash>)
        .transpose()
        .map_err(|_| ApprovalStoreError::InvalidValue)?;

    let timestamps = Timestamps::builder().created_at(created_at).updated_at(updated_at).build();

    let approval = Approval::builder()
        .id(id.into())
        .contract_id(contract_id.into())
        .approver(make_user(approver_record)?)
        .status(status.into_inner())
        .maybe_approved_at(approved_at)
        .maybe_signature(signature)
        .maybe_tx_hash(tx_hash)
        .aux(timestamps)
        .build();

    Ok(approval)
}

fn make_document(document_record: DocumentRecord) -> Result<Document> {
    let DocumentRecordDissolved {
        id,
        contract_id,
        file_name,
        mime_type,
        size,
        content_hash,
        storage_pointer,
        uploaded_by,
        created_at,
    } = document_record.dissolve();

    let size = u64::try_from(size).map_err(|_| ApprovalStoreError::InvalidValue)?;

    let meta = DocumentMeta::builder()
        .file_name(file_name)
        .mime_type(mime_type)
        .size(size)
        .content_hash(content_hash)
        .storage_pointer(storage_pointer)
        .uploaded_by(uploaded_by.into())
        .build();

    let document = Document::builder()
        .id(id.into())
        .contract_id(contract_id.into())
        .meta(meta)
        .created_at(created_at)
        .build();

    Ok(document)
}

fn make_proof(proof_record: ProofRecord) -> Result<BlockchainProof> {
    let ProofRecordDissolved { id, contract_id, tx_hash, network, proven_at } =
        proof_record.dissolve();

    let tx_hash = tx_hash.parse().map_err(|_| ApprovalStoreError::InvalidValue)?;

    let proof = BlockchainProof::builder()
        .id(id.into())
        .contract_id(contract_id.into())
        .tx_hash(tx_hash)
        .network(network)
        .proven_at(proven_at)
        .build();

    Ok(proof)
}
