//! integration tests for approval-coordinator-engine

use core::num::NonZeroUsize;

use std::sync::Arc;

use approval_coordinator_domain::{
    ContractId, UserId,
    approval::ApprovalStatus,
    contract::{ContractDetails, ContractMode, ContractStatus},
    user::{User, UserRole},
};
use approval_coordinator_engine::{
    ApprovalEngine, ApprovalEngineErrorKind, ApproverInbox,
    request::{
        ApprovalMessageRequest, ApprovalProof, ConnectWalletRequest, CreateContractRequest,
        GetContractRequest, ListContractsRequest, ListForApproverRequest, OnchainApproval,
        RecordDocumentRequest, RegisterUserRequest, RejectApprovalRequest, SubmitApprovalRequest,
        UpdateUserRoleRequest,
    },
    response::{
        ApprovalMessageResponseDissolved, CreateContractResponseDissolved,
        SubmitApprovalResponseDissolved,
    },
};
use futures::future;
use uuid::Uuid;

const NETWORK: &str = "sepolia";

async fn setup_engine() -> ApprovalEngine {
    let store = approval_test_utils::setup_test_store(NonZeroUsize::new(8).unwrap()).await;

    ApprovalEngine::new(store, NETWORK)
}

async fn register(engine: &ApprovalEngine, name: &str, role: UserRole) -> User {
    let request = RegisterUserRequest::builder()
        .email(format!("{name}@example.com"))
        .display_name(name)
        .role(role)
        .build()
        .unwrap();

    engine.register_user(request).await.unwrap().dissolve().user
}

async fn register_members(engine: &ApprovalEngine, names: &[&str]) -> Vec<UserId> {
    let mut ids = Vec::with_capacity(names.len());

    for name in names {
        ids.push(register(engine, name, UserRole::Member).await.id());
    }

    ids
}

async fn create_offchain(
    engine: &ApprovalEngine,
    creator_id: UserId,
    approvers: Vec<UserId>,
    threshold: u32,
) -> ContractDetails {
    let request = CreateContractRequest::builder()
        .title("Supplier Agreement")
        .description("Annual supply terms")
        .mode(ContractMode::Offchain)
        .threshold(threshold)
        .creator_id(creator_id)
        .approvers(approvers)
        .build()
        .unwrap();

    let CreateContractResponseDissolved { contract } =
        engine.create_contract(request).await.unwrap().dissolve();

    contract
}

fn offchain_approval(contract_id: ContractId, approver_id: UserId) -> SubmitApprovalRequest {
    SubmitApprovalRequest::builder()
        .contract_id(contract_id)
        .approver_id(approver_id)
        .proof(ApprovalProof::Offchain)
        .build()
}

async fn details(engine: &ApprovalEngine, contract_id: ContractId) -> ContractDetails {
    engine
        .get_contract(GetContractRequest::builder().contract_id(contract_id).build())
        .await
        .unwrap()
        .dissolve()
        .contract
        .expect("contract exists")
}

#[tokio::test]
async fn creating_a_contract_opens_one_pending_row_per_approver() {
    // Arrange
    let engine = setup_engine().await;
    let creator = register(&engine, "creator", UserRole::Member).await;
    let approvers = register_members(&engine, &["alice", "bob", "carol", "dave"]).await;

    // Act
    let contract = create_offchain(&engine, creator.id(), approvers.clone(), 3).await;

    // Assert
    assert_eq!(contract.contract().status(), ContractStatus::Pending);
    assert_eq!(contract.contract().threshold().get(), 3);
    assert_eq!(contract.creator().id(), creator.id());
    assert_eq!(contract.approvals().len(), 4);
    assert!(contract.approvals().iter().all(|a| a.status() == ApprovalStatus::Pending));
    assert!(contract.approvals().iter().all(|a| a.approved_at().is_none()));

    let ordered: Vec<_> = contract.approvals().iter().map(|a| a.approver().id()).collect();
    assert_eq!(ordered, approvers);
}

#[tokio::test]
async fn creating_a_contract_with_unknown_approver_leaves_nothing_behind() {
    // Arrange
    let engine = setup_engine().await;
    let creator = register(&engine, "creator", UserRole::Member).await;
    let mut approvers = register_members(&engine, &["alice"]).await;
    approvers.push(Uuid::new_v4().into());

    let request = CreateContractRequest::builder()
        .title("Supplier Agreement")
        .mode(ContractMode::Offchain)
        .threshold(1)
        .creator_id(creator.id())
        .approvers(approvers)
        .build()
        .unwrap();

    // Act
    let err = engine.create_contract(request).await.unwrap_err();

    // Assert
    assert!(matches!(err.kind(), ApprovalEngineErrorKind::Validation(_)));

    let listed = engine
        .list_contracts(ListContractsRequest::builder().build())
        .await
        .unwrap()
        .dissolve()
        .contracts;
    assert!(listed.is_empty());
}

#[tokio::test]
async fn threshold_completes_the_contract_and_later_approvals_are_refused() {
    // Arrange
    let engine = setup_engine().await;
    let creator = register(&engine, "creator", UserRole::Member).await;
    let approvers = register_members(&engine, &["alice", "bob", "carol"]).await;
    let contract = create_offchain(&engine, creator.id(), approvers.clone(), 2).await;
    let contract_id = contract.contract().id();

    // Act
    let first = engine.submit_approval(offchain_approval(contract_id, approvers[0])).await;
    let second = engine.submit_approval(offchain_approval(contract_id, approvers[1])).await;
    let third = engine.submit_approval(offchain_approval(contract_id, approvers[2])).await;

    // Assert
    let SubmitApprovalResponseDissolved { contract, approved_count, finalized } =
        first.unwrap().dissolve();
    assert_eq!(contract.contract().status(), ContractStatus::Pending);
    assert_eq!(approved_count, 1);
    assert!(!finalized);

    let SubmitApprovalResponseDissolved { contract, approved_count, finalized } =
        second.unwrap().dissolve();
    assert_eq!(contract.contract().status(), ContractStatus::Completed);
    assert_eq!(approved_count, 2);
    assert!(finalized);

    let err = third.unwrap_err();
    assert!(matches!(err.kind(), ApprovalEngineErrorKind::ContractAlreadyFinalized));

    let contract = details(&engine, contract_id).await;
    assert_eq!(contract.contract().status(), ContractStatus::Completed);
    assert_eq!(contract.approved_count(), 2);

    let carol = contract.approvals().iter().find(|a| a.approver().id() == approvers[2]).unwrap();
    assert_eq!(carol.status(), ApprovalStatus::Pending);
}

#[tokio::test]
async fn second_approval_by_the_same_approver_is_refused() {
    // Arrange
    let engine = setup_engine().await;
    let creator = register(&engine, "creator", UserRole::Member).await;
    let approvers = register_members(&engine, &["alice", "bob"]).await;
    let contract = create_offchain(&engine, creator.id(), approvers.clone(), 2).await;
    let contract_id = contract.contract().id();

    engine.submit_approval(offchain_approval(contract_id, approvers[0])).await.unwrap();

    // Act
    let err = engine
        .submit_approval(offchain_approval(contract_id, approvers[0]))
        .await
        .unwrap_err();

    // Assert
    assert!(matches!(err.kind(), ApprovalEngineErrorKind::DuplicateOrUnknownApprover));
    assert_eq!(details(&engine, contract_id).await.approved_count(), 1);
}

#[tokio::test]
async fn approvals_from_strangers_or_on_unknown_contracts_are_refused() {
    // Arrange
    let engine = setup_engine().await;
    let creator = register(&engine, "creator", UserRole::Member).await;
    let approvers = register_members(&engine, &["alice"]).await;
    let contract = create_offchain(&engine, creator.id(), approvers.clone(), 1).await;

    // Act
    let stranger = engine
        .submit_approval(offchain_approval(contract.contract().id(), creator.id()))
        .await
        .unwrap_err();

    let unknown_contract = engine
        .submit_approval(offchain_approval(Uuid::new_v4().into(), approvers[0]))
        .await
        .unwrap_err();

    // Assert
    assert!(matches!(stranger.kind(), ApprovalEngineErrorKind::DuplicateOrUnknownApprover));
    assert!(matches!(
        unknown_contract.kind(),
        ApprovalEngineErrorKind::DuplicateOrUnknownApprover
    ));
}

#[tokio::test]
async fn onchain_approval_with_fee_records_a_blockchain_proof() {
    // Arrange
    let engine = setup_engine().await;
    let creator = register(&engine, "creator", UserRole::Member).await;
    let approvers = register_members(&engine, &["alice", "bob"]).await;

    let request = CreateContractRequest::builder()
        .title("Token Grant")
        .mode(ContractMode::Onchain)
        .threshold(2)
        .creator_id(creator.id())
        .approvers(approvers.clone())
        .fee("0.1".parse().unwrap())
        .build()
        .unwrap();

    let contract_id =
        engine.create_contract(request).await.unwrap().dissolve().contract.contract().id();

    let approval = OnchainApproval::builder()
        .signature("0xsigned".parse().unwrap())
        .tx_hash("0xabc".parse().unwrap())
        .build();

    // Act
    let SubmitApprovalResponseDissolved { contract, approved_count, finalized } = engine
        .submit_approval(
            SubmitApprovalRequest::builder()
                .contract_id(contract_id)
                .approver_id(approvers[0])
                .proof(ApprovalProof::Onchain(approval))
                .build(),
        )
        .await
        .unwrap()
        .dissolve();

    // Assert
    assert_eq!(approved_count, 1);
    assert!(!finalized);
    assert_eq!(contract.contract().status(), ContractStatus::Pending);

    let [proof] = contract.proofs() else {
        panic!("expected exactly one proof, got {:?}", contract.proofs());
    };
    assert_eq!(proof.tx_hash().as_str(), "0xabc");
    assert_eq!(proof.network(), NETWORK);
    assert_eq!(proof.contract_id(), contract_id);

    let alice = contract.approvals().iter().find(|a| a.approver().id() == approvers[0]).unwrap();
    assert_eq!(alice.status(), ApprovalStatus::Approved);
    assert!(alice.approved_at().is_some());
    assert_eq!(alice.signature().map(|s| s.as_str()), Some("0xsigned"));
    assert_eq!(alice.tx_hash().map(|h| h.as_str()), Some("0xabc"));
}

#[tokio::test]
async fn onchain_approval_with_unpaid_fee_is_refused_without_writing() {
    // Arrange
    let engine = setup_engine().await;
    let creator = register(&engine, "creator", UserRole::Member).await;
    let approvers = register_members(&engine, &["alice"]).await;

    let request = CreateContractRequest::builder()
        .title("Token Grant")
        .mode(ContractMode::Onchain)
        .threshold(1)
        .creator_id(creator.id())
        .approvers(approvers.clone())
        .fee("0.1".parse().unwrap())
        .build()
        .unwrap();

    let contract_id =
        engine.create_contract(request).await.unwrap().dissolve().contract.contract().id();

    let approval = OnchainApproval::builder().signature("0xsigned".parse().unwrap()).build();

    // Act
    let err = engine
        .submit_approval(
            SubmitApprovalRequest::builder()
                .contract_id(contract_id)
                .approver_id(approvers[0])
                .proof(ApprovalProof::Onchain(approval))
                .build(),
        )
        .await
        .unwrap_err();

    // Assert
    assert!(matches!(err.kind(), ApprovalEngineErrorKind::Validation(_)));

    let contract = details(&engine, contract_id).await;
    assert_eq!(contract.approved_count(), 0);
    assert!(contract.proofs().is_empty());
}

#[tokio::test]
async fn approval_proof_must_match_the_contract_mode() {
    // Arrange
    let engine = setup_engine().await;
    let creator = register(&engine, "creator", UserRole::Member).await;
    let approvers = register_members(&engine, &["alice"]).await;
    let contract = create_offchain(&engine, creator.id(), approvers.clone(), 1).await;

    let approval = OnchainApproval::builder()
        .signature("0xsigned".parse().unwrap())
        .tx_hash("0xabc".parse().unwrap())
        .build();

    // Act
    let err = engine
        .submit_approval(
            SubmitApprovalRequest::builder()
                .contract_id(contract.contract().id())
                .approver_id(approvers[0])
                .proof(ApprovalProof::Onchain(approval))
                .build(),
        )
        .await
        .unwrap_err();

    // Assert
    assert!(matches!(err.kind(), ApprovalEngineErrorKind::Validation(_)));
}

#[tokio::test]
async fn closed_votes_are_refused_before_the_proof_is_checked() {
    // Arrange
    let engine = setup_engine().await;
    let creator = register(&engine, "creator", UserRole::Member).await;
    let approvers = register_members(&engine, &["alice", "bob"]).await;

    let request = CreateContractRequest::builder()
        .title("Token Grant")
        .mode(ContractMode::Onchain)
        .threshold(1)
        .creator_id(creator.id())
        .approvers(approvers.clone())
        .fee("0.1".parse().unwrap())
        .build()
        .unwrap();

    let contract_id =
        engine.create_contract(request).await.unwrap().dissolve().contract.contract().id();

    let onchain = |approver_id: UserId, tx_hash: Option<&str>| {
        let approval = OnchainApproval::builder()
            .signature("0xsigned".parse().unwrap())
            .maybe_tx_hash(tx_hash.map(|h| h.parse().unwrap()))
            .build();

        SubmitApprovalRequest::builder()
            .contract_id(contract_id)
            .approver_id(approver_id)
            .proof(ApprovalProof::Onchain(approval))
            .build()
    };

    let first = engine.submit_approval(onchain(approvers[0], Some("0xabc"))).await.unwrap();
    assert!(first.dissolve().finalized);

    // Act
    let repeat_offchain =
        engine.submit_approval(offchain_approval(contract_id, approvers[0])).await.unwrap_err();
    let repeat_unpaid = engine.submit_approval(onchain(approvers[0], None)).await.unwrap_err();
    let late_unpaid = engine.submit_approval(onchain(approvers[1], None)).await.unwrap_err();
    let stranger_offchain =
        engine.submit_approval(offchain_approval(contract_id, creator.id())).await.unwrap_err();

    // Assert
    assert!(matches!(repeat_offchain.kind(), ApprovalEngineErrorKind::DuplicateOrUnknownApprover));
    assert!(matches!(repeat_unpaid.kind(), ApprovalEngineErrorKind::DuplicateOrUnknownApprover));
    assert!(matches!(late_unpaid.kind(), ApprovalEngineErrorKind::ContractAlreadyFinalized));
    assert!(matches!(
        stranger_offchain.kind(),
        ApprovalEngineErrorKind::DuplicateOrUnknownApprover
    ));

    let contract = details(&engine, contract_id).await;
    assert_eq!(contract.approved_count(), 1);
    assert_eq!(contract.proofs().len(), 1);
}

#[tokio::test]
async fn rejection_is_recorded_but_keeps_the_contract_pending() {
    // Arrange
    let engine = setup_engine().await;
    let creator = register(&engine, "creator", UserRole::Member).await;
    let approvers = register_members(&engine, &["alice", "bob"]).await;
    let contract = create_offchain(&engine, creator.id(), approvers.clone(), 2).await;
    let contract_id = contract.contract().id();

    // Act
    let contract = engine
        .reject_approval(
            RejectApprovalRequest::builder()
                .contract_id(contract_id)
                .approver_id(approvers[0])
                .build(),
        )
        .await
        .unwrap()
        .dissolve()
        .contract;

    let again = engine
        .reject_approval(
            RejectApprovalRequest::builder()
                .contract_id(contract_id)
                .approver_id(approvers[0])
                .build(),
        )
        .await
        .unwrap_err();

    // Assert
    assert_eq!(contract.contract().status(), ContractStatus::Pending);

    let alice = contract.approvals().iter().find(|a| a.approver().id() == approvers[0]).unwrap();
    assert_eq!(alice.status(), ApprovalStatus::Rejected);
    assert!(alice.approved_at().is_none());

    assert!(matches!(again.kind(), ApprovalEngineErrorKind::DuplicateOrUnknownApprover));
}

#[tokio::test]
async fn rejected_vote_cannot_be_turned_into_an_approval() {
    // Arrange
    let engine = setup_engine().await;
    let creator = register(&engine, "creator", UserRole::Member).await;
    let approvers = register_members(&engine, &["alice", "bob"]).await;
    let contract = create_offchain(&engine, creator.id(), approvers.clone(), 1).await;
    let contract_id = contract.contract().id();

    engine
        .reject_approval(
            RejectApprovalRequest::builder()
                .contract_id(contract_id)
                .approver_id(approvers[0])
                .build(),
        )
        .await
        .unwrap();

    // Act
    let err = engine
        .submit_approval(offchain_approval(contract_id, approvers[0]))
        .await
        .unwrap_err();

    // Assert
    assert!(matches!(err.kind(), ApprovalEngineErrorKind::DuplicateOrUnknownApprover));

    let contract = details(&engine, contract_id).await;
    assert_eq!(contract.contract().status(), ContractStatus::Pending);
    assert_eq!(contract.approved_count(), 0);

    let alice = contract.approvals().iter().find(|a| a.approver().id() == approvers[0]).unwrap();
    assert_eq!(alice.status(), ApprovalStatus::Rejected);
}

#[tokio::test]
async fn rejection_on_a_completed_contract_is_refused() {
    // Arrange
    let engine = setup_engine().await;
    let creator = register(&engine, "creator", UserRole::Member).await;
    let approvers = register_members(&engine, &["alice", "bob"]).await;
    let contract = create_offchain(&engine, creator.id(), approvers.clone(), 1).await;
    let contract_id = contract.contract().id();

    engine.submit_approval(offchain_approval(contract_id, approvers[0])).await.unwrap();

    // Act
    let err = engine
        .reject_approval(
            RejectApprovalRequest::builder()
                .contract_id(contract_id)
                .approver_id(approvers[1])
                .build(),
        )
        .await
        .unwrap_err();

    // Assert
    assert!(matches!(err.kind(), ApprovalEngineErrorKind::ContractAlreadyFinalized));

    let contract = details(&engine, contract_id).await;
    assert_eq!(contract.contract().status(), ContractStatus::Completed);

    let bob = contract.approvals().iter().find(|a| a.approver().id() == approvers[1]).unwrap();
    assert_eq!(bob.status(), ApprovalStatus::Pending);
}

#[tokio::test]
async fn approver_inboxes_split_pending_from_decided_contracts() {
    // Arrange
    let engine = setup_engine().await;
    let creator = register(&engine, "creator", UserRole::Member).await;
    let approvers = register_members(&engine, &["alice", "bob"]).await;
    let alice = approvers[0];

    let older = create_offchain(&engine, creator.id(), approvers.clone(), 2).await;
    let newer = create_offchain(&engine, creator.id(), approvers.clone(), 2).await;
    let decided = create_offchain(&engine, creator.id(), approvers.clone(), 2).await;

    engine
        .submit_approval(offchain_approval(decided.contract().id(), alice))
        .await
        .unwrap();

    let inbox = |inbox| ListForApproverRequest::builder().approver_id(alice).inbox(inbox).build();

    // Act
    let pending = engine.list_for_approver(inbox(ApproverInbox::Pending)).await.unwrap();
    let history = engine.list_for_approver(inbox(ApproverInbox::History)).await.unwrap();

    // Assert
    let pending: Vec<_> =
        pending.dissolve().contracts.iter().map(|c| c.contract().id()).collect();
    assert_eq!(pending, vec![newer.contract().id(), older.contract().id()]);

    let history: Vec<_> =
        history.dissolve().contracts.iter().map(|c| c.contract().id()).collect();
    assert_eq!(history, vec![decided.contract().id()]);
}

#[tokio::test]
async fn contracts_are_listed_newest_first_and_filtered_by_status() {
    // Arrange
    let engine = setup_engine().await;
    let creator = register(&engine, "creator", UserRole::Member).await;
    let approvers = register_members(&engine, &["alice"]).await;

    let first = create_offchain(&engine, creator.id(), approvers.clone(), 1).await;
    let second = create_offchain(&engine, creator.id(), approvers.clone(), 1).await;

    engine
        .submit_approval(offchain_approval(first.contract().id(), approvers[0]))
        .await
        .unwrap();

    // Act
    let all = engine.list_contracts(ListContractsRequest::builder().build()).await.unwrap();
    let completed = engine
        .list_contracts(
            ListContractsRequest::builder().status_filter(ContractStatus::Completed).build(),
        )
        .await
        .unwrap();

    // Assert
    let all: Vec<_> = all.dissolve().contracts.iter().map(|c| c.contract().id()).collect();
    assert_eq!(all, vec![second.contract().id(), first.contract().id()]);

    let completed: Vec<_> =
        completed.dissolve().contracts.iter().map(|c| c.contract().id()).collect();
    assert_eq!(completed, vec![first.contract().id()]);
}

#[tokio::test]
async fn unknown_contract_is_reported_as_absent() {
    let engine = setup_engine().await;

    let response = engine
        .get_contract(GetContractRequest::builder().contract_id(Uuid::new_v4().into()).build())
        .await
        .unwrap();

    assert!(response.dissolve().contract.is_none());
}

#[tokio::test]
async fn documents_are_attached_and_bound_into_the_approval_message() {
    // Arrange
    let engine = setup_engine().await;
    let creator = register(&engine, "creator", UserRole::Member).await;
    let approvers = register_members(&engine, &["alice"]).await;
    let contract = create_offchain(&engine, creator.id(), approvers, 1).await;
    let contract_id = contract.contract().id();

    let message_request = || ApprovalMessageRequest::builder().contract_id(contract_id).build();

    let before = engine.approval_message(message_request()).await.unwrap().dissolve();

    let request = RecordDocumentRequest::builder()
        .contract_id(contract_id)
        .file_name("agreement.pdf")
        .mime_type("application/pdf")
        .size(2048)
        .content_hash("9f86d081884c7d659a2feaa0c55ad015")
        .storage_pointer("contracts/agreement.pdf")
        .uploaded_by(creator.id())
        .build()
        .unwrap();

    // Act
    let document = engine.record_document(request).await.unwrap().dissolve().document;
    let ApprovalMessageResponseDissolved { message, digest } =
        engine.approval_message(message_request()).await.unwrap().dissolve();

    // Assert
    assert_eq!(document.contract_id(), contract_id);
    assert_eq!(document.meta().size(), 2048);

    assert!(before.message.ends_with("Document Hash: none"));
    assert_eq!(
        message,
        format!(
            "Contract ID: {contract_id}\nTitle: Supplier Agreement\nDocument Hash: \
             9f86d081884c7d659a2feaa0c55ad015"
        )
    );
    assert!(digest.starts_with("0x"));
    assert_ne!(digest, before.digest);

    let contract = details(&engine, contract_id).await;
    assert_eq!(contract.documents().len(), 1);
    assert_eq!(contract.documents()[0].id(), document.id());
}

#[tokio::test]
async fn documents_and_messages_require_an_existing_contract() {
    // Arrange
    let engine = setup_engine().await;
    let creator = register(&engine, "creator", UserRole::Member).await;
    let missing: ContractId = Uuid::new_v4().into();

    let request = RecordDocumentRequest::builder()
        .contract_id(missing)
        .file_name("agreement.pdf")
        .mime_type("application/pdf")
        .size(1)
        .content_hash("abc")
        .storage_pointer("contracts/agreement.pdf")
        .uploaded_by(creator.id())
        .build()
        .unwrap();

    // Act
    let document = engine.record_document(request).await.unwrap_err();
    let message = engine
        .approval_message(ApprovalMessageRequest::builder().contract_id(missing).build())
        .await
        .unwrap_err();

    // Assert
    assert!(matches!(document.kind(), ApprovalEngineErrorKind::NotFound(_)));
    assert!(matches!(message.kind(), ApprovalEngineErrorKind::NotFound(_)));
}

#[tokio::test]
async fn users_register_once_and_connect_wallets() {
    // Arrange
    let engine = setup_engine().await;
    let alice = register(&engine, "alice", UserRole::Member).await;

    let duplicate = RegisterUserRequest::builder()
        .email("  ALICE@example.com ")
        .display_name("Alice Again")
        .build()
        .unwrap();

    let wallet = ConnectWalletRequest::builder()
        .user_id(alice.id())
        .wallet_address("0x52908400098527886E0F7030069857D2E4169EE7".parse().unwrap())
        .build();

    // Act
    let err = engine.register_user(duplicate).await.unwrap_err();
    let updated = engine.connect_wallet(wallet).await.unwrap().dissolve().user;

    // Assert
    assert!(matches!(err.kind(), ApprovalEngineErrorKind::Conflict(_)));
    assert_eq!(
        updated.wallet_address().map(|w| w.as_str()),
        Some("0x52908400098527886e0f7030069857d2e4169ee7")
    );

    let users = engine.list_users().await.unwrap().dissolve().users;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email(), "alice@example.com");
}

#[tokio::test]
async fn only_admins_change_roles() {
    // Arrange
    let engine = setup_engine().await;
    let admin = register(&engine, "admin", UserRole::Admin).await;
    let alice = register(&engine, "alice", UserRole::Member).await;
    let bob = register(&engine, "bob", UserRole::Member).await;

    let change = |acting: UserId, target: UserId| {
        UpdateUserRoleRequest::builder()
            .acting_user_id(acting)
            .user_id(target)
            .role(UserRole::Admin)
            .build()
    };

    // Act
    let refused = engine.update_user_role(change(alice.id(), bob.id())).await.unwrap_err();
    let promoted = engine.update_user_role(change(admin.id(), bob.id())).await.unwrap();
    let missing = engine
        .update_user_role(change(admin.id(), Uuid::new_v4().into()))
        .await
        .unwrap_err();

    // Assert
    assert!(matches!(refused.kind(), ApprovalEngineErrorKind::Unauthorized(_)));
    assert_eq!(promoted.dissolve().user.role(), UserRole::Admin);
    assert!(matches!(missing.kind(), ApprovalEngineErrorKind::NotFound(_)));
}

#[tokio::test]
async fn concurrent_approvals_complete_the_contract_exactly_once() {
    // Arrange
    const APPROVERS: usize = 6;

    let engine = Arc::new(setup_engine().await);
    let creator = register(&engine, "creator", UserRole::Member).await;

    let names: Vec<String> = (0..APPROVERS).map(|i| format!("approver{i}")).collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    let approvers = register_members(&engine, &names).await;

    let contract = create_offchain(&engine, creator.id(), approvers.clone(), 6).await;
    let contract_id = contract.contract().id();

    // Act
    let handles = approvers.iter().map(|&approver_id| {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move {
            engine.submit_approval(offchain_approval(contract_id, approver_id)).await
        })
    });

    let results = future::join_all(handles).await;

    // Assert
    let responses: Vec<_> =
        results.into_iter().map(|r| r.unwrap().unwrap().dissolve()).collect();

    assert_eq!(responses.iter().filter(|r| r.finalized).count(), 1);

    let mut counts: Vec<_> = responses.iter().map(|r| r.approved_count).collect();
    counts.sort_unstable();
    assert_eq!(counts, (1..=6).collect::<Vec<u64>>());

    let contract = details(&engine, contract_id).await;
    assert_eq!(contract.contract().status(), ContractStatus::Completed);
    assert_eq!(contract.approved_count(), APPROVERS);
}
