use approval_coordinator_domain::{
    chain::{FeeAmount, Signature, TxHash, WalletAddress},
    contract::{ContractMode, ContractStatus},
    user::UserRole,
};
use approval_coordinator_engine::{
    ApproverInbox,
    request::{
        ApprovalMessageRequest, ApprovalProof, ConnectWalletRequest, CreateContractRequest,
        GetContractRequest, ListContractsRequest, ListForApproverRequest, OnchainApproval,
        RecordDocumentRequest, RegisterUserRequest, RejectApprovalRequest, RequestError,
        SubmitApprovalRequest, UpdateUserRoleRequest,
    },
    response::{
        ApprovalMessageResponseDissolved, CreateContractResponse, GetContractResponseDissolved,
        ListContractsResponse, ListUsersResponse, RecordDocumentResponse,
        RejectApprovalResponse, SubmitApprovalResponseDissolved, UserResponse,
    },
};
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    App, AppDissolved,
    error::AppError,
    payload::{
        ContractPayload,
        request::{
            ApprovalMessageRequestPayload, ApprovalMessageRequestPayloadDissolved,
            ConnectWalletRequestPayload, ConnectWalletRequestPayloadDissolved,
            CreateContractRequestPayload, CreateContractRequestPayloadDissolved,
            GetContractRequestPayload, GetContractRequestPayloadDissolved, InboxPayload,
            ListContractsRequestPayload, ListContractsRequestPayloadDissolved,
            ListForApproverRequestPayload, ListForApproverRequestPayloadDissolved,
            RecordDocumentRequestPayload, RecordDocumentRequestPayloadDissolved,
            RegisterUserRequestPayload, RegisterUserRequestPayloadDissolved,
            RejectApprovalRequestPayload, RejectApprovalRequestPayloadDissolved,
            SubmitApprovalRequestPayload, SubmitApprovalRequestPayloadDissolved,
            UpdateUserRoleRequestPayload, UpdateUserRoleRequestPayloadDissolved,
        },
        response::{
            ApprovalMessageResponsePayload, ContractResponsePayload,
            ListContractsResponsePayload, ListUsersResponsePayload, RecordDocumentResponsePayload,
            SubmitApprovalResponsePayload, UserResponsePayload,
        },
    },
};

#[tracing::instrument]
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// CONTRACTS
// ================================================================================================

#[tracing::instrument(skip_all)]
pub async fn create_contract(
    State(app): State<App>,
    Json(payload): Json<CreateContractRequestPayload>,
) -> Result<Json<ContractResponsePayload>, AppError> {
    let AppDissolved { engine } = app.dissolve();

    let CreateContractRequestPayloadDissolved {
        title,
        description,
        mode,
        threshold,
        creator_id,
        approver_ids,
        fee,
    } = payload.dissolve();

    let request = {
        let mode: ContractMode = mode.parse().map_err(|_| AppError::InvalidContractMode)?;
        let fee = fee.as_deref().map(str::parse::<FeeAmount>).transpose()?;

        CreateContractRequest::builder()
            .title(title)
            .description(description)
            .mode(mode)
            .threshold(threshold)
            .creator_id(creator_id.into())
            .approvers(approver_ids.into_iter().map(From::from).collect())
            .maybe_fee(fee)
            .build()
            .map_err(RequestError::from)
            .inspect_err(|e| tracing::warn!("failed to create request: {e}"))?
    };

    let contract = engine
        .create_contract(request)
        .await
        .map(CreateContractResponse::dissolve)?
        .contract;

    let response = ContractResponsePayload::builder().contract(contract.into()).build();

    Ok(Json(response))
}

#[tracing::instrument(skip_all)]
pub async fn get_contract_details(
    State(app): State<App>,
    Json(payload): Json<GetContractRequestPayload>,
) -> Result<Json<ContractResponsePayload>, AppError> {
    let AppDissolved { engine } = app.dissolve();

    let GetContractRequestPayloadDissolved { contract_id } = payload.dissolve();

    let request = GetContractRequest::builder().contract_id(contract_id.into()).build();

    let GetContractResponseDissolved { contract } = engine.get_contract(request).await?.dissolve();

    let contract = contract.ok_or(AppError::ContractNotFound)?;

    let response = ContractResponsePayload::builder().contract(contract.into()).build();

    Ok(Json(response))
}

#[tracing::instrument(skip_all)]
pub async fn list_contracts(
    State(app): State<App>,
    Json(payload): Json<ListContractsRequestPayload>,
) -> Result<Json<ListContractsResponsePayload>, AppError> {
    let AppDissolved { engine } = app.dissolve();

    let ListContractsRequestPayloadDissolved { status_filter } = payload.dissolve();

    let status_filter: Option<ContractStatus> = status_filter
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(|_| AppError::InvalidContractStatus)?;

    let request = ListContractsRequest::builder().maybe_status_filter(status_filter).build();

    let contracts = engine
        .list_contracts(request)
        .await
        .map(ListContractsResponse::dissolve)?
        .contracts;

    Ok(Json(contracts_payload(contracts)))
}

#[tracing::instrument(skip_all)]
pub async fn list_for_approver(
    State(app): State<App>,
    Json(payload): Json<ListForApproverRequestPayload>,
) -> Result<Json<ListContractsResponsePayload>, AppError> {
    let AppDissolved { engine } = app.dissolve();

    let ListForApproverRequestPayloadDissolved { approver_id, inbox } = payload.dissolve();

    let inbox = match inbox {
        InboxPayload::Pending => ApproverInbox::Pending,
        InboxPayload::History => ApproverInbox::History,
    };

    let request = ListForApproverRequest::builder()
        .approver_id(approver_id.into())
        .inbox(inbox)
        .build();

    let contracts = engine
        .list_for_approver(request)
        .await
        .map(ListContractsResponse::dissolve)?
        .contracts;

    Ok(Json(contracts_payload(contracts)))
}

// APPROVALS
// ================================================================================================

#[tracing::instrument(skip_all)]
pub async fn submit_approval(
    State(app): State<App>,
    Json(payload): Json<SubmitApprovalRequestPayload>,
) -> Result<Json<SubmitApprovalResponsePayload>, AppError> {
    let AppDissolved { engine } = app.dissolve();

    let SubmitApprovalRequestPayloadDissolved {
        contract_id,
        approver_id,
        signature,
        tx_hash,
        fee_payment_tx_hash,
    } = payload.dissolve();

    let proof = match (signature, tx_hash, fee_payment_tx_hash) {
        (None, None, None) => ApprovalProof::Offchain,
        (None, ..) => return Err(AppError::MissingSignature),
        (Some(signature), tx_hash, fee_payment_tx_hash) => {
            let approval = OnchainApproval::builder()
                .signature(signature.parse::<Signature>()?)
                .maybe_tx_hash(tx_hash.as_deref().map(str::parse::<TxHash>).transpose()?)
                .maybe_fee_payment_tx_hash(
                    fee_payment_tx_hash.as_deref().map(str::parse::<TxHash>).transpose()?,
                )
                .build();

            ApprovalProof::Onchain(approval)
        },
    };

    let request = SubmitApprovalRequest::builder()
        .contract_id(contract_id.into())
        .approver_id(approver_id.into())
        .proof(proof)
        .build();

    let SubmitApprovalResponseDissolved { contract, approved_count, finalized } =
        engine.submit_approval(request).await?.dissolve();

    let response = SubmitApprovalResponsePayload::builder()
        .contract(contract.into())
        .approved_count(approved_count)
        .finalized(finalized)
        .build();

    Ok(Json(response))
}

#[tracing::instrument(skip_all)]
pub async fn reject_approval(
    State(app): State<App>,
    Json(payload): Json<RejectApprovalRequestPayload>,
) -> Result<Json<ContractResponsePayload>, AppError> {
    let AppDissolved { engine } = app.dissolve();

    let RejectApprovalRequestPayloadDissolved { contract_id, approver_id } = payload.dissolve();

    let request = RejectApprovalRequest::builder()
        .contract_id(contract_id.into())
        .approver_id(approver_id.into())
        .build();

    let contract = engine
        .reject_approval(request)
        .await
        .map(RejectApprovalResponse::dissolve)?
        .contract;

    let response = ContractResponsePayload::builder().contract(contract.into()).build();

    Ok(Json(response))
}

#[tracing::instrument(skip_all)]
pub async fn approval_message(
    State(app): State<App>,
    Json(payload): Json<ApprovalMessageRequestPayload>,
) -> Result<Json<ApprovalMessageResponsePayload>, AppError> {
    let AppDissolved { engine } = app.dissolve();

    let ApprovalMessageRequestPayloadDissolved { contract_id } = payload.dissolve();

    let request = ApprovalMessageRequest::builder().contract_id(contract_id.into()).build();

    let ApprovalMessageResponseDissolved { message, digest } =
        engine.approval_message(request).await?.dissolve();

    let response = ApprovalMessageResponsePayload::builder().message(message).digest(digest).build();

    Ok(Json(response))
}

// DOCUMENTS
// ================================================================================================

#[tracing::instrument(skip_all)]
pub async fn record_document(
    State(app): State<App>,
    Json(payload): Json<RecordDocumentRequestPayload>,
) -> Result<Json<RecordDocumentResponsePayload>, AppError> {
    let AppDissolved { engine } = app.dissolve();

    let RecordDocumentRequestPayloadDissolved {
        contract_id,
        file_name,
        mime_type,
        size,
        content_hash,
        storage_pointer,
        uploaded_by,
    } = payload.dissolve();

    let request = RecordDocumentRequest::builder()
        .contract_id(contract_id.into())
        .file_name(file_name)
        .mime_type(mime_type)
        .size(size)
        .content_hash(content_hash)
        .storage_pointer(storage_pointer)
        .uploaded_by(uploaded_by.into())
        .build()
        .map_err(RequestError::from)?;

    let document = engine
        .record_document(request)
        .await
        .map(RecordDocumentResponse::dissolve)?
        .document;

    let response = RecordDocumentResponsePayload::builder().document(document.into()).build();

    Ok(Json(response))
}

// USERS
// ================================================================================================

#[tracing::instrument(skip_all)]
pub async fn register_user(
    State(app): State<App>,
    Json(payload): Json<RegisterUserRequestPayload>,
) -> Result<Json<UserResponsePayload>, AppError> {
    let AppDissolved { engine } = app.dissolve();

    let RegisterUserRequestPayloadDissolved { email, display_name, role } = payload.dissolve();

    let role: Option<UserRole> = role
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(|_| AppError::InvalidUserRole)?;

    let request = RegisterUserRequest::builder()
        .email(email)
        .display_name(display_name)
        .maybe_role(role)
        .build()
        .map_err(RequestError::from)?;

    let user = engine.register_user(request).await.map(UserResponse::dissolve)?.user;

    Ok(Json(UserResponsePayload::builder().user(user.into()).build()))
}

#[tracing::instrument(skip_all)]
pub async fn list_users(State(app): State<App>) -> Result<Json<ListUsersResponsePayload>, AppError> {
    let AppDissolved { engine } = app.dissolve();

    let users = engine.list_users().await.map(ListUsersResponse::dissolve)?.users;

    let response = ListUsersResponsePayload::builder()
        .users(users.into_iter().map(From::from).collect())
        .build();

    Ok(Json(response))
}

#[tracing::instrument(skip_all)]
pub async fn connect_wallet(
    State(app): State<App>,
    Json(payload): Json<ConnectWalletRequestPayload>,
) -> Result<Json<UserResponsePayload>, AppError> {
    let AppDissolved { engine } = app.dissolve();

    let ConnectWalletRequestPayloadDissolved { user_id, wallet_address } = payload.dissolve();

    let request = ConnectWalletRequest::builder()
        .user_id(user_id.into())
        .wallet_address(wallet_address.parse::<WalletAddress>()?)
        .build();

    let user = engine.connect_wallet(request).await.map(UserResponse::dissolve)?.user;

    Ok(Json(UserResponsePayload::builder().user(user.into()).build()))
}

#[tracing::instrument(skip_all)]
pub async fn update_user_role(
    State(app): State<App>,
    Json(payload): Json<UpdateUserRoleRequestPayload>,
) -> Result<Json<UserResponsePayload>, AppError> {
    let AppDissolved { engine } = app.dissolve();

    let UpdateUserRoleRequestPayloadDissolved { acting_user_id, user_id, role } =
        payload.dissolve();

    let role: UserRole = role.parse().map_err(|_| AppError::InvalidUserRole)?;

    let request = UpdateUserRoleRequest::builder()
        .acting_user_id(acting_user_id.into())
        .user_id(user_id.into())
        .role(role)
        .build();

    let user = engine.update_user_role(request).await.map(UserResponse::dissolve)?.user;

    Ok(Json(UserResponsePayload::builder().user(user.into()).build()))
}

fn contracts_payload<I>(contracts: I) -> ListContractsResponsePayload
where
    I: IntoIterator,
    ContractPayload: From<I::Item>,
{
    ListContractsResponsePayload::builder()
        .contracts(contracts.into_iter().map(From::from).collect())
        .build()
}
