use approval_coordinator_domain::chain::ChainValueError;
use approval_coordinator_engine::{
    ApprovalEngineError, ApprovalEngineErrorKind, request::RequestError,
};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub(crate) enum AppError {
    #[error("approval engine error: {0}")]
    ApprovalEngine(Box<ApprovalEngineError>),

    #[error("invalid chain value: {0}")]
    InvalidChainValue(#[from] ChainValueError),

    #[error("invalid contract mode error")]
    InvalidContractMode,

    #[error("invalid contract status error")]
    InvalidContractStatus,

    #[error("invalid user role error")]
    InvalidUserRole,

    #[error("on-chain approval evidence requires a signature")]
    MissingSignature,

    #[error("contract not found error")]
    ContractNotFound,

    #[error("request error: {0}")]
    RequestError(#[from] RequestError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidChainValue(_)
            | AppError::InvalidContractMode
            | AppError::InvalidContractStatus
            | AppError::InvalidUserRole
            | AppError::MissingSignature
            | AppError::RequestError(_) => StatusCode::BAD_REQUEST,
            AppError::ContractNotFound => StatusCode::NOT_FOUND,
            AppError::ApprovalEngine(err) => match err.kind() {
                ApprovalEngineErrorKind::Validation(_) => StatusCode::BAD_REQUEST,
                ApprovalEngineErrorKind::NotFound(_) => StatusCode::NOT_FOUND,
                ApprovalEngineErrorKind::Unauthorized(_) => StatusCode::FORBIDDEN,
                ApprovalEngineErrorKind::DuplicateOrUnknownApprover
                | ApprovalEngineErrorKind::ContractAlreadyFinalized
                | ApprovalEngineErrorKind::Conflict(_) => StatusCode::CONFLICT,
                ApprovalEngineErrorKind::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl From<ApprovalEngineError> for AppError {
    fn from(err: ApprovalEngineError) -> Self {
        Self::ApprovalEngine(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.status_code();

        match code {
            StatusCode::NOT_FOUND => tracing::info!("not found: {self}"),
            code if code.is_client_error() => tracing::warn!("client error: {self}"),
            _ => tracing::error!("server error: {self}"),
        }

        (code, self.to_string()).into_response()
    }
}
