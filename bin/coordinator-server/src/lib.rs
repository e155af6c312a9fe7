#![allow(missing_docs)]

pub mod config;

mod error;
mod payload;
mod routes;

use std::sync::Arc;

use approval_coordinator_engine::ApprovalEngine;
use axum::{Router, routing};
use bon::Builder;
use dissolve_derive::Dissolve;

pub fn create_router(app: App) -> Router {
    Router::new()
        .route("/health", routing::get(routes::health))
        .route("/api/v1/contract/create", routing::post(routes::create_contract))
        .route("/api/v1/contract/details", routing::post(routes::get_contract_details))
        .route("/api/v1/contract/list", routing::post(routes::list_contracts))
        .route("/api/v1/approver/inbox", routing::post(routes::list_for_approver))
        .route("/api/v1/approval/submit", routing::post(routes::submit_approval))
        .route("/api/v1/approval/reject", routing::post(routes::reject_approval))
        .route("/api/v1/approval/message", routing::post(routes::approval_message))
        .route("/api/v1/document/record", routing::post(routes::record_document))
        .route("/api/v1/user/register", routing::post(routes::register_user))
        .route("/api/v1/user/list", routing::post(routes::list_users))
        .route("/api/v1/user/connect-wallet", routing::post(routes::connect_wallet))
        .route("/api/v1/user/update-role", routing::post(routes::update_user_role))
        .with_state(app)
}

#[derive(Clone, Builder, Dissolve)]
pub struct App {
    engine: Arc<ApprovalEngine>,
}
