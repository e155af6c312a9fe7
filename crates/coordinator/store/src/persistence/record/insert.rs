use bon::Builder;
use diesel::prelude::Insertable;
use uuid::Uuid;

use crate::persistence::{
    record::{ContractMode, UserRole},
    schema,
};

#[derive(Debug, Builder, Insertable)]
#[diesel(table_name = schema::app_user)]
pub struct NewUserRecord<'a> {
    email: &'a str,
    display_name: &'a str,
    role: UserRole,
}

#[derive(Debug, Builder, Insertable)]
#[diesel(table_name = schema::contract)]
pub struct NewContractRecord<'a> {
    id: Uuid,
    title: &'a str,
    description: &'a str,
    mode: ContractMode,
    threshold: i32,
    creator_id: Uuid,
    fee: Option<&'a str>,
}

#[derive(Debug, Builder, Insertable)]
#[diesel(table_name = schema::approval)]
pub struct NewApprovalRecord {
    contract_id: Uuid,
    approver_id: Uuid,
    approver_index: i32,
}

#[derive(Debug, Builder, Insertable)]
#[diesel(table_name = schema::document)]
pub struct NewDocumentRecord<'a> {
    contract_id: Uuid,
    file_name: &'a str,
    mime_type: &'a str,
    size: i64,
    content_hash: &'a str,
    storage_pointer: &'a str,
    uploaded_by: Uuid,
}

#[derive(Debug, Builder, Insertable)]
#[diesel(table_name = schema::blockchain_proof)]
pub struct NewProofRecord<'a> {
    contract_id: Uuid,
    tx_hash: &'a str,
    network: &'a str,
}
