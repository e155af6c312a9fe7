use approval_coordinator_domain::approval::ApprovalStatus as DomainApprovalStatus;
use diesel::{ExpressionMethods, QueryDsl, SelectableHelper, dsl, result::OptionalExtension};
use diesel_async::RunQueryDsl;
use futures::{Stream, TryStreamExt};
use uuid::Uuid;

use crate::persistence::{
    pool::DbConn,
    record::{ApprovalStatus, ContractStatus, insert::NewContractRecord, select::ContractRecord},
    schema,
};

use super::error::Result;

pub async fn save_new_contract(
    conn: &mut DbConn,
    new_contract: NewContractRecord<'_>,
) -> Result<ContractRecord> {
    diesel::insert_into(schema::contract::table)
        .values(new_contract)
        .returning(ContractRecord::as_returning())
        .get_result(conn)
        .await
        .map_err(From::from)
}

pub async fn fetch_contract_by_id(conn: &mut DbConn, id: Uuid) -> Result<Option<ContractRecord>> {
    schema::contract::table
        .find(id)
        .select(ContractRecord::as_select())
        .first(conn)
        .await
        .optional()
        .map_err(From::from)
}

/// Fetches the contract row and holds a row lock on it until the surrounding transaction ends.
pub async fn fetch_contract_by_id_for_update(
    conn: &mut DbConn,
    id: Uuid,
) -> Result<Option<ContractRecord>> {
    schema::contract::table
        .find(id)
        .select(ContractRecord::as_select())
        .for_update()
        .first(conn)
        .await
        .optional()
        .map_err(From::from)
}

pub async fn exists_contract_by_id(conn: &mut DbConn, id: Uuid) -> Result<bool> {
    diesel::select(dsl::exists(schema::contract::table.find(id)))
        .get_result(conn)
        .await
        .map_err(From::from)
}

pub async fn stream_contracts(
    conn: &mut DbConn,
) -> Result<impl Stream<Item = Result<ContractRecord>>> {
    let stream = schema::contract::table
        .select(ContractRecord::as_select())
        .order_by(schema::contract::created_at.desc())
        .load_stream(conn)
        .await?
        .map_err(From::from);

    Ok(stream)
}

pub async fn stream_contracts_by_status(
    conn: &mut DbConn,
    status: ContractStatus,
) -> Result<impl Stream<Item = Result<ContractRecord>>> {
    let stream = schema::contract::table
        .filter(schema::contract::status.eq(status))
        .select(ContractRecord::as_select())
        .order_by(schema::contract::created_at.desc())
        .load_stream(conn)
        .await?
        .map_err(From::from);

    Ok(stream)
}

/// Streams the contracts on which the approver still has a pending approval row.
pub async fn stream_contracts_pending_for_approver(
    conn: &mut DbConn,
    approver_id: Uuid,
) -> Result<impl Stream<Item = Result<ContractRecord>>> {
    let pending = ApprovalStatus::from(DomainApprovalStatus::Pending);

    let stream = schema::contract::table
        .inner_join(schema::approval::table)
        .filter(schema::approval::approver_id.eq(approver_id))
        .filter(schema::approval::status.eq(pending))
        .select(ContractRecord::as_select())
        .order_by(schema::contract::created_at.desc())
        .load_stream(conn)
        .await?
        .map_err(From::from);

    Ok(stream)
}

/// Streams the contracts on which the approver has already approved or rejected.
pub async fn stream_contracts_decided_by_approver(
    conn: &mut DbConn,
    approver_id: Uuid,
) -> Result<impl Stream<Item = Result<ContractRecord>>> {
    let pending = ApprovalStatus::from(DomainApprovalStatus::Pending);

    let stream = schema::contract::table
        .inner_join(schema::approval::table)
        .filter(schema::approval::approver_id.eq(approver_id))
        .filter(schema::approval::status.ne(pending))
        .select(ContractRecord::as_select())
        .order_by(schema::contract::updated_at.desc())
        .load_stream(conn)
        .await?
        .map_err(From::from);

    Ok(stream)
}

/// Moves the contract to `new_status` and bumps its update timestamp.
pub async fn update_status_by_contract_id(
    conn: &mut DbConn,
    id: Uuid,
    new_status: ContractStatus,
) -> Result<bool> {
    let affected = diesel::update(schema::contract::table.find(id))
        .set((schema::contract::status.eq(new_status), schema::contract::updated_at.eq(dsl::now)))
        .execute(conn)
        .await?;

    Ok(affected == 1)
}

pub async fn touch_contract_by_id(conn: &mut DbConn, id: Uuid) -> Result<bool> {
    let affected = diesel::update(schema::contract::table.find(id))
        .set(schema::contract::updated_at.eq(dsl::now))
        .execute(conn)
        .await?;

    Ok(affected == 1)
}
