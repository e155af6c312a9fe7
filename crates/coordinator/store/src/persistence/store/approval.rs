use approval_coordinator_domain::approval::ApprovalStatus as DomainApprovalStatus;
use chrono::{DateTime, Utc};
use diesel::{ExpressionMethods, QueryDsl, SelectableHelper, dsl, result::OptionalExtension};
use diesel_async::RunQueryDsl;
use oblux::U63;
use uuid::Uuid;

use crate::persistence::{
    pool::DbConn,
    record::{
        ApprovalStatus,
        insert::NewApprovalRecord,
        select::{ApprovalRecord, UserRecord},
    },
    schema,
};

use super::error::Result;

pub async fn save_new_approvals(
    conn: &mut DbConn,
    new_approvals: &[NewApprovalRecord],
) -> Result<usize> {
    diesel::insert_into(schema::approval::table)
        .values(new_approvals)
        .execute(conn)
        .await
        .map_err(From::from)
}

pub async fn fetch_approval_by_contract_id_and_approver_id(
    conn: &mut DbConn,
    contract_id: Uuid,
    approver_id: Uuid,
) -> Result<Option<ApprovalRecord>> {
    schema::approval::table
        .filter(schema::approval::contract_id.eq(contract_id))
        .filter(schema::approval::approver_id.eq(approver_id))
        .select(ApprovalRecord::as_select())
        .first(conn)
        .await
        .optional()
        .map_err(From::from)
}

/// Loads the approval rows of the given contracts with the approver embedded, grouped by
/// contract and in approver order.
pub async fn load_approvals_with_approver_by_contract_ids(
    conn: &mut DbConn,
    contract_ids: &[Uuid],
) -> Result<Vec<(ApprovalRecord, UserRecord)>> {
    schema::approval::table
        .inner_join(schema::app_user::table)
        .filter(schema::approval::contract_id.eq_any(contract_ids))
        .select((ApprovalRecord::as_select(), UserRecord::as_select()))
        .order_by((schema::approval::contract_id, schema::approval::approver_index.asc()))
        .load(conn)
        .await
        .map_err(From::from)
}

pub async fn count_approved_by_contract_id(conn: &mut DbConn, contract_id: Uuid) -> Result<U63> {
    let approved = ApprovalStatus::from(DomainApprovalStatus::Approved);

    let count = schema::approval::table
        .filter(schema::approval::contract_id.eq(contract_id))
        .filter(schema::approval::status.eq(approved))
        .select(dsl::count(schema::approval::id))
        .get_result::<i64>(conn)
        .await?;

    super::into_count(count)
}

/// Records the approver's decision on a pending row.
///
/// Returns `false` if the row no longer is pending.
pub async fn update_decision_by_approval_id(
    conn: &mut DbConn,
    id: Uuid,
    new_status: ApprovalStatus,
    approved_at: Option<DateTime<Utc>>,
    signature: Option<&str>,
    tx_hash: Option<&str>,
) -> Result<bool> {
    let pending = ApprovalStatus::from(DomainApprovalStatus::Pending);

    let affected = diesel::update(
        schema::approval::table
            .filter(schema::approval::id.eq(id))
            .filter(schema::approval::status.eq(pending)),
    )
    .set((
        schema::approval::status.eq(new_status),
        schema::approval::approved_at.eq(approved_at),
        schema::approval::signature.eq(signature),
        schema::approval::tx_hash.eq(tx_hash),
        schema::approval::updated_at.eq(dsl::now),
    ))
    .execute(conn)
    .await?;

    assert!(affected <= 1, "duplicate approval id must not exist");

    Ok(affected == 1)
}
