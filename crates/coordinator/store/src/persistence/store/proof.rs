use diesel::{ExpressionMethods, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::persistence::{
    pool::DbConn,
    record::{insert::NewProofRecord, select::ProofRecord},
    schema,
};

use super::error::Result;

pub async fn save_new_proof(conn: &mut DbConn, new_proof: NewProofRecord<'_>) -> Result<ProofRecord> {
    diesel::insert_into(schema::blockchain_proof::table)
        .values(new_proof)
        .returning(ProofRecord::as_returning())
        .get_result(conn)
        .await
        .map_err(From::from)
}

pub async fn load_proofs_by_contract_ids(
    conn: &mut DbConn,
    contract_ids: &[Uuid],
) -> Result<Vec<ProofRecord>> {
    schema::blockchain_proof::table
        .filter(schema::blockchain_proof::contract_id.eq_any(contract_ids))
        .select(ProofRecord::as_select())
        .order_by((schema::blockchain_proof::proven_at.asc(), schema::blockchain_proof::id))
        .load(conn)
        .await
        .map_err(From::from)
}
