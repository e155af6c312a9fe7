use diesel::{ExpressionMethods, QueryDsl, SelectableHelper, result::OptionalExtension};
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::persistence::{
    pool::DbConn,
    record::{insert::NewDocumentRecord, select::DocumentRecord},
    schema,
};

use super::error::Result;

pub async fn save_new_document(
    conn: &mut DbConn,
    new_document: NewDocumentRecord<'_>,
) -> Result<DocumentRecord> {
    diesel::insert_into(schema::document::table)
        .values(new_document)
        .returning(DocumentRecord::as_returning())
        .get_result(conn)
        .await
        .map_err(From::from)
}

pub async fn load_documents_by_contract_ids(
    conn: &mut DbConn,
    contract_ids: &[Uuid],
) -> Result<Vec<DocumentRecord>> {
    schema::document::table
        .filter(schema::document::contract_id.eq_any(contract_ids))
        .select(DocumentRecord::as_select())
        .order_by((schema::document::created_at.asc(), schema::document::id))
        .load(conn)
        .await
        .map_err(From::from)
}

pub async fn fetch_latest_document_by_contract_id(
    conn: &mut DbConn,
    contract_id: Uuid,
) -> Result<Option<DocumentRecord>> {
    schema::document::table
        .filter(schema::document::contract_id.eq(contract_id))
        .select(DocumentRecord::as_select())
        .order_by(schema::document::created_at.desc())
        .first(conn)
        .await
        .optional()
        .map_err(From::from)
}
