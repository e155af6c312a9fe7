use diesel::{ExpressionMethods, QueryDsl, SelectableHelper, dsl, result::OptionalExtension};
use diesel_async::RunQueryDsl;
use futures::{Stream, TryStreamExt};
use oblux::U63;
use uuid::Uuid;

use crate::persistence::{
    pool::DbConn,
    record::{UserRole, insert::NewUserRecord, select::UserRecord},
    schema,
};

use super::error::Result;

pub async fn save_new_user(conn: &mut DbConn, new_user: NewUserRecord<'_>) -> Result<UserRecord> {
    diesel::insert_into(schema::app_user::table)
        .values(new_user)
        .returning(UserRecord::as_returning())
        .get_result(conn)
        .await
        .map_err(From::from)
}

pub async fn fetch_user_by_id(conn: &mut DbConn, id: Uuid) -> Result<Option<UserRecord>> {
    schema::app_user::table
        .find(id)
        .select(UserRecord::as_select())
        .first(conn)
        .await
        .optional()
        .map_err(From::from)
}

pub async fn load_users_by_ids(conn: &mut DbConn, ids: &[Uuid]) -> Result<Vec<UserRecord>> {
    schema::app_user::table
        .filter(schema::app_user::id.eq_any(ids))
        .select(UserRecord::as_select())
        .load(conn)
        .await
        .map_err(From::from)
}

pub async fn count_users_by_ids(conn: &mut DbConn, ids: &[Uuid]) -> Result<U63> {
    let count = schema::app_user::table
        .filter(schema::app_user::id.eq_any(ids))
        .count()
        .get_result::<i64>(conn)
        .await?;

    super::into_count(count)
}

pub async fn stream_users(conn: &mut DbConn) -> Result<impl Stream<Item = Result<UserRecord>>> {
    let stream = schema::app_user::table
        .select(UserRecord::as_select())
        .order_by(schema::app_user::created_at.desc())
        .load_stream(conn)
        .await?
        .map_err(From::from);

    Ok(stream)
}

pub async fn update_wallet_address_by_user_id(
    conn: &mut DbConn,
    id: Uuid,
    wallet_address: &str,
) -> Result<Option<UserRecord>> {
    diesel::update(schema::app_user::table.find(id))
        .set((
            schema::app_user::wallet_address.eq(wallet_address),
            schema::app_user::updated_at.eq(dsl::now),
        ))
        .returning(UserRecord::as_returning())
        .get_result(conn)
        .await
        .optional()
        .map_err(From::from)
}

pub async fn update_role_by_user_id(
    conn: &mut DbConn,
    id: Uuid,
    role: UserRole,
) -> Result<Option<UserRecord>> {
    diesel::update(schema::app_user::table.find(id))
        .set((schema::app_user::role.eq(role), schema::app_user::updated_at.eq(dsl::now)))
        .returning(UserRecord::as_returning())
        .get_result(conn)
        .await
        .optional()
        .map_err(From::from)
}
