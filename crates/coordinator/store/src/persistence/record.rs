pub mod insert;
pub mod select;

use core::str::FromStr;

use std::io::Write;

use approval_coordinator_domain::{
    approval::ApprovalStatus as DomainApprovalStatus,
    contract::{ContractMode as DomainContractMode, ContractStatus as DomainContractStatus},
    user::UserRole as DomainUserRole,
};
use diesel::{
    backend::Backend,
    deserialize::{self, FromSql, FromSqlRow},
    expression::AsExpression,
    pg::Pg,
    serialize::{self, IsNull, Output, ToSql},
};

use crate::persistence::schema::sql_types::{
    ApprovalStatus as ApprovalStatusSql, ContractMode as ContractModeSql,
    ContractStatus as ContractStatusSql, UserRole as UserRoleSql,
};

/// Declares a newtype over a domain enum that maps onto a postgres enum type through the
/// enum's `strum` names.
macro_rules! pg_enum {
    ($name:ident($domain:ty) => $sql:ty) => {
        #[derive(Debug, Clone, Copy, AsExpression, FromSqlRow)]
        #[diesel(sql_type = $sql)]
        pub struct $name($domain);

        impl $name {
            pub fn into_inner(self) -> $domain {
                self.0
            }
        }

        impl From<$domain> for $name {
            fn from(value: $domain) -> Self {
                Self(value)
            }
        }

        impl ToSql<$sql, Pg> for $name {
            fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
                out.write_all(<&str>::from(&self.0).as_bytes())?;

                Ok(IsNull::No)
            }
        }

        impl FromSql<$sql, Pg> for $name {
            fn from_sql(bz: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
                str::from_utf8(bz.as_bytes())
                    .map(FromStr::from_str)?
                    .map(Self)
                    .map_err(From::from)
            }
        }
    };
}

pg_enum!(UserRole(DomainUserRole) => UserRoleSql);

pg_enum!(ContractMode(DomainContractMode) => ContractModeSql);

pg_enum!(ContractStatus(DomainContractStatus) => ContractStatusSql);

pg_enum!(ApprovalStatus(DomainApprovalStatus) => ApprovalStatusSql);
