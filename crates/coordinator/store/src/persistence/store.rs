//! Query primitives over the approval tables.
//!
//! Every function takes a connection so that callers decide the transaction scope.

pub mod approval;
pub mod contract;
pub mod document;
pub mod proof;
pub mod user;

mod error;

pub use self::error::StoreError;

use oblux::U63;

use self::error::Result;

fn into_count(count: i64) -> Result<U63> {
    U63::from_signed(count).ok_or(StoreError::other("negative row count"))
}
