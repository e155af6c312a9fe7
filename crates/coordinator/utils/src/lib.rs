//! utils crate for the contract approval coordinator.

mod message;

pub use self::message::{approval_message, approval_message_digest, eip191_digest};
