use core::fmt;

use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
        pub struct $name(Uuid);

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from($name(uuid): $name) -> Self {
                uuid
            }
        }

        impl From<&$name> for Uuid {
            fn from($name(uuid): &$name) -> Self {
                *uuid
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id! {
    /// A unique identifier for a contract.
    ContractId
}

uuid_id! {
    /// A unique identifier for a user.
    UserId
}

uuid_id! {
    /// A unique identifier for a single approver's approval row.
    ApprovalId
}

uuid_id! {
    /// A unique identifier for a document attached to a contract.
    DocumentId
}

uuid_id! {
    /// A unique identifier for a recorded blockchain proof.
    ProofId
}
