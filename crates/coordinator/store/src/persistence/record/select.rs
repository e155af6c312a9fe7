use chrono::{DateTime, Utc};
use diesel::prelude::{Queryable, Selectable};
use dissolve_derive::Dissolve;
use uuid::Uuid;

use crate::persistence::{
    record::{ApprovalStatus, ContractMode, ContractStatus, UserRole},
    schema,
};

#[derive(Debug, Clone, Dissolve, Queryable, Selectable)]
#[diesel(table_name = schema::app_user)]
pub struct UserRecord {
    id: Uuid,
    email: String,
    display_name: String,
    role: UserRole,
    wallet_address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Dissolve, Queryable, Selectable)]
#[diesel(table_name = schema::contract)]
pub struct ContractRecord {
    id: Uuid,
    title: String,
    description: String,
    mode: ContractMode,
    threshold: i32,
    status: ContractStatus,
    creator_id: Uuid,
    fee: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Dissolve, Queryable, Selectable)]
#[diesel(table_name = schema::approval)]
pub struct ApprovalRecord {
    id: Uuid,
    contract_id: Uuid,
    approver_id: Uuid,
    approver_index: i32,
    status: ApprovalStatus,
    approved_at: Option<DateTime<Utc>>,
    signature: Option<String>,
    tx_hash: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Dissolve, Queryable, Selectable)]
#[diesel(table_name = schema::document)]
pub struct DocumentRecord {
    id: Uuid,
    contract_id: Uuid,
    file_name: String,
    mime_type: String,
    size: i64,
    content_hash: String,
    storage_pointer: String,
    uploaded_by: Uuid,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Dissolve, Queryable, Selectable)]
#[diesel(table_name = schema::blockchain_proof)]
pub struct ProofRecord {
    id: Uuid,
    contract_id: Uuid,
    tx_hash: String,
    network: String,
    proven_at: DateTime<Utc>,
}

impl ContractRecord {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn creator_id(&self) -> Uuid {
        self.creator_id
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    pub fn status(&self) -> ContractStatus {
        self.status
    }
}

impl ApprovalRecord {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn contract_id(&self) -> Uuid {
        self.contract_id
    }

    pub fn status(&self) -> ApprovalStatus {
        self.status
    }
}

impl UserRecord {
    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl DocumentRecord {
    pub fn contract_id(&self) -> Uuid {
        self.contract_id
    }
}

impl ProofRecord {
    pub fn contract_id(&self) -> Uuid {
        self.contract_id
    }
}
