//! Blockchain corroboration records.

use alloc::string::String;

use bon::Builder;
use chrono::{DateTime, Utc};
use dissolve_derive::Dissolve;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ContractId, ProofId, chain::TxHash};

/// A transaction hash recorded as evidence for an approval or a fee payment.
#[derive(Debug, Clone, Builder, Dissolve)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlockchainProof {
    /// The unique identifier of this proof.
    id: ProofId,

    /// The contract the transaction corroborates.
    contract_id: ContractId,

    /// The corroborating transaction hash.
    tx_hash: TxHash,

    /// Label of the network the transaction was submitted to.
    network: String,

    /// When the proof was recorded.
    proven_at: DateTime<Utc>,
}

impl BlockchainProof {
    /// Returns the proof id.
    pub fn id(&self) -> ProofId {
        self.id
    }

    /// Returns the id of the corroborated contract.
    pub fn contract_id(&self) -> ContractId {
        self.contract_id
    }

    /// Returns the transaction hash.
    pub fn tx_hash(&self) -> &TxHash {
        &self.tx_hash
    }

    /// Returns the network label.
    pub fn network(&self) -> &str {
        &self.network
    }

    /// Returns when the proof was recorded.
    pub fn proven_at(&self) -> DateTime<Utc> {
        self.proven_at
    }
}
