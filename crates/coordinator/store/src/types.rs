use approval_coordinator_domain::{
    chain::{Signature, TxHash},
    contract::ContractDetails,
};
use bon::Builder;
use dissolve_derive::Dissolve;

/// The evidence persisted alongside an approval.
#[derive(Debug, Clone, Default, Builder)]
pub struct ApprovalEvidence {
    /// The approver's signature, stored on the approval row.
    signature: Option<Signature>,

    /// The transaction hash stored on the approval row.
    tx_hash: Option<TxHash>,

    /// Every transaction hash to append as a blockchain proof.
    #[builder(default)]
    proof_tx_hashes: Vec<TxHash>,

    /// The network label recorded on each appended proof.
    #[builder(into, default)]
    network: String,
}

impl ApprovalEvidence {
    /// Returns the signature, if any.
    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    /// Returns the transaction hash, if any.
    pub fn tx_hash(&self) -> Option<&TxHash> {
        self.tx_hash.as_ref()
    }

    /// Returns the proof transaction hashes.
    pub fn proof_tx_hashes(&self) -> &[TxHash] {
        &self.proof_tx_hashes
    }

    /// Returns the network label.
    pub fn network(&self) -> &str {
        &self.network
    }
}

/// The result of recording an approval.
#[derive(Debug, Clone, Builder, Dissolve)]
pub struct ApprovalOutcome {
    /// The contract snapshot after the approval committed.
    details: ContractDetails,

    /// The approved count the finalization decision was based on.
    approved_count: u64,

    /// Whether this approval moved the contract to completed.
    finalized: bool,
}

impl ApprovalOutcome {
    /// Returns the contract snapshot.
    pub fn details(&self) -> &ContractDetails {
        &self.details
    }

    /// Returns the approved count used for the finalization decision.
    pub fn approved_count(&self) -> u64 {
        self.approved_count
    }

    /// Returns `true` if this approval finalized the contract.
    pub fn finalized(&self) -> bool {
        self.finalized
    }
}

/// Which of an approver's contracts to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApproverInbox {
    /// Contracts still awaiting the approver's decision, newest first.
    Pending,
    /// Contracts the approver already approved or rejected, most recently updated first.
    History,
}
