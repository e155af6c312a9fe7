//! Approval domain models and the per-approver status machine.

use bon::Builder;
use chrono::{DateTime, Utc};
use dissolve_derive::Dissolve;
use strum::{Display, EnumString, IntoStaticStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    ApprovalId, ContractId, Timestamps,
    chain::{Signature, TxHash},
    user::User,
};

/// The status of a single approver's vote on a contract.
///
/// A row starts out [`Pending`](ApprovalStatus::Pending) and moves exactly once to
/// [`Approved`](ApprovalStatus::Approved) or [`Rejected`](ApprovalStatus::Rejected).
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum ApprovalStatus {
    /// The approver has not voted yet.
    Pending,
    /// The approver approved the contract.
    Approved,
    /// The approver rejected the contract.
    Rejected,
}

impl ApprovalStatus {
    /// Returns `true` for the terminal statuses.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns `true` if a row in this status may move to `next`.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!((self, next), (Self::Pending, Self::Approved | Self::Rejected))
    }
}

/// One approver's approval row for a contract, with the approver's identity embedded.
///
/// # Type Parameters
///
/// * `AUX` - Auxiliary data type, defaults to [`Timestamps`] for tracking metadata.
#[derive(Debug, Clone, Builder, Dissolve)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Approval<AUX = Timestamps> {
    /// The unique identifier of this approval row.
    id: ApprovalId,

    /// The contract being approved.
    contract_id: ContractId,

    /// The approver assigned to this row.
    approver: User,

    /// The current status of the vote.
    status: ApprovalStatus,

    /// When the approver approved; present iff `status` is approved.
    approved_at: Option<DateTime<Utc>>,

    /// The signature the approver supplied with an on-chain approval.
    signature: Option<Signature>,

    /// The transaction hash corroborating an on-chain approval.
    tx_hash: Option<TxHash>,

    /// Auxiliary metadata associated with this approval.
    aux: AUX,
}

impl<AUX> Approval<AUX> {
    /// Returns the approval id.
    pub fn id(&self) -> ApprovalId {
        self.id
    }

    /// Returns the id of the contract this approval belongs to.
    pub fn contract_id(&self) -> ContractId {
        self.contract_id
    }

    /// Returns the approver.
    pub fn approver(&self) -> &User {
        &self.approver
    }

    /// Returns the status of the vote.
    pub fn status(&self) -> ApprovalStatus {
        self.status
    }

    /// Returns when the approver approved, if they did.
    pub fn approved_at(&self) -> Option<DateTime<Utc>> {
        self.approved_at
    }

    /// Returns the recorded signature, if any.
    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    /// Returns the recorded transaction hash, if any.
    pub fn tx_hash(&self) -> Option<&TxHash> {
        self.tx_hash.as_ref()
    }

    /// Returns a reference to the auxiliary metadata.
    pub fn aux(&self) -> &AUX {
        &self.aux
    }
}
