//! Contract domain models and the contract status machine.

use core::num::NonZeroU32;

use alloc::{string::String, vec::Vec};

use bon::Builder;
use dissolve_derive::Dissolve;
use strum::{Display, EnumString, IntoStaticStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    ContractId, Timestamps, UserId,
    approval::{Approval, ApprovalStatus},
    chain::FeeAmount,
    document::Document,
    proof::BlockchainProof,
    user::User,
};

/// How approvals of a contract are corroborated. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "lowercase"))]
pub enum ContractMode {
    /// Approvals carry a wallet signature and may carry transaction hashes.
    Onchain,
    /// Approvals live solely in the ledger.
    Offchain,
}

/// The lifecycle status of a contract.
///
/// A contract starts out [`Pending`](ContractStatus::Pending) and moves at most once to one of
/// the terminal statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum ContractStatus {
    /// The contract is collecting approvals.
    Pending,
    /// The approval threshold was reached.
    Completed,
    /// The contract was rejected.
    Rejected,
}

impl ContractStatus {
    /// Returns `true` for the terminal statuses.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns `true` if a contract in this status may move to `next`.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!((self, next), (Self::Pending, Self::Completed | Self::Rejected))
    }
}

/// A contract that requires a threshold of approvals before it is finalized.
///
/// The approver set is tracked with a type-state parameter so that a contract can only be
/// persisted once the threshold has been checked against its approvers.
///
/// # Type Parameters
///
/// * `APPR` - Approvers state: [`WithApprovers`] or [`WithoutApprovers`]
/// * `AUX` - Auxiliary data type, defaults to [`Timestamps`]
///
/// # Examples
///
/// ```ignore
/// let contract = Contract::builder()
///     .id(contract_id)
///     .title("Partnership Agreement".into())
///     .description(String::new())
///     .mode(ContractMode::Offchain)
///     .threshold(NonZeroU32::new(2).unwrap())
///     .status(ContractStatus::Pending)
///     .creator_id(creator_id)
///     .aux(())
///     .build()
///     .with_approvers(vec![alice, bob, charlie])?;
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Contract<APPR = WithoutApprovers, AUX = Timestamps> {
    /// The contract's unique identifier.
    id: ContractId,

    /// A short human-readable title.
    title: String,

    /// A free-form description of the agreement.
    description: String,

    /// How approvals are corroborated.
    mode: ContractMode,

    /// The minimum number of approvals required for completion.
    threshold: NonZeroU32,

    /// The lifecycle status.
    status: ContractStatus,

    /// The user that created the contract.
    creator_id: UserId,

    /// The fee each approver pays on-chain, if any.
    fee: Option<FeeAmount>,

    /// The approver set (type-state: present or absent).
    approvers: APPR,

    /// Auxiliary metadata associated with this contract.
    aux: AUX,
}

/// Type-state marker indicating that the approver set has been set.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WithApprovers(Vec<UserId>);

/// Type-state marker indicating that the approver set has not been set.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WithoutApprovers;

#[bon::bon]
impl<AUX> Contract<WithoutApprovers, AUX> {
    /// Creates a new contract without an approver set.
    ///
    /// Use [`with_approvers`](Self::with_approvers) to attach the approvers once the
    /// contract is about to be persisted.
    #[builder]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ContractId,
        title: String,
        description: String,
        mode: ContractMode,
        threshold: NonZeroU32,
        status: ContractStatus,
        creator_id: UserId,
        fee: Option<FeeAmount>,
        aux: AUX,
    ) -> Self {
        Self {
            id,
            title,
            description,
            mode,
            threshold,
            status,
            creator_id,
            fee,
            approvers: WithoutApprovers,
            aux,
        }
    }

    /// Adds the approver set to the contract.
    ///
    /// # Returns
    ///
    /// * `Some(contract)` if the approver count meets or exceeds the threshold
    /// * `None` if there are fewer approvers than the threshold
    pub fn with_approvers(self, approvers: Vec<UserId>) -> Option<Contract<WithApprovers, AUX>> {
        let threshold = usize::try_from(self.threshold.get()).ok()?;

        (approvers.len() >= threshold).then(|| Contract {
            id: self.id,
            title: self.title,
            description: self.description,
            mode: self.mode,
            threshold: self.threshold,
            status: self.status,
            creator_id: self.creator_id,
            fee: self.fee,
            approvers: WithApprovers(approvers),
            aux: self.aux,
        })
    }
}

impl<APPR, AUX> Contract<APPR, AUX> {
    /// Returns the contract id.
    pub fn id(&self) -> ContractId {
        self.id
    }

    /// Returns the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the approval mode.
    pub fn mode(&self) -> ContractMode {
        self.mode
    }

    /// Returns the approval threshold.
    pub fn threshold(&self) -> NonZeroU32 {
        self.threshold
    }

    /// Returns the lifecycle status.
    pub fn status(&self) -> ContractStatus {
        self.status
    }

    /// Returns the creator's id.
    pub fn creator_id(&self) -> UserId {
        self.creator_id
    }

    /// Returns the declared fee, if any.
    pub fn fee(&self) -> Option<&FeeAmount> {
        self.fee.as_ref()
    }

    /// Returns `true` if approvers must prove a fee payment.
    pub fn requires_fee_payment(&self) -> bool {
        self.mode == ContractMode::Onchain && self.fee.as_ref().is_some_and(|fee| !fee.is_zero())
    }

    /// Returns `true` if `approved_count` approvals satisfy the threshold.
    pub fn is_threshold_met(&self, approved_count: u64) -> bool {
        approved_count >= u64::from(self.threshold.get())
    }

    /// Returns a reference to the auxiliary metadata.
    pub fn aux(&self) -> &AUX {
        &self.aux
    }
}

impl<AUX> Contract<WithApprovers, AUX> {
    /// Returns the approver ids.
    pub fn approvers(&self) -> &[UserId] {
        &self.approvers.0
    }

    /// Dissolves the contract, extracting the approvers and auxiliary data.
    pub fn dissolve(self) -> (Contract<WithoutApprovers, ()>, Vec<UserId>, AUX) {
        let contract = Contract {
            id: self.id,
            title: self.title,
            description: self.description,
            mode: self.mode,
            threshold: self.threshold,
            status: self.status,
            creator_id: self.creator_id,
            fee: self.fee,
            approvers: WithoutApprovers,
            aux: (),
        };

        (contract, self.approvers.0, self.aux)
    }
}

/// A contract snapshot with everything a presentation layer needs embedded.
#[derive(Debug, Clone, Builder, Dissolve)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContractDetails {
    /// The contract itself.
    contract: Contract,

    /// The user that created the contract.
    creator: User,

    /// One approval row per approver.
    approvals: Vec<Approval>,

    /// Documents attached to the contract, oldest first.
    documents: Vec<Document>,

    /// Blockchain proofs recorded for the contract, oldest first.
    proofs: Vec<BlockchainProof>,
}

impl ContractDetails {
    /// Returns the contract.
    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    /// Returns the creator.
    pub fn creator(&self) -> &User {
        &self.creator
    }

    /// Returns the approval rows.
    pub fn approvals(&self) -> &[Approval] {
        &self.approvals
    }

    /// Returns the documents.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Returns the proofs.
    pub fn proofs(&self) -> &[BlockchainProof] {
        &self.proofs
    }

    /// Returns the number of approval rows in the approved status.
    pub fn approved_count(&self) -> usize {
        self.approvals.iter().filter(|a| a.status() == ApprovalStatus::Approved).count()
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn contract(threshold: u32, mode: ContractMode, fee: Option<&str>) -> Contract<WithoutApprovers, ()> {
        Contract::builder()
            .id(Uuid::from_u128(1).into())
            .title("Partnership Agreement".into())
            .description(String::new())
            .mode(mode)
            .threshold(NonZeroU32::new(threshold).unwrap())
            .status(ContractStatus::Pending)
            .creator_id(Uuid::from_u128(2).into())
            .maybe_fee(fee.map(|f| f.parse().unwrap()))
            .aux(())
            .build()
    }

    fn user_ids(n: u128) -> Vec<UserId> {
        (10..10 + n).map(|i| Uuid::from_u128(i).into()).collect()
    }

    #[test]
    fn approvers_must_cover_the_threshold() {
        assert!(contract(3, ContractMode::Offchain, None).with_approvers(user_ids(2)).is_none());

        let contract = contract(3, ContractMode::Offchain, None)
            .with_approvers(user_ids(4))
            .unwrap();
        assert_eq!(contract.approvers().len(), 4);
    }

    #[test]
    fn threshold_is_met_at_exactly_threshold_approvals() {
        let contract = contract(2, ContractMode::Offchain, None);

        assert!(!contract.is_threshold_met(0));
        assert!(!contract.is_threshold_met(1));
        assert!(contract.is_threshold_met(2));
        assert!(contract.is_threshold_met(3));
    }

    #[test]
    fn fee_payment_is_only_required_for_nonzero_onchain_fees() {
        assert!(contract(1, ContractMode::Onchain, Some("0.1")).requires_fee_payment());
        assert!(!contract(1, ContractMode::Onchain, Some("0")).requires_fee_payment());
        assert!(!contract(1, ContractMode::Onchain, None).requires_fee_payment());
        assert!(!contract(1, ContractMode::Offchain, Some("0.1")).requires_fee_payment());
    }

    #[test]
    fn completed_contracts_never_regress() {
        use ContractStatus::*;

        assert!(Pending.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Completed.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Completed));
    }

    #[test]
    fn dissolve_returns_approvers_in_order() {
        let approvers = user_ids(3);
        let (bare, extracted, ()) = contract(2, ContractMode::Offchain, None)
            .with_approvers(approvers.clone())
            .unwrap()
            .dissolve();

        assert_eq!(extracted, approvers);
        assert_eq!(bare.threshold().get(), 2);
    }
}
