//! Mode-dependent approval policy.
//!
//! A contract's mode and fee are immutable, so the evidence an approval must carry can be
//! checked against a snapshot read before the approval transaction starts.

use approval_coordinator_domain::contract::{Contract, ContractMode};
use approval_coordinator_store::ApprovalEvidence;
use itertools::Itertools;

use crate::{
    error::ApprovalEngineErrorKind,
    types::request::{ApprovalProof, OnchainApproval, OnchainApprovalDissolved},
};

/// Checks `proof` against the contract's mode and turns it into the evidence to persist.
///
/// The approval row keeps the approval transaction hash, falling back to the fee payment
/// hash. Every distinct hash supplied becomes a blockchain proof labelled with `network`.
pub(crate) fn evidence_for<APPR, AUX>(
    contract: &Contract<APPR, AUX>,
    proof: ApprovalProof,
    network: &str,
) -> Result<ApprovalEvidence, ApprovalEngineErrorKind> {
    match (contract.mode(), proof) {
        (ContractMode::Offchain, ApprovalProof::Offchain) => Ok(ApprovalEvidence::default()),
        (ContractMode::Offchain, ApprovalProof::Onchain(_)) => Err(
            ApprovalEngineErrorKind::validation("offchain contracts do not take on-chain evidence"),
        ),
        (ContractMode::Onchain, ApprovalProof::Offchain) => Err(
            ApprovalEngineErrorKind::validation("onchain contracts require a signed approval"),
        ),
        (ContractMode::Onchain, ApprovalProof::Onchain(approval)) => {
            onchain_evidence(contract, approval, network)
        },
    }
}

fn onchain_evidence<APPR, AUX>(
    contract: &Contract<APPR, AUX>,
    approval: OnchainApproval,
    network: &str,
) -> Result<ApprovalEvidence, ApprovalEngineErrorKind> {
    let OnchainApprovalDissolved { signature, tx_hash, fee_payment_tx_hash } = approval.dissolve();

    if contract.requires_fee_payment() && tx_hash.is_none() && fee_payment_tx_hash.is_none() {
        return Err(ApprovalEngineErrorKind::validation(
            "contract declares a fee; a fee payment transaction is required",
        ));
    }

    let proof_tx_hashes =
        tx_hash.iter().chain(fee_payment_tx_hash.iter()).unique().cloned().collect();

    let evidence = ApprovalEvidence::builder()
        .signature(signature)
        .maybe_tx_hash(tx_hash.or(fee_payment_tx_hash))
        .proof_tx_hashes(proof_tx_hashes)
        .network(network)
        .build();

    Ok(evidence)
}
