//! The message an on-chain approver signs, and its digest.

use approval_coordinator_domain::ContractId;
use sha3::{Digest, Keccak256};

const EIP191_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Builds the canonical approval message for a contract.
///
/// `document_hash` is the content hash of the contract's latest document; `none` is written
/// when the contract has no document.
pub fn approval_message(contract_id: ContractId, title: &str, document_hash: Option<&str>) -> String {
    format!(
        "Contract ID: {contract_id}\nTitle: {title}\nDocument Hash: {}",
        document_hash.unwrap_or("none"),
    )
}

fn keccak256(data: impl AsRef<[u8]>) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Returns the EIP-191 (`personal_sign`) digest of `message`.
pub fn eip191_digest(message: &str) -> [u8; 32] {
    keccak256(format!("{EIP191_PREFIX}{}{message}", message.len()))
}

/// Returns the `0x`-prefixed hex EIP-191 digest of the approval message.
pub fn approval_message_digest(
    contract_id: ContractId,
    title: &str,
    document_hash: Option<&str>,
) -> String {
    const_hex::encode_prefixed(eip191_digest(&approval_message(contract_id, title, document_hash)))
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn contract_id() -> ContractId {
        Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef).into()
    }

    #[test]
    fn message_lists_id_title_and_hash() {
        let message = approval_message(contract_id(), "Partnership Agreement", Some("ab12"));

        assert_eq!(
            message,
            "Contract ID: 01234567-89ab-cdef-0123-456789abcdef\n\
             Title: Partnership Agreement\n\
             Document Hash: ab12"
        );
    }

    #[test]
    fn missing_document_is_written_as_none() {
        let message = approval_message(contract_id(), "NDA", None);

        assert!(message.ends_with("Document Hash: none"));
    }

    #[test]
    fn keccak_of_empty_input() {
        assert_eq!(
            const_hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn eip191_digest_matches_personal_sign() {
        assert_eq!(
            const_hex::encode(eip191_digest("Hello World")),
            "a1de988600a42c4b4ab089b619297c17d53cffae5d5120d82d8a92d0bb3b78f2"
        );
    }

    #[test]
    fn digest_depends_on_document_hash() {
        let with = approval_message_digest(contract_id(), "NDA", Some("ab12"));
        let without = approval_message_digest(contract_id(), "NDA", None);

        assert!(with.starts_with("0x"));
        assert_eq!(with.len(), 66);
        assert_ne!(with, without);
    }
}
