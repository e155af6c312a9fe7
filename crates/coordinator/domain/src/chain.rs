//! Evidence primitives attached to on-chain approvals.
//!
//! The coordinator never talks to a chain itself. These types only guarantee that what a
//! caller hands over is well-formed before it is recorded verbatim.

use core::{fmt, str::FromStr};

use alloc::string::String;

/// Errors produced when parsing on-chain evidence values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainValueError {
    /// The value is not a `0x`-prefixed, 20-byte hex address.
    #[error("invalid wallet address")]
    WalletAddress,

    /// The value is not a `0x`-prefixed hex transaction hash.
    #[error("invalid transaction hash")]
    TxHash,

    /// The signature is empty or contains whitespace.
    #[error("invalid signature")]
    Signature,

    /// The value is not a non-negative decimal amount.
    #[error("invalid fee amount")]
    FeeAmount,
}

/// A `0x`-prefixed transaction hash, normalized to lower case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde_with::SerializeDisplay, serde_with::DeserializeFromStr))]
pub struct TxHash(String);

/// An opaque approval signature as produced by the approver's wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde_with::SerializeDisplay, serde_with::DeserializeFromStr))]
pub struct Signature(String);

/// A `0x`-prefixed 20-byte account address, normalized to lower case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde_with::SerializeDisplay, serde_with::DeserializeFromStr))]
pub struct WalletAddress(String);

/// A fee amount in the chain's native unit, kept as the decimal string the creator entered.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde_with::SerializeDisplay, serde_with::DeserializeFromStr))]
pub struct FeeAmount(String);

impl TxHash {
    /// Returns the hash as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Signature {
    /// Returns the signature as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl WalletAddress {
    const HEX_LEN: usize = 40;

    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FeeAmount {
    /// Returns the amount as a decimal string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the amount is zero, in which case no fee payment is required.
    pub fn is_zero(&self) -> bool {
        self.0.bytes().filter(u8::is_ascii_digit).all(|b| b == b'0')
    }
}

fn strip_hex_prefix(s: &str) -> Option<&str> {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))
}

impl FromStr for TxHash {
    type Err = ChainValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = strip_hex_prefix(s.trim()).ok_or(ChainValueError::TxHash)?;

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ChainValueError::TxHash);
        }

        Ok(Self(alloc::format!("0x{}", digits.to_ascii_lowercase())))
    }
}

impl FromStr for Signature {
    type Err = ChainValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.is_empty() || s.chars().any(char::is_whitespace) {
            return Err(ChainValueError::Signature);
        }

        Ok(Self(s.into()))
    }
}

impl FromStr for WalletAddress {
    type Err = ChainValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = strip_hex_prefix(s.trim()).ok_or(ChainValueError::WalletAddress)?;

        if digits.len() != Self::HEX_LEN || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ChainValueError::WalletAddress);
        }

        Ok(Self(alloc::format!("0x{}", digits.to_ascii_lowercase())))
    }
}

impl FromStr for FeeAmount {
    type Err = ChainValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let (int, frac) = s.split_once('.').unwrap_or((s, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

        if int.is_empty() || !all_digits(int) || !all_digits(frac) || s.ends_with('.') {
            return Err(ChainValueError::FeeAmount);
        }

        Ok(Self(s.into()))
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for FeeAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tx_hash_is_normalized_to_lower_case() {
        let hash: TxHash = " 0xABCdef01 ".parse().unwrap();
        assert_eq!(hash.as_str(), "0xabcdef01");
    }

    #[test]
    fn short_tx_hash_is_accepted() {
        assert_eq!("0xabc".parse::<TxHash>().unwrap().as_str(), "0xabc");
    }

    #[test]
    fn tx_hash_without_prefix_or_digits_is_rejected() {
        assert_eq!("abc".parse::<TxHash>(), Err(ChainValueError::TxHash));
        assert_eq!("0x".parse::<TxHash>(), Err(ChainValueError::TxHash));
        assert_eq!("0xzz".parse::<TxHash>(), Err(ChainValueError::TxHash));
    }

    #[test]
    fn wallet_address_requires_twenty_bytes() {
        let address: WalletAddress =
            "0x1234567890ABCDEF1234567890abcdef12345678".parse().unwrap();
        assert_eq!(address.as_str(), "0x1234567890abcdef1234567890abcdef12345678");

        assert_eq!(
            "0x1234".parse::<WalletAddress>(),
            Err(ChainValueError::WalletAddress)
        );
    }

    #[test]
    fn signature_must_be_a_single_token() {
        assert!("0xdeadbeef".parse::<Signature>().is_ok());
        assert_eq!("".parse::<Signature>(), Err(ChainValueError::Signature));
        assert_eq!("dead beef".parse::<Signature>(), Err(ChainValueError::Signature));
    }

    #[test]
    fn fee_amount_parses_decimals() {
        let fee: FeeAmount = "0.1".parse().unwrap();
        assert!(!fee.is_zero());

        let zero: FeeAmount = "0.000".parse().unwrap();
        assert!(zero.is_zero());

        assert_eq!("-1".parse::<FeeAmount>(), Err(ChainValueError::FeeAmount));
        assert_eq!(".5".parse::<FeeAmount>(), Err(ChainValueError::FeeAmount));
        assert_eq!("1.".parse::<FeeAmount>(), Err(ChainValueError::FeeAmount));
        assert_eq!("1.2.3".parse::<FeeAmount>(), Err(ChainValueError::FeeAmount));
    }
}
