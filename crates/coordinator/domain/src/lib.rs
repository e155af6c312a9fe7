//! Domain types for the contract approval coordinator.
//!
//! This crate provides the core domain models for contracts that require sign-off from a set
//! of approvers before they are considered finalized. It includes type-safe builders, the
//! approval/contract status machines, and the evidence primitives (transaction hashes,
//! signatures, wallet addresses) that accompany on-chain approvals.

#![no_std]

extern crate alloc;

pub mod approval;
pub mod chain;
pub mod contract;
pub mod document;
pub mod proof;
pub mod user;

mod id;

pub use self::id::{ApprovalId, ContractId, DocumentId, ProofId, UserId};

use bon::Builder;
use chrono::{DateTime, Utc};
use dissolve_derive::Dissolve;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Timestamp metadata for tracking entity creation and modification times.
///
/// This struct is commonly used as auxiliary data (`AUX`) in other domain types
/// to track when entities were created and last updated.
#[derive(Debug, Clone, Builder, Dissolve)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timestamps {
    /// The timestamp when the entity was created.
    created_at: DateTime<Utc>,
    /// The timestamp when the entity was last updated.
    updated_at: DateTime<Utc>,
}

impl Timestamps {
    /// Returns the creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
