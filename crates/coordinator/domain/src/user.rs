//! User domain models.

use alloc::string::String;

use bon::Builder;
use dissolve_derive::Dissolve;
use strum::{Display, EnumString, IntoStaticStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Timestamps, UserId, chain::WalletAddress};

/// The role of a user, gating administrative mutation of other users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum UserRole {
    /// May change the role of other users.
    Admin,
    /// A regular participant that creates contracts and approves them.
    Member,
}

/// A user that can create contracts and be assigned as an approver.
///
/// # Type Parameters
///
/// * `AUX` - Auxiliary data type, defaults to [`Timestamps`] for tracking metadata.
#[derive(Debug, Clone, Builder, Dissolve)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct User<AUX = Timestamps> {
    /// The unique identifier of this user.
    id: UserId,

    /// The user's email, unique across all users.
    email: String,

    /// The name shown to other users.
    display_name: String,

    /// The user's role.
    role: UserRole,

    /// The wallet the user connected, if any.
    wallet_address: Option<WalletAddress>,

    /// Auxiliary metadata associated with this user.
    aux: AUX,
}

impl<AUX> User<AUX> {
    /// Returns the user id.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the user's email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the user's display name.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the user's role.
    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Returns `true` if the user is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Returns the connected wallet address, if any.
    pub fn wallet_address(&self) -> Option<&WalletAddress> {
        self.wallet_address.as_ref()
    }

    /// Returns a reference to the auxiliary metadata.
    pub fn aux(&self) -> &AUX {
        &self.aux
    }
}
