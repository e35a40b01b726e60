// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// The three capability levels a permission can grant on a resource or folder. Greater access
/// levels are assumed to also contain all lower ones.
///
/// On the wire each level is represented by its ordinal (1, 7 and 15), which is a bitmask of the
/// capabilities it contains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AccessLevel {
    /// Permission to read a secret.
    Read,

    /// Permission to update a secret.
    Update,

    /// Permission to share and delete a secret.
    Owner,
}

impl AccessLevel {
    /// Wire ordinal of this access level.
    pub fn ordinal(&self) -> u8 {
        match self {
            AccessLevel::Read => 1,
            AccessLevel::Update => 7,
            AccessLevel::Owner => 15,
        }
    }

    /// Access level is Owner.
    pub fn is_owner(&self) -> bool {
        matches!(self, AccessLevel::Owner)
    }
}

impl TryFrom<u8> for AccessLevel {
    type Error = PlannerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(AccessLevel::Read),
            7 => Ok(AccessLevel::Update),
            15 => Ok(AccessLevel::Owner),
            other => Err(PlannerError::InvalidAccessLevel(other)),
        }
    }
}

impl From<AccessLevel> for u8 {
    fn from(level: AccessLevel) -> Self {
        level.ordinal()
    }
}

impl Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AccessLevel::Read => "read",
            AccessLevel::Update => "update",
            AccessLevel::Owner => "owner",
        };

        write!(f, "{}", s)
    }
}
