// SPDX-License-Identifier: MIT OR Apache-2.0

//! Users and groups which permissions and memberships are granted to.
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::membership::GroupUser;

/// Kind of an actor a permission is granted to (the "ARO").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActorKind {
    User,
    Group,
}

impl Display for ActorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ActorKind::User => "user",
            ActorKind::Group => "group",
        };

        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub profile: Profile,
}

impl User {
    /// Name shown in selectors, formatted as "first last (username)".
    pub fn display_name(&self) -> String {
        format!(
            "{} {} ({})",
            self.profile.first_name, self.profile.last_name, self.username
        )
    }

    /// Key candidates are ordered by.
    pub fn first_name(&self) -> &str {
        &self.profile.first_name
    }
}

/// A group of users.
///
/// Groups reported as blocking items carry their memberships, groups referenced from a
/// permission or listed for cascading deletion usually do not.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub groups_users: Vec<GroupUser>,
}

impl Group {
    /// Name shown in selectors, formatted as "name (Group)".
    pub fn display_name(&self) -> String {
        format!("{} (Group)", self.name)
    }
}
