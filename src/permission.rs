// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::access::AccessLevel;
use crate::actor::{ActorKind, Group, User};

/// A capability granted to an actor (ARO) on a resource or folder (ACO).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: String,

    #[serde(default)]
    pub aco_foreign_key: String,

    #[serde(default)]
    pub aro: Option<ActorKind>,

    pub aro_foreign_key: String,

    #[serde(rename = "type", default)]
    pub access: Option<AccessLevel>,

    #[serde(default)]
    pub user: Option<User>,

    #[serde(default)]
    pub group: Option<Group>,
}

impl Permission {
    /// Id of the actor holding this permission.
    pub fn actor_id(&self) -> &str {
        &self.aro_foreign_key
    }

    /// Kind of the actor holding this permission, taken from the `aro` field or inferred from
    /// the embedded record.
    pub fn actor_kind(&self) -> Option<ActorKind> {
        self.aro.or(match (&self.user, &self.group) {
            (Some(_), _) => Some(ActorKind::User),
            (None, Some(_)) => Some(ActorKind::Group),
            (None, None) => None,
        })
    }

    pub fn is_owner(&self) -> bool {
        self.access.is_some_and(|level| level.is_owner())
    }

    pub fn display_name(&self) -> String {
        match (&self.user, &self.group) {
            (Some(user), _) => user.display_name(),
            (None, Some(group)) => group.display_name(),
            (None, None) => self.aro_foreign_key.clone(),
        }
    }

    /// Users are ordered by first name, groups by name.
    pub(crate) fn first_name(&self) -> &str {
        match (&self.user, &self.group) {
            (Some(user), _) => user.first_name(),
            (None, Some(group)) => &group.name,
            (None, None) => &self.aro_foreign_key,
        }
    }
}
