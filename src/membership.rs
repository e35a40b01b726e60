// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::actor::User;

/// Membership of a user in a group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupUser {
    pub id: String,

    #[serde(default)]
    pub group_id: String,

    #[serde(default)]
    pub user_id: String,

    /// Managers can apply membership changes to the group.
    #[serde(rename = "is_admin", default)]
    pub is_manager: bool,

    /// Embedded user record, if the server included it.
    #[serde(default)]
    pub user: Option<User>,
}

impl GroupUser {
    /// Return true if this member manages the group.
    pub fn is_manager(&self) -> bool {
        self.is_manager
    }

    /// Id of the member, falling back to the embedded user record when `user_id` was omitted.
    pub fn member_id(&self) -> &str {
        match &self.user {
            Some(user) if self.user_id.is_empty() => &user.id,
            _ => &self.user_id,
        }
    }

    pub fn display_name(&self) -> String {
        match &self.user {
            Some(user) => user.display_name(),
            None => self.member_id().to_string(),
        }
    }

    pub(crate) fn first_name(&self) -> &str {
        match &self.user {
            Some(user) => user.first_name(),
            None => self.member_id(),
        }
    }
}
