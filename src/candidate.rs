// SPDX-License-Identifier: MIT OR Apache-2.0

//! Actors eligible to take over a vacated owner or manager role.
use serde::{Deserialize, Serialize};

use crate::actor::ActorKind;
use crate::config::SortKey;
use crate::membership::GroupUser;
use crate::permission::Permission;

/// A permission whose holder can become the new owner of a resource or folder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerCandidate {
    pub permission_id: String,
    pub actor_id: String,
    pub actor_kind: Option<ActorKind>,
    pub display_name: String,
    /// Holder already owns the item alongside the deleted actor.
    pub is_owner: bool,
}

impl From<&Permission> for OwnerCandidate {
    fn from(permission: &Permission) -> Self {
        Self {
            permission_id: permission.id.clone(),
            actor_id: permission.actor_id().to_string(),
            actor_kind: permission.actor_kind(),
            display_name: permission.display_name(),
            is_owner: permission.is_owner(),
        }
    }
}

/// A membership whose user can become the new manager of a group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerCandidate {
    pub membership_id: String,
    pub user_id: String,
    pub display_name: String,
    pub is_manager: bool,
}

impl From<&GroupUser> for ManagerCandidate {
    fn from(membership: &GroupUser) -> Self {
        Self {
            membership_id: membership.id.clone(),
            user_id: membership.member_id().to_string(),
            display_name: membership.display_name(),
            is_manager: membership.is_manager(),
        }
    }
}

/// Ordered candidates for one blocking item. The first candidate is the default selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CandidateList {
    Owners(Vec<OwnerCandidate>),
    Managers(Vec<ManagerCandidate>),
}

impl CandidateList {
    /// Permission or membership ids, in presentation order.
    pub fn ids(&self) -> Vec<&str> {
        match self {
            CandidateList::Owners(candidates) => candidates
                .iter()
                .map(|candidate| candidate.permission_id.as_str())
                .collect(),
            CandidateList::Managers(candidates) => candidates
                .iter()
                .map(|candidate| candidate.membership_id.as_str())
                .collect(),
        }
    }

    pub fn display_names(&self) -> Vec<&str> {
        match self {
            CandidateList::Owners(candidates) => candidates
                .iter()
                .map(|candidate| candidate.display_name.as_str())
                .collect(),
            CandidateList::Managers(candidates) => candidates
                .iter()
                .map(|candidate| candidate.display_name.as_str())
                .collect(),
        }
    }

    pub fn default_id(&self) -> Option<&str> {
        self.ids().first().copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids().contains(&id)
    }

    pub fn len(&self) -> usize {
        match self {
            CandidateList::Owners(candidates) => candidates.len(),
            CandidateList::Managers(candidates) => candidates.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Records which can be offered as transfer candidates.
pub(crate) trait CandidateSource {
    fn candidate_id(&self) -> &str;

    fn first_name(&self) -> &str;

    fn display_name(&self) -> String;
}

impl CandidateSource for Permission {
    fn candidate_id(&self) -> &str {
        &self.id
    }

    fn first_name(&self) -> &str {
        Permission::first_name(self)
    }

    fn display_name(&self) -> String {
        Permission::display_name(self)
    }
}

impl CandidateSource for GroupUser {
    fn candidate_id(&self) -> &str {
        &self.id
    }

    fn first_name(&self) -> &str {
        GroupUser::first_name(self)
    }

    fn display_name(&self) -> String {
        GroupUser::display_name(self)
    }
}

/// Sort candidates by the configured key with their id as tie-breaker, which makes the order
/// independent of the order the server listed them in.
pub(crate) fn sort_candidates<T: CandidateSource>(sources: &mut [&T], sort_key: SortKey) {
    sources.sort_by_cached_key(|source| {
        let primary = match sort_key {
            SortKey::FirstName => source.first_name().to_string(),
            SortKey::DisplayName => source.display_name(),
        };
        (primary, source.candidate_id().to_string())
    });
}
