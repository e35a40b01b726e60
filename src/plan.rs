// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dry_run::BlockingKind;
use crate::error::PlannerError;
use crate::selection::TransferSelections;

/// New owner of a resource or folder, identified by an existing permission on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerTransfer {
    pub aco_foreign_key: String,
    pub id: String,
}

/// New manager of a group, identified by an existing membership in it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerTransfer {
    pub group_id: String,
    pub id: String,
}

/// The `transfer` object of a deletion request.
///
/// Transfers reference the chosen permission or membership rather than the actor, the server
/// derives the actor from that row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPlan {
    pub owners: Vec<OwnerTransfer>,
    pub managers: Vec<ManagerTransfer>,
}

impl TransferPlan {
    /// Items without a selection are left out.
    pub fn from_selections(selections: &TransferSelections) -> Self {
        let mut plan = Self::default();

        for (item, candidate_id) in selections.iter() {
            match item.kind {
                BlockingKind::Resource | BlockingKind::Folder => plan.owners.push(OwnerTransfer {
                    aco_foreign_key: item.id.clone(),
                    id: candidate_id.to_string(),
                }),
                BlockingKind::Group => plan.managers.push(ManagerTransfer {
                    group_id: item.id.clone(),
                    id: candidate_id.to_string(),
                }),
            }
        }

        debug!(
            owners = plan.owners.len(),
            managers = plan.managers.len(),
            "built transfer plan"
        );

        plan
    }

    pub fn len(&self) -> usize {
        self.owners.len() + self.managers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty() && self.managers.is_empty()
    }
}

/// Body of the request confirming a deletion.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionRequest {
    pub transfer: TransferPlan,
}

impl DeletionRequest {
    pub fn new(transfer: TransferPlan) -> Self {
        Self { transfer }
    }

    pub fn to_json(&self) -> Result<String, PlannerError> {
        Ok(serde_json::to_string(self)?)
    }
}
