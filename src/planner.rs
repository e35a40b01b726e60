// SPDX-License-Identifier: MIT OR Apache-2.0

//! Computes who can take over resources, folders and groups which would otherwise be left
//! without an owner or manager after deleting a user or a group.
//!
//! A deletion runs in two steps. The dry-run report of the server is first turned into a
//! [`TransferProposal`] listing, for every blocking item, the remaining permission or membership
//! holders in a stable order. After the administrator picked one candidate per item, the
//! resulting [`TransferSelections`] are turned into the [`TransferPlan`] submitted with the
//! deletion request.
use serde::Serialize;
use tracing::{debug, warn};

use crate::actor::Group;
use crate::candidate::{CandidateList, ManagerCandidate, OwnerCandidate, sort_candidates};
use crate::config::PlannerConfig;
use crate::dry_run::{
    BlockingItem, BlockingItemKey, BlockingKind, DeletionSubject, DryRunReport, ExclusionSet,
    SharedItem,
};
use crate::error::PlannerError;
use crate::membership::GroupUser;
use crate::permission::Permission;
use crate::plan::TransferPlan;
use crate::selection::TransferSelections;

/// Candidates offered for one blocking item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransferChoice {
    #[serde(flatten)]
    pub key: BlockingItemKey,
    pub name: String,
    pub candidates: CandidateList,
}

impl TransferChoice {
    /// The candidate pre-selected in the form.
    pub fn default_candidate(&self) -> Option<&str> {
        self.candidates.default_id()
    }
}

/// All transfers required before a deletion can be executed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransferProposal {
    pub subject: DeletionSubject,
    pub choices: Vec<TransferChoice>,
}

impl TransferProposal {
    pub fn get(&self, key: &BlockingItemKey) -> Option<&TransferChoice> {
        self.choices.iter().find(|choice| &choice.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &BlockingItemKey> {
        self.choices.iter().map(|choice| &choice.key)
    }

    /// Return true if the deletion needs no transfer at all.
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Selections with the first candidate of every blocking item chosen.
    pub fn default_selections(&self) -> TransferSelections {
        TransferSelections::with_defaults(self)
    }
}

#[derive(Clone, Debug, Default)]
pub struct OwnershipTransferPlanner {
    config: PlannerConfig,
}

impl OwnershipTransferPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Members of `group` who can replace the deleted user as manager.
    ///
    /// The membership of the excluded user is filtered out, the remaining memberships are
    /// ordered by the users' names.
    pub fn compute_group_manager_candidates(
        &self,
        group: &Group,
        excluded_user_id: &str,
    ) -> Result<Vec<ManagerCandidate>, PlannerError> {
        let mut sources: Vec<&GroupUser> = group
            .groups_users
            .iter()
            .filter(|membership| membership.member_id() != excluded_user_id)
            .collect();

        if sources.is_empty() {
            return Err(PlannerError::NoCandidates(BlockingItemKey::group(&group.id)));
        }

        sort_candidates(&mut sources, self.config.sort_key);
        debug!(
            group = %group.id,
            candidates = sources.len(),
            "computed group manager candidates"
        );

        Ok(sources.into_iter().map(ManagerCandidate::from).collect())
    }

    /// Actors a resource is shared with who can become its new owner.
    pub fn compute_resource_owner_candidates(
        &self,
        resource: &SharedItem,
        excluded: &ExclusionSet,
    ) -> Result<Vec<OwnerCandidate>, PlannerError> {
        self.owner_candidates(BlockingKind::Resource, resource, excluded)
    }

    /// Actors a folder is shared with who can become its new owner.
    pub fn compute_folder_owner_candidates(
        &self,
        folder: &SharedItem,
        excluded: &ExclusionSet,
    ) -> Result<Vec<OwnerCandidate>, PlannerError> {
        self.owner_candidates(BlockingKind::Folder, folder, excluded)
    }

    fn owner_candidates(
        &self,
        kind: BlockingKind,
        item: &SharedItem,
        excluded: &ExclusionSet,
    ) -> Result<Vec<OwnerCandidate>, PlannerError> {
        let mut sources: Vec<&Permission> = item
            .permissions
            .iter()
            .filter(|permission| !excluded.contains(permission.actor_id()))
            .collect();

        if sources.is_empty() {
            return Err(PlannerError::NoCandidates(BlockingItemKey::new(
                kind, &item.id,
            )));
        }

        sort_candidates(&mut sources, self.config.sort_key);
        debug!(
            %kind,
            item = %item.id,
            candidates = sources.len(),
            "computed owner candidates"
        );

        Ok(sources.into_iter().map(OwnerCandidate::from).collect())
    }

    /// Build the candidate lists for every item reported by a deletion dry-run.
    pub fn propose(
        &self,
        report: &DryRunReport,
        subject: &DeletionSubject,
    ) -> Result<TransferProposal, PlannerError> {
        let excluded = ExclusionSet::for_subject(subject, report);
        let mut choices = Vec::new();

        for item in report.blocking_items() {
            let key = item.key();
            let candidates = match (&item, subject) {
                (BlockingItem::Resource(resource), _) => self
                    .compute_resource_owner_candidates(resource, &excluded)
                    .map(CandidateList::Owners),
                (BlockingItem::Folder(folder), _) => self
                    .compute_folder_owner_candidates(folder, &excluded)
                    .map(CandidateList::Owners),
                (BlockingItem::Group(group), DeletionSubject::User(user_id)) => {
                    if self.config.skip_cascaded_groups && report.is_cascade_deleted(&group.id) {
                        debug!(group = %group.id, "skip manager transfer of deleted group");
                        continue;
                    }

                    self.compute_group_manager_candidates(group, user_id)
                        .map(CandidateList::Managers)
                }
                (BlockingItem::Group(group), DeletionSubject::Group(_)) => {
                    return Err(PlannerError::UnexpectedBlockingGroup(group.id.clone()));
                }
            };

            match candidates {
                Ok(candidates) => choices.push(TransferChoice {
                    name: item.name().to_string(),
                    key,
                    candidates,
                }),
                Err(PlannerError::NoCandidates(key)) if !self.config.strict => {
                    warn!(item = %key, "blocking item has no transfer candidate, skipping");
                }
                Err(err) => return Err(err),
            }
        }

        debug!(
            subject = subject.id(),
            excluded = excluded.len(),
            choices = choices.len(),
            "computed transfer proposal"
        );

        Ok(TransferProposal {
            subject: subject.clone(),
            choices,
        })
    }

    /// Turn the administrator's selections into the `transfer` payload of a deletion request.
    pub fn build_transfer_plan(&self, selections: &TransferSelections) -> TransferPlan {
        TransferPlan::from_selections(selections)
    }
}
