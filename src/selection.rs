// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dry_run::BlockingItemKey;
use crate::error::PlannerError;
use crate::planner::TransferProposal;

/// One chosen candidate, as exchanged with the form layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    #[serde(flatten)]
    pub item: BlockingItemKey,
    pub candidate_id: String,
}

/// The candidate chosen for each blocking item, keyed by item. Holds at most one choice per
/// item.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Selection>", into = "Vec<Selection>")]
pub struct TransferSelections(BTreeMap<BlockingItemKey, String>);

impl TransferSelections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-select the first candidate of every item in the proposal.
    pub fn with_defaults(proposal: &TransferProposal) -> Self {
        let mut selections = Self::new();
        for choice in &proposal.choices {
            if let Some(candidate_id) = choice.default_candidate() {
                selections.insert(choice.key.clone(), candidate_id);
            }
        }
        selections
    }

    /// Record a choice without checking it against a proposal. Replaces an earlier choice for
    /// the same item.
    pub fn insert(&mut self, item: BlockingItemKey, candidate_id: impl Into<String>) {
        self.0.insert(item, candidate_id.into());
    }

    /// Record a choice after checking the candidate is offered for this item.
    pub fn select(
        &mut self,
        proposal: &TransferProposal,
        item: &BlockingItemKey,
        candidate_id: &str,
    ) -> Result<(), PlannerError> {
        let choice = proposal
            .get(item)
            .ok_or_else(|| PlannerError::UnknownBlockingItem(item.clone()))?;

        if !choice.candidates.contains(candidate_id) {
            warn!(%item, candidate_id, "rejected selection of unknown candidate");
            return Err(PlannerError::UnknownCandidate {
                item: item.clone(),
                candidate_id: candidate_id.to_string(),
            });
        }

        self.insert(item.clone(), candidate_id);
        Ok(())
    }

    pub fn get(&self, item: &BlockingItemKey) -> Option<&str> {
        self.0.get(item).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BlockingItemKey, &str)> {
        self.0.iter().map(|(item, candidate_id)| (item, candidate_id.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check that every blocking item of the proposal has a chosen candidate.
    pub fn validate(&self, proposal: &TransferProposal) -> Result<(), PlannerError> {
        let missing: Vec<BlockingItemKey> = proposal
            .keys()
            .filter(|key| !self.0.contains_key(*key))
            .cloned()
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(PlannerError::IncompleteSelection(missing))
        }
    }
}

impl From<Vec<Selection>> for TransferSelections {
    fn from(selections: Vec<Selection>) -> Self {
        Self(
            selections
                .into_iter()
                .map(|selection| (selection.item, selection.candidate_id))
                .collect(),
        )
    }
}

impl From<TransferSelections> for Vec<Selection> {
    fn from(selections: TransferSelections) -> Self {
        selections
            .0
            .into_iter()
            .map(|(item, candidate_id)| Selection { item, candidate_id })
            .collect()
    }
}
