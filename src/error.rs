// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

use crate::dry_run::BlockingItemKey;

/// Errors which can occur while planning an ownership transfer.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("no transfer candidate left for {0} after excluding deleted actors")]
    NoCandidates(BlockingItemKey),

    #[error("group {0} can not be managed by a deleted group")]
    UnexpectedBlockingGroup(String),

    #[error("no blocking item {0} in transfer proposal")]
    UnknownBlockingItem(BlockingItemKey),

    #[error("{candidate_id} is not a transfer candidate for {item}")]
    UnknownCandidate {
        item: BlockingItemKey,
        candidate_id: String,
    },

    #[error("missing transfer selection for {} blocking item(s)", .0.len())]
    IncompleteSelection(Vec<BlockingItemKey>),

    #[error("invalid access level {0}")]
    InvalidAccessLevel(u8),

    #[error("invalid dry-run payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}
