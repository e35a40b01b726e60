// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ownership and manager transfer planning for user and group deletion.
//!
//! Deleting a user or a group must never leave a shared resource or folder without an owner, or
//! a group without a manager. The server detects these items in a deletion dry-run; this crate
//! computes who can take over each of them and builds the transfer payload of the final
//! deletion request from the administrator's choices.
//!
//! ```
//! use ownership_transfer::{
//!     DeletionRequest, DeletionSubject, DryRunReport, OwnershipTransferPlanner,
//! };
//!
//! let report = DryRunReport::from_json(
//!     r#"{
//!         "errors": {
//!             "resources": {
//!                 "sole_owner": [{
//!                     "id": "r1",
//!                     "name": "apache",
//!                     "permissions": [
//!                         { "id": "p1", "aro": "User", "aro_foreign_key": "u1", "type": 15 },
//!                         { "id": "p2", "aro": "User", "aro_foreign_key": "u2", "type": 1 }
//!                     ]
//!                 }]
//!             }
//!         }
//!     }"#,
//! )?;
//!
//! let planner = OwnershipTransferPlanner::default();
//! let proposal = planner.propose(&report, &DeletionSubject::User("u1".into()))?;
//!
//! let selections = proposal.default_selections();
//! selections.validate(&proposal)?;
//!
//! let request = DeletionRequest::new(planner.build_transfer_plan(&selections));
//! assert_eq!(
//!     request.to_json()?,
//!     r#"{"transfer":{"owners":[{"aco_foreign_key":"r1","id":"p2"}],"managers":[]}}"#
//! );
//! # Ok::<(), ownership_transfer::PlannerError>(())
//! ```
mod access;
pub mod actor;
pub mod candidate;
mod config;
pub mod dry_run;
mod error;
pub mod membership;
pub mod permission;
mod plan;
mod planner;
mod selection;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use access::AccessLevel;
pub use candidate::{CandidateList, ManagerCandidate, OwnerCandidate};
pub use config::{PlannerConfig, SortKey};
pub use dry_run::{
    BlockingItem, BlockingItemKey, BlockingKind, DeletionSubject, DryRunReport, ExclusionSet,
    SharedItem,
};
pub use error::PlannerError;
pub use plan::{DeletionRequest, ManagerTransfer, OwnerTransfer, TransferPlan};
pub use planner::{OwnershipTransferPlanner, TransferChoice, TransferProposal};
pub use selection::{Selection, TransferSelections};
