// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decoding of the conflict report returned by a deletion dry-run.
//!
//! When deleting a user or a group would leave resources, folders or groups without anyone able
//! to own or manage them, the server answers the dry-run with an error body listing these
//! "blocking" items together with their current permissions and memberships:
//!
//! ```json
//! {
//!   "errors": {
//!     "resources": { "sole_owner": [ ... ] },
//!     "folders": { "sole_owner": [ ... ] },
//!     "groups": { "sole_manager": [ ... ] }
//!   },
//!   "groups_to_delete": [ ... ]
//! }
//! ```
use std::collections::BTreeSet;
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::actor::Group;
use crate::error::PlannerError;
use crate::permission::Permission;

/// Kind of an item which needs a new owner or manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockingKind {
    Resource,
    Folder,
    Group,
}

impl BlockingKind {
    /// Resources and folders need a new owner, groups a new manager.
    pub fn needs_owner(&self) -> bool {
        !matches!(self, BlockingKind::Group)
    }
}

impl Display for BlockingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BlockingKind::Resource => "resource",
            BlockingKind::Folder => "folder",
            BlockingKind::Group => "group",
        };

        write!(f, "{}", s)
    }
}

/// Identifies a blocking item across all kinds.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockingItemKey {
    pub kind: BlockingKind,
    pub id: String,
}

impl BlockingItemKey {
    pub fn new(kind: BlockingKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    pub fn resource(id: impl Into<String>) -> Self {
        Self::new(BlockingKind::Resource, id)
    }

    pub fn folder(id: impl Into<String>) -> Self {
        Self::new(BlockingKind::Folder, id)
    }

    pub fn group(id: impl Into<String>) -> Self {
        Self::new(BlockingKind::Group, id)
    }
}

impl Display for BlockingItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}

/// A resource or folder together with everyone it is currently shared with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedItem {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// An item which would be left without an owner or manager.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockingItem {
    Resource(SharedItem),
    Folder(SharedItem),
    Group(Group),
}

impl BlockingItem {
    pub fn kind(&self) -> BlockingKind {
        match self {
            BlockingItem::Resource(_) => BlockingKind::Resource,
            BlockingItem::Folder(_) => BlockingKind::Folder,
            BlockingItem::Group(_) => BlockingKind::Group,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            BlockingItem::Resource(item) | BlockingItem::Folder(item) => &item.id,
            BlockingItem::Group(group) => &group.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            BlockingItem::Resource(item) | BlockingItem::Folder(item) => &item.name,
            BlockingItem::Group(group) => &group.name,
        }
    }

    pub fn key(&self) -> BlockingItemKey {
        BlockingItemKey::new(self.kind(), self.id())
    }
}

/// The user or group an administrator is about to delete.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum DeletionSubject {
    User(String),
    Group(String),
}

impl DeletionSubject {
    pub fn id(&self) -> &str {
        match self {
            DeletionSubject::User(id) | DeletionSubject::Group(id) => id,
        }
    }
}

/// Ids of all actors which disappear with a deletion and therefore can't take over anything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExclusionSet(BTreeSet<String>);

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The subject itself and every group the dry-run lists for deletion along with it.
    pub fn for_subject(subject: &DeletionSubject, report: &DryRunReport) -> Self {
        let mut set = Self::new();
        set.insert(subject.id());

        for group in &report.groups_to_delete {
            set.insert(&group.id);
        }

        set
    }

    pub fn insert(&mut self, id: impl Into<String>) {
        self.0.insert(id.into());
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Default, Deserialize)]
struct SoleOwnerErrors {
    #[serde(default)]
    sole_owner: Vec<SharedItem>,
}

#[derive(Debug, Default, Deserialize)]
struct GroupErrors {
    #[serde(default)]
    sole_manager: Vec<Group>,

    #[serde(default)]
    groups_to_delete: Vec<Group>,
}

#[derive(Debug, Default, Deserialize)]
struct DryRunErrors {
    #[serde(default)]
    resources: SoleOwnerErrors,

    #[serde(default)]
    folders: SoleOwnerErrors,

    #[serde(default)]
    groups: GroupErrors,
}

#[derive(Debug, Default, Deserialize)]
struct DryRunBody {
    #[serde(default)]
    errors: DryRunErrors,

    #[serde(default)]
    groups_to_delete: Vec<Group>,
}

/// Typed view on a dry-run conflict body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DryRunReport {
    pub sole_owner_resources: Vec<SharedItem>,
    pub sole_owner_folders: Vec<SharedItem>,
    pub sole_manager_groups: Vec<Group>,
    pub groups_to_delete: Vec<Group>,
}

impl DryRunReport {
    pub fn from_json(json: &str) -> Result<Self, PlannerError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Decode a dry-run body. A full API response wrapped in a `{ "header", "body" }` envelope
    /// is accepted as well.
    pub fn from_value(value: Value) -> Result<Self, PlannerError> {
        let value = match value {
            Value::Object(mut map) if map.get("body").is_some_and(Value::is_object) => map
                .remove("body")
                .unwrap_or_default(),
            other => other,
        };

        let body: DryRunBody = serde_json::from_value(value)?;
        let mut groups_to_delete = body.groups_to_delete;
        for group in body.errors.groups.groups_to_delete {
            if !groups_to_delete.iter().any(|known| known.id == group.id) {
                groups_to_delete.push(group);
            }
        }

        let report = Self {
            sole_owner_resources: body.errors.resources.sole_owner,
            sole_owner_folders: body.errors.folders.sole_owner,
            sole_manager_groups: body.errors.groups.sole_manager,
            groups_to_delete,
        };

        debug!(
            resources = report.sole_owner_resources.len(),
            folders = report.sole_owner_folders.len(),
            groups = report.sole_manager_groups.len(),
            groups_to_delete = report.groups_to_delete.len(),
            "decoded dry-run report"
        );

        Ok(report)
    }

    /// All blocking items, resources first, then folders, then groups.
    pub fn blocking_items(&self) -> Vec<BlockingItem> {
        let resources = self
            .sole_owner_resources
            .iter()
            .cloned()
            .map(BlockingItem::Resource);
        let folders = self
            .sole_owner_folders
            .iter()
            .cloned()
            .map(BlockingItem::Folder);
        let groups = self
            .sole_manager_groups
            .iter()
            .cloned()
            .map(BlockingItem::Group);

        resources.chain(folders).chain(groups).collect()
    }

    /// Return true if the deletion can proceed without any transfer.
    pub fn is_empty(&self) -> bool {
        self.sole_owner_resources.is_empty()
            && self.sole_owner_folders.is_empty()
            && self.sole_manager_groups.is_empty()
    }

    pub fn is_cascade_deleted(&self, group_id: &str) -> bool {
        self.groups_to_delete.iter().any(|group| group.id == group_id)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use crate::error::PlannerError;

    use super::{BlockingItemKey, BlockingKind, DeletionSubject, DryRunReport, ExclusionSet};

    const USER_DRY_RUN: &str = r#"{
        "errors": {
            "resources": {
                "sole_owner": [
                    {
                        "id": "r1",
                        "name": "apache",
                        "permissions": [
                            { "id": "p1", "aro": "User", "aro_foreign_key": "u1", "type": 15 },
                            { "id": "p2", "aro": "Group", "aro_foreign_key": "g1", "type": 1 }
                        ]
                    }
                ]
            },
            "folders": { "sole_owner": [ { "id": "f1", "name": "ops", "permissions": [] } ] },
            "groups": {
                "sole_manager": [
                    { "id": "g2", "name": "Freelancer", "groups_users": [] }
                ]
            }
        },
        "groups_to_delete": [ { "id": "g3", "name": "Leadership" } ]
    }"#;

    #[test]
    fn decodes_user_dry_run() {
        let report = DryRunReport::from_json(USER_DRY_RUN).unwrap();

        assert_eq!(report.sole_owner_resources.len(), 1);
        assert_eq!(report.sole_owner_resources[0].permissions.len(), 2);
        assert_eq!(report.sole_owner_folders.len(), 1);
        assert_eq!(report.sole_manager_groups.len(), 1);
        assert!(report.is_cascade_deleted("g3"));
        assert!(!report.is_empty());

        let keys: Vec<BlockingItemKey> = report
            .blocking_items()
            .iter()
            .map(|item| item.key())
            .collect();
        assert_eq!(
            keys,
            vec![
                BlockingItemKey::resource("r1"),
                BlockingItemKey::folder("f1"),
                BlockingItemKey::group("g2"),
            ]
        );
    }

    #[test]
    fn accepts_response_envelope() {
        let envelope = format!(
            r#"{{ "header": {{ "status": "error", "code": 400 }}, "body": {} }}"#,
            USER_DRY_RUN
        );
        let report = DryRunReport::from_json(&envelope).unwrap();
        assert_eq!(report, DryRunReport::from_json(USER_DRY_RUN).unwrap());
    }

    #[test]
    fn merges_nested_groups_to_delete() {
        let report = DryRunReport::from_json(
            r#"{
                "errors": { "groups": { "groups_to_delete": [ { "id": "g3" }, { "id": "g4" } ] } },
                "groups_to_delete": [ { "id": "g3" } ]
            }"#,
        )
        .unwrap();

        let ids: Vec<&str> = report
            .groups_to_delete
            .iter()
            .map(|group| group.id.as_str())
            .collect();
        assert_eq!(ids, vec!["g3", "g4"]);
        assert!(report.is_empty());
    }

    #[test]
    fn empty_body_is_an_empty_report() {
        let report = DryRunReport::from_json("{}").unwrap();
        assert!(report.is_empty());
        assert!(report.blocking_items().is_empty());
    }

    #[test]
    fn rejects_malformed_body() {
        assert_matches!(
            DryRunReport::from_json(r#"{ "errors": { "resources": { "sole_owner": 3 } } }"#),
            Err(PlannerError::InvalidPayload(_))
        );
    }

    #[test]
    fn exclusion_set_for_subjects() {
        let report = DryRunReport::from_json(USER_DRY_RUN).unwrap();

        let user = ExclusionSet::for_subject(&DeletionSubject::User("u1".into()), &report);
        assert_eq!(user.iter().collect::<Vec<_>>(), vec!["g3", "u1"]);

        // Groups deleted along with a group are excluded as well.
        let group = ExclusionSet::for_subject(&DeletionSubject::Group("g1".into()), &report);
        assert_eq!(group.iter().collect::<Vec<_>>(), vec!["g1", "g3"]);
    }

    #[test]
    fn deletion_subject_wire_format() {
        let subject: DeletionSubject =
            serde_json::from_str(r#"{ "type": "group", "id": "g1" }"#).unwrap();
        assert_eq!(subject, DeletionSubject::Group("g1".into()));
        assert_eq!(subject.id(), "g1");
        assert!(BlockingKind::Folder.needs_owner());
        assert!(!BlockingKind::Group.needs_owner());
    }
}
