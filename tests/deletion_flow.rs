// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashSet;

use assert_matches::assert_matches;
use ownership_transfer::test_utils::setup_logging;
use ownership_transfer::{
    BlockingItemKey, CandidateList, DeletionRequest, DeletionSubject, DryRunReport,
    OwnershipTransferPlanner, PlannerConfig, PlannerError, TransferPlan, TransferSelections,
};
use serde_json::json;

/// Dry-run answer for deleting Ada (u1), who is the sole owner of two items and the sole manager
/// of two groups. "Leadership" only has Ada as member and is deleted together with her.
fn ada_dry_run() -> serde_json::Value {
    json!({
        "header": { "status": "error", "code": 400, "message": "The user cannot be deleted." },
        "body": {
            "errors": {
                "resources": {
                    "sole_owner": [{
                        "id": "r1",
                        "name": "cakephp",
                        "permissions": [
                            { "id": "p1", "aco": "Resource", "aco_foreign_key": "r1",
                              "aro": "User", "aro_foreign_key": "u1", "type": 15,
                              "user": { "id": "u1", "username": "ada@passbolt.com",
                                        "profile": { "first_name": "Ada", "last_name": "Lovelace" } } },
                            { "id": "p2", "aco": "Resource", "aco_foreign_key": "r1",
                              "aro": "User", "aro_foreign_key": "u3", "type": 7,
                              "user": { "id": "u3", "username": "grace@passbolt.com",
                                        "profile": { "first_name": "Grace", "last_name": "Hopper" } } },
                            { "id": "p3", "aco": "Resource", "aco_foreign_key": "r1",
                              "aro": "Group", "aro_foreign_key": "g1", "type": 1,
                              "group": { "id": "g1", "name": "Accounting" } },
                            { "id": "p4", "aco": "Resource", "aco_foreign_key": "r1",
                              "aro": "Group", "aro_foreign_key": "g3", "type": 1,
                              "group": { "id": "g3", "name": "Leadership" } }
                        ]
                    }]
                },
                "folders": {
                    "sole_owner": [{
                        "id": "f1",
                        "name": "infrastructure",
                        "permissions": [
                            { "id": "p10", "aco": "Folder", "aco_foreign_key": "f1",
                              "aro": "User", "aro_foreign_key": "u1", "type": 15 },
                            { "id": "p11", "aco": "Folder", "aco_foreign_key": "f1",
                              "aro": "User", "aro_foreign_key": "u2", "type": 1,
                              "user": { "id": "u2", "username": "betty@passbolt.com",
                                        "profile": { "first_name": "Betty", "last_name": "Holberton" } } }
                        ]
                    }]
                },
                "groups": {
                    "sole_manager": [
                        {
                            "id": "g2",
                            "name": "Freelancer",
                            "groups_users": [
                                { "id": "gu1", "group_id": "g2", "user_id": "u1", "is_admin": true,
                                  "user": { "id": "u1", "username": "ada@passbolt.com",
                                            "profile": { "first_name": "Ada", "last_name": "Lovelace" } } },
                                { "id": "gu2", "group_id": "g2", "user_id": "u3", "is_admin": false,
                                  "user": { "id": "u3", "username": "grace@passbolt.com",
                                            "profile": { "first_name": "Grace", "last_name": "Hopper" } } },
                                { "id": "gu3", "group_id": "g2", "user_id": "u2", "is_admin": false,
                                  "user": { "id": "u2", "username": "betty@passbolt.com",
                                            "profile": { "first_name": "Betty", "last_name": "Holberton" } } }
                            ]
                        },
                        {
                            "id": "g3",
                            "name": "Leadership",
                            "groups_users": [
                                { "id": "gu4", "group_id": "g3", "user_id": "u1", "is_admin": true }
                            ]
                        }
                    ]
                }
            },
            "groups_to_delete": [ { "id": "g3", "name": "Leadership" } ]
        }
    })
}

#[test]
fn user_deletion_flow() {
    setup_logging();

    let report = DryRunReport::from_value(ada_dry_run()).unwrap();
    let planner = OwnershipTransferPlanner::default();
    let subject = DeletionSubject::User("u1".into());
    let proposal = planner.propose(&report, &subject).unwrap();

    assert_eq!(proposal.choices.len(), 3);

    let resource = proposal.get(&BlockingItemKey::resource("r1")).unwrap();
    assert_eq!(
        resource.candidates.display_names(),
        vec!["Accounting (Group)", "Grace Hopper (grace@passbolt.com)"]
    );

    let folder = proposal.get(&BlockingItemKey::folder("f1")).unwrap();
    assert_eq!(folder.candidates.ids(), vec!["p11"]);

    let group = proposal.get(&BlockingItemKey::group("g2")).unwrap();
    assert_matches!(&group.candidates, CandidateList::Managers(_));
    assert_eq!(group.candidates.ids(), vec!["gu3", "gu2"]);

    // The administrator hands cakephp over to Grace and keeps the other defaults.
    let mut selections = proposal.default_selections();
    selections
        .select(&proposal, &BlockingItemKey::resource("r1"), "p2")
        .unwrap();
    selections.validate(&proposal).unwrap();

    let plan = planner.build_transfer_plan(&selections);
    let request = serde_json::to_value(DeletionRequest::new(plan)).unwrap();
    assert_eq!(
        request,
        json!({
            "transfer": {
                "owners": [
                    { "aco_foreign_key": "r1", "id": "p2" },
                    { "aco_foreign_key": "f1", "id": "p11" }
                ],
                "managers": [
                    { "group_id": "g2", "id": "gu3" }
                ]
            }
        })
    );
}

#[test]
fn candidates_never_contain_deleted_actors() {
    let report = DryRunReport::from_value(ada_dry_run()).unwrap();
    let planner = OwnershipTransferPlanner::default();
    let proposal = planner
        .propose(&report, &DeletionSubject::User("u1".into()))
        .unwrap();

    for choice in &proposal.choices {
        match &choice.candidates {
            CandidateList::Owners(owners) => {
                assert!(owners.iter().all(|c| c.actor_id != "u1" && c.actor_id != "g3"));
            }
            CandidateList::Managers(managers) => {
                assert!(managers.iter().all(|c| c.user_id != "u1"));
            }
        }
    }
}

#[test]
fn planning_is_deterministic() {
    let report = DryRunReport::from_value(ada_dry_run()).unwrap();
    let planner = OwnershipTransferPlanner::default();
    let subject = DeletionSubject::User("u1".into());

    let first = planner.propose(&report, &subject).unwrap();
    let second = planner.propose(&report, &subject).unwrap();
    assert_eq!(first, second);
}

#[test]
fn group_deletion_flow() {
    let report = DryRunReport::from_json(
        r#"{
            "errors": {
                "resources": {
                    "sole_owner": [{
                        "id": "r1",
                        "permissions": [
                            { "id": "p1", "aro_foreign_key": "u1" },
                            { "id": "p2", "aro_foreign_key": "g1" }
                        ]
                    }]
                }
            }
        }"#,
    )
    .unwrap();

    let planner = OwnershipTransferPlanner::default();
    let proposal = planner
        .propose(&report, &DeletionSubject::Group("g1".into()))
        .unwrap();

    let choice = proposal.get(&BlockingItemKey::resource("r1")).unwrap();
    assert_eq!(choice.candidates.ids(), vec!["p1"]);
    assert_eq!(choice.default_candidate(), Some("p1"));
}

#[test]
fn incomplete_selections_are_left_out() {
    let report = DryRunReport::from_value(ada_dry_run()).unwrap();
    let planner = OwnershipTransferPlanner::default();
    let proposal = planner
        .propose(&report, &DeletionSubject::User("u1".into()))
        .unwrap();

    let mut selections = TransferSelections::new();
    selections.insert(BlockingItemKey::group("g2"), "gu2");

    assert_matches!(
        selections.validate(&proposal),
        Err(PlannerError::IncompleteSelection(missing)) if missing.len() == 2
    );

    let plan: TransferPlan = planner.build_transfer_plan(&selections);
    assert!(plan.owners.is_empty());
    assert_eq!(plan.managers.len(), 1);

    let ids: HashSet<&str> = plan.managers.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, HashSet::from(["gu2"]));
}

#[test]
fn lenient_planner_skips_items_without_candidates() {
    let report = DryRunReport::from_value(ada_dry_run()).unwrap();
    let subject = DeletionSubject::User("u1".into());

    let strict = OwnershipTransferPlanner::new(
        PlannerConfig::default().with_skip_cascaded_groups(false),
    );
    assert_matches!(
        strict.propose(&report, &subject),
        Err(PlannerError::NoCandidates(key)) if key == BlockingItemKey::group("g3")
    );

    let lenient = OwnershipTransferPlanner::new(
        PlannerConfig::default()
            .with_skip_cascaded_groups(false)
            .with_strict(false),
    );
    let proposal = lenient.propose(&report, &subject).unwrap();
    assert_eq!(proposal.choices.len(), 3);
}
