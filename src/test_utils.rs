// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities.
use crate::access::AccessLevel;
use crate::actor::{ActorKind, Group, Profile, User};
use crate::dry_run::SharedItem;
use crate::membership::GroupUser;
use crate::permission::Permission;

pub fn setup_logging() {
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }
}

/// User with a username derived from the first name, for example "alice@passbolt.test".
pub fn user(id: &str, first_name: &str, last_name: &str) -> User {
    User {
        id: id.to_string(),
        username: format!("{}@passbolt.test", first_name.to_lowercase()),
        profile: Profile {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        },
    }
}

pub fn group(id: &str, name: &str, groups_users: Vec<GroupUser>) -> Group {
    Group {
        id: id.to_string(),
        name: name.to_string(),
        groups_users,
    }
}

pub fn membership(id: &str, group_id: &str, user: User, is_manager: bool) -> GroupUser {
    GroupUser {
        id: id.to_string(),
        group_id: group_id.to_string(),
        user_id: user.id.clone(),
        is_manager,
        user: Some(user),
    }
}

pub fn user_permission(
    id: &str,
    aco_foreign_key: &str,
    user: User,
    access: AccessLevel,
) -> Permission {
    Permission {
        id: id.to_string(),
        aco_foreign_key: aco_foreign_key.to_string(),
        aro: Some(ActorKind::User),
        aro_foreign_key: user.id.clone(),
        access: Some(access),
        user: Some(user),
        group: None,
    }
}

pub fn group_permission(
    id: &str,
    aco_foreign_key: &str,
    group: Group,
    access: AccessLevel,
) -> Permission {
    Permission {
        id: id.to_string(),
        aco_foreign_key: aco_foreign_key.to_string(),
        aro: Some(ActorKind::Group),
        aro_foreign_key: group.id.clone(),
        access: Some(access),
        user: None,
        group: Some(group),
    }
}

pub fn shared_item(id: &str, name: &str, permissions: Vec<Permission>) -> SharedItem {
    SharedItem {
        id: id.to_string(),
        name: name.to_string(),
        permissions,
    }
}
