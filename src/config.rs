// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

/// Primary key candidates are sorted by. Ties are always broken by candidate id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// First name of users and name of groups.
    #[default]
    FirstName,

    /// The full name shown in the selector.
    DisplayName,
}

/// Configuration of the ownership transfer planner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub sort_key: SortKey,

    /// Treat blocking items without any candidate as an error. When disabled such items are
    /// dropped from the proposal with a warning.
    pub strict: bool,

    /// Do not offer a manager transfer for groups which get deleted together with the user.
    pub skip_cascaded_groups: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            sort_key: SortKey::default(),
            strict: true,
            skip_cascaded_groups: true,
        }
    }
}

impl PlannerConfig {
    pub fn with_sort_key(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_skip_cascaded_groups(mut self, skip: bool) -> Self {
        self.skip_cascaded_groups = skip;
        self
    }
}
