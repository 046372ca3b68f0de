//! Permission snapshot supplied by the permission service.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Effective permissions of one user in one organization.
///
/// `allow` is populated from already-compiled permission records and may hold
/// wildcard entries such as `"account.*"`. `deny` is kept for wire
/// compatibility only: negative permissions are resolved before the snapshot
/// is produced, so it is always empty and nothing evaluates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSnapshot {
    /// Granted permission slugs, possibly ending in `.*`.
    #[serde(default)]
    pub allow: BTreeSet<String>,
    /// Vestigial deny list. Always empty.
    #[serde(default)]
    pub deny: BTreeSet<String>,
}

impl PermissionSnapshot {
    /// Create a snapshot from an allow-list.
    pub fn new<I, S>(allow: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allow: allow.into_iter().map(Into::into).collect(),
            deny: BTreeSet::new(),
        }
    }

    /// Snapshot with no permissions at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add one allow entry.
    pub fn allow(mut self, slug: impl Into<String>) -> Self {
        self.allow.insert(slug.into());
        self
    }

    /// Whether the vestigial deny list carries anything.
    pub fn has_deny_entries(&self) -> bool {
        !self.deny.is_empty()
    }
}
