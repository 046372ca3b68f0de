//! Request context handed to the sidebar builder.

use crate::snapshot::PermissionSnapshot;
use serde::{Deserialize, Serialize};

/// Tenant scope of the request.
///
/// None of these fields gate visibility; they identify the scope a model was
/// built for and take part in build cache keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_org_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_branch_id: Option<String>,
    #[serde(default)]
    pub user_modules: Vec<String>,
}

impl SidebarContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_org(mut self, org_id: impl Into<String>) -> Self {
        self.active_org_id = Some(org_id.into());
        self
    }

    pub fn with_branch(mut self, branch_id: impl Into<String>) -> Self {
        self.active_branch_id = Some(branch_id.into());
        self
    }

    pub fn with_user_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.user_modules = modules.into_iter().map(Into::into).collect();
        self
    }
}

/// Per-user inputs resolved by the permission service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    pub permission_snapshot: PermissionSnapshot,
}

impl UserContext {
    pub fn new(permission_snapshot: PermissionSnapshot) -> Self {
        Self {
            permission_snapshot,
        }
    }
}

impl From<PermissionSnapshot> for UserContext {
    fn from(permission_snapshot: PermissionSnapshot) -> Self {
        Self::new(permission_snapshot)
    }
}
