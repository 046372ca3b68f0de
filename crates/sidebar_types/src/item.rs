//! Navigation items and the rules attached to them.

use serde::{Deserialize, Serialize};

/// How an item decides whether it is the current route.
///
/// Serialized as exactly one of `{"exact": "..."}` or
/// `{"startsWith": "..."}`. A document carrying both keys, or neither, fails
/// to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMatchRule", into = "RawMatchRule")]
pub enum SidebarMatchRule {
    /// Pathname must equal the value.
    Exact(String),
    /// Pathname must equal the value or sit beneath it, segment-aware.
    StartsWith(String),
}

impl SidebarMatchRule {
    pub fn exact(path: impl Into<String>) -> Self {
        Self::Exact(path.into())
    }

    pub fn starts_with(prefix: impl Into<String>) -> Self {
        Self::StartsWith(prefix.into())
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawMatchRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    starts_with: Option<String>,
}

impl TryFrom<RawMatchRule> for SidebarMatchRule {
    type Error = String;

    fn try_from(raw: RawMatchRule) -> Result<Self, Self::Error> {
        match (raw.exact, raw.starts_with) {
            (Some(path), None) => Ok(Self::Exact(path)),
            (None, Some(prefix)) => Ok(Self::StartsWith(prefix)),
            (Some(_), Some(_)) => {
                Err("match rule must set exactly one of `exact` or `startsWith`, not both".into())
            }
            (None, None) => Err("match rule must set one of `exact` or `startsWith`".into()),
        }
    }
}

impl From<SidebarMatchRule> for RawMatchRule {
    fn from(rule: SidebarMatchRule) -> Self {
        match rule {
            SidebarMatchRule::Exact(path) => Self {
                exact: Some(path),
                starts_with: None,
            },
            SidebarMatchRule::StartsWith(prefix) => Self {
                exact: None,
                starts_with: Some(prefix),
            },
        }
    }
}

/// Permission and module requirements for a navigation node.
///
/// Every axis is optional; an empty list imposes no constraint. Axes that are
/// present combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarVisibilityRules {
    /// All must be granted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires_permissions: Vec<String>,
    /// At least one must be granted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires_any_permissions: Vec<String>,
    /// All must be enabled for the organization.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires_modules: Vec<String>,
    /// At least one must be enabled for the organization.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires_any_modules: Vec<String>,
}

impl SidebarVisibilityRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require_permission(mut self, slug: impl Into<String>) -> Self {
        self.requires_permissions.push(slug.into());
        self
    }

    pub fn require_any_permission(mut self, slug: impl Into<String>) -> Self {
        self.requires_any_permissions.push(slug.into());
        self
    }

    pub fn require_module(mut self, module: impl Into<String>) -> Self {
        self.requires_modules.push(module.into());
        self
    }

    pub fn require_any_module(mut self, module: impl Into<String>) -> Self {
        self.requires_any_modules.push(module.into());
        self
    }

    /// True when no axis carries a requirement.
    pub fn is_unrestricted(&self) -> bool {
        self.requires_permissions.is_empty()
            && self.requires_any_permissions.is_empty()
            && self.requires_modules.is_empty()
            && self.requires_any_modules.is_empty()
    }
}

/// Why an item is shown as unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabledReason {
    Permission,
    Entitlement,
    ComingSoon,
}

impl DisabledReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisabledReason::Permission => "permission",
            DisabledReason::Entitlement => "entitlement",
            DisabledReason::ComingSoon => "coming_soon",
        }
    }
}

impl std::fmt::Display for DisabledReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of the navigation tree.
///
/// The same type describes the static definition and the compiled model. It
/// never carries an "active" flag: active state is derived from the pathname
/// at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarItem {
    /// Stable identifier, unique within a definition.
    pub id: String,
    pub title: String,
    /// Translation key, passed through unresolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_key: Option<String>,
    pub icon_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SidebarItem>>,
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub match_rule: Option<SidebarMatchRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<SidebarVisibilityRules>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled_reason: Option<DisabledReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

impl SidebarItem {
    /// Create a leaf item with no rules.
    pub fn new(id: impl Into<String>, title: impl Into<String>, icon_key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            title_key: None,
            icon_key: icon_key.into(),
            href: None,
            children: None,
            match_rule: None,
            visibility: None,
            disabled_reason: None,
            badge: None,
        }
    }

    pub fn with_title_key(mut self, key: impl Into<String>) -> Self {
        self.title_key = Some(key.into());
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn with_match(mut self, rule: SidebarMatchRule) -> Self {
        self.match_rule = Some(rule);
        self
    }

    pub fn with_visibility(mut self, rules: SidebarVisibilityRules) -> Self {
        self.visibility = Some(rules);
        self
    }

    pub fn with_children(mut self, children: Vec<SidebarItem>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn with_disabled_reason(mut self, reason: DisabledReason) -> Self {
        self.disabled_reason = Some(reason);
        self
    }

    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    /// Children declared on this node, empty when it is a leaf.
    pub fn children(&self) -> &[SidebarItem] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Whether the node declares a children list at all, even an empty one.
    pub fn is_parent(&self) -> bool {
        self.children.is_some()
    }

    /// Pre-order walk over this node and all of its descendants.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a SidebarItem)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}
