//! Visibility rule evaluation.
//!
//! A rule set has four optional axes. Each present, non-empty axis must pass:
//!
//! | Axis                     | Passes when                                  |
//! |--------------------------|----------------------------------------------|
//! | `requiresPermissions`    | every slug is granted by the allow-list      |
//! | `requiresAnyPermissions` | at least one slug is granted                 |
//! | `requiresModules`        | every module is enabled for the organization |
//! | `requiresAnyModules`     | at least one module is enabled               |
//!
//! Missing entitlements enable no module. The snapshot's `deny` list is never
//! consulted.

use crate::cache::PermissionCache;
use crate::matcher::{satisfies, CompiledAllowList};
use sidebar_types::{
    module_enabled, DisabledReason, Entitlements, PermissionSnapshot, SidebarVisibilityRules,
};
use std::sync::Arc;

/// Outcome of evaluating one rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Visible,
    /// Permission axes are checked before module axes, so `reason` names the
    /// first failing kind.
    Hidden { reason: DisabledReason },
}

impl Verdict {
    pub fn is_visible(&self) -> bool {
        matches!(self, Verdict::Visible)
    }

    pub fn reason(&self) -> Option<DisabledReason> {
        match self {
            Verdict::Visible => None,
            Verdict::Hidden { reason } => Some(*reason),
        }
    }
}

fn all_or_unconstrained(required: &[String], granted: impl Fn(&str) -> bool) -> bool {
    required.iter().all(|r| granted(r.as_str()))
}

fn any_or_unconstrained(required: &[String], granted: impl Fn(&str) -> bool) -> bool {
    required.is_empty() || required.iter().any(|r| granted(r.as_str()))
}

fn evaluate(
    rules: Option<&SidebarVisibilityRules>,
    has_permission: impl Fn(&str) -> bool,
    has_module: impl Fn(&str) -> bool,
) -> Verdict {
    let Some(rules) = rules else {
        return Verdict::Visible;
    };

    let permissions_pass = all_or_unconstrained(&rules.requires_permissions, &has_permission)
        && any_or_unconstrained(&rules.requires_any_permissions, &has_permission);
    if !permissions_pass {
        return Verdict::Hidden {
            reason: DisabledReason::Permission,
        };
    }

    let modules_pass = all_or_unconstrained(&rules.requires_modules, &has_module)
        && any_or_unconstrained(&rules.requires_any_modules, &has_module);
    if !modules_pass {
        return Verdict::Hidden {
            reason: DisabledReason::Entitlement,
        };
    }

    Verdict::Visible
}

/// Evaluate a rule set directly against a snapshot, without any caching.
pub fn is_visible(
    rules: Option<&SidebarVisibilityRules>,
    snapshot: &PermissionSnapshot,
    entitlements: Option<&Entitlements>,
) -> bool {
    evaluate(
        rules,
        |slug| satisfies(&snapshot.allow, slug),
        |module| module_enabled(entitlements, module),
    )
    .is_visible()
}

/// Evaluator bound to one request's snapshot and entitlements.
///
/// Compiles the allow-list once so a whole tree can be evaluated without
/// rescanning raw entries per node.
#[derive(Debug, Clone)]
pub struct VisibilityEvaluator<'a> {
    allow: Arc<CompiledAllowList>,
    entitlements: Option<&'a Entitlements>,
}

impl<'a> VisibilityEvaluator<'a> {
    /// Compile the snapshot's allow-list without touching any cache.
    pub fn new(snapshot: &PermissionSnapshot, entitlements: Option<&'a Entitlements>) -> Self {
        Self {
            allow: Arc::new(CompiledAllowList::compile(
                snapshot.allow.iter().map(String::as_str),
            )),
            entitlements,
        }
    }

    /// Reuse (or populate) a compiled allow-list from `cache`.
    pub fn with_cache(
        snapshot: &PermissionSnapshot,
        entitlements: Option<&'a Entitlements>,
        cache: &PermissionCache,
    ) -> Self {
        Self {
            allow: cache.compiled(&snapshot.allow),
            entitlements,
        }
    }

    pub fn has_permission(&self, slug: &str) -> bool {
        self.allow.satisfies(slug)
    }

    pub fn module_enabled(&self, module: &str) -> bool {
        module_enabled(self.entitlements, module)
    }

    pub fn verdict(&self, rules: Option<&SidebarVisibilityRules>) -> Verdict {
        evaluate(
            rules,
            |slug| self.has_permission(slug),
            |module| self.module_enabled(module),
        )
    }

    pub fn is_visible(&self, rules: Option<&SidebarVisibilityRules>) -> bool {
        self.verdict(rules).is_visible()
    }
}
