//! Sidebar model builder.
//!
//! Walks the static definition depth-first and keeps what the user may see:
//!
//! 1. A section whose module is not enabled is skipped wholesale.
//! 2. A leaf is kept iff its visibility rules pass.
//! 3. A parent is kept iff at least one child survives; its own rules are
//!    not consulted.
//!
//! Definition order is preserved and nothing is deduplicated or resorted, so
//! equal inputs always produce equal models.

use crate::definition::{NavigationDefinition, NavigationSection};
use sidebar_policy::{PermissionCache, Verdict, VisibilityEvaluator};
use sidebar_types::{Entitlements, SidebarContext, SidebarItem, SidebarModel, UserContext};
use tracing::{debug, warn};

/// Build the model, compiling the allow-list afresh for this call.
pub fn build_sidebar_model(
    definition: &NavigationDefinition,
    context: &SidebarContext,
    user: &UserContext,
    entitlements: Option<&Entitlements>,
    locale: &str,
) -> SidebarModel {
    let evaluator = VisibilityEvaluator::new(&user.permission_snapshot, entitlements);
    build_with(definition, context, user, &evaluator, locale)
}

/// Build the model, taking the compiled allow-list from `cache`.
pub fn build_sidebar_model_cached(
    definition: &NavigationDefinition,
    context: &SidebarContext,
    user: &UserContext,
    entitlements: Option<&Entitlements>,
    locale: &str,
    cache: &PermissionCache,
) -> SidebarModel {
    let evaluator = VisibilityEvaluator::with_cache(&user.permission_snapshot, entitlements, cache);
    build_with(definition, context, user, &evaluator, locale)
}

fn build_with(
    definition: &NavigationDefinition,
    context: &SidebarContext,
    user: &UserContext,
    evaluator: &VisibilityEvaluator<'_>,
    locale: &str,
) -> SidebarModel {
    if user.permission_snapshot.has_deny_entries() {
        warn!(
            deny = user.permission_snapshot.deny.len(),
            "permission snapshot carries deny entries; they are ignored"
        );
    }

    let main = build_sections(&definition.main, evaluator);
    let footer = build_sections(&definition.footer, evaluator);

    debug!(
        org = context.active_org_id.as_deref().unwrap_or("-"),
        branch = context.active_branch_id.as_deref().unwrap_or("-"),
        locale,
        main = main.len(),
        footer = footer.len(),
        "sidebar model built"
    );

    SidebarModel::new(main, footer)
}

fn build_sections(
    sections: &[NavigationSection],
    evaluator: &VisibilityEvaluator<'_>,
) -> Vec<SidebarItem> {
    let mut items = Vec::new();
    for section in sections {
        if let Some(module) = section.module.as_deref() {
            if !evaluator.module_enabled(module) {
                debug!(module, "section skipped: module not enabled");
                continue;
            }
        }
        items.extend(filter_items(&section.items, evaluator));
    }
    items
}

fn filter_items(items: &[SidebarItem], evaluator: &VisibilityEvaluator<'_>) -> Vec<SidebarItem> {
    items
        .iter()
        .filter_map(|item| filter_item(item, evaluator))
        .collect()
}

/// Post-order: children are filtered before their parent is judged.
fn filter_item(item: &SidebarItem, evaluator: &VisibilityEvaluator<'_>) -> Option<SidebarItem> {
    if item.is_parent() {
        let kept = filter_items(item.children(), evaluator);
        if kept.is_empty() {
            debug!(id = %item.id, "parent pruned: no visible children");
            return None;
        }
        return Some(with_children(item, kept));
    }

    match evaluator.verdict(item.visibility.as_ref()) {
        Verdict::Visible => Some(item.clone()),
        Verdict::Hidden { reason } => {
            debug!(id = %item.id, %reason, "item hidden");
            None
        }
    }
}

fn with_children(item: &SidebarItem, children: Vec<SidebarItem>) -> SidebarItem {
    SidebarItem {
        id: item.id.clone(),
        title: item.title.clone(),
        title_key: item.title_key.clone(),
        icon_key: item.icon_key.clone(),
        href: item.href.clone(),
        children: Some(children),
        match_rule: item.match_rule.clone(),
        visibility: item.visibility.clone(),
        disabled_reason: item.disabled_reason,
        badge: item.badge.clone(),
    }
}
