//! Active route matching.
//!
//! Stateless and independent of permission logic: evaluated against an
//! already-built model on every path change.

use sidebar_types::{SidebarItem, SidebarMatchRule, SidebarModel};

/// Segment-aware prefix test.
///
/// One trailing `/` on `prefix` is ignored. `pathname` matches when it equals
/// the prefix or continues it with a `/`, so `/dashboard` matches
/// `/dashboard/x` but not `/dashboardx`.
pub fn is_prefix_match(pathname: &str, prefix: &str) -> bool {
    let normalized = prefix.strip_suffix('/').unwrap_or(prefix);
    match pathname.strip_prefix(normalized) {
        Some("") => true,
        Some(rest) => rest.starts_with('/'),
        None => false,
    }
}

/// Whether `item` corresponds to `pathname`.
///
/// An item with children is active iff any descendant is; its own match rule
/// is ignored. A leaf without a match rule is never active.
pub fn is_active(item: &SidebarItem, pathname: &str) -> bool {
    let children = item.children();
    if !children.is_empty() {
        return children.iter().any(|child| is_active(child, pathname));
    }

    match &item.match_rule {
        None => false,
        Some(SidebarMatchRule::Exact(path)) => pathname == path,
        Some(SidebarMatchRule::StartsWith(prefix)) => is_prefix_match(pathname, prefix),
    }
}

/// Ids from the top-level item down to the first active leaf.
///
/// Main is searched before footer, each in definition order. Empty when no
/// item is active.
pub fn active_trail(model: &SidebarModel, pathname: &str) -> Vec<String> {
    let mut trail = Vec::new();
    let mut level: Vec<&SidebarItem> = model.top_level().collect();

    while let Some(item) = level.into_iter().find(|item| is_active(item, pathname)) {
        trail.push(item.id.clone());
        level = item.children().iter().collect();
    }

    trail
}
