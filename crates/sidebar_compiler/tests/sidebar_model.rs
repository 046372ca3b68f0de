//! Sidebar model tests against the shipped navigation definition.
//!
//! Covers role differences (owner vs member), plan gating (free vs pro),
//! fail-closed entitlements, and output determinism.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sidebar_compiler::{
    build_sidebar_model, build_sidebar_model_cached, BuildKey, ModelFingerprint,
    NavigationDefinition,
};
use sidebar_policy::{clear_permission_cache, PermissionCache};
use sidebar_types::{
    Entitlements, PermissionSnapshot, SidebarContext, SidebarItem, SidebarModel, UserContext,
};
use std::collections::BTreeSet;

const OWNER_ALLOW: &[&str] = &["organization.*", "warehouse.*", "analytics.*", "account.*"];
const MEMBER_ALLOW: &[&str] = &[
    "organization.profile.read",
    "organization.members.read",
    "warehouse.products.read",
    "account.*",
];
const FREE_PLAN: &[&str] = &["organization", "warehouse"];
const PRO_PLAN: &[&str] = &["organization", "warehouse", "analytics"];

fn definition() -> &'static NavigationDefinition {
    NavigationDefinition::builtin().expect("builtin navigation definition")
}

fn context() -> SidebarContext {
    SidebarContext::new()
        .with_org("org-1")
        .with_branch("branch-1")
        .with_user_modules(["warehouse"])
}

fn build(allow: &[&str], modules: Option<&[&str]>) -> SidebarModel {
    let entitlements = modules.map(|m| Entitlements::with_modules(m.iter().copied()));
    build_sidebar_model(
        definition(),
        &context(),
        &UserContext::new(PermissionSnapshot::new(allow.iter().copied())),
        entitlements.as_ref(),
        "en",
    )
}

fn ids(model: &SidebarModel) -> BTreeSet<String> {
    model.item_ids().into_iter().map(str::to_string).collect()
}

#[test]
fn owner_sees_billing_member_does_not() {
    let owner = build(OWNER_ALLOW, Some(FREE_PLAN));
    let member = build(MEMBER_ALLOW, Some(FREE_PLAN));

    assert!(owner.contains("organization.billing"));
    assert!(!member.contains("organization.billing"));
    assert!(ids(&owner).is_superset(&ids(&member)));
}

#[test]
fn member_model_shape() {
    let member = build(MEMBER_ALLOW, Some(FREE_PLAN));

    assert_eq!(
        member.item_ids(),
        vec![
            "home",
            "organization",
            "organization.profile",
            "organization.members",
            "warehouse",
            "warehouse.products",
            "account",
            "help",
        ]
    );
}

#[test]
fn free_plan_hides_analytics() {
    let free = build(OWNER_ALLOW, Some(FREE_PLAN));
    let pro = build(OWNER_ALLOW, Some(PRO_PLAN));

    let count = |model: &SidebarModel| {
        model
            .item_ids()
            .into_iter()
            .filter(|id| *id == "analytics")
            .count()
    };
    assert_eq!(count(&free), 0);
    assert_eq!(count(&pro), 1);
}

#[test]
fn module_gating_ignores_permissions() {
    // Permission for warehouse, but the plan does not include it.
    let model = build(OWNER_ALLOW, Some(&["organization"]));
    assert!(!model.item_ids().iter().any(|id| id.starts_with("warehouse")));
}

#[test]
fn no_subscription_fails_closed() {
    let model = build(OWNER_ALLOW, None);

    // Only ungated sections survive.
    assert_eq!(model.item_ids(), vec!["home", "account", "help"]);
}

#[test]
fn parent_dropped_when_no_child_visible() {
    // No warehouse child is granted, so the warehouse parent goes too.
    let model = build(&["organization.profile.read"], Some(FREE_PLAN));
    assert!(!model.contains("warehouse"));
    assert!(model.contains("organization"));
}

#[test]
fn coming_soon_item_passes_through() {
    let owner = build(OWNER_ALLOW, Some(FREE_PLAN));
    let audits = owner.find("warehouse.audits").expect("audits item");
    assert_eq!(audits.badge.as_deref(), Some("Soon"));
    assert_eq!(audits.title_key.as_deref(), Some("sidebar.warehouse.audits"));

    let json = owner.to_json().unwrap();
    assert!(json.contains(r#""disabledReason":"coming_soon""#));
}

#[test]
fn empty_main_still_has_footer_key() {
    let empty = NavigationDefinition::new(vec![], vec![]);
    let model = build_sidebar_model(
        &empty,
        &SidebarContext::new(),
        &UserContext::default(),
        None,
        "en",
    );
    assert_eq!(model.to_json().unwrap(), r#"{"main":[],"footer":[]}"#);

    let footer_only = NavigationDefinition::new(vec![], definition().footer.clone());
    let model = build_sidebar_model(
        &footer_only,
        &SidebarContext::new(),
        &UserContext::default(),
        None,
        "en",
    );
    assert!(model.main.is_empty());
    assert_eq!(
        model.footer.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(),
        vec!["help"]
    );
}

#[test]
fn build_is_idempotent() {
    let first = build(MEMBER_ALLOW, Some(PRO_PLAN));
    let second = build(MEMBER_ALLOW, Some(PRO_PLAN));

    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    assert_eq!(
        ModelFingerprint::compute(&first),
        ModelFingerprint::compute(&second)
    );
}

#[test]
fn model_survives_json_round_trip() {
    let model = build(OWNER_ALLOW, Some(PRO_PLAN));
    let json = model.to_json().unwrap();
    let decoded: SidebarModel = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded, model);
    assert!(!json.contains("null"));
}

#[test]
fn output_never_carries_active_flag() {
    let json = build(OWNER_ALLOW, Some(PRO_PLAN)).to_json().unwrap();
    assert!(!json.contains("active"));
}

#[test]
fn cached_build_matches_and_clears() {
    clear_permission_cache();
    let cache = PermissionCache::global();
    let user = UserContext::new(PermissionSnapshot::new(OWNER_ALLOW.iter().copied()));
    let entitlements = Entitlements::with_modules(PRO_PLAN.iter().copied());

    let cached = build_sidebar_model_cached(
        definition(),
        &context(),
        &user,
        Some(&entitlements),
        "en",
        cache,
    );
    assert_eq!(cached, build(OWNER_ALLOW, Some(PRO_PLAN)));
    assert!(!cache.is_empty());

    clear_permission_cache();
    assert!(cache.is_empty());
}

#[test]
fn build_key_matches_for_equal_inputs() {
    let user = UserContext::new(PermissionSnapshot::new(MEMBER_ALLOW.iter().copied()));
    let entitlements = Entitlements::with_modules(FREE_PLAN.iter().copied());

    assert_eq!(
        BuildKey::compute(&context(), &user, Some(&entitlements), "en"),
        BuildKey::compute(&context(), &user, Some(&entitlements), "en")
    );
}

// -- Properties over the shipped definition --

fn arb_allow() -> impl Strategy<Value = Vec<&'static str>> {
    prop::sample::subsequence(
        vec![
            "organization.*",
            "organization.profile.read",
            "organization.members.read",
            "organization.invitations.read",
            "organization.branches.read",
            "organization.billing.read",
            "warehouse.*",
            "warehouse.products.read",
            "warehouse.locations.read",
            "warehouse.movements.read",
            "analytics.*",
            "analytics.reports.read",
            "account.*",
            "account.profile.read",
        ],
        0..=14,
    )
}

fn arb_modules() -> impl Strategy<Value = Option<Vec<&'static str>>> {
    prop::option::of(prop::sample::subsequence(
        vec!["organization", "warehouse", "analytics"],
        0..=3,
    ))
}

fn no_childless_parents(model: &SidebarModel) -> bool {
    fn check(item: &SidebarItem) -> bool {
        match &item.children {
            Some(children) => !children.is_empty() && children.iter().all(check),
            None => true,
        }
    }
    model.top_level().all(check)
}

proptest! {
    /// More permissions never remove an item.
    #[test]
    fn superset_permissions_superset_items(
        base in arb_allow(),
        extra in arb_allow(),
        modules in arb_modules(),
    ) {
        let larger: Vec<&str> = base.iter().chain(extra.iter()).copied().collect();
        let small = build(&base, modules.as_deref());
        let large = build(&larger, modules.as_deref());
        prop_assert!(ids(&large).is_superset(&ids(&small)));
    }

    /// Sections for disabled modules contribute nothing.
    #[test]
    fn disabled_module_sections_are_empty(allow in arb_allow(), modules in arb_modules()) {
        let model = build(&allow, modules.as_deref());
        let enabled = modules.clone().unwrap_or_default();

        for section in &definition().main {
            let Some(module) = section.module.as_deref() else { continue };
            if enabled.contains(&module) {
                continue;
            }
            for item in &section.items {
                prop_assert!(!model.contains(&item.id));
            }
        }
    }

    /// Repeated builds are byte-identical and no kept parent is childless.
    #[test]
    fn deterministic_and_pruned(allow in arb_allow(), modules in arb_modules()) {
        let first = build(&allow, modules.as_deref());
        let second = build(&allow, modules.as_deref());
        prop_assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
        prop_assert!(no_childless_parents(&first));
    }
}
