//! Fingerprints for model equality checks and build cache keys.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sidebar_types::{
    Entitlements, FeatureValue, SidebarContext, SidebarItem, SidebarMatchRule, SidebarModel,
    SidebarVisibilityRules, UserContext,
};

/// Length-prefixed field writer, so adjacent fields cannot run together.
struct FieldHasher(Sha256);

impl FieldHasher {
    fn new(domain: &str) -> Self {
        let mut hasher = Self(Sha256::new());
        hasher.str(domain);
        hasher
    }

    fn str(&mut self, value: &str) {
        self.0.update((value.len() as u64).to_le_bytes());
        self.0.update(value.as_bytes());
    }

    fn opt(&mut self, value: Option<&str>) {
        match value {
            Some(value) => {
                self.0.update([1u8]);
                self.str(value);
            }
            None => self.0.update([0u8]),
        }
    }

    fn count(&mut self, n: usize) {
        self.0.update((n as u64).to_le_bytes());
    }

    fn strs<'a>(&mut self, values: impl ExactSizeIterator<Item = &'a String>) {
        self.count(values.len());
        for value in values {
            self.str(value);
        }
    }

    fn finish(self) -> String {
        hex::encode(self.0.finalize())
    }
}

/// Content-addressed fingerprint of a compiled model.
///
/// Equal models always have equal fingerprints, which lets server and client
/// confirm they render the same tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelFingerprint {
    /// SHA-256 hash of the model.
    pub hash: String,
}

impl ModelFingerprint {
    pub fn compute(model: &SidebarModel) -> Self {
        let mut hasher = FieldHasher::new("sidebar-model/v1");

        for side in [&model.main, &model.footer] {
            hasher.count(side.len());
            for item in side {
                hash_item(&mut hasher, item);
            }
        }

        Self {
            hash: hasher.finish(),
        }
    }

    /// Get a short version of the hash (first 16 chars).
    pub fn short(&self) -> &str {
        self.hash.get(..16).unwrap_or(&self.hash)
    }
}

fn hash_item(hasher: &mut FieldHasher, item: &SidebarItem) {
    hasher.str(&item.id);
    hasher.str(&item.title);
    hasher.opt(item.title_key.as_deref());
    hasher.str(&item.icon_key);
    hasher.opt(item.href.as_deref());

    match &item.match_rule {
        None => hasher.str("match:none"),
        Some(SidebarMatchRule::Exact(path)) => {
            hasher.str("match:exact");
            hasher.str(path);
        }
        Some(SidebarMatchRule::StartsWith(prefix)) => {
            hasher.str("match:startsWith");
            hasher.str(prefix);
        }
    }

    match &item.visibility {
        None => hasher.str("visibility:none"),
        Some(rules) => hash_rules(hasher, rules),
    }

    hasher.opt(item.disabled_reason.as_ref().map(|r| r.as_str()));
    hasher.opt(item.badge.as_deref());

    match &item.children {
        None => hasher.str("children:none"),
        Some(children) => {
            hasher.str("children");
            hasher.count(children.len());
            for child in children {
                hash_item(hasher, child);
            }
        }
    }
}

fn hash_rules(hasher: &mut FieldHasher, rules: &SidebarVisibilityRules) {
    hasher.str("visibility");
    hasher.strs(rules.requires_permissions.iter());
    hasher.strs(rules.requires_any_permissions.iter());
    hasher.strs(rules.requires_modules.iter());
    hasher.strs(rules.requires_any_modules.iter());
}

/// Cache key over every input of a build.
///
/// Intended for a caching layer placed in front of the builder: two calls
/// with equal keys produce equal models for the same definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildKey {
    pub hash: String,
}

impl BuildKey {
    pub fn compute(
        context: &SidebarContext,
        user: &UserContext,
        entitlements: Option<&Entitlements>,
        locale: &str,
    ) -> Self {
        let mut hasher = FieldHasher::new("sidebar-build/v1");

        hasher.opt(context.active_org_id.as_deref());
        hasher.opt(context.active_branch_id.as_deref());
        hasher.strs(context.user_modules.iter());

        hasher.strs(user.permission_snapshot.allow.iter());
        hasher.strs(user.permission_snapshot.deny.iter());

        match entitlements {
            None => hasher.str("entitlements:none"),
            Some(entitlements) => {
                hasher.str("entitlements");
                hasher.strs(entitlements.enabled_modules.iter());
                hasher.strs(entitlements.enabled_contexts.iter());

                hasher.count(entitlements.features.len());
                for (key, value) in &entitlements.features {
                    hasher.str(key);
                    match value {
                        FeatureValue::Bool(flag) => hasher.str(if *flag { "b:1" } else { "b:0" }),
                        FeatureValue::Number(number) => hasher.str(&format!("n:{number}")),
                        FeatureValue::Text(text) => hasher.str(&format!("s:{text}")),
                    }
                }

                hasher.count(entitlements.limits.len());
                for (key, value) in &entitlements.limits {
                    hasher.str(key);
                    hasher.str(&value.to_string());
                }
            }
        }

        hasher.str(locale);

        Self {
            hash: hasher.finish(),
        }
    }

    pub fn short(&self) -> &str {
        self.hash.get(..16).unwrap_or(&self.hash)
    }
}
