//! Organization entitlements supplied by the subscription service.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::{BTreeMap, BTreeSet};

/// Value of a plan feature flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Bool(bool),
    Number(Number),
    Text(String),
}

impl FeatureValue {
    /// `true`, any non-zero number, or any non-empty string.
    pub fn is_truthy(&self) -> bool {
        match self {
            FeatureValue::Bool(value) => *value,
            FeatureValue::Number(value) => value.as_f64().is_some_and(|n| n != 0.0),
            FeatureValue::Text(value) => !value.is_empty(),
        }
    }
}

/// Subscription facts for the active organization.
///
/// The subscription service passes `None` instead of a record when there is
/// no usable subscription; every consumer treats that as all-disabled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entitlements {
    #[serde(default)]
    pub enabled_modules: BTreeSet<String>,
    #[serde(default)]
    pub enabled_contexts: BTreeSet<String>,
    #[serde(default)]
    pub features: BTreeMap<String, FeatureValue>,
    #[serde(default)]
    pub limits: BTreeMap<String, Number>,
}

impl Entitlements {
    /// Entitlements enabling the given modules and nothing else.
    pub fn with_modules<I, S>(modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled_modules: modules.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Enable a module.
    pub fn enable_module(mut self, module: impl Into<String>) -> Self {
        self.enabled_modules.insert(module.into());
        self
    }

    /// Enable a context.
    pub fn enable_context(mut self, context: impl Into<String>) -> Self {
        self.enabled_contexts.insert(context.into());
        self
    }

    /// Set a feature value.
    pub fn with_feature(mut self, key: impl Into<String>, value: FeatureValue) -> Self {
        self.features.insert(key.into(), value);
        self
    }

    /// Set a numeric limit.
    pub fn with_limit(mut self, key: impl Into<String>, value: impl Into<Number>) -> Self {
        self.limits.insert(key.into(), value.into());
        self
    }

    pub fn is_module_enabled(&self, module: &str) -> bool {
        self.enabled_modules.contains(module)
    }

    pub fn has_context(&self, context: &str) -> bool {
        self.enabled_contexts.contains(context)
    }

    pub fn feature(&self, key: &str) -> Option<&FeatureValue> {
        self.features.get(key)
    }

    /// Whether a feature is present and truthy. Missing features are disabled.
    pub fn is_feature_enabled(&self, key: &str) -> bool {
        self.feature(key).is_some_and(FeatureValue::is_truthy)
    }

    pub fn limit(&self, key: &str) -> Option<&Number> {
        self.limits.get(key)
    }
}

/// Fail-closed module membership: `None` enables nothing.
pub fn module_enabled(entitlements: Option<&Entitlements>, module: &str) -> bool {
    entitlements.is_some_and(|e| e.is_module_enabled(module))
}
