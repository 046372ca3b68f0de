//! Static navigation definition.
//!
//! The definition is process-wide, read-only configuration: parsed and
//! validated once, then shared by every build.

use crate::error::{NavigationError, NavigationResult};
use serde::{Deserialize, Serialize};
use sidebar_types::SidebarItem;
use std::collections::HashSet;
use std::sync::OnceLock;

const BUILTIN_SOURCE: &str = "builtin navigation.yaml";
const BUILTIN_YAML: &str = include_str!("../config/navigation.yaml");

static BUILTIN: OnceLock<NavigationResult<NavigationDefinition>> = OnceLock::new();

/// A group of top-level items, optionally gated by a subscription module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationSection {
    /// Module slug. When set and not enabled, the whole section is skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(default)]
    pub items: Vec<SidebarItem>,
}

impl NavigationSection {
    /// Section that is never module-gated.
    pub fn ungated(items: Vec<SidebarItem>) -> Self {
        Self {
            module: None,
            items,
        }
    }

    /// Section dropped unless `module` is enabled.
    pub fn for_module(module: impl Into<String>, items: Vec<SidebarItem>) -> Self {
        Self {
            module: Some(module.into()),
            items,
        }
    }
}

/// Full static definition: main sections and footer sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationDefinition {
    #[serde(default)]
    pub main: Vec<NavigationSection>,
    #[serde(default)]
    pub footer: Vec<NavigationSection>,
}

impl NavigationDefinition {
    pub fn new(main: Vec<NavigationSection>, footer: Vec<NavigationSection>) -> Self {
        Self { main, footer }
    }

    /// The definition shipped with this crate, parsed on first use.
    pub fn builtin() -> NavigationResult<&'static NavigationDefinition> {
        BUILTIN
            .get_or_init(|| Self::from_yaml_str(BUILTIN_YAML, BUILTIN_SOURCE))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(content: &str, source_name: &str) -> NavigationResult<Self> {
        let definition: Self =
            serde_yaml::from_str(content).map_err(|e| NavigationError::Parse {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })?;
        definition.validate()?;
        Ok(definition)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(content: &str, source_name: &str) -> NavigationResult<Self> {
        let definition: Self =
            serde_json::from_str(content).map_err(|e| NavigationError::Parse {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })?;
        definition.validate()?;
        Ok(definition)
    }

    /// Check structural invariants the builder relies on.
    ///
    /// 1. Module slugs, when present, are non-empty
    /// 2. Every item id is non-empty
    /// 3. Item ids are unique across main and footer
    pub fn validate(&self) -> NavigationResult<()> {
        let mut seen = HashSet::new();
        let sides = [("main", &self.main), ("footer", &self.footer)];

        for (side, sections) in sides {
            for (index, section) in sections.iter().enumerate() {
                let label = format!("{side}[{index}]");

                if section.module.as_deref().is_some_and(str::is_empty) {
                    return Err(NavigationError::EmptyModuleSlug { section: label });
                }

                for item in &section.items {
                    check_ids(item, &label, &mut seen)?;
                }
            }
        }

        Ok(())
    }

    /// Sections of both sides, main first.
    pub fn sections(&self) -> impl Iterator<Item = &NavigationSection> {
        self.main.iter().chain(self.footer.iter())
    }

    /// Total number of items, nested ones included.
    pub fn item_count(&self) -> usize {
        let mut count = 0;
        for section in self.sections() {
            for item in &section.items {
                item.walk(&mut |_| count += 1);
            }
        }
        count
    }
}

fn check_ids<'a>(
    item: &'a SidebarItem,
    section: &str,
    seen: &mut HashSet<&'a str>,
) -> NavigationResult<()> {
    if item.id.is_empty() {
        return Err(NavigationError::EmptyItemId {
            section: section.to_string(),
        });
    }
    if !seen.insert(item.id.as_str()) {
        return Err(NavigationError::DuplicateItemId {
            id: item.id.clone(),
            section: section.to_string(),
        });
    }
    for child in item.children() {
        check_ids(child, section, seen)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sidebar_types::{DisabledReason, SidebarMatchRule};

    #[test]
    fn builtin_parses_and_validates() {
        let definition = NavigationDefinition::builtin().unwrap();
        assert!(!definition.main.is_empty());
        assert!(!definition.footer.is_empty());

        let modules: Vec<_> = definition
            .main
            .iter()
            .filter_map(|s| s.module.as_deref())
            .collect();
        assert_eq!(modules, vec!["organization", "warehouse", "analytics"]);
    }

    #[test]
    fn builtin_is_loaded_once() {
        let first = NavigationDefinition::builtin().unwrap();
        let second = NavigationDefinition::builtin().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn yaml_shape() {
        let yaml = r#"
main:
  - module: warehouse
    items:
      - id: warehouse.audits
        title: Audits
        iconKey: clipboard-check
        disabledReason: coming_soon
        match:
          startsWith: /dashboard/warehouse/audits
footer: []
"#;
        let definition = NavigationDefinition::from_yaml_str(yaml, "inline").unwrap();
        let item = &definition.main[0].items[0];
        assert_eq!(definition.main[0].module.as_deref(), Some("warehouse"));
        assert_eq!(item.disabled_reason, Some(DisabledReason::ComingSoon));
        assert_eq!(
            item.match_rule,
            Some(SidebarMatchRule::starts_with("/dashboard/warehouse/audits"))
        );
        assert_eq!(definition.item_count(), 1);
    }

    #[test]
    fn rejects_match_rule_with_both_keys() {
        let yaml = r#"
main:
  - items:
      - id: home
        title: Home
        iconKey: home
        match:
          exact: /dashboard
          startsWith: /dashboard
"#;
        let err = NavigationDefinition::from_yaml_str(yaml, "inline").unwrap_err();
        assert_eq!(err.code(), "PARSE");
    }

    #[test]
    fn rejects_duplicate_ids_across_sides() {
        let definition = NavigationDefinition::new(
            vec![NavigationSection::ungated(vec![SidebarItem::new(
                "help", "Help", "life-buoy",
            )])],
            vec![NavigationSection::ungated(vec![SidebarItem::new(
                "help", "Help", "life-buoy",
            )])],
        );
        let err = definition.validate().unwrap_err();
        assert_eq!(
            err,
            NavigationError::DuplicateItemId {
                id: "help".to_string(),
                section: "footer[0]".to_string(),
            }
        );
    }

    #[test]
    fn rejects_nested_duplicate_and_empty_ids() {
        let nested_duplicate = NavigationDefinition::new(
            vec![NavigationSection::ungated(vec![SidebarItem::new(
                "org", "Org", "building",
            )
            .with_children(vec![SidebarItem::new("org", "Again", "building")])])],
            vec![],
        );
        assert_eq!(
            nested_duplicate.validate().unwrap_err().code(),
            "DUPLICATE_ITEM_ID"
        );

        let empty_id = NavigationDefinition::new(
            vec![NavigationSection::ungated(vec![SidebarItem::new("", "Nameless", "x")])],
            vec![],
        );
        assert_eq!(empty_id.validate().unwrap_err().code(), "EMPTY_ITEM_ID");
    }

    #[test]
    fn rejects_empty_module_slug() {
        let definition =
            NavigationDefinition::new(vec![NavigationSection::for_module("", vec![])], vec![]);
        assert_eq!(
            definition.validate().unwrap_err(),
            NavigationError::EmptyModuleSlug {
                section: "main[0]".to_string()
            }
        );
    }

    #[test]
    fn json_definitions_are_accepted() {
        let json = r#"{"main":[{"module":"analytics","items":[{"id":"analytics","title":"Analytics","iconKey":"bar-chart"}]}]}"#;
        let definition = NavigationDefinition::from_json_str(json, "inline.json").unwrap();
        assert!(definition.footer.is_empty());
        assert_eq!(definition.item_count(), 1);
    }
}
