//! The compiled sidebar model.

use crate::item::SidebarItem;
use serde::{Deserialize, Serialize};

/// Navigation visible to one user, ready to cross the SSR boundary.
///
/// Created fresh per build and never mutated afterwards. `footer` is always
/// serialized, even when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarModel {
    pub main: Vec<SidebarItem>,
    #[serde(default)]
    pub footer: Vec<SidebarItem>,
}

impl SidebarModel {
    pub fn new(main: Vec<SidebarItem>, footer: Vec<SidebarItem>) -> Self {
        Self { main, footer }
    }

    /// Top-level items, main first, then footer.
    pub fn top_level(&self) -> impl Iterator<Item = &SidebarItem> {
        self.main.iter().chain(self.footer.iter())
    }

    /// Every item id in pre-order, main first, then footer.
    pub fn item_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for item in self.top_level() {
            item.walk(&mut |node| ids.push(node.id.as_str()));
        }
        ids
    }

    /// Find an item anywhere in the tree.
    pub fn find(&self, id: &str) -> Option<&SidebarItem> {
        fn search<'a>(items: &'a [SidebarItem], id: &str) -> Option<&'a SidebarItem> {
            items.iter().find_map(|item| {
                if item.id == id {
                    Some(item)
                } else {
                    search(item.children(), id)
                }
            })
        }

        search(&self.main, id).or_else(|| search(&self.footer, id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.main.is_empty() && self.footer.is_empty()
    }

    /// Compact JSON rendering.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
