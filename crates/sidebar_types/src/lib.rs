//! Shared types for the sidebar navigation compiler.
//!
//! This crate is the single source of truth for every value that crosses a
//! boundary of the navigation subsystem:
//!
//! - **PermissionSnapshot**: compiled allow-list supplied by the permission service
//! - **Entitlements**: subscription facts supplied by the subscription service
//! - **SidebarItem**: recursive navigation node with visibility and match rules
//! - **SidebarModel**: the `{ main, footer }` tree handed to page rendering
//!
//! # Determinism
//!
//! Every set and map is a `BTreeSet`/`BTreeMap`, and optional fields are
//! omitted rather than serialized as `null`, so equal values always produce
//! byte-identical JSON.
//!
//! # Example
//!
//! ```
//! use sidebar_types::{SidebarItem, SidebarMatchRule, SidebarVisibilityRules};
//!
//! let item = SidebarItem::new("warehouse.products", "Products", "package")
//!     .with_href("/dashboard/warehouse/products")
//!     .with_match(SidebarMatchRule::starts_with("/dashboard/warehouse/products"))
//!     .with_visibility(
//!         SidebarVisibilityRules::new().require_permission("warehouse.products.read"),
//!     );
//!
//! let json = serde_json::to_string(&item).unwrap();
//! assert!(json.contains(r#""match":{"startsWith":"/dashboard/warehouse/products"}"#));
//! ```

mod context;
mod entitlements;
mod item;
mod model;
mod snapshot;

pub use context::{SidebarContext, UserContext};
pub use entitlements::{module_enabled, Entitlements, FeatureValue};
pub use item::{DisabledReason, SidebarItem, SidebarMatchRule, SidebarVisibilityRules};
pub use model::SidebarModel;
pub use snapshot::PermissionSnapshot;

/// Suffix marking an allow-list entry as a wildcard over its nested segments.
pub const WILDCARD_SUFFIX: &str = ".*";
