//! Permission matching and visibility evaluation for sidebar navigation.
//!
//! This crate provides:
//!
//! - **satisfies / CompiledAllowList**: does an allow-list grant a slug
//! - **PermissionCache**: explicit, clearable memo of compiled allow-lists
//! - **VisibilityEvaluator**: AND/OR rule sets over permissions and modules
//!
//! # Architecture
//!
//! ```text
//! PermissionSnapshot ──► PermissionCache ──► CompiledAllowList ─┐
//!                                                               ├──► VisibilityEvaluator ──► Verdict
//! Entitlements (or None = fail-closed) ─────────────────────────┘
//! ```
//!
//! Everything here is synchronous and pure apart from the cache, which only
//! memoizes values derived from its key.
//!
//! # Example
//!
//! ```
//! use sidebar_policy::VisibilityEvaluator;
//! use sidebar_types::{Entitlements, PermissionSnapshot, SidebarVisibilityRules};
//!
//! let snapshot = PermissionSnapshot::new(["warehouse.*"]);
//! let entitlements = Entitlements::with_modules(["warehouse"]);
//! let evaluator = VisibilityEvaluator::new(&snapshot, Some(&entitlements));
//!
//! let rules = SidebarVisibilityRules::new()
//!     .require_permission("warehouse.products.read")
//!     .require_module("warehouse");
//! assert!(evaluator.is_visible(Some(&rules)));
//! ```

mod cache;
mod evaluator;
mod matcher;

pub use cache::{clear_permission_cache, PermissionCache, DEFAULT_MAX_CACHE_ENTRIES};
pub use evaluator::{is_visible, Verdict, VisibilityEvaluator};
pub use matcher::{satisfies, CompiledAllowList};
