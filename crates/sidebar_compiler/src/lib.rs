//! Sidebar compiler - role- and plan-aware navigation models.
//!
//! This crate turns a static navigation definition into the sidebar a given
//! user may see, and decides which item is active for a pathname:
//!
//! - `NavigationDefinition` - static, process-wide sections of items
//! - `NavigationLoader` - YAML definition loading with env override
//! - `build_sidebar_model` - module gating, visibility rules, bottom-up pruning
//! - `is_active` / `is_prefix_match` / `active_trail` - active route matching
//! - `ModelFingerprint` / `BuildKey` - hydration checks and cache keys
//!
//! # Architecture
//!
//! ```text
//! PermissionSnapshot ─┐
//! Entitlements? ──────┼──► build_sidebar_model ──► SidebarModel ──► (JSON) ──► is_active
//! NavigationDefinition┘         (server)                                 (per path change)
//! ```
//!
//! The builder is synchronous and side-effect free apart from an optional,
//! explicitly passed `PermissionCache`.
//!
//! # Example
//!
//! ```
//! use sidebar_compiler::{build_sidebar_model, is_active, NavigationDefinition};
//! use sidebar_types::{Entitlements, PermissionSnapshot, SidebarContext, UserContext};
//!
//! let definition = NavigationDefinition::builtin().unwrap();
//! let user = UserContext::new(PermissionSnapshot::new(["organization.*", "account.*"]));
//! let entitlements = Entitlements::with_modules(["organization"]);
//!
//! let model = build_sidebar_model(
//!     definition,
//!     &SidebarContext::new().with_org("org-1"),
//!     &user,
//!     Some(&entitlements),
//!     "en",
//! );
//!
//! assert!(model.contains("organization.billing"));
//! let organization = model.find("organization").unwrap();
//! assert!(is_active(organization, "/dashboard/organization/billing/invoices"));
//! ```

mod active;
mod builder;
mod definition;
mod error;
mod fingerprint;
mod loader;

pub use active::{active_trail, is_active, is_prefix_match};
pub use builder::{build_sidebar_model, build_sidebar_model_cached};
pub use definition::{NavigationDefinition, NavigationSection};
pub use error::{NavigationError, NavigationResult};
pub use fingerprint::{BuildKey, ModelFingerprint};
pub use loader::{NavigationLoader, NAVIGATION_PATH_ENV};
