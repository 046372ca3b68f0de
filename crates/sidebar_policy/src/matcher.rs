//! Permission matching against allow-lists with `.*` wildcards.
//!
//! An allow entry ending in `.*` grants its prefix and every slug nested
//! beneath it. No other wildcard form exists: a `*` anywhere else, or in the
//! required slug, is an ordinary character.

use sidebar_types::WILDCARD_SUFFIX;
use std::borrow::Borrow;
use std::collections::BTreeSet;

/// Whether `required` equals `prefix` or is nested under it.
fn covered_by_prefix(prefix: &str, required: &str) -> bool {
    match required.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with('.'),
        None => false,
    }
}

/// Check one required slug against a raw allow-list.
///
/// Uncached form: scans the allow-list with plain string comparisons and
/// allocates nothing.
pub fn satisfies<S>(allow: &BTreeSet<S>, required: &str) -> bool
where
    S: Ord + Borrow<str>,
{
    if allow.contains(required) {
        return true;
    }

    allow.iter().any(|entry| {
        Borrow::<str>::borrow(entry)
            .strip_suffix(WILDCARD_SUFFIX)
            .is_some_and(|prefix| covered_by_prefix(prefix, required))
    })
}

/// Allow-list split into exact grants and wildcard prefixes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledAllowList {
    exact: BTreeSet<String>,
    prefixes: Vec<String>,
}

impl CompiledAllowList {
    /// Compile an allow-list. Prefixes keep the iteration order of `allow`.
    pub fn compile<'a, I>(allow: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut compiled = Self::default();
        for entry in allow {
            if let Some(prefix) = entry.strip_suffix(WILDCARD_SUFFIX) {
                compiled.prefixes.push(prefix.to_string());
            }
            compiled.exact.insert(entry.to_string());
        }
        compiled
    }

    pub fn satisfies(&self, required: &str) -> bool {
        self.exact.contains(required)
            || self
                .prefixes
                .iter()
                .any(|prefix| covered_by_prefix(prefix, required))
    }

    /// Wildcard prefixes with the trailing `.*` removed.
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }
}
