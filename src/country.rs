//! Country name resolution.
//!
//! The aggregator never interprets country names itself. It hands the free-text
//! country of each publication to a [`CountryResolver`] and uses whatever canonical
//! code comes back as the bucket key; names that do not resolve are left out of the
//! country views.
//!
//! # Example
//!
//! ```
//! use bibeval::{CountryCode, CountryResolver, CountryTable};
//!
//! let table: CountryTable = [("United States", "USA"), ("United Kingdom", "GBR")]
//!     .into_iter()
//!     .collect();
//! assert_eq!(table.resolve("United Kingdom"), Some(CountryCode::new("GBR")));
//! assert_eq!(table.resolve("Atlantis"), None);
//!
//! // Any closure works as well.
//! let upper = |name: &str| (!name.is_empty()).then(|| CountryCode::new(name.to_uppercase()));
//! assert_eq!(upper.resolve("fra"), Some(CountryCode::new("FRA")));
//! ```

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Canonical country identifier (for example an ISO 3166-1 alpha-3 code).
///
/// Codes must share the key space of whatever geometry the rendering layer uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCode(CompactString);

impl CountryCode {
    pub fn new(code: impl Into<CompactString>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CountryCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for CountryCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

/// Maps a free-text country name to its canonical code.
pub trait CountryResolver {
    /// Returns `None` when the name is empty or not recognized.
    fn resolve(&self, name: &str) -> Option<CountryCode>;
}

impl<F> CountryResolver for F
where
    F: Fn(&str) -> Option<CountryCode>,
{
    fn resolve(&self, name: &str) -> Option<CountryCode> {
        self(name)
    }
}

/// `Sync` when the `parallel` feature is enabled, and implemented for every type
/// otherwise.
///
/// Resolvers are shared across rayon tasks only in parallel builds, so a
/// single-threaded build accepts resolvers with interior mutability such as a
/// `RefCell` cache.
#[cfg(feature = "parallel")]
pub trait MaybeSync: Sync {}

#[cfg(feature = "parallel")]
impl<T: Sync + ?Sized> MaybeSync for T {}

/// `Sync` when the `parallel` feature is enabled, and implemented for every type
/// otherwise.
#[cfg(not(feature = "parallel"))]
pub trait MaybeSync {}

#[cfg(not(feature = "parallel"))]
impl<T: ?Sized> MaybeSync for T {}

/// Exact-match lookup table from country names to codes.
///
/// Names are matched case-sensitively, the same way the export spells them.
#[derive(Debug, Clone, Default)]
pub struct CountryTable {
    names: HashMap<String, CountryCode>,
}

impl CountryTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the code for a country name.
    pub fn insert(&mut self, name: impl Into<String>, code: impl Into<CountryCode>) -> &mut Self {
        self.names.insert(name.into(), code.into());
        self
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl CountryResolver for CountryTable {
    fn resolve(&self, name: &str) -> Option<CountryCode> {
        if name.is_empty() {
            return None;
        }
        self.names.get(name).cloned()
    }
}

impl<N, C> FromIterator<(N, C)> for CountryTable
where
    N: Into<String>,
    C: Into<CountryCode>,
{
    fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, code) in iter {
            table.insert(name, code);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CountryTable {
        [("United States", "USA"), ("United Kingdom", "GBR")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_table_resolves_exact_names() {
        let table = table();
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve("United States"), Some(CountryCode::new("USA")));
        assert_eq!(table.resolve("united states"), None);
        assert_eq!(table.resolve(""), None);
    }

    #[test]
    fn test_insert_replaces_code() {
        let mut table = table();
        table.insert("United Kingdom", "UK");
        assert_eq!(table.resolve("United Kingdom"), Some(CountryCode::new("UK")));
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |name: &str| match name {
            "Germany" => Some(CountryCode::new("DEU")),
            _ => None,
        };
        assert_eq!(resolver.resolve("Germany"), Some(CountryCode::new("DEU")));
        assert_eq!(resolver.resolve("Prussia"), None);
    }

    #[test]
    fn test_country_code_display() {
        assert_eq!(CountryCode::new("FRA").to_string(), "FRA");
        assert_eq!(CountryCode::from("FRA").as_str(), "FRA");
    }
}
