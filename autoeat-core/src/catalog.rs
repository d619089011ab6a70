//! Food catalog: the normalized set of item identifiers the agent may eat.
//!
//! The catalog is read once at startup from a line-delimited file (one
//! identifier per line, namespace optional) and never mutated afterwards.
//! A missing or unreadable file is never fatal: the built-in default list
//! is used instead and the condition is logged.
//!
//! ## Normalization
//!
//! Every identifier is canonicalized with [`normalize`]: ids without the
//! `minecraft:` namespace get it prepended. [`FoodCatalog::contains`]
//! normalizes its query too, so callers may pass either form.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{error, info, warn};

use crate::error::CatalogError;

/// Namespace every catalog entry carries.
pub const NAMESPACE_PREFIX: &str = "minecraft:";

/// Default file name for the food list.
pub const DEFAULT_FOOD_LIST: &str = "foodlist.txt";

/// Foods used when no food list can be read.
pub const DEFAULT_FOODS: [&str; 3] = [
    "minecraft:cooked_beef",
    "minecraft:cooked_chicken",
    "minecraft:bread",
];

/// Canonicalize an item identifier to carry the `minecraft:` namespace.
///
/// Idempotent: `normalize(&normalize(x)) == normalize(x)`.
#[must_use]
pub fn normalize(identifier: &str) -> String {
    if identifier.starts_with(NAMESPACE_PREFIX) {
        identifier.to_string()
    } else {
        format!("{NAMESPACE_PREFIX}{identifier}")
    }
}

/// Immutable set of normalized edible item identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoodCatalog {
    entries: HashSet<String>,
}

impl FoodCatalog {
    /// Build a catalog from raw identifiers, normalizing each.
    ///
    /// Identifiers are trimmed; blank ones are skipped.
    #[must_use]
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .filter_map(|raw| {
                let trimmed = raw.as_ref().trim();
                (!trimmed.is_empty()).then(|| normalize(trimmed))
            })
            .collect();
        Self { entries }
    }

    /// Parse a line-delimited food list.
    #[must_use]
    pub fn from_lines(text: &str) -> Self {
        Self::from_entries(text.lines())
    }

    /// The built-in catalog.
    #[must_use]
    pub fn default_foods() -> Self {
        Self::from_entries(DEFAULT_FOODS)
    }

    /// Read a food list file.
    ///
    /// # Errors
    /// Returns [`CatalogError::NotFound`] if the file does not exist and
    /// [`CatalogError::Read`] for any other I/O failure.
    pub fn try_load(path: &Path) -> Result<Self, CatalogError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Self::from_lines(&text)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(CatalogError::NotFound(path.to_path_buf()))
            }
            Err(source) => Err(CatalogError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Read a food list file, falling back to [`FoodCatalog::default_foods`]
    /// if it is missing or unreadable.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(catalog) => {
                info!(
                    path = %path.display(),
                    foods = ?catalog.sorted(),
                    "Loaded food list"
                );
                catalog
            }
            Err(err @ CatalogError::NotFound(_)) => {
                warn!(error = %err, "Using default food list");
                Self::default_foods()
            }
            Err(err @ CatalogError::Read { .. }) => {
                error!(error = %err, "Using default food list");
                Self::default_foods()
            }
        }
    }

    /// Whether `identifier` is edible. The query is normalized first.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        if identifier.starts_with(NAMESPACE_PREFIX) {
            self.entries.contains(identifier)
        } else {
            self.entries.contains(&normalize(identifier))
        }
    }

    /// Number of distinct foods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is edible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Entries sorted, for stable log output.
    #[must_use]
    pub fn sorted(&self) -> Vec<&str> {
        let mut foods: Vec<&str> = self.iter().collect();
        foods.sort_unstable();
        foods
    }
}
