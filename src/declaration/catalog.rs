//! Declaration catalog indexed by id and version

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::errors::{CatalogError, CatalogResult};
use super::partner::partner_dashboard;
use super::types::Declaration;

/// Immutable-after-load set of declarations keyed by `(id, version)`.
///
/// Iteration is in key order, so listings are stable across runs.
#[derive(Debug, Clone, Default)]
pub struct DeclarationCatalog {
    entries: BTreeMap<(String, String), Declaration>,
}

impl DeclarationCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the built-in declarations
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog
            .entries
            .insert(key(&partner_dashboard()), partner_dashboard());
        catalog
    }

    /// Validates and registers a declaration.
    ///
    /// Fails on structural errors or if the same id and version is already
    /// registered.
    pub fn insert(&mut self, declaration: Declaration) -> CatalogResult<()> {
        declaration.validate()?;

        let key = key(&declaration);
        if self.entries.contains_key(&key) {
            return Err(CatalogError::Duplicate {
                id: key.0,
                version: key.1,
            });
        }
        self.entries.insert(key, declaration);
        Ok(())
    }

    /// Loads a JSON array of declarations and registers each of them.
    pub fn load_file(&mut self, path: &Path) -> CatalogResult<usize> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_json(&content)
    }

    /// Registers every declaration in a JSON array.
    ///
    /// All-or-nothing: if any entry is rejected the catalog is unchanged.
    pub fn load_json(&mut self, json: &str) -> CatalogResult<usize> {
        let declarations: Vec<Declaration> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;

        let mut staged = self.clone();
        for declaration in declarations.iter().cloned() {
            staged.insert(declaration)?;
        }
        *self = staged;
        Ok(declarations.len())
    }

    /// Exact lookup
    pub fn get(&self, id: &str, version: &str) -> CatalogResult<&Declaration> {
        self.entries
            .get(&(id.to_string(), version.to_string()))
            .ok_or_else(|| CatalogError::NotFound {
                id: id.to_string(),
                version: Some(version.to_string()),
            })
    }

    /// Highest registered version of `id`, by dotted-numeric comparison
    pub fn latest(&self, id: &str) -> CatalogResult<&Declaration> {
        self.entries
            .values()
            .filter(|d| d.id == id)
            .max_by(|a, b| compare_versions(&a.version, &b.version))
            .ok_or_else(|| CatalogError::NotFound {
                id: id.to_string(),
                version: None,
            })
    }

    /// Lookup by id with an optional version; `None` means latest
    pub fn find(&self, id: &str, version: Option<&str>) -> CatalogResult<&Declaration> {
        match version {
            Some(version) => self.get(id, version),
            None => self.latest(id),
        }
    }

    /// All declarations in `(id, version)` order
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn key(declaration: &Declaration) -> (String, String) {
    (declaration.id.clone(), declaration.version.clone())
}

/// Compares versions component-wise on `.`; numeric components compare as
/// numbers, anything else lexically. Numeric sorts below non-numeric.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (Some(l), Some(r)) => {
                let ord = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    (Ok(_), Err(_)) => Ordering::Less,
                    (Err(_), Ok(_)) => Ordering::Greater,
                    (Err(_), Err(_)) => l.cmp(r),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}
