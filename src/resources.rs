//! Resource collections, one per API version, keyed by `"{path}-{method}"`.

use crate::model::{resource_key, Resource};
use std::collections::HashMap;
use tracing::debug;

/// Ordered, key-unique collection of resources for one version.
///
/// Inserting a key that already exists replaces the earlier resource in
/// its original position.
#[derive(Debug, Clone, Default)]
pub struct Resources {
    entries: Vec<Resource>,
    index: HashMap<String, usize>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a resource, returning the one it replaced.
    pub fn insert(&mut self, resource: Resource) -> Option<Resource> {
        let key = resource.key();
        match self.index.get(&key) {
            Some(&slot) => {
                debug!(key = %key, "replacing resource with the same path and method");
                Some(std::mem::replace(&mut self.entries[slot], resource))
            }
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(resource);
                None
            }
        }
    }

    /// Look up by composite key, e.g. `"/product-get"`.
    pub fn get(&self, key: &str) -> Option<&Resource> {
        self.index.get(key).map(|&slot| &self.entries[slot])
    }

    /// Exact lookup by path and method (method is compared lower-case).
    pub fn find(&self, path: &str, method: &str) -> Option<&Resource> {
        self.get(&resource_key(path, &method.to_lowercase()))
    }

    /// Exact lookup, then one retry with `base_path` stripped from `path`.
    ///
    /// The retry only happens when `path` really starts with `base_path`
    /// followed by a `/`; there is no other fallback.
    pub fn find_under(&self, path: &str, method: &str, base_path: &str) -> Option<&Resource> {
        if let Some(found) = self.find(path, method) {
            return Some(found);
        }
        let relative = strip_base_path(path, base_path)?;
        self.find(relative, method)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Resources {
    type Item = &'a Resource;
    type IntoIter = std::slice::Iter<'a, Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Resource> for Resources {
    fn from_iter<I: IntoIterator<Item = Resource>>(iter: I) -> Self {
        let mut resources = Resources::new();
        for resource in iter {
            resources.insert(resource);
        }
        resources
    }
}

/// `"/api/v1/product"` under `"/api/v1"` becomes `"/product"`.
fn strip_base_path<'p>(path: &'p str, base_path: &str) -> Option<&'p str> {
    let base = base_path.trim_end_matches('/');
    if base.is_empty() {
        return None;
    }
    let rest = path.strip_prefix(base)?;
    if rest.is_empty() {
        Some("/")
    } else if rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

/// Resource collections grouped by declared `@apiVersion`.
///
/// Resources without a version live under `None`. Versions keep the
/// order in which they were first seen.
#[derive(Debug, Clone, Default)]
pub struct ResourcesByVersion {
    versions: Vec<(Option<String>, Resources)>,
}

impl ResourcesByVersion {
    pub fn new() -> Self {
        Self::default()
    }

    /// File a resource under its version, returning any resource it replaced.
    pub fn insert(&mut self, resource: Resource) -> Option<Resource> {
        let slot = match self
            .versions
            .iter()
            .position(|(v, _)| *v == resource.version)
        {
            Some(slot) => slot,
            None => {
                self.versions
                    .push((resource.version.clone(), Resources::new()));
                self.versions.len() - 1
            }
        };
        self.versions[slot].1.insert(resource)
    }

    /// Collection for a version; `None` selects unversioned resources.
    pub fn get(&self, version: Option<&str>) -> Option<&Resources> {
        self.versions
            .iter()
            .find(|(v, _)| v.as_deref() == version)
            .map(|(_, r)| r)
    }

    pub fn versions(&self) -> impl Iterator<Item = Option<&str>> {
        self.versions.iter().map(|(v, _)| v.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Option<&str>, &Resources)> {
        self.versions.iter().map(|(v, r)| (v.as_deref(), r))
    }

    /// Number of versions.
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Take one version's collection out, leaving the others.
    pub fn remove(&mut self, version: Option<&str>) -> Option<Resources> {
        let slot = self
            .versions
            .iter()
            .position(|(v, _)| v.as_deref() == version)?;
        Some(self.versions.remove(slot).1)
    }
}

impl IntoIterator for ResourcesByVersion {
    type Item = (Option<String>, Resources);
    type IntoIter = std::vec::IntoIter<(Option<String>, Resources)>;

    fn into_iter(self) -> Self::IntoIter {
        self.versions.into_iter()
    }
}
