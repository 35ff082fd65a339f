//! Documentation root: one version's resources plus API-level metadata.

use crate::model::Resource;
use crate::resources::Resources;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};
use url::Url;

pub struct DocumentationRoot {
    pub title: String,
    /// Absolute (`https://host/api`) or path-only (`/api`) base URI
    pub base_uri: Option<String>,
    pub version: Option<String>,
    pub resources: Resources,
}

impl DocumentationRoot {
    pub fn new(title: impl Into<String>, resources: Resources) -> Self {
        DocumentationRoot {
            title: title.into(),
            base_uri: None,
            version: None,
            resources,
        }
    }

    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    /// Path component of the base URI, empty when there is none.
    pub fn base_uri_path(&self) -> String {
        let Some(ref base_uri) = self.base_uri else {
            return String::new();
        };
        match Url::parse(base_uri) {
            Ok(url) if url.path() != "/" => url.path().to_string(),
            Ok(_) => String::new(),
            Err(_) if base_uri.starts_with('/') => base_uri.to_string(),
            Err(_) => String::new(),
        }
    }

    /// Find the resource an incoming request path refers to, retrying once
    /// with the base URI's path stripped.
    pub fn find(&self, path: &str, method: &str) -> Option<&Resource> {
        self.resources.find_under(path, method, &self.base_uri_path())
    }

    pub fn to_mapping(&self) -> Value {
        json!({
            "title": self.title,
            "base_uri": self.base_uri,
            "version": self.version,
            "resources": self.resources.iter().map(Resource::to_mapping).collect::<Vec<_>>(),
        })
    }
}

impl Serialize for DocumentationRoot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_mapping().serialize(serializer)
    }
}
