//! Canonical resource model, as renderers consume.
//!
//! Values here are built once by the parser and never mutated afterwards.
//! [`Resource::to_mapping`] is the only representation handed downstream.

use serde::{Serialize, Serializer};
use serde_json::{json, Value};
use std::fmt;

/// Where a parameter travels in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Form,
    Query,
    Header,
    Url,
}

impl ParamKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ParamKind::Form => "form",
            ParamKind::Query => "query",
            ParamKind::Header => "header",
            ParamKind::Url => "url",
        }
    }

    pub const ALL: [ParamKind; 4] = [
        ParamKind::Url,
        ParamKind::Header,
        ParamKind::Query,
        ParamKind::Form,
    ];
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields every parameter kind shares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamFields {
    pub name: String,
    pub group: Option<String>,
    pub type_: Option<String>,
    pub default: Option<String>,
    pub description: String,
    pub required: bool,
}

/// A documented request parameter, one variant per [`ParamKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Form(ParamFields),
    Query(ParamFields),
    Header(ParamFields),
    Url(ParamFields),
}

impl Param {
    pub fn new(kind: ParamKind, fields: ParamFields) -> Param {
        match kind {
            ParamKind::Form => Param::Form(fields),
            ParamKind::Query => Param::Query(fields),
            ParamKind::Header => Param::Header(fields),
            ParamKind::Url => Param::Url(fields),
        }
    }

    pub fn kind(&self) -> ParamKind {
        match self {
            Param::Form(_) => ParamKind::Form,
            Param::Query(_) => ParamKind::Query,
            Param::Header(_) => ParamKind::Header,
            Param::Url(_) => ParamKind::Url,
        }
    }

    pub fn fields(&self) -> &ParamFields {
        match self {
            Param::Form(f) | Param::Query(f) | Param::Header(f) | Param::Url(f) => f,
        }
    }

    pub fn name(&self) -> &str {
        &self.fields().name
    }

    pub fn required(&self) -> bool {
        self.fields().required
    }

    pub fn to_mapping(&self) -> Value {
        let f = self.fields();
        json!({
            "name": f.name,
            "type": f.type_,
            "default": f.default,
            "description": f.description,
            "required": f.required,
            "kind": self.kind().as_str(),
            "group": f.group,
        })
    }
}

/// One record of a response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyField {
    pub name: String,
    pub type_: Option<String>,
    /// Only success fields carry a group and description
    pub group: Option<String>,
    pub description: Option<String>,
}

impl BodyField {
    pub fn to_mapping(&self) -> Value {
        let mut map = serde_json::Map::new();
        map.insert("name".into(), json!(self.name));
        map.insert("type".into(), json!(self.type_));
        if let Some(ref group) = self.group {
            map.insert("group".into(), json!(group));
        }
        if let Some(ref description) = self.description {
            map.insert("description".into(), json!(description));
        }
        Value::Object(map)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub description: String,
    pub body: Vec<BodyField>,
}

impl Response {
    pub fn to_mapping(&self) -> Value {
        json!({
            "status": self.status,
            "description": self.description,
            "body": self.body.iter().map(BodyField::to_mapping).collect::<Vec<_>>(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Security {
    pub roles: Vec<String>,
}

/// A fully assembled API resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub path: String,
    /// Lower-case HTTP method
    pub method: String,
    pub version: Option<String>,
    /// `[group]`, or empty when the block declared no `@apiGroup`
    pub tags: Vec<String>,
    pub display_name: String,
    pub description: Option<String>,
    pub deprecated: bool,
    pub deprecated_description: Option<String>,
    pub security: Security,
    pub params: Vec<Param>,
    /// The status-200 response first, then one per `@apiError`
    pub responses: Vec<Response>,
}

impl Resource {
    /// Key of this resource within its version: `"{path}-{method}"`.
    pub fn key(&self) -> String {
        resource_key(&self.path, &self.method)
    }

    pub fn params_of(&self, kind: ParamKind) -> impl Iterator<Item = &Param> {
        self.params.iter().filter(move |p| p.kind() == kind)
    }

    /// Nested key/value form consumed by renderers.
    pub fn to_mapping(&self) -> Value {
        json!({
            "path": self.path,
            "method": self.method,
            "tags": self.tags,
            "display_name": self.display_name,
            "description": self.description,
            "security": { "roles": self.security.roles },
            "params": self.params.iter().map(Param::to_mapping).collect::<Vec<_>>(),
            "responses": self.responses.iter().map(Response::to_mapping).collect::<Vec<_>>(),
            "version": self.version,
            "deprecated": self.deprecated,
            "deprecated_description": self.deprecated_description,
        })
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_mapping().serialize(serializer)
    }
}

/// Compose the lookup key for a path and lower-case method.
pub fn resource_key(path: &str, method: &str) -> String {
    format!("{}-{}", path, method)
}
