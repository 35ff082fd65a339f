//! JSON renderer: the resource mapping, pretty-printed.
//!
//! Useful for custom rendering pipelines and tooling integration.

use crate::render::Renderer;
use crate::root::DocumentationRoot;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, root: &DocumentationRoot) -> String {
        // Value -> string cannot fail: all keys are strings
        let mut out = serde_json::to_string_pretty(&root.to_mapping()).unwrap_or_default();
        out.push('\n');
        out
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
