//! Renderer module with trait-based format dispatch.

pub mod json;
pub mod markdown;

use crate::root::DocumentationRoot;
use anyhow::{anyhow, Result};

/// Trait for rendering one version's documentation into an output format.
pub trait Renderer {
    fn render(&self, root: &DocumentationRoot) -> String;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use markdown or json", format)),
    }
}
