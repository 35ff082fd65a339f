//! GitHub-flavored markdown renderer.
//!
//! Layout: title, an index of resources, then one section per resource
//! with its parameters grouped by kind and its responses.

use crate::model::*;
use crate::render::Renderer;
use crate::root::DocumentationRoot;
use crate::toc;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, root: &DocumentationRoot) -> String {
        let mut output = String::new();

        output.push_str(&format!("# {}\n\n", root.title));

        let mut meta: Vec<String> = Vec::new();
        if let Some(ref version) = root.version {
            meta.push(format!("Version: `{}`", version));
        }
        if let Some(ref base_uri) = root.base_uri {
            meta.push(format!("Base URI: `{}`", base_uri));
        }
        if !meta.is_empty() {
            output.push_str(&meta.join("  \n"));
            output.push_str("\n\n");
        }

        if !root.resources.is_empty() {
            output.push_str("## Index\n\n");
            for resource in &root.resources {
                let label = if resource.display_name.is_empty() {
                    heading(resource)
                } else {
                    resource.display_name.clone()
                };
                output.push_str(&toc::render_toc_item(&label, &heading(resource)));
                output.push('\n');
            }
            output.push('\n');
        }

        for resource in &root.resources {
            output.push_str(&render_resource(resource));
            output.push('\n');
        }

        output
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

fn heading(resource: &Resource) -> String {
    format!("{} {}", resource.method.to_uppercase(), resource.path)
}

/// Render a single resource section.
fn render_resource(resource: &Resource) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("### {}\n", heading(resource)));

    if !resource.display_name.is_empty() {
        lines.push(format!("**{}**\n", resource.display_name));
    }

    if resource.deprecated {
        match resource.deprecated_description {
            Some(ref text) => lines.push(format!("> **Deprecated:** {}\n", text)),
            None => lines.push("> **Deprecated**\n".to_string()),
        }
    }

    // Badges: tags and required roles
    let mut badges: Vec<String> = resource.tags.iter().map(|t| format!("`{}`", t)).collect();
    badges.extend(resource.security.roles.iter().map(|r| format!("*`{}`*", r)));
    if !badges.is_empty() {
        lines.push(format!("> {}", badges.join(" ")));
        lines.push(String::new());
    }

    if let Some(ref description) = resource.description {
        // paragraphs are separated by single newlines in the model
        lines.push(description.replace('\n', "\n\n"));
        lines.push(String::new());
    }

    for kind in ParamKind::ALL {
        let params: Vec<&Param> = resource.params_of(kind).collect();
        if params.is_empty() {
            continue;
        }
        lines.push(format!("#### {}\n", param_section_title(kind)));
        lines.push("| Name | Type | Required | Default | Description |".to_string());
        lines.push("|------|------|----------|---------|-------------|".to_string());
        for param in params {
            let f = param.fields();
            lines.push(format!(
                "| `{}` | {} | {} | {} | {} |",
                f.name,
                f.type_.as_deref().map(code).unwrap_or_default(),
                if f.required { "yes" } else { "no" },
                f.default.as_deref().map(code).unwrap_or_default(),
                table_cell(&f.description),
            ));
        }
        lines.push(String::new());
    }

    if !resource.responses.is_empty() {
        lines.push("#### Responses\n".to_string());
        for response in &resource.responses {
            lines.push(render_response(response));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn param_section_title(kind: ParamKind) -> &'static str {
    match kind {
        ParamKind::Url => "URL parameters",
        ParamKind::Header => "Headers",
        ParamKind::Query => "Query parameters",
        ParamKind::Form => "Form parameters",
    }
}

/// `**404**: description` followed by the body fields as a nested list.
fn render_response(response: &Response) -> String {
    let mut out = if response.description.is_empty() {
        format!("* **{}**", response.status)
    } else {
        format!("* **{}**: {}", response.status, response.description)
    };
    for field in &response.body {
        out.push_str(&format!("\n  * `{}`", field.name));
        if let Some(ref type_) = field.type_ {
            out.push_str(&format!(" ({})", type_));
        }
        if let Some(ref description) = field.description {
            if !description.is_empty() {
                out.push_str(&format!(": {}", description));
            }
        }
    }
    out
}

fn code(text: &str) -> String {
    format!("`{}`", text)
}

fn table_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
