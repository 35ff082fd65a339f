//! GitHub-flavored markdown anchors for the resource index.

/// Index entry linking `label` to the heading `heading`.
pub fn render_toc_item(label: &str, heading: &str) -> String {
    format!("* [{}](#{})", label, github_slug(heading))
}

/// GitHub heading anchor slug.
///
/// - lowercase
/// - keep alphanumerics, spaces, hyphens; drop everything else
/// - spaces become hyphens
pub fn github_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' {
            slug.push(c);
        }
    }
    slug.replace(' ', "-")
}
