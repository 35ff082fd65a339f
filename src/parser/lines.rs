//! Line joining: fold continuation lines into the tag line they follow.

/// Marker that starts a tag line.
pub const TAG_MARKER: char = '@';

/// Split a block body into logical tag lines.
///
/// A line whose first character is `@` starts a new tag line; any other
/// line is appended to the current one after a `\n`, so multi-paragraph
/// text keeps its breaks. Text before the first tag line has no owner and
/// is dropped.
pub fn join_lines(body: &str) -> Vec<String> {
    let mut joined: Vec<String> = Vec::new();
    for line in body.split('\n') {
        if line.starts_with(TAG_MARKER) {
            joined.push(line.trim_end_matches('\r').to_string());
        } else if let Some(last) = joined.last_mut() {
            last.push('\n');
            last.push_str(line.trim_end_matches('\r'));
        }
    }
    joined
}

/// Split a tag line into its keyword (`@apiParam`) and the text after it.
///
/// The keyword ends at the first whitespace; the rest keeps its original
/// offsets minus the keyword and one separator.
pub fn split_tag(line: &str) -> (&str, &str) {
    match line.find(char::is_whitespace) {
        Some(pos) => {
            let sep = line[pos..].chars().next().map_or(1, char::len_utf8);
            (&line[..pos], &line[pos + sep..])
        }
        None => (line, ""),
    }
}
