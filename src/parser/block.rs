//! Block extraction: annotation bodies between triple-quote delimiters.

use regex::Regex;
use std::sync::LazyLock;

// `"""` pairs with `"""`, `'''` with `'''`; the regex crate has no
// backreferences so each delimiter gets its own alternative.
static RE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)"""(.*?)"""|'''(.*?)'''"#).unwrap());

/// Lazy iterator over the dedented, trimmed bodies of every block in a text.
///
/// Clones are independent cursors; [`blocks`] rescans from the start.
#[derive(Debug, Clone)]
pub struct Blocks<'a> {
    text: &'a str,
    pos: usize,
}

/// Scan `text` for annotation blocks.
pub fn blocks(text: &str) -> Blocks<'_> {
    Blocks { text, pos: 0 }
}

impl Iterator for Blocks<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let caps = RE_BLOCK.captures_at(self.text, self.pos)?;
        let whole = caps.get(0)?;
        self.pos = whole.end();
        let body = caps.get(1).or_else(|| caps.get(2))?.as_str();
        Some(dedent(body).trim().to_string())
    }
}

/// Remove the longest common leading whitespace from all non-blank lines.
///
/// Whitespace-only lines become empty and do not take part in the prefix.
pub fn dedent(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();

    let prefix = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| &l[..l.len() - l.trim_start().len()])
        .reduce(common_prefix)
        .unwrap_or("");

    lines
        .iter()
        .map(|l| {
            if l.trim().is_empty() {
                ""
            } else {
                l.strip_prefix(prefix).unwrap_or(*l)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .char_indices()
        .zip(b.chars())
        .take_while(|((_, x), y)| x == y)
        .last()
        .map(|((i, c), _)| i + c.len_utf8())
        .unwrap_or(0);
    &a[..len]
}
