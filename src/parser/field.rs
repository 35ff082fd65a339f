//! Field tokenizer for the positional grammar every tag handler shares.
//!
//! A tag's text (keyword removed) may carry three optional tokens in any
//! order:
//!
//! - `{...}` is the type (or the HTTP method on `@api`)
//! - `(...)` is the group (or the status code on `@apiError`)
//! - a bare word is the name (or a `/path` on `@api`); `[...]` counts as one
//!   word so optional names may carry `=default value`
//!
//! Free text starts after whichever matched token ends rightmost.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static RE_TYPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([^{}\n]*)\}").unwrap());

static RE_GROUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([^()\n]*)\)").unwrap());

static RE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]\n]*\]|[^\s{}()\[\]]+").unwrap());

// `[...]` at the start of a word; `{Object[]}` does not qualify.
static RE_OPTIONAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)(\[[^\]\n]*\])").unwrap());

static RE_PATH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:^|\s)(/\S*)").unwrap());

/// What the bare-word slot of a line looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameShape {
    /// First word that is not inside a `{}`/`()` token.
    Word,
    /// First whitespace-delimited word starting with `/`.
    Path,
}

/// One matched token: its inner value and where it ends in the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub value: &'a str,
    pub span: (usize, usize),
}

impl Token<'_> {
    fn range(&self) -> Range<usize> {
        self.span.0..self.span.1
    }
}

/// The tokens of one tag line plus its free-text remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fields<'a> {
    pub type_: Option<Token<'a>>,
    pub group: Option<Token<'a>>,
    pub name: Option<Token<'a>>,
    pub description: &'a str,
}

impl<'a> Fields<'a> {
    pub fn type_value(&self) -> Option<&'a str> {
        self.type_.map(|t| t.value)
    }

    pub fn group_value(&self) -> Option<&'a str> {
        self.group.map(|t| t.value)
    }

    pub fn name_value(&self) -> Option<&'a str> {
        self.name.map(|t| t.value)
    }
}

/// Tokenize the text of a tag line (keyword already removed).
pub fn tokenize(text: &str, shape: NameShape) -> Fields<'_> {
    // A bracketed name may carry `{}` or `()` in its default value
    let optional = match shape {
        NameShape::Word => RE_OPTIONAL
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.range()),
        NameShape::Path => None,
    };
    let type_ = delimited(&RE_TYPE, text, optional.as_ref());
    let group = delimited(&RE_GROUP, text, optional.as_ref());

    let taken: Vec<Range<usize>> = [type_, group].iter().flatten().map(Token::range).collect();
    let free = |start: usize, end: usize| !taken.iter().any(|r| start < r.end && r.start < end);

    let name = match shape {
        NameShape::Word => RE_WORD
            .find_iter(text)
            .find(|m| free(m.start(), m.end()))
            .map(|m| Token {
                value: m.as_str(),
                span: (m.start(), m.end()),
            }),
        NameShape::Path => RE_PATH
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .find(|m| free(m.start(), m.end()))
            .map(|m| Token {
                value: m.as_str(),
                span: (m.start(), m.end()),
            }),
    };

    let rest = [type_, group, name]
        .iter()
        .flatten()
        .map(|t| t.span.1)
        .max()
        .unwrap_or(0);

    Fields {
        type_,
        group,
        name,
        description: text[rest..].trim(),
    }
}

/// First `{...}`/`(...)` match lying outside `skip`.
fn delimited<'a>(
    re: &Regex,
    text: &'a str,
    skip: Option<&Range<usize>>,
) -> Option<Token<'a>> {
    re.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        if skip.is_some_and(|r| whole.start() < r.end && r.start < whole.end()) {
            return None;
        }
        Some(Token {
            value: caps.get(1)?.as_str().trim(),
            span: (whole.start(), whole.end()),
        })
    })
}

/// Collapse a possibly multi-line field description onto one line.
pub fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_three_tokens() {
        let f = tokenize("(Login) {String} username The user's name", NameShape::Word);
        assert_eq!(f.group_value(), Some("Login"));
        assert_eq!(f.type_value(), Some("String"));
        assert_eq!(f.name_value(), Some("username"));
        assert_eq!(f.description, "The user's name");
    }

    #[test]
    fn order_insensitive() {
        let f = tokenize("username {String} (Login) The name", NameShape::Word);
        assert_eq!(f.name_value(), Some("username"));
        assert_eq!(f.type_value(), Some("String"));
        assert_eq!(f.group_value(), Some("Login"));
        assert_eq!(f.description, "The name");
    }

    #[test]
    fn rightmost_token_starts_description() {
        // the `(...)` after the name is taken as the group
        let f = tokenize("{Number} id identifier (unique) of the row", NameShape::Word);
        assert_eq!(f.group_value(), Some("unique"));
        assert_eq!(f.description, "of the row");
    }

    #[test]
    fn bracketed_name_with_spaces() {
        let f = tokenize("{String} [sort=created at] Sort key", NameShape::Word);
        assert_eq!(f.name_value(), Some("[sort=created at]"));
        assert_eq!(f.description, "Sort key");
    }

    #[test]
    fn braces_inside_optional_default() {
        let f = tokenize("[filter={}] Filter object", NameShape::Word);
        assert_eq!(f.name_value(), Some("[filter={}]"));
        assert_eq!(f.type_, None);
        assert_eq!(f.description, "Filter object");
    }

    #[test]
    fn parens_inside_optional_default() {
        let f = tokenize("{String} [fields=(id,name)] Fields to return", NameShape::Word);
        assert_eq!(f.type_value(), Some("String"));
        assert_eq!(f.name_value(), Some("[fields=(id,name)]"));
        assert_eq!(f.group, None);
        assert_eq!(f.description, "Fields to return");
    }

    #[test]
    fn array_type_is_not_an_optional_name() {
        let f = tokenize("{Object[]} products List of products", NameShape::Word);
        assert_eq!(f.type_value(), Some("Object[]"));
        assert_eq!(f.name_value(), Some("products"));
        assert_eq!(f.description, "List of products");
    }

    #[test]
    fn missing_tokens_are_none() {
        let f = tokenize("", NameShape::Word);
        assert_eq!(f.name, None);
        assert_eq!(f.type_, None);
        assert_eq!(f.group, None);
        assert_eq!(f.description, "");

        let f = tokenize("{String}", NameShape::Word);
        assert_eq!(f.type_value(), Some("String"));
        assert_eq!(f.name, None);
    }

    #[test]
    fn words_inside_tokens_are_not_names() {
        let f = tokenize("{Object} (Body)", NameShape::Word);
        assert_eq!(f.name, None);
        assert_eq!(f.description, "");
    }

    #[test]
    fn path_shape() {
        let f = tokenize("{get} /product/:productId Get a product", NameShape::Path);
        assert_eq!(f.type_value(), Some("get"));
        assert_eq!(f.name_value(), Some("/product/:productId"));
        assert_eq!(f.description, "Get a product");
    }

    #[test]
    fn path_requires_leading_slash() {
        let f = tokenize("{get} product Get", NameShape::Path);
        assert_eq!(f.name, None);
        assert_eq!(f.description, "product Get");
    }

    #[test]
    fn single_line_joins_trimmed_lines() {
        assert_eq!(single_line("first\n   second \n\nthird"), "first second third");
    }
}
