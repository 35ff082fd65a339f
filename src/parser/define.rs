//! `@apiDefine` blocks and `@apiUse` expansion.

use super::field::{self, NameShape};
use super::lines::{join_lines, split_tag};
use std::collections::HashMap;

/// A named, reusable run of tag lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub name: String,
    /// Text after the name on the `@apiDefine` line
    pub title: Option<String>,
    /// Logical tag lines spliced in by `@apiUse`
    pub content: Vec<String>,
}

impl Definition {
    /// Parse a block body that starts with `@apiDefine <name>`.
    ///
    /// Returns `None` for any other block, or when the name is missing.
    pub fn parse(body: &str) -> Option<Definition> {
        let mut lines = join_lines(body).into_iter();
        let head = lines.next()?;
        let (keyword, rest) = split_tag(&head);
        if keyword != "@apiDefine" {
            return None;
        }
        let fields = field::tokenize(rest, NameShape::Word);
        let name = fields.name_value()?.to_string();
        let title = field::single_line(fields.description);
        Some(Definition {
            name,
            title: (!title.is_empty()).then_some(title),
            content: lines.collect(),
        })
    }
}

/// Name to definition table built by the definition pass.
///
/// Complete before any resource is parsed and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Definitions {
    table: HashMap<String, Definition>,
}

impl Definitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition, returning the one it replaced.
    pub fn insert(&mut self, definition: Definition) -> Option<Definition> {
        self.table.insert(definition.name.clone(), definition)
    }

    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.table.get(name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.table.values()
    }
}

/// Why an `@apiUse` could not be expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unresolved {
    Undefined,
    Recursive,
}

struct Frame<'a> {
    name: Option<&'a str>,
    lines: &'a [String],
    next: usize,
}

/// A tag-line stream that splices definitions in at their `@apiUse` point.
///
/// After [`LineStream::expand`], the definition's lines come next, then
/// the stream resumes right after the line that referenced it.
pub struct LineStream<'a> {
    definitions: &'a Definitions,
    stack: Vec<Frame<'a>>,
}

impl<'a> LineStream<'a> {
    pub fn new(lines: &'a [String], definitions: &'a Definitions) -> Self {
        LineStream {
            definitions,
            stack: vec![Frame {
                name: None,
                lines,
                next: 0,
            }],
        }
    }

    /// Splice the named definition in before the remaining lines.
    pub fn expand(&mut self, name: &str) -> Result<(), Unresolved> {
        if self.stack.iter().any(|f| f.name == Some(name)) {
            return Err(Unresolved::Recursive);
        }
        let definitions = self.definitions;
        let definition = definitions.get(name).ok_or(Unresolved::Undefined)?;
        self.stack.push(Frame {
            name: Some(definition.name.as_str()),
            lines: &definition.content,
            next: 0,
        });
        Ok(())
    }
}

impl<'a> Iterator for LineStream<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            let frame = self.stack.last_mut()?;
            let lines = frame.lines;
            match lines.get(frame.next) {
                Some(line) => {
                    frame.next += 1;
                    return Some(line.as_str());
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
