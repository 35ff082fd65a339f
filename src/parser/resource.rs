//! Resource blocks: tag dispatch into a draft, then assembly.

use super::define::{Definitions, LineStream, Unresolved};
use super::field::{self, NameShape};
use super::lines::{join_lines, split_tag};
use super::ReferencePolicy;
use crate::error::{ParseError, WarningKind};
use crate::model::*;
use tracing::debug;

/// Status given to `@apiError` lines without a `(status)` group.
pub const DEFAULT_ERROR_STATUS: u16 = 400;

// -- Draft --------------------------------------------------------------------

#[derive(Debug)]
struct ParamDraft {
    name: String,
    group: Option<String>,
    type_: Option<String>,
    default: Option<String>,
    description: String,
    optional: bool,
    kind: ParamKind,
}

#[derive(Debug)]
struct FieldDraft {
    name: String,
    group: Option<String>,
    type_: Option<String>,
    description: String,
}

/// Mutable accumulator for one `@api` block.
#[derive(Debug, Default)]
struct ResourceDraft {
    version: Option<String>,
    method: Option<String>,
    path: Option<String>,
    title: Option<String>,
    group: Option<String>,
    permissions: Vec<String>,
    deprecated: bool,
    deprecated_description: Option<String>,
    description: Option<String>,
    params: Vec<ParamDraft>,
    success_responses: Vec<FieldDraft>,
    error_responses: Vec<FieldDraft>,
}

// -- Public API ---------------------------------------------------------------

/// Parse one block body into a resource.
///
/// Returns `Ok(None)` when the block is not an `@api` block. Recovered
/// `@apiUse` failures (lenient policy) are appended to `warnings`.
pub fn parse_block(
    body: &str,
    definitions: &Definitions,
    policy: ReferencePolicy,
    warnings: &mut Vec<WarningKind>,
) -> Result<Option<Resource>, ParseError> {
    let lines = join_lines(body);
    match lines.first() {
        Some(first) if split_tag(first).0 == "@api" => {}
        _ => return Ok(None),
    }

    let mut draft = ResourceDraft::default();
    let mut stream = LineStream::new(&lines, definitions);

    while let Some(line) = stream.next() {
        let (keyword, rest) = split_tag(line);
        match keyword {
            "@api" => draft.api(rest)?,
            "@apiVersion" => draft.version = non_empty(rest.trim()),
            "@apiGroup" => draft.group = non_empty(rest.trim()),
            "@apiDeprecated" => draft.deprecate(rest),
            "@apiPermission" => draft.permit(rest),
            "@apiDescription" => draft.describe(rest),
            "@apiParam" => draft.param(keyword, rest, ParamKind::Form)?,
            "@apiQueryParam" => draft.param(keyword, rest, ParamKind::Query)?,
            "@apiUrlParam" => draft.param(keyword, rest, ParamKind::Url)?,
            "@apiHeadParam" => draft.param(keyword, rest, ParamKind::Header)?,
            "@apiSuccess" => {
                let success = field_draft(keyword, rest)?;
                draft.success_responses.push(success);
            }
            "@apiError" => {
                let mut error = field_draft(keyword, rest)?;
                error
                    .group
                    .get_or_insert_with(|| DEFAULT_ERROR_STATUS.to_string());
                draft.error_responses.push(error);
            }
            "@apiUse" => {
                let Some(name) = field::tokenize(rest, NameShape::Word).name_value() else {
                    match policy {
                        ReferencePolicy::Strict => {
                            return Err(ParseError::missing(keyword, "definition name"))
                        }
                        ReferencePolicy::Lenient => {
                            warnings.push(WarningKind::MissingReferenceName)
                        }
                    }
                    continue;
                };
                if let Err(reason) = stream.expand(name) {
                    let name = name.to_string();
                    match policy {
                        ReferencePolicy::Strict => {
                            return Err(match reason {
                                Unresolved::Undefined => ParseError::UndefinedReference { name },
                                Unresolved::Recursive => ParseError::RecursiveReference { name },
                            })
                        }
                        ReferencePolicy::Lenient => warnings.push(match reason {
                            Unresolved::Undefined => WarningKind::UndefinedReference(name),
                            Unresolved::Recursive => WarningKind::RecursiveReference(name),
                        }),
                    }
                }
            }
            other => debug!(tag = other, "ignoring unknown tag"),
        }
    }

    draft.finish().map(Some)
}

// -- Tag handlers -------------------------------------------------------------

impl ResourceDraft {
    /// `@api {method} /path Title`
    fn api(&mut self, rest: &str) -> Result<(), ParseError> {
        let fields = field::tokenize(rest, NameShape::Path);
        let method = fields
            .type_value()
            .filter(|m| !m.is_empty())
            .ok_or_else(|| ParseError::missing("@api", "method"))?;
        let path = fields
            .name_value()
            .ok_or_else(|| ParseError::missing("@api", "path"))?;

        self.method = Some(method.to_lowercase());
        self.path = Some(path.to_string());
        self.title = Some(field::single_line(fields.description));
        Ok(())
    }

    /// `@apiDeprecated [text]`
    fn deprecate(&mut self, rest: &str) {
        self.deprecated = true;
        self.deprecated_description = non_empty(&field::single_line(rest));
    }

    /// `@apiPermission a, b, c`
    fn permit(&mut self, rest: &str) {
        self.permissions.extend(
            rest.split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from),
        );
    }

    /// `@apiDescription text`, accumulated across repeated tags.
    fn describe(&mut self, rest: &str) {
        let text = paragraphs(rest);
        if text.is_empty() {
            return;
        }
        self.description = Some(match self.description.take() {
            Some(existing) => format!("{}\n{}", existing, text),
            None => text,
        });
    }

    /// `@apiParam (group) {type} [name=default] description` and its kin.
    fn param(&mut self, tag: &str, rest: &str, kind: ParamKind) -> Result<(), ParseError> {
        let fields = field::tokenize(rest, NameShape::Word);
        let raw = fields
            .name_value()
            .ok_or_else(|| ParseError::missing(tag, "name"))?;

        let (raw, optional) = match raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            Some(inner) => (inner.trim(), true),
            None => (raw, false),
        };
        let (name, default) = match raw.split_once('=') {
            Some((name, default)) => (name.trim(), non_empty(default.trim())),
            None => (raw, None),
        };
        if name.is_empty() {
            return Err(ParseError::missing(tag, "name"));
        }

        self.params.push(ParamDraft {
            name: name.to_string(),
            group: fields.group_value().map(String::from),
            type_: type_token(&fields),
            default,
            description: field::single_line(fields.description),
            optional,
            kind,
        });
        Ok(())
    }

    // -- Assembly -------------------------------------------------------------

    /// Convert the finished draft into its canonical resource.
    fn finish(self) -> Result<Resource, ParseError> {
        let method = self
            .method
            .ok_or_else(|| ParseError::missing("@api", "method"))?;
        let path = self
            .path
            .ok_or_else(|| ParseError::missing("@api", "path"))?;

        let params = self
            .params
            .into_iter()
            .map(|p| {
                Param::new(
                    p.kind,
                    ParamFields {
                        name: p.name,
                        group: p.group,
                        type_: p.type_,
                        default: p.default,
                        description: p.description,
                        required: !p.optional,
                    },
                )
            })
            .collect();

        let mut responses = vec![Response {
            status: 200,
            description: "ok".to_string(),
            body: self
                .success_responses
                .into_iter()
                .map(|s| BodyField {
                    name: s.name,
                    type_: s.type_,
                    group: s.group,
                    description: Some(s.description),
                })
                .collect(),
        }];
        responses.extend(self.error_responses.into_iter().map(|e| Response {
            status: error_status(e.group.as_deref()),
            description: e.description,
            body: vec![BodyField {
                name: e.name,
                type_: e.type_,
                group: None,
                description: None,
            }],
        }));

        Ok(Resource {
            path,
            method,
            version: self.version,
            tags: self.group.into_iter().collect(),
            display_name: self.title.unwrap_or_default(),
            description: self.description,
            deprecated: self.deprecated,
            deprecated_description: self.deprecated_description,
            security: Security {
                roles: self.permissions,
            },
            params,
            responses,
        })
    }
}

// -- Helpers ------------------------------------------------------------------

/// `@apiSuccess` / `@apiError` share one shape.
fn field_draft(tag: &str, rest: &str) -> Result<FieldDraft, ParseError> {
    let fields = field::tokenize(rest, NameShape::Word);
    let name = fields
        .name_value()
        .ok_or_else(|| ParseError::missing(tag, "name"))?;
    Ok(FieldDraft {
        name: name.to_string(),
        group: fields.group_value().map(String::from),
        type_: type_token(&fields),
        description: field::single_line(fields.description),
    })
}

/// An empty `{}` is treated as no type at all.
fn type_token(fields: &field::Fields<'_>) -> Option<String> {
    fields
        .type_value()
        .filter(|t| !t.is_empty())
        .map(String::from)
}

/// Status from an error's group token; anything unparsable falls back.
fn error_status(group: Option<&str>) -> u16 {
    match group.map(str::parse::<u16>) {
        Some(Ok(status)) => status,
        Some(Err(_)) => {
            debug!(group, "non-numeric error group, using {}", DEFAULT_ERROR_STATUS);
            DEFAULT_ERROR_STATUS
        }
        None => DEFAULT_ERROR_STATUS,
    }
}

/// Join runs of non-blank lines with spaces; blank lines separate
/// paragraphs, which are joined with `\n`.
fn paragraphs(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                out.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        out.push(current.join(" "));
    }
    out.join("\n")
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}
