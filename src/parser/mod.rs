//! Parser pipeline: definition pass, then resource pass.
//!
//! Every source is scanned for blocks twice: first for `@apiDefine`
//! blocks, which must all be known before any `@apiUse` is expanded, then
//! for `@api` blocks, which are assembled into resources.

pub mod block;
pub mod define;
pub mod field;
pub mod lines;
pub mod resource;

use crate::error::{ParseError, ParseWarning};
use crate::resources::ResourcesByVersion;
use crate::sources::Corpus;
use define::{Definition, Definitions};
use tracing::{debug, warn};

/// What to do when `@apiUse` cannot be expanded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReferencePolicy {
    /// Fail the block.
    #[default]
    Strict,
    /// Warn and treat the expansion as empty.
    Lenient,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub references: ReferencePolicy,
}

impl ParseOptions {
    pub fn lenient() -> Self {
        ParseOptions {
            references: ReferencePolicy::Lenient,
        }
    }
}

/// Result of the resource pass.
#[derive(Debug, Default)]
pub struct Extraction {
    pub resources: ResourcesByVersion,
    pub warnings: Vec<ParseWarning>,
}

/// Collect every `@apiDefine` block in the corpus.
///
/// A later definition with the same name replaces an earlier one.
pub fn parse_definitions(corpus: &Corpus) -> Definitions {
    let mut definitions = Definitions::new();
    for source in corpus {
        for body in block::blocks(&source.text) {
            let Some(definition) = Definition::parse(&body) else {
                continue;
            };
            let name = definition.name.clone();
            if definitions.insert(definition).is_some() {
                debug!(source = %source.id, name = %name, "redefining @apiDefine");
            }
        }
    }
    definitions
}

/// Assemble every `@api` block in the corpus into versioned resources.
///
/// The first block that fails aborts the pass with its location attached.
/// Same-key resources within a version: the later block wins.
pub fn parse_resources(
    corpus: &Corpus,
    definitions: &Definitions,
    options: &ParseOptions,
) -> Result<Extraction, ParseError> {
    let mut extraction = Extraction::default();

    for source in corpus {
        for (index, body) in block::blocks(&source.text).enumerate() {
            let number = index + 1;
            let mut kinds = Vec::new();
            let parsed = resource::parse_block(&body, definitions, options.references, &mut kinds)
                .map_err(|e| e.located(&source.id, number))?;

            for kind in kinds {
                let warning = ParseWarning {
                    source_id: source.id.clone(),
                    block: number,
                    kind,
                };
                warn!("{}", warning);
                extraction.warnings.push(warning);
            }

            match parsed {
                Some(resource) => {
                    extraction.resources.insert(resource);
                }
                None => debug!(source = %source.id, block = number, "not an @api block"),
            }
        }
    }

    Ok(extraction)
}
