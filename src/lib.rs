//! restdoc: REST API documentation from `@api` annotation blocks.
//!
//! Annotations live in triple-quoted blocks anywhere in source text:
//!
//! ```text
//! """
//! @api {get} /product Get all products
//! @apiVersion 1.0.0
//! @apiGroup Product
//! @apiUse Paging
//! @apiQueryParam [sort] sort field
//! """
//! ```
//!
//! Parsing runs in two passes over the whole corpus:
//!
//! 1. [`parse_definitions`] collects every `@apiDefine` block into a
//!    [`Definitions`] table.
//! 2. [`parse_resources`] assembles every `@api` block into a [`Resource`],
//!    expanding `@apiUse` from the finished table, and files it under its
//!    version in [`ResourcesByVersion`].
//!
//! ```
//! use restdoc::{parse_definitions, parse_resources, Corpus, ParseOptions};
//!
//! let corpus = Corpus::new().add(
//!     "views.py",
//!     "\"\"\"\n@api {get} /product Get all products\n@apiVersion 1.0.0\n\"\"\"",
//! );
//! let definitions = parse_definitions(&corpus);
//! let extraction = parse_resources(&corpus, &definitions, &ParseOptions::default()).unwrap();
//!
//! let v1 = extraction.resources.get(Some("1.0.0")).unwrap();
//! assert_eq!(v1.find("/product", "get").unwrap().display_name, "Get all products");
//! ```

pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod resources;
pub mod root;
pub mod sources;
mod toc;

pub use error::{ParseError, ParseWarning, WarningKind};
pub use model::{BodyField, Param, ParamFields, ParamKind, Resource, Response, Security};
pub use parser::define::{Definition, Definitions};
pub use parser::{parse_definitions, parse_resources, Extraction, ParseOptions, ReferencePolicy};
pub use resources::{Resources, ResourcesByVersion};
pub use root::DocumentationRoot;
pub use sources::{Corpus, Source};
