//! restdoc: generate REST API documentation from `@api` annotation blocks.
//!
//! Two modes:
//!
//! - **stdin mode**: `restdoc < views.py` prints every version to stdout
//! - **file mode**: `restdoc -o docs app/ lib/**/*.py` writes one file per
//!   API version into the output directory

use anyhow::{bail, Context, Result};
use clap::Parser;
use restdoc::render::{self, Renderer};
use restdoc::{
    parse_definitions, parse_resources, Corpus, DocumentationRoot, ParseOptions, ReferencePolicy,
    Resources,
};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// File name used for resources that declare no `@apiVersion`.
const UNVERSIONED: &str = "unversioned";

#[derive(Parser)]
#[command(
    name = "restdoc",
    about = "Generate REST API documentation from @api annotation blocks"
)]
struct Cli {
    /// Input files, directories or glob patterns. If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory; one file per API version. Prints to stdout if omitted.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: markdown (default), json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// Documentation title
    #[arg(long, default_value = "API Documentation")]
    title: String,

    /// Base URI the API is mounted under, e.g. https://example.com/api
    #[arg(long)]
    base_uri: Option<String>,

    /// Warn on unknown @apiUse references instead of failing
    #[arg(long)]
    lenient: bool,

    /// Only render this API version
    #[arg(long = "api-version")]
    api_version: Option<String>,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let corpus = if cli.files.is_empty() {
        read_stdin()?
    } else {
        Corpus::from_patterns(&cli.files)?
    };

    let options = ParseOptions {
        references: if cli.lenient {
            ReferencePolicy::Lenient
        } else {
            ReferencePolicy::Strict
        },
    };

    // Every definition must be known before the first @apiUse is expanded
    let definitions = parse_definitions(&corpus);
    let extraction = parse_resources(&corpus, &definitions, &options)?;

    let renderer = render::create_renderer(&cli.format)?;

    let mut roots: Vec<DocumentationRoot> = Vec::new();
    for (version, resources) in extraction.resources {
        if cli.api_version.is_some() && cli.api_version != version {
            continue;
        }
        roots.push(documentation_root(&cli, version, resources));
    }

    if let Some(ref wanted) = cli.api_version {
        if roots.is_empty() {
            bail!("no resources documented for version {}", wanted);
        }
    }

    match cli.output {
        Some(ref dir) => write_files(dir, renderer.as_ref(), &roots),
        None => {
            for root in &roots {
                print!("{}", renderer.render(root));
            }
            Ok(())
        }
    }
}

/// Log to stderr; `RUST_LOG` overrides the default level.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn read_stdin() -> Result<Corpus> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;
    Ok(Corpus::new().add("<stdin>", input))
}

fn documentation_root(cli: &Cli, version: Option<String>, resources: Resources) -> DocumentationRoot {
    let root = DocumentationRoot::new(cli.title.clone(), resources).with_version(version);
    match cli.base_uri {
        Some(ref base_uri) => root.with_base_uri(base_uri.clone()),
        None => root,
    }
}

fn write_files(dir: &Path, renderer: &dyn Renderer, roots: &[DocumentationRoot]) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;

    let mut claimed: HashMap<String, Option<&str>> = HashMap::new();
    for root in roots {
        let version = root.version.as_deref();
        let name = output_name(version);
        if let Some(other) = claimed.insert(name.clone(), version) {
            bail!(
                "versions {:?} and {:?} would both be written to {}.{}",
                other.unwrap_or(UNVERSIONED),
                version.unwrap_or(UNVERSIONED),
                name,
                renderer.file_extension()
            );
        }
        let out_path = dir.join(format!("{}.{}", name, renderer.file_extension()));
        fs::write(&out_path, renderer.render(root))
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }
    Ok(())
}

/// File stem for a version: `1.0.0` stays, `beta/2` becomes `beta_2`.
fn output_name(version: Option<&str>) -> String {
    match version {
        Some(v) if !v.is_empty() => v
            .chars()
            .map(|c| if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
            .collect(),
        _ => UNVERSIONED.to_string(),
    }
}
