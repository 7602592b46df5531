//! Repo-local architectural lint for the gym-buddy hexagon.
//!
//! The backend keeps business rules in `domain` (entities, ports, services),
//! HTTP concerns in `inbound`, and storage in `outbound`. This crate parses
//! every source file under those directories and rejects imports that cross
//! the boundary the wrong way:
//!
//! - `domain` may not reach into adapters or web/storage/OpenAPI crates
//! - `inbound` may not reach into `outbound` or the storage crates
//! - `outbound` may not reach into `inbound` or the web crates
//!
//! Run it with `cargo run -p architecture-lint` from the workspace root.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::Visit;

/// Library name of the backend crate, as seen from its integration tests.
const BACKEND_CRATE: &str = "gym_buddy";

const WEB_CRATES: &[&str] = &["actix_http", "actix_web", "awc"];
const STORAGE_CRATES: &[&str] = &["bb8", "diesel", "diesel_async", "diesel_migrations"];
const DOC_CRATES: &[&str] = &["utoipa", "utoipa_swagger_ui"];

/// A single boundary violation discovered by the linter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `backend/src`.
    pub file: PathBuf,
    /// Human-readable description of the violated rule.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Failure modes returned by the architecture lint.
#[derive(Debug)]
pub enum ArchitectureLintError {
    /// Filesystem traversal or reading failed.
    Io(io::Error),
    /// A file could not be parsed or placed in a layer.
    Parse {
        /// Offending file, relative to `backend/src`.
        file: PathBuf,
        /// Parser or path diagnostic.
        message: String,
    },
    /// One or more boundary violations were found.
    Violations(Vec<Violation>),
}

impl fmt::Display for ArchitectureLintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error while linting architecture: {err}"),
            Self::Parse { file, message } => {
                write!(f, "cannot lint {}: {message}", file.display())
            }
            Self::Violations(violations) => {
                writeln!(f, "Architecture boundary violations:")?;
                for violation in violations {
                    writeln!(f, "- {violation}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ArchitectureLintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ArchitectureLintError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// A Rust source file to be linted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `backend/src`.
    pub file: PathBuf,
    /// Raw file contents.
    pub contents: String,
}

/// Lint the backend crate sources on disk.
///
/// `backend_dir` must be the `backend/` directory at the repository root.
///
/// # Errors
/// Returns [`ArchitectureLintError::Violations`] when any import crosses a
/// layer boundary, or an I/O / parse error when sources cannot be read.
pub fn lint_backend_sources(backend_dir: &Path) -> Result<(), ArchitectureLintError> {
    let src_dir = backend_dir.join("src");
    let mut sources = Vec::new();
    for layer in Layer::ALL {
        let dir = src_dir.join(layer.dir_name());
        if dir.is_dir() {
            collect_sources(&src_dir, &dir, &mut sources)?;
        }
    }
    lint_sources(&sources)
}

/// Lint in-memory sources.
///
/// # Errors
/// See [`lint_backend_sources`].
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();
    for source in sources {
        let layer = Layer::of(&source.file).ok_or_else(|| ArchitectureLintError::Parse {
            file: source.file.clone(),
            message: "file is not under domain/, inbound/, or outbound/".to_owned(),
        })?;
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;
        violations.extend(check_file(&source.file, layer, &parsed));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Domain,
    Inbound,
    Outbound,
}

impl Layer {
    const ALL: [Self; 3] = [Self::Domain, Self::Inbound, Self::Outbound];

    const fn dir_name(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    fn of(relative_path: &Path) -> Option<Self> {
        let first = relative_path.components().next()?.as_os_str().to_str()?;
        Self::ALL
            .into_iter()
            .find(|layer| layer.dir_name() == first)
    }

    fn forbids_module(self, root: &str) -> bool {
        let forbidden: &[&str] = match self {
            Self::Domain => &["inbound", "outbound"],
            Self::Inbound => &["outbound"],
            Self::Outbound => &["inbound"],
        };
        forbidden.contains(&root)
    }

    fn forbids_crate(self, root: &str) -> bool {
        let groups: &[&[&str]] = match self {
            Self::Domain => &[WEB_CRATES, STORAGE_CRATES, DOC_CRATES],
            Self::Inbound => &[STORAGE_CRATES],
            Self::Outbound => &[WEB_CRATES],
        };
        groups.iter().any(|group| group.contains(&root))
    }
}

fn check_file(file: &Path, layer: Layer, parsed: &syn::File) -> Vec<Violation> {
    let mut collector = PathCollector::default();
    collector.visit_file(parsed);

    // A BTreeSet keeps each message once and in a stable order.
    let mut messages = std::collections::BTreeSet::new();
    for segments in &collector.paths {
        match classify(segments) {
            Some(Target::Module(root)) if layer.forbids_module(root) => {
                messages.insert(format!(
                    "{} module must not depend on crate::{root}",
                    layer.dir_name()
                ));
            }
            Some(Target::Crate(root)) if layer.forbids_crate(root) => {
                messages.insert(format!(
                    "{} module must not depend on external crate `{root}`",
                    layer.dir_name()
                ));
            }
            _ => {}
        }
    }

    messages
        .into_iter()
        .map(|message| Violation {
            file: file.to_path_buf(),
            message,
        })
        .collect()
}

/// What the first meaningful segment of a path refers to.
enum Target<'a> {
    Module(&'a str),
    Crate(&'a str),
}

fn classify(segments: &[String]) -> Option<Target<'_>> {
    let first = segments.first()?.as_str();
    if Layer::ALL.iter().any(|layer| layer.dir_name() == first) {
        return Some(Target::Module(first));
    }
    match first {
        "crate" | "self" | "super" => segments
            .iter()
            .map(String::as_str)
            .find(|segment| !matches!(*segment, "crate" | "self" | "super"))
            .map(Target::Module),
        BACKEND_CRATE => segments
            .get(1)
            .map(|segment| Target::Module(segment.as_str())),
        other => Some(Target::Crate(other)),
    }
}

#[derive(Default)]
struct PathCollector {
    paths: Vec<Vec<String>>,
}

impl PathCollector {
    fn record_use_tree(&mut self, tree: &syn::UseTree, mut prefix: Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.record_use_tree(&path.tree, prefix);
            }
            syn::UseTree::Name(name) => {
                prefix.push(name.ident.to_string());
                self.paths.push(prefix);
            }
            syn::UseTree::Rename(rename) => {
                prefix.push(rename.ident.to_string());
                self.paths.push(prefix);
            }
            syn::UseTree::Glob(_) => {
                prefix.push("*".to_owned());
                self.paths.push(prefix);
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use_tree(item, prefix.clone());
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !segments.is_empty() {
            self.paths.push(segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.record_use_tree(&node.tree, Vec::new());
    }
}

fn collect_sources(
    src_root: &Path,
    current: &Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    for entry in fs::read_dir(current)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_sources(src_root, &path, sources)?;
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
            continue;
        }

        let file = path
            .strip_prefix(src_root)
            .map_err(|err| ArchitectureLintError::Parse {
                file: path.clone(),
                message: err.to_string(),
            })?
            .to_path_buf();
        let contents = fs::read_to_string(&path)?;
        sources.push(LintSource { file, contents });
    }
    Ok(())
}
