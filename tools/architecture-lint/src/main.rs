//! CLI entry point: lint `backend/src` of the enclosing workspace.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let outcome = workspace_root()
        .ok_or_else(|| "no Cargo.toml with a [workspace] table above this directory".to_owned())
        .and_then(|root| {
            architecture_lint::lint_backend_sources(&root.join("backend"))
                .map_err(|err| err.to_string())
        });

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            let _ = writeln!(io::stderr().lock(), "{message}");
            ExitCode::FAILURE
        }
    }
}

/// Search upwards from `CARGO_WORKSPACE_DIR`, the current directory, and
/// finally this crate's manifest directory.
fn workspace_root() -> Option<PathBuf> {
    let candidates = [
        std::env::var_os("CARGO_WORKSPACE_DIR").map(PathBuf::from),
        std::env::current_dir().ok(),
        Some(PathBuf::from(env!("CARGO_MANIFEST_DIR"))),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|start| {
            start
                .ancestors()
                .find(|dir| declares_workspace(dir))
                .map(Path::to_path_buf)
        })
}

fn declares_workspace(dir: &Path) -> bool {
    fs::read_to_string(dir.join("Cargo.toml"))
        .is_ok_and(|contents| contents.contains("[workspace]"))
}
