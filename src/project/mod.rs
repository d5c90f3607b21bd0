//! Project, terminal-session and worktree bookkeeping.
//!
//! Everything here is presentation/plumbing glue around the supervised run:
//! deriving a project identity, naming the hosting terminal session, and
//! optionally giving a run its own git worktree.

mod session;
mod worktree;

pub use session::*;
pub use worktree::*;

use std::path::PathBuf;
use std::process::Command;

/// Returns the identity of the project the tool is running inside.
///
/// Prefers the basename of the git toplevel; falls back to the current
/// directory name.
pub fn project_name() -> String {
    if let Some(top) = git_toplevel() {
        if let Some(name) = top.file_name().and_then(|n| n.to_str()) {
            return name.to_string();
        }
    }
    std::env::current_dir()
        .ok()
        .and_then(|dir| {
            dir.file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "workspace".to_string())
}

fn git_toplevel() -> Option<PathBuf> {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}
