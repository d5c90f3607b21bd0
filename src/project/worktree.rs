use crate::errors::Error;
use crate::utils::short_id;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{info, warn};

/// Creates a linked git worktree for the given task, next to the repository
///
/// # Arguments
///
/// * `project` - Project identity, used in the worktree directory name
/// * `task_id` - Task the worktree belongs to
///
/// # Returns
///
/// The path of the new worktree
///
/// # Errors
///
/// Returns an Error if git cannot be invoked or refuses to add the worktree
pub fn create_worktree(project: &str, task_id: &str) -> Result<PathBuf, Error> {
    let path = PathBuf::from("..").join(format!("{}-task-{}", project, short_id(task_id)));

    let output = Command::new("git")
        .args(["worktree", "add"])
        .arg(&path)
        .output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(Error::Worktree(format!(
            "git worktree add {} failed: {}",
            path.display(),
            stderr
        )));
    }

    info!("Created worktree at {}", path.display());
    Ok(path)
}

/// Removes a worktree created for a run.
///
/// Failures are logged, not fatal; a stale worktree is an inconvenience the
/// operator can prune by hand.
pub fn remove_worktree(path: &Path) {
    match Command::new("git")
        .args(["worktree", "remove"])
        .arg(path)
        .output()
    {
        Ok(output) if output.status.success() => {
            info!("Removed worktree {}", path.display());
        }
        Ok(output) => warn!(
            "Failed to remove worktree {}: {}",
            path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        ),
        Err(e) => warn!("Failed to remove worktree {}: {}", path.display(), e),
    }
}
