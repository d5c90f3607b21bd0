use crate::errors::Error;
use crate::utils::short_id;
use std::process::Command;

/// Derives the terminal session name for one supervised run
///
/// # Arguments
///
/// * `prefix` - Configured session prefix
/// * `project` - Project identity the run belongs to
/// * `task_id` - Task under supervision; only its short form is used
pub fn session_name(prefix: &str, project: &str, task_id: &str) -> String {
    format!("{}-{}-{}", prefix, project, short_id(task_id))
}

/// Closes the named tmux session.
///
/// Callers treat this as fire-and-forget: a failure is logged and never
/// changes the outcome of the run that triggered it.
///
/// # Errors
///
/// Returns an Error when tmux cannot be invoked or reports a failure
pub fn close_session(name: &str) -> Result<(), Error> {
    let output = Command::new("tmux")
        .args(["kill-session", "-t", name])
        .output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(Error::Session(format!(
            "tmux kill-session '{}' failed: {}",
            name, stderr
        )));
    }
    Ok(())
}
