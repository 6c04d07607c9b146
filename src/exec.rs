use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;

use crate::config::DEBUG_VAR;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to launch {}: {source}", .path.display())]
    Launch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything needed to hand control to the selected interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub executable: PathBuf,
    /// Arguments after the launcher's own selector, verbatim.
    pub args: Vec<OsString>,
}

impl LaunchPlan {
    pub fn new(executable: PathBuf, args: Vec<OsString>) -> Self {
        Self { executable, args }
    }

    /// Inherits stdio and the environment, minus `PYLAUNCH_DEBUG`.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.args(&self.args).env_remove(DEBUG_VAR);
        cmd
    }

    fn launch_error(&self, source: std::io::Error) -> ExecError {
        ExecError::Launch {
            path: self.executable.clone(),
            source,
        }
    }
}

/// Replace the current process image with the planned interpreter.
///
/// Uses `exec()` so the interpreter inherits the launcher's PID, stdio and
/// signals; its exit status is the launcher's by construction. Only returns
/// if the exec itself failed.
#[cfg(unix)]
pub fn dispatch(plan: &LaunchPlan) -> Result<i32, ExecError> {
    use std::os::unix::process::CommandExt;

    let err = plan.command().exec();
    Err(plan.launch_error(err))
}

/// Spawn the interpreter, wait, and hand back its exit code.
///
/// A child that reports no code is treated as a plain failure (1).
#[cfg(not(unix))]
pub fn dispatch(plan: &LaunchPlan) -> Result<i32, ExecError> {
    let status = plan
        .command()
        .status()
        .map_err(|e| plan.launch_error(e))?;
    Ok(status.code().unwrap_or(1))
}
