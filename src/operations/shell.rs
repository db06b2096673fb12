// Shell Invocation
// Runs external commands in a directory and captures their standard output

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use crate::core::{Error, Project, Result};

/// Captured result of a finished command
#[derive(Debug, Clone)]
pub struct ShellOutput {
    /// Command line as it was run, for messages
    pub command: String,
    /// Exit status of the process
    pub status: ExitStatus,
    /// Standard output, decoded and trimmed
    pub stdout: String,
}

/// Run a command in `dir` and wait for it to finish
///
/// Standard output is captured; standard error and input are inherited.
/// Output that is not valid UTF-8 is decoded lossily.
pub fn execute<S: AsRef<OsStr>>(dir: &Path, command: &[S]) -> Result<ShellOutput> {
    let (program, args) = command.split_first().ok_or(Error::EmptyCommand)?;
    let command_line = command
        .iter()
        .map(|part| part.as_ref().to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ");

    tracing::debug!(dir = %dir.display(), command = %command_line, "running command");

    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::inherit())
        .stderr(Stdio::inherit())
        .output()
        .map_err(|source| Error::CommandLaunch {
            command: command_line.clone(),
            source,
        })?;

    Ok(ShellOutput {
        command: command_line,
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
    })
}

/// Run a command in `dir` and return its trimmed standard output
///
/// A non-zero exit status is not an error here; only failing to start the
/// process is.
pub fn run_shell<S: AsRef<OsStr>>(dir: &Path, command: &[S]) -> Result<String> {
    let output = execute(dir, command)?;
    if !output.status.success() {
        tracing::warn!(command = %output.command, status = %output.status, "command exited unsuccessfully");
    }
    Ok(output.stdout)
}

/// Like [`run_shell`], but a non-zero exit status is an error
pub fn run_shell_checked<S: AsRef<OsStr>>(dir: &Path, command: &[S]) -> Result<String> {
    let output = execute(dir, command)?;
    if !output.status.success() {
        return Err(Error::CommandFailed {
            command: output.command,
            status: output.status,
        });
    }
    Ok(output.stdout)
}

impl Project {
    /// Run a command in the project root and return its trimmed standard output
    pub fn run_shell<S: AsRef<OsStr>>(&self, command: &[S]) -> Result<String> {
        run_shell(self.root(), command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_is_trimmed() {
        let dir = TempDir::new().unwrap();
        assert_eq!(run_shell(dir.path(), &["echo", "hello"]).unwrap(), "hello");
        assert_eq!(
            run_shell(dir.path(), &["sh", "-c", "printf '\\n  padded \\n\\n'"]).unwrap(),
            "padded"
        );
    }

    #[test]
    fn test_runs_in_given_directory() {
        let dir = TempDir::new().unwrap();
        let project = Project::new(dir.path());
        let pwd = project.run_shell(&["pwd"]).unwrap();
        assert_eq!(
            Path::new(&pwd).canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_nonzero_exit_still_returns_output() {
        let dir = TempDir::new().unwrap();
        let out = run_shell(dir.path(), &["sh", "-c", "echo partial; exit 3"]).unwrap();
        assert_eq!(out, "partial");
    }

    #[test]
    fn test_checked_rejects_nonzero_exit() {
        let dir = TempDir::new().unwrap();
        let err = run_shell_checked(dir.path(), &["sh", "-c", "exit 3"]).unwrap_err();
        match err {
            Error::CommandFailed { command, status } => {
                assert_eq!(command, "sh -c exit 3");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_program_is_launch_error() {
        let dir = TempDir::new().unwrap();
        let err = run_shell(dir.path(), &["definitely-not-a-real-program-4521"]).unwrap_err();
        assert!(matches!(err, Error::CommandLaunch { .. }));
    }

    #[test]
    fn test_empty_command() {
        let dir = TempDir::new().unwrap();
        let err = run_shell::<&str>(dir.path(), &[]).unwrap_err();
        assert!(matches!(err, Error::EmptyCommand));
    }
}
