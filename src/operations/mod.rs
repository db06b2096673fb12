// Operations module
// Shell commands, git metadata, provenance strings and figure output

pub mod figures;
pub mod git;
pub mod provenance;
pub mod shell;

#[cfg(test)]
pub(crate) mod testing;

pub use figures::{date_subdirectory, SaveOptions};
pub use git::GitOps;
pub use provenance::Provenance;
pub use shell::{run_shell, run_shell_checked, ShellOutput};
