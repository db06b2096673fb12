// Git Operations
// Commit metadata for the checkout the project lives in

use std::path::Path;

use super::shell::run_shell_checked;
use crate::core::defaults::compiled;
use crate::core::{Project, Result};

/// Git metadata queries
pub struct GitOps;

impl GitOps {
    /// Check if a path is the top of a git checkout
    pub fn is_repo(path: &Path) -> bool {
        path.join(".git").exists()
    }

    /// Full identifier of the commit checked out at `repo_path`
    pub fn commit_hash(repo_path: &Path) -> Result<String> {
        run_shell_checked(repo_path, &[compiled::GIT_PROGRAM, "rev-parse", "HEAD"])
    }

    /// Date of the last commit, in git's default date format
    pub fn commit_date(repo_path: &Path) -> Result<String> {
        run_shell_checked(
            repo_path,
            &[compiled::GIT_PROGRAM, "log", "-1", "--format=%cd"],
        )
    }
}

impl Project {
    /// Identifier of the last commit in the project checkout
    pub fn commit_hash(&self) -> Result<String> {
        GitOps::commit_hash(self.root())
    }

    /// Date of the last commit in the project checkout
    pub fn commit_date(&self) -> Result<String> {
        GitOps::commit_date(self.root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;
    use crate::operations::testing::init_repo;
    use tempfile::TempDir;

    #[test]
    fn test_commit_hash_is_full_sha() {
        let dir = TempDir::new().unwrap();
        init_repo(dir.path());
        let project = Project::new(dir.path());

        let hash = project.commit_hash().unwrap();
        assert_eq!(hash.len(), 40);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_commit_date_is_reported() {
        let dir = TempDir::new().unwrap();
        init_repo(dir.path());

        let date = GitOps::commit_date(dir.path()).unwrap();
        assert!(!date.is_empty());
        assert!(!date.contains('\n'));
    }

    #[test]
    fn test_missing_directory_fails_to_launch() {
        let dir = TempDir::new().unwrap();
        assert!(!GitOps::is_repo(dir.path()));
        let err = GitOps::commit_hash(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, Error::CommandLaunch { .. }));
    }
}
