// Provenance
// Which script, at which commit, produced an artifact

use std::fmt;
use std::path::{Path, PathBuf};

use super::git::GitOps;
use crate::core::{Error, Project, Result};

/// Script identity and commit metadata for an output artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    /// Absolute path of the script that produced the artifact
    pub script: PathBuf,
    /// Full identifier of the checked-out commit
    pub commit_hash: String,
    /// Date of that commit as git prints it
    pub commit_date: String,
}

impl Provenance {
    /// Read the commit metadata for `script` from the checkout at `repo_path`
    pub fn capture(script: &Path, repo_path: &Path) -> Result<Self> {
        Ok(Self {
            script: resolve_script(script),
            commit_hash: GitOps::commit_hash(repo_path)?,
            commit_date: GitOps::commit_date(repo_path)?,
        })
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {} (last commit date: {})",
            self.script.display(),
            self.commit_hash,
            self.commit_date
        )
    }
}

/// Absolute, symlink-free path of a script
///
/// Paths that cannot be canonicalized (e.g. deleted since launch) are only
/// made absolute.
fn resolve_script(script: &Path) -> PathBuf {
    script
        .canonicalize()
        .or_else(|_| std::path::absolute(script))
        .unwrap_or_else(|_| script.to_path_buf())
}

impl Project {
    /// Provenance of artifacts produced by this project's script
    pub fn provenance(&self) -> Result<Provenance> {
        let script = self.script().ok_or(Error::EntryPointUnavailable)?;
        Provenance::capture(script, self.root())
    }

    /// Provenance rendered as `<script> @ <hash> (last commit date: <date>)`
    pub fn build_description(&self) -> Result<String> {
        Ok(self.provenance()?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::testing::init_repo;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_display_format() {
        let provenance = Provenance {
            script: PathBuf::from("/srv/analysis/scripts/fit.py"),
            commit_hash: "0123456789abcdef0123456789abcdef01234567".to_string(),
            commit_date: "Mon Oct 19 12:00:00 2026 +0200".to_string(),
        };
        assert_eq!(
            provenance.to_string(),
            "/srv/analysis/scripts/fit.py @ 0123456789abcdef0123456789abcdef01234567 \
             (last commit date: Mon Oct 19 12:00:00 2026 +0200)"
        );
    }

    #[test]
    fn test_build_description_from_checkout() {
        let dir = TempDir::new().unwrap();
        init_repo(dir.path());
        let script = dir.path().join("plot.py");
        fs::write(&script, "").unwrap();

        let project = Project::new(dir.path()).with_script(&script);
        let provenance = project.provenance().unwrap();
        assert_eq!(provenance.script, script.canonicalize().unwrap());
        assert_eq!(provenance.commit_hash.len(), 40);

        let description = project.build_description().unwrap();
        assert!(description.starts_with(&format!("{} @ ", provenance.script.display())));
        assert!(description.contains(&provenance.commit_hash));
        assert!(description.ends_with(&format!("(last commit date: {})", provenance.commit_date)));
    }

    #[test]
    fn test_missing_script_path_is_made_absolute() {
        let resolved = resolve_script(Path::new("no/such/script.py"));
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("no/such/script.py"));
    }

    #[test]
    fn test_without_script_identity() {
        let dir = TempDir::new().unwrap();
        let project = Project::new(dir.path());
        let err = project.build_description().unwrap_err();
        assert!(matches!(err, Error::EntryPointUnavailable));
    }
}
