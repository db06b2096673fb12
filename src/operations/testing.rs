// Test support
// Throwaway git checkouts for tests that need commit metadata

use std::path::Path;
use std::process::Command;

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_NAME", "Analysis Tests")
        .env("GIT_AUTHOR_EMAIL", "tests@example.invalid")
        .env("GIT_COMMITTER_NAME", "Analysis Tests")
        .env("GIT_COMMITTER_EMAIL", "tests@example.invalid")
        .status()
        .expect("git should be installed to run these tests");
    assert!(status.success(), "git {:?} failed", args);
}

/// Create a repository in `dir` with a single empty commit
pub fn init_repo(dir: &Path) {
    git(dir, &["init", "--quiet"]);
    git(dir, &["commit", "--quiet", "--allow-empty", "--no-gpg-sign", "-m", "initial"]);
}
