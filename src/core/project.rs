// Project Context
// The project root and everything resolved relative to it

use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::defaults::{compiled, FigureDefaults, Layout};
use super::error::{Error, Result};

/// An analysis project rooted at a fixed absolute directory
///
/// Constructed once at startup and passed to the helpers that need it.
#[derive(Debug, Clone)]
pub struct Project {
    /// Absolute project root
    root: PathBuf,

    /// Directory names under the root
    pub layout: Layout,

    /// Figure output settings
    pub figures: FigureDefaults,

    /// Script or tool credited in provenance strings
    script: Option<PathBuf>,
}

impl Project {
    /// Create a project context for the given root directory
    ///
    /// A relative root is made absolute against the current directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = std::path::absolute(&root).unwrap_or(root);

        Self {
            root,
            layout: Layout::default(),
            figures: FigureDefaults::default(),
            script: None,
        }
    }

    /// Detect the project root
    ///
    /// Uses the root environment variable when it names an existing directory,
    /// otherwise the nearest ancestor of the current directory that holds a
    /// config directory or a git checkout, otherwise the current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(path) = env::var(compiled::ROOT_ENV) {
            let path = PathBuf::from(path);
            if path.is_dir() {
                return Ok(Self::new(path));
            }
            tracing::warn!(
                "{} points at {}, which is not a directory",
                compiled::ROOT_ENV,
                path.display()
            );
        }

        let cwd = env::current_dir().map_err(Error::CurrentDir)?;
        Ok(Self::discover_from(&cwd))
    }

    /// Nearest ancestor of `start` (itself included) holding a config
    /// directory or a git checkout, else `start`
    pub fn discover_from(start: &Path) -> Self {
        let root = start
            .ancestors()
            .find(|dir| dir.join(compiled::CONFIG_DIR).is_dir() || dir.join(".git").exists())
            .unwrap_or(start);

        tracing::debug!(root = %root.display(), "discovered project root");
        Self::new(root)
    }

    /// Credit the given script in provenance strings
    pub fn with_script(mut self, script: impl Into<PathBuf>) -> Self {
        self.script = Some(script.into());
        self
    }

    /// Credit the running executable in provenance strings
    pub fn with_current_exe(self) -> Result<Self> {
        let exe = env::current_exe().map_err(Error::CurrentExe)?;
        Ok(self.with_script(exe))
    }

    /// The absolute project root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The script credited in provenance strings, if any
    pub fn script(&self) -> Option<&Path> {
        self.script.as_deref()
    }

    /// Join path segments onto the project root
    ///
    /// Pure path arithmetic: nothing is checked on disk.
    pub fn locate<I, P>(&self, segments: I) -> PathBuf
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut path = self.root.clone();
        path.extend(segments);
        path
    }

    /// Join path segments onto the project's data directory
    pub fn locate_data<I, P>(&self, segments: I) -> PathBuf
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut path = self.locate([&self.layout.data_dir]);
        path.extend(segments);
        path
    }

    /// Path of the named configuration file
    ///
    /// Any extension on `name` is replaced by the configuration extension.
    pub fn config_path(&self, name: &str) -> PathBuf {
        self.locate([self.layout.config_dir.as_str(), name])
            .with_extension(&self.layout.config_extension)
    }

    /// Load the named configuration file into a typed structure
    pub fn load_config<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.config_path(name);
        tracing::debug!(path = %path.display(), "loading configuration");

        let content = fs::read_to_string(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => Error::ConfigNotFound { path: path.clone() },
            _ => Error::ConfigRead {
                path: path.clone(),
                source,
            },
        })?;

        serde_yaml::from_str(&content).map_err(|source| Error::ConfigParse { path, source })
    }

    /// Load the named configuration file as an untyped mapping
    pub fn load_config_mapping(&self, name: &str) -> Result<serde_yaml::Mapping> {
        self.load_config(name)
    }
}
