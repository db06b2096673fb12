// Figure Persistence
// Writes figures under the project's figure directory with provenance attached

use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{Error, Project, Result};
use crate::figure::{Figure, FigureMetadata};

/// Where and in which formats a figure is written
#[derive(Debug, Clone)]
pub struct SaveOptions {
    /// Directory under the figure directory
    pub subdirectory: PathBuf,
    /// Extensions to write, in order, each with a leading dot
    pub formats: Vec<String>,
}

/// Root of the figure directory, in the compiled-in formats
impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            subdirectory: PathBuf::from("."),
            formats: crate::core::FigureDefaults::default().formats,
        }
    }
}

impl SaveOptions {
    /// Write under `subdirectory` of the figure directory
    pub fn in_subdirectory(mut self, subdirectory: impl Into<PathBuf>) -> Self {
        self.subdirectory = subdirectory.into();
        self
    }

    /// Write these formats instead, in the given order
    pub fn with_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.formats = formats.into_iter().map(Into::into).collect();
        self
    }
}

/// Subdirectory name for figures produced on `date`
pub fn date_subdirectory(date: NaiveDate, format: &str) -> String {
    date.format(format).to_string()
}

/// Extension of a format such as ".png", without the dot
fn extension_of(format: &str) -> Result<&str> {
    match format.strip_prefix('.') {
        Some(ext) if !ext.is_empty() && !ext.contains(['/', '\\']) => Ok(ext),
        _ => Err(Error::InvalidFormat {
            format: format.to_string(),
        }),
    }
}

impl Project {
    /// Save options for the figure directory root, in this project's formats
    pub fn save_options(&self) -> SaveOptions {
        SaveOptions::default().with_formats(self.figures.formats.iter().cloned())
    }

    /// Directory figures in `subdirectory` are written to
    pub fn figure_dir(&self, subdirectory: impl AsRef<Path>) -> PathBuf {
        self.locate([Path::new(&self.layout.figure_dir), subdirectory.as_ref()])
    }

    /// Save `figure` once per requested format
    ///
    /// The directory is created when missing. Each file carries the provenance
    /// string as metadata and is announced on stdout once written. Files
    /// written before a failure are left in place.
    pub fn save_figure<F: Figure + ?Sized>(
        &self,
        figure: &F,
        title: &str,
        options: &SaveOptions,
    ) -> Result<Vec<PathBuf>> {
        // Reject bad formats before touching the filesystem
        let extensions = options
            .formats
            .iter()
            .map(|format| extension_of(format))
            .collect::<Result<Vec<_>>>()?;

        let directory = self.figure_dir(&options.subdirectory);
        fs::create_dir_all(&directory).map_err(|source| Error::CreateDirectory {
            path: directory.clone(),
            source,
        })?;

        let metadata =
            FigureMetadata::new().with(self.figures.metadata_key.as_str(), self.build_description()?);

        let mut written = Vec::with_capacity(extensions.len());
        for extension in extensions {
            let path = directory.join(title).with_extension(extension);
            figure
                .save(&path, &metadata)
                .map_err(|source| Error::FigureSave {
                    path: path.clone(),
                    source,
                })?;
            println!("Wrote {}", path.display());
            tracing::debug!(path = %path.display(), "figure written");
            written.push(path);
        }

        Ok(written)
    }

    /// Save `figure` in a subdirectory named after today's local date
    ///
    /// The date is read at call time and replaces the subdirectory in `options`.
    pub fn save_figure_dated<F: Figure + ?Sized>(
        &self,
        figure: &F,
        title: &str,
        options: &SaveOptions,
    ) -> Result<Vec<PathBuf>> {
        let today = date_subdirectory(Local::now().date_naive(), &self.figures.date_format);
        let options = options.clone().in_subdirectory(today);
        self.save_figure(figure, title, &options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{FigureError, RasterFigure, BLACK};
    use crate::operations::testing::init_repo;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Records save calls and fails for one extension
    #[derive(Default)]
    struct RecordingFigure {
        saved: RefCell<Vec<(PathBuf, FigureMetadata)>>,
        fail_on: Option<&'static str>,
    }

    impl Figure for RecordingFigure {
        fn save(&self, path: &Path, metadata: &FigureMetadata) -> std::result::Result<(), FigureError> {
            let extension = path.extension().and_then(|e| e.to_str());
            if extension.is_some() && extension == self.fail_on {
                return Err(FigureError::UnsupportedFormat(self.fail_on.unwrap().to_string()));
            }
            fs::write(path, b"figure")?;
            self.saved.borrow_mut().push((path.to_path_buf(), metadata.clone()));
            Ok(())
        }
    }

    fn scratch_project() -> (TempDir, Project) {
        let dir = TempDir::new().unwrap();
        init_repo(dir.path());
        let project = Project::new(dir.path()).with_script(dir.path().join("plot.py"));
        (dir, project)
    }

    #[test]
    fn test_default_save_writes_png_and_pdf() {
        let (dir, project) = scratch_project();
        let mut figure = RasterFigure::new(32, 16);
        figure.plot_series(&[(0.0, 1.0), (1.0, 4.0), (2.0, 9.0)], BLACK);

        let written = project
            .save_figure(&figure, "plot1", &SaveOptions::default())
            .unwrap();

        let fig_dir = dir.path().join("fig").join(".");
        assert_eq!(written, vec![fig_dir.join("plot1.png"), fig_dir.join("plot1.pdf")]);
        assert!(written.iter().all(|p| p.is_file()));

        let mut decoder = png::Decoder::new(fs::File::open(&written[0]).unwrap());
        decoder.set_ignore_text_chunk(false);
        let reader = decoder.read_info().unwrap();
        let creator = &reader
            .info()
            .uncompressed_latin1_text
            .iter()
            .find(|chunk| chunk.keyword == "Creator")
            .unwrap()
            .text;
        let hash = project.commit_hash().unwrap();
        assert_eq!(hash.len(), 40);
        assert!(creator.contains(&hash));
        assert!(creator.contains("plot.py @ "));
    }

    #[test]
    fn test_formats_written_in_order_with_creator() {
        let (_dir, project) = scratch_project();
        let figure = RecordingFigure::default();
        let options = SaveOptions::default()
            .in_subdirectory("runs/a")
            .with_formats([".pdf", ".svg", ".png"]);

        project.save_figure(&figure, "efficiency", &options).unwrap();

        let saved = figure.saved.borrow();
        let names: Vec<_> = saved
            .iter()
            .map(|(p, _)| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["efficiency.pdf", "efficiency.svg", "efficiency.png"]);
        assert!(saved[0].0.starts_with(project.locate(["fig", "runs", "a"])));

        let description = project.build_description().unwrap();
        for (_, metadata) in saved.iter() {
            assert_eq!(metadata.get("Creator"), Some(description.as_str()));
        }
    }

    #[test]
    fn test_saving_twice_overwrites() {
        let (_dir, project) = scratch_project();
        let first = RasterFigure::new(4, 4);
        let mut second = RasterFigure::new(4, 4);
        second.fill(BLACK);
        let options = SaveOptions::default().with_formats([".png"]);

        let path = project.save_figure(&first, "same", &options).unwrap().remove(0);
        let before = fs::read(&path).unwrap();
        project.save_figure(&second, "same", &options).unwrap();
        let after = fs::read(&path).unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn test_partial_failure_keeps_earlier_files() {
        let (_dir, project) = scratch_project();
        let figure = RecordingFigure {
            fail_on: Some("pdf"),
            ..Default::default()
        };

        let err = project
            .save_figure(&figure, "partial", &SaveOptions::default())
            .unwrap_err();

        assert!(matches!(err, Error::FigureSave { ref path, .. } if path.ends_with("partial.pdf")));
        assert!(project.locate(["fig", "partial.png"]).is_file());
    }

    #[test]
    fn test_invalid_format_rejected_before_writing() {
        let (_dir, project) = scratch_project();
        let figure = RecordingFigure::default();
        let options = SaveOptions::default().with_formats([".png", "pdf"]);

        let err = project.save_figure(&figure, "plot", &options).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { ref format } if format == "pdf"));
        assert!(figure.saved.borrow().is_empty());
        assert!(!project.locate(["fig"]).exists());
    }

    #[test]
    fn test_title_extension_is_replaced() {
        let (_dir, project) = scratch_project();
        let figure = RecordingFigure::default();
        let options = SaveOptions::default().with_formats([".png"]);

        let written = project.save_figure(&figure, "spectrum.v2", &options).unwrap();
        assert_eq!(written[0].file_name().unwrap(), "spectrum.png");
    }

    #[test]
    fn test_save_without_script_fails() {
        let dir = TempDir::new().unwrap();
        let project = Project::new(dir.path());
        let err = project
            .save_figure(&RecordingFigure::default(), "plot", &SaveOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::EntryPointUnavailable));
    }

    #[test]
    fn test_date_subdirectory() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let next = day.succ_opt().unwrap();
        assert_eq!(date_subdirectory(day, "%Y%m%d"), "20261019");
        assert_eq!(date_subdirectory(day, "%Y%m%d"), date_subdirectory(day, "%Y%m%d"));
        assert_eq!(date_subdirectory(next, "%Y%m%d"), "20261020");
    }

    #[test]
    fn test_save_figure_dated_uses_today() {
        let (_dir, project) = scratch_project();
        let figure = RecordingFigure::default();

        let before = date_subdirectory(Local::now().date_naive(), "%Y%m%d");
        let written = project
            .save_figure_dated(&figure, "daily", &project.save_options())
            .unwrap();
        let after = date_subdirectory(Local::now().date_naive(), "%Y%m%d");

        let dated_dir = written[0]
            .parent()
            .unwrap()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();
        // Either side of midnight
        assert!(dated_dir == before || dated_dir == after);
        let names: Vec<_> = written.iter().map(|p| p.file_name().unwrap().to_owned()).collect();
        assert_eq!(names, vec!["daily.png", "daily.pdf"]);
        assert!(written[0].starts_with(project.locate(["fig", dated_dir.as_str()])));
    }

    #[test]
    fn test_project_formats_are_honored() {
        let (_dir, mut project) = scratch_project();
        project.figures.formats = vec![".svg".to_string()];
        let figure = RecordingFigure::default();

        let written = project
            .save_figure(&figure, "custom", &project.save_options())
            .unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].file_name().unwrap(), "custom.svg");

        let dated = project
            .save_figure_dated(&figure, "custom", &project.save_options())
            .unwrap();
        assert_eq!(dated[0].extension().unwrap(), "svg");
    }
}
