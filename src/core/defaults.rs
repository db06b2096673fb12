// Layout Defaults
// Defaults compiled from defaults.yaml at build time
// Modify defaults.yaml and rebuild to change these values

// Include the auto-generated defaults from build.rs
pub mod compiled {
    include!(concat!(env!("OUT_DIR"), "/compiled_defaults.rs"));
}

/// Directory layout of an analysis project, relative to its root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Directory holding input data
    pub data_dir: String,

    /// Directory holding YAML configuration files
    pub config_dir: String,

    /// Directory figures are written under
    pub figure_dir: String,

    /// Extension given to configuration file names (without the dot)
    pub config_extension: String,
}

/// Settings used when persisting figures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigureDefaults {
    /// strftime pattern for per-day subdirectories
    pub date_format: String,

    /// Metadata key the provenance string is stored under
    pub metadata_key: String,

    /// Formats written when the caller does not ask for specific ones
    pub formats: Vec<String>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            data_dir: compiled::DATA_DIR.to_string(),
            config_dir: compiled::CONFIG_DIR.to_string(),
            figure_dir: compiled::FIGURE_DIR.to_string(),
            config_extension: compiled::CONFIG_EXTENSION.to_string(),
        }
    }
}

impl Default for FigureDefaults {
    fn default() -> Self {
        Self {
            date_format: compiled::DATE_FORMAT.to_string(),
            metadata_key: compiled::METADATA_KEY.to_string(),
            formats: compiled::FIGURE_FORMATS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
