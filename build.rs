// Build script - reads src/defaults.yaml at compile time and generates layout defaults
// Lets the project layout change without editing source code

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=src/defaults.yaml");

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("compiled_defaults.rs");

    // Fall back to hardcoded defaults if defaults.yaml is missing
    let defaults = if Path::new("src/defaults.yaml").exists() {
        let content = fs::read_to_string("src/defaults.yaml")
            .expect("Failed to read src/defaults.yaml");
        parse_defaults(&content)
    } else {
        CompiledDefaults::default()
    };

    let generated = format!(
        r#"// Auto-generated from defaults.yaml at compile time
// Do not edit - modify defaults.yaml and rebuild instead

pub const DATA_DIR: &str = {data_dir:?};
pub const CONFIG_DIR: &str = {config_dir:?};
pub const FIGURE_DIR: &str = {figure_dir:?};
pub const CONFIG_EXTENSION: &str = {config_extension:?};

pub const DATE_FORMAT: &str = {date_format:?};
pub const METADATA_KEY: &str = {metadata_key:?};
pub const FIGURE_FORMATS: &[&str] = &[
{formats}
];

pub const GIT_PROGRAM: &str = {git_program:?};
pub const ROOT_ENV: &str = {root_env:?};
"#,
        data_dir = defaults.data_dir,
        config_dir = defaults.config_dir,
        figure_dir = defaults.figure_dir,
        config_extension = defaults.config_extension,
        date_format = defaults.date_format,
        metadata_key = defaults.metadata_key,
        formats = defaults
            .formats
            .iter()
            .map(|f| format!("    {:?},", f))
            .collect::<Vec<_>>()
            .join("\n"),
        git_program = defaults.git_program,
        root_env = defaults.root_env,
    );

    fs::write(&dest_path, generated).expect("Failed to write compiled defaults");
}

struct CompiledDefaults {
    data_dir: String,
    config_dir: String,
    figure_dir: String,
    config_extension: String,
    date_format: String,
    metadata_key: String,
    formats: Vec<String>,
    git_program: String,
    root_env: String,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            config_dir: "config".to_string(),
            figure_dir: "fig".to_string(),
            config_extension: "yaml".to_string(),
            date_format: "%Y%m%d".to_string(),
            metadata_key: "Creator".to_string(),
            formats: vec![".png".to_string(), ".pdf".to_string()],
            git_program: "git".to_string(),
            root_env: "ANALYSIS_PROJECT_ROOT".to_string(),
        }
    }
}

#[derive(PartialEq)]
enum Section {
    None,
    Layout,
    Figures,
    Git,
    Project,
}

fn parse_defaults(content: &str) -> CompiledDefaults {
    let mut defaults = CompiledDefaults::default();

    // Minimal YAML reading (keeps the build script free of dependencies)
    let mut section = Section::None;
    let mut in_formats = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        // Top-level keys switch sections
        if !line.starts_with(' ') && !line.starts_with('\t') {
            in_formats = false;
            section = match trimmed.trim_end_matches(':') {
                "layout" => Section::Layout,
                "figures" => Section::Figures,
                "git" => Section::Git,
                "project" => Section::Project,
                _ => Section::None,
            };
            continue;
        }

        if in_formats {
            if let Some(item) = trimmed.strip_prefix("- ") {
                defaults.formats.push(unquote(item).to_string());
                continue;
            }
            in_formats = false;
        }

        if section == Section::Figures && trimmed == "formats:" {
            in_formats = true;
            defaults.formats.clear();
            continue;
        }

        let Some((key, value)) = parse_kv(trimmed) else {
            continue;
        };

        match (&section, key) {
            (Section::Layout, "data_dir") => defaults.data_dir = value.to_string(),
            (Section::Layout, "config_dir") => defaults.config_dir = value.to_string(),
            (Section::Layout, "figure_dir") => defaults.figure_dir = value.to_string(),
            (Section::Layout, "config_extension") => {
                defaults.config_extension = value.trim_start_matches('.').to_string()
            }
            (Section::Figures, "date_format") => defaults.date_format = value.to_string(),
            (Section::Figures, "metadata_key") => defaults.metadata_key = value.to_string(),
            (Section::Git, "program") => defaults.git_program = value.to_string(),
            (Section::Project, "root_env") => defaults.root_env = value.to_string(),
            _ => {}
        }
    }

    defaults
}

fn parse_kv(line: &str) -> Option<(&str, &str)> {
    let colon_pos = line.find(':')?;
    let key = line[..colon_pos].trim();
    let mut value = line[colon_pos + 1..].trim();

    // Strip inline comments
    if let Some(comment_pos) = value.find(" #") {
        value = value[..comment_pos].trim();
    }

    // Section header
    if value.is_empty() {
        return None;
    }

    Some((key, unquote(value)))
}

fn unquote(s: &str) -> &str {
    s.trim().trim_matches('"').trim_matches('\'')
}
