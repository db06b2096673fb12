// Analysis Utilities
// Command-line access to the project helpers

// IMPORTS ------------------>>

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use analysis_utils::logging::init_logging;
use analysis_utils::Project;

//--------------------------------------------------------<<

/// Config file shown when no subcommand is given
const EXAMPLE_CONFIG: &str = "datasets";

#[derive(Debug, Parser)]
#[command(name = "analysis-utils", version, about = "Project helpers for an analysis workspace")]
struct Cli {
    /// Project root (otherwise from ANALYSIS_PROJECT_ROOT or the current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print a configuration file from config/ as parsed YAML
    Config {
        /// File name without extension
        name: String,
    },
    /// Print the provenance string figures are stamped with
    Describe {
        /// Script to credit (defaults to this executable)
        #[arg(long)]
        script: Option<PathBuf>,
    },
    /// Print a path resolved against the project root
    Locate {
        /// Resolve under the data directory instead of the root
        #[arg(long)]
        data: bool,
        segments: Vec<String>,
    },
}

// ┌──────────────────────────────────────────────────────────────────────────┐
// │                             MAIN ENTRY POINT                             │
// └──────────────────────────────────────────────────────────────────────────┘

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let project = match cli.root {
        Some(root) => Project::new(root),
        None => Project::discover().context("Failed to detect the project root")?,
    };

    match cli.command {
        Some(Commands::Config { name }) => print_config(&project, &name),
        Some(Commands::Describe { script }) => {
            let project = with_script(project, script)?;
            println!("{}", project.build_description().context("Failed to build description")?);
            Ok(())
        }
        Some(Commands::Locate { data, segments }) => {
            let path = if data {
                project.locate_data(&segments)
            } else {
                project.locate(&segments)
            };
            println!("{}", path.display());
            Ok(())
        }
        None => show_example(project),
    }
}

fn with_script(project: Project, script: Option<PathBuf>) -> Result<Project> {
    match script {
        Some(script) => Ok(project.with_script(script)),
        None => project
            .with_current_exe()
            .context("Failed to identify the running executable"),
    }
}

fn print_config(project: &Project, name: &str) -> Result<()> {
    let config = project
        .load_config_mapping(name)
        .with_context(|| format!("Failed to load config '{}'", name))?;
    let rendered = serde_yaml::to_string(&config).context("Failed to render config")?;
    print!("{}", rendered);
    Ok(())
}

/// Show what the helpers produce for this project
fn show_example(project: Project) -> Result<()> {
    println!(
        "{} contains the following:",
        project.config_path(EXAMPLE_CONFIG).display()
    );
    print_config(&project, EXAMPLE_CONFIG)?;

    let project = with_script(project, None)?;
    println!("Example description string:");
    println!("    {}", project.build_description().context("Failed to build description")?);
    Ok(())
}
