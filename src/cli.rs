use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::io::output;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
    Markdown,
}

impl From<OutputFormat> for output::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => output::OutputFormat::Terminal,
            OutputFormat::Json => output::OutputFormat::Json,
            OutputFormat::Markdown => output::OutputFormat::Markdown,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "nbforge")]
#[command(about = "Notebook analysis and interface generator", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a notebook into a parameter/output schema
    Analyze {
        /// Notebook file to analyze
        path: Option<PathBuf>,

        /// Fetch the notebook from a URL instead (GitHub blob URLs work)
        #[arg(long, conflicts_with = "path")]
        url: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Improve the heuristic analysis via the enrichment backend
        #[arg(long)]
        enrich: bool,
    },

    /// Render the analyzed notebook into a standalone interface page
    Render {
        /// Notebook file to render
        path: Option<PathBuf>,

        /// Fetch the notebook from a URL instead
        #[arg(long, conflicts_with = "path")]
        url: Option<String>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Improve the heuristic analysis via the enrichment backend
        #[arg(long)]
        enrich: bool,
    },

    /// Generate the backend stub matching the notebook's schema
    Stub {
        /// Notebook file to analyze
        path: Option<PathBuf>,

        /// Fetch the notebook from a URL instead
        #[arg(long, conflicts_with = "path")]
        url: Option<String>,

        /// Output file for the stub text (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write a copy of the notebook with the stub appended as a cell
        #[arg(long)]
        inject: Option<PathBuf>,
    },

    /// Probe the generation backend's health endpoint
    Check {
        /// Backend base URL (overrides the configured one)
        #[arg(env = "NBFORGE_BACKEND_URL")]
        url: Option<String>,
    },

    /// Create a starter .nbforge.toml in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_accepts_a_positional_url() {
        let cli = Cli::try_parse_from(["nbforge", "check", "https://x.ngrok-free.app"]).unwrap();
        match cli.command {
            Commands::Check { url } => {
                assert_eq!(url.as_deref(), Some("https://x.ngrok-free.app"));
            }
            other => panic!("unexpected subcommand: {other:?}"),
        }
    }

    #[test]
    fn check_url_falls_back_to_the_environment() {
        std::env::set_var("NBFORGE_BACKEND_URL", "http://env-backend:5000");
        let cli = Cli::try_parse_from(["nbforge", "check"]).unwrap();
        std::env::remove_var("NBFORGE_BACKEND_URL");
        match cli.command {
            Commands::Check { url } => {
                assert_eq!(url.as_deref(), Some("http://env-backend:5000"));
            }
            other => panic!("unexpected subcommand: {other:?}"),
        }
    }

    #[test]
    fn path_and_url_are_mutually_exclusive() {
        let result =
            Cli::try_parse_from(["nbforge", "analyze", "nb.ipynb", "--url", "http://x/nb.ipynb"]);
        assert!(result.is_err());
    }
}
