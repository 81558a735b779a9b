use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use nbforge::adapters::{enrich_in_place, EnrichmentClient, TransportClient};
use nbforge::cli::{Cli, Commands};
use nbforge::config;
use nbforge::io::notebook::Notebook;
use nbforge::{analyzers, codegen, render, Analysis};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match cli.command {
        Commands::Analyze {
            path,
            url,
            format,
            output,
            enrich,
        } => {
            let analysis = load_and_analyze(path.as_deref(), url.as_deref(), enrich)?;
            let destination = open_destination(output.as_deref())?;
            let mut writer = nbforge::create_writer(format.into(), destination);
            writer.write_analysis(&analysis)
        }
        Commands::Render {
            path,
            url,
            output,
            enrich,
        } => {
            let analysis = load_and_analyze(path.as_deref(), url.as_deref(), enrich)?;
            let page = render::generate_page(&analysis);
            write_output(output.as_deref(), &page)
        }
        Commands::Stub {
            path,
            url,
            output,
            inject,
        } => handle_stub(path, url, output, inject),
        Commands::Check { url } => handle_check(url),
        Commands::Init { force } => config::init_config(force),
    }
}

fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

/// Load a notebook from a file or URL and run the analysis pipeline
fn load_and_analyze(path: Option<&Path>, url: Option<&str>, enrich: bool) -> Result<Analysis> {
    let (notebook, source_name) = load_notebook(path, url)?;
    let cells = notebook.cells();
    let mut analysis = analyzers::analyze(&cells, &source_name);

    if enrich {
        let client = EnrichmentClient::new(&config::get_config().enrichment);
        enrich_in_place(&client, &analyzers::code_blob(&cells), &mut analysis);
    }

    Ok(analysis)
}

fn load_notebook(path: Option<&Path>, url: Option<&str>) -> Result<(Notebook, String)> {
    match (path, url) {
        (Some(path), _) => {
            let notebook = Notebook::from_file(path)?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "notebook".to_string());
            Ok((notebook, name))
        }
        (None, Some(url)) => {
            let client = TransportClient::new(&config::get_config().backend);
            let notebook = client.fetch_notebook(url)?;
            let name = url.rsplit('/').next().unwrap_or("notebook").to_string();
            Ok((notebook, name))
        }
        (None, None) => anyhow::bail!("a notebook path or --url is required"),
    }
}

fn handle_stub(
    path: Option<PathBuf>,
    url: Option<String>,
    output: Option<PathBuf>,
    inject: Option<PathBuf>,
) -> Result<()> {
    let analysis = load_and_analyze(path.as_deref(), url.as_deref(), false)?;
    write_output(output.as_deref(), &analysis.stub)?;

    if let Some(inject_path) = inject {
        let value = load_notebook_value(path.as_deref(), url.as_deref())?;
        let injected = codegen::inject_stub(value, &analysis.stub);
        let text = serde_json::to_string_pretty(&injected)?;
        nbforge::io::write_file(&inject_path, &text)?;
        eprintln!("Wrote notebook with injected stub to {}", inject_path.display());
    }

    Ok(())
}

/// Raw notebook JSON for injection; goes through `Value` so fields outside
/// the analyzed subset (metadata, outputs) survive the round trip
fn load_notebook_value(path: Option<&Path>, url: Option<&str>) -> Result<serde_json::Value> {
    match (path, url) {
        (Some(path), _) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            Ok(serde_json::from_str(&text)?)
        }
        (None, Some(url)) => {
            let raw = nbforge::adapters::transport::rewrite_github_url(url);
            let response = reqwest::blocking::get(&raw)?;
            Ok(response.json()?)
        }
        (None, None) => anyhow::bail!("a notebook path or --url is required"),
    }
}

fn handle_check(url: Option<String>) -> Result<()> {
    let mut client = TransportClient::new(&config::get_config().backend);
    if let Some(url) = url {
        client.set_base_url(&url);
    }

    let result = client.check_health();
    if result.success {
        println!(
            "{} {} (status: {})",
            "ok".green().bold(),
            result.message,
            result.status.as_deref().unwrap_or("unknown"),
        );
        Ok(())
    } else {
        println!("{} {}", "failed".red().bold(), result.message);
        std::process::exit(1);
    }
}

fn open_destination(output: Option<&Path>) -> Result<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(std::io::stdout())),
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => nbforge::io::write_file(path, content),
        None => {
            print!("{content}");
            Ok(())
        }
    }
}
