//! gl3w-rs CLI
//!
//! Generates a single-header OpenGL loader from the Khronos core profile
//! header, optionally limited to the symbols used by a set of reference
//! sources.

mod download;

use anyhow::{Context, Result};
use clap::Parser;
use download::Downloader;
use gl3w_core::Config;
use gl3w_emit::Template;
use gl3w_parser::{HeaderScanner, ScanOptions, ScanStats, Whitelist, WhitelistBuilder};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gl3w-gen")]
#[command(author, version, about = "gl3w loader generator", long_about = None)]
struct Cli {
    /// Load extensions
    #[arg(long)]
    ext: bool,

    /// Root directory for the downloaded headers
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Scan files or dirs and only include used APIs
    #[arg(long = "ref", value_name = "PATH", num_args = 1..)]
    references: Vec<PathBuf>,

    /// Output header
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Template to render instead of the bundled one
    #[arg(long, value_name = "FILE")]
    template: Option<PathBuf>,

    /// YAML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fail when the template lacks a substitution marker
    #[arg(long)]
    strict: bool,

    /// Only use headers already on disk
    #[arg(long)]
    offline: bool,

    /// Summary format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,
}

/// What a generation run produced
#[derive(Debug, Serialize)]
struct Summary {
    output: PathBuf,
    whitelist_size: usize,
    functions: Vec<String>,
    stats: ScanStats,
}

fn main() -> Result<()> {
    install_interrupt_handler()?;

    // Initialize logging; stdout is reserved for the summary
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let summary = run(&config)?;
    println!("{}", render_summary(&summary, &cli.format)?);

    Ok(())
}

/// Ctrl-C ends the run quietly with a success status
fn install_interrupt_handler() -> Result<()> {
    ctrlc::set_handler(|| std::process::exit(0)).context("installing Ctrl-C handler")
}

/// Merge the optional config file with command-line flags; flags win
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_yaml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };

    config.include_extensions |= cli.ext;
    config.emit.strict_markers |= cli.strict;
    config.sources.offline |= cli.offline;
    if let Some(root) = &cli.root {
        config.root = root.clone();
    }
    if let Some(output) = &cli.output {
        config.output = output.clone();
    }
    if let Some(template) = &cli.template {
        config.emit.template = Some(template.clone());
    }
    if !cli.references.is_empty() {
        config.references = cli.references.clone();
    }

    Ok(config)
}

fn build_whitelist(config: &Config) -> Result<Whitelist> {
    let mut builder = WhitelistBuilder::new(&config.whitelist.reference_extensions)?;
    for path in &config.references {
        builder
            .add_path(path)
            .with_context(|| format!("scanning reference {}", path.display()))?;
    }
    Ok(builder.build())
}

fn run(config: &Config) -> Result<Summary> {
    let whitelist = build_whitelist(config)?;
    if !config.references.is_empty() {
        info!("Whitelisted {} symbols", whitelist.len());
    }

    for dir in config.layout_dirs() {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }

    let downloader = Downloader::new(&config.sources.user_agent, config.sources.offline)?;
    downloader.fetch(&config.sources.glcorearb_url, &config.glcorearb_path())?;
    downloader.fetch(&config.sources.khrplatform_url, &config.khrplatform_path())?;

    let scanner = HeaderScanner::new(ScanOptions {
        include_extensions: config.effective_extensions(),
        extension_suffixes: config.extension_suffixes.clone(),
    })?;
    let scan = scanner
        .scan_file(&config.glcorearb_path(), &whitelist)
        .with_context(|| format!("parsing {}", config.glcorearb_path().display()))?;

    info!("Generating {}...", config.output.display());
    let template = match &config.emit.template {
        Some(path) => Template::from_file(path)
            .with_context(|| format!("loading template {}", path.display()))?,
        None => Template::bundled(),
    };
    let header = template
        .strict(config.emit.strict_markers)
        .render(&scan.functions, &scan.text)?;

    if let Some(parent) = config.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&config.output, header)
        .with_context(|| format!("writing {}", config.output.display()))?;

    Ok(Summary {
        output: config.output.clone(),
        whitelist_size: whitelist.len(),
        functions: scan.functions,
        stats: scan.stats,
    })
}

fn render_summary(summary: &Summary, format: &str) -> Result<String> {
    let out = match format {
        "json" => serde_json::to_string_pretty(summary)?,
        "text" => {
            let mut lines = vec![
                format!("Wrote {}", summary.output.display()),
                format!("   Functions: {}", summary.stats.functions_kept),
                format!("   Constants: {}", summary.stats.constants_kept),
                format!(
                    "   Dropped: {} functions, {} constants, {} pointer types",
                    summary.stats.functions_dropped,
                    summary.stats.constants_dropped,
                    summary.stats.pointer_types_dropped
                ),
                format!("   Culled blocks: {}", summary.stats.blocks_culled),
            ];
            if summary.whitelist_size > 0 {
                lines.push(format!("   Whitelist: {} symbols", summary.whitelist_size));
            }
            lines.join("\n")
        }
        _ => format!("Unknown format: {}", format),
    };
    Ok(out)
}
