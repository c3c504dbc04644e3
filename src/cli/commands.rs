use anyhow::{Context, Result};
use clap::Parser;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::load_or_create_config;
use crate::generator::{GenerationReport, Generator};
use crate::schema::SnapshotSource;

/// Configuration file used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Long options that may also be spelled with a single dash (`-config`).
const SINGLE_DASH_LONG: [&str; 3] = ["config", "templates", "verbose"];

/// Command-line interface for gencode
///
/// Renders the template directory against the configured schema into the
/// configured output directory.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "gencode", version)]
#[command(about = "Generate a backend project skeleton from a database schema", long_about = None)]
pub struct Cli {
    /// Path to the JSON configuration file; created with defaults when missing
    #[arg(long, env = "GENCODE_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Template root directory, overriding `template_config.root`
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Rewrite single-dash long options (`-config x`, `-config=x`) to their
/// double-dash form so existing invocations keep working.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            let Some(s) = arg.to_str() else {
                return arg;
            };
            let Some(rest) = s.strip_prefix('-').filter(|r| !r.starts_with('-')) else {
                return arg;
            };
            let name = rest.split_once('=').map_or(rest, |(name, _)| name);
            if SINGLE_DASH_LONG.contains(&name) {
                OsString::from(format!("-{s}"))
            } else {
                arg
            }
        })
        .collect()
}

/// Directory that relative paths in the configuration are resolved against.
pub fn config_base_dir(config_path: &Path) -> &Path {
    match config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// Run one generation as described by `cli`.
///
/// # Errors
///
/// Configuration, schema and generation failures, each with context.
pub fn run(cli: &Cli) -> Result<GenerationReport> {
    let (config, created) = load_or_create_config(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    if created {
        info!(path = %cli.config.display(), "using default configuration");
    }

    let base_dir = config_base_dir(&cli.config);
    let template_root = cli
        .templates
        .clone()
        .unwrap_or_else(|| base_dir.join(&config.template_config.root));

    let source = SnapshotSource::from_config(&config.db_config, base_dir)
        .context("Failed to set up schema source")?;
    let mut generator = match source {
        Some(source) => {
            info!(schema = %source.path().display(), "reading schema snapshot");
            Generator::with_source(config, Box::new(source))
        }
        None => {
            warn!("no db_config.schema_file configured; rendering global templates only");
            Generator::new(config, Vec::new())
        }
    }
    .with_template_root(template_root);

    generator.init().context("Failed to initialize generator")?;
    let report = generator.generate().context("Code generation failed")?;
    Ok(report)
}

/// Run and print the confirmation line.
///
/// Logging must already be initialized by the caller.
pub fn run_cli(cli: Cli) -> Result<()> {
    let report = run(&cli)?;
    println!(
        "Code generation succeeded: {} files from {} templates for {} tables",
        report.files.len(),
        report.templates,
        report.tables
    );
    Ok(())
}
