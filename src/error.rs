//! Error types for configuration, schema loading, template discovery and rendering.
//!
//! Every variant keeps its underlying cause as the error `source`, so the
//! binary can print the full chain with `{:#}` on an `anyhow::Error`.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while reading, parsing or bootstrapping the JSON configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write default config to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize config")]
    Serialize(#[source] serde_json::Error),
}

/// Failure while obtaining table metadata.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("unsupported database driver `{0}`")]
    UnsupportedDialect(String),
    #[error("failed to read schema snapshot {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse schema snapshot {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("table `{table}` declares more than one primary key column")]
    MultiplePrimaryKeys { table: String },
}

/// Failure while walking the template root or reading template metadata.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("template root {} does not exist", root.display())]
    MissingRoot { root: PathBuf },
    #[error("failed to walk template root {}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("failed to read template {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed metadata directive in {} at line {line}", path.display())]
    MalformedDirective { path: PathBuf, line: usize },
    #[error("template file name is not valid UTF-8: {}", path.display())]
    NonUtf8Name { path: PathBuf },
}

/// Identifies one render: the template and, for per-table renders, the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTarget {
    pub template: PathBuf,
    pub table: Option<String>,
}

impl RenderTarget {
    pub fn new(template: impl Into<PathBuf>, table: Option<&str>) -> Self {
        Self {
            template: template.into(),
            table: table.map(str::to_string),
        }
    }
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "template {}", self.template.display())?;
        if let Some(table) = &self.table {
            write!(f, " (table `{table}`)")?;
        }
        Ok(())
    }
}

/// Failure while loading or rendering a single template.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to read {target}")]
    Read {
        target: RenderTarget,
        #[source]
        source: io::Error,
    },
    #[error("failed to load {target}")]
    Load {
        target: RenderTarget,
        #[source]
        source: minijinja::Error,
    },
    #[error("{target} references unknown name `{name}`")]
    UnknownName { target: RenderTarget, name: String },
    #[error("failed to resolve output path for {target}")]
    OutputPath {
        target: RenderTarget,
        #[source]
        source: minijinja::Error,
    },
    #[error("output path `{path}` of {target} escapes the output root")]
    PathEscapesRoot { target: RenderTarget, path: String },
    #[error("failed to create directory {} for {target}", dir.display())]
    CreateDir {
        target: RenderTarget,
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to create file {} for {target}", path.display())]
    CreateFile {
        target: RenderTarget,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to render body of {target}")]
    Body {
        target: RenderTarget,
        #[source]
        source: minijinja::Error,
    },
    #[error("failed to write {} for {target}", path.display())]
    Write {
        target: RenderTarget,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RenderError {
    pub fn target(&self) -> &RenderTarget {
        match self {
            RenderError::Read { target, .. }
            | RenderError::Load { target, .. }
            | RenderError::UnknownName { target, .. }
            | RenderError::OutputPath { target, .. }
            | RenderError::PathEscapesRoot { target, .. }
            | RenderError::CreateDir { target, .. }
            | RenderError::CreateFile { target, .. }
            | RenderError::Body { target, .. }
            | RenderError::Write { target, .. } => target,
        }
    }
}

/// Top-level failure of a generation run.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("generator is {actual}, expected {expected}")]
    InvalidState {
        expected: &'static str,
        actual: &'static str,
    },
    #[error("failed to create output directory {}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("template discovery failed")]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

pub type GenerateResult<T> = Result<T, GenerateError>;
