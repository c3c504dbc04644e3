//! Generation driver: the run lifecycle from output layout to rendered files.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::context::RenderContext;
use super::discovery::discover_templates;
use super::render::RenderEngine;
use crate::config::{apply_default_date, Config};
use crate::error::{GenerateError, GenerateResult};
use crate::schema::{SchemaSource, Table};

/// Directory under the output root that holds Java sources.
pub const JAVA_SOURCE_DIR: &str = "src/main/java";

/// Lifecycle of a [`Generator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    Idle,
    Initialized,
    Generating,
    Done,
    Failed,
}

impl GeneratorState {
    pub fn as_str(self) -> &'static str {
        match self {
            GeneratorState::Idle => "idle",
            GeneratorState::Initialized => "initialized",
            GeneratorState::Generating => "generating",
            GeneratorState::Done => "done",
            GeneratorState::Failed => "failed",
        }
    }
}

impl fmt::Display for GeneratorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a successful [`Generator::generate`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Files written, in render order
    pub files: Vec<PathBuf>,
    /// Number of templates discovered
    pub templates: usize,
    /// Number of tables rendered against
    pub tables: usize,
}

/// Drives one generation run: output layout, template discovery and rendering.
///
/// ```text
/// Idle --init()--> Initialized --generate()--> Generating --> Done | Failed
///   ^                                                          |
///   +------------------------- reset() ------------------------+
/// ```
pub struct Generator {
    config: Config,
    tables: Vec<Table>,
    source: Option<Box<dyn SchemaSource>>,
    template_root: PathBuf,
    state: GeneratorState,
}

impl Generator {
    /// Generator over tables already in memory.
    ///
    /// An empty `gen_config.date` is filled with today's date.
    pub fn new(mut config: Config, tables: Vec<Table>) -> Self {
        apply_default_date(&mut config, chrono::Local::now().date_naive());
        let template_root = PathBuf::from(&config.template_config.root);
        Self {
            config,
            tables,
            source: None,
            template_root,
            state: GeneratorState::Idle,
        }
    }

    /// Generator whose tables are read from `source` during [`Generator::init`].
    pub fn with_source(config: Config, source: Box<dyn SchemaSource>) -> Self {
        let mut generator = Self::new(config, Vec::new());
        generator.source = Some(source);
        generator
    }

    /// Override the template root taken from `template_config.root`.
    #[must_use]
    pub fn with_template_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.template_root = root.into();
        self
    }

    pub fn state(&self) -> GeneratorState {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn template_root(&self) -> &Path {
        &self.template_root
    }

    pub fn output_root(&self) -> PathBuf {
        PathBuf::from(self.config.gen_config.output_root())
    }

    fn expect_state(&self, expected: GeneratorState) -> GenerateResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(GenerateError::InvalidState {
                expected: expected.as_str(),
                actual: self.state.as_str(),
            })
        }
    }

    /// Create the output layout and load tables from the schema source.
    ///
    /// # Errors
    ///
    /// [`GenerateError::InvalidState`] unless idle; otherwise directory or
    /// schema failures, which leave the generator `Failed`.
    pub fn init(&mut self) -> GenerateResult<()> {
        self.expect_state(GeneratorState::Idle)?;
        match self.prepare() {
            Ok(()) => {
                self.state = GeneratorState::Initialized;
                Ok(())
            }
            Err(e) => {
                self.state = GeneratorState::Failed;
                Err(e)
            }
        }
    }

    fn prepare(&mut self) -> GenerateResult<()> {
        let output_root = self.output_root();
        create_dir(&output_root)?;
        for package in self.config.package_config.artifact_packages() {
            create_dir(&package_dir(&output_root, package))?;
        }

        if let Some(source) = &self.source {
            self.tables = source.load_tables()?;
        }
        info!(
            output = %output_root.display(),
            tables = self.tables.len(),
            "generator initialized"
        );
        Ok(())
    }

    /// Render every discovered template.
    ///
    /// Per-table templates render once per table in source order; the rest
    /// render exactly once. The first error stops the run and leaves any
    /// files already written in place.
    pub fn generate(&mut self) -> GenerateResult<GenerationReport> {
        self.expect_state(GeneratorState::Initialized)?;
        self.state = GeneratorState::Generating;
        match self.run() {
            Ok(report) => {
                self.state = GeneratorState::Done;
                info!(
                    files = report.files.len(),
                    templates = report.templates,
                    tables = report.tables,
                    "generation complete"
                );
                Ok(report)
            }
            Err(e) => {
                self.state = GeneratorState::Failed;
                warn!(error = %e, "generation failed");
                Err(e)
            }
        }
    }

    fn run(&self) -> GenerateResult<GenerationReport> {
        let descriptors = discover_templates(&self.template_root, &self.config.template_config)?;
        if self.tables.is_empty() {
            debug!("no tables; only global templates will render");
        }

        let mut engine = RenderEngine::new(self.output_root());
        for descriptor in &descriptors {
            engine.load(descriptor)?;
        }

        let mut files = Vec::new();
        for descriptor in &descriptors {
            if descriptor.is_per_table {
                for table in &self.tables {
                    let ctx = RenderContext::for_table(&self.config, table);
                    files.push(engine.render(descriptor, &ctx)?);
                }
            } else {
                files.push(engine.render(descriptor, &RenderContext::global(&self.config))?);
            }
        }

        Ok(GenerationReport {
            files,
            templates: descriptors.len(),
            tables: self.tables.len(),
        })
    }

    /// Return a finished generator to `Idle` so it can run again.
    pub fn reset(&mut self) -> GenerateResult<()> {
        match self.state {
            GeneratorState::Done | GeneratorState::Failed => {
                self.state = GeneratorState::Idle;
                Ok(())
            }
            other => Err(GenerateError::InvalidState {
                expected: "done or failed",
                actual: other.as_str(),
            }),
        }
    }
}

/// `<root>/src/main/java/<package as path>`.
pub fn package_dir(output_root: &Path, package: &str) -> PathBuf {
    let mut dir = output_root.join(JAVA_SOURCE_DIR);
    for segment in package.split('.').filter(|s| !s.is_empty()) {
        dir.push(segment);
    }
    dir
}

fn create_dir(path: &Path) -> GenerateResult<()> {
    std::fs::create_dir_all(path).map_err(|source| GenerateError::OutputDir {
        path: path.to_path_buf(),
        source,
    })
}
