//! Template compilation and rendering into files under the output root.

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::context::{RenderContext, CONTEXT_BINDINGS};
use super::discovery::TemplateDescriptor;
use super::functions::{register_functions, TemplateFunction};
use super::metadata::strip_metadata;
use crate::error::{RenderError, RenderTarget};

/// Globals and loop bindings provided by the template engine itself.
const ENGINE_BINDINGS: [&str; 8] = [
    "range",
    "dict",
    "debug",
    "namespace",
    "loop",
    "caller",
    "varargs",
    "kwargs",
];

/// Compiles template bodies once and renders them into files under an output root.
pub struct RenderEngine {
    bodies: Environment<'static>,
    paths: Environment<'static>,
    output_root: PathBuf,
}

fn environment(undefined: UndefinedBehavior) -> Environment<'static> {
    let mut env = Environment::new();
    env.set_undefined_behavior(undefined);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_keep_trailing_newline(true);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    register_functions(&mut env);
    env
}

fn template_key(descriptor: &TemplateDescriptor) -> String {
    descriptor.source_path.to_string_lossy().into_owned()
}

/// Whether `name` can be resolved by a render.
pub fn is_known_binding(name: &str) -> bool {
    CONTEXT_BINDINGS.contains(&name)
        || ENGINE_BINDINGS.contains(&name)
        || TemplateFunction::from_name(name).is_some()
}

impl RenderEngine {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            bodies: environment(UndefinedBehavior::Strict),
            paths: environment(UndefinedBehavior::Strict),
            output_root: output_root.into(),
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Read, strip and compile a template body.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, the body does not parse, or the body
    /// references a name that is neither a context binding, a library function
    /// nor an engine global.
    pub fn load(&mut self, descriptor: &TemplateDescriptor) -> Result<(), RenderError> {
        let target = RenderTarget::new(&descriptor.source_path, None);
        let raw = fs::read_to_string(&descriptor.source_path).map_err(|source| {
            RenderError::Read {
                target: target.clone(),
                source,
            }
        })?;

        let key = template_key(descriptor);
        self.bodies
            .add_template_owned(key.clone(), strip_metadata(&raw))
            .map_err(|source| RenderError::Load {
                target: target.clone(),
                source,
            })?;
        let template = self
            .bodies
            .get_template(&key)
            .map_err(|source| RenderError::Load {
                target: target.clone(),
                source,
            })?;

        let mut unknown: Vec<String> = template
            .undeclared_variables(false)
            .into_iter()
            .filter(|name| !is_known_binding(name))
            .collect();
        unknown.sort();
        match unknown.into_iter().next() {
            Some(name) => Err(RenderError::UnknownName { target, name }),
            None => Ok(()),
        }
    }

    /// Evaluate the descriptor's output-path template and place it under the output root.
    pub fn resolve_output_path(
        &self,
        descriptor: &TemplateDescriptor,
        ctx: &RenderContext<'_>,
    ) -> Result<PathBuf, RenderError> {
        let target = || RenderTarget::new(&descriptor.source_path, ctx.table_name());
        let rendered = self
            .paths
            .render_str(&descriptor.output_path_template, ctx)
            .map_err(|source| RenderError::OutputPath {
                target: target(),
                source,
            })?;

        let mut path = self.output_root.clone();
        for segment in rendered.trim().split(['/', '\\']) {
            match segment {
                "" | "." => {}
                ".." => {
                    return Err(RenderError::PathEscapesRoot {
                        target: target(),
                        path: rendered.clone(),
                    })
                }
                s => path.push(s),
            }
        }
        Ok(path)
    }

    /// Render one file: resolve its path, create parent directories, stream the body.
    ///
    /// An existing file at the destination is truncated. Undefined attributes
    /// fail the render, so a misspelled field is a body error.
    pub fn render(
        &self,
        descriptor: &TemplateDescriptor,
        ctx: &RenderContext<'_>,
    ) -> Result<PathBuf, RenderError> {
        let target = || RenderTarget::new(&descriptor.source_path, ctx.table_name());
        let template = self
            .bodies
            .get_template(&template_key(descriptor))
            .map_err(|source| RenderError::Load {
                target: target(),
                source,
            })?;

        let path = self.resolve_output_path(descriptor, ctx)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|source| RenderError::CreateDir {
                target: target(),
                dir: dir.to_path_buf(),
                source,
            })?;
        }

        let file = File::create(&path).map_err(|source| RenderError::CreateFile {
            target: target(),
            path: path.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        template
            .render_captured_to(ctx, &mut writer)
            .map_err(|source| RenderError::Body {
                target: target(),
                source,
            })?;
        writer.flush().map_err(|source| RenderError::Write {
            target: target(),
            path: path.clone(),
            source,
        })?;

        debug!(
            template = %descriptor.source_path.display(),
            table = ctx.table_name().unwrap_or("-"),
            output = %path.display(),
            "rendered file"
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::config::Config;
    use crate::schema::{Dialect, Field, Table};

    fn descriptor(dir: &Path, name: &str, content: &str, output: &str) -> TemplateDescriptor {
        let source_path = dir.join(name);
        fs::write(&source_path, content).unwrap();
        TemplateDescriptor {
            source_path,
            output_path_template: output.to_string(),
            is_per_table: content.contains("class_name") || output.contains("class_name"),
        }
    }

    fn user() -> Table {
        Table::new(
            "user_info",
            "",
            vec![Field::new("id", "bigint", "", false, true, Dialect::MySql)],
        )
        .unwrap()
    }

    #[test]
    fn test_render_per_table_file() {
        let tpl = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let d = descriptor(
            tpl.path(),
            "e.tpl",
            "@@Meta.Output=\"{{ replace('.', '/', entity_package) }}/{{ class_name }}.java\"\n\nclass {{ class_name }} {}\n",
            "{{ replace('.', '/', entity_package) }}/{{ class_name }}.java",
        );
        let mut engine = RenderEngine::new(out.path());
        engine.load(&d).unwrap();

        let config = Config::default();
        let table = user();
        let path = engine
            .render(&d, &RenderContext::for_table(&config, &table))
            .unwrap();
        assert_eq!(path, out.path().join("com/example/entity/UserInfo.java"));
        assert_eq!(fs::read_to_string(path).unwrap(), "class UserInfo {}\n");
    }

    #[test]
    fn test_render_overwrites_existing_file() {
        let tpl = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let d = descriptor(tpl.path(), "a.tpl", "{{ config.project_name }}", "a.txt");
        fs::write(out.path().join("a.txt"), "stale content that is longer").unwrap();

        let mut engine = RenderEngine::new(out.path());
        engine.load(&d).unwrap();
        let config = Config::default();
        engine.render(&d, &RenderContext::global(&config)).unwrap();
        assert_eq!(fs::read_to_string(out.path().join("a.txt")).unwrap(), "demo");
    }

    #[test]
    fn test_leading_separator_stays_under_root() {
        let tpl = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let d = descriptor(tpl.path(), "a.tpl", "x", "/java/./App.java");
        let engine = RenderEngine::new(out.path());
        let config = Config::default();
        let path = engine
            .resolve_output_path(&d, &RenderContext::global(&config))
            .unwrap();
        assert_eq!(path, out.path().join("java").join("App.java"));
    }

    #[test]
    fn test_path_escaping_root_rejected() {
        let tpl = tempfile::tempdir().unwrap();
        let d = descriptor(tpl.path(), "a.tpl", "x", "../{{ config.project_name }}.txt");
        let engine = RenderEngine::new("out");
        let config = Config::default();
        let err = engine
            .resolve_output_path(&d, &RenderContext::global(&config))
            .unwrap_err();
        assert!(matches!(err, RenderError::PathEscapesRoot { .. }));
    }

    #[test]
    fn test_missing_path_binding_is_path_error() {
        let tpl = tempfile::tempdir().unwrap();
        let d = descriptor(tpl.path(), "a.tpl", "x", "{{ config.missing }}/a.txt");
        let engine = RenderEngine::new("out");
        let config = Config::default();
        let err = engine
            .resolve_output_path(&d, &RenderContext::global(&config))
            .unwrap_err();
        assert!(matches!(err, RenderError::OutputPath { .. }));
    }

    #[test]
    fn test_unknown_function_fails_at_load() {
        let tpl = tempfile::tempdir().unwrap();
        let d = descriptor(tpl.path(), "a.tpl", "{{ shout(config.author) }}", "a.txt");
        let mut engine = RenderEngine::new("out");
        let err = engine.load(&d).unwrap_err();
        assert!(matches!(err, RenderError::UnknownName { ref name, .. } if name == "shout"));
    }

    #[test]
    fn test_syntax_error_fails_at_load() {
        let tpl = tempfile::tempdir().unwrap();
        let d = descriptor(tpl.path(), "a.tpl", "{% if %}", "a.txt");
        let mut engine = RenderEngine::new("out");
        assert!(matches!(engine.load(&d), Err(RenderError::Load { .. })));
    }

    #[test]
    fn test_body_error_names_table() {
        let tpl = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let d = descriptor(
            tpl.path(),
            "a.tpl",
            "{{ class_name }}{{ sub(config.project_name, 1) }}",
            "{{ class_name }}.txt",
        );
        let mut engine = RenderEngine::new(out.path());
        engine.load(&d).unwrap();
        let config = Config::default();
        let table = user();
        let err = engine
            .render(&d, &RenderContext::for_table(&config, &table))
            .unwrap_err();
        assert!(matches!(err, RenderError::Body { .. }));
        assert_eq!(err.target().table.as_deref(), Some("user_info"));
    }

    #[test]
    fn test_misspelled_attribute_is_body_error() {
        let tpl = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let d = descriptor(tpl.path(), "a.tpl", "[{{ config.projct_name }}]", "a.txt");
        let mut engine = RenderEngine::new(out.path());
        engine.load(&d).unwrap();
        let config = Config::default();
        let err = engine
            .render(&d, &RenderContext::global(&config))
            .unwrap_err();
        assert!(matches!(err, RenderError::Body { .. }));
    }

    #[test]
    fn test_existing_attributes_render_in_conditions() {
        let tpl = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let d = descriptor(
            tpl.path(),
            "a.tpl",
            "{{ table.comment or class_name }}{% if table.primary_key %}:{{ table.primary_key.field_name }}{% endif %}",
            "{{ class_name }}.txt",
        );
        let mut engine = RenderEngine::new(out.path());
        engine.load(&d).unwrap();
        let config = Config::default();
        let table = user();
        let path = engine
            .render(&d, &RenderContext::for_table(&config, &table))
            .unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "UserInfo:id");
    }
}
