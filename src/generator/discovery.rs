//! Template discovery: walks the template root and builds a descriptor per template file.

use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use super::metadata::{parse_output_directive, references_table_scope};
use crate::config::TemplateConfig;
use crate::error::DiscoveryError;

/// Routing information for one template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescriptor {
    /// Template file on disk
    pub source_path: PathBuf,
    /// Output path, itself a template, relative to the output root
    pub output_path_template: String,
    /// Render once per table instead of once per run
    pub is_per_table: bool,
}

/// Walk `root` and describe every template in file-name order.
///
/// # Errors
///
/// Fails on the first unreadable entry or malformed directive.
pub fn discover_templates(
    root: &Path,
    options: &TemplateConfig,
) -> Result<Vec<TemplateDescriptor>, DiscoveryError> {
    if !root.is_dir() {
        return Err(DiscoveryError::MissingRoot {
            root: root.to_path_buf(),
        });
    }

    let mut descriptors = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| DiscoveryError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name();
        if !name
            .as_encoded_bytes()
            .ends_with(options.suffix.as_bytes())
        {
            continue;
        }
        if name.to_str().is_none() {
            return Err(DiscoveryError::NonUtf8Name {
                path: entry.path().to_path_buf(),
            });
        }
        let descriptor = describe_template(root, entry.path(), options)?;
        debug!(
            template = %descriptor.source_path.display(),
            output = %descriptor.output_path_template,
            per_table = descriptor.is_per_table,
            "discovered template"
        );
        descriptors.push(descriptor);
    }
    Ok(descriptors)
}

/// Build the descriptor for a single template under `root`.
pub fn describe_template(
    root: &Path,
    path: &Path,
    options: &TemplateConfig,
) -> Result<TemplateDescriptor, DiscoveryError> {
    let content = std::fs::read_to_string(path).map_err(|source| DiscoveryError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let output_path_template = match parse_output_directive(&content) {
        Some(directive) if directive.value.is_empty() => {
            return Err(DiscoveryError::MalformedDirective {
                path: path.to_path_buf(),
                line: directive.line,
            });
        }
        Some(directive) => directive.value,
        None => derive_output_path(root, path, options),
    };

    Ok(TemplateDescriptor {
        source_path: path.to_path_buf(),
        output_path_template,
        is_per_table: references_table_scope(&content),
    })
}

/// Output path for a template without an `@@Meta.Output` directive.
///
/// The template's path relative to `root`, `/`-separated, minus the suffix.
/// Paths under the language-source marker get `source_root` prepended.
pub fn derive_output_path(root: &Path, path: &Path, options: &TemplateConfig) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let joined = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");
    let output = joined
        .strip_suffix(options.suffix.as_str())
        .unwrap_or(&joined)
        .to_string();

    if !options.source_marker.is_empty() && output.starts_with(&options.source_marker) {
        format!("{}{}", options.source_root, output)
    } else {
        output
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::fs;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_derive_output_path() {
        let opts = TemplateConfig::default();
        let root = Path::new("/tpl");
        assert_eq!(
            derive_output_path(root, Path::new("/tpl/pom.xml.tpl"), &opts),
            "pom.xml"
        );
        assert_eq!(
            derive_output_path(root, Path::new("/tpl/resources/application.yml.tpl"), &opts),
            "resources/application.yml"
        );
        assert_eq!(
            derive_output_path(root, Path::new("/tpl/java/App.java.tpl"), &opts),
            "/java/App.java"
        );
    }

    #[test]
    fn test_derive_output_path_custom_source_root() {
        let opts = TemplateConfig {
            source_root: "src/main/".into(),
            ..TemplateConfig::default()
        };
        assert_eq!(
            derive_output_path(Path::new("t"), Path::new("t/java/App.java.tpl"), &opts),
            "src/main/java/App.java"
        );
        assert_eq!(
            derive_output_path(Path::new("t"), Path::new("t/javadoc.md.tpl"), &opts),
            "javadoc.md"
        );
    }

    #[test]
    fn test_discover_sorted_and_classified() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "b/entity.java.tpl", "@@Meta.Output=\"e/{{ class_name }}.java\"\nclass");
        write(root, "a.txt.tpl", "{{ config.project_name }}");
        write(root, "README.md", "not a template");

        let found = discover_templates(root, &TemplateConfig::default()).unwrap();
        assert_eq!(found.len(), 2);

        assert_eq!(found[0].source_path, root.join("a.txt.tpl"));
        assert_eq!(found[0].output_path_template, "a.txt");
        assert!(!found[0].is_per_table);

        assert_eq!(found[1].output_path_template, "e/{{ class_name }}.java");
        assert!(found[1].is_per_table);
    }

    #[test]
    fn test_discover_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_templates(&dir.path().join("none"), &TemplateConfig::default())
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::MissingRoot { .. }));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_discover_rejects_non_utf8_template_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let name = OsStr::from_bytes(b"bad\xff.txt.tpl");
        fs::write(dir.path().join(name), "x").unwrap();
        write(dir.path(), "a.txt.tpl", "a");

        let err = discover_templates(dir.path(), &TemplateConfig::default()).unwrap_err();
        match err {
            DiscoveryError::NonUtf8Name { path } => assert_eq!(path, dir.path().join(name)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_discover_malformed_directive() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "x.tpl", "\n@@Meta.Output=\nbody");
        let err = discover_templates(dir.path(), &TemplateConfig::default()).unwrap_err();
        assert!(matches!(err, DiscoveryError::MalformedDirective { line: 2, .. }));
    }
}
