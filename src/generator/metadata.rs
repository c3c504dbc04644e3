//! Template metadata: `@@Meta.*` directive lines embedded in template bodies.
//!
//! Three independent passes over the raw template text:
//!
//! 1. [`parse_output_directive`] looks for `@@Meta.Output=<path>` in the first
//!    [`DIRECTIVE_SCAN_LINES`] lines.
//! 2. [`references_table_scope`] scans the whole text for a tag that uses the
//!    `table` or `class_name` bindings; such templates render once per table.
//! 3. [`strip_metadata`] removes directive lines and leading blank lines before
//!    the body is compiled.

use once_cell::sync::Lazy;
use regex::Regex;

/// Number of leading lines searched for an output directive.
pub const DIRECTIVE_SCAN_LINES: usize = 10;

/// Prefix shared by every metadata line.
pub const METADATA_PREFIX: &str = "@@Meta.";

/// Directive overriding the derived output path.
pub const OUTPUT_DIRECTIVE: &str = "@@Meta.Output=";

/// Root bindings that only exist in per-table render contexts.
pub const TABLE_SCOPE_BINDINGS: [&str; 2] = ["table", "class_name"];

// A `{{ ... }}` or `{% ... %}` tag naming `table` or `class_name` as a root
// binding (not as an attribute like `config.table`).
#[allow(clippy::expect_used)]
static TABLE_SCOPE_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"\{{[{{%](?:[^}}]*?[^.\w])?(?:{})\b",
        TABLE_SCOPE_BINDINGS.join("|")
    );
    Regex::new(&pattern).expect("valid table scope regex")
});

/// An `@@Meta.Output` directive found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirective {
    /// 1-based line number of the directive
    pub line: usize,
    /// Directive value with surrounding quotes removed; may be empty
    pub value: String,
}

/// Find the output directive in the first [`DIRECTIVE_SCAN_LINES`] lines.
///
/// Scanning stops at the first directive.
pub fn parse_output_directive(content: &str) -> Option<OutputDirective> {
    content
        .lines()
        .take(DIRECTIVE_SCAN_LINES)
        .enumerate()
        .find_map(|(idx, line)| {
            line.trim()
                .strip_prefix(OUTPUT_DIRECTIVE)
                .map(|value| OutputDirective {
                    line: idx + 1,
                    value: value.trim().trim_matches('"').to_string(),
                })
        })
}

/// Whether the template uses per-table bindings anywhere, directives included.
pub fn references_table_scope(content: &str) -> bool {
    TABLE_SCOPE_RE.is_match(content)
}

/// Drop every `@@Meta.` line, then any blank lines left at the top.
///
/// All other lines, including interior blank lines and their line endings,
/// are kept byte for byte.
pub fn strip_metadata(content: &str) -> String {
    let kept: Vec<&str> = content
        .split('\n')
        .filter(|line| !line.trim().starts_with(METADATA_PREFIX))
        .skip_while(|line| line.trim().is_empty())
        .collect();
    kept.join("\n")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_directive_quoted_and_unquoted() {
        let quoted = "@@Meta.Output=\"src/{{ class_name }}.java\"\nbody";
        assert_eq!(
            parse_output_directive(quoted),
            Some(OutputDirective {
                line: 1,
                value: "src/{{ class_name }}.java".into()
            })
        );

        let bare = "\n   @@Meta.Output=pom.xml  \n";
        assert_eq!(parse_output_directive(bare).unwrap().value, "pom.xml");
        assert_eq!(parse_output_directive(bare).unwrap().line, 2);
    }

    #[test]
    fn test_directive_only_in_first_ten_lines() {
        let mut content = "x\n".repeat(DIRECTIVE_SCAN_LINES);
        content.push_str("@@Meta.Output=late.txt\n");
        assert!(parse_output_directive(&content).is_none());

        let mut content = "x\n".repeat(DIRECTIVE_SCAN_LINES - 1);
        content.push_str("@@Meta.Output=last.txt\n");
        assert_eq!(parse_output_directive(&content).unwrap().value, "last.txt");
    }

    #[test]
    fn test_first_directive_wins() {
        let content = "@@Meta.Output=a\n@@Meta.Output=b\n";
        assert_eq!(parse_output_directive(content).unwrap().value, "a");
    }

    #[test]
    fn test_empty_directive_value() {
        let d = parse_output_directive("@@Meta.Output=\"\"").unwrap();
        assert!(d.value.is_empty());
    }

    #[test]
    fn test_table_scope_detection() {
        assert!(references_table_scope("public class {{ class_name }} {}"));
        assert!(references_table_scope("{{table.name}}"));
        assert!(references_table_scope("{%- for f in table.fields %}{% endfor %}"));
        assert!(references_table_scope("@@Meta.Output=\"x/{{ class_name }}.java\"\nstatic"));
        assert!(!references_table_scope("{{ config.project_name }}"));
        assert!(!references_table_scope("{{ config.db_config.table_prefix }}"));
        assert!(!references_table_scope("{{ config.table }}"));
        assert!(!references_table_scope("plain table text"));
    }

    #[test]
    fn test_strip_metadata_preserves_body() {
        let content = "@@Meta.Output=\"a\"\n\n  \nline one\n\n  @@Meta.Other=1\n\tline two  \n";
        assert_eq!(strip_metadata(content), "line one\n\n\tline two  \n");
    }

    #[test]
    fn test_strip_metadata_without_directives() {
        let content = "a\r\n\r\nb";
        assert_eq!(strip_metadata(content), content);
        assert_eq!(strip_metadata(""), "");
    }
}
