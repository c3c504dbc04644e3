//! Render context: the bindings a template evaluation sees.

use serde::Serialize;

use super::naming::{strip_table_prefix, to_pascal_case};
use crate::config::Config;
use crate::schema::Table;

/// Every root binding a template may reference.
///
/// `config` is always bound; the rest only in per-table renders.
pub const CONTEXT_BINDINGS: [&str; 11] = [
    "config",
    "table",
    "class_name",
    "entity_package",
    "mapper_package",
    "service_package",
    "controller_package",
    "enable_lombok",
    "enable_swagger",
    "author",
    "date",
];

/// The value bound into a template evaluation.
///
/// Built fresh for every render and never shared between renders.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext<'a> {
    pub config: &'a Config,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub table_scope: Option<TableScope<'a>>,
}

/// Bindings that exist only while rendering for a specific table.
#[derive(Debug, Clone, Serialize)]
pub struct TableScope<'a> {
    pub table: &'a Table,
    pub class_name: String,
    pub entity_package: &'a str,
    pub mapper_package: &'a str,
    pub service_package: &'a str,
    pub controller_package: &'a str,
    pub enable_lombok: bool,
    pub enable_swagger: bool,
    pub author: &'a str,
    pub date: &'a str,
}

impl<'a> RenderContext<'a> {
    /// Context for a template rendered once per run.
    pub fn global(config: &'a Config) -> Self {
        Self {
            config,
            table_scope: None,
        }
    }

    /// Context for rendering a per-table template for `table`.
    pub fn for_table(config: &'a Config, table: &'a Table) -> Self {
        let packages = &config.package_config;
        let gen = &config.gen_config;
        Self {
            config,
            table_scope: Some(TableScope {
                table,
                class_name: class_name(config, &table.name),
                entity_package: &packages.entity_package,
                mapper_package: &packages.mapper_package,
                service_package: &packages.service_package,
                controller_package: &packages.controller_package,
                enable_lombok: gen.enable_lombok,
                enable_swagger: gen.enable_swagger,
                author: &gen.author,
                date: &gen.date,
            }),
        }
    }

    /// Name of the table being rendered, if any.
    pub fn table_name(&self) -> Option<&str> {
        self.table_scope.as_ref().map(|s| s.table.name.as_str())
    }
}

/// Class name for a table: PascalCase, after optional prefix stripping.
pub fn class_name(config: &Config, table_name: &str) -> String {
    let name = if config.gen_config.strip_table_prefix {
        strip_table_prefix(table_name, &config.db_config.table_prefix)
    } else {
        table_name
    };
    to_pascal_case(name)
}
