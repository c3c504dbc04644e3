use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::dialect::Dialect;
use super::types::{Field, Table};
use crate::config::DbConfig;
use crate::error::SchemaError;

/// Anything that can hand the generator an ordered list of tables.
///
/// Implementations must return tables in introspection order; the generator
/// never re-sorts them.
pub trait SchemaSource {
    fn load_tables(&self) -> Result<Vec<Table>, SchemaError>;
}

/// Tables already built in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource(pub Vec<Table>);

impl SchemaSource for StaticSource {
    fn load_tables(&self) -> Result<Vec<Table>, SchemaError> {
        Ok(self.0.clone())
    }
}

/// Include/exclude lists from the database configuration.
///
/// An empty include list admits every table; the exclude list always wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableFilter {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl TableFilter {
    pub fn admits(&self, table: &str) -> bool {
        let included = self.include.is_empty() || self.include.iter().any(|t| t == table);
        included && !self.exclude.iter().any(|t| t == table)
    }
}

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    tables: Vec<SnapshotTable>,
}

#[derive(Debug, Deserialize)]
struct SnapshotTable {
    name: String,
    #[serde(default)]
    comment: String,
    #[serde(default)]
    columns: Vec<SnapshotColumn>,
}

#[derive(Debug, Deserialize)]
struct SnapshotColumn {
    name: String,
    #[serde(rename = "type")]
    column_type: String,
    #[serde(default)]
    comment: String,
    #[serde(default)]
    nullable: bool,
    #[serde(default)]
    primary_key: bool,
}

/// Reads tables from a JSON schema snapshot.
///
/// ```json
/// { "tables": [ { "name": "user", "comment": "users", "columns": [
///     { "name": "id", "type": "bigint", "primary_key": true },
///     { "name": "email", "type": "varchar(128)", "nullable": true } ] } ] }
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
    dialect: Dialect,
    filter: TableFilter,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>, dialect: Dialect, filter: TableFilter) -> Self {
        Self {
            path: path.into(),
            dialect,
            filter,
        }
    }

    /// Build a source from the database configuration.
    ///
    /// Returns `Ok(None)` when no `schema_file` is configured.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnsupportedDialect`] for an unknown driver.
    pub fn from_config(db: &DbConfig, base_dir: &Path) -> Result<Option<Self>, SchemaError> {
        let Some(schema_file) = db.schema_file.as_deref().filter(|s| !s.is_empty()) else {
            return Ok(None);
        };
        let dialect = Dialect::from_driver(&db.driver_name)?;
        let filter = TableFilter {
            include: db.include_tables.clone(),
            exclude: db.exclude_tables.clone(),
        };
        Ok(Some(Self::new(base_dir.join(schema_file), dialect, filter)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SchemaSource for SnapshotSource {
    fn load_tables(&self) -> Result<Vec<Table>, SchemaError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| SchemaError::Read {
            path: self.path.clone(),
            source,
        })?;
        let snapshot: SnapshotFile =
            serde_json::from_str(&content).map_err(|source| SchemaError::Parse {
                path: self.path.clone(),
                source,
            })?;

        snapshot
            .tables
            .into_iter()
            .filter(|t| self.filter.admits(&t.name))
            .map(|t| {
                let fields = t
                    .columns
                    .into_iter()
                    .map(|c| {
                        Field::new(
                            c.name,
                            c.column_type,
                            c.comment,
                            c.nullable,
                            c.primary_key,
                            self.dialect,
                        )
                    })
                    .collect();
                Table::new(t.name, t.comment, fields)
            })
            .collect()
    }
}
