use crate::error::SchemaError;

/// Type used for any column type the lookup table does not know.
pub const FALLBACK_TYPE: &str = "String";

/// SQL dialect of the introspected database.
///
/// Decides how raw column types map onto the Java types used by the bundled
/// templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    MySql,
    Postgres,
}

impl Dialect {
    /// Resolve the dialect from the configured driver name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnsupportedDialect`] for unknown drivers.
    pub fn from_driver(driver: &str) -> Result<Self, SchemaError> {
        match driver.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "postgres" | "postgresql" | "pgx" => Ok(Dialect::Postgres),
            other => Err(SchemaError::UnsupportedDialect(other.to_string())),
        }
    }

    /// Map a raw column type (`varchar(64)`, `INT UNSIGNED`, ...) to a type name.
    ///
    /// Unknown types map to [`FALLBACK_TYPE`].
    pub fn map_type(self, column_type: &str) -> &'static str {
        let normalized = normalize_column_type(column_type);
        let mapped = match self {
            Dialect::MySql => map_mysql(&normalized),
            Dialect::Postgres => map_postgres(&normalized),
        };
        mapped.unwrap_or(FALLBACK_TYPE)
    }
}

/// Lower-case, drop `(n)`/`(p,s)` suffixes and MySQL's `unsigned`/`zerofill`.
pub fn normalize_column_type(column_type: &str) -> String {
    let lower = column_type.trim().to_ascii_lowercase();
    let without_len = match (lower.find('('), lower.find(')')) {
        (Some(open), Some(close)) if close > open => {
            format!("{}{}", &lower[..open], &lower[close + 1..])
        }
        _ => lower,
    };
    without_len
        .split_whitespace()
        .filter(|w| *w != "unsigned" && *w != "zerofill")
        .collect::<Vec<_>>()
        .join(" ")
}

fn map_mysql(ty: &str) -> Option<&'static str> {
    let mapped = match ty {
        "tinyint" | "smallint" | "mediumint" | "int" | "integer" => "Integer",
        "bigint" => "Long",
        "float" => "Float",
        "double" | "real" => "Double",
        "decimal" | "numeric" => "BigDecimal",
        "bit" | "bool" | "boolean" => "Boolean",
        "char" | "varchar" | "tinytext" | "text" | "mediumtext" | "longtext" | "enum" | "set"
        | "json" => "String",
        "date" | "datetime" | "timestamp" | "time" | "year" => "Date",
        "binary" | "varbinary" | "tinyblob" | "blob" | "mediumblob" | "longblob" => "byte[]",
        _ => return None,
    };
    Some(mapped)
}

fn map_postgres(ty: &str) -> Option<&'static str> {
    // `timestamp with time zone`, `time without time zone`, ...
    if ty.starts_with("timestamp") || ty.starts_with("time ") {
        return Some("Date");
    }
    let mapped = match ty {
        "smallint" | "int2" | "integer" | "int" | "int4" | "serial" | "smallserial" => "Integer",
        "bigint" | "int8" | "bigserial" => "Long",
        "real" | "float4" => "Float",
        "double precision" | "float8" => "Double",
        "numeric" | "decimal" | "money" => "BigDecimal",
        "boolean" | "bool" => "Boolean",
        "character varying" | "varchar" | "character" | "char" | "text" | "uuid" | "json"
        | "jsonb" | "citext" => "String",
        "date" | "time" => "Date",
        "bytea" => "byte[]",
        _ => return None,
    };
    Some(mapped)
}
