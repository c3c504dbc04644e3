use serde::Serialize;

use super::dialect::Dialect;
use crate::error::SchemaError;
use crate::generator::to_camel_case;

/// A single column of a table, with the names templates use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Column name as stored in the database (`created_time`)
    pub column_name: String,
    /// Raw column type as reported by the database (`varchar(64)`)
    pub column_type: String,
    pub comment: String,
    pub is_nullable: bool,
    pub is_primary_key: bool,
    /// Target-language type derived from `column_type` (`String`, `Long`, ...)
    pub mapped_type_name: String,
    /// camelCase property name derived from `column_name` (`createdTime`)
    pub field_name: String,
}

impl Field {
    /// Build a field, deriving `field_name` and `mapped_type_name`.
    ///
    /// Both derived names depend only on the column name/type and the dialect,
    /// so regenerating from the same schema yields the same output.
    pub fn new(
        column_name: impl Into<String>,
        column_type: impl Into<String>,
        comment: impl Into<String>,
        is_nullable: bool,
        is_primary_key: bool,
        dialect: Dialect,
    ) -> Self {
        let column_name = column_name.into();
        let column_type = column_type.into();
        Self {
            field_name: to_camel_case(&column_name),
            mapped_type_name: dialect.map_type(&column_type).to_string(),
            column_name,
            column_type,
            comment: comment.into(),
            is_nullable,
            is_primary_key,
        }
    }
}

/// A table with its columns in ordinal order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub name: String,
    pub comment: String,
    pub fields: Vec<Field>,
    /// Copy of the primary key column, if the table has one
    pub primary_key: Option<Field>,
}

impl Table {
    /// Build a table, deriving `primary_key` from the fields.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MultiplePrimaryKeys`] when more than one field is
    /// flagged as primary key. Composite keys are not supported by the
    /// template model.
    pub fn new(
        name: impl Into<String>,
        comment: impl Into<String>,
        fields: Vec<Field>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        let mut keys = fields.iter().filter(|f| f.is_primary_key);
        let primary_key = keys.next().cloned();
        if keys.next().is_some() {
            return Err(SchemaError::MultiplePrimaryKeys { table: name });
        }
        Ok(Self {
            name,
            comment: comment.into(),
            fields,
            primary_key,
        })
    }
}
