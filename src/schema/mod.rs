//! # Schema Module
//!
//! Table and column metadata consumed by the generator.
//!
//! The generator never talks to a database itself. A [`SchemaSource`] hands it
//! an ordered `Vec<Table>`; the bundled [`SnapshotSource`] reads the result of
//! `information_schema` queries serialized as JSON, maps every column type
//! through the configured [`Dialect`] and applies the include/exclude lists
//! from the database configuration.

mod dialect;
mod load;
mod types;

pub use dialect::*;
pub use load::*;
pub use types::*;
