//! # gencode
//!
//! **gencode** renders a directory of templates into a backend project skeleton
//! for every table of a relational database schema: entity, mapper interface and
//! XML, service interface and implementation, controller, plus project files.
//!
//! ## Architecture
//!
//! - **[`config`]** - JSON configuration with defaults and bootstrap
//! - **[`schema`]** - `Table`/`Field` model, dialect type maps, schema sources
//! - **[`generator`]** - Template discovery, metadata, contexts, rendering and the run driver
//! - **[`cli`]** - Command-line entry point
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`error`]** - Typed errors for every stage
//!
//! ### Generation Flow
//!
//! ```text
//! config.json → Schema snapshot → Tables
//!                                   ↓
//! templates/ → Discovery → Load phase → Render (per table | once) → output/
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gencode::config::Config;
//! use gencode::generator::Generator;
//! use gencode::schema::{Dialect, Field, Table};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let user = Table::new(
//!     "user",
//!     "application users",
//!     vec![
//!         Field::new("id", "bigint", "", false, true, Dialect::MySql),
//!         Field::new("user_name", "varchar(64)", "login", false, false, Dialect::MySql),
//!     ],
//! )?;
//!
//! let mut generator = Generator::new(Config::default(), vec![user]).with_template_root("templates");
//! generator.init()?;
//! let report = generator.generate()?;
//! println!("wrote {} files", report.files.len());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod schema;
