//! # Generator Module
//!
//! The generator renders a directory of templates into a backend project
//! skeleton, once per database table or once per run.
//!
//! ## Architecture
//!
//! ```text
//! Generator → Discovery → Load phase → per descriptor × (tables | once) → Context → Render
//! ```
//!
//! 1. **Discovery** - Walks the template root in file-name order and builds a
//!    [`TemplateDescriptor`] for every `*.tpl` file
//! 2. **Metadata** - `@@Meta.Output=` picks the output path; tags that use
//!    `table` or `class_name` make a template per-table
//! 3. **Load phase** - Every body is stripped of metadata and compiled once,
//!    unknown names are rejected before anything is written
//! 4. **Rendering** - Output path and body are evaluated against a fresh
//!    [`RenderContext`] and streamed to disk
//!
//! ## Template Bindings
//!
//! Every render binds `config`. Per-table renders also bind `table`,
//! `class_name`, `entity_package`, `mapper_package`, `service_package`,
//! `controller_package`, `enable_lombok`, `enable_swagger`, `author` and `date`.
//!
//! Functions: `sub(a, b)`, `add(a, b)`, `replace(old, new, s)`, `title(s)`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gencode::config::Config;
//! use gencode::generator::Generator;
//!
//! let mut generator = Generator::new(Config::default(), tables)
//!     .with_template_root("templates");
//! generator.init()?;
//! let report = generator.generate()?;
//! println!("wrote {} files", report.files.len());
//! ```

mod context;
mod discovery;
mod driver;
mod functions;
mod metadata;
mod naming;
mod render;

pub use context::*;
pub use discovery::*;
pub use driver::*;
pub use functions::*;
pub use metadata::*;
pub use naming::{strip_table_prefix, to_camel_case, to_pascal_case};
pub use render::*;
