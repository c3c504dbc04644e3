//! # CLI Module
//!
//! Command-line entry point for the `gencode` binary.
//!
//! ```bash
//! gencode -config config.json
//! gencode --config project/config.json --templates my-templates -v
//! ```
//!
//! Options:
//! - `--config <FILE>` (also `-config`) - JSON configuration, default `config.json`;
//!   written with defaults when it does not exist
//! - `--templates <DIR>` - template root, overriding `template_config.root`
//! - `-v`, `--verbose` - debug-level logging
//!
//! Relative `db_config.schema_file` and `template_config.root` values are
//! resolved against the configuration file's directory; the output path is
//! taken as given.
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use gencode::cli::{normalize_args, run_cli, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(normalize_args(std::env::args_os()));
//! run_cli(cli)?;
//! ```

mod commands;


pub use commands::{config_base_dir, normalize_args, run, run_cli, Cli, DEFAULT_CONFIG_PATH};
