#![allow(dead_code, clippy::unwrap_used)]

use gencode::config::Config;
use gencode::schema::{Dialect, Field, Table};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use walkdir::WalkDir;

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Creates a fresh directory under the system temp dir.
pub fn temp_dir(prefix: &str) -> PathBuf {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::SeqCst);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "{}_{}_{}_{}",
        prefix,
        std::process::id(),
        counter,
        nanos
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// The template set shipped with the crate.
pub fn bundled_templates() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")
}

pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// Default configuration writing into `out`, with a fixed date.
pub fn test_config(out: &Path) -> Config {
    let mut config = Config::default();
    config.project_name = "gentest".to_string();
    config.gen_config.output_path = out.to_string_lossy().into_owned();
    config.gen_config.author = "CodeGenerator".to_string();
    config.gen_config.date = "2024-01-15".to_string();
    config
}

pub fn user_table() -> Table {
    Table::new(
        "user",
        "user accounts",
        vec![
            Field::new("id", "bigint", "primary key", false, true, Dialect::MySql),
            Field::new("username", "varchar(64)", "login name", false, false, Dialect::MySql),
            Field::new("email", "varchar(128)", "email address", true, false, Dialect::MySql),
            Field::new("age", "int", "age", true, false, Dialect::MySql),
            Field::new("created_time", "datetime", "created at", false, false, Dialect::MySql),
        ],
    )
    .unwrap()
}

pub fn product_table() -> Table {
    Table::new(
        "product",
        "products",
        vec![
            Field::new("id", "bigint", "primary key", false, true, Dialect::MySql),
            Field::new("product_name", "varchar(128)", "name", false, false, Dialect::MySql),
            Field::new("price", "decimal(10,2)", "price", false, false, Dialect::MySql),
            Field::new("description", "text", "description", true, false, Dialect::MySql),
        ],
    )
    .unwrap()
}

/// Every file under `root`, keyed by its root-relative path.
pub fn read_tree(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            (rel, std::fs::read(e.path()).unwrap())
        })
        .collect()
}
