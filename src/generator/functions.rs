//! Helper functions available to every template.
//!
//! The set is closed: [`TemplateFunction::ALL`] is the only source of names the
//! render engine registers, and the load-time name check rejects templates that
//! call anything else.

use minijinja::{Environment, Error, ErrorKind};

use super::naming::capitalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateFunction {
    /// `sub(a, b)` → `a - b`
    Sub,
    /// `add(a, b)` → `a + b`
    Add,
    /// `replace(old, new, s)` → `s` with every `old` replaced by `new`
    Replace,
    /// `title(s)` → first character upper-cased, the rest lower-cased
    Title,
}

impl TemplateFunction {
    pub const ALL: [TemplateFunction; 4] = [
        TemplateFunction::Sub,
        TemplateFunction::Add,
        TemplateFunction::Replace,
        TemplateFunction::Title,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TemplateFunction::Sub => "sub",
            TemplateFunction::Add => "add",
            TemplateFunction::Replace => "replace",
            TemplateFunction::Title => "title",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    fn register(self, env: &mut Environment<'_>) {
        match self {
            TemplateFunction::Sub => env.add_function(self.name(), sub),
            TemplateFunction::Add => env.add_function(self.name(), add),
            TemplateFunction::Replace => {
                env.add_function(self.name(), |old: String, new: String, s: String| {
                    replace_all(&old, &new, &s)
                })
            }
            TemplateFunction::Title => env.add_function(self.name(), |s: String| title(&s)),
        }
    }
}

/// Register the whole library into `env`.
pub fn register_functions(env: &mut Environment<'_>) {
    for function in TemplateFunction::ALL {
        function.register(env);
    }
}

fn overflow(op: &str) -> Error {
    Error::new(ErrorKind::InvalidOperation, format!("integer overflow in {op}"))
}

pub fn sub(a: i64, b: i64) -> Result<i64, Error> {
    a.checked_sub(b).ok_or_else(|| overflow("sub"))
}

pub fn add(a: i64, b: i64) -> Result<i64, Error> {
    a.checked_add(b).ok_or_else(|| overflow("add"))
}

pub fn replace_all(old: &str, new: &str, s: &str) -> String {
    if old.is_empty() {
        return s.to_string();
    }
    s.replace(old, new)
}

/// Single-word title case: `"uSER"` → `"User"`, `"hello world"` → `"Hello world"`.
pub fn title(s: &str) -> String {
    capitalize(s)
}
