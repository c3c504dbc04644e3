//! snake_case → camelCase / PascalCase conversions used for field and class names.

/// Upper-case the first character and lower-case the rest.
pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Convert `snake_case` to `camelCase`.
///
/// The first segment is kept as-is; every following non-empty segment is
/// capitalized. Empty segments (`a__b`) are skipped.
///
/// ```
/// use gencode::generator::to_camel_case;
/// assert_eq!(to_camel_case("created_time"), "createdTime");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let mut parts = s.split('_');
    let mut out = parts.next().unwrap_or_default().to_string();
    for part in parts.filter(|p| !p.is_empty()) {
        out.push_str(&capitalize(part));
    }
    out
}

/// Convert `snake_case` to `PascalCase`, capitalizing every non-empty segment.
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .filter(|p| !p.is_empty())
        .map(capitalize)
        .collect()
}

/// Remove `prefix` from a table name, unless that would leave nothing.
pub fn strip_table_prefix<'a>(name: &'a str, prefix: &str) -> &'a str {
    match name.strip_prefix(prefix) {
        Some(rest) if !prefix.is_empty() && !rest.is_empty() => rest,
        _ => name,
    }
}
