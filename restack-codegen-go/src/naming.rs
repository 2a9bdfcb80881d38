//! Go identifier rules.

/// Go keywords and predeclared identifiers that cannot be rebound safely.
pub const GO_RESERVED: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var", "nil", "true", "false", "iota",
];

pub fn is_reserved(name: &str) -> bool {
    GO_RESERVED.contains(&name)
}

/// Identifier safe to declare, escaping reserved words with a trailing `_`.
pub fn safe_name(name: &str) -> String {
    if is_reserved(name) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}

/// Conventional receiver name: the lowercased first letter of the type.
pub fn receiver_name(type_name: &str) -> String {
    let first = type_name
        .trim_start_matches('*')
        .chars()
        .next()
        .map(|c| c.to_lowercase().collect::<String>())
        .unwrap_or_else(|| "r".to_string());
    safe_name(&first)
}
