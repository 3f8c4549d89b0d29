// src/lexer/tables/tokens.rs

/// Reserved words of the JavaScript lexer, in the order their token records
/// are laid out in the generated keyword array.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    // values
    "null",
    "false",
    "true",
    // operators
    "in",
    "typeof",
    "instanceof",
    "void",
    "new",
    "delete",
    "yield",
    // statements
    "var",
    "if",
    "else",
    "while",
    "do",
    "for",
    "break",
    "continue",
    "switch",
    "case",
    "default",
    "function",
    "return",
    "with",
    "try",
    "catch",
    "finally",
    "throw",
    // module
    "import",
    "export",
    // reserved words
    "this",
    "arguments",
    "eval",
    "await",
    "class",
    "const",
    "debugger",
    "enum",
    "extends",
    "implements",
    "interface",
    "let",
    "package",
    "private",
    "protected",
    "public",
    "static",
    "super",
];

pub const DEFAULT_TOKEN_PREFIX: &str = "NJS_TOKEN_";

/// Name of the keyword array that slot values point into.
pub const DEFAULT_DATA_NAME: &str = "njs_lexer_kws";

/// C enum constant for a keyword: anything outside `[A-Za-z0-9_]` becomes `_`,
/// the rest is uppercased.
pub fn token_enum_name(prefix: &str, keyword: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + keyword.len());
    out.push_str(prefix);
    for c in keyword.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push('_');
        }
    }
    out
}
