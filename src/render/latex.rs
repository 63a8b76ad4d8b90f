//! LaTeX text helpers

/// One level of namespace tree indentation
pub const INDENT_BLOCK: &str = "\\quad{}";

/// Escape underscores
pub fn escape(s: &str) -> String {
    s.replace('_', "\\_")
}

/// De-emphasized text
pub fn weak(s: &str) -> String {
    format!("\\emph{{\\color{{gray}}{}}}", s)
}

pub fn indent(level: usize) -> String {
    INDENT_BLOCK.repeat(level)
}

/// Cross-reference label of a type or namespace
pub fn label(name: &str) -> String {
    format!("sec:dsdl:{}", name)
}
