//! LaTeX escaping for user-supplied text.
//!
//! The table is ordered with the escape character first. It is applied in a
//! single scan over the input, so the braces and backslashes emitted by one
//! replacement are never seen by a later one.

/// Characters that LaTeX treats as control syntax, with their literal forms.
pub const ESCAPE_TABLE: &[(char, &str)] = &[
    ('\\', r"\textbackslash{}"),
    ('&', r"\&"),
    ('%', r"\%"),
    ('$', r"\$"),
    ('#', r"\#"),
    ('_', r"\_"),
    ('{', r"\{"),
    ('}', r"\}"),
    ('~', r"\textasciitilde{}"),
    ('^', r"\textasciicircum{}"),
];

/// Escapes `text` so it can be concatenated into a LaTeX body verbatim.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match ESCAPE_TABLE.iter().find(|(special, _)| *special == c) {
            Some((_, literal)) => out.push_str(literal),
            None => out.push(c),
        }
    }
    out
}
