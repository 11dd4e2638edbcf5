//! Injection block builder.
//!
//! The injection block sits between a layout's preamble and its
//! `\begin{document}`. It overrides scalar commands with `\renewcommand` and
//! feeds section buffers through item directives (`\experience{..}{..}`), which
//! the layout defines to append to its buffers.

use super::escape::escape;

/// First line of every injection block.
pub const INJECTION_HEADER: &str = "\n%=== INJECTED DATA ===\n";

/// Placeholder item for list environments that would otherwise be empty.
pub const PLACEHOLDER_ITEM: &str = r"\item ~";

/// Accumulates generated LaTeX for one render call.
#[derive(Debug)]
pub struct Injection {
    buf: String,
}

impl Default for Injection {
    fn default() -> Self {
        Self::new()
    }
}

impl Injection {
    pub fn new() -> Self {
        Self {
            buf: INJECTION_HEADER.to_string(),
        }
    }

    /// `\renewcommand{\name}{<escaped value>}`.
    pub fn renew(&mut self, name: &str, value: &str) {
        self.renew_raw(name, &escape(value));
    }

    /// `\renewcommand{\name}{value}` for markup that is already escaped.
    pub fn renew_raw(&mut self, name: &str, value: &str) {
        self.buf.push_str(&format!("\\renewcommand{{\\{name}}}{{{value}}}\n"));
    }

    /// Starts a `\name{..}{..}` directive line. Call [`Directive::finish`] to end it.
    pub fn directive(&mut self, name: &str) -> Directive<'_> {
        self.buf.push('\\');
        self.buf.push_str(name);
        Directive { buf: &mut self.buf }
    }

    /// Appends a raw line (a newline is added).
    pub fn line(&mut self, raw: &str) {
        self.buf.push_str(raw);
        self.buf.push('\n');
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// One directive line under construction.
#[must_use = "a directive is only terminated by `finish`"]
pub struct Directive<'a> {
    buf: &'a mut String,
}

impl Directive<'_> {
    /// Appends `{<escaped text>}`.
    pub fn arg(self, text: &str) -> Self {
        let escaped = escape(text);
        self.raw(&escaped)
    }

    /// Appends `{markup}` without escaping.
    pub fn raw(self, markup: &str) -> Self {
        self.buf.push('{');
        self.buf.push_str(markup);
        self.buf.push('}');
        self
    }

    /// Appends `{}`.
    pub fn empty(self) -> Self {
        self.raw("")
    }

    pub fn finish(self) {
        self.buf.push('\n');
    }
}

/// `\item` lines for the non-empty entries of `items`, escaped.
///
/// Never returns an empty block: an itemize with zero items is a LaTeX error,
/// so an all-empty list yields the single [`PLACEHOLDER_ITEM`].
pub fn items_block(items: &[String]) -> String {
    let block = items
        .iter()
        .filter(|item| !item.is_empty())
        .map(|item| format!("\\item {}", escape(item)))
        .collect::<Vec<_>>()
        .join("\n");
    if block.is_empty() {
        PLACEHOLDER_ITEM.to_string()
    } else {
        block
    }
}

/// The non-empty bullets of an entry.
pub fn non_empty(items: &[String]) -> impl Iterator<Item = &str> {
    items.iter().map(String::as_str).filter(|s| !s.is_empty())
}

/// Joins the non-empty parts with `sep`.
pub fn join_present(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .copied()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}
