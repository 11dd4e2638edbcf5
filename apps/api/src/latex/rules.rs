//! Static rule tables applied to layout assets.
//!
//! Two kinds of rules live here, both declared per template:
//! - [`Patch`]: a literal find/replace that corrects a known defect in a static
//!   layout. Applied unconditionally, before any data is injected.
//! - [`ElisionRule`]: a structural fingerprint of one section block. When the
//!   section's data is empty, every match is replaced by an inert comment so the
//!   document never contains a list environment with zero items.
//!
//! Both are data-independent until applied, so they are tested against the
//! layout assets directly.

use regex::{NoExpand, Regex};
use tracing::debug;

use crate::models::resume::{ResumeData, Section};

// ────────────────────────────────────────────────────────────────────────────
// Structural patches
// ────────────────────────────────────────────────────────────────────────────

/// A literal correction to a layout asset.
#[derive(Debug, Clone, Copy)]
pub struct Patch {
    pub find: &'static str,
    pub replace: &'static str,
}

impl Patch {
    pub const fn new(find: &'static str, replace: &'static str) -> Self {
        Self { find, replace }
    }
}

/// Applies `patches` in order. A patch whose target is absent is a no-op.
pub fn apply_patches(tex: &str, patches: &[Patch]) -> String {
    patches
        .iter()
        .fold(tex.to_string(), |acc, patch| acc.replace(patch.find, patch.replace))
}

// ────────────────────────────────────────────────────────────────────────────
// Section elision
// ────────────────────────────────────────────────────────────────────────────

/// When an elision rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The backing data for this section is empty.
    WhenEmpty(Section),
    /// The block's buffer is never populated, so it is always removed.
    Always,
}

/// Removes one section block from a layout when it would render empty.
#[derive(Debug)]
pub struct ElisionRule {
    /// Name used in the replacement comment (section title or buffer name).
    pub label: &'static str,
    pub trigger: Trigger,
    pub pattern: Regex,
}

impl ElisionRule {
    /// Builds a rule from a fingerprint pattern.
    ///
    /// Rules are built once from static pattern text, so an invalid pattern is a bug.
    pub fn new(label: &'static str, trigger: Trigger, pattern: &str) -> Self {
        let pattern = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("BUG: invalid elision pattern for {label}: {e}"));
        Self {
            label,
            trigger,
            pattern,
        }
    }

    pub fn fires_for(&self, data: &ResumeData) -> bool {
        match self.trigger {
            Trigger::WhenEmpty(section) => data.is_section_empty(section),
            Trigger::Always => true,
        }
    }

    /// The comment that replaces an elided block.
    pub fn replacement(&self) -> String {
        format!("% {} removed (empty)", self.label)
    }
}

/// Replaces every block whose rule fires for `data` with its comment.
pub fn apply_elisions(tex: &str, rules: &[ElisionRule], data: &ResumeData) -> String {
    let mut out = tex.to_string();
    for rule in rules.iter().filter(|r| r.fires_for(data)) {
        let replacement = rule.replacement();
        let replaced = rule.pattern.replace_all(&out, NoExpand(&replacement));
        if replaced != out {
            debug!("Elided empty section block: {}", rule.label);
        }
        out = replaced.into_owned();
    }
    out
}
