//! The two transpilation passes and their shared block-structure
//! bookkeeping. All state is call-scoped; each pass builds its stack fresh
//! and returns a plain string, so concurrent conversions never interact.

pub mod forward;
pub mod reverse;

pub use forward::{to_dncl, to_dncl_with};
pub use reverse::{to_python, to_python_with};

use crate::config::Config;
use crate::syntax::types::{CLOSE_GLYPH, CONTINUE_GLYPH, INPUT_MARKER, SourceLang};

// ─── BlockStack ──────────────────────────────────────────────────────────────

/// Stack of open block thresholds, outermost first. The module level is an
/// implicit base entry that is never popped; thresholds above it are strictly
/// increasing.
#[derive(Debug, Clone)]
pub struct BlockStack {
    thresholds: Vec<usize>,
}

impl BlockStack {
    pub fn new() -> Self {
        Self { thresholds: vec![0] }
    }

    /// Resolve a dedent: drop every block whose threshold exceeds `indent`.
    pub fn pop_deeper_than(&mut self, indent: usize) {
        while self.thresholds.len() > 1 && indent < *self.thresholds.last().unwrap_or(&0) {
            self.thresholds.pop();
        }
    }

    /// Open a block at the given threshold.
    pub fn push(&mut self, threshold: usize) {
        debug_assert!(self.thresholds.last().is_some_and(|t| threshold > *t));
        self.thresholds.push(threshold);
    }

    /// Number of open blocks above the module level.
    pub fn depth(&self) -> usize {
        self.thresholds.len() - 1
    }

    /// Threshold of the open block at `level`, 0 = outermost.
    pub fn threshold(&self, level: usize) -> usize {
        self.thresholds[level + 1]
    }
}

impl Default for BlockStack {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Language detection and dispatch ─────────────────────────────────────────

/// Guess which syntax a program text is written in. Any notation keyword,
/// tree glyph, or the input marker marks the text as notation; plain text
/// defaults to Python.
pub fn detect_lang(src: &str) -> SourceLang {
    for line in src.lines() {
        let t = line.trim();
        if t.is_empty() || t.starts_with('#') {
            continue;
        }
        if t.contains(CONTINUE_GLYPH)
            || t.contains(CLOSE_GLYPH)
            || t.contains(INPUT_MARKER)
            || t.starts_with("もし ")
            || t.starts_with("そうでな")
            || t.starts_with("表示する(")
            || t.ends_with("繰り返す:")
            || t.contains("のすべての値を")
        {
            return SourceLang::Dncl;
        }
    }
    SourceLang::Python
}

/// Convert `src` out of the given source language into the other syntax.
pub fn transpile(src: &str, from: SourceLang) -> String {
    transpile_with(src, from, &Config::default())
}

/// `transpile` with explicit conversion settings.
pub fn transpile_with(src: &str, from: SourceLang, config: &Config) -> String {
    match from {
        SourceLang::Python => forward::to_dncl_with(src, config),
        SourceLang::Dncl => reverse::to_python_with(src, config),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
