//! Statement-level data structures shared by both transpile directions
//! and the flowchart deriver.

use std::fmt;
use std::str::FromStr;

/// Block-continuation prefix glyph in the notation.
pub const CONTINUE_GLYPH: char = '｜';
/// Block-closing prefix glyph in the notation.
pub const CLOSE_GLYPH: char = '⎿';

/// External-input placeholder token in the notation.
pub const INPUT_MARKER: &str = "【外部からの入力】";

// ─── SourceLang ──────────────────────────────────────────────────────────────

/// Which surface syntax a program text is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLang {
    Python,
    Dncl,
}

impl FromStr for SourceLang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "python" | "py" => Ok(SourceLang::Python),
            "dncl" => Ok(SourceLang::Dncl),
            other => Err(format!("unknown source language: {other}")),
        }
    }
}

// ─── SourceLine ──────────────────────────────────────────────────────────────

/// One physical input line: the raw text, the stripped statement content, and
/// the structural depth marker (indent columns for Python, prefix glyph count
/// for the notation). Immutable once read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub raw: &'a str,
    pub content: &'a str,
    pub depth: usize,
}

impl<'a> SourceLine<'a> {
    /// Read a Python line. Depth is the leading-whitespace column count.
    pub fn from_python(raw: &'a str) -> Self {
        let depth = raw.chars().take_while(|c| c.is_whitespace()).count();
        Self {
            raw,
            content: raw.trim(),
            depth,
        }
    }

    /// Read a notation line. Depth is the number of `｜`/`⎿` prefix glyphs;
    /// content is the text after the glyph/whitespace prefix.
    pub fn from_dncl(raw: &'a str) -> Self {
        let depth = raw
            .chars()
            .take_while(|c| *c == CONTINUE_GLYPH || *c == CLOSE_GLYPH || c.is_whitespace())
            .filter(|c| *c == CONTINUE_GLYPH || *c == CLOSE_GLYPH)
            .count();
        let content = raw
            .trim_start_matches(|c: char| {
                c == CONTINUE_GLYPH || c == CLOSE_GLYPH || c.is_whitespace()
            })
            .trim_end();
        Self {
            raw,
            content,
            depth,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.content.is_empty()
    }

    pub fn is_comment(&self) -> bool {
        self.content.starts_with('#')
    }
}

// ─── ForRange ────────────────────────────────────────────────────────────────

/// Unified counting-loop representation, in notation semantics: both bounds
/// inclusive, step always positive, direction carried separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForRange {
    pub var: String,
    pub start: String,
    pub end: String,
    pub step: String,
    pub increasing: bool,
}

// ─── Statement ───────────────────────────────────────────────────────────────

/// Classified form of one statement line. Derived per line, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Blank,
    Comment(String),
    Print { args: String },
    Input { target: String },
    If { cond: String },
    Elif { cond: String },
    Else,
    While { cond: String },
    ForRange(ForRange),
    ArrayFill { name: String, value: String },
    Assignment(String),
    Other(String),
}

impl Statement {
    /// True for statements that open an indented block.
    pub fn is_block_header(&self) -> bool {
        matches!(
            self,
            Statement::If { .. }
                | Statement::Elif { .. }
                | Statement::Else
                | Statement::While { .. }
                | Statement::ForRange(_)
        )
    }

    /// True for the loop constructs.
    pub fn is_loop(&self) -> bool {
        matches!(self, Statement::While { .. } | Statement::ForRange(_))
    }

    /// True for statements rendered as I/O nodes in a flowchart.
    pub fn is_io(&self) -> bool {
        matches!(self, Statement::Print { .. } | Statement::Input { .. })
    }
}

// ─── EdgeLabel ───────────────────────────────────────────────────────────────

/// Closed set of flowchart edge annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeLabel {
    Yes,
    No,
    Continue,
}

impl fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EdgeLabel::Yes => "Yes",
            EdgeLabel::No => "No",
            EdgeLabel::Continue => "continue",
        };
        f.write_str(s)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
