//! Python to notation pass.
//!
//! Walks physical lines, resolves dedents against the block stack, converts
//! each statement's text, and decides the tree-prefix glyph for every open
//! block by looking ahead to the next structurally significant line.

use super::BlockStack;
use crate::classify::{classify_python, lexicon};
use crate::config::Config;
use crate::syntax::types::{
    CLOSE_GLYPH, CONTINUE_GLYPH, ForRange, INPUT_MARKER, SourceLine, Statement,
};

/// Convert Python source to the notation with default settings.
pub fn to_dncl(src: &str) -> String {
    to_dncl_with(src, &Config::default())
}

/// Convert Python source to the notation.
pub fn to_dncl_with(src: &str, config: &Config) -> String {
    let lines: Vec<&str> = src.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut stack = BlockStack::new();

    for (i, raw) in lines.iter().enumerate() {
        let line = SourceLine::from_python(raw);
        if line.is_blank() || line.is_comment() {
            out.push((*raw).to_string());
            continue;
        }

        // dedents resolve before this line's own prefix is computed
        stack.pop_deeper_than(line.depth);

        let converted = convert_line(line.content);

        if stack.depth() > 0 {
            let (next_depth, next_content) = lookahead(&lines, i + 1);
            let mut prefix = String::new();
            for level in 0..stack.depth() {
                let threshold = stack.threshold(level);
                let mut closes = next_depth < threshold;
                // an else/elif continuation exactly one unit below the
                // threshold keeps its guarding block open
                if closes
                    && next_depth + config.indent_width == threshold
                    && (next_content.starts_with("else:") || next_content.starts_with("elif "))
                {
                    closes = false;
                }
                prefix.push(if closes { CLOSE_GLYPH } else { CONTINUE_GLYPH });
                prefix.push(' ');
            }
            out.push(format!("{prefix}{converted}"));
        } else {
            out.push(converted);
        }

        if line.content.ends_with(':') {
            stack.push(line.depth + config.indent_width);
        }
    }

    out.join("\n")
}

/// Depth and content of the next non-blank, non-comment line; end of input
/// reads as depth 0, which closes everything.
fn lookahead<'a>(lines: &[&'a str], from: usize) -> (usize, &'a str) {
    for raw in &lines[from..] {
        let line = SourceLine::from_python(raw);
        if line.is_blank() || line.is_comment() {
            continue;
        }
        return (line.depth, line.content);
    }
    (0, "")
}

fn convert_line(content: &str) -> String {
    // the notation has no import statement; the reverse pass re-synthesizes it
    if content.starts_with("import random") {
        return String::new();
    }
    match classify_python(content) {
        Statement::Blank | Statement::Comment(_) => content.to_string(),
        Statement::Print { args } => format!("表示する({})", convert_print_args(&args)),
        Statement::Input { target } => format!("{target} = {INPUT_MARKER}"),
        Statement::If { cond } => format!("もし {} ならば:", lexicon::py_tokens_to_dncl(&cond)),
        Statement::Elif { cond } => {
            format!("そうでなくもし {} ならば:", lexicon::py_tokens_to_dncl(&cond))
        }
        Statement::Else => "そうでなければ:".to_string(),
        Statement::While { cond } => {
            format!("{} の間繰り返す:", lexicon::py_tokens_to_dncl(&cond))
        }
        Statement::ForRange(range) => format_counting_loop(&range),
        Statement::ArrayFill { name, value } => format!(
            "{}のすべての値を{}にする",
            lexicon::capitalize(&name),
            lexicon::py_tokens_to_dncl(&value)
        ),
        Statement::Assignment(text) | Statement::Other(text) => convert_plain(&text),
    }
}

fn convert_print_args(args: &str) -> String {
    let args = args.trim();
    let decomposed = if (args.starts_with("f\"") && args.ends_with('"'))
        || (args.starts_with("f'") && args.ends_with('\''))
    {
        lexicon::split_fstring(args)
    } else {
        args.to_string()
    };
    // in print context str() wrappers are dropped, not renamed
    let stripped = lexicon::strip_str_calls(&decomposed);
    lexicon::py_tokens_to_dncl(&stripped)
}

fn format_counting_loop(range: &ForRange) -> String {
    let direction = if range.increasing { "増やし" } else { "減らし" };
    format!(
        "{} を {} から {} まで {} ずつ{}ながら繰り返す:",
        range.var,
        lexicon::py_tokens_to_dncl(&range.start),
        lexicon::py_tokens_to_dncl(&range.end),
        lexicon::py_tokens_to_dncl(&range.step),
        direction
    )
}

fn convert_plain(text: &str) -> String {
    let text = lexicon::semicolons_to_commas(text);
    let text = lexicon::py_tokens_to_dncl(&text);
    lexicon::capitalize_array_assign(&text)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
