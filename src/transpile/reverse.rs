//! Notation to Python pass.
//!
//! The glyph prefix encodes nesting depth directly, so a scalar indent level
//! replaces the threshold stack: it snaps down when a line carries fewer
//! glyphs and grows by one after each block-opening line.

use crate::classify::{classify_dncl, lexicon};
use crate::config::Config;
use crate::syntax::types::{ForRange, SourceLine, Statement};

/// Convert notation source to Python with default settings.
pub fn to_python(src: &str) -> String {
    to_python_with(src, &Config::default())
}

/// Convert notation source to Python.
pub fn to_python_with(src: &str, config: &Config) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut indent_level: usize = 0;
    // both 乱数() and 乱数(a,b) convert to random.* calls
    let needs_random = src.contains("乱数(");

    for raw in src.split('\n') {
        let line = SourceLine::from_dncl(raw);
        if line.is_blank() || line.is_comment() {
            out.push(raw.to_string());
            continue;
        }

        if line.depth < indent_level {
            indent_level = line.depth;
        }
        // else/elif lines carry the same glyph depth as their guarding もし
        // line, so the snap above already places them

        let converted = convert_line(line.content);
        let pad = " ".repeat(config.indent_width * indent_level);
        out.push(format!("{pad}{converted}"));

        if converted.ends_with(':') {
            indent_level += 1;
        }
    }

    if needs_random
        && !out
            .iter()
            .any(|l| l.trim() == "import random" || l.contains("from random import"))
    {
        out.insert(0, "import random".to_string());
    }

    out.join("\n")
}

fn convert_line(content: &str) -> String {
    match classify_dncl(content) {
        Statement::Blank | Statement::Comment(_) => content.to_string(),
        Statement::Print { args } => format!("print({})", lexicon::dncl_tokens_to_py(&args)),
        Statement::Input { target } => format!("{target} = int(input())"),
        Statement::If { cond } => format!("if {}:", lexicon::dncl_tokens_to_py(&cond)),
        Statement::Elif { cond } => format!("elif {}:", lexicon::dncl_tokens_to_py(&cond)),
        Statement::Else => "else:".to_string(),
        Statement::While { cond } => format!("while {}:", lexicon::dncl_tokens_to_py(&cond)),
        Statement::ForRange(range) => format_range_loop(&range),
        Statement::ArrayFill { name, value } => {
            let name = lexicon::decapitalize(&name);
            format!(
                "{name} = [{}] * len({name})",
                lexicon::dncl_tokens_to_py(&value)
            )
        }
        Statement::Assignment(text) | Statement::Other(text) => convert_plain(&text),
    }
}

fn format_range_loop(range: &ForRange) -> String {
    let start = lexicon::dncl_tokens_to_py(&range.start);
    let end = lexicon::dncl_tokens_to_py(&range.end);
    let step = lexicon::dncl_tokens_to_py(&range.step);
    if range.increasing {
        format!(
            "for {} in range({}, {}, {}):",
            range.var,
            start,
            inclusive_to_exclusive_up(&end),
            step
        )
    } else {
        format!(
            "for {} in range({}, {}, -{}):",
            range.var,
            start,
            inclusive_to_exclusive_down(&end),
            step
        )
    }
}

/// Inclusive notation bound back to Python's exclusive bound, counting up.
/// A symbolic bound sheds a literal `-1` suffix before anything is appended.
fn inclusive_to_exclusive_up(bound: &str) -> String {
    match bound.parse::<i64>() {
        Ok(n) => (n + 1).to_string(),
        Err(_) => bound
            .strip_suffix("-1")
            .map(str::to_string)
            .unwrap_or_else(|| format!("{bound}+1")),
    }
}

/// Inclusive notation bound back to the exclusive bound, counting down.
fn inclusive_to_exclusive_down(bound: &str) -> String {
    match bound.parse::<i64>() {
        Ok(n) => (n - 1).to_string(),
        Err(_) => bound
            .strip_suffix("+1")
            .map(str::to_string)
            .unwrap_or_else(|| format!("{bound}-1")),
    }
}

fn convert_plain(text: &str) -> String {
    let text = lexicon::commas_to_semicolons(text);
    let text = lexicon::dncl_tokens_to_py(&text);
    lexicon::decapitalize_array_assign(&text)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print() {
        assert_eq!(to_python("表示する(\"Hello\")"), "print(\"Hello\")");
    }

    #[test]
    fn test_input_marker() {
        assert_eq!(to_python("x = 【外部からの入力】"), "x = int(input())");
    }

    #[test]
    fn test_if_else_indentation() {
        let src = "もし a < b ならば:\n\
                   ｜ 表示する(\"x\")\n\
                   そうでなければ:\n\
                   ⎿ 表示する(\"y\")";
        let expected = "if a < b:\n    print(\"x\")\nelse:\n    print(\"y\")";
        assert_eq!(to_python(src), expected);
    }

    #[test]
    fn test_nested_dedent_snaps_down() {
        let src = "i を 0 から 2 まで 1 ずつ増やしながら繰り返す:\n\
                   ｜ もし i > 1 ならば:\n\
                   ⎿ ⎿ 表示する(i)\n\
                   表示する(\"done\")";
        let expected = "for i in range(0, 3, 1):\n    if i > 1:\n        print(i)\nprint(\"done\")";
        assert_eq!(to_python(src), expected);
    }

    #[test]
    fn test_while() {
        let src = "x > 0 の間繰り返す:\n⎿ x = x - 1";
        assert_eq!(to_python(src), "while x > 0:\n    x = x - 1");
    }

    #[test]
    fn test_range_increasing_reconstruction() {
        assert_eq!(
            to_python("i を 0 から 4 まで 1 ずつ増やしながら繰り返す:"),
            "for i in range(0, 5, 1):"
        );
    }

    #[test]
    fn test_range_decreasing_reconstruction() {
        assert_eq!(
            to_python("i を 10 から 1 まで 2 ずつ減らしながら繰り返す:"),
            "for i in range(10, 0, -2):"
        );
    }

    #[test]
    fn test_range_symbolic_bound_strips_suffix() {
        assert_eq!(
            to_python("i を 0 から n-1 まで 1 ずつ増やしながら繰り返す:"),
            "for i in range(0, n, 1):"
        );
        assert_eq!(
            to_python("i を 10 から m+1 まで 1 ずつ減らしながら繰り返す:"),
            "for i in range(10, m, -1):"
        );
    }

    #[test]
    fn test_random_import_injected_once() {
        let src = "d = 乱数(1,6)\n表示する(d)";
        assert_eq!(
            to_python(src),
            "import random\nd = random.randint(1, 6)\nprint(d)"
        );
    }

    #[test]
    fn test_random_import_not_duplicated() {
        let src = "import random\nd = 乱数()";
        assert_eq!(to_python(src), "import random\nd = random.random()");
    }

    #[test]
    fn test_no_random_no_import() {
        assert_eq!(to_python("x = 1"), "x = 1");
    }

    #[test]
    fn test_comments_pass_through() {
        assert_eq!(to_python("# note\n\nx = 1"), "# note\n\nx = 1");
    }

    #[test]
    fn test_multi_assignment() {
        assert_eq!(to_python("x = 1, y = 2"), "x = 1; y = 2");
    }

    #[test]
    fn test_array_fill() {
        assert_eq!(
            to_python("Numsのすべての値を0にする"),
            "nums = [0] * len(nums)"
        );
    }

    #[test]
    fn test_array_name_decapitalized() {
        assert_eq!(to_python("Data = [1, 2]"), "data = [1, 2]");
    }
}
