//! Bidirectional token substitution between Python and notation surface
//! forms. Patterns are ordered: longer and more specific forms substitute
//! before shorter ones so a partial match never corrupts an argument list.

use std::sync::LazyLock;

use regex::Regex;

use super::matching_paren;
use crate::syntax::types::INPUT_MARKER;

static PY_WRAPPED_INPUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:int|str|float)\(input\([^()]*\)\)").unwrap());
static PY_BARE_INPUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\binput\([^()]*\)").unwrap());
static PY_RANDINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\brandom\.randint\(\s*([^,()]+?)\s*,\s*([^,()]+?)\s*\)").unwrap());
static PY_RANDOM_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\brandom(?:\.random)?\(\)").unwrap());
static PY_LEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\blen\(").unwrap());
static PY_INT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bint\(").unwrap());
static PY_STR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bstr\(").unwrap());
static PY_FLOAT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bfloat\(").unwrap());

static DNCL_RANDINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"乱数\(\s*([^,()]+?)\s*,\s*([^,()]+?)\s*\)").unwrap());

static ARRAY_LHS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([A-Z]\w*)\s*=").unwrap());
static MULTI_ASSIGN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^()]*=.*,.*=[^()]*").unwrap());
static SEMI_WS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r";\s*").unwrap());
static COMMA_WS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*").unwrap());

/// Substitute Python tokens with their notation counterparts.
///
/// Input-call forms go first so the cast tokens below never see an input
/// argument; `random.randint` goes before the no-argument random forms.
pub fn py_tokens_to_dncl(line: &str) -> String {
    let s = PY_WRAPPED_INPUT.replace_all(line, INPUT_MARKER);
    let s = PY_BARE_INPUT.replace_all(&s, INPUT_MARKER);
    let s = PY_RANDINT.replace_all(&s, "乱数($1,$2)");
    let s = PY_RANDOM_CALL.replace_all(&s, "乱数()");
    let s = PY_LEN.replace_all(&s, "要素数(");
    let s = PY_INT.replace_all(&s, "整数(");
    let s = PY_STR.replace_all(&s, "文字列(");
    let s = PY_FLOAT.replace_all(&s, "実数(");
    s.replace("//", "÷").replace('%', "％")
}

/// Substitute notation tokens back to Python. The external-input marker
/// becomes `int(input())` per the notation's published reading.
pub fn dncl_tokens_to_py(line: &str) -> String {
    let s = line.replace(INPUT_MARKER, "int(input())");
    let s = DNCL_RANDINT.replace_all(&s, "random.randint($1, $2)");
    s.replace("乱数()", "random.random()")
        .replace("要素数(", "len(")
        .replace("整数(", "int(")
        .replace("文字列(", "str(")
        .replace("実数(", "float(")
        .replace('÷', "//")
        .replace('％', "%")
}

/// Decompose an f-string argument (`f"a{x}b"`) into a comma-joined
/// literal/expression list (`"a", x, "b"`). The notation has no
/// interpolation syntax.
pub fn split_fstring(arg: &str) -> String {
    if arg.len() < 3 {
        return arg.to_string();
    }
    let inner = &arg[2..arg.len() - 1];
    let mut parts: Vec<String> = Vec::new();
    let mut literal = String::new();
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '{' {
            literal.push(c);
            continue;
        }
        let mut expr = String::new();
        let mut closed = false;
        for c2 in chars.by_ref() {
            if c2 == '}' {
                closed = true;
                break;
            }
            expr.push(c2);
        }
        if closed {
            if !literal.is_empty() {
                parts.push(format!("\"{literal}\""));
                literal.clear();
            }
            parts.push(expr);
        } else {
            // no closing brace: keep the rest as literal text
            literal.push('{');
            literal.push_str(&expr);
        }
    }
    if !literal.is_empty() {
        parts.push(format!("\"{literal}\""));
    }
    parts.join(", ")
}

/// Remove `str(...)` wrappers from print arguments, keeping the inner
/// expression. Balanced scan, so nested calls survive.
pub fn strip_str_calls(args: &str) -> String {
    let mut out = args.to_string();
    while let Some(pos) = find_str_call(&out) {
        let open = pos + 3;
        let Some(close) = matching_paren(&out, open) else {
            break;
        };
        let inner = out[open + 1..close].to_string();
        out.replace_range(pos..=close, &inner);
    }
    out
}

/// Leftmost `str(` occurrence sitting on a word boundary.
fn find_str_call(s: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(rel) = s[from..].find("str(") {
        let pos = from + rel;
        let boundary = pos == 0
            || s[..pos]
                .chars()
                .next_back()
                .is_none_or(|c| !(c.is_alphanumeric() || c == '_'));
        if boundary {
            return Some(pos);
        }
        from = pos + 4;
    }
    None
}

/// Uppercase the first letter of an identifier (notation arrays are
/// capitalized).
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) => c.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Lowercase the first letter of an identifier.
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) => c.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Capitalize the variable name of a list-literal assignment.
pub fn capitalize_array_assign(line: &str) -> String {
    if !line.contains(" = [") {
        return line.to_string();
    }
    let Some((lhs, _)) = line.split_once('=') else {
        return line.to_string();
    };
    let name = lhs.trim();
    if name.chars().next().is_some_and(|c| c.is_ascii_lowercase()) {
        line.replacen(name, &capitalize(name), 1)
    } else {
        line.to_string()
    }
}

/// Decapitalize a leading capitalized assignment target.
pub fn decapitalize_array_assign(line: &str) -> String {
    match ARRAY_LHS.captures(line) {
        Some(caps) => {
            let name = &caps[1];
            line.replacen(name, &decapitalize(name), 1)
        }
        None => line.to_string(),
    }
}

/// One-line multi-assignment, Python to notation: `x = 1; y = 2` becomes
/// `x = 1, y = 2`.
pub fn semicolons_to_commas(line: &str) -> String {
    SEMI_WS.replace_all(line, ", ").into_owned()
}

/// One-line multi-assignment, notation to Python. The paren-free gate keeps
/// the rewrite away from call argument lists; best effort only.
pub fn commas_to_semicolons(line: &str) -> String {
    if line.contains(',')
        && line.contains('=')
        && !line.contains('(')
        && MULTI_ASSIGN.is_match(line)
    {
        COMMA_WS.replace_all(line, "; ").into_owned()
    } else {
        line.to_string()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_py_tokens_basic() {
        assert_eq!(py_tokens_to_dncl("y = x // 2 % 3"), "y = x ÷ 2 ％ 3");
        assert_eq!(py_tokens_to_dncl("n = len(data)"), "n = 要素数(data)");
        assert_eq!(py_tokens_to_dncl("v = int(s)"), "v = 整数(s)");
        assert_eq!(py_tokens_to_dncl("v = float(s)"), "v = 実数(s)");
        assert_eq!(py_tokens_to_dncl("v = str(n)"), "v = 文字列(n)");
    }

    #[test]
    fn test_py_tokens_word_boundary() {
        // "print(" must not trip the "int(" rule
        assert_eq!(py_tokens_to_dncl("x = sprint(1)"), "x = sprint(1)");
        assert_eq!(py_tokens_to_dncl("x = mylen(1)"), "x = mylen(1)");
    }

    #[test]
    fn test_py_tokens_random_order() {
        assert_eq!(py_tokens_to_dncl("d = random.randint(1, 6)"), "d = 乱数(1,6)");
        assert_eq!(py_tokens_to_dncl("d = random.random()"), "d = 乱数()");
        assert_eq!(py_tokens_to_dncl("d = random()"), "d = 乱数()");
    }

    #[test]
    fn test_py_tokens_input_forms() {
        assert_eq!(
            py_tokens_to_dncl("x = int(input()) + 1"),
            format!("x = {INPUT_MARKER} + 1")
        );
        assert_eq!(
            py_tokens_to_dncl("x = input(\"name: \")"),
            format!("x = {INPUT_MARKER}")
        );
    }

    #[test]
    fn test_py_tokens_idempotent() {
        let samples = [
            "y = x // 2 % 3",
            "n = len(a) + int(b)",
            "d = random.randint(1, 6) + random.random()",
            "x = int(input())",
        ];
        for s in samples {
            let once = py_tokens_to_dncl(s);
            assert_eq!(py_tokens_to_dncl(&once), once, "not idempotent for {s}");
        }
    }

    #[test]
    fn test_dncl_tokens_basic() {
        assert_eq!(dncl_tokens_to_py("y = x ÷ 2 ％ 3"), "y = x // 2 % 3");
        assert_eq!(dncl_tokens_to_py("n = 要素数(data)"), "n = len(data)");
        assert_eq!(dncl_tokens_to_py("v = 文字列(n)"), "v = str(n)");
    }

    #[test]
    fn test_dncl_tokens_random() {
        assert_eq!(
            dncl_tokens_to_py("d = 乱数(1,6)"),
            "d = random.randint(1, 6)"
        );
        assert_eq!(dncl_tokens_to_py("d = 乱数()"), "d = random.random()");
    }

    #[test]
    fn test_dncl_tokens_marker() {
        assert_eq!(
            dncl_tokens_to_py(&format!("x = {INPUT_MARKER}")),
            "x = int(input())"
        );
    }

    #[test]
    fn test_round_trip_tokens() {
        let py = "y = len(a) // 2 % random.randint(1, 6)";
        assert_eq!(dncl_tokens_to_py(&py_tokens_to_dncl(py)), py);
    }

    #[test]
    fn test_split_fstring() {
        assert_eq!(split_fstring("f\"i = {i}\""), "\"i = \", i");
        assert_eq!(split_fstring("f\"{a}{b}\""), "a, b");
        assert_eq!(split_fstring("f\"plain\""), "\"plain\"");
        assert_eq!(split_fstring("f\"{x} end\""), "x, \" end\"");
    }

    #[test]
    fn test_split_fstring_unclosed_brace() {
        assert_eq!(split_fstring("f\"a{b\""), "\"a{b\"");
    }

    #[test]
    fn test_strip_str_calls() {
        assert_eq!(strip_str_calls("str(x)"), "x");
        assert_eq!(strip_str_calls("str(len(x))"), "len(x)");
        assert_eq!(strip_str_calls("\"n=\", str(n), str(m)"), "\"n=\", n, m");
        assert_eq!(strip_str_calls("mystr(x)"), "mystr(x)");
    }

    #[test]
    fn test_capitalize_array_assign() {
        assert_eq!(capitalize_array_assign("data = [1, 2]"), "Data = [1, 2]");
        assert_eq!(capitalize_array_assign("Data = [1, 2]"), "Data = [1, 2]");
        assert_eq!(capitalize_array_assign("x = 1"), "x = 1");
    }

    #[test]
    fn test_decapitalize_array_assign() {
        assert_eq!(decapitalize_array_assign("Data = [1, 2]"), "data = [1, 2]");
        assert_eq!(decapitalize_array_assign("data = [1, 2]"), "data = [1, 2]");
    }

    #[test]
    fn test_multi_assignment_both_ways() {
        assert_eq!(semicolons_to_commas("x = 1; y = 2"), "x = 1, y = 2");
        assert_eq!(commas_to_semicolons("x = 1, y = 2"), "x = 1; y = 2");
    }

    #[test]
    fn test_commas_left_alone_in_calls() {
        assert_eq!(commas_to_semicolons("x = f(1, 2)"), "x = f(1, 2)");
        assert_eq!(commas_to_semicolons("a, b"), "a, b");
    }
}
