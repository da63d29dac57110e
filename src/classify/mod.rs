//! Ordered-rule line classifier for both surface syntaxes.
//!
//! Each rule is a pure function from trimmed line text to an optional
//! captured statement; rules are tried from a fixed priority table, first
//! match wins. Several patterns are prefixes of others, so the order is part
//! of the contract.

use std::sync::LazyLock;

use regex::Regex;

use crate::syntax::types::{ForRange, Statement};

pub mod lexicon;

type Rule = fn(&str) -> Option<Statement>;

const PYTHON_RULES: &[Rule] = &[
    blank_or_comment,
    py_print,
    py_input,
    py_if,
    py_elif,
    py_else,
    py_while,
    py_for_range,
    py_array_fill,
];

const DNCL_RULES: &[Rule] = &[
    blank_or_comment,
    dncl_print,
    dncl_input,
    dncl_if,
    dncl_elif,
    dncl_else,
    dncl_while,
    dncl_for_range,
    dncl_array_fill,
];

/// Classify a trimmed Python line.
pub fn classify_python(line: &str) -> Statement {
    for rule in PYTHON_RULES {
        if let Some(stmt) = rule(line) {
            return stmt;
        }
    }
    fallback(line)
}

/// Classify a notation line with its glyph prefix already stripped.
pub fn classify_dncl(line: &str) -> Statement {
    for rule in DNCL_RULES {
        if let Some(stmt) = rule(line) {
            return stmt;
        }
    }
    fallback(line)
}

fn fallback(line: &str) -> Statement {
    if assignment_like(line) {
        Statement::Assignment(line.to_string())
    } else {
        Statement::Other(line.to_string())
    }
}

/// True when the line carries a bare or augmented `=` that is not part of a
/// comparison operator.
fn assignment_like(line: &str) -> bool {
    let chars: Vec<char> = line.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if c != '=' {
            continue;
        }
        let prev = if i > 0 { chars[i - 1] } else { ' ' };
        let next = chars.get(i + 1).copied().unwrap_or(' ');
        if !matches!(prev, '=' | '<' | '>' | '!') && next != '=' {
            return true;
        }
    }
    false
}

// ─── Shared helpers ──────────────────────────────────────────────────────────

/// Byte index of the `)` matching the `(` at byte index `open`, if balanced.
pub fn matching_paren(s: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// If `line` is exactly `name(args)` with balanced parens, return `args`.
fn call_args<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(name)?;
    if !rest.starts_with('(') {
        return None;
    }
    let open = name.len();
    let close = matching_paren(line, open)?;
    if line[close + 1..].trim().is_empty() {
        Some(&line[open + 1..close])
    } else {
        None
    }
}

fn blank_or_comment(line: &str) -> Option<Statement> {
    if line.is_empty() {
        return Some(Statement::Blank);
    }
    if line.starts_with('#') {
        return Some(Statement::Comment(line.to_string()));
    }
    None
}

// ─── Python rules ────────────────────────────────────────────────────────────

static PY_INPUT_STMT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([A-Za-z_]\w*(?:\[[^\]]+\])?)\s*=\s*(?:int\(input\([^()]*\)\)|str\(input\([^()]*\)\)|float\(input\([^()]*\)\)|input\([^()]*\))$",
    )
    .unwrap()
});
static PY_FOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^for\s+(\w+)\s+in\s+range\((.*)\)\s*:$").unwrap());
static PY_FILL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)\s*=\s*\[\s*(.+?)\s*\]\s*\*\s*len\(\s*(\w+)\s*\)$").unwrap()
});

fn py_print(line: &str) -> Option<Statement> {
    let args = call_args(line, "print")?;
    Some(Statement::Print {
        args: args.to_string(),
    })
}

fn py_input(line: &str) -> Option<Statement> {
    let caps = PY_INPUT_STMT.captures(line)?;
    Some(Statement::Input {
        target: caps[1].to_string(),
    })
}

fn py_if(line: &str) -> Option<Statement> {
    let cond = line.strip_prefix("if ")?.strip_suffix(':')?;
    Some(Statement::If {
        cond: cond.trim().to_string(),
    })
}

fn py_elif(line: &str) -> Option<Statement> {
    let cond = line.strip_prefix("elif ")?.strip_suffix(':')?;
    Some(Statement::Elif {
        cond: cond.trim().to_string(),
    })
}

fn py_else(line: &str) -> Option<Statement> {
    (line == "else:").then_some(Statement::Else)
}

fn py_while(line: &str) -> Option<Statement> {
    let cond = line.strip_prefix("while ")?.strip_suffix(':')?;
    Some(Statement::While {
        cond: cond.trim().to_string(),
    })
}

fn py_for_range(line: &str) -> Option<Statement> {
    let caps = PY_FOR.captures(line)?;
    let var = caps[1].to_string();
    let params: Vec<&str> = caps[2].split(',').map(str::trim).collect();
    if params.iter().any(|p| p.is_empty()) {
        return None;
    }
    let (start, end, step, increasing) = match params.as_slice() {
        [n] => (
            "0".to_string(),
            exclusive_to_inclusive_up(n),
            "1".to_string(),
            true,
        ),
        [a, b] => (
            (*a).to_string(),
            exclusive_to_inclusive_up(b),
            "1".to_string(),
            true,
        ),
        [a, b, s] => {
            let step: i64 = s.parse().ok()?;
            match step {
                1.. => (
                    (*a).to_string(),
                    exclusive_to_inclusive_up(b),
                    step.to_string(),
                    true,
                ),
                0 => return None,
                _ => (
                    (*a).to_string(),
                    exclusive_to_inclusive_down(b),
                    (-step).to_string(),
                    false,
                ),
            }
        }
        _ => return None,
    };
    Some(Statement::ForRange(ForRange {
        var,
        start,
        end,
        step,
        increasing,
    }))
}

/// Exclusive Python bound to the notation's inclusive bound, counting up.
/// Non-literal bounds stay symbolic: `n` becomes the text `n-1`.
fn exclusive_to_inclusive_up(bound: &str) -> String {
    match bound.parse::<i64>() {
        Ok(n) => (n - 1).to_string(),
        Err(_) => format!("{bound}-1"),
    }
}

/// Exclusive Python bound to the inclusive bound, counting down.
fn exclusive_to_inclusive_down(bound: &str) -> String {
    match bound.parse::<i64>() {
        Ok(n) => (n + 1).to_string(),
        Err(_) => format!("{bound}+1"),
    }
}

fn py_array_fill(line: &str) -> Option<Statement> {
    let caps = PY_FILL.captures(line)?;
    if caps[1] != caps[3] {
        return None;
    }
    Some(Statement::ArrayFill {
        name: caps[1].to_string(),
        value: caps[2].to_string(),
    })
}

// ─── Notation rules ──────────────────────────────────────────────────────────

static DNCL_INPUT_STMT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_]\w*(?:\[[^\]]+\])?)\s*=\s*【外部からの入力】$").unwrap()
});
static DNCL_FOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)\s*を\s*(.+?)\s*から\s*(.+?)\s*まで\s*(.+?)\s*ずつ\s*(増やし|減らし)ながら繰り返す:$")
        .unwrap()
});
static DNCL_FILL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)のすべての値を(.+?)にする$").unwrap());

fn dncl_print(line: &str) -> Option<Statement> {
    let args = call_args(line, "表示する")?;
    Some(Statement::Print {
        args: args.to_string(),
    })
}

fn dncl_input(line: &str) -> Option<Statement> {
    let caps = DNCL_INPUT_STMT.captures(line)?;
    Some(Statement::Input {
        target: caps[1].to_string(),
    })
}

fn dncl_if(line: &str) -> Option<Statement> {
    let cond = line.strip_prefix("もし ")?.strip_suffix("ならば:")?;
    Some(Statement::If {
        cond: cond.trim().to_string(),
    })
}

fn dncl_elif(line: &str) -> Option<Statement> {
    let cond = line.strip_prefix("そうでなくもし ")?.strip_suffix("ならば:")?;
    Some(Statement::Elif {
        cond: cond.trim().to_string(),
    })
}

fn dncl_else(line: &str) -> Option<Statement> {
    (line == "そうでなければ:").then_some(Statement::Else)
}

fn dncl_while(line: &str) -> Option<Statement> {
    let cond = line.strip_suffix("の間繰り返す:")?;
    if cond.is_empty() {
        return None;
    }
    Some(Statement::While {
        cond: cond.trim().to_string(),
    })
}

fn dncl_for_range(line: &str) -> Option<Statement> {
    let caps = DNCL_FOR.captures(line)?;
    Some(Statement::ForRange(ForRange {
        var: caps[1].to_string(),
        start: caps[2].to_string(),
        end: caps[3].to_string(),
        step: caps[4].to_string(),
        increasing: &caps[5] == "増やし",
    }))
}

fn dncl_array_fill(line: &str) -> Option<Statement> {
    let caps = DNCL_FILL.captures(line)?;
    Some(Statement::ArrayFill {
        name: caps[1].to_string(),
        value: caps[2].to_string(),
    })
}

// ─── Tests ───────────────────────────────────────────────────────────────────
