//! End-to-end transpiler properties over full programs.

use dncl_bridge::classify::lexicon;
use dncl_bridge::{SourceLang, detect_lang, to_dncl, to_python};

/// Round-trip helper for programs inside the modeled subset.
fn assert_round_trip(python: &str) {
    let notation = to_dncl(python);
    assert_eq!(
        to_python(&notation),
        python,
        "round trip failed; intermediate notation:\n{notation}"
    );
}

#[test]
fn test_round_trip_straight_line() {
    assert_round_trip("x = 1\ny = x + 2\nprint(y)");
}

#[test]
fn test_round_trip_if_else() {
    assert_round_trip("if a < b:\n    print(\"x\")\nelse:\n    print(\"y\")");
}

#[test]
fn test_round_trip_elif_chain() {
    assert_round_trip(
        "if a > 10:\n    print(1)\nelif a > 5:\n    print(2)\nelse:\n    print(3)",
    );
}

#[test]
fn test_round_trip_loop_with_branch() {
    assert_round_trip(
        "total = 0\n\
         for i in range(0, 5, 1):\n\
         \u{20}   if i % 2 == 0:\n\
         \u{20}       total += i\n\
         \u{20}   else:\n\
         \u{20}       total -= i\n\
         print(total)",
    );
}

#[test]
fn test_round_trip_depth_three() {
    assert_round_trip(
        "for i in range(0, 3, 1):\n\
         \u{20}   for j in range(0, 3, 1):\n\
         \u{20}       if i == j:\n\
         \u{20}           print(i)\n\
         print(\"done\")",
    );
}

#[test]
fn test_round_trip_while_with_input() {
    assert_round_trip(
        "guess = int(input())\n\
         while guess != 7:\n\
         \u{20}   guess = int(input())\n\
         print(\"done\")",
    );
}

#[test]
fn test_round_trip_keeps_comments_and_blanks() {
    assert_round_trip("# setup\n\nx = 1\n\n# output\nprint(x)");
}

#[test]
fn test_round_trip_operators() {
    assert_round_trip("q = a // b\nr = a % b\nn = len(data)");
}

#[test]
fn test_round_trip_array_fill() {
    assert_round_trip("nums = [0] * len(nums)");
}

// ─── Glyph placement ─────────────────────────────────────────────────────────

#[test]
fn test_guarded_body_keeps_block_open_before_else() {
    let notation = to_dncl("if a < b:\n    print(\"x\")\nelse:\n    print(\"y\")");
    let lines: Vec<&str> = notation.lines().collect();
    assert_eq!(lines[1], "｜ 表示する(\"x\")");
    assert_eq!(lines[3], "⎿ 表示する(\"y\")");
}

#[test]
fn test_depth_two_glyphs() {
    let notation = to_dncl(
        "for i in range(0, 3, 1):\n    if i > 1:\n        print(i)\nprint(\"done\")",
    );
    let lines: Vec<&str> = notation.lines().collect();
    assert_eq!(lines[1], "｜ もし i > 1 ならば:");
    assert_eq!(lines[2], "⎿ ⎿ 表示する(i)");
}

// ─── ForRange numeric policy ─────────────────────────────────────────────────

#[test]
fn test_range_two_arg_forward() {
    assert_eq!(
        to_dncl("for i in range(0, 5):"),
        "i を 0 から 4 まで 1 ずつ増やしながら繰り返す:"
    );
}

#[test]
fn test_range_two_arg_reverse_semantics() {
    assert_eq!(
        to_python("i を 0 から 4 まで 1 ずつ増やしながら繰り返す:"),
        "for i in range(0, 5, 1):"
    );
}

#[test]
fn test_range_decreasing_round_trip() {
    let python = "for i in range(10, 0, -2):\n    print(i)";
    let notation = to_dncl(python);
    assert_eq!(
        notation.lines().next().unwrap(),
        "i を 10 から 1 まで 2 ずつ減らしながら繰り返す:"
    );
    assert_eq!(to_python(&notation), python);
}

#[test]
fn test_range_symbolic_bound_round_trip_semantics() {
    let notation = to_dncl("for i in range(n):");
    assert_eq!(notation, "i を 0 から n-1 まで 1 ずつ増やしながら繰り返す:");
    assert_eq!(to_python(&notation), "for i in range(0, n, 1):");
}

// ─── Input marker ────────────────────────────────────────────────────────────

#[test]
fn test_input_marker_equivalence() {
    assert_eq!(to_dncl("x = int(input())"), "x = 【外部からの入力】");
    assert_eq!(to_dncl("x = input()"), "x = 【外部からの入力】");
    assert_eq!(to_python("x = 【外部からの入力】"), "x = int(input())");
}

// ─── Substitution idempotence ────────────────────────────────────────────────

#[test]
fn test_substitution_idempotent_end_to_end() {
    let samples = [
        "y = len(a) // 2 % 3",
        "d = random.randint(1, 6)",
        "v = int(s) + float(t)",
    ];
    for s in samples {
        let once = lexicon::py_tokens_to_dncl(s);
        assert_eq!(lexicon::py_tokens_to_dncl(&once), once);
    }
}

// ─── Random import ───────────────────────────────────────────────────────────

#[test]
fn test_random_import_synthesized() {
    let python = to_python("d = 乱数(1,6)");
    assert_eq!(python, "import random\nd = random.randint(1, 6)");
}

#[test]
fn test_import_random_drops_forward() {
    let notation = to_dncl("import random\nd = random.random()");
    assert_eq!(notation, "\nd = 乱数()");
}

// ─── Detection ───────────────────────────────────────────────────────────────

#[test]
fn test_detect_round_trip_output() {
    let python = "if a < b:\n    print(1)";
    let notation = to_dncl(python);
    assert_eq!(detect_lang(python), SourceLang::Python);
    assert_eq!(detect_lang(&notation), SourceLang::Dncl);
}
