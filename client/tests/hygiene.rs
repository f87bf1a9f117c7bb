//! Hygiene budgets for the client's production sources.
//!
//! Each scan counts lines under `client/src/` (sibling `_test.rs` files
//! excluded) that contain a banned pattern. Budgets only ever go down.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::{Path, PathBuf};

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
    /// Lines containing this text are not counted.
    exempt: Option<&'static str>,
}

const BUDGETS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0, why: "panics on error", exempt: None },
    Budget { pattern: ".expect(", max: 0, why: "panics on error", exempt: None },
    Budget { pattern: "panic!(", max: 0, why: "crashes the caller", exempt: None },
    Budget { pattern: "unreachable!(", max: 0, why: "crashes the caller", exempt: None },
    Budget { pattern: "todo!(", max: 0, why: "unfinished stub", exempt: None },
    Budget { pattern: "unimplemented!(", max: 0, why: "unfinished stub", exempt: None },
    Budget { pattern: "let _ =", max: 0, why: "discards a result unseen", exempt: None },
    Budget {
        pattern: ".ok()",
        max: 0,
        why: "discards an error unseen",
        // An unset environment variable is the expected "use the default" case.
        exempt: Some("env::var("),
    },
    Budget { pattern: "#[allow(dead_code)]", max: 0, why: "hides unused code", exempt: None },
];

fn production_sources() -> Vec<(PathBuf, String)> {
    let mut files = Vec::new();
    walk(&Path::new(env!("CARGO_MANIFEST_DIR")).join("src"), &mut files);
    files
}

fn walk(dir: &Path, out: &mut Vec<(PathBuf, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, out);
            continue;
        }
        let is_rs = path.extension().is_some_and(|ext| ext == "rs");
        let is_test = path.to_string_lossy().ends_with("_test.rs");
        if is_rs && !is_test {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push((path, content));
            }
        }
    }
}

fn counted_lines(content: &str, pattern: &str, exempt: Option<&str>) -> usize {
    content
        .lines()
        .filter(|line| line.contains(pattern))
        .filter(|line| exempt.is_none_or(|text| !line.contains(text)))
        .count()
}

fn hits(files: &[(PathBuf, String)], pattern: &str, exempt: Option<&str>) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|(path, content)| {
            let count = counted_lines(content, pattern, exempt);
            (count > 0).then(|| (path.display().to_string(), count))
        })
        .collect()
}

fn check(pattern: &str) {
    let budget = BUDGETS.iter().find(|b| b.pattern == pattern).unwrap();
    let files = production_sources();
    assert!(!files.is_empty(), "no sources found under client/src");
    let found = hits(&files, pattern, budget.exempt);
    let count: usize = found.iter().map(|(_, n)| n).sum();
    let listing = found.iter().map(|(path, n)| format!("  {path}: {n}")).collect::<Vec<_>>().join("\n");
    assert!(
        count <= budget.max,
        "`{pattern}` ({}) budget exceeded: found {count}, max {}.\n{listing}",
        budget.why,
        budget.max
    );
}

#[test]
fn unwrap_budget() {
    check(".unwrap()");
}

#[test]
fn expect_budget() {
    check(".expect(");
}

#[test]
fn panic_budget() {
    check("panic!(");
}

#[test]
fn unreachable_budget() {
    check("unreachable!(");
}

#[test]
fn todo_budget() {
    check("todo!(");
}

#[test]
fn unimplemented_budget() {
    check("unimplemented!(");
}

#[test]
fn silent_discard_budget() {
    check("let _ =");
}

#[test]
fn dot_ok_budget() {
    check(".ok()");
}

#[test]
fn allow_dead_code_budget() {
    check("#[allow(dead_code)]");
}

#[test]
fn env_lookup_exemption_is_narrow() {
    let source = "let home = std::env::var(\"HOME\").ok();\nlet port = raw.parse::<u16>().ok();\n";
    assert_eq!(counted_lines(source, ".ok()", Some("env::var(")), 1);
    assert_eq!(counted_lines(source, ".ok()", None), 2);
}
