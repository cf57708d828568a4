//! Structural tests for layer boundary enforcement.
//!
//! These tests scan source files so a stray import fails fast instead of
//! slowly eroding the domain/application/infra split.

use std::path::{Path, PathBuf};

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Track brace depth and return whether a line is inside a `#[cfg(test)]` block.
struct CfgTestTracker {
    in_test_block: bool,
    brace_depth: i32,
    test_block_start_depth: i32,
}

impl CfgTestTracker {
    fn new() -> Self {
        Self {
            in_test_block: false,
            brace_depth: 0,
            test_block_start_depth: 0,
        }
    }

    fn process_line(&mut self, line: &str) -> bool {
        if line.trim().contains("#[cfg(test)]") {
            self.in_test_block = true;
            self.test_block_start_depth = self.brace_depth;
        }
        for ch in line.chars() {
            match ch {
                '{' => self.brace_depth += 1,
                '}' => {
                    self.brace_depth -= 1;
                    if self.in_test_block && self.brace_depth <= self.test_block_start_depth {
                        self.in_test_block = false;
                    }
                }
                _ => {}
            }
        }
        self.in_test_block
    }
}

fn src(sub: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src").join(sub)
}

/// Report every non-comment line under `dir` containing one of `needles`.
/// With `skip_tests`, lines inside `#[cfg(test)]` blocks are ignored.
fn scan(dir: &Path, needles: &[&str], skip_tests: bool) -> Vec<String> {
    let mut violations = Vec::new();
    for file in collect_rs_files(dir) {
        let Ok(content) = std::fs::read_to_string(&file) else {
            continue;
        };
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .display()
            .to_string();

        let mut tracker = CfgTestTracker::new();
        for (i, line) in content.lines().enumerate() {
            let in_test = tracker.process_line(line);
            let trimmed = line.trim();
            if trimmed.starts_with("//") || (skip_tests && in_test) {
                continue;
            }
            if let Some(needle) = needles.iter().find(|n| line.contains(**n)) {
                violations.push(format!("{rel}:{}: `{needle}`: {trimmed}", i + 1));
            }
        }
    }
    violations
}

#[test]
fn domain_is_pure() {
    let violations = scan(
        &src("domain"),
        &[
            "crate::application",
            "crate::infra",
            "crate::commands",
            "crate::output",
            "crate::app",
            "tokio::",
            "std::process",
            "std::fs",
        ],
        false,
    );
    assert!(
        violations.is_empty(),
        "domain/ must not perform I/O or depend on outer layers:\n{}",
        violations.join("\n")
    );
}

#[test]
fn application_depends_only_on_domain() {
    let violations = scan(
        &src("application"),
        &["crate::infra", "crate::commands", "crate::output", "crate::app::"],
        false,
    );
    assert!(
        violations.is_empty(),
        "application/ must not import infra, commands, or output:\n{}",
        violations.join("\n")
    );
}

#[test]
fn infra_has_no_imports_from_commands_or_output() {
    let violations = scan(&src("infra"), &["crate::commands", "crate::output"], false);
    assert!(
        violations.is_empty(),
        "infra/ must not import from commands/ or output/:\n{}",
        violations.join("\n")
    );
}

#[test]
fn infra_has_no_print_macros_outside_tests() {
    let violations = scan(&src("infra"), &["println!", "eprintln!"], true);
    assert!(
        violations.is_empty(),
        "infra/ must not use println!/eprintln! outside #[cfg(test)]:\n{}",
        violations.join("\n")
    );
}

#[test]
fn application_services_do_not_print() {
    let violations = scan(&src("application"), &["println!", "eprintln!"], true);
    assert!(
        violations.is_empty(),
        "services report through ProgressReporter, not print macros:\n{}",
        violations.join("\n")
    );
}

#[test]
fn no_tokio_command_runner_new_outside_infra() {
    let mut violations = Vec::new();
    for dir in ["domain", "application", "commands", "output"] {
        violations.extend(scan(&src(dir), &["TokioCommandRunner::new"], true));
    }
    assert!(
        violations.is_empty(),
        "TokioCommandRunner is constructed only in infra/ and app.rs:\n{}",
        violations.join("\n")
    );
}
