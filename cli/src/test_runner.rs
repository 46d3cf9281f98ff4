use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::outline::{self, Outline};

const FIXTURE_SUFFIX: &str = ".test.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Expectation {
    /// Expected canonical declaration headers, one per declaration.
    #[serde(default)]
    pub order: Option<Vec<String>>,

    /// Expected shebang after all replays.
    #[serde(default)]
    pub shebang: Option<String>,

    /// Expected validation errors, in order. Each entry is a substring of the
    /// error message. If present (even empty), the error count is checked.
    #[serde(default)]
    pub errors: Option<Vec<String>>,
}

/// The fixture part of a `.test.toml` file. The rest of the file is an outline.
#[derive(Debug, Deserialize)]
pub struct FixtureConfig {
    /// Human-readable test description.
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub expect: Expectation,
}

pub enum TestOutcome {
    Pass,
    Fail(String),
}

pub struct TestResult {
    pub path: PathBuf,
    pub description: Option<String>,
    pub outcome: TestOutcome,
}

fn run_single_test(path: &Path) -> TestResult {
    // 1. Read and parse the outline
    let (source, outline) = match outline::load(path) {
        Ok(pair) => pair,
        Err(e) => {
            return TestResult {
                path: path.to_path_buf(),
                description: None,
                outcome: TestOutcome::Fail(e.to_string()),
            };
        }
    };

    // 2. Parse the fixture expectations from the same document
    let config: FixtureConfig = match toml::from_str(&source) {
        Ok(c) => c,
        Err(e) => {
            return TestResult {
                path: path.to_path_buf(),
                description: None,
                outcome: TestOutcome::Fail(format!("fixture error: {}", e)),
            };
        }
    };

    let description = config.description.clone();
    let outcome = match check(&outline, &config.expect) {
        None => TestOutcome::Pass,
        Some(reason) => TestOutcome::Fail(reason),
    };

    TestResult {
        path: path.to_path_buf(),
        description,
        outcome,
    }
}

/// Build the script and compare it with the expectations. Returns `Some(reason)` on mismatch.
fn check(outline: &Outline, expect: &Expectation) -> Option<String> {
    let script = outline.build(0);

    if let Some(expected_order) = &expect.order {
        let actual: Vec<String> = script.declarations().iter().map(|d| d.to_string()).collect();
        if &actual != expected_order {
            return Some(format!(
                "order mismatch\n  expected:\n{}\n  actual:\n{}",
                indent_list(expected_order),
                indent_list(&actual)
            ));
        }
    }

    if let Some(expected_shebang) = &expect.shebang {
        if script.shebang() != Some(expected_shebang.as_str()) {
            return Some(format!(
                "shebang mismatch\n  expected: {}\n  actual:   {}",
                expected_shebang,
                script.shebang().unwrap_or("(none)")
            ));
        }
    }

    let errors: Vec<String> = match script.finalize() {
        Ok(_) => Vec::new(),
        Err(errors) => errors.iter().map(|e| e.to_string()).collect(),
    };

    match &expect.errors {
        None if !errors.is_empty() => Some(format!(
            "unexpected validation error(s):\n{}",
            indent_list(&errors)
        )),
        None => None,
        Some(expected) if expected.len() != errors.len() => Some(format!(
            "expected {} validation error(s), got {}\n  actual errors:\n{}",
            expected.len(),
            errors.len(),
            if errors.is_empty() {
                "    (none)".to_string()
            } else {
                indent_list(&errors)
            }
        )),
        Some(expected) => expected
            .iter()
            .zip(errors.iter())
            .enumerate()
            .find(|(_, (expected, actual))| !actual.contains(expected.as_str()))
            .map(|(i, (expected, actual))| {
                format!(
                    "error[{}]: expected message containing \"{}\", got: {}",
                    i, expected, actual
                )
            }),
    }
}

fn indent_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("    {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// All fixture files under `root`, recursively, sorted by path.
fn discover(root: &Path) -> Vec<PathBuf> {
    let mut fixtures = Vec::new();
    collect_fixtures(root, &mut fixtures);
    fixtures.sort();
    fixtures
}

fn collect_fixtures(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        tracing::warn!("cannot read fixture directory {}", dir.display());
        return;
    };
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            collect_fixtures(&path, out);
        } else if path.to_string_lossy().ends_with(FIXTURE_SUFFIX) {
            out.push(path);
        }
    }
}

fn paint(text: &str, code: &str, no_color: bool) -> String {
    if no_color {
        text.to_string()
    } else {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    }
}

/// Run every fixture file under `path` (or `path` itself if it is a file).
/// Returns the exit code: 0 if all pass, 1 otherwise.
pub fn run_tests(path: &Path, no_color: bool) -> i32 {
    let fixtures = if path.is_file() {
        vec![path.to_path_buf()]
    } else {
        discover(path)
    };

    if fixtures.is_empty() {
        eprintln!("no {} files found in {}", FIXTURE_SUFFIX, path.display());
        return 1;
    }

    let base = if path.is_file() {
        path.parent().unwrap_or(path)
    } else {
        path
    };
    let results: Vec<TestResult> = fixtures.iter().map(|f| run_single_test(f)).collect();
    for result in &results {
        let name = result.path.strip_prefix(base).unwrap_or(&result.path);
        let status = match result.outcome {
            TestOutcome::Pass => paint("PASS", "32", no_color),
            TestOutcome::Fail(_) => paint("FAIL", "31", no_color),
        };
        match &result.description {
            Some(description) => eprintln!("{}  {} ({})", status, name.display(), description),
            None => eprintln!("{}  {}", status, name.display()),
        }
    }

    let failures: Vec<(&Path, &str)> = results
        .iter()
        .filter_map(|result| match &result.outcome {
            TestOutcome::Fail(reason) => Some((result.path.as_path(), reason.as_str())),
            TestOutcome::Pass => None,
        })
        .collect();
    for (fixture, reason) in &failures {
        eprintln!();
        eprintln!("{}:", fixture.display());
        for line in reason.lines() {
            eprintln!("  {}", line);
        }
    }

    let failed = failures.len();
    let passed = results.len() - failed;
    eprintln!();
    if failed == 0 {
        eprintln!("{}. {} passed, 0 failed", paint("ok", "32", no_color), passed);
        0
    } else {
        eprintln!(
            "{}. {} passed, {} failed",
            paint("FAILED", "31", no_color),
            passed,
            failed
        );
        1
    }
}
