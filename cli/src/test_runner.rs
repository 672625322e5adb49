use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use interpreter::Memory;

const TEST_SUFFIX: &str = ".test.toml";
const TEST_TABLE: &str = "test";

/// Expectations read from the `[test]` table of a `.test.toml` file. The rest
/// of the file is the program itself.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestConfig {
    /// Human-readable test description.
    #[serde(default)]
    pub description: Option<String>,

    /// Values written over the program's initial memory before it runs.
    #[serde(default)]
    pub set: Memory,

    /// Expected final memory, compared exactly.
    #[serde(default)]
    pub expect_memory: Option<Memory>,

    /// Expected runtime error: the error's Display string must contain this substring.
    #[serde(default)]
    pub expect_error: Option<String>,

    /// If true, the test expects the program to fail to load.
    #[serde(default)]
    pub expect_load_error: bool,
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

impl TestResult {
    fn label(&self) -> &str {
        self.description.as_deref().unwrap_or_else(|| {
            self.path
                .file_name()
                .and_then(|s| s.to_str())
                .map(|name| name.trim_end_matches(TEST_SUFFIX))
                .unwrap_or("?")
        })
    }
}

fn run_single_test(path: &Path) -> TestResult {
    let fail = |description: Option<String>, reason: String| TestResult {
        path: path.to_path_buf(),
        description,
        outcome: TestOutcome::Fail(reason),
    };

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => return fail(None, format!("cannot read file: {}", e)),
    };

    let mut table: toml::Table = match content.parse() {
        Ok(table) => table,
        Err(e) => return fail(None, format!("TOML parse error: {}", e.message().trim())),
    };

    let config = match table.remove(TEST_TABLE).map(TestConfig::deserialize) {
        None => TestConfig::default(),
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            return fail(None, format!("invalid [{}] table: {}", TEST_TABLE, e.message().trim()));
        }
    };
    let description = config.description.clone();

    let load_result = interpreter::program_from_table(table, 0);

    if config.expect_load_error {
        let outcome = match load_result {
            Err(_) => TestOutcome::Pass,
            Ok(_) => TestOutcome::Fail("expected load error, but loading succeeded".into()),
        };
        return TestResult {
            path: path.to_path_buf(),
            description,
            outcome,
        };
    }

    let program = match load_result {
        Ok(p) => p,
        Err(e) => return fail(description, format!("unexpected load error: {}", e)),
    };

    let exec_result = interpreter::execute_program_with(&program, config.set.clone());

    let failure = match (&config.expect_error, &config.expect_memory, exec_result) {
        (Some(expected_err), _, Err(runtime_err)) => {
            let err_str = runtime_err.to_string();
            if err_str.contains(expected_err.as_str()) {
                None
            } else {
                Some(format!(
                    "expected error containing \"{}\", got: {}",
                    expected_err, err_str
                ))
            }
        }
        (Some(expected_err), _, Ok(execution)) => Some(format!(
            "expected error containing \"{}\", but execution succeeded with {}",
            expected_err, execution.memory
        )),
        (None, _, Err(runtime_err)) => Some(format!("unexpected runtime error: {}", runtime_err)),
        (None, Some(expected), Ok(execution)) => {
            if execution.memory == *expected {
                None
            } else {
                Some(format!(
                    "memory mismatch\n  expected: {}\n  actual:   {}",
                    expected, execution.memory
                ))
            }
        }
        (None, None, Ok(_)) => None,
    };

    match failure {
        Some(reason) => fail(description, reason),
        None => TestResult {
            path: path.to_path_buf(),
            description,
            outcome: TestOutcome::Pass,
        },
    }
}

/// Discover `.test.toml` files grouped by category (subfolder relative to root).
/// Files directly in `root` get category "" (uncategorized).
fn discover_categorized(root: &Path) -> BTreeMap<String, Vec<PathBuf>> {
    let mut categories: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    if root.is_file() {
        categories.insert(String::new(), vec![root.to_path_buf()]);
        return categories;
    }
    collect_tests(root, root, &mut categories);
    for files in categories.values_mut() {
        files.sort();
    }
    categories
}

fn collect_tests(dir: &Path, root: &Path, out: &mut BTreeMap<String, Vec<PathBuf>>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_tests(&path, root, out);
        } else if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.ends_with(TEST_SUFFIX) {
                let category = path
                    .parent()
                    .and_then(|p| p.strip_prefix(root).ok())
                    .map(|p| p.to_string_lossy().replace('\\', "/"))
                    .unwrap_or_default();
                out.entry(category).or_default().push(path);
            }
        }
    }
}

fn category_label(category: &str) -> &str {
    if category.is_empty() { "(root)" } else { category }
}

/// List available categories for the given test path.
pub fn list_categories(path: &Path) {
    if path.is_file() {
        eprintln!("(single file, no categories)");
        return;
    }

    let categories = discover_categorized(path);
    if categories.is_empty() {
        eprintln!("no {} files found in {}", TEST_SUFFIX, path.display());
        return;
    }

    eprintln!("available categories:");
    for (cat, files) in &categories {
        eprintln!("  {} ({} tests)", category_label(cat), files.len());
    }
}

/// Keep the categories matching `requested` (a category or any of its parents).
fn select_categories<'a>(
    all: &'a BTreeMap<String, Vec<PathBuf>>,
    requested: &[String],
) -> BTreeMap<&'a str, &'a Vec<PathBuf>> {
    if requested.is_empty() {
        return all.iter().map(|(k, v)| (k.as_str(), v)).collect();
    }

    let mut filtered = BTreeMap::new();
    for requested in requested {
        let req = requested.trim_matches('/');
        let mut found = false;
        for (cat, files) in all {
            if cat == req || cat.starts_with(&format!("{}/", req)) {
                filtered.insert(cat.as_str(), files);
                found = true;
            }
        }
        if !found {
            eprintln!(
                "warning: category '{}' not found (available: {})",
                req,
                all.keys()
                    .map(|k| category_label(k))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
    }
    filtered
}

fn pass_label(no_color: bool) -> &'static str {
    if no_color { "PASS" } else { "\x1b[32mPASS\x1b[0m" }
}

fn fail_label(no_color: bool) -> &'static str {
    if no_color { "FAIL" } else { "\x1b[31mFAIL\x1b[0m" }
}

fn bold(s: &str, no_color: bool) -> String {
    if no_color {
        s.to_string()
    } else {
        format!("\x1b[1m{}\x1b[0m", s)
    }
}

/// Run all `.test.toml` files under `path` (or a single file).
/// If `categories` is non-empty, only run tests in those categories.
/// Returns exit code: 0 = all pass, 1 = any failure.
pub fn run_tests(path: &Path, no_color: bool, categories: &[String]) -> i32 {
    let all_categories = discover_categorized(path);

    if all_categories.is_empty() {
        eprintln!("no {} files found in {}", TEST_SUFFIX, path.display());
        return 1;
    }

    let run_categories = select_categories(&all_categories, categories);
    if run_categories.is_empty() {
        eprintln!("no matching categories found");
        return 1;
    }

    let mut passed = 0usize;
    let mut failures: Vec<TestResult> = Vec::new();

    for (cat, files) in &run_categories {
        eprintln!();
        eprintln!("{}", bold(category_label(cat), no_color));

        for file in *files {
            let result = run_single_test(file);
            match &result.outcome {
                TestOutcome::Pass => {
                    passed += 1;
                    eprintln!("  {}  {}", pass_label(no_color), result.label());
                }
                TestOutcome::Fail(_) => {
                    eprintln!("  {}  {}", fail_label(no_color), result.label());
                    failures.push(result);
                }
            }
        }
    }

    if !failures.is_empty() {
        eprintln!();
        eprintln!("failures:");
        for f in &failures {
            eprintln!();
            eprintln!("  --- {} ---", f.path.display());
            if let TestOutcome::Fail(reason) = &f.outcome {
                for line in reason.lines() {
                    eprintln!("  {}", line);
                }
            }
        }
    }

    eprintln!();
    let failed = failures.len();
    if failed == 0 {
        let ok = if no_color { "ok" } else { "\x1b[32mok\x1b[0m" };
        eprintln!("test result: {}. {} passed, 0 failed", ok, passed);
        0
    } else {
        let label = if no_color { "FAILED" } else { "\x1b[31mFAILED\x1b[0m" };
        eprintln!(
            "test result: {}. {} passed, {} failed (of {})",
            label,
            passed,
            failed,
            passed + failed
        );
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, relative: &str, content: &str) -> PathBuf {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create dirs");
        }
        std::fs::write(&path, content).expect("write test file");
        path
    }

    fn outcome(path: &Path) -> Result<(), String> {
        match run_single_test(path).outcome {
            TestOutcome::Pass => Ok(()),
            TestOutcome::Fail(reason) => Err(reason),
        }
    }

    #[test]
    fn memory_expectation_passes() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write(
            dir.path(),
            "count.test.toml",
            "[test]\ndescription = \"counts\"\nexpect_memory = { a = 3 }\n\n[memory]\na = 0\n\n[[step]]\nwhile = { condition = { less = [\"a\", 3] }, body = [{ increment = \"a\" }] }\n",
        );
        assert_eq!(outcome(&path), Ok(()));
    }

    #[test]
    fn memory_mismatch_fails_with_both_values() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write(
            dir.path(),
            "wrong.test.toml",
            "[test]\nexpect_memory = { a = 5 }\n\n[memory]\na = 1\n",
        );
        let reason = outcome(&path).expect_err("mismatch");
        assert!(reason.contains("expected: {a: 5}"));
        assert!(reason.contains("actual:   {a: 1}"));
    }

    #[test]
    fn expected_runtime_error_passes() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write(
            dir.path(),
            "missing.test.toml",
            "[test]\nexpect_error = \"does not exist\"\n\n[[step]]\nincrement = \"ghost\"\n",
        );
        assert_eq!(outcome(&path), Ok(()));
    }

    #[test]
    fn overrides_apply_before_running() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write(
            dir.path(),
            "set.test.toml",
            "[test]\nset = { a = 41 }\nexpect_memory = { a = 42 }\n\n[memory]\na = 0\n\n[[step]]\nincrement = \"a\"\n",
        );
        assert_eq!(outcome(&path), Ok(()));
    }

    #[test]
    fn expected_load_error_passes() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write(
            dir.path(),
            "bad.test.toml",
            "[test]\nexpect_load_error = true\n\n[[step]]\njump = \"a\"\n",
        );
        assert_eq!(outcome(&path), Ok(()));
    }

    #[test]
    fn misspelled_program_section_is_a_load_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write(
            dir.path(),
            "typo.test.toml",
            "[test]\nexpect_memory = {}\n\n[[steps]]\nincrement = \"missing\"\n",
        );
        let reason = outcome(&path).expect_err("steps is not a section");
        assert!(reason.contains("unexpected load error"), "reason: {}", reason);
        assert!(reason.contains("steps"), "reason: {}", reason);

        let expected = write(
            dir.path(),
            "typo_expected.test.toml",
            "[test]\nexpect_load_error = true\n\n[[steps]]\nincrement = \"missing\"\n",
        );
        assert_eq!(outcome(&expected), Ok(()));
    }

    #[test]
    fn misspelled_expectation_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write(
            dir.path(),
            "typo.test.toml",
            "[test]\nexpect_memroy = { a = 1 }\n\n[memory]\na = 0\n",
        );
        let reason = outcome(&path).expect_err("unknown expectation");
        assert!(reason.contains("expect_memroy"), "reason: {}", reason);
    }

    #[test]
    fn bundled_suite_passes() {
        let suite = Path::new(env!("CARGO_MANIFEST_DIR")).join("../programs/tests");
        assert_eq!(run_tests(&suite, true, &[]), 0);
        assert_eq!(run_tests(&suite, true, &["loops".to_string()]), 0);
    }

    #[test]
    fn categories_follow_subfolders() {
        let dir = tempfile::tempdir().expect("temp dir");
        write(dir.path(), "top.test.toml", "");
        write(dir.path(), "loops/a.test.toml", "");
        write(dir.path(), "loops/nested/b.test.toml", "");
        write(dir.path(), "loops/notes.txt", "");

        let categories = discover_categorized(dir.path());
        let names: Vec<&str> = categories.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["", "loops", "loops/nested"]);

        let selected = select_categories(&categories, &["loops".to_string()]);
        assert_eq!(selected.len(), 2);
        assert_eq!(run_tests(dir.path(), true, &[]), 0);
    }
}
