//! Source scanning helpers for layering contracts.

use std::fs;
use std::path::{Path, PathBuf};

/// A source line matching a forbidden pattern.
#[derive(Debug)]
pub struct Hit {
    pub file: String,
    pub line: usize,
    pub text: String,
}

fn root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn rust_files(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries =
        fs::read_dir(dir).unwrap_or_else(|e| panic!("failed to read dir {}: {e}", dir.display()));
    for entry in entries {
        let path = entry.expect("dir entry").path();
        if path.is_dir() {
            rust_files(&path, files);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
}

/// Non-test lines under `relative_dir` containing any of `patterns`.
///
/// Scanning stops at the first `#[cfg(test)]` in each file, so test
/// modules may use whatever they need.
pub fn forbidden_lines(relative_dir: &str, patterns: &[&str]) -> Vec<Hit> {
    let mut files = Vec::new();
    rust_files(&root().join(relative_dir), &mut files);
    files.sort();

    let mut hits = Vec::new();
    for file in files {
        let content = fs::read_to_string(&file)
            .unwrap_or_else(|e| panic!("failed to read {}: {e}", file.display()));
        let name = file
            .strip_prefix(root())
            .unwrap_or(&file)
            .to_string_lossy()
            .replace('\\', "/");

        for (idx, line) in content.lines().enumerate() {
            if line.trim_start().starts_with("#[cfg(test)]") {
                break;
            }
            if line.trim_start().starts_with("//") {
                continue;
            }
            if patterns.iter().any(|p| line.contains(p)) {
                hits.push(Hit {
                    file: name.clone(),
                    line: idx + 1,
                    text: line.to_string(),
                });
            }
        }
    }
    hits
}

pub fn path_exists(relative_path: &str) -> bool {
    root().join(relative_path).exists()
}
