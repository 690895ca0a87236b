use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Directories with nothing to parse on their own (`_FIXTURE` modules are
/// imported by other tests), or with syntax outside the supported grammar.
const EXCLUDED_DIRS: [&str; 3] = ["intl402", "annexB", "staging"];

pub fn collect_test_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_excluded_dir(entry.path()))
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file() && is_test_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

fn is_excluded_dir(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| EXCLUDED_DIRS.iter().any(|dir| name == *dir))
}

fn is_test_file(path: &Path) -> bool {
    let Some(name) = path.file_name().map(|name| name.to_string_lossy()) else {
        return false;
    };
    name.ends_with(".js") && !name.contains("_FIXTURE")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_are_not_tests() {
        assert!(is_test_file(Path::new("test/language/a.js")));
        assert!(!is_test_file(Path::new("test/language/module-code/a_FIXTURE.js")));
        assert!(!is_test_file(Path::new("test/language/README.md")));
    }

    #[test]
    fn excluded_directories() {
        assert!(is_excluded_dir(Path::new("test/intl402")));
        assert!(is_excluded_dir(Path::new("test/annexB")));
        assert!(!is_excluded_dir(Path::new("test/language")));
    }
}
