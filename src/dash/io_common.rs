use std::path::{Path, PathBuf};

pub fn join_path(root: &str, file: &str) -> String {
    let p: PathBuf = [root, file].iter().collect();
    p.as_path().display().to_string()
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Writes a file in a fresh temporary directory.
///
/// Returns the directory guard with its path: the directory is removed when the
/// guard is dropped.
#[cfg(test)]
pub fn write_temp_file(
    test_name: &str,
    file_name: &str,
    contents: &str,
) -> (tempfile::TempDir, String) {
    let dir = tempfile::Builder::new()
        .prefix(&format!("hubcharts-{}-", test_name))
        .tempdir()
        .unwrap();
    std::fs::write(dir.path().join(file_name), contents).unwrap();
    let path = dir.path().display().to_string();
    (dir, path)
}
