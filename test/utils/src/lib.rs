use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

/// Creates a temporary directory holding one file per (name, size) pair,
/// filled with zero bytes. The directory is removed when the returned
/// handle drops, so keep it alive for the duration of the test.
pub fn upload_fixtures(files: &[(&str, usize)]) -> (TempDir, Vec<PathBuf>) {
    let dir = tempfile::tempdir().unwrap();
    let mut paths: Vec<PathBuf> = vec![];

    for (name, size) in files {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(&vec![0u8; *size]).unwrap();
        paths.push(path);
    }

    return (dir, paths);
}
