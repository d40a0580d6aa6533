use std::io;
use std::path::{Path, PathBuf};

/// Collect vendor record files from file and directory arguments, sorted
/// for deterministic output. Non-record paths are skipped with a notice.
pub fn collect_vendor_files(paths: &[PathBuf]) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            if is_vendor_file(path) {
                files.push(path.clone());
            }
        } else if path.is_dir() {
            let mut entries: Vec<PathBuf> = std::fs::read_dir(path)?
                .filter_map(|entry| entry.ok().map(|entry| entry.path()))
                .filter(|entry| entry.is_file() && is_vendor_file(entry))
                .collect();
            entries.sort();
            files.append(&mut entries);
        } else {
            eprintln!("Skipping invalid path: {}", path.display());
        }
    }
    Ok(files)
}

/// Display name for one record file.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn is_vendor_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_record_extensions() {
        assert!(is_vendor_file(Path::new("vendors/acme.yaml")));
        assert!(is_vendor_file(Path::new("vendors/acme.yml")));
        assert!(!is_vendor_file(Path::new("vendors/acme.json")));
        assert!(!is_vendor_file(Path::new("vendors/README")));
    }
}
