use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::errors::NewsboardResult;

/// Write the page through a sibling temp file so readers never see a
/// half-written document. The temp file is removed if any step fails.
pub fn write_document(path: &Path, html: &str) -> NewsboardResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(html.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_writes_and_replaces_page() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");

        write_document(&path, "first").unwrap();
        write_document(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert_eq!(entries(dir.path()), vec!["index.html".to_string()]);
    }

    #[test]
    fn test_creates_missing_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site/out/index.html");

        write_document(&path, "<html></html>").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_failed_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        // A non-empty directory at the target path cannot be replaced by a file.
        let target = dir.path().join("index.html");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        let result = write_document(&target, "<html></html>");

        assert!(result.is_err());
        assert_eq!(entries(dir.path()), vec!["index.html".to_string()]);
        assert!(target.is_dir());
    }
}
