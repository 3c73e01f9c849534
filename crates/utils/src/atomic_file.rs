//! Crash-safe replacement of generated env files and templates

use envgen_core::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace `path` with `content` in a single rename
///
/// The content is staged in a temporary file in the target's directory, so a
/// reader sees either the old file or the new one. An existing file keeps its
/// permissions; a new file is created owner-only.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let dir = staging_dir(path);
    fs::create_dir_all(dir).map_err(|e| Error::file_system(dir, "create directory", e))?;

    let mut staged =
        NamedTempFile::new_in(dir).map_err(|e| Error::file_system(dir, "create temporary file", e))?;
    staged
        .write_all(content)
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|e| Error::file_system(staged.path(), "write temporary file", e))?;

    if let Ok(existing) = fs::metadata(path) {
        staged
            .as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| Error::file_system(staged.path(), "copy permissions", e))?;
    }

    // A failed persist drops the temporary file
    staged
        .persist(path)
        .map_err(|e| Error::file_system(path, "replace file", e.error))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}

pub fn write_atomic_string(path: &Path, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Directory holding the temporary file; a bare file name stages in `.`
fn staging_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_bare_file_name_stages_in_current_dir() {
        assert_eq!(staging_dir(Path::new(".env")), Path::new("."));
        assert_eq!(staging_dir(Path::new("config/app.env")), Path::new("config"));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("config").join("app.env");

        write_atomic_string(&file_path, "").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "");
    }

    #[test]
    fn test_overwrite_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join(".env");
        fs::write(&file_path, "OLD=1\n").unwrap();

        write_atomic_string(&file_path, "NEW=2\n").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "NEW=2\n");
        let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("template.yaml");
        fs::write(&file_path, "A: {}\n").unwrap();
        fs::set_permissions(&file_path, fs::Permissions::from_mode(0o644)).unwrap();

        write_atomic_string(&file_path, "B: {}\n").unwrap();

        let mode = fs::metadata(&file_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}
