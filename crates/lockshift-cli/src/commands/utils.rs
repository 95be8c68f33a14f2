//! Path helpers shared by commands.

use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Ensure the project directory exists and is a directory.
pub fn project_dir(dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        return Err(CliError::FileNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "Project path is not a directory: {}",
            dir.display()
        )));
    }
    Ok(dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_path() {
        let base = Path::new("/project");
        assert_eq!(resolve_path(Path::new("out.json"), base), PathBuf::from("/project/out.json"));
        assert_eq!(resolve_path(Path::new("/tmp/out.json"), base), PathBuf::from("/tmp/out.json"));
    }

    #[test]
    fn test_project_dir() {
        let temp = TempDir::new().unwrap();
        assert!(project_dir(temp.path()).is_ok());

        let file = temp.path().join("file.txt");
        std::fs::write(&file, "").unwrap();
        assert!(matches!(project_dir(&file), Err(CliError::InvalidArgument(_))));

        let missing = temp.path().join("missing");
        assert!(matches!(project_dir(&missing), Err(CliError::FileNotFound(_))));
    }
}
