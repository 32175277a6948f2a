use relative_path::RelativePath;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Mockup file not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid mockups directory: {0}")]
    InvalidMockupsDir(String),
}

/// Read a mockup markup file and return its content
pub fn read_mockup(relative_path: &RelativePath, mockups_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(mockups_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Scan for mockup markup files (`.md`) in the mockups directory
pub fn scan_mockup_files(mockups_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !mockups_root.exists() {
        return Err(IoError::InvalidMockupsDir(
            "mockups directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(mockups_root, &mut files)?;
    files.sort();
    Ok(files)
}

pub fn validate_mockups_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidMockupsDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "md"
        {
            files.push(path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_file, create_test_mockups_dir};

    #[test]
    fn scan_finds_mockup_files() {
        let mockups_dir = create_test_mockups_dir();
        create_test_file(&mockups_dir, "orders.md", "# Orders\n## Lines\n- ID: 1");
        create_test_file(&mockups_dir, "stock.md", "# Stock");

        let files = scan_mockup_files(mockups_dir.path()).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.file_name().unwrap() == "orders.md"));
        assert!(files.iter().any(|f| f.file_name().unwrap() == "stock.md"));
    }

    #[test]
    fn scan_recurses_into_subdirectories() {
        let mockups_dir = create_test_mockups_dir();
        create_test_file(&mockups_dir, "root.md", "# Root");
        create_test_file(&mockups_dir, "billing/invoice.md", "# Invoice");

        let files = scan_mockup_files(mockups_dir.path()).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.file_name().unwrap() == "invoice.md"));
    }

    #[test]
    fn scan_ignores_non_markup_files() {
        let mockups_dir = create_test_mockups_dir();
        create_test_file(&mockups_dir, "window.md", "# Window");
        create_test_file(&mockups_dir, "window.png", "fake image data");
        create_test_file(&mockups_dir, "config.json", "{}");

        let files = scan_mockup_files(mockups_dir.path()).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name().unwrap(), "window.md");
    }

    #[test]
    fn scan_rejects_missing_directory() {
        let result = scan_mockup_files(Path::new("/this/path/does/not/exist"));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("mockups directory")
        );
    }

    #[test]
    fn read_existing_mockup() {
        let mockups_dir = create_test_mockups_dir();
        create_test_file(&mockups_dir, "orders.md", "# Orders");

        let content = read_mockup(RelativePath::new("orders.md"), mockups_dir.path()).unwrap();
        assert_eq!(content, "# Orders");
    }

    #[test]
    fn read_missing_mockup_is_not_found() {
        let mockups_dir = create_test_mockups_dir();
        let result = read_mockup(RelativePath::new("missing.md"), mockups_dir.path());
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn validate_existing_directory() {
        let mockups_dir = create_test_mockups_dir();
        assert!(validate_mockups_dir(mockups_dir.path()).is_ok());
    }

    #[test]
    fn validate_missing_directory() {
        let result = validate_mockups_dir(Path::new("/nonexistent/path"));
        assert!(matches!(result, Err(IoError::InvalidMockupsDir(_))));
    }
}
