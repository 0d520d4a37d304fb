use crate::error::{DashboardError, DashboardResult};
use std::path::Path;

pub const ALLOWED_EXTENSIONS: [&str; 2] = ["csv", "xlsx"];

/// Checks a file before it is sent anywhere and returns its size in bytes.
pub fn validate_upload_file(path: &Path, max_bytes: u64) -> DashboardResult<u64> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext) => {}
        _ => {
            return Err(DashboardError::validation(
                "Please upload a CSV or Excel file",
            ))
        }
    }

    let metadata = std::fs::metadata(path).map_err(|e| {
        DashboardError::validation(format!("Cannot read {}: {}", path.display(), e))
    })?;

    if !metadata.is_file() {
        return Err(DashboardError::validation(format!(
            "{} is not a file",
            path.display()
        )));
    }

    if metadata.len() > max_bytes {
        return Err(DashboardError::validation(format!(
            "File is {} bytes, limit is {} bytes",
            metadata.len(),
            max_bytes
        )));
    }

    Ok(metadata.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        path
    }

    #[test]
    fn test_accepts_csv_and_xlsx() {
        let dir = TempDir::new().unwrap();
        let contents = b"transaction_id,date\n1,2024-03-01\n";
        let csv = write_file(&dir, "day.csv", contents);
        let xlsx = write_file(&dir, "DAY.XLSX", b"PK");

        assert_eq!(validate_upload_file(&csv, 1024).unwrap(), contents.len() as u64);
        assert!(validate_upload_file(&xlsx, 1024).is_ok());
    }

    #[test]
    fn test_rejects_other_extensions() {
        let dir = TempDir::new().unwrap();
        let txt = write_file(&dir, "notes.txt", b"hello");

        match validate_upload_file(&txt, 1024) {
            Err(DashboardError::Validation { message }) => {
                assert!(message.contains("CSV or Excel"))
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_oversize_and_missing_files() {
        let dir = TempDir::new().unwrap();
        let big = write_file(&dir, "big.csv", &[b'x'; 64]);

        assert!(matches!(
            validate_upload_file(&big, 63),
            Err(DashboardError::Validation { .. })
        ));
        assert!(matches!(
            validate_upload_file(&dir.path().join("missing.csv"), 1024),
            Err(DashboardError::Validation { .. })
        ));
    }
}
