//! Reading documents from files or stdin.

use crate::error::{CliError, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// A document read for processing.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentInput {
    /// Document text
    pub text: String,

    /// File name and size in bytes, when read from a file
    pub file: Option<(String, u64)>,
}

/// Read a document from `file`, or from stdin when `stdin` is set.
pub fn read_document(file: Option<&Path>, stdin: bool) -> Result<DocumentInput> {
    if stdin {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(DocumentInput { text, file: None });
    }

    let path = file.ok_or_else(|| {
        CliError::InvalidInput("Must specify either a file or --stdin".to_string())
    })?;
    read_file(path)
}

fn read_file(path: &Path) -> Result<DocumentInput> {
    let bytes = fs::read(path)?;
    let size = bytes.len() as u64;
    let text = String::from_utf8(bytes).map_err(|_| {
        CliError::InvalidInput(format!(
            "{} is not a UTF-8 text file; extract its text first",
            path.display()
        ))
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(DocumentInput {
        text,
        file: Some((name, size)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_file_records_name_and_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lease.txt");
        fs::write(&path, "The tenant shall pay rent.").unwrap();

        let input = read_document(Some(&path), false).unwrap();
        assert_eq!(input.text, "The tenant shall pay rent.");
        assert_eq!(input.file, Some(("lease.txt".to_string(), 26)));
    }

    #[test]
    fn test_binary_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scan.pdf");
        fs::write(&path, [0x25, 0x50, 0xff, 0xfe, 0x00]).unwrap();

        let err = read_document(Some(&path), false).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(msg) if msg.contains("scan.pdf")));
    }

    #[test]
    fn test_missing_source() {
        assert!(matches!(
            read_document(None, false),
            Err(CliError::InvalidInput(_))
        ));
    }
}
