use crate::error::Result;
use std::fs;
use std::path::Path;

/// Result of trying to read a file as text. A file that is not valid UTF-8
/// is an expected outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    Text(String),
    NotText { valid_up_to: usize },
}

impl DecodeOutcome {
    pub fn is_text(&self) -> bool {
        matches!(self, DecodeOutcome::Text(_))
    }
}

pub fn decode_text(bytes: Vec<u8>) -> DecodeOutcome {
    match String::from_utf8(bytes) {
        Ok(text) => DecodeOutcome::Text(text),
        Err(e) => DecodeOutcome::NotText {
            valid_up_to: e.utf8_error().valid_up_to(),
        },
    }
}

/// Reads the whole file and decodes it. I/O failures are returned as errors.
pub fn read_text(path: &Path) -> Result<DecodeOutcome> {
    let bytes = fs::read(path)?;
    Ok(decode_text(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_decode_valid_utf8() {
        let outcome = decode_text("zażółć gęślą jaźń\r\n".as_bytes().to_vec());
        assert_eq!(outcome, DecodeOutcome::Text("zażółć gęślą jaźń\r\n".to_string()));
        assert!(outcome.is_text());
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let outcome = decode_text(vec![b'o', b'k', 0xff, 0xfe]);
        assert_eq!(outcome, DecodeOutcome::NotText { valid_up_to: 2 });
        assert!(!outcome.is_text());
    }

    #[test]
    fn test_read_text_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let text = temp_dir.path().join("a.py");
        let binary = temp_dir.path().join("b.txt");
        std::fs::write(&text, "print(1)").unwrap();
        std::fs::write(&binary, [0x89, b'P', b'N', b'G', 0x00, 0xc3]).unwrap();

        assert_eq!(
            read_text(&text).unwrap(),
            DecodeOutcome::Text("print(1)".to_string())
        );
        assert!(!read_text(&binary).unwrap().is_text());
    }

    #[test]
    fn test_read_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(read_text(&temp_dir.path().join("gone.txt")).is_err());
    }
}
