use crate::error::{FlashcardError, Result};
use std::path::Path;

const UTF8_BOM: &str = "\u{feff}";

/// Collects the study material for one request.
///
/// Typed text wins when it has any non-whitespace content; otherwise the
/// file is read. With neither, the request cannot proceed.
pub fn ingest(text: Option<&str>, file: Option<&Path>) -> Result<String> {
    if let Some(text) = text
        && !text.trim().is_empty()
    {
        return Ok(text.trim().to_string());
    }

    match file {
        Some(path) => {
            let bytes = std::fs::read(path).map_err(|source| FlashcardError::ContentFile {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::info!(
                "Read {} bytes of content from {}",
                bytes.len(),
                path.display()
            );
            decode_upload(path, bytes)
        }
        None => Err(FlashcardError::NoContent),
    }
}

/// Decodes an uploaded payload as UTF-8 plain text.
pub fn decode_upload(name: &Path, bytes: Vec<u8>) -> Result<String> {
    let text = String::from_utf8(bytes).map_err(|_| FlashcardError::ContentEncoding {
        path: name.to_path_buf(),
    })?;
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(&text).trim();
    if text.is_empty() {
        return Err(FlashcardError::NoContent);
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_text_is_trimmed() {
        let content = ingest(Some("  Mitochondria make ATP.\n\n"), None).unwrap();
        assert_eq!(content, "Mitochondria make ATP.");
    }

    #[test]
    fn test_nothing_provided_is_no_content() {
        assert!(matches!(ingest(None, None), Err(FlashcardError::NoContent)));
        assert!(matches!(ingest(Some("   "), None), Err(FlashcardError::NoContent)));
    }

    #[test]
    fn test_text_takes_priority_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "from the file").unwrap();
        let content = ingest(Some("typed"), Some(file.path())).unwrap();
        assert_eq!(content, "typed");
    }

    #[test]
    fn test_blank_text_falls_back_to_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "\u{feff}  Chapter 1: Cells\n").unwrap();
        let content = ingest(Some(" "), Some(file.path())).unwrap();
        assert_eq!(content, "Chapter 1: Cells");
    }

    #[test]
    fn test_missing_file_reports_path() {
        let path = PathBuf::from("/definitely/not/here.txt");
        let err = ingest(None, Some(path.as_path())).unwrap_err();
        match err {
            FlashcardError::ContentFile { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_binary_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x25, 0x50, 0x44, 0x46, 0xff, 0xfe, 0x00, 0x81]).unwrap();
        let err = ingest(None, Some(file.path())).unwrap_err();
        assert!(matches!(err, FlashcardError::ContentEncoding { .. }));
    }

    #[test]
    fn test_empty_file_is_no_content() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(
            ingest(None, Some(file.path())),
            Err(FlashcardError::NoContent)
        ));
    }

    #[test]
    fn test_decode_upload() {
        let text = decode_upload(Path::new("notes.txt"), "Ωmega notes".as_bytes().to_vec()).unwrap();
        assert_eq!(text, "Ωmega notes");
    }
}
