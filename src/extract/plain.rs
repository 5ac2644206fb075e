use std::fs;
use std::path::Path;

use super::ExtractError;

pub fn extract(path: &Path) -> Result<String, ExtractError> {
    let bytes = fs::read(path).map_err(|e| ExtractError::io(path, e))?;
    Ok(decode_lossy(&bytes))
}

/// Decode UTF-8, dropping invalid byte sequences instead of replacing them.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_utf8() {
        assert_eq!(decode_lossy("Côte d'Ivoire".as_bytes()), "Côte d'Ivoire");
    }

    #[test]
    fn test_decode_drops_invalid_bytes() {
        let bytes = b"issue\xff\xfe problem";
        assert_eq!(decode_lossy(bytes), "issue problem");
    }

    #[test]
    fn test_decode_truncated_sequence() {
        // First two bytes of a three-byte sequence
        let bytes = b"crisis \xe2\x82";
        assert_eq!(decode_lossy(bytes), "crisis ");
    }

    #[test]
    fn test_extract_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(extract(file.path()).unwrap(), "");
    }
}
