//! Ingestion pipeline: batch decoding and validation.
//!
//! Every item of an upload batch is decoded and classified before anything
//! is written; the first failure aborts the whole batch so ingestion stays
//! all-or-nothing (reject-fast, no partial writes).

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use docforge_core::config::MediaKindTable;
use docforge_core::error::AppError;
use docforge_core::models::MediaKind;

use crate::classifier;
use crate::sniff;

/// One item of an upload batch, still base64-encoded.
#[derive(Debug, Clone)]
pub struct EncodedUpload {
    /// Base64 payload, with or without a `data:...;base64,` prefix.
    pub file: String,
    /// Declared filename; when absent the content signature supplies one.
    pub filename: Option<String>,
}

/// A validated, decoded upload ready for persistence.
#[derive(Debug, Clone)]
pub struct DecodedUpload {
    pub bytes: Bytes,
    pub extension: String,
    pub kind: MediaKind,
}

/// Decode and classify a whole batch.
///
/// Returns decoded items in input order, or the first error encountered.
pub fn decode_batch(
    items: &[EncodedUpload],
    table: &MediaKindTable,
    max_file_size: usize,
) -> Result<Vec<DecodedUpload>, AppError> {
    items
        .iter()
        .map(|item| decode_item(item, table, max_file_size))
        .collect()
}

fn decode_item(
    item: &EncodedUpload,
    table: &MediaKindTable,
    max_file_size: usize,
) -> Result<DecodedUpload, AppError> {
    let payload = strip_data_uri(item.file.trim());

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| AppError::Decode(e.to_string()))?;

    if bytes.is_empty() {
        return Err(AppError::EmptyFile);
    }
    if bytes.len() > max_file_size {
        return Err(AppError::PayloadTooLarge(format!(
            "{} bytes exceeds max {} bytes",
            bytes.len(),
            max_file_size
        )));
    }

    let extension = match &item.filename {
        Some(name) => classifier::extension_of(name),
        None => sniff::guess_extension(&bytes)
            .ok_or(AppError::UnrecognizedContent)?
            .to_string(),
    };

    let kind = classifier::classify(&format!("f.{}", extension), table)?;

    Ok(DecodedUpload {
        bytes: Bytes::from(bytes),
        extension,
        kind,
    })
}

/// Strip a `data:<mime>;base64,` prefix if present; bare base64 passes through.
fn strip_data_uri(payload: &str) -> &str {
    if payload.starts_with("data:") {
        payload
            .split_once(',')
            .map(|(_, rest)| rest)
            .unwrap_or(payload)
    } else {
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n trailing";

    fn item(file: String, filename: Option<&str>) -> EncodedUpload {
        EncodedUpload {
            file,
            filename: filename.map(|s| s.to_string()),
        }
    }

    fn encode(bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }

    #[test]
    fn test_decodes_named_item() {
        let table = MediaKindTable::default();
        let items = [item(encode(b"fake image"), Some("photo.jpg"))];
        let decoded = decode_batch(&items, &table, 1024).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].kind, MediaKind::Image);
        assert_eq!(decoded[0].extension, "jpg");
        assert_eq!(decoded[0].bytes.as_ref(), b"fake image");
    }

    #[test]
    fn test_filename_recovered_by_sniffing() {
        let table = MediaKindTable::default();
        let items = [item(encode(PNG_MAGIC), None)];
        let decoded = decode_batch(&items, &table, 1024).unwrap();
        assert_eq!(decoded[0].extension, "png");
        assert_eq!(decoded[0].kind, MediaKind::Image);

        let items = [item(encode(b"%PDF-1.4 body"), None)];
        let decoded = decode_batch(&items, &table, 1024).unwrap();
        assert_eq!(decoded[0].kind, MediaKind::Pdf);
    }

    #[test]
    fn test_malformed_base64_fails_batch() {
        let table = MediaKindTable::default();
        let items = [
            item(encode(PNG_MAGIC), Some("ok.png")),
            item("!!!not-base64!!!".to_string(), Some("bad.png")),
        ];
        let err = decode_batch(&items, &table, 1024).unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[test]
    fn test_empty_payload_rejected() {
        let table = MediaKindTable::default();
        let items = [item(String::new(), Some("empty.png"))];
        assert!(matches!(
            decode_batch(&items, &table, 1024).unwrap_err(),
            AppError::EmptyFile
        ));
    }

    #[test]
    fn test_unsniffable_content_without_filename_rejected() {
        let table = MediaKindTable::default();
        let items = [item(encode(b"no known signature"), None)];
        assert!(matches!(
            decode_batch(&items, &table, 1024).unwrap_err(),
            AppError::UnrecognizedContent
        ));
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let table = MediaKindTable::default();
        let items = [item(encode(b"text"), Some("notes.txt"))];
        assert!(matches!(
            decode_batch(&items, &table, 1024).unwrap_err(),
            AppError::UnsupportedMedia { extension } if extension == "txt"
        ));
    }

    #[test]
    fn test_oversize_payload_rejected() {
        let table = MediaKindTable::default();
        let items = [item(encode(&vec![0u8; 32]), Some("big.png"))];
        assert!(matches!(
            decode_batch(&items, &table, 16).unwrap_err(),
            AppError::PayloadTooLarge(_)
        ));
    }

    #[test]
    fn test_data_uri_prefix_accepted() {
        let table = MediaKindTable::default();
        let payload = format!("data:image/png;base64,{}", encode(PNG_MAGIC));
        let items = [item(payload, None)];
        let decoded = decode_batch(&items, &table, 1024).unwrap();
        assert_eq!(decoded[0].extension, "png");
    }
}
