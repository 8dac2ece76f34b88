//! Media classifier.
//!
//! Buckets an upload into a [`MediaKind`] from its filename extension,
//! looked up in the configurable extension table. The extension is
//! authoritative for kind assignment; decoded bytes are only sniffed
//! earlier in the pipeline to recover a missing filename (see
//! [`crate::sniff`]).

use docforge_core::config::MediaKindTable;
use docforge_core::error::AppError;
use docforge_core::models::MediaKind;

/// Extension of a filename: the part after the last dot, lowercased,
/// without the dot. Empty when the name has no extension.
pub fn extension_of(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// Decide the media kind for a filename, or reject it.
pub fn classify(filename: &str, table: &MediaKindTable) -> Result<MediaKind, AppError> {
    let extension = extension_of(filename);
    table
        .kind_for(&extension)
        .ok_or(AppError::UnsupportedMedia { extension })
}
