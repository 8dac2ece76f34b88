//! Content signature sniffing.
//!
//! Used only when an upload arrives without a filename: the decoded bytes'
//! magic numbers suggest a plausible extension, which then goes through the
//! normal classifier. All extensions in the default kind table are
//! recognized here.

/// Guess a file extension from leading magic bytes.
pub fn guess_extension(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(b"\xFF\xD8\xFF") {
        Some("jpg")
    } else if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("png")
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        Some("gif")
    } else if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        Some("webp")
    } else if data.starts_with(b"%PDF") {
        Some("pdf")
    } else {
        None
    }
}
