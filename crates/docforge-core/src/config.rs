//! Configuration module
//!
//! Environment-driven configuration for the API and services: server,
//! storage, upload limits, the extension → media kind table, and the
//! rasterization constants.

use std::env;

use crate::models::MediaKind;

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_MAX_FILE_SIZE_BYTES: usize = 50 * 1024 * 1024;
const DEFAULT_RASTER_DPI: u32 = 300;

/// Output format for rasterized PDF pages.
///
/// The original converter emitted JPEG at a fixed 300 DPI; that is the
/// default here, overridable via `RASTER_FORMAT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RasterFormat {
    Jpeg,
    Png,
}

impl RasterFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            RasterFormat::Jpeg => "jpg",
            RasterFormat::Png => "png",
        }
    }
}

/// Versionable table mapping a lowercase file extension to a media kind.
///
/// Classification consults this table instead of scattered literals so the
/// supported set can evolve (gif/webp were late additions) without touching
/// pipeline code.
#[derive(Clone, Debug)]
pub struct MediaKindTable {
    entries: Vec<(String, MediaKind)>,
}

impl Default for MediaKindTable {
    fn default() -> Self {
        let mut entries = Vec::new();
        for ext in ["jpg", "jpeg", "png", "gif", "webp"] {
            entries.push((ext.to_string(), MediaKind::Image));
        }
        entries.push(("pdf".to_string(), MediaKind::Pdf));
        MediaKindTable { entries }
    }
}

impl MediaKindTable {
    /// Build a table from explicit extension lists (used by env overrides).
    pub fn new(image_extensions: &[String], pdf_extensions: &[String]) -> Self {
        let mut entries = Vec::new();
        for ext in image_extensions {
            entries.push((ext.to_lowercase(), MediaKind::Image));
        }
        for ext in pdf_extensions {
            entries.push((ext.to_lowercase(), MediaKind::Pdf));
        }
        MediaKindTable { entries }
    }

    /// Kind for a (case-insensitive) extension, or `None` if unsupported.
    pub fn kind_for(&self, extension: &str) -> Option<MediaKind> {
        let ext = extension.trim_start_matches('.').to_lowercase();
        self.entries
            .iter()
            .find(|(e, _)| *e == ext)
            .map(|(_, kind)| *kind)
    }

    /// True if the extension is in the table.
    pub fn supports(&self, extension: &str) -> bool {
        self.kind_for(extension).is_some()
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(e, _)| e.as_str())
    }
}

/// Application configuration, loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    /// Root directory for stored document bytes.
    pub storage_path: String,
    /// Base URL under which stored documents are served.
    pub storage_base_url: String,
    /// Maximum decoded payload size per uploaded item.
    pub max_file_size_bytes: usize,
    /// Resolution for PDF page rasterization.
    pub raster_dpi: u32,
    /// Encoding for rasterized pages.
    pub raster_format: RasterFormat,
    /// Extension → kind classification table.
    pub media_kinds: MediaKindTable,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let server_port = env_parse("SERVER_PORT", DEFAULT_SERVER_PORT)?;

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|v| split_csv(&v))
            .unwrap_or_default();

        let environment =
            env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let storage_path =
            env::var("STORAGE_PATH").unwrap_or_else(|_| "./data/documents".to_string());
        let storage_base_url = env::var("STORAGE_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}/media", server_port));

        let max_file_size_bytes =
            env_parse("MAX_FILE_SIZE_BYTES", DEFAULT_MAX_FILE_SIZE_BYTES)?;

        let raster_dpi = env_parse("RASTER_DPI", DEFAULT_RASTER_DPI)?;
        let raster_format = match env::var("RASTER_FORMAT").as_deref() {
            Ok("png") | Ok("PNG") => RasterFormat::Png,
            Ok("jpg") | Ok("jpeg") | Ok("JPG") | Ok("JPEG") => RasterFormat::Jpeg,
            Ok(other) => anyhow::bail!("Unsupported RASTER_FORMAT: {}", other),
            Err(_) => RasterFormat::Jpeg,
        };

        let media_kinds = match (env::var("IMAGE_EXTENSIONS"), env::var("PDF_EXTENSIONS")) {
            (Err(_), Err(_)) => MediaKindTable::default(),
            (image_exts, pdf_exts) => {
                let image_exts = image_exts
                    .map(|v| split_csv(&v))
                    .unwrap_or_else(|_| {
                        ["jpg", "jpeg", "png", "gif", "webp"]
                            .iter()
                            .map(|s| s.to_string())
                            .collect()
                    });
                let pdf_exts = pdf_exts
                    .map(|v| split_csv(&v))
                    .unwrap_or_else(|_| vec!["pdf".to_string()]);
                MediaKindTable::new(&image_exts, &pdf_exts)
            }
        };

        Ok(Config {
            server_port,
            cors_origins,
            environment,
            storage_path,
            storage_base_url,
            max_file_size_bytes,
            raster_dpi,
            raster_format,
            media_kinds,
        })
    }
}

fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> Result<T, anyhow::Error>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(v) => v
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {}: {}", name, e)),
        Err(_) => Ok(default),
    }
}
