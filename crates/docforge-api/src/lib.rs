//! Docforge HTTP API
//!
//! Exposes the document management surface: batch upload, kind-scoped
//! list/detail/delete, image rotation, and PDF-to-image conversion.

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;
