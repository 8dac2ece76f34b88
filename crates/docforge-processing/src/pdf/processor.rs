//! PDF processor - read-time metadata extraction
//!
//! Page count and per-page media boxes, recomputed from the stored bytes on
//! every detail fetch. Box values are reported in PDF points exactly as
//! declared, without unit conversion.

use docforge_core::error::AppError;
use docforge_core::models::PageDimensions;
use lopdf::{Document, Object, ObjectId};

/// Derived descriptive fields of a PDF document.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfMetadata {
    pub num_pages: usize,
    /// One entry per page, in page order.
    pub page_dimensions: Vec<PageDimensions>,
}

pub struct PdfProcessor;

impl PdfProcessor {
    pub fn extract_metadata(data: &[u8]) -> Result<PdfMetadata, AppError> {
        let doc = Document::load_mem(data).map_err(|e| AppError::CorruptPdf(e.to_string()))?;

        let pages = doc.get_pages();
        let mut page_dimensions = Vec::with_capacity(pages.len());
        for (_page_number, page_id) in pages {
            page_dimensions.push(media_box(&doc, page_id)?);
        }

        Ok(PdfMetadata {
            num_pages: page_dimensions.len(),
            page_dimensions,
        })
    }
}

/// Resolve a page's media box, walking up the Pages tree for inherited
/// values. The box is the declared rectangle [x0 y0 x1 y1]; width and
/// height are the absolute side lengths.
fn media_box(doc: &Document, page_id: ObjectId) -> Result<PageDimensions, AppError> {
    let mut current = page_id;
    // Bounded walk; a deeper Pages tree than this is not a real document.
    for _ in 0..64 {
        let dict = doc
            .get_object(current)
            .and_then(Object::as_dict)
            .map_err(|e| AppError::CorruptPdf(e.to_string()))?;

        if let Ok(value) = dict.get(b"MediaBox") {
            let rect = resolve(doc, value)?
                .as_array()
                .map_err(|e| AppError::CorruptPdf(format!("MediaBox: {}", e)))?;
            if rect.len() != 4 {
                return Err(AppError::CorruptPdf(format!(
                    "MediaBox has {} elements, expected 4",
                    rect.len()
                )));
            }
            let mut coords = [0f64; 4];
            for (i, obj) in rect.iter().enumerate() {
                coords[i] = number(resolve(doc, obj)?)?;
            }
            return Ok(PageDimensions {
                width: (coords[2] - coords[0]).abs(),
                height: (coords[3] - coords[1]).abs(),
            });
        }

        match dict.get(b"Parent") {
            Ok(parent) => {
                current = parent
                    .as_reference()
                    .map_err(|e| AppError::CorruptPdf(e.to_string()))?;
            }
            Err(_) => {
                return Err(AppError::CorruptPdf(
                    "page has no MediaBox, inherited or direct".to_string(),
                ))
            }
        }
    }
    Err(AppError::CorruptPdf("Pages tree too deep".to_string()))
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a Object, AppError> {
    match obj {
        Object::Reference(id) => doc
            .get_object(*id)
            .map_err(|e| AppError::CorruptPdf(e.to_string())),
        other => Ok(other),
    }
}

fn number(obj: &Object) -> Result<f64, AppError> {
    match obj {
        Object::Integer(i) => Ok(*i as f64),
        Object::Real(r) => Ok(*r as f64),
        other => Err(AppError::CorruptPdf(format!(
            "expected a number in MediaBox, got {:?}",
            other
        ))),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::dictionary;

    /// Minimal PDF with one page per (width, height) media box.
    pub(crate) fn pdf_with_pages(boxes: &[(i64, i64)]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let kids: Vec<Object> = boxes
            .iter()
            .map(|(w, h)| {
                doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                    "MediaBox" => vec![0.into(), 0.into(), (*w).into(), (*h).into()],
                })
                .into()
            })
            .collect();

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => boxes.len() as i64,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    /// Same shape, but the media box lives on the Pages node only.
    fn pdf_with_inherited_box(pages: usize, w: i64, h: i64) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let kids: Vec<Object> = (0..pages)
            .map(|_| {
                doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                })
                .into()
            })
            .collect();

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => pages as i64,
                "MediaBox" => vec![0.into(), 0.into(), w.into(), h.into()],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_two_page_metadata() {
        let data = pdf_with_pages(&[(596, 842), (596, 842)]);
        let meta = PdfProcessor::extract_metadata(&data).unwrap();
        assert_eq!(meta.num_pages, 2);
        assert_eq!(
            meta.page_dimensions,
            vec![
                PageDimensions {
                    width: 596.0,
                    height: 842.0
                },
                PageDimensions {
                    width: 596.0,
                    height: 842.0
                },
            ]
        );
    }

    #[test]
    fn test_page_order_is_document_order() {
        let data = pdf_with_pages(&[(100, 200), (300, 400), (500, 600)]);
        let meta = PdfProcessor::extract_metadata(&data).unwrap();
        let widths: Vec<f64> = meta.page_dimensions.iter().map(|d| d.width).collect();
        assert_eq!(widths, vec![100.0, 300.0, 500.0]);
    }

    #[test]
    fn test_inherited_media_box() {
        let data = pdf_with_inherited_box(2, 612, 792);
        let meta = PdfProcessor::extract_metadata(&data).unwrap();
        assert_eq!(meta.num_pages, 2);
        assert!(meta
            .page_dimensions
            .iter()
            .all(|d| d.width == 612.0 && d.height == 792.0));
    }

    #[test]
    fn test_garbage_bytes_are_corrupt_pdf() {
        let err = PdfProcessor::extract_metadata(b"not a pdf at all").unwrap_err();
        assert!(matches!(err, AppError::CorruptPdf(_)));
    }

    #[test]
    fn test_enrichment_is_idempotent() {
        let data = pdf_with_pages(&[(596, 842)]);
        let first = PdfProcessor::extract_metadata(&data).unwrap();
        let second = PdfProcessor::extract_metadata(&data).unwrap();
        assert_eq!(first, second);
    }
}
