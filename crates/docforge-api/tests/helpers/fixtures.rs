//! Content fixtures for integration tests.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use lopdf::{dictionary, Document, Object};
use serde_json::{json, Value};
use std::io::Cursor;

pub fn base64_of(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// One upload item for the batch body.
pub fn upload_item(bytes: &[u8], filename: Option<&str>) -> Value {
    match filename {
        Some(name) => json!({ "file": base64_of(bytes), "filename": name }),
        None => json!({ "file": base64_of(bytes) }),
    }
}

pub fn png_rgb(width: u32, height: u32) -> Vec<u8> {
    encode_image(
        DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            image::Rgb([120, 40, 200]),
        )),
        ImageFormat::Png,
    )
}

pub fn png_rgba(width: u32, height: u32) -> Vec<u8> {
    encode_image(
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            image::Rgba([120, 40, 200, 128]),
        )),
        ImageFormat::Png,
    )
}

pub fn jpeg_rgb(width: u32, height: u32) -> Vec<u8> {
    encode_image(
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, image::Rgb([10, 90, 30]))),
        ImageFormat::Jpeg,
    )
}

fn encode_image(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format)
        .expect("failed to encode fixture image");
    buf
}

/// Minimal well-formed PDF with one empty page per `(width, height)` media box.
pub fn pdf_with_pages(boxes: &[(i64, i64)]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = boxes
        .iter()
        .map(|(width, height)| {
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), (*width).into(), (*height).into()],
            });
            page_id.into()
        })
        .collect();

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).expect("failed to save fixture PDF");
    out
}
