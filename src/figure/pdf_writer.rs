// PDF output
// One page holding the raster as an image; metadata goes in the Info dictionary

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};
use std::fs;
use std::path::Path;

use super::{FigureError, FigureMetadata, RasterFigure};

/// Encode `figure` to `path`, embedding `metadata`
pub fn write(figure: &RasterFigure, path: &Path, metadata: &FigureMetadata) -> Result<(), FigureError> {
    let bytes = render(figure, metadata)?;
    fs::write(path, bytes)?;
    Ok(())
}

/// Build the document in memory; one point per pixel
fn render(figure: &RasterFigure, metadata: &FigureMetadata) -> Result<Vec<u8>, FigureError> {
    let width = figure.width() as i64;
    let height = figure.height() as i64;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width,
            "Height" => height,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        figure.rgb_bytes(),
    ));

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![width.into(), 0.into(), 0.into(), height.into(), 0.into(), 0.into()],
            ),
            Operation::new("Do", vec!["Im0".into()]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_bytes = content
        .encode()
        .map_err(|e| FigureError::Pdf(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content_bytes));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => dictionary! {
            "XObject" => dictionary! { "Im0" => image_id },
        },
        "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if !metadata.is_empty() {
        let mut info = Dictionary::new();
        for (key, value) in metadata.iter() {
            info.set(key, text_string(value));
        }
        let info_id = doc.add_object(info);
        doc.trailer.set("Info", info_id);
    }

    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| FigureError::Pdf(e.to_string()))?;
    Ok(buffer)
}

/// PDF text string: ASCII as written, anything else UTF-16BE with a byte order mark
fn text_string(value: &str) -> Object {
    if value.is_ascii() {
        return Object::string_literal(value);
    }
    let mut bytes = vec![0xFE, 0xFF];
    bytes.extend(value.encode_utf16().flat_map(u16::to_be_bytes));
    Object::String(bytes, StringFormat::Hexadecimal)
}
