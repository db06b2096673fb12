// PNG output
// Metadata is stored as tEXt chunks, or iTXt when the value is not Latin-1

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use super::{FigureError, FigureMetadata, RasterFigure};

/// Encode `figure` to `path`, embedding `metadata`
pub fn write(figure: &RasterFigure, path: &Path, metadata: &FigureMetadata) -> Result<(), FigureError> {
    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), figure.width(), figure.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    for (key, value) in metadata.iter() {
        if value.chars().all(|c| c <= '\u{ff}') {
            encoder.add_text_chunk(key.to_string(), value.to_string())?;
        } else {
            encoder.add_itxt_chunk(key.to_string(), value.to_string())?;
        }
    }

    let mut writer = encoder.write_header()?;
    writer.write_image_data(figure.rgba_bytes())?;
    writer.finish()?;
    Ok(())
}
