use std::path::Path;

use image::{ColorType, ImageError, ImageFormat, ImageReader};

use super::Raster;
use crate::error::Error;
use crate::Result;

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Reads an image file of any supported format and converts it to 8 bit RGB.
///
/// The format is detected from the file content, not from its extension.
/// Alpha channels are dropped and grey images are expanded to three channels.
pub fn decode(path: &Path) -> Result<Raster> {
    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| Error::UnableToDecodeImage(path_string(path), ImageError::IoError(e)))?;
    let image = reader
        .decode()
        .map_err(|e| Error::UnableToDecodeImage(path_string(path), e))?;
    log::info!(
        "Decoded '{}': {}x{} {:?}",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );
    Raster::from_decoded(image.into_rgb8())
}

/// Writes `raster` as a tightly packed 8 bit RGB PNG to `path`.
pub fn encode_png(raster: &Raster, path: &Path) -> Result<()> {
    let too_large =
        || Error::ImageTooLargeForEncoding(path_string(path), raster.width(), raster.height());
    let width = u32::try_from(raster.width()).map_err(|_| too_large())?;
    let height = u32::try_from(raster.height()).map_err(|_| too_large())?;
    image::save_buffer_with_format(
        path,
        raster.raw_bytes(),
        width,
        height,
        ColorType::Rgb8,
        ImageFormat::Png,
    )
    .map_err(|e| Error::UnableToEncodeImage(path_string(path), e))?;
    log::info!("Encoded {}x{} PNG to '{}'", width, height, path.display());
    Ok(())
}
