use std::fmt::Display;

use image::ImageError;

#[derive(Debug)]
pub enum Error {
    UnableToDecodeImage(String, ImageError),
    UnableToEncodeImage(String, ImageError),
    ImageTooLargeForEncoding(String, usize, usize),
    UnableToAllocateRaster(usize, usize),
    EmptyRaster(usize, usize),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnableToDecodeImage(path, error) => {
                write!(f, "Unable to decode image '{}': {}", path, error)
            }
            Self::UnableToEncodeImage(path, error) => {
                write!(f, "Unable to encode image '{}': {}", path, error)
            }
            Self::ImageTooLargeForEncoding(path, width, height) => {
                write!(
                    f,
                    "Image of size {}x{} is too large to be encoded to '{}'",
                    width, height, path
                )
            }
            Self::UnableToAllocateRaster(width, height) => {
                write!(f, "Unable to allocate raster of size {}x{}", width, height)
            }
            Self::EmptyRaster(width, height) => {
                write!(
                    f,
                    "Raster of size {}x{} has no pixels. Width and height must be at least 1.",
                    width, height
                )
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnableToDecodeImage(_, error) | Self::UnableToEncodeImage(_, error) => {
                Some(error)
            }
            _ => None,
        }
    }
}
