use std::fmt;

use image::RgbImage;

use crate::error::Error;
use crate::Result;

pub mod codec;
mod pixel;

pub use pixel::Pixel;

/// Number of bytes per pixel.
pub const CHANNELS: usize = 3;

#[derive(Clone)]
enum PixelStorage {
    /// Zero filled buffer owned by the raster itself.
    Allocated(Vec<u8>),
    /// Buffer handed over by the decoder, released through the codec's type.
    Decoded(RgbImage),
}

impl PixelStorage {
    fn bytes(&self) -> &[u8] {
        match self {
            Self::Allocated(bytes) => bytes.as_slice(),
            Self::Decoded(image) => image.as_raw().as_slice(),
        }
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        match self {
            Self::Allocated(bytes) => bytes.as_mut_slice(),
            Self::Decoded(image) => &mut **image,
        }
    }
}

/// A packed 8 bit RGB image stored row by row.
///
/// The byte at `3 * (row * width + col) + c` holds channel `c` of the pixel in
/// row `row` and column `col`. Width and height are always at least 1.
#[derive(Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    storage: PixelStorage,
}

impl Raster {
    /// Allocates a black raster of the given size.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        check_not_empty(width, height)?;
        let length = byte_length(width, height)?;
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(length)
            .map_err(|_| Error::UnableToAllocateRaster(width, height))?;
        bytes.resize(length, 0);
        Ok(Self {
            width,
            height,
            storage: PixelStorage::Allocated(bytes),
        })
    }

    /// Adopts a decoded image buffer without copying it.
    pub(crate) fn from_decoded(image: RgbImage) -> Result<Self> {
        let width = image.width() as usize;
        let height = image.height() as usize;
        check_not_empty(width, height)?;
        let length = byte_length(width, height)?;
        assert_eq!(
            image.as_raw().len(),
            length,
            "Decoded buffer does not match its dimensions {}x{}",
            width,
            height
        );
        Ok(Self {
            width,
            height,
            storage: PixelStorage::Decoded(image),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> Pixel {
        let offset = self.offset(row, col);
        let bytes = self.storage.bytes();
        Pixel::new(bytes[offset], bytes[offset + 1], bytes[offset + 2])
    }

    pub fn set(&mut self, row: usize, col: usize, pixel: Pixel) {
        let offset = self.offset(row, col);
        self.storage.bytes_mut()[offset..offset + CHANNELS].copy_from_slice(&pixel.channels());
    }

    pub fn raw_bytes(&self) -> &[u8] {
        self.storage.bytes()
    }

    pub fn raw_bytes_mut(&mut self) -> &mut [u8] {
        self.storage.bytes_mut()
    }

    /// Copies all rows of `band` into this raster, starting at `first_row`.
    pub(crate) fn paste_rows(&mut self, first_row: usize, band: &Raster) {
        assert_eq!(
            band.width, self.width,
            "Band of width {} does not fit raster of width {}",
            band.width, self.width
        );
        assert!(
            first_row + band.height <= self.height,
            "Band of rows {}..{} exceeds raster height {}",
            first_row,
            first_row + band.height,
            self.height
        );
        let start = first_row * self.width * CHANNELS;
        let source = band.raw_bytes();
        self.storage.bytes_mut()[start..start + source.len()].copy_from_slice(source);
    }

    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.height && col < self.width,
            "Pixel (row {}, col {}) is out of bounds of {}x{} raster",
            row,
            col,
            self.width,
            self.height
        );
        CHANNELS * (row * self.width + col)
    }
}

impl PartialEq for Raster {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.raw_bytes() == other.raw_bytes()
    }
}

impl Eq for Raster {}

impl fmt::Debug for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

fn check_not_empty(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::EmptyRaster(width, height));
    }
    Ok(())
}

fn byte_length(width: usize, height: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(CHANNELS))
        .ok_or(Error::UnableToAllocateRaster(width, height))
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::{Pixel, Raster};
    use crate::error::Error;

    #[test]
    fn new_raster_is_black() {
        let raster = Raster::new(4, 3).unwrap();
        assert_eq!(raster.width(), 4);
        assert_eq!(raster.height(), 3);
        assert_eq!(raster.raw_bytes().len(), 4 * 3 * 3);
        assert!(raster.raw_bytes().iter().all(|&byte| byte == 0));
    }

    #[test]
    fn empty_dimensions_are_rejected() {
        assert!(matches!(Raster::new(0, 5), Err(Error::EmptyRaster(0, 5))));
        assert!(matches!(Raster::new(5, 0), Err(Error::EmptyRaster(5, 0))));
    }

    #[test]
    fn overflowing_size_is_an_allocation_error() {
        let result = Raster::new(usize::MAX, 2);
        assert!(matches!(
            result,
            Err(Error::UnableToAllocateRaster(usize::MAX, 2))
        ));
    }

    #[test]
    fn set_writes_row_major_bytes() {
        let mut raster = Raster::new(3, 2).unwrap();
        raster.set(1, 2, Pixel::new(10, 20, 30));
        let offset = 3 * (3 + 2);
        assert_eq!(&raster.raw_bytes()[offset..offset + 3], &[10, 20, 30]);
        assert_eq!(raster.get(1, 2), Pixel::new(10, 20, 30));
        assert_eq!(raster.get(0, 2), Pixel::default());
    }

    #[test]
    fn non_square_corners_are_addressable() {
        let mut raster = Raster::new(5, 2).unwrap();
        raster.set(0, 4, Pixel::new(1, 1, 1));
        raster.set(1, 0, Pixel::new(2, 2, 2));
        raster.set(1, 4, Pixel::new(3, 3, 3));
        assert_eq!(raster.get(0, 4), Pixel::new(1, 1, 1));
        assert_eq!(raster.get(1, 0), Pixel::new(2, 2, 2));
        assert_eq!(raster.get(1, 4), Pixel::new(3, 3, 3));
        assert_eq!(&raster.raw_bytes()[27..30], &[3, 3, 3]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn get_outside_of_height_panics() {
        let raster = Raster::new(4, 2).unwrap();
        raster.get(2, 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn set_outside_of_width_panics() {
        let mut raster = Raster::new(4, 2).unwrap();
        raster.set(0, 4, Pixel::default());
    }

    #[test]
    fn decoded_buffer_is_adopted() {
        let image = RgbImage::from_fn(2, 3, |x, y| Rgb([x as u8, y as u8, 7]));
        let mut raster = Raster::from_decoded(image).unwrap();
        assert_eq!(raster.width(), 2);
        assert_eq!(raster.height(), 3);
        assert_eq!(raster.get(2, 1), Pixel::new(1, 2, 7));
        raster.set(2, 1, Pixel::new(9, 9, 9));
        assert_eq!(raster.get(2, 1), Pixel::new(9, 9, 9));
    }

    #[test]
    fn empty_decoded_image_is_rejected() {
        let image = RgbImage::new(0, 3);
        assert!(matches!(
            Raster::from_decoded(image),
            Err(Error::EmptyRaster(0, 3))
        ));
    }

    #[test]
    fn equality_ignores_storage_kind() {
        let mut allocated = Raster::new(2, 2).unwrap();
        allocated.set(0, 1, Pixel::new(5, 6, 7));
        let mut decoded_image = RgbImage::new(2, 2);
        decoded_image.put_pixel(1, 0, Rgb([5, 6, 7]));
        let decoded = Raster::from_decoded(decoded_image).unwrap();
        assert_eq!(allocated, decoded);
    }

    #[test]
    fn paste_rows_copies_whole_band() {
        let mut raster = Raster::new(2, 4).unwrap();
        let mut band = Raster::new(2, 2).unwrap();
        band.set(0, 0, Pixel::new(1, 2, 3));
        band.set(1, 1, Pixel::new(4, 5, 6));
        raster.paste_rows(1, &band);
        assert_eq!(raster.get(0, 0), Pixel::default());
        assert_eq!(raster.get(1, 0), Pixel::new(1, 2, 3));
        assert_eq!(raster.get(2, 1), Pixel::new(4, 5, 6));
        assert_eq!(raster.get(3, 1), Pixel::default());
    }

    #[test]
    #[should_panic(expected = "exceeds raster height")]
    fn paste_rows_past_the_end_panics() {
        let mut raster = Raster::new(2, 2).unwrap();
        let band = Raster::new(2, 2).unwrap();
        raster.paste_rows(1, &band);
    }

    #[test]
    fn debug_output_omits_pixel_data() {
        let raster = Raster::new(3, 2).unwrap();
        assert_eq!(format!("{:?}", raster), "Raster { width: 3, height: 2, .. }");
    }
}
