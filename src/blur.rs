//! Box blur over an RGB [`Raster`].
//!
//! Every output pixel is the per channel mean of the `WINDOW x WINDOW` input
//! pixels at row offsets `-RADIUS..RADIUS` and column offsets `-RADIUS..RADIUS`
//! around it. Coordinates falling outside of the image are clamped to the
//! nearest edge, so every window holds exactly `AREA` samples.

use std::ops::Range;

use crate::raster::{Pixel, Raster};
use crate::Result;

mod pooled;

pub use pooled::PooledExecutor;

pub const RADIUS: usize = 4;
pub const WINDOW: usize = 2 * RADIUS;
pub const AREA: u32 = (WINDOW * WINDOW) as u32;

/// Strategy computing a blurred image into a preallocated output.
pub trait BlurExecutor {
    /// Overwrites every pixel of `output` with the blurred pixels of `input`.
    ///
    /// Fails only if the executor cannot allocate its scratch buffers.
    /// Panics if the dimensions of `input` and `output` differ.
    fn blur_into(&self, input: &Raster, output: &mut Raster) -> Result<()>;
}

/// Computes all rows on the calling thread. Reference for every other executor.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialExecutor;

impl BlurExecutor for SequentialExecutor {
    fn blur_into(&self, input: &Raster, output: &mut Raster) -> Result<()> {
        check_same_dimensions(input, output);
        blur_rows(input, 0..input.height(), output);
        Ok(())
    }
}

/// Blurs `input` on the calling thread.
pub fn blur(input: &Raster) -> Result<Raster> {
    blur_with(&SequentialExecutor, input)
}

/// Blurs `input` with the given executor into a freshly allocated raster.
pub fn blur_with(executor: &dyn BlurExecutor, input: &Raster) -> Result<Raster> {
    let mut output = Raster::new(input.width(), input.height())?;
    executor.blur_into(input, &mut output)?;
    Ok(output)
}

fn check_same_dimensions(input: &Raster, output: &Raster) {
    assert!(
        input.width() == output.width() && input.height() == output.height(),
        "Output raster {}x{} does not match input raster {}x{}",
        output.width(),
        output.height(),
        input.width(),
        input.height()
    );
}

/// Blurs the input rows in `rows` and writes them to `band`, whose row 0
/// corresponds to `rows.start`.
pub(crate) fn blur_rows(input: &Raster, rows: Range<usize>, band: &mut Raster) {
    let first_row = rows.start;
    for row in rows {
        for col in 0..input.width() {
            band.set(row - first_row, col, blur_pixel(input, row, col));
        }
    }
}

fn blur_pixel(input: &Raster, row: usize, col: usize) -> Pixel {
    let mut sum = [0u32; 3];
    for dy in window_offsets() {
        let source_row = clamp_to_edge(row, dy, input.height());
        for dx in window_offsets() {
            let source_col = clamp_to_edge(col, dx, input.width());
            let pixel = input.get(source_row, source_col);
            sum[0] += pixel.r as u32;
            sum[1] += pixel.g as u32;
            sum[2] += pixel.b as u32;
        }
    }
    Pixel::from_saturating(sum[0] / AREA, sum[1] / AREA, sum[2] / AREA)
}

fn window_offsets() -> Range<isize> {
    -(RADIUS as isize)..RADIUS as isize
}

fn clamp_to_edge(center: usize, offset: isize, length: usize) -> usize {
    (center as isize + offset).clamp(0, length as isize - 1) as usize
}
