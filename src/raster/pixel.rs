const CHANNEL_MAX: u32 = u8::MAX as u32;

/// A single RGB dot with 8 bits per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Narrows wide channel values, clamping everything above 255 to 255.
    pub fn from_saturating(r: u32, g: u32, b: u32) -> Self {
        Self {
            r: saturate(r),
            g: saturate(g),
            b: saturate(b),
        }
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Pixel {
    fn from(value: [u8; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

fn saturate(value: u32) -> u8 {
    value.min(CHANNEL_MAX) as u8
}

#[cfg(test)]
mod tests {
    use super::Pixel;

    #[test]
    fn from_saturating_keeps_values_in_range() {
        let pixel = Pixel::from_saturating(0, 128, 255);
        assert_eq!(pixel, Pixel::new(0, 128, 255));
    }

    #[test]
    fn from_saturating_clamps_overflowing_channels() {
        let pixel = Pixel::from_saturating(256, 16_320, u32::MAX);
        assert_eq!(pixel, Pixel::new(255, 255, 255));
    }

    #[test]
    fn channels_are_in_rgb_order() {
        let pixel = Pixel::from([1, 2, 3]);
        assert_eq!(pixel.channels(), [1, 2, 3]);
        assert_eq!(pixel.r, 1);
        assert_eq!(pixel.b, 3);
    }
}
