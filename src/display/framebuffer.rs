// Frame Buffer - PPU output for one frame
//
// The NES has a resolution of 256×240 pixels. Each pixel stores what the PPU
// actually drives onto the video line: a 6-bit color index (bits 0-5) and three
// emphasis bits (bits 6-8, red/green/blue order).

use super::palette::{apply_emphasis, palette_to_rgb, rgb_to_rgba};

/// NES screen width in pixels
pub const SCREEN_WIDTH: usize = 256;

/// NES screen height in pixels
pub const SCREEN_HEIGHT: usize = 240;

/// Total number of pixels in the frame buffer
pub const SCREEN_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// Frame buffer for one PPU frame
#[derive(Clone)]
pub struct FrameBuffer {
    /// Pixels as `emphasis << 6 | color_index`
    pixels: Vec<u16>,
}

impl FrameBuffer {
    /// Create a new frame buffer filled with black (color $0F)
    pub fn new() -> Self {
        Self {
            pixels: vec![0x0F; SCREEN_SIZE],
        }
    }

    /// Set a pixel at the given coordinates
    ///
    /// # Arguments
    /// * `x` - X coordinate (0-255)
    /// * `y` - Y coordinate (0-239)
    /// * `color_index` - Color index (0-63)
    /// * `emphasis` - Emphasis bits in R/G/B order (0-7)
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color_index: u8, emphasis: u8) {
        assert!(x < SCREEN_WIDTH, "X coordinate {} out of bounds", x);
        assert!(y < SCREEN_HEIGHT, "Y coordinate {} out of bounds", y);

        self.pixels[y * SCREEN_WIDTH + x] =
            ((emphasis as u16 & 0x07) << 6) | (color_index as u16 & 0x3F);
    }

    /// Get the color index of a pixel (emphasis stripped)
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u8 {
        (self.get_raw(x, y) & 0x3F) as u8
    }

    /// Get the emphasis bits of a pixel
    #[inline]
    pub fn get_emphasis(&self, x: usize, y: usize) -> u8 {
        (self.get_raw(x, y) >> 6) as u8
    }

    #[inline]
    fn get_raw(&self, x: usize, y: usize) -> u16 {
        assert!(x < SCREEN_WIDTH, "X coordinate {} out of bounds", x);
        assert!(y < SCREEN_HEIGHT, "Y coordinate {} out of bounds", y);

        self.pixels[y * SCREEN_WIDTH + x]
    }

    /// Fill the whole frame with one color index and no emphasis
    pub fn clear(&mut self, color_index: u8) {
        self.pixels.fill(color_index as u16 & 0x3F);
    }

    /// Raw pixel words (`emphasis << 6 | color_index`)
    pub fn as_slice(&self) -> &[u16] {
        &self.pixels
    }

    /// Convert the frame to RGBA8 through the master palette
    ///
    /// # Arguments
    /// * `output` - Output buffer (must be at least SCREEN_SIZE * 4 bytes)
    ///
    /// # Panics
    /// Panics if output buffer is too small
    pub fn to_rgba(&self, output: &mut [u8]) {
        assert!(
            output.len() >= SCREEN_SIZE * 4,
            "Output buffer too small for RGBA conversion"
        );

        for (pixel, out) in self.pixels.iter().zip(output.chunks_exact_mut(4)) {
            let index = (pixel & 0x3F) as u8;
            let emphasis = (pixel >> 6) as u8;
            let rgb = apply_emphasis(index, palette_to_rgb(index), emphasis);
            out.copy_from_slice(&rgb_to_rgba(rgb));
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
