// PPU rendering - background tile pipeline and pixel composition

use super::constants::*;
use super::Ppu;
use crate::cartridge::Cartridge;
use crate::emulator::timing::TimingMode;

impl Ppu {
    /// Fetch the tile v points at into the background buffer
    ///
    /// Reads the nametable byte, the attribute byte and both pattern planes,
    /// then shifts the buffer one tile left and appends the 8 new pixels.
    pub fn fetch_tile(&mut self, cart: &mut dyn Cartridge) {
        let v = self.v;

        // Nametable byte: 0010 NNYY YYYX XXXX
        let tile = self.read_vram(0x2000 | (v & 0x0FFF), cart);

        // Attribute byte: 0010 NN11 11YY YXXX (high 3 bits of coarse Y/X)
        let attr_addr = 0x23C0 | (v & 0x0C00) | ((v >> 4) & 0x38) | ((v >> 2) & 0x07);
        let attr = self.read_vram(attr_addr, cart);

        // Quadrant within the 32×32 area: bit 1 of coarse Y and bit 1 of coarse X
        let shift = ((v >> 4) & 0x04) | (v & 0x02);
        let palette = (attr >> shift) & 0x03;

        let fine_y = (v >> 12) & 0x07;
        let base = if self.ctrl & CTRL_BG_TABLE != 0 { 0x1000 } else { 0x0000 };
        let addr = base + (tile as u16) * 16 + fine_y;
        let plane0 = self.read_vram(addr, cart);
        let plane1 = self.read_vram(addr + 8, cart);

        self.bg_pixels.copy_within(8..16, 0);
        for i in 0..8 {
            self.bg_pixels[8 + i] = tile_pixel(plane0, plane1, 7 - i as u8, palette);
        }
    }

    /// Output 8 pixels of a visible scanline
    ///
    /// # Arguments
    ///
    /// * `scanline` - Visible scanline (0-239)
    /// * `tile` - Tile column (0-31); pixels `tile * 8 .. tile * 8 + 8` are drawn
    ///
    /// Reads the background buffer shifted by fine X and the sprite line buffer,
    /// applies left-column clipping, detects sprite 0 hit and composites
    /// backdrop, sprites behind, background, then sprites in front.
    pub fn render_tile(&mut self, scanline: u16, tile: usize) {
        let show_bg = self.mask & MASK_SHOW_BG != 0;
        let show_sprites = self.mask & MASK_SHOW_SPRITES != 0;
        let emphasis = self.emphasis();
        let y = scanline as usize;

        for i in 0..8 {
            let x = tile * 8 + i;
            let left = x < 8;

            let bg = if show_bg && !(left && self.mask & MASK_BG_LEFT == 0) {
                self.bg_pixels[self.fine_x as usize + i]
            } else {
                0
            };

            let sprite = if show_sprites && !(left && self.mask & MASK_SPRITES_LEFT == 0) {
                self.sprite_pixels[x]
            } else {
                0
            };

            if sprite != 0 && bg != 0 && self.sprite_zero_pixels[x] && x != 255 {
                self.status |= STATUS_SPRITE_ZERO_HIT;
            }

            let index = if sprite != 0 && (bg == 0 || !self.sprite_behind[x]) {
                sprite
            } else {
                bg
            };

            let color = self.palette_color(index);
            self.frame.set_pixel(x, y, color, emphasis);
        }
    }

    /// Emphasis bits of PPUMASK normalized to R/G/B order
    ///
    /// PAL consoles swap the red and green bits.
    fn emphasis(&self) -> u8 {
        let bits = self.mask >> 5;
        match self.timing_mode {
            TimingMode::Ntsc => bits,
            TimingMode::Pal => (bits & 0b100) | ((bits & 0b001) << 1) | ((bits & 0b010) >> 1),
        }
    }
}

/// Combine the two pattern planes at one bit position into a pixel
///
/// Returns `palette << 2 | color`, or 0 when the color is transparent.
#[inline]
pub(super) fn tile_pixel(plane0: u8, plane1: u8, bit: u8, palette: u8) -> u8 {
    let color = ((plane0 >> bit) & 0x01) | (((plane1 >> bit) & 0x01) << 1);
    if color == 0 {
        0
    } else {
        (palette << 2) | color
    }
}
