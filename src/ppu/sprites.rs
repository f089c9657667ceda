// Sprite pipeline - secondary OAM evaluation and per-slot pattern fetches
//
// Evaluation on scanline N selects the sprites shown on scanline N + 1 (OAM Y
// holds the sprite's top row minus one). The slot fetches at dots 256-319
// decode those sprites into a line buffer that the next line's tile renders
// read from.

use super::constants::*;
use super::rendering::tile_pixel;
use super::Ppu;
use crate::cartridge::Cartridge;

impl Ppu {
    /// Sprite height from PPUCTRL (8 or 16)
    #[inline]
    fn sprite_height(&self) -> u16 {
        if self.ctrl & CTRL_SPRITE_SIZE != 0 {
            16
        } else {
            8
        }
    }

    /// Fill secondary OAM with $FF and forget the previous evaluation
    pub fn clear_secondary_oam(&mut self) {
        self.secondary_oam.fill(0xFF);
        self.sprite_count = 0;
        self.sprite_zero_in_range = false;
    }

    /// Empty the sprite line buffer read by the next line's tile renders
    pub fn clear_sprite_line(&mut self) {
        self.sprite_pixels.fill(0);
        self.sprite_behind.fill(false);
        self.sprite_zero_pixels.fill(false);
    }

    /// Select up to 8 sprites in range of `scanline`
    ///
    /// Sprites are scanned in OAM order. After the eighth hit the hardware
    /// keeps looking for a ninth to set the overflow flag, but it advances the
    /// byte offset together with the sprite index, so it compares tile, attribute
    /// and X bytes as if they were Y coordinates. That walk is reproduced here,
    /// including false positives and missed overflows.
    pub fn evaluate_sprites(&mut self, scanline: u16) {
        let height = self.sprite_height();
        let in_range = |y: u8| scanline >= y as u16 && scanline < y as u16 + height;

        self.sprite_count = 0;
        self.sprite_zero_in_range = false;
        self.sprite_line = scanline;

        let mut n = 0;
        let mut m = 0;
        while n < 64 {
            if self.sprite_count < MAX_SPRITES_PER_LINE {
                let entry = n * 4;
                if in_range(self.oam[entry]) {
                    let slot = self.sprite_count * 4;
                    self.secondary_oam[slot..slot + 4].copy_from_slice(&self.oam[entry..entry + 4]);
                    if n == 0 {
                        self.sprite_zero_in_range = true;
                    }
                    self.sprite_count += 1;
                }
                n += 1;
            } else if in_range(self.oam[n * 4 + m]) {
                self.status |= STATUS_SPRITE_OVERFLOW;
                break;
            } else {
                n += 1;
                m = (m + 1) & 3;
            }
        }

        self.eval_oam_addr = ((n * 4 + m) & 0xFF) as u8;
    }

    /// Decode the sprite in a secondary OAM slot into the line buffer
    ///
    /// Slot 0 starts a new line buffer. Slots past the number of sprites found
    /// contribute nothing. Lower slots win where sprites overlap, which keeps
    /// the OAM-order priority of the hardware (including its behind-background
    /// quirk).
    pub fn fetch_sprite(&mut self, slot: usize, cart: &mut dyn Cartridge) {
        if slot == 0 {
            self.clear_sprite_line();
        }
        if slot >= self.sprite_count {
            return;
        }

        let entry = slot * 4;
        let y = self.secondary_oam[entry];
        let tile = self.secondary_oam[entry + 1];
        let attr = self.secondary_oam[entry + 2];
        let x = self.secondary_oam[entry + 3] as usize;

        let height = self.sprite_height();
        let mut row = self.sprite_line.wrapping_sub(y as u16);
        if row >= height {
            return;
        }
        if attr & ATTR_FLIP_V != 0 {
            row = height - 1 - row;
        }

        let addr = if height == 16 {
            // 8×16: bank from bit 0, top tile even, bottom tile odd
            let bank = (tile as u16 & 0x01) * 0x1000;
            let top = (tile & 0xFE) as u16;
            let tile = if row >= 8 { top + 1 } else { top };
            bank + tile * 16 + (row & 0x07)
        } else {
            let base = if self.ctrl & CTRL_SPRITE_TABLE != 0 { 0x1000 } else { 0x0000 };
            base + (tile as u16) * 16 + row
        };
        let plane0 = self.read_vram(addr, cart);
        let plane1 = self.read_vram(addr + 8, cart);

        let palette = attr & ATTR_PALETTE;
        let behind = attr & ATTR_BEHIND != 0;
        let sprite_zero = slot == 0 && self.sprite_zero_in_range;

        for i in 0..8u8 {
            let px = x + i as usize;
            if px >= LINE_WIDTH {
                break;
            }
            let bit = if attr & ATTR_FLIP_H != 0 { i } else { 7 - i };
            let pixel = tile_pixel(plane0, plane1, bit, palette);
            if pixel == 0 || self.sprite_pixels[px] != 0 {
                continue;
            }
            self.sprite_pixels[px] = 0x10 | pixel;
            self.sprite_behind[px] = behind;
            self.sprite_zero_pixels[px] = sprite_zero;
        }
    }
}
