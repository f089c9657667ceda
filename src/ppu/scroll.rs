// Scroll register algebra on v/t
//
// These are pure bit operations. Whether they run at all (they only happen
// while rendering is enabled) is the scheduler's decision.

use super::Ppu;

/// Coarse X (bits 0-4)
const COARSE_X: u16 = 0x001F;
/// Coarse Y (bits 5-9)
const COARSE_Y: u16 = 0x03E0;
/// Horizontal nametable select (bit 10)
const NAMETABLE_X: u16 = 0x0400;
/// Vertical nametable select (bit 11)
const NAMETABLE_Y: u16 = 0x0800;
/// Fine Y (bits 12-14)
const FINE_Y: u16 = 0x7000;

impl Ppu {
    /// Move v one tile to the right
    ///
    /// When coarse X wraps past 31 the horizontal nametable bit flips.
    pub fn increment_x(&mut self) {
        if self.v & COARSE_X == 31 {
            self.v &= !COARSE_X;
            self.v ^= NAMETABLE_X;
        } else {
            self.v += 1;
        }
    }

    /// Move v one pixel row down
    ///
    /// Fine Y carries into coarse Y. Coarse Y 29 wraps to 0 and flips the
    /// vertical nametable bit; coarse Y 31 (attribute rows) wraps to 0 without
    /// flipping.
    pub fn increment_y(&mut self) {
        if self.v & FINE_Y != FINE_Y {
            self.v += 0x1000;
            return;
        }

        self.v &= !FINE_Y;
        let mut coarse_y = (self.v & COARSE_Y) >> 5;
        match coarse_y {
            29 => {
                coarse_y = 0;
                self.v ^= NAMETABLE_Y;
            }
            31 => coarse_y = 0,
            _ => coarse_y += 1,
        }
        self.v = (self.v & !COARSE_Y) | (coarse_y << 5);
    }

    /// Copy the horizontal bits of t into v (coarse X, nametable X)
    pub fn reset_x(&mut self) {
        let bits = COARSE_X | NAMETABLE_X;
        self.v = (self.v & !bits) | (self.t & bits);
    }

    /// Copy the vertical bits of t into v (fine Y, coarse Y, nametable Y)
    pub fn reset_y(&mut self) {
        let bits = FINE_Y | COARSE_Y | NAMETABLE_Y;
        self.v = (self.v & !bits) | (self.t & bits);
    }
}
