// PPU memory access
//
// PPU address space:
// - $0000-$1FFF: Pattern tables (cartridge CHR)
// - $2000-$2FFF: Nametables (CIRAM, or cartridge when it disables CIRAM)
// - $3000-$3EFF: Mirror of $2000-$2EFF
// - $3F00-$3FFF: Palette RAM (32 bytes, mirrored)

use super::constants::{MASK_GRAYSCALE, NAMETABLE_SIZE};
use super::Ppu;
use crate::cartridge::Cartridge;

impl Ppu {
    /// Map a nametable address to a CIRAM index using the cartridge's A10 line
    pub(super) fn ciram_index(addr: u16, cart: &dyn Cartridge) -> usize {
        let bank = cart.ciram_a10(addr) as usize;
        bank * NAMETABLE_SIZE + (addr as usize & (NAMETABLE_SIZE - 1))
    }

    /// Mirror palette address
    ///
    /// Palette RAM has special mirroring: $3F10/$3F14/$3F18/$3F1C are the same
    /// bytes as $3F00/$3F04/$3F08/$3F0C, so sprite color 0 is the backdrop.
    pub(super) fn mirror_palette_addr(addr: u16) -> usize {
        let addr = (addr & 0x001F) as usize;
        if addr >= 16 && addr.is_multiple_of(4) {
            addr - 16
        } else {
            addr
        }
    }

    /// Look up a palette entry, applying grayscale
    #[inline]
    pub(super) fn palette_color(&self, index: u8) -> u8 {
        let color = self.palette_ram[Self::mirror_palette_addr(index as u16)] & 0x3F;
        if self.mask & MASK_GRAYSCALE != 0 {
            color & 0x30
        } else {
            color
        }
    }

    /// Read from PPU memory
    ///
    /// # Arguments
    ///
    /// * `addr` - PPU address (masked to 14 bits)
    /// * `cart` - Cartridge supplying CHR and, optionally, nametables
    pub(super) fn read_vram(&self, addr: u16, cart: &mut dyn Cartridge) -> u8 {
        let addr = addr & 0x3FFF;

        match addr {
            // Pattern tables
            0x0000..=0x1FFF => cart.ppu_read(addr),

            // Nametables and their $3000 mirror
            0x2000..=0x3EFF => {
                let addr = addr & 0x2FFF;
                if cart.ciram_enabled(addr) {
                    self.ciram[Self::ciram_index(addr, cart)]
                } else {
                    cart.ppu_read(addr)
                }
            }

            // Palette RAM
            _ => self.palette_color(addr as u8),
        }
    }

    /// Write to PPU memory
    ///
    /// # Arguments
    ///
    /// * `addr` - PPU address (masked to 14 bits)
    /// * `data` - Byte to store
    /// * `cart` - Cartridge supplying CHR and, optionally, nametables
    pub(super) fn write_vram(&mut self, addr: u16, data: u8, cart: &mut dyn Cartridge) {
        let addr = addr & 0x3FFF;

        match addr {
            0x0000..=0x1FFF => cart.ppu_write(addr, data),

            0x2000..=0x3EFF => {
                let addr = addr & 0x2FFF;
                if cart.ciram_enabled(addr) {
                    self.ciram[Self::ciram_index(addr, cart)] = data;
                } else {
                    cart.ppu_write(addr, data);
                }
            }

            _ => {
                self.palette_ram[Self::mirror_palette_addr(addr)] = data & 0x3F;
            }
        }
    }
}
