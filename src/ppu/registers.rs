// PPU register handling ($2000-$2007, mirrored through $3FFF)

use super::constants::*;
use super::Ppu;
use crate::cartridge::Cartridge;

impl Ppu {
    /// Read from a PPU register
    ///
    /// # Arguments
    ///
    /// * `addr` - CPU address in $2000-$3FFF (only the low 3 bits matter)
    /// * `cart` - Cartridge, for $2007 reads
    ///
    /// # Register Behaviors
    ///
    /// - PPUSTATUS ($2002): flags in bits 5-7, I/O latch in bits 0-4; clears
    ///   VBlank and the write toggle
    /// - OAMDATA ($2004): OAM byte at OAMADDR (no increment)
    /// - PPUDATA ($2007): buffered VRAM read, palette reads are immediate
    /// - Write-only registers return the I/O latch
    pub fn read_register(&mut self, addr: u16, cart: &mut dyn Cartridge) -> u8 {
        let value = match addr & PPU_REGISTER_MASK {
            2 => {
                let value = (self.status & 0xE0) | (self.io_latch & 0x1F);
                self.status &= !STATUS_VBLANK;
                self.write_latch = false;
                value
            }
            4 => self.oam[self.oam_addr as usize],
            7 => {
                let addr = self.v & 0x3FFF;
                let value = if addr >= 0x3F00 {
                    // Palette is returned directly; the buffer picks up the
                    // nametable byte underneath
                    let value = (self.io_latch & 0xC0) | self.read_vram(addr, cart);
                    self.read_buffer = self.read_vram(addr & 0x2FFF, cart);
                    value
                } else {
                    let value = self.read_buffer;
                    self.read_buffer = self.read_vram(addr, cart);
                    value
                };
                self.increment_vram_addr();
                value
            }
            _ => self.io_latch,
        };

        self.io_latch = value;
        value
    }

    /// Write to a PPU register
    ///
    /// # Arguments
    ///
    /// * `addr` - CPU address in $2000-$3FFF (only the low 3 bits matter)
    /// * `data` - The value to write
    /// * `cart` - Cartridge, for $2007 writes
    pub fn write_register(&mut self, addr: u16, data: u8, cart: &mut dyn Cartridge) {
        self.io_latch = data;

        match addr & PPU_REGISTER_MASK {
            0 => {
                // $2000: PPUCTRL
                let was_enabled = self.ctrl & CTRL_NMI_ENABLE != 0;
                self.ctrl = data;

                // t: ...GH.. ........ <- d: ......GH
                self.t = (self.t & 0xF3FF) | (((data & CTRL_NAMETABLE) as u16) << 10);

                // Turning NMI on during VBlank fires immediately
                if !was_enabled && data & CTRL_NMI_ENABLE != 0 && self.in_vblank() {
                    self.nmi_pending = true;
                }
            }
            1 => {
                // $2001: PPUMASK
                self.mask = data;
                self.rendering_enabled = data & (MASK_SHOW_BG | MASK_SHOW_SPRITES) != 0;
            }
            2 => {
                // $2002: PPUSTATUS is read-only
            }
            3 => {
                // $2003: OAMADDR
                self.oam_addr = data;
            }
            4 => {
                // $2004: OAMDATA
                self.oam[self.oam_addr as usize] = data;
                self.oam_addr = self.oam_addr.wrapping_add(1);
            }
            5 => {
                // $2005: PPUSCROLL
                if !self.write_latch {
                    // t: ....... ...ABCDE <- d: ABCDEFGH
                    // x:              FGH <- d: ABCDEFGH
                    self.t = (self.t & 0xFFE0) | ((data as u16) >> 3);
                    self.fine_x = data & 0x07;
                } else {
                    // t: FGH..AB CDE..... <- d: ABCDEFGH
                    self.t = (self.t & 0x8FFF) | (((data as u16) & 0x07) << 12);
                    self.t = (self.t & 0xFC1F) | (((data as u16) & 0xF8) << 2);
                }
                self.write_latch = !self.write_latch;
            }
            6 => {
                // $2006: PPUADDR
                if !self.write_latch {
                    // t: .CDEFGH ........ <- d: ..CDEFGH
                    // t: X...... ........ <- 0
                    self.t = (self.t & 0x80FF) | (((data as u16) & 0x3F) << 8);
                } else {
                    // t: ....... ABCDEFGH <- d: ABCDEFGH
                    // v: <...all bits...> <- t: <...all bits...>
                    self.t = (self.t & 0xFF00) | (data as u16);
                    self.v = self.t;
                }
                self.write_latch = !self.write_latch;
            }
            _ => {
                // $2007: PPUDATA
                self.write_vram(self.v, data, cart);
                self.increment_vram_addr();
            }
        }
    }

    /// Advance v after a $2007 access by 1 or 32
    fn increment_vram_addr(&mut self) {
        let increment = if self.ctrl & CTRL_INCREMENT_32 != 0 { 32 } else { 1 };
        self.v = self.v.wrapping_add(increment) & 0x7FFF;
    }
}
