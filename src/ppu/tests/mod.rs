//! PPU unit tests
//!
//! Organized by functionality: register I/O, memory mapping, scroll algebra,
//! the background pipeline and the sprite pipeline.

use super::*;
use crate::cartridge::{Cartridge, Mirroring, Nrom};

// ========================================
// Test Constants (PPU Register Addresses)
// ========================================

/// PPU Control Register ($2000) - Write only
pub(crate) const PPUCTRL: u16 = 0x2000;
/// PPU Mask Register ($2001) - Write only
pub(crate) const PPUMASK: u16 = 0x2001;
/// PPU Status Register ($2002) - Read only
pub(crate) const PPUSTATUS: u16 = 0x2002;
/// OAM Address Port ($2003) - Write only
pub(crate) const OAMADDR: u16 = 0x2003;
/// OAM Data Port ($2004) - Read/Write
pub(crate) const OAMDATA: u16 = 0x2004;
/// Scroll Position Register ($2005) - Write×2
pub(crate) const PPUSCROLL: u16 = 0x2005;
/// PPU Address Register ($2006) - Write×2
pub(crate) const PPUADDR: u16 = 0x2006;
/// PPU Data Port ($2007) - Read/Write
pub(crate) const PPUDATA: u16 = 0x2007;

// ========================================
// Test Helper Functions
// ========================================

/// Cartridge with 8KB CHR-RAM and vertical mirroring
pub(crate) fn test_cart() -> Nrom {
    Nrom::with_chr_ram(vec![0; 0x4000], Mirroring::Vertical)
}

/// Point v at `addr` through $2006
pub(crate) fn set_vram_addr(ppu: &mut Ppu, cart: &mut Nrom, addr: u16) {
    ppu.write_latch = false;
    ppu.write_register(PPUADDR, (addr >> 8) as u8, cart);
    ppu.write_register(PPUADDR, (addr & 0xFF) as u8, cart);
}

/// Write one byte of VRAM through $2006/$2007
pub(crate) fn poke_vram(ppu: &mut Ppu, cart: &mut Nrom, addr: u16, data: u8) {
    set_vram_addr(ppu, cart, addr);
    ppu.write_register(PPUDATA, data, cart);
}

/// Read one byte of VRAM through $2006/$2007, skipping the read buffer delay
pub(crate) fn peek_vram(ppu: &mut Ppu, cart: &mut Nrom, addr: u16) -> u8 {
    set_vram_addr(ppu, cart, addr);
    if addr & 0x3FFF >= 0x3F00 {
        ppu.read_register(PPUDATA, cart)
    } else {
        // First read primes the buffer with `addr`, second read returns it
        ppu.read_register(PPUDATA, cart);
        ppu.read_register(PPUDATA, cart)
    }
}

/// Store one row of an 8×8 tile in CHR-RAM
pub(crate) fn set_tile_row(cart: &mut Nrom, addr_base: u16, tile: u8, row: u16, plane0: u8, plane1: u8) {
    let addr = addr_base + tile as u16 * 16 + row;
    cart.ppu_write(addr, plane0);
    cart.ppu_write(addr + 8, plane1);
}

// ========================================
// Test Modules
// ========================================

mod rendering;
