// PPU module - Picture Processing Unit (2C02)
//
// The PPU does not clock itself. The scheduler calls the per-dot operations
// (tile fetch, tile render, scroll increments, sprite evaluation and fetch,
// VBlank start/end) at the dots the hardware performs them, and the bus routes
// register traffic at $2000-$3FFF here.
//
// Cartridge access is passed in on every call that touches pattern or
// nametable memory, so the PPU never owns or points at the cartridge.

mod constants;
mod memory;
mod registers;
mod rendering;
mod scroll;
mod sprites;

#[cfg(test)]
mod tests;

use constants::*;

use crate::display::FrameBuffer;
use crate::emulator::timing::TimingMode;

/// PPU state
pub struct Ppu {
    // ========================================
    // CPU-visible registers
    // ========================================
    /// $2000 PPUCTRL
    ctrl: u8,
    /// $2001 PPUMASK
    mask: u8,
    /// $2002 PPUSTATUS (bits 5-7 only)
    status: u8,
    /// $2003 OAMADDR
    oam_addr: u8,

    // ========================================
    // Internal scroll registers
    // ========================================
    /// Current VRAM address (15 bits)
    ///
    /// ```text
    /// yyy NN YYYYY XXXXX
    /// ||| || ||||| +++++-- coarse X scroll
    /// ||| || +++++-------- coarse Y scroll
    /// ||| ++-------------- nametable select
    /// +++----------------- fine Y scroll
    /// ```
    v: u16,
    /// Temporary VRAM address (same layout as v)
    t: u16,
    /// Fine X scroll (3 bits)
    fine_x: u8,
    /// First/second write toggle shared by $2005 and $2006
    write_latch: bool,

    /// $2007 read buffer
    read_buffer: u8,
    /// Last value driven on the PPU data bus (returned for write-only registers)
    io_latch: u8,

    // ========================================
    // Memory
    // ========================================
    /// Console-internal nametable RAM (two 1KB banks)
    ciram: [u8; CIRAM_SIZE],
    /// Palette RAM (background 0-15, sprites 16-31)
    palette_ram: [u8; PALETTE_SIZE],
    /// Primary OAM
    oam: [u8; OAM_SIZE],
    /// Secondary OAM, rebuilt every scanline
    secondary_oam: [u8; SECONDARY_OAM_SIZE],

    // ========================================
    // Background pipeline
    // ========================================
    /// Two tiles of background pixels (`palette << 2 | color`, 0 = transparent)
    bg_pixels: [u8; 16],

    // ========================================
    // Sprite pipeline
    // ========================================
    /// Sprites found by the last evaluation
    sprite_count: usize,
    /// Whether OAM entry 0 was copied to slot 0 by the last evaluation
    sprite_zero_in_range: bool,
    /// Scanline the last evaluation ran on
    sprite_line: u16,
    /// OAM address left behind by the last evaluation
    eval_oam_addr: u8,
    /// Sprite layer for the next line (`0x10 | palette << 2 | color`, 0 = transparent)
    sprite_pixels: [u8; LINE_WIDTH],
    /// Priority bit of the sprite owning each pixel
    sprite_behind: [bool; LINE_WIDTH],
    /// Opaque pixels belonging to sprite 0
    sprite_zero_pixels: [bool; LINE_WIDTH],

    // ========================================
    // Frame state
    // ========================================
    /// Whether background or sprite rendering is enabled
    rendering_enabled: bool,
    /// NMI raised and not yet taken by the CPU
    nmi_pending: bool,
    /// Emphasis bit layout
    timing_mode: TimingMode,
    /// Output pixels
    frame: FrameBuffer,
}

impl Ppu {
    /// Create a PPU in its power-on state
    pub fn new() -> Self {
        Ppu {
            ctrl: 0,
            mask: 0,
            status: 0,
            oam_addr: 0,
            v: 0,
            t: 0,
            fine_x: 0,
            write_latch: false,
            read_buffer: 0,
            io_latch: 0,
            ciram: [0; CIRAM_SIZE],
            palette_ram: [0; PALETTE_SIZE],
            oam: [0; OAM_SIZE],
            secondary_oam: [0xFF; SECONDARY_OAM_SIZE],
            bg_pixels: [0; 16],
            sprite_count: 0,
            sprite_zero_in_range: false,
            sprite_line: 0,
            eval_oam_addr: 0,
            sprite_pixels: [0; LINE_WIDTH],
            sprite_behind: [false; LINE_WIDTH],
            sprite_zero_pixels: [false; LINE_WIDTH],
            rendering_enabled: false,
            nmi_pending: false,
            timing_mode: TimingMode::Ntsc,
            frame: FrameBuffer::new(),
        }
    }

    /// Reset button behavior
    ///
    /// Clears PPUCTRL, PPUMASK, the write toggle and the read buffer. VRAM,
    /// OAM, palette RAM and the VBlank flag keep their values.
    pub fn reset(&mut self) {
        self.ctrl = 0;
        self.mask = 0;
        self.write_latch = false;
        self.read_buffer = 0;
        self.fine_x = 0;
        self.t = 0;
        self.rendering_enabled = false;
        self.nmi_pending = false;
    }

    /// Select how the emphasis bits of PPUMASK are interpreted
    pub fn set_timing_mode(&mut self, mode: TimingMode) {
        self.timing_mode = mode;
    }

    // ========================================
    // VBlank
    // ========================================

    /// Enter VBlank (scanline 241, dot 1)
    ///
    /// Sets the VBlank flag and raises an NMI when PPUCTRL allows it.
    pub fn do_vblank(&mut self) {
        self.status |= STATUS_VBLANK;
        if self.ctrl & CTRL_NMI_ENABLE != 0 {
            self.nmi_pending = true;
        }
    }

    /// Leave VBlank (pre-render scanline, dot 1)
    ///
    /// Clears the per-frame status latches and latches whether rendering is
    /// enabled for the coming frame.
    pub fn end_vblank(&mut self) {
        self.status &= !(STATUS_VBLANK | STATUS_SPRITE_ZERO_HIT | STATUS_SPRITE_OVERFLOW);
        self.rendering_enabled = self.mask & (MASK_SHOW_BG | MASK_SHOW_SPRITES) != 0;
    }

    /// Take a pending NMI, clearing it
    pub fn take_nmi(&mut self) -> bool {
        std::mem::take(&mut self.nmi_pending)
    }

    // ========================================
    // Accessors
    // ========================================

    /// Whether background or sprites are enabled
    #[inline]
    pub fn is_rendering_enabled(&self) -> bool {
        self.rendering_enabled
    }

    /// Current VRAM address register
    pub fn v(&self) -> u16 {
        self.v
    }

    /// Temporary VRAM address register
    pub fn t(&self) -> u16 {
        self.t
    }

    /// Fine X scroll
    pub fn fine_x(&self) -> u8 {
        self.fine_x
    }

    /// PPUCTRL as last written
    pub fn ctrl(&self) -> u8 {
        self.ctrl
    }

    /// PPUMASK as last written
    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Status flags without read side effects
    pub fn status(&self) -> u8 {
        self.status
    }

    /// Whether VBlank is in progress
    pub fn in_vblank(&self) -> bool {
        self.status & STATUS_VBLANK != 0
    }

    /// Whether sprite overflow has been flagged this frame
    pub fn sprite_overflow(&self) -> bool {
        self.status & STATUS_SPRITE_OVERFLOW != 0
    }

    /// Whether sprite 0 hit has been flagged this frame
    pub fn sprite_zero_hit(&self) -> bool {
        self.status & STATUS_SPRITE_ZERO_HIT != 0
    }

    /// Primary OAM
    pub fn oam(&self) -> &[u8; OAM_SIZE] {
        &self.oam
    }

    /// Secondary OAM as built by the last evaluation
    pub fn secondary_oam(&self) -> &[u8; SECONDARY_OAM_SIZE] {
        &self.secondary_oam
    }

    /// Number of sprites found by the last evaluation
    pub fn sprite_count(&self) -> usize {
        self.sprite_count
    }

    /// OAM address reached when the last evaluation stopped
    pub fn eval_oam_addr(&self) -> u8 {
        self.eval_oam_addr
    }

    /// Completed (or in-progress) frame
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Store one byte through the OAM DMA port
    ///
    /// Same effect as a $2004 write: OAM[OAMADDR] = data, then OAMADDR + 1.
    pub fn write_oam_dma(&mut self, data: u8) {
        self.oam[self.oam_addr as usize] = data;
        self.oam_addr = self.oam_addr.wrapping_add(1);
    }
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}
