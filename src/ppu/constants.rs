// PPU constants

/// PPU register address mask for mirroring ($2000-$2007 repeat through $3FFF)
pub(super) const PPU_REGISTER_MASK: u16 = 0x0007;

/// Size of one nametable bank in bytes (1KB)
pub(super) const NAMETABLE_SIZE: usize = 1024;

/// Size of CIRAM (two nametable banks)
pub(super) const CIRAM_SIZE: usize = 2 * NAMETABLE_SIZE;

/// Size of palette RAM in bytes
pub(super) const PALETTE_SIZE: usize = 32;

/// Size of primary OAM (64 sprites × 4 bytes)
pub(super) const OAM_SIZE: usize = 256;

/// Size of secondary OAM (8 sprites × 4 bytes)
pub(super) const SECONDARY_OAM_SIZE: usize = 32;

/// Sprites that fit on one scanline
pub(super) const MAX_SPRITES_PER_LINE: usize = 8;

/// Visible pixels per scanline
pub(super) const LINE_WIDTH: usize = 256;

// ========================================
// PPUCTRL ($2000) bits
// ========================================

/// Base nametable select (bits 0-1)
pub(super) const CTRL_NAMETABLE: u8 = 0x03;
/// VRAM address increment (0: +1, 1: +32)
pub(super) const CTRL_INCREMENT_32: u8 = 0x04;
/// Sprite pattern table for 8×8 sprites (0: $0000, 1: $1000)
pub(super) const CTRL_SPRITE_TABLE: u8 = 0x08;
/// Background pattern table (0: $0000, 1: $1000)
pub(super) const CTRL_BG_TABLE: u8 = 0x10;
/// Sprite size (0: 8×8, 1: 8×16)
pub(super) const CTRL_SPRITE_SIZE: u8 = 0x20;
/// Generate NMI at the start of VBlank
pub(super) const CTRL_NMI_ENABLE: u8 = 0x80;

// ========================================
// PPUMASK ($2001) bits
// ========================================

/// Grayscale
pub(super) const MASK_GRAYSCALE: u8 = 0x01;
/// Show background in leftmost 8 pixels
pub(super) const MASK_BG_LEFT: u8 = 0x02;
/// Show sprites in leftmost 8 pixels
pub(super) const MASK_SPRITES_LEFT: u8 = 0x04;
/// Show background
pub(super) const MASK_SHOW_BG: u8 = 0x08;
/// Show sprites
pub(super) const MASK_SHOW_SPRITES: u8 = 0x10;

// ========================================
// PPUSTATUS ($2002) bits
// ========================================

/// Sprite overflow
pub(super) const STATUS_SPRITE_OVERFLOW: u8 = 0x20;
/// Sprite 0 hit
pub(super) const STATUS_SPRITE_ZERO_HIT: u8 = 0x40;
/// In VBlank
pub(super) const STATUS_VBLANK: u8 = 0x80;

// ========================================
// Sprite attribute bits
// ========================================

/// Sprite palette (4-7)
pub(super) const ATTR_PALETTE: u8 = 0x03;
/// Priority (0: in front of background, 1: behind)
pub(super) const ATTR_BEHIND: u8 = 0x20;
/// Flip horizontally
pub(super) const ATTR_FLIP_H: u8 = 0x40;
/// Flip vertically
pub(super) const ATTR_FLIP_V: u8 = 0x80;
