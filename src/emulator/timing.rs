// Frame timing - scanline/dot layout of a frame and its CPU-cycle mapping
//
// The PPU runs three dots per CPU cycle. A frame is 262 scanlines of 341 dots,
// with one dot skipped on every other frame when rendering is enabled; the
// scheduler averages that as half a dot per frame.

use serde::{Deserialize, Serialize};

/// Dots per scanline
pub const DOTS_PER_SCANLINE: u32 = 341;

/// Scanlines per frame (NTSC)
pub const SCANLINES_PER_FRAME: u32 = 262;

/// Last visible scanline
pub const LAST_VISIBLE_SCANLINE: u16 = 239;

/// Post-render (idle) scanline
pub const POSTRENDER_SCANLINE: u16 = 240;

/// Scanline on which VBlank starts
pub const VBLANK_SCANLINE: u16 = 241;

/// Pre-render scanline, on which VBlank ends
pub const PRERENDER_SCANLINE: u16 = 261;

/// CPU cycles in one frame: `(341 * 261 + 340.5) / 3`
pub const CYCLES_PER_FRAME: f64 = (341.0 * 261.0 + 340.5) / 3.0;

/// Nominal duration of one frame in milliseconds
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Video timing standard
///
/// Only affects how the PPU interprets the emphasis bits of $2001; frame
/// geometry is NTSC in both cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimingMode {
    #[default]
    Ntsc,
    Pal,
}

/// CPU cycle (relative to the frame start) at which a dot is reached
///
/// # Example
/// ```
/// use nes_core::emulator::timing::dot_to_cycle;
///
/// assert_eq!(dot_to_cycle(0, 3), 1.0);
/// assert_eq!(dot_to_cycle(1, 0), 341.0 / 3.0);
/// ```
#[inline]
pub fn dot_to_cycle(scanline: u16, dot: u16) -> f64 {
    (scanline as f64 * DOTS_PER_SCANLINE as f64 + dot as f64) / 3.0
}

/// Where the scheduler currently is within a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before the first frame has started
    Boot,
    /// Rendering a visible scanline (0-239)
    Visible(u16),
    /// Idle line 240
    PostRender,
    /// Lines 241-260
    VBlank,
    /// Line 261
    PreRender,
}
