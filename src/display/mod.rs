// Display module - Frame output from the PPU to the host
//
// This module provides:
// - NES master palette (64 entries) with color emphasis
// - Frame buffer (256×240 color indices)
// - The sink trait hosts implement to receive finished frames

pub mod framebuffer;
pub mod palette;

pub use framebuffer::{FrameBuffer, SCREEN_HEIGHT, SCREEN_SIZE, SCREEN_WIDTH};
pub use palette::{apply_emphasis, palette_to_rgb, palette_to_rgba, NES_PALETTE};

/// Receiver of completed frames
///
/// Called once per painted frame, after VBlank has started. Dropped frames are
/// never presented.
pub trait VideoSink {
    /// Take a finished frame
    fn present_frame(&mut self, frame: &FrameBuffer);
}

/// A sink that discards every frame
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl VideoSink for NullSink {
    fn present_frame(&mut self, _frame: &FrameBuffer) {}
}

/// A sink that keeps a copy of the most recent frame
#[derive(Default, Clone)]
pub struct CaptureSink {
    /// Number of frames presented so far
    pub frames_presented: u64,
    /// Copy of the last presented frame
    pub last_frame: Option<FrameBuffer>,
}

impl VideoSink for CaptureSink {
    fn present_frame(&mut self, frame: &FrameBuffer) {
        self.frames_presented += 1;
        match &mut self.last_frame {
            Some(buffer) => buffer.clone_from(frame),
            None => self.last_frame = Some(frame.clone()),
        }
    }
}
