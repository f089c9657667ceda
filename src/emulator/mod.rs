// Emulator module - Frame scheduler
//
// Owns the CPU and the bus and advances them one frame at a time. The PPU
// work of each scanline happens at fixed dots; before every PPU step the CPU
// is run up to the cycle that dot corresponds to, so register writes land
// between the same two PPU operations they would on hardware.
//
// Visible scanline layout:
//
// ```text
// dot 0          clear secondary OAM
// dot 0..248/8   render 8 pixels, fetch the next tile, coarse X++
// dot 64         sprite evaluation for the next line
// dot 256        fine/coarse Y++, copy horizontal bits t -> v
// dot 256..312/8 sprite pattern fetches (one slot each)
// dot 320, 328   fetch the first two tiles of the next line
// ```

pub mod config;
pub mod pacing;
pub mod timing;

pub use config::{CpuConfig, EmulatorConfig, TimingConfig};
pub use pacing::{PaceDecision, Pacer};
pub use timing::{Phase, TimingMode};

use crate::apu::Apu;
use crate::bus::{Bus, Port};
use crate::cartridge::{Cartridge, EmptyCartridge};
use crate::cpu::Cpu;
use crate::display::{FrameBuffer, VideoSink};
use crate::input::Controller;
use timing::{
    dot_to_cycle, CYCLES_PER_FRAME, LAST_VISIBLE_SCANLINE, POSTRENDER_SCANLINE,
    PRERENDER_SCANLINE, VBLANK_SCANLINE,
};

/// Dot of the first sprite evaluation step
const SPRITE_EVAL_DOT: u16 = 64;

/// Dot of the vertical scroll increment
const INCREMENT_Y_DOT: u16 = 256;

/// Dots of the next-line tile prefetches
const PREFETCH_DOTS: [u16; 2] = [320, 328];

/// Dots over which the pre-render line copies vertical bits t -> v
const RESET_Y_DOTS: [u16; 2] = [280, 304];

/// Main emulator structure
///
/// # Example
///
/// ```
/// use nes_core::{Emulator, NullSink};
///
/// let mut emulator = Emulator::new();
/// emulator.run_frame(&mut NullSink);
/// assert_eq!(emulator.frame_count(), 1);
/// ```
pub struct Emulator {
    /// CPU (6502 processor)
    cpu: Cpu,

    /// Bus (owns the PPU, APU, cartridge and controllers)
    bus: Bus,

    /// Configuration
    config: EmulatorConfig,

    /// Host-time pacing
    pacer: Pacer,

    /// Where the scheduler is within the frame
    phase: Phase,

    /// Frames completed since power-on, painted or not
    frame_count: u64,

    /// Paused state
    paused: bool,
}

impl Emulator {
    /// Create a powered-on emulator with no cartridge
    pub fn new() -> Self {
        Self::with_config(Box::new(EmptyCartridge), EmulatorConfig::default())
    }

    /// Create a powered-on emulator with a cartridge inserted
    pub fn with_cartridge(cartridge: Box<dyn Cartridge>) -> Self {
        Self::with_config(cartridge, EmulatorConfig::default())
    }

    /// Create a powered-on emulator with a cartridge and configuration
    pub fn with_config(cartridge: Box<dyn Cartridge>, config: EmulatorConfig) -> Self {
        let mut emulator = Emulator {
            cpu: Cpu::new(),
            bus: Bus::with_cartridge(cartridge),
            pacer: Pacer::new(&config.timing),
            config,
            phase: Phase::Boot,
            frame_count: 0,
            paused: false,
        };
        emulator.apply_config();
        emulator.power_on();
        emulator
    }

    /// Push configuration into the components
    fn apply_config(&mut self) {
        self.cpu.set_jam_behavior(self.config.cpu.jam);
        self.bus.ppu.set_timing_mode(self.config.timing.mode);
        self.pacer = Pacer::new(&self.config.timing);
    }

    /// Replace the configuration
    pub fn set_config(&mut self, config: EmulatorConfig) {
        self.config = config;
        self.apply_config();
    }

    // ========================================
    // Lifecycle
    // ========================================

    /// Power cycle the console
    ///
    /// RAM and the PPU return to their power-on state and the CPU restarts
    /// from the reset vector. The cartridge, APU and controllers are kept.
    pub fn power_on(&mut self) {
        self.bus.power_on();
        self.bus.ppu.set_timing_mode(self.config.timing.mode);
        self.cpu.power_on(&mut self.bus);
        self.phase = Phase::Boot;
        self.frame_count = 0;
        self.paused = false;
        self.pacer.resume();
    }

    /// Press the reset button
    ///
    /// Memory survives; the CPU runs its reset sequence.
    pub fn reset(&mut self) {
        self.bus.reset();
        self.cpu.reset(&mut self.bus);
        self.paused = false;
        self.pacer.resume();
    }

    /// Insert a cartridge and power cycle
    pub fn insert_cartridge(&mut self, cartridge: Box<dyn Cartridge>) {
        self.bus.insert_cartridge(cartridge);
        self.power_on();
    }

    /// Replace the APU
    pub fn set_apu(&mut self, apu: Box<dyn Apu>) {
        self.bus.set_apu(apu);
    }

    /// Plug a device into a controller port
    pub fn set_controller(&mut self, port: Port, controller: Box<dyn Controller>) {
        self.bus.set_controller(port, controller);
    }

    // ========================================
    // Frame scheduling
    // ========================================

    /// Run one frame and present it to `sink`
    pub fn run_frame(&mut self, sink: &mut dyn VideoSink) {
        self.frame(Some(sink));
    }

    /// Run one frame without presenting it
    pub fn run_frame_unpainted(&mut self) {
        self.frame(None);
    }

    /// Let the CPU run up to a dot of the current frame
    #[inline]
    fn catch_up(&mut self, scanline: u16, dot: u16) {
        self.cpu.do_instructions(&mut self.bus, dot_to_cycle(scanline, dot));
    }

    fn frame(&mut self, sink: Option<&mut dyn VideoSink>) {
        for scanline in 0..=LAST_VISIBLE_SCANLINE {
            self.phase = Phase::Visible(scanline);
            self.render_line(scanline, true);
        }

        self.phase = Phase::PostRender;
        self.catch_up(POSTRENDER_SCANLINE, 0);

        self.phase = Phase::VBlank;
        self.catch_up(VBLANK_SCANLINE, 1);
        self.bus.ppu.do_vblank();
        // A halted CPU drops the NMI
        if self.bus.ppu.take_nmi() && !self.cpu.is_jammed() {
            self.cpu.nmi(&mut self.bus);
        }
        if let Some(sink) = sink {
            sink.present_frame(self.bus.ppu.frame());
        }

        self.phase = Phase::PreRender;
        self.catch_up(PRERENDER_SCANLINE, 1);
        self.bus.ppu.end_vblank();
        self.render_line(PRERENDER_SCANLINE, false);

        self.cpu.do_instructions(&mut self.bus, CYCLES_PER_FRAME);
        self.cpu.end_frame(CYCLES_PER_FRAME);
        self.frame_count += 1;
    }

    /// Run the PPU steps of one rendering scanline
    ///
    /// `visible` selects between a visible line (pixels out, sprite evaluation)
    /// and the pre-render line (no output, no sprites for line 0, vertical
    /// scroll reload).
    fn render_line(&mut self, scanline: u16, visible: bool) {
        let rendering = self.bus.ppu.is_rendering_enabled();

        self.catch_up(scanline, 0);
        self.bus.ppu.clear_secondary_oam();

        for tile in 0..32u16 {
            let dot = tile * 8;
            self.catch_up(scanline, dot);
            if visible && dot == SPRITE_EVAL_DOT && rendering {
                self.bus.ppu.evaluate_sprites(scanline);
            }
            if visible {
                self.bus.ppu.render_tile(scanline, tile as usize);
            }
            if rendering {
                self.bus.ppu.fetch_tile(self.bus.cartridge.as_mut());
                self.bus.ppu.increment_x();
            }
        }

        if !rendering {
            // No sprite fetches this line: the next line starts without sprites
            self.bus.ppu.clear_sprite_line();
            return;
        }

        self.catch_up(scanline, INCREMENT_Y_DOT);
        self.bus.ppu.increment_y();
        self.bus.ppu.reset_x();

        for slot in 0..8u16 {
            self.catch_up(scanline, INCREMENT_Y_DOT + slot * 8);
            self.bus.ppu.fetch_sprite(slot as usize, self.bus.cartridge.as_mut());
        }

        if !visible {
            for dot in RESET_Y_DOTS {
                self.catch_up(scanline, dot);
                self.bus.ppu.reset_y();
            }
        }

        for dot in PREFETCH_DOTS {
            self.catch_up(scanline, dot);
            self.bus.ppu.fetch_tile(self.bus.cartridge.as_mut());
            self.bus.ppu.increment_x();
        }
    }

    /// Advance emulation for a host callback at `now_ms`
    ///
    /// Runs the frames the pacer asks for: dropped frames unpainted, then
    /// one painted frame. Does nothing while paused.
    pub fn tick(&mut self, now_ms: f64, sink: &mut dyn VideoSink) -> PaceDecision {
        if self.paused {
            return PaceDecision::Skip;
        }

        let decision = self.pacer.tick(now_ms);
        match decision {
            PaceDecision::Skip => {}
            PaceDecision::Pause => {
                log::debug!("Emulation paused after {} frames", self.frame_count);
                self.paused = true;
            }
            PaceDecision::Run { dropped } => {
                for _ in 0..dropped {
                    self.run_frame_unpainted();
                }
                self.run_frame(sink);
            }
        }
        decision
    }

    // ========================================
    // Pause Control
    // ========================================

    /// Pause emulation
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume emulation
    ///
    /// The pacer restarts from the next timestamp, so the time spent paused
    /// is not caught up.
    pub fn resume(&mut self) {
        self.paused = false;
        self.pacer.resume();
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Check if emulation is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    // ========================================
    // Accessors
    // ========================================

    /// Frames completed since power-on
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Where the scheduler is within the frame
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The PPU frame buffer
    pub fn frame_buffer(&self) -> &FrameBuffer {
        self.bus.ppu.frame()
    }

    /// Get reference to CPU
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Get mutable reference to CPU
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// Get reference to bus
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Get mutable reference to bus
    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    /// Borrow the CPU and the bus together, for stepping the CPU by hand
    pub fn parts_mut(&mut self) -> (&mut Cpu, &mut Bus) {
        (&mut self.cpu, &mut self.bus)
    }

    /// Get configuration
    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }

    /// Get the pacer
    pub fn pacer(&self) -> &Pacer {
        &self.pacer
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::{Mirroring, Nrom};
    use crate::cpu::JamBehavior;
    use crate::display::CaptureSink;

    /// NROM with `program` at $8000 and the reset vector pointing at it
    fn cartridge(program: &[u8]) -> Box<dyn Cartridge> {
        let mut prg = vec![0xEA; 0x8000];
        prg[..program.len()].copy_from_slice(program);
        prg[0x7FFC] = 0x00;
        prg[0x7FFD] = 0x80;
        Box::new(Nrom::new(prg, vec![0; 0x2000], Mirroring::Horizontal))
    }

    #[test]
    fn test_emulator_new() {
        let emulator = Emulator::new();
        assert!(!emulator.is_paused());
        assert_eq!(emulator.frame_count(), 0);
        assert_eq!(emulator.phase(), Phase::Boot);
    }

    #[test]
    fn test_emulator_pause() {
        let mut emulator = Emulator::new();
        emulator.pause();
        assert!(emulator.is_paused());
    }

    #[test]
    fn test_emulator_resume() {
        let mut emulator = Emulator::new();
        emulator.pause();
        emulator.resume();
        assert!(!emulator.is_paused());
    }

    #[test]
    fn test_emulator_toggle_pause() {
        let mut emulator = Emulator::new();
        emulator.toggle_pause();
        assert!(emulator.is_paused());
        emulator.toggle_pause();
        assert!(!emulator.is_paused());
    }

    #[test]
    fn test_run_frame_presents_once() {
        let mut emulator = Emulator::with_cartridge(cartridge(&[]));
        let mut sink = CaptureSink::default();

        emulator.run_frame(&mut sink);
        emulator.run_frame_unpainted();

        assert_eq!(emulator.frame_count(), 2);
        assert_eq!(sink.frames_presented, 1);
        assert_eq!(emulator.phase(), Phase::PreRender);
    }

    #[test]
    fn test_frame_ends_in_vblank_free_state() {
        let mut emulator = Emulator::with_cartridge(cartridge(&[]));
        emulator.run_frame_unpainted();

        // End of pre-render line: VBlank was raised and cleared again
        assert!(!emulator.bus().ppu.in_vblank());
    }

    #[test]
    fn test_cycle_counter_is_rebased_each_frame() {
        let mut emulator = Emulator::with_cartridge(cartridge(&[]));
        for _ in 0..10 {
            emulator.run_frame_unpainted();
            assert!(emulator.cpu().cycle() < 16, "cycle = {}", emulator.cpu().cycle());
        }
    }

    #[test]
    fn test_nmi_fires_once_per_frame() {
        // Reset: enable NMI, loop. NMI handler at $8010: INC $00; RTI
        let mut program = vec![0xA9, 0x80, 0x8D, 0x00, 0x20, 0x4C, 0x05, 0x80];
        program.resize(0x10, 0xEA);
        program.extend_from_slice(&[0xE6, 0x00, 0x40]);

        let mut prg = vec![0xEA; 0x8000];
        prg[..program.len()].copy_from_slice(&program);
        prg[0x7FFA] = 0x10;
        prg[0x7FFB] = 0x80;
        prg[0x7FFC] = 0x00;
        prg[0x7FFD] = 0x80;
        let cart = Box::new(Nrom::new(prg, vec![0; 0x2000], Mirroring::Horizontal));
        let mut emulator = Emulator::with_cartridge(cart);

        for _ in 0..5 {
            emulator.run_frame_unpainted();
        }

        assert_eq!(emulator.bus_mut().read(0x0000), 5);
    }

    #[test]
    fn test_tick_pauses_after_long_stall() {
        let mut emulator = Emulator::with_cartridge(cartridge(&[]));
        let mut sink = CaptureSink::default();

        assert_eq!(emulator.tick(0.0, &mut sink), PaceDecision::Run { dropped: 0 });
        assert_eq!(emulator.tick(5000.0, &mut sink), PaceDecision::Pause);
        assert!(emulator.is_paused());
        assert_eq!(emulator.tick(5016.0, &mut sink), PaceDecision::Skip);
        assert_eq!(emulator.frame_count(), 1);
        assert_eq!(sink.frames_presented, 1);
    }

    #[test]
    fn test_tick_runs_dropped_frames_unpainted() {
        let mut emulator = Emulator::with_cartridge(cartridge(&[]));
        let mut sink = CaptureSink::default();
        let frame_ms = timing::FRAME_MS;

        emulator.tick(0.0, &mut sink);
        let decision = emulator.tick(2.0 * frame_ms + 1.0, &mut sink);

        assert_eq!(decision, PaceDecision::Run { dropped: 1 });
        assert_eq!(emulator.frame_count(), 3);
        assert_eq!(sink.frames_presented, 2);
    }

    #[test]
    fn test_config_applies_jam_behavior() {
        let mut config = EmulatorConfig::default();
        config.cpu.jam = JamBehavior::Halt;

        let emulator = Emulator::with_config(cartridge(&[0x02]), config);

        assert_eq!(emulator.cpu().jam_behavior(), JamBehavior::Halt);
    }

    #[test]
    fn test_reset_keeps_ram() {
        let mut emulator = Emulator::with_cartridge(cartridge(&[]));
        emulator.bus_mut().write(0x0300, 0x42);
        emulator.pause();

        emulator.reset();

        assert_eq!(emulator.bus_mut().read(0x0300), 0x42);
        assert_eq!(emulator.cpu().pc, 0x8000);
        assert!(!emulator.is_paused());
    }

    #[test]
    fn test_insert_cartridge_powers_on() {
        let mut emulator = Emulator::new();
        emulator.run_frame_unpainted();

        emulator.insert_cartridge(cartridge(&[]));

        assert_eq!(emulator.frame_count(), 0);
        assert_eq!(emulator.cpu().pc, 0x8000);
    }

    #[test]
    fn test_disabled_line_leaves_no_sprites_behind() {
        // Tile 1 solid, JMP * at $8000
        let mut prg = vec![0xEA; 0x8000];
        prg[..3].copy_from_slice(&[0x4C, 0x00, 0x80]);
        prg[0x7FFC] = 0x00;
        prg[0x7FFD] = 0x80;
        let mut chr = vec![0; 0x2000];
        chr[0x10..0x18].fill(0xFF);
        let mut emulator =
            Emulator::with_cartridge(Box::new(Nrom::new(prg, chr, Mirroring::Horizontal)));

        let bus = emulator.bus_mut();
        for (addr, value) in [(0x3F00u16, 0x0Fu8), (0x3F11, 0x16)] {
            bus.write(0x2006, (addr >> 8) as u8);
            bus.write(0x2006, addr as u8);
            bus.write(0x2007, value);
        }
        // Sprite 0 on lines 10-17 at x=40
        bus.write(0x2003, 0x00);
        for byte in [9, 0x01, 0x00, 40] {
            bus.write(0x2004, byte);
        }
        for _ in 4..256 {
            bus.write(0x2004, 0xFF);
        }

        bus.write(0x2001, 0x14);
        emulator.render_line(10, true);
        emulator.bus_mut().write(0x2001, 0x00);
        emulator.render_line(11, true);

        // Sprites switched back on mid-line 12
        emulator.bus_mut().write(0x2001, 0x14);
        emulator.bus_mut().ppu.render_tile(12, 5);

        assert_eq!(emulator.frame_buffer().get_pixel(40, 12), 0x0F);
    }
}
