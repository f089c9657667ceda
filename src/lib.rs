// NES emulation core
//
// A 2A03 CPU and a 2C02 PPU interleaved cycle by cycle by a frame scheduler.
// Audio synthesis, cartridge mappers beyond NROM and presentation are
// supplied by the host through the `Apu`, `Cartridge` and `VideoSink` traits.
//
// The library installs no logger; hosts pick a `log` backend.

// Public modules
pub mod apu;
pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod display;
pub mod emulator;
pub mod input;
pub mod ppu;
pub mod ram;

// Re-export main types for convenience
pub use apu::{Apu, SilentApu};
pub use bus::{Bus, Port};
pub use cartridge::{Cartridge, EmptyCartridge, Mirroring, Nrom};
pub use cpu::{Cpu, JamBehavior};
pub use display::{CaptureSink, FrameBuffer, NullSink, VideoSink};
pub use emulator::{Emulator, EmulatorConfig, PaceDecision, Pacer, Phase, TimingMode};
pub use input::{Controller, StandardController, Unplugged};
pub use ppu::Ppu;
pub use ram::Ram;
