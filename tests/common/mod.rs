// Common test utilities for program-driven integration tests
//
// Tests assemble small programs by hand, place them in an NROM image and run
// them through the CPU or the whole emulator.

#![allow(dead_code)]

use nes_core::{Cartridge, Emulator, Mirroring, Nrom};

/// Where test programs start
pub const PROGRAM_START: u16 = 0x8000;

/// Where NMI handlers are placed unless a test says otherwise
pub const NMI_HANDLER: u16 = 0x9000;

/// Where IRQ/BRK handlers are placed unless a test says otherwise
pub const IRQ_HANDLER: u16 = 0xA000;

/// 32KB NROM image under construction
///
/// Unused PRG bytes are NOPs, so a program that runs off its end keeps
/// executing harmlessly. The vectors point at `PROGRAM_START`,
/// `NMI_HANDLER` and `IRQ_HANDLER`; a handler that was never written is a
/// NOP slide into the next one.
pub struct TestRom {
    prg: Vec<u8>,
    chr: Vec<u8>,
}

impl TestRom {
    pub fn new() -> Self {
        let mut rom = TestRom {
            prg: vec![0xEA; 0x8000],
            chr: vec![0; 0x2000],
        };
        rom.vector(0xFFFA, NMI_HANDLER);
        rom.vector(0xFFFC, PROGRAM_START);
        rom.vector(0xFFFE, IRQ_HANDLER);
        rom
    }

    /// Place code (or data) at a CPU address in $8000-$FFFF
    pub fn code(mut self, addr: u16, bytes: &[u8]) -> Self {
        let offset = (addr - 0x8000) as usize;
        self.prg[offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }

    /// Place the main program at `PROGRAM_START`
    pub fn program(self, bytes: &[u8]) -> Self {
        self.code(PROGRAM_START, bytes)
    }

    /// Place pattern data at a PPU address in $0000-$1FFF
    pub fn chr(mut self, addr: u16, bytes: &[u8]) -> Self {
        let offset = addr as usize;
        self.chr[offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }

    /// Point a vector at a handler
    pub fn with_vector(mut self, vector: u16, target: u16) -> Self {
        self.vector(vector, target);
        self
    }

    fn vector(&mut self, vector: u16, target: u16) {
        let offset = (vector - 0x8000) as usize;
        self.prg[offset..offset + 2].copy_from_slice(&target.to_le_bytes());
    }

    /// Finish as an NROM board
    pub fn build(self) -> Box<dyn Cartridge> {
        Box::new(Nrom::new(self.prg, self.chr, Mirroring::Horizontal))
    }

    /// Finish and power on an emulator with this board
    pub fn boot(self) -> Emulator {
        Emulator::with_cartridge(self.build())
    }
}

impl Default for TestRom {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the CPU alone until PC reaches `target`
///
/// # Returns
///
/// Cycles spent, or `None` if `max_instructions` ran out first
pub fn run_until_pc(emulator: &mut Emulator, target: u16, max_instructions: usize) -> Option<u64> {
    let start = emulator.cpu().total_cycles();
    for _ in 0..max_instructions {
        if emulator.cpu().pc == target {
            return Some(emulator.cpu().total_cycles() - start);
        }
        let (cpu, bus) = emulator.parts_mut();
        cpu.do_instruction(bus);
    }
    None
}

/// Write PPU memory through $2006/$2007
pub fn ppu_write(emulator: &mut Emulator, addr: u16, bytes: &[u8]) {
    let bus = emulator.bus_mut();
    bus.read(0x2002);
    bus.write(0x2006, (addr >> 8) as u8);
    bus.write(0x2006, addr as u8);
    for &byte in bytes {
        bus.write(0x2007, byte);
    }
}

/// Write all of OAM through $2003/$2004
pub fn load_oam(emulator: &mut Emulator, oam: &[u8; 256]) {
    let bus = emulator.bus_mut();
    bus.write(0x2003, 0x00);
    for &byte in oam.iter() {
        bus.write(0x2004, byte);
    }
}
