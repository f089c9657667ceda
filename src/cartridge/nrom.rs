// NROM board - fixed PRG/CHR with no bank switching
//
// Memory Layout:
// - CPU $6000-$7FFF: 8KB PRG-RAM (Family Basic style work RAM)
// - CPU $8000-$BFFF: First 16KB of PRG-ROM
// - CPU $C000-$FFFF: Last 16KB of PRG-ROM (or mirror of first 16KB if only 16KB total)
// - PPU $0000-$1FFF: 8KB CHR-ROM or CHR-RAM
// - PPU $2000-$2FFF: 4KB nametable RAM on four-screen boards
//
// The board is the reference collaborator used by tests and benchmarks; real
// ROM loading happens upstream and hands over the byte arrays.

use super::{Cartridge, Mirroring};

/// Size of one CHR bank (8KB)
const CHR_SIZE: usize = 0x2000;

/// Size of the PRG-RAM window (8KB)
const PRG_RAM_SIZE: usize = 0x2000;

/// On-board nametable RAM for four-screen wiring (4KB)
const FOUR_SCREEN_RAM_SIZE: usize = 0x1000;

/// NROM cartridge board
pub struct Nrom {
    /// PRG-ROM data (any non-zero size, mirrored across $8000-$FFFF)
    prg_rom: Vec<u8>,
    /// PRG-RAM at $6000-$7FFF
    prg_ram: Vec<u8>,
    /// CHR-ROM or CHR-RAM data (8KB)
    chr_mem: Vec<u8>,
    /// Whether CHR memory is writable
    chr_is_ram: bool,
    /// Nametable RAM, empty unless four-screen
    nametable_ram: Vec<u8>,
    /// Fixed nametable wiring
    mirroring: Mirroring,
}

impl Nrom {
    /// Create a board from PRG-ROM and CHR-ROM images
    ///
    /// An empty `chr_rom` gives the board 8KB of CHR-RAM instead. An empty
    /// `prg_rom` is replaced with a single zero byte so reads stay total.
    pub fn new(prg_rom: Vec<u8>, chr_rom: Vec<u8>, mirroring: Mirroring) -> Self {
        let prg_rom = if prg_rom.is_empty() { vec![0] } else { prg_rom };
        let chr_is_ram = chr_rom.is_empty();
        let chr_mem = if chr_is_ram {
            vec![0; CHR_SIZE]
        } else {
            chr_rom
        };

        let nametable_ram = if mirroring == Mirroring::FourScreen {
            vec![0; FOUR_SCREEN_RAM_SIZE]
        } else {
            Vec::new()
        };

        Nrom {
            prg_rom,
            prg_ram: vec![0; PRG_RAM_SIZE],
            chr_mem,
            chr_is_ram,
            nametable_ram,
            mirroring,
        }
    }

    /// Create a board with CHR-RAM and the given PRG-ROM
    pub fn with_chr_ram(prg_rom: Vec<u8>, mirroring: Mirroring) -> Self {
        Self::new(prg_rom, Vec::new(), mirroring)
    }

    /// Get the nametable mirroring of this board
    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }
}

impl Cartridge for Nrom {
    fn cpu_read(&mut self, addr: u16) -> u8 {
        match addr {
            0x6000..=0x7FFF => self.prg_ram[(addr - 0x6000) as usize],
            0x8000..=0xFFFF => {
                let index = (addr - 0x8000) as usize;
                self.prg_rom[index % self.prg_rom.len()]
            }
            _ => 0,
        }
    }

    fn cpu_write(&mut self, addr: u16, data: u8) {
        if let 0x6000..=0x7FFF = addr {
            self.prg_ram[(addr - 0x6000) as usize] = data;
        }
    }

    fn ppu_read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.chr_mem[addr as usize % self.chr_mem.len()],
            0x2000..=0x3EFF if !self.nametable_ram.is_empty() => {
                self.nametable_ram[(addr & 0x0FFF) as usize]
            }
            _ => 0,
        }
    }

    fn ppu_write(&mut self, addr: u16, data: u8) {
        match addr {
            0x0000..=0x1FFF if self.chr_is_ram => {
                let len = self.chr_mem.len();
                self.chr_mem[addr as usize % len] = data;
            }
            0x2000..=0x3EFF if !self.nametable_ram.is_empty() => {
                self.nametable_ram[(addr & 0x0FFF) as usize] = data;
            }
            _ => {}
        }
    }

    fn ciram_a10(&self, addr: u16) -> bool {
        self.mirroring.ciram_a10(addr)
    }

    fn ciram_enabled(&self, _addr: u16) -> bool {
        self.mirroring != Mirroring::FourScreen
    }
}
