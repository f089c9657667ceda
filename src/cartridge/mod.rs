// Cartridge module - Interface the core expects from a cartridge board
//
// File parsing and bank switching live outside this crate. The core only needs
// byte-addressable access on both buses plus two questions about how the
// nametable RAM inside the console is wired to the board.

mod nrom;

pub use nrom::Nrom;

/// Nametable mirroring arrangement
///
/// Describes how the PPU's 2KB of CIRAM is mapped into the 4KB nametable
/// address space ($2000-$2FFF). Boards with fixed wiring pick one of these; boards
/// with a mapper may switch between them at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    /// $2000=$2400 and $2800=$2C00 (CIRAM A10 = PPU A11)
    Horizontal,
    /// $2000=$2800 and $2400=$2C00 (CIRAM A10 = PPU A10)
    Vertical,
    /// Every nametable maps to the first CIRAM bank
    SingleScreenLower,
    /// Every nametable maps to the second CIRAM bank
    SingleScreenUpper,
    /// The board provides its own 2KB so all four nametables are distinct
    FourScreen,
}

impl Mirroring {
    /// Which physical CIRAM bank an address selects
    ///
    /// # Arguments
    /// * `addr` - PPU address in the nametable range
    ///
    /// # Returns
    /// `true` for the second 1KB bank, `false` for the first
    pub fn ciram_a10(self, addr: u16) -> bool {
        match self {
            Mirroring::Horizontal => addr & 0x0800 != 0,
            Mirroring::Vertical | Mirroring::FourScreen => addr & 0x0400 != 0,
            Mirroring::SingleScreenLower => false,
            Mirroring::SingleScreenUpper => true,
        }
    }
}

/// Trait for cartridge boards
///
/// Every method must be total: any 16-bit address maps to some byte, even when
/// the board has nothing there. Reads take `&mut self` because several mappers
/// latch state on reads (CHR latches, IRQ counters clocked by PPU A12).
pub trait Cartridge {
    /// Read from CPU address space ($4020-$FFFF)
    fn cpu_read(&mut self, addr: u16) -> u8;

    /// Write to CPU address space ($4020-$FFFF)
    fn cpu_write(&mut self, addr: u16, data: u8);

    /// Read from PPU address space ($0000-$3EFF)
    fn ppu_read(&mut self, addr: u16) -> u8;

    /// Write to PPU address space ($0000-$3EFF)
    fn ppu_write(&mut self, addr: u16, data: u8);

    /// CIRAM A10 line for a nametable address (`true` selects the second bank)
    fn ciram_a10(&self, addr: u16) -> bool;

    /// Whether CIRAM answers this nametable access
    ///
    /// Returns `false` when the board supplies the memory itself, in which case
    /// the PPU routes the access through [`Cartridge::ppu_read`]/[`Cartridge::ppu_write`].
    fn ciram_enabled(&self, addr: u16) -> bool;

    /// Level of the cartridge IRQ line
    fn irq_pending(&self) -> bool {
        false
    }
}

/// A cartridge slot with nothing inserted
///
/// Reads return 0 everywhere and writes are discarded. Used before a board is
/// attached so the address space stays total.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyCartridge;

impl Cartridge for EmptyCartridge {
    fn cpu_read(&mut self, _addr: u16) -> u8 {
        0
    }

    fn cpu_write(&mut self, _addr: u16, _data: u8) {}

    fn ppu_read(&mut self, _addr: u16) -> u8 {
        0
    }

    fn ppu_write(&mut self, _addr: u16, _data: u8) {}

    fn ciram_a10(&self, addr: u16) -> bool {
        Mirroring::Horizontal.ciram_a10(addr)
    }

    fn ciram_enabled(&self, _addr: u16) -> bool {
        true
    }
}
