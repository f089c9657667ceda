// RAM module - CPU work RAM
//
// 2KB of internal RAM, visible to the CPU at $0000-$07FF and mirrored three
// more times up to $1FFF.
//
// ```text
// $0000-$00FF: Zero page
// $0100-$01FF: Hardware stack (indexed by SP)
// $0200-$07FF: General purpose
// $0800-$1FFF: Mirrors of $0000-$07FF
// ```

/// Size of the internal RAM in bytes (2KB)
pub const RAM_SIZE: usize = 0x0800;

/// Mask applied to every CPU address that lands in RAM
const RAM_MIRROR_MASK: u16 = 0x07FF;

/// CPU internal RAM (2KB with mirroring)
///
/// # Examples
///
/// ```
/// use nes_core::ram::Ram;
///
/// let mut ram = Ram::new();
/// ram.write(0x0000, 0x42);
/// assert_eq!(ram.read(0x0800), 0x42);
/// assert_eq!(ram.read(0x1800), 0x42);
/// ```
#[derive(Clone)]
pub struct Ram {
    memory: [u8; RAM_SIZE],
}

impl Ram {
    /// Create RAM with every byte cleared
    pub fn new() -> Self {
        Self::with_pattern(0x00)
    }

    /// Create RAM filled with a given byte
    ///
    /// Real consoles power on with semi-random contents; a fixed pattern keeps
    /// runs reproducible.
    pub fn with_pattern(fill_byte: u8) -> Self {
        Ram {
            memory: [fill_byte; RAM_SIZE],
        }
    }

    /// Fill all of RAM with a byte (used on power-on, never on reset)
    pub fn fill(&mut self, fill_byte: u8) {
        self.memory.fill(fill_byte);
    }

    /// Read a byte; any address is folded into the 2KB window
    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.memory[(addr & RAM_MIRROR_MASK) as usize]
    }

    /// Write a byte; any address is folded into the 2KB window
    #[inline]
    pub fn write(&mut self, addr: u16, data: u8) {
        self.memory[(addr & RAM_MIRROR_MASK) as usize] = data;
    }

    /// Raw view of the physical 2KB
    pub fn contents(&self) -> &[u8; RAM_SIZE] {
        &self.memory
    }
}

impl Default for Ram {
    fn default() -> Self {
        Self::new()
    }
}
