// Addressing modes module for 6502 CPU
// Implements all 13 addressing modes used by the 6502 processor

use crate::bus::Bus;

/// Result of an addressing mode calculation
///
/// Contains the effective address, whether indexing crossed a page (which
/// costs read instructions an extra cycle), and the operand value for the
/// modes that carry one inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressingResult {
    /// The effective address where the data is located
    pub address: u16,

    /// Whether indexing or a branch crossed into another page
    pub page_crossed: bool,

    /// The operand value (immediate and accumulator modes)
    pub value: Option<u8>,
}

impl AddressingResult {
    /// Create a new addressing result with an address
    pub fn new(address: u16) -> Self {
        Self {
            address,
            page_crossed: false,
            value: None,
        }
    }

    /// Create a new addressing result with an inline value
    pub fn immediate(value: u8) -> Self {
        Self {
            address: 0,
            page_crossed: false,
            value: Some(value),
        }
    }

    /// Set the page_crossed flag
    pub fn with_page_cross(mut self, crossed: bool) -> Self {
        self.page_crossed = crossed;
        self
    }
}

/// Addressing modes supported by the 6502
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// Implied - No operand (e.g., CLC, NOP)
    Implied,

    /// Accumulator - Operate on accumulator (e.g., LSR A)
    Accumulator,

    /// Immediate - 8-bit constant (e.g., LDA #$01)
    Immediate,

    /// Zero Page - Address in zero page $00-$FF (e.g., LDA $80)
    ZeroPage,

    /// Zero Page,X - Zero page address + X register (e.g., LDA $80,X)
    ZeroPageX,

    /// Zero Page,Y - Zero page address + Y register (e.g., LDX $80,Y)
    ZeroPageY,

    /// Relative - Signed 8-bit offset for branches (e.g., BNE label)
    Relative,

    /// Absolute - 16-bit address (e.g., LDA $8000)
    Absolute,

    /// Absolute,X - 16-bit address + X register (e.g., LDA $8000,X)
    AbsoluteX,

    /// Absolute,Y - 16-bit address + Y register (e.g., LDA $8000,Y)
    AbsoluteY,

    /// Indirect - 16-bit pointer (JMP only) (e.g., JMP ($FFFC))
    Indirect,

    /// Indexed Indirect - Zero page pointer + X (e.g., LDA ($40,X))
    IndexedIndirect,

    /// Indirect Indexed - Zero page pointer + Y (e.g., LDA ($40),Y)
    IndirectIndexed,
}

impl AddressingMode {
    /// Instruction length in bytes, opcode included
    pub const fn bytes(self) -> u8 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 3,
            _ => 2,
        }
    }
}

/// True when adding `offset` to `base` changes the high byte
#[inline]
fn page_crossed(base: u16, offset: u8) -> bool {
    let addr = base.wrapping_add(offset as u16);
    (base & 0xFF00) != (addr & 0xFF00)
}

impl super::Cpu {
    /// Read the byte at PC and advance PC
    #[inline]
    pub(crate) fn fetch_byte(&mut self, bus: &mut Bus) -> u8 {
        let value = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    /// Read a little-endian word at PC and advance PC by two
    #[inline]
    pub(crate) fn fetch_word(&mut self, bus: &mut Bus) -> u16 {
        let lo = self.fetch_byte(bus) as u16;
        let hi = self.fetch_byte(bus) as u16;
        (hi << 8) | lo
    }

    /// Read a pointer from zero page; the high byte wraps to $00
    #[inline]
    fn read_zero_page_pointer(bus: &mut Bus, ptr: u8) -> u16 {
        let lo = bus.read(ptr as u16) as u16;
        let hi = bus.read(ptr.wrapping_add(1) as u16) as u16;
        (hi << 8) | lo
    }

    /// Resolve the operand of the current instruction
    pub fn resolve_address(&mut self, mode: AddressingMode, bus: &mut Bus) -> AddressingResult {
        match mode {
            AddressingMode::Implied => self.addr_implied(),
            AddressingMode::Accumulator => self.addr_accumulator(),
            AddressingMode::Immediate => self.addr_immediate(bus),
            AddressingMode::ZeroPage => self.addr_zero_page(bus),
            AddressingMode::ZeroPageX => self.addr_zero_page_x(bus),
            AddressingMode::ZeroPageY => self.addr_zero_page_y(bus),
            AddressingMode::Relative => self.addr_relative(bus),
            AddressingMode::Absolute => self.addr_absolute(bus),
            AddressingMode::AbsoluteX => self.addr_absolute_x(bus),
            AddressingMode::AbsoluteY => self.addr_absolute_y(bus),
            AddressingMode::Indirect => self.addr_indirect(bus),
            AddressingMode::IndexedIndirect => self.addr_indexed_indirect(bus),
            AddressingMode::IndirectIndexed => self.addr_indirect_indexed(bus),
        }
    }

    // ========================================
    // Implied / Accumulator / Immediate
    // ========================================

    pub fn addr_implied(&self) -> AddressingResult {
        AddressingResult::new(0)
    }

    pub fn addr_accumulator(&self) -> AddressingResult {
        AddressingResult::immediate(self.a)
    }

    pub fn addr_immediate(&mut self, bus: &mut Bus) -> AddressingResult {
        let value = self.fetch_byte(bus);
        AddressingResult::immediate(value)
    }

    // ========================================
    // Zero Page Modes
    // ========================================

    /// Zero Page - `LDA $80` reads from $0080
    pub fn addr_zero_page(&mut self, bus: &mut Bus) -> AddressingResult {
        let addr = self.fetch_byte(bus) as u16;
        AddressingResult::new(addr)
    }

    /// Zero Page,X - wraps within page 0: $FF + 2 = $01
    pub fn addr_zero_page_x(&mut self, bus: &mut Bus) -> AddressingResult {
        let base = self.fetch_byte(bus);
        AddressingResult::new(base.wrapping_add(self.x) as u16)
    }

    /// Zero Page,Y - wraps within page 0
    pub fn addr_zero_page_y(&mut self, bus: &mut Bus) -> AddressingResult {
        let base = self.fetch_byte(bus);
        AddressingResult::new(base.wrapping_add(self.y) as u16)
    }

    // ========================================
    // Relative Mode
    // ========================================

    /// Relative - signed offset from the address after the branch
    ///
    /// `page_crossed` reports whether the target sits on a different page
    /// than the next instruction, which costs a taken branch one more cycle.
    pub fn addr_relative(&mut self, bus: &mut Bus) -> AddressingResult {
        let offset = self.fetch_byte(bus) as i8;
        let target = self.pc.wrapping_add(offset as i16 as u16);
        let crossed = (self.pc & 0xFF00) != (target & 0xFF00);

        AddressingResult::new(target).with_page_cross(crossed)
    }

    // ========================================
    // Absolute Modes
    // ========================================

    pub fn addr_absolute(&mut self, bus: &mut Bus) -> AddressingResult {
        let addr = self.fetch_word(bus);
        AddressingResult::new(addr)
    }

    pub fn addr_absolute_x(&mut self, bus: &mut Bus) -> AddressingResult {
        let base = self.fetch_word(bus);
        let addr = base.wrapping_add(self.x as u16);
        AddressingResult::new(addr).with_page_cross(page_crossed(base, self.x))
    }

    pub fn addr_absolute_y(&mut self, bus: &mut Bus) -> AddressingResult {
        let base = self.fetch_word(bus);
        let addr = base.wrapping_add(self.y as u16);
        AddressingResult::new(addr).with_page_cross(page_crossed(base, self.y))
    }

    // ========================================
    // Indirect Modes
    // ========================================

    /// Indirect - `JMP ($xxxx)`
    ///
    /// A pointer at $xxFF fetches its high byte from $xx00 instead of the
    /// next page.
    pub fn addr_indirect(&mut self, bus: &mut Bus) -> AddressingResult {
        let ptr = self.fetch_word(bus);

        let lo = bus.read(ptr) as u16;
        let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
        let hi = bus.read(hi_addr) as u16;

        AddressingResult::new((hi << 8) | lo)
    }

    /// Indexed Indirect - `($nn,X)`, pointer lookup wraps within zero page
    pub fn addr_indexed_indirect(&mut self, bus: &mut Bus) -> AddressingResult {
        let base = self.fetch_byte(bus);
        let addr = Self::read_zero_page_pointer(bus, base.wrapping_add(self.x));
        AddressingResult::new(addr)
    }

    /// Indirect Indexed - `($nn),Y`
    pub fn addr_indirect_indexed(&mut self, bus: &mut Bus) -> AddressingResult {
        let ptr = self.fetch_byte(bus);
        let base = Self::read_zero_page_pointer(bus, ptr);
        let addr = base.wrapping_add(self.y as u16);
        AddressingResult::new(addr).with_page_cross(page_crossed(base, self.y))
    }
}
