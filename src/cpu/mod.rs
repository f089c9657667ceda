// CPU module - 6502 (2A03) processor implementation
//
// Decimal mode is ignored, as on the 2A03. The CPU does not own the bus;
// every operation that touches memory takes `&mut Bus`.

pub mod addressing;
pub mod execute;
pub mod instructions;
pub mod interrupts;
pub mod opcodes;

use serde::{Deserialize, Serialize};

use crate::bus::Bus;

/// Processor Status Flags (P register)
///
/// Bit layout:
/// ```text
/// 7  6  5  4  3  2  1  0
/// N  V  -  B  D  I  Z  C
/// ```
///
/// - N: Negative flag (bit 7)
/// - V: Overflow flag (bit 6)
/// - -: Unused flag (bit 5, always 1)
/// - B: Break command flag (bit 4, only exists on the stack)
/// - D: Decimal mode flag (bit 3, no effect on the 2A03)
/// - I: Interrupt disable flag (bit 2)
/// - Z: Zero flag (bit 1)
/// - C: Carry flag (bit 0)
pub mod flags {
    pub const CARRY: u8 = 0b0000_0001; // Bit 0: C
    pub const ZERO: u8 = 0b0000_0010; // Bit 1: Z
    pub const INTERRUPT_DISABLE: u8 = 0b0000_0100; // Bit 2: I
    pub const DECIMAL: u8 = 0b0000_1000; // Bit 3: D
    pub const BREAK: u8 = 0b0001_0000; // Bit 4: B
    pub const UNUSED: u8 = 0b0010_0000; // Bit 5: - (always 1)
    pub const OVERFLOW: u8 = 0b0100_0000; // Bit 6: V
    pub const NEGATIVE: u8 = 0b1000_0000; // Bit 7: N
}

/// Interrupt and reset vectors
pub mod vectors {
    pub const NMI: u16 = 0xFFFA;
    pub const RESET: u16 = 0xFFFC;
    pub const IRQ: u16 = 0xFFFE;
}

/// Stack base address (stack lives at $0100-$01FF)
pub const STACK_BASE: u16 = 0x0100;

/// Status register value after power-on
pub const POWER_ON_STATUS: u8 = 0x34;

/// Cycles spent by the reset sequence before the first instruction
pub const RESET_CYCLES: u32 = 7;

/// What the CPU does when it fetches a KIL/JAM opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JamBehavior {
    /// Run the reset sequence and keep going
    #[default]
    Reset,

    /// Stay on the opcode forever, burning 2 cycles per step
    Halt,
}

/// CPU structure representing the 6502 processor state
#[derive(Debug, Clone)]
pub struct Cpu {
    // Registers
    pub a: u8,      // Accumulator
    pub x: u8,      // Index Register X
    pub y: u8,      // Index Register Y
    pub sp: u8,     // Stack Pointer
    pub pc: u16,    // Program Counter
    pub status: u8, // Processor Status flags

    /// Cycle counter within the current frame, rebased once per frame
    cycle: u64,

    /// Fractional frame base added to every scheduler limit
    cycle_offset: f64,

    /// Cycles since power-on, never rebased
    total_cycles: u64,

    /// KIL opcode handling
    jam_behavior: JamBehavior,

    /// Set while halted on a KIL opcode
    jammed: bool,
}

impl Cpu {
    /// Create a new CPU instance
    ///
    /// Registers hold their power-on values but PC is 0 until
    /// [`Cpu::power_on`] loads the reset vector.
    pub fn new() -> Self {
        Cpu {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            status: POWER_ON_STATUS,
            cycle: 0,
            cycle_offset: 0.0,
            total_cycles: 0,
            jam_behavior: JamBehavior::default(),
            jammed: false,
        }
    }

    /// Power-on state: `P=$34`, `SP=$FD`, A/X/Y cleared, PC from the reset vector
    ///
    /// The 7-cycle reset sequence is already accounted for.
    pub fn power_on(&mut self, bus: &mut Bus) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFD;
        self.status = POWER_ON_STATUS;
        self.pc = bus.read_u16(vectors::RESET);
        self.cycle = RESET_CYCLES as u64;
        self.cycle_offset = 0.0;
        self.total_cycles = RESET_CYCLES as u64;
        self.jammed = false;

        log::info!("CPU power on, PC=${:04X}", self.pc);
    }

    /// Reset button
    ///
    /// Unlike power-on, A/X/Y and memory survive; SP drops by 3 and I is set.
    pub fn reset(&mut self, bus: &mut Bus) {
        self.jammed = false;
        self.do_reset(bus);

        log::info!("CPU reset, PC=${:04X}", self.pc);
    }

    /// Choose how KIL opcodes behave
    pub fn set_jam_behavior(&mut self, behavior: JamBehavior) {
        self.jam_behavior = behavior;
    }

    /// Current KIL opcode handling
    pub fn jam_behavior(&self) -> JamBehavior {
        self.jam_behavior
    }

    /// True while halted on a KIL opcode
    pub fn is_jammed(&self) -> bool {
        self.jammed
    }

    // ========================================
    // Cycle Accounting
    // ========================================

    /// Cycle counter within the current frame
    #[inline]
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Fractional base of the current frame
    #[inline]
    pub fn cycle_offset(&self) -> f64 {
        self.cycle_offset
    }

    /// Cycles since power-on
    #[inline]
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    /// Advance the cycle counters and let the APU catch up
    #[inline]
    pub(crate) fn add_cycles(&mut self, bus: &mut Bus, cycles: u32) {
        self.cycle += cycles as u64;
        self.total_cycles += cycles as u64;
        bus.apu.do_cycles(cycles);
    }

    /// Close a frame of `frame_cycles` (possibly fractional) cycles
    ///
    /// The fractional part stays in `cycle_offset`, the whole part is taken
    /// off `cycle`, so the counter never drifts and never grows unbounded.
    pub fn end_frame(&mut self, frame_cycles: f64) {
        self.cycle_offset += frame_cycles;
        let whole = self.cycle_offset.floor();
        self.cycle_offset -= whole;
        self.cycle = self.cycle.saturating_sub(whole as u64);
    }

    // ========================================
    // Status Flag Manipulation Methods
    // ========================================

    /// Get the value of a specific flag
    #[inline]
    pub fn get_flag(&self, flag: u8) -> bool {
        (self.status & flag) != 0
    }

    /// Set a specific flag to 1
    #[inline]
    pub fn set_flag(&mut self, flag: u8) {
        self.status |= flag;
    }

    /// Clear a specific flag (set to 0)
    #[inline]
    pub fn clear_flag(&mut self, flag: u8) {
        self.status &= !flag;
    }

    /// Update a flag based on a condition
    #[inline]
    pub fn update_flag(&mut self, flag: u8, condition: bool) {
        if condition {
            self.set_flag(flag);
        } else {
            self.clear_flag(flag);
        }
    }

    // ========================================
    // Individual Flag Getters
    // ========================================

    #[inline]
    pub fn get_carry(&self) -> bool {
        self.get_flag(flags::CARRY)
    }

    #[inline]
    pub fn get_zero(&self) -> bool {
        self.get_flag(flags::ZERO)
    }

    #[inline]
    pub fn get_interrupt_disable(&self) -> bool {
        self.get_flag(flags::INTERRUPT_DISABLE)
    }

    #[inline]
    pub fn get_decimal(&self) -> bool {
        self.get_flag(flags::DECIMAL)
    }

    #[inline]
    pub fn get_overflow(&self) -> bool {
        self.get_flag(flags::OVERFLOW)
    }

    #[inline]
    pub fn get_negative(&self) -> bool {
        self.get_flag(flags::NEGATIVE)
    }

    // ========================================
    // Individual Flag Setters
    // ========================================

    #[inline]
    pub fn set_carry(&mut self, value: bool) {
        self.update_flag(flags::CARRY, value);
    }

    #[inline]
    pub fn set_zero(&mut self, value: bool) {
        self.update_flag(flags::ZERO, value);
    }

    #[inline]
    pub fn set_interrupt_disable(&mut self, value: bool) {
        self.update_flag(flags::INTERRUPT_DISABLE, value);
    }

    #[inline]
    pub fn set_decimal(&mut self, value: bool) {
        self.update_flag(flags::DECIMAL, value);
    }

    #[inline]
    pub fn set_overflow(&mut self, value: bool) {
        self.update_flag(flags::OVERFLOW, value);
    }

    #[inline]
    pub fn set_negative(&mut self, value: bool) {
        self.update_flag(flags::NEGATIVE, value);
    }

    // ========================================
    // Common Flag Update Patterns
    // ========================================

    /// Update Zero and Negative flags based on a value
    #[inline]
    pub fn update_zero_and_negative_flags(&mut self, value: u8) {
        self.set_zero(value == 0);
        self.set_negative((value & 0x80) != 0);
    }

    /// ALU result helper
    ///
    /// Clamps a 9-bit raw result to 8 bits, sets Carry when the raw value
    /// left the byte range and Zero/Negative from the clamped value.
    #[inline]
    pub(crate) fn alu_result(&mut self, raw: u16) -> u8 {
        self.set_carry(raw > 0xFF);
        let value = (raw & 0xFF) as u8;
        self.update_zero_and_negative_flags(value);
        value
    }

    // ========================================
    // Stack Helpers
    // ========================================

    /// Push a byte onto the stack ($0100 | SP), SP wraps within page 1
    #[inline]
    pub(crate) fn stack_push(&mut self, bus: &mut Bus, value: u8) {
        bus.write(STACK_BASE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Pull a byte from the stack
    #[inline]
    pub(crate) fn stack_pop(&mut self, bus: &mut Bus) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.read(STACK_BASE | self.sp as u16)
    }

    /// Push a 16-bit value, high byte first
    #[inline]
    pub(crate) fn stack_push_u16(&mut self, bus: &mut Bus, value: u16) {
        self.stack_push(bus, (value >> 8) as u8);
        self.stack_push(bus, (value & 0xFF) as u8);
    }

    /// Pull a 16-bit value, low byte first
    #[inline]
    pub(crate) fn stack_pop_u16(&mut self, bus: &mut Bus) -> u16 {
        let lo = self.stack_pop(bus) as u16;
        let hi = self.stack_pop(bus) as u16;
        (hi << 8) | lo
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    // ========================================
    // Lifecycle Tests
    // ========================================

    #[test]
    fn test_cpu_initialization() {
        let cpu = Cpu::new();

        assert_eq!(cpu.a, 0);
        assert_eq!(cpu.x, 0);
        assert_eq!(cpu.y, 0);
        assert_eq!(cpu.sp, 0xFD);
        assert_eq!(cpu.status, 0x34);
        assert!(cpu.get_interrupt_disable());
        assert!(!cpu.is_jammed());
    }

    #[test]
    fn test_power_on_loads_reset_vector() {
        let mut bus = bus_with_program(&[], &[(vectors::RESET, 0xC123)]);
        let mut cpu = Cpu::new();
        cpu.a = 0x55;
        cpu.status = 0xFF;

        cpu.power_on(&mut bus);

        assert_eq!(cpu.pc, 0xC123);
        assert_eq!(cpu.a, 0);
        assert_eq!(cpu.sp, 0xFD);
        assert_eq!(cpu.status, 0x34, "P=$34 after power-on");
        assert_eq!(cpu.cycle(), 7);
        assert_eq!(cpu.total_cycles(), 7);
    }

    #[test]
    fn test_reset_keeps_registers() {
        let mut bus = bus_with_program(&[], &[(vectors::RESET, 0x9000)]);
        let mut cpu = Cpu::new();
        cpu.power_on(&mut bus);
        cpu.a = 0x42;
        cpu.x = 0x10;
        cpu.status = 0x20;
        cpu.pc = 0x1234;

        cpu.reset(&mut bus);

        assert_eq!(cpu.a, 0x42, "A survives reset");
        assert_eq!(cpu.x, 0x10, "X survives reset");
        assert_eq!(cpu.sp, 0xFA, "SP decremented by 3");
        assert!(cpu.get_interrupt_disable());
        assert_eq!(cpu.pc, 0x9000);
    }

    // ========================================
    // Flag Tests
    // ========================================

    #[test]
    fn test_flag_bit_positions() {
        let mut cpu = Cpu::new();
        cpu.status = 0;

        cpu.set_carry(true);
        cpu.set_zero(true);
        cpu.set_interrupt_disable(true);
        cpu.set_decimal(true);
        cpu.set_overflow(true);
        cpu.set_negative(true);

        assert_eq!(cpu.status, 0b1100_1111);
    }

    #[test]
    fn test_flag_update() {
        let mut cpu = Cpu::new();

        cpu.update_flag(flags::CARRY, true);
        assert!(cpu.get_carry(), "Flag should be set when true");

        cpu.update_flag(flags::CARRY, false);
        assert!(!cpu.get_carry(), "Flag should be clear when false");
    }

    #[test]
    fn test_update_zero_and_negative_flags() {
        let mut cpu = Cpu::new();

        cpu.update_zero_and_negative_flags(0x00);
        assert!(cpu.get_zero());
        assert!(!cpu.get_negative());

        cpu.update_zero_and_negative_flags(0x80);
        assert!(!cpu.get_zero());
        assert!(cpu.get_negative());

        cpu.update_zero_and_negative_flags(0x42);
        assert!(!cpu.get_zero());
        assert!(!cpu.get_negative());
    }

    #[test]
    fn test_alu_result_clamps_and_sets_carry() {
        let mut cpu = Cpu::new();

        assert_eq!(cpu.alu_result(0x100), 0x00);
        assert!(cpu.get_carry());
        assert!(cpu.get_zero());

        assert_eq!(cpu.alu_result(0x0FF), 0xFF);
        assert!(!cpu.get_carry());
        assert!(cpu.get_negative());
    }

    // ========================================
    // Stack Tests
    // ========================================

    #[test]
    fn test_stack_push_pop() {
        let mut bus = Bus::new();
        let mut cpu = Cpu::new();

        cpu.stack_push(&mut bus, 0xAB);
        assert_eq!(bus.read(0x01FD), 0xAB);
        assert_eq!(cpu.sp, 0xFC);
        assert_eq!(cpu.stack_pop(&mut bus), 0xAB);
        assert_eq!(cpu.sp, 0xFD);
    }

    #[test]
    fn test_stack_wraps_within_page_one() {
        let mut bus = Bus::new();
        let mut cpu = Cpu::new();
        cpu.sp = 0x00;

        cpu.stack_push(&mut bus, 0x11);
        assert_eq!(bus.read(0x0100), 0x11);
        assert_eq!(cpu.sp, 0xFF, "SP wraps from $00 to $FF");

        cpu.stack_push(&mut bus, 0x22);
        assert_eq!(bus.read(0x01FF), 0x22);

        assert_eq!(cpu.stack_pop(&mut bus), 0x22);
        assert_eq!(cpu.stack_pop(&mut bus), 0x11);
        assert_eq!(cpu.sp, 0x00);
    }

    #[test]
    fn test_full_stack_lap_stays_in_page_one() {
        let mut bus = Bus::new();
        let mut cpu = Cpu::new();
        bus.write(0x00FF, 0xA5);
        bus.write(0x0200, 0x5A);
        cpu.sp = 0xFF;

        for i in 0..=0xFFu8 {
            cpu.stack_push(&mut bus, i);
        }

        assert_eq!(cpu.sp, 0xFF, "256 pushes bring SP back around");
        assert_eq!(bus.read(0x00FF), 0xA5);
        assert_eq!(bus.read(0x0200), 0x5A);
        assert_eq!(bus.read(0x01FF), 0x00);
        assert_eq!(bus.read(0x0100), 0xFF);

        for i in (0..=0xFFu8).rev() {
            assert_eq!(cpu.stack_pop(&mut bus), i);
        }
        assert_eq!(cpu.sp, 0xFF);
    }

    #[test]
    fn test_stack_u16_order() {
        let mut bus = Bus::new();
        let mut cpu = Cpu::new();

        cpu.stack_push_u16(&mut bus, 0x1234);
        assert_eq!(bus.read(0x01FD), 0x12, "High byte first");
        assert_eq!(bus.read(0x01FC), 0x34);
        assert_eq!(cpu.stack_pop_u16(&mut bus), 0x1234);
    }

    // ========================================
    // Frame Rebase Tests
    // ========================================

    #[test]
    fn test_end_frame_keeps_fraction() {
        let mut cpu = Cpu::new();
        cpu.cycle = 29785;

        cpu.end_frame(29780.5);
        assert_eq!(cpu.cycle(), 5);
        assert_eq!(cpu.cycle_offset(), 0.5);

        cpu.cycle = 29783;
        cpu.end_frame(29780.5);
        assert_eq!(cpu.cycle(), 2);
        assert_eq!(cpu.cycle_offset(), 0.0);
    }
}
