// Unofficial instructions for 6502 CPU
//
// Combined read-modify-write/ALU opcodes plus the unstable store and
// immediate forms. The "magic" constant of XAA/LXA varies between chips;
// $EE is the common value.

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

/// Chip-dependent constant ORed into A by XAA and LXA
const UNSTABLE_MAGIC: u8 = 0xEE;

impl Cpu {
    // ========================================
    // Read-Modify-Write Combinations
    // ========================================

    /// SLO - ASL memory, then ORA
    pub fn slo(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.asl(bus, addr_result);
        self.a |= value;
        self.update_zero_and_negative_flags(self.a);
    }

    /// RLA - ROL memory, then AND
    pub fn rla(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.rol(bus, addr_result);
        self.a &= value;
        self.update_zero_and_negative_flags(self.a);
    }

    /// SRE - LSR memory, then EOR
    pub fn sre(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.lsr(bus, addr_result);
        self.a ^= value;
        self.update_zero_and_negative_flags(self.a);
    }

    /// RRA - ROR memory, then ADC (using the carry ROR produced)
    pub fn rra(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.ror(bus, addr_result);
        self.add_to_accumulator(value);
    }

    /// DCP - DEC memory, then CMP
    pub fn dcp(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = bus.read(addr_result.address).wrapping_sub(1);
        bus.write(addr_result.address, value);
        self.compare(self.a, value);
    }

    /// ISC - INC memory, then SBC
    pub fn isc(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = bus.read(addr_result.address).wrapping_add(1);
        bus.write(addr_result.address, value);
        self.add_to_accumulator(0xFF - value);
    }

    // ========================================
    // Loads and Stores
    // ========================================

    /// LAX - LDA and LDX at once
    pub fn lax(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.a = value;
        self.x = value;
        self.update_zero_and_negative_flags(value);
    }

    /// SAX - Store A AND X
    pub fn sax(&self, bus: &mut Bus, addr_result: &AddressingResult) {
        bus.write(addr_result.address, self.a & self.x);
    }

    /// LAS - A, X and SP all become M AND SP
    pub fn las(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result) & self.sp;
        self.a = value;
        self.x = value;
        self.sp = value;
        self.update_zero_and_negative_flags(value);
    }

    /// Store `value & (H + 1)` for the SHx family
    ///
    /// H is the high byte of the base address before indexing. When the
    /// indexing crossed a page, the stored value also replaces the high byte
    /// of the target address.
    fn unstable_store(&mut self, bus: &mut Bus, addr_result: &AddressingResult, index: u8, value: u8) {
        let base_hi = (addr_result.address.wrapping_sub(index as u16) >> 8) as u8;
        let result = value & base_hi.wrapping_add(1);
        let address = if addr_result.page_crossed {
            ((result as u16) << 8) | (addr_result.address & 0x00FF)
        } else {
            addr_result.address
        };
        bus.write(address, result);
    }

    /// SHY - Store Y AND (H + 1), absolute,X
    pub fn shy(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        self.unstable_store(bus, addr_result, self.x, self.y);
    }

    /// SHX - Store X AND (H + 1), absolute,Y
    pub fn shx(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        self.unstable_store(bus, addr_result, self.y, self.x);
    }

    /// AHX - Store A AND X AND (H + 1), Y-indexed
    pub fn ahx(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        self.unstable_store(bus, addr_result, self.y, self.a & self.x);
    }

    /// TAS - SP = A AND X, then store SP AND (H + 1)
    pub fn tas(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        self.sp = self.a & self.x;
        self.unstable_store(bus, addr_result, self.y, self.sp);
    }

    // ========================================
    // Immediate Combinations
    // ========================================

    /// ANC - AND, then copy N into C
    pub fn anc(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        self.and(bus, addr_result);
        self.set_carry(self.get_negative());
    }

    /// ALR - AND, then LSR A
    pub fn alr(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result) & self.a;
        self.set_carry(value & 0x01 != 0);
        self.a = value >> 1;
        self.update_zero_and_negative_flags(self.a);
    }

    /// ARR - AND, then ROR A; C from bit 6, V from bit 6 XOR bit 5
    pub fn arr(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result) & self.a;
        let result = (value >> 1) | ((self.get_carry() as u8) << 7);
        self.a = result;
        self.update_zero_and_negative_flags(result);
        self.set_carry(result & 0x40 != 0);
        self.set_overflow(((result >> 6) ^ (result >> 5)) & 0x01 != 0);
    }

    /// AXS - X = (A AND X) - M, without borrow in; C like CMP
    pub fn axs(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        let ax = self.a & self.x;
        self.x = self.alu_result(ax as u16 + (0xFF - value) as u16 + 1);
    }

    /// XAA - A = (A OR magic) AND X AND M
    pub fn xaa(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.a = (self.a | UNSTABLE_MAGIC) & self.x & value;
        self.update_zero_and_negative_flags(self.a);
    }

    /// LXA - A = X = (A OR magic) AND M
    pub fn lxa(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.a = (self.a | UNSTABLE_MAGIC) & value;
        self.x = self.a;
        self.update_zero_and_negative_flags(self.a);
    }
}
