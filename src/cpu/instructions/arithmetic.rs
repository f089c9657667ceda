// Arithmetic instructions for 6502 CPU

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Add / Subtract
    // ========================================

    /// Binary add of `value` and carry into A
    ///
    /// Overflow is set when both inputs share a sign that the result lacks:
    /// `(operand ^ result) & (A ^ result) & 0x80`.
    pub(crate) fn add_to_accumulator(&mut self, value: u8) {
        let raw = self.a as u16 + value as u16 + self.get_carry() as u16;
        let a = self.a;
        let result = self.alu_result(raw);
        self.set_overflow((value ^ result) & (a ^ result) & 0x80 != 0);
        self.a = result;
    }

    /// ADC - Add with Carry
    ///
    /// Formula: A = A + M + C
    ///
    /// Flags affected: C, Z, V, N
    pub fn adc(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.add_to_accumulator(value);
    }

    /// SBC - Subtract with Carry
    ///
    /// Formula: A = A - M - (1 - C), computed as ADC of `0xFF - M`.
    ///
    /// Flags affected: C, Z, V, N
    pub fn sbc(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.add_to_accumulator(0xFF - value);
    }

    // ========================================
    // Increment / Decrement
    // ========================================

    /// INC - Increment Memory
    ///
    /// Flags affected: Z, N
    pub fn inc(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        self.modify(bus, addr_result, |cpu, value| {
            let result = value.wrapping_add(1);
            cpu.update_zero_and_negative_flags(result);
            result
        });
    }

    /// DEC - Decrement Memory
    ///
    /// Flags affected: Z, N
    pub fn dec(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        self.modify(bus, addr_result, |cpu, value| {
            let result = value.wrapping_sub(1);
            cpu.update_zero_and_negative_flags(result);
            result
        });
    }

    /// INX - Increment X Register
    pub fn inx(&mut self) {
        self.x = self.x.wrapping_add(1);
        self.update_zero_and_negative_flags(self.x);
    }

    /// INY - Increment Y Register
    pub fn iny(&mut self) {
        self.y = self.y.wrapping_add(1);
        self.update_zero_and_negative_flags(self.y);
    }

    /// DEX - Decrement X Register
    pub fn dex(&mut self) {
        self.x = self.x.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.x);
    }

    /// DEY - Decrement Y Register
    pub fn dey(&mut self) {
        self.y = self.y.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.y);
    }
}
