// Comparison instructions for 6502 CPU
// Subtraction that only updates the flags.

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    /// CMP - Compare Accumulator
    ///
    /// Flags affected: C (A >= M), Z (A == M), N (bit 7 of A - M)
    pub fn cmp(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.compare(self.a, value);
    }

    /// CPX - Compare X Register
    pub fn cpx(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.compare(self.x, value);
    }

    /// CPY - Compare Y Register
    pub fn cpy(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.compare(self.y, value);
    }

    /// Register minus memory through the ALU; the result is discarded
    #[inline]
    pub(crate) fn compare(&mut self, register_value: u8, memory_value: u8) {
        self.alu_result(register_value as u16 + (0xFF - memory_value) as u16 + 1);
    }
}
