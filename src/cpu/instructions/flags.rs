// Flag instructions for 6502 CPU
// Single-byte, 2-cycle instructions that set or clear one status bit.

use crate::cpu::Cpu;

impl Cpu {
    /// CLC - Clear Carry Flag
    pub fn clc(&mut self) {
        self.set_carry(false);
    }

    /// SEC - Set Carry Flag
    pub fn sec(&mut self) {
        self.set_carry(true);
    }

    /// CLI - Clear Interrupt Disable
    ///
    /// Pending IRQs are taken once the instruction completes.
    pub fn cli(&mut self) {
        self.set_interrupt_disable(false);
    }

    /// SEI - Set Interrupt Disable
    pub fn sei(&mut self) {
        self.set_interrupt_disable(true);
    }

    /// CLD - Clear Decimal Mode
    ///
    /// The 2A03 keeps the bit but has no decimal arithmetic.
    pub fn cld(&mut self) {
        self.set_decimal(false);
    }

    /// SED - Set Decimal Mode
    pub fn sed(&mut self) {
        self.set_decimal(true);
    }

    /// CLV - Clear Overflow Flag
    ///
    /// There is no SEV; V is only set by ADC, SBC, BIT and PLP/RTI.
    pub fn clv(&mut self) {
        self.set_overflow(false);
    }
}
