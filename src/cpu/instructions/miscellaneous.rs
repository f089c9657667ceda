// Miscellaneous instructions for 6502 CPU

use crate::bus::Bus;
use crate::cpu::addressing::{AddressingMode, AddressingResult};
use crate::cpu::{flags, Cpu};

impl Cpu {
    /// NOP - No Operation
    ///
    /// The unofficial forms still perform their operand read, which matters
    /// for registers with read side effects.
    pub fn nop(&mut self, bus: &mut Bus, mode: AddressingMode, addr_result: &AddressingResult) {
        if !matches!(mode, AddressingMode::Implied | AddressingMode::Immediate) {
            bus.read(addr_result.address);
        }
    }

    /// RTI - Return from Interrupt
    ///
    /// Pulls P (B discarded, bit 5 forced) then PC. Unlike RTS, the pulled
    /// PC is not incremented.
    pub fn rti(&mut self, bus: &mut Bus) {
        let status = self.stack_pop(bus);
        self.status = (status & !flags::BREAK) | flags::UNUSED;
        self.pc = self.stack_pop_u16(bus);
    }
}
