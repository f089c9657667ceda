// Jump and Subroutine instructions for 6502 CPU

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    /// JMP - Jump to Address
    ///
    /// Absolute (3 cycles) or indirect (5 cycles). The indirect $xxFF page
    /// wrap is handled by `addr_indirect`.
    pub fn jmp(&mut self, addr_result: &AddressingResult) {
        self.pc = addr_result.address;
    }

    /// JSR - Jump to Subroutine
    ///
    /// Pushes the address of the last byte of the JSR instruction (return
    /// address minus one), high byte first.
    pub fn jsr(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let return_addr = self.pc.wrapping_sub(1);
        self.stack_push_u16(bus, return_addr);
        self.pc = addr_result.address;
    }

    /// RTS - Return from Subroutine
    pub fn rts(&mut self, bus: &mut Bus) {
        self.pc = self.stack_pop_u16(bus).wrapping_add(1);
    }
}
