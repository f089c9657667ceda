// Shift and rotate instructions for 6502 CPU
//
// Each works on the accumulator or on memory. Left shifts go through the ALU
// helper, since the bit pushed out of the byte is the carry.

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    /// ASL - Arithmetic Shift Left: C <- [76543210] <- 0
    pub fn asl(&mut self, bus: &mut Bus, addr_result: &AddressingResult) -> u8 {
        self.modify(bus, addr_result, |cpu, value| cpu.alu_result((value as u16) << 1))
    }

    /// LSR - Logical Shift Right: 0 -> [76543210] -> C
    pub fn lsr(&mut self, bus: &mut Bus, addr_result: &AddressingResult) -> u8 {
        self.modify(bus, addr_result, |cpu, value| {
            cpu.set_carry(value & 0x01 != 0);
            let result = value >> 1;
            cpu.update_zero_and_negative_flags(result);
            result
        })
    }

    /// ROL - Rotate Left: C <- [76543210] <- C
    pub fn rol(&mut self, bus: &mut Bus, addr_result: &AddressingResult) -> u8 {
        self.modify(bus, addr_result, |cpu, value| {
            let raw = ((value as u16) << 1) | cpu.get_carry() as u16;
            cpu.alu_result(raw)
        })
    }

    /// ROR - Rotate Right: C -> [76543210] -> C
    pub fn ror(&mut self, bus: &mut Bus, addr_result: &AddressingResult) -> u8 {
        self.modify(bus, addr_result, |cpu, value| {
            let carry_in = (cpu.get_carry() as u8) << 7;
            cpu.set_carry(value & 0x01 != 0);
            let result = (value >> 1) | carry_in;
            cpu.update_zero_and_negative_flags(result);
            result
        })
    }
}
