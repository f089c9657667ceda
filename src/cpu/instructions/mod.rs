// Instructions module for 6502 CPU
// This module organizes CPU instructions by semantic grouping

pub mod arithmetic;
pub mod branch;
pub mod compare;
pub mod flags;
pub mod jump_subroutine;
pub mod load_store;
pub mod logic;
pub mod miscellaneous;
pub mod shift_rotate;
pub mod stack;
pub mod transfer;
pub mod unofficial;

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;

impl crate::cpu::Cpu {
    // ========================================
    // Helper Functions
    // ========================================

    /// Read the operand named by an addressing result
    ///
    /// Immediate and accumulator modes carry the value inline; every other
    /// mode reads it from the bus.
    #[inline]
    pub(crate) fn read_operand(&mut self, bus: &mut Bus, addr_result: &AddressingResult) -> u8 {
        match addr_result.value {
            Some(value) => value,
            None => bus.read(addr_result.address),
        }
    }

    /// Read-modify-write on the accumulator or a memory location
    ///
    /// An inline value means accumulator mode: the result goes back to A.
    /// Otherwise the result is written to the effective address.
    #[inline]
    pub(crate) fn modify<F>(&mut self, bus: &mut Bus, addr_result: &AddressingResult, f: F) -> u8
    where
        F: FnOnce(&mut Self, u8) -> u8,
    {
        match addr_result.value {
            Some(value) => {
                let result = f(self, value);
                self.a = result;
                result
            }
            None => {
                let value = bus.read(addr_result.address);
                let result = f(self, value);
                bus.write(addr_result.address, result);
                result
            }
        }
    }
}
