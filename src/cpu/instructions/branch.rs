// Branch instructions for 6502 CPU
// All branches use relative addressing and leave the flags alone.
//
// Cycles: 2 if not taken, 3 if taken, 4 if taken into another page.
// The base 2 come from the opcode table; the branch methods return the rest.

use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    /// BCC - Branch if Carry Clear
    pub fn bcc(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(!self.get_carry(), addr_result)
    }

    /// BCS - Branch if Carry Set
    pub fn bcs(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(self.get_carry(), addr_result)
    }

    /// BEQ - Branch if Equal (Zero Set)
    pub fn beq(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(self.get_zero(), addr_result)
    }

    /// BNE - Branch if Not Equal (Zero Clear)
    pub fn bne(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(!self.get_zero(), addr_result)
    }

    /// BMI - Branch if Minus
    pub fn bmi(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(self.get_negative(), addr_result)
    }

    /// BPL - Branch if Plus
    pub fn bpl(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(!self.get_negative(), addr_result)
    }

    /// BVC - Branch if Overflow Clear
    pub fn bvc(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(!self.get_overflow(), addr_result)
    }

    /// BVS - Branch if Overflow Set
    pub fn bvs(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(self.get_overflow(), addr_result)
    }

    /// Take the branch if `condition` holds
    ///
    /// # Returns
    /// Additional cycles: 0 if not taken, 1 if taken, 2 if taken and the
    /// target is on a different page
    #[inline]
    fn branch(&mut self, condition: bool, addr_result: &AddressingResult) -> u8 {
        if !condition {
            return 0;
        }

        self.pc = addr_result.address;
        if addr_result.page_crossed {
            2
        } else {
            1
        }
    }
}
