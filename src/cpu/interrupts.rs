// Interrupt handling for 6502 CPU
//
// NMI, IRQ and BRK share one sequence: push PC and P, set I, load PC from a
// vector. They differ only in the vector and the B bit of the pushed P.
// Reset runs the same sequence with its stack writes suppressed. BRK is
// charged through the opcode table; NMI and IRQ charge their own 7 cycles.

use crate::bus::Bus;
use crate::cpu::{flags, vectors, Cpu, RESET_CYCLES};

/// Cycles taken by every interrupt sequence
const INTERRUPT_CYCLES: u32 = 7;

impl Cpu {
    /// Push PC and P, set I and jump through `vector`; no cycles charged
    fn interrupt(&mut self, bus: &mut Bus, vector: u16, break_flag: bool) {
        self.stack_push_u16(bus, self.pc);

        let mut status = self.status | flags::UNUSED;
        if break_flag {
            status |= flags::BREAK;
        } else {
            status &= !flags::BREAK;
        }
        self.stack_push(bus, status);

        self.set_interrupt_disable(true);
        self.pc = bus.read_u16(vector);
    }

    /// Non-maskable interrupt (vector $FFFA)
    pub fn nmi(&mut self, bus: &mut Bus) {
        self.interrupt(bus, vectors::NMI, false);
        self.add_cycles(bus, INTERRUPT_CYCLES);
    }

    /// Maskable interrupt (vector $FFFE); ignored while I is set
    pub fn irq(&mut self, bus: &mut Bus) {
        if self.get_interrupt_disable() {
            return;
        }
        self.interrupt(bus, vectors::IRQ, false);
        self.add_cycles(bus, INTERRUPT_CYCLES);
    }

    /// BRK - Force Interrupt
    ///
    /// BRK is a two-byte instruction: the pushed return address skips the
    /// padding byte after the opcode. The pushed P has B set.
    pub fn brk(&mut self, bus: &mut Bus) {
        self.pc = self.pc.wrapping_add(1);
        self.interrupt(bus, vectors::IRQ, true);
    }

    /// Reset sequence: SP drops by 3 without writing, I set, PC from $FFFC
    pub fn do_reset(&mut self, bus: &mut Bus) {
        self.sp = self.sp.wrapping_sub(3);
        self.set_interrupt_disable(true);
        self.pc = bus.read_u16(vectors::RESET);
        self.add_cycles(bus, RESET_CYCLES);
    }
}
