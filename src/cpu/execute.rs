// CPU execution module
//
// Fetch, table lookup, operand resolution, operation, cycle accounting.
// OAM DMA requested by the instruction is serviced before returning, so its
// stall is part of the instruction's cost as seen by the scheduler.

use crate::bus::Bus;
use crate::cpu::addressing::{AddressingMode, AddressingResult};
use crate::cpu::opcodes::{Op, OPCODE_TABLE};
use crate::cpu::{Cpu, JamBehavior};

/// Cycles burned per step while halted on a KIL opcode
const JAMMED_CYCLES: u32 = 2;

/// OAM DMA stall when started on an even cycle (one more on odd)
const DMA_CYCLES: u32 = 513;

impl Cpu {
    /// Execute one CPU instruction
    ///
    /// Fetches the opcode at PC, resolves its operand, executes it and
    /// advances the cycle counters.
    ///
    /// # Returns
    /// The number of cycles consumed, including any OAM DMA stall
    pub fn do_instruction(&mut self, bus: &mut Bus) -> u32 {
        if self.jammed {
            self.add_cycles(bus, JAMMED_CYCLES);
            return JAMMED_CYCLES;
        }

        let opcode_addr = self.pc;
        let opcode = self.fetch_byte(bus);
        let info = &OPCODE_TABLE[opcode as usize];

        let addr_result = self.resolve_address(info.mode, bus);
        debug_assert_eq!(
            self.pc.wrapping_sub(opcode_addr),
            info.bytes as u16,
            "{} operand length",
            info.mnemonic()
        );

        if !info.official {
            log::trace!(
                "Unofficial opcode ${:02X} ({}) at ${:04X}",
                opcode,
                info.mnemonic(),
                opcode_addr
            );
        }

        if info.op == Op::Kil {
            return self.jam(bus, opcode);
        }

        let extra_cycles = self.execute(info.op, info.mode, &addr_result, bus);

        let mut cycles = info.cycles as u32 + extra_cycles as u32;
        if info.page_cycle && addr_result.page_crossed {
            cycles += 1;
        }
        self.add_cycles(bus, cycles);

        if let Some(page) = bus.take_dma_request() {
            cycles += self.oam_dma(bus, page);
        }

        cycles
    }

    /// Run instructions until the cycle counter passes `limit`
    ///
    /// `limit` is a cycle of the current frame; the fractional frame base is
    /// added here. The last instruction may overshoot. Pending NMI and IRQ
    /// are serviced between instructions.
    pub fn do_instructions(&mut self, bus: &mut Bus, limit: f64) {
        while (self.cycle as f64) <= limit + self.cycle_offset {
            if !self.jammed {
                self.poll_interrupts(bus);
            }
            self.do_instruction(bus);
        }
    }

    /// Service a pending NMI, else a pending unmasked IRQ
    fn poll_interrupts(&mut self, bus: &mut Bus) {
        if bus.ppu.take_nmi() {
            self.nmi(bus);
        } else if bus.irq_line() {
            self.irq(bus);
        }
    }

    /// KIL/JAM opcode
    fn jam(&mut self, bus: &mut Bus, opcode: u8) -> u32 {
        let at = self.pc.wrapping_sub(1);
        match self.jam_behavior {
            JamBehavior::Reset => {
                log::warn!("KIL opcode ${:02X} at ${:04X}, resetting CPU", opcode, at);
                self.do_reset(bus);
                crate::cpu::RESET_CYCLES
            }
            JamBehavior::Halt => {
                log::warn!("KIL opcode ${:02X} at ${:04X}, CPU halted", opcode, at);
                self.pc = at;
                self.jammed = true;
                self.add_cycles(bus, JAMMED_CYCLES);
                JAMMED_CYCLES
            }
        }
    }

    /// Copy a page into OAM and stall for 513 or 514 cycles
    fn oam_dma(&mut self, bus: &mut Bus, page: u8) -> u32 {
        let stall = if self.total_cycles % 2 == 1 {
            DMA_CYCLES + 1
        } else {
            DMA_CYCLES
        };
        bus.run_oam_dma(page);
        self.add_cycles(bus, stall);
        stall
    }

    /// Perform `op` on a resolved operand
    ///
    /// # Returns
    /// Extra cycles beyond the table value (taken branches only)
    #[allow(clippy::too_many_lines)]
    fn execute(
        &mut self,
        op: Op,
        mode: AddressingMode,
        addr_result: &AddressingResult,
        bus: &mut Bus,
    ) -> u8 {
        match op {
            // Load/Store instructions
            Op::Lda => self.lda(bus, addr_result),
            Op::Ldx => self.ldx(bus, addr_result),
            Op::Ldy => self.ldy(bus, addr_result),
            Op::Sta => self.sta(bus, addr_result),
            Op::Stx => self.stx(bus, addr_result),
            Op::Sty => self.sty(bus, addr_result),

            // Arithmetic instructions
            Op::Adc => self.adc(bus, addr_result),
            Op::Sbc => self.sbc(bus, addr_result),
            Op::Inc => self.inc(bus, addr_result),
            Op::Inx => self.inx(),
            Op::Iny => self.iny(),
            Op::Dec => self.dec(bus, addr_result),
            Op::Dex => self.dex(),
            Op::Dey => self.dey(),

            // Logical instructions
            Op::And => self.and(bus, addr_result),
            Op::Ora => self.ora(bus, addr_result),
            Op::Eor => self.eor(bus, addr_result),
            Op::Bit => self.bit(bus, addr_result),

            // Shift/Rotate instructions
            Op::Asl => {
                self.asl(bus, addr_result);
            }
            Op::Lsr => {
                self.lsr(bus, addr_result);
            }
            Op::Rol => {
                self.rol(bus, addr_result);
            }
            Op::Ror => {
                self.ror(bus, addr_result);
            }

            // Compare instructions
            Op::Cmp => self.cmp(bus, addr_result),
            Op::Cpx => self.cpx(bus, addr_result),
            Op::Cpy => self.cpy(bus, addr_result),

            // Branch instructions (return extra cycles)
            Op::Bcc => return self.bcc(addr_result),
            Op::Bcs => return self.bcs(addr_result),
            Op::Beq => return self.beq(addr_result),
            Op::Bmi => return self.bmi(addr_result),
            Op::Bne => return self.bne(addr_result),
            Op::Bpl => return self.bpl(addr_result),
            Op::Bvc => return self.bvc(addr_result),
            Op::Bvs => return self.bvs(addr_result),

            // Jump/Subroutine instructions
            Op::Jmp => self.jmp(addr_result),
            Op::Jsr => self.jsr(bus, addr_result),
            Op::Rts => self.rts(bus),

            // Stack instructions
            Op::Pha => self.pha(bus),
            Op::Pla => self.pla(bus),
            Op::Php => self.php(bus),
            Op::Plp => self.plp(bus),
            Op::Txs => self.txs(),
            Op::Tsx => self.tsx(),

            // Transfer instructions
            Op::Tax => self.tax(),
            Op::Tay => self.tay(),
            Op::Txa => self.txa(),
            Op::Tya => self.tya(),

            // Flag instructions
            Op::Clc => self.clc(),
            Op::Cld => self.cld(),
            Op::Cli => self.cli(),
            Op::Clv => self.clv(),
            Op::Sec => self.sec(),
            Op::Sed => self.sed(),
            Op::Sei => self.sei(),

            // Miscellaneous instructions
            Op::Brk => self.brk(bus),
            Op::Rti => self.rti(bus),
            Op::Nop => self.nop(bus, mode, addr_result),

            // Unofficial instructions
            Op::Slo => self.slo(bus, addr_result),
            Op::Rla => self.rla(bus, addr_result),
            Op::Sre => self.sre(bus, addr_result),
            Op::Rra => self.rra(bus, addr_result),
            Op::Dcp => self.dcp(bus, addr_result),
            Op::Isc => self.isc(bus, addr_result),
            Op::Lax => self.lax(bus, addr_result),
            Op::Sax => self.sax(bus, addr_result),
            Op::Las => self.las(bus, addr_result),
            Op::Shy => self.shy(bus, addr_result),
            Op::Shx => self.shx(bus, addr_result),
            Op::Ahx => self.ahx(bus, addr_result),
            Op::Tas => self.tas(bus, addr_result),
            Op::Anc => self.anc(bus, addr_result),
            Op::Alr => self.alr(bus, addr_result),
            Op::Arr => self.arr(bus, addr_result),
            Op::Axs => self.axs(bus, addr_result),
            Op::Xaa => self.xaa(bus, addr_result),
            Op::Lxa => self.lxa(bus, addr_result),

            // Handled before dispatch
            Op::Kil => {}
        }
        0 // No extra cycles for non-branch instructions
    }
}
