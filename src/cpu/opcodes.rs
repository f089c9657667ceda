// Opcode table for the 6502 CPU
//
// Every one of the 256 opcodes resolves to an operation, an addressing mode,
// a base cycle count and whether a page-crossing read adds a cycle.

use crate::cpu::addressing::AddressingMode;

/// Operation performed by an opcode, independent of its addressing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    // Official instructions
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,

    // Unofficial instructions
    Ahx,
    Alr,
    Anc,
    Arr,
    Axs,
    Dcp,
    Isc,
    Kil,
    Las,
    Lax,
    Lxa,
    Rla,
    Rra,
    Sax,
    Shx,
    Shy,
    Slo,
    Sre,
    Tas,
    Xaa,
}

impl Op {
    /// Assembler mnemonic
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Op::Adc => "ADC",
            Op::And => "AND",
            Op::Asl => "ASL",
            Op::Bcc => "BCC",
            Op::Bcs => "BCS",
            Op::Beq => "BEQ",
            Op::Bit => "BIT",
            Op::Bmi => "BMI",
            Op::Bne => "BNE",
            Op::Bpl => "BPL",
            Op::Brk => "BRK",
            Op::Bvc => "BVC",
            Op::Bvs => "BVS",
            Op::Clc => "CLC",
            Op::Cld => "CLD",
            Op::Cli => "CLI",
            Op::Clv => "CLV",
            Op::Cmp => "CMP",
            Op::Cpx => "CPX",
            Op::Cpy => "CPY",
            Op::Dec => "DEC",
            Op::Dex => "DEX",
            Op::Dey => "DEY",
            Op::Eor => "EOR",
            Op::Inc => "INC",
            Op::Inx => "INX",
            Op::Iny => "INY",
            Op::Jmp => "JMP",
            Op::Jsr => "JSR",
            Op::Lda => "LDA",
            Op::Ldx => "LDX",
            Op::Ldy => "LDY",
            Op::Lsr => "LSR",
            Op::Nop => "NOP",
            Op::Ora => "ORA",
            Op::Pha => "PHA",
            Op::Php => "PHP",
            Op::Pla => "PLA",
            Op::Plp => "PLP",
            Op::Rol => "ROL",
            Op::Ror => "ROR",
            Op::Rti => "RTI",
            Op::Rts => "RTS",
            Op::Sbc => "SBC",
            Op::Sec => "SEC",
            Op::Sed => "SED",
            Op::Sei => "SEI",
            Op::Sta => "STA",
            Op::Stx => "STX",
            Op::Sty => "STY",
            Op::Tax => "TAX",
            Op::Tay => "TAY",
            Op::Tsx => "TSX",
            Op::Txa => "TXA",
            Op::Txs => "TXS",
            Op::Tya => "TYA",
            Op::Ahx => "AHX",
            Op::Alr => "ALR",
            Op::Anc => "ANC",
            Op::Arr => "ARR",
            Op::Axs => "AXS",
            Op::Dcp => "DCP",
            Op::Isc => "ISC",
            Op::Kil => "KIL",
            Op::Las => "LAS",
            Op::Lax => "LAX",
            Op::Lxa => "LXA",
            Op::Rla => "RLA",
            Op::Rra => "RRA",
            Op::Sax => "SAX",
            Op::Shx => "SHX",
            Op::Shy => "SHY",
            Op::Slo => "SLO",
            Op::Sre => "SRE",
            Op::Tas => "TAS",
            Op::Xaa => "XAA",
        }
    }
}

/// Decoded opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeInfo {
    pub op: Op,
    pub mode: AddressingMode,

    /// Instruction length including the opcode byte
    pub bytes: u8,

    /// Base cycle count
    pub cycles: u8,

    /// +1 cycle when indexing crosses a page (read instructions only)
    pub page_cycle: bool,

    /// Documented by MOS
    pub official: bool,
}

impl OpcodeInfo {
    pub const fn mnemonic(&self) -> &'static str {
        self.op.mnemonic()
    }
}

const IMP: AddressingMode = AddressingMode::Implied;
const ACC: AddressingMode = AddressingMode::Accumulator;
const IMM: AddressingMode = AddressingMode::Immediate;
const ZP0: AddressingMode = AddressingMode::ZeroPage;
const ZPX: AddressingMode = AddressingMode::ZeroPageX;
const ZPY: AddressingMode = AddressingMode::ZeroPageY;
const REL: AddressingMode = AddressingMode::Relative;
const ABS: AddressingMode = AddressingMode::Absolute;
const ABX: AddressingMode = AddressingMode::AbsoluteX;
const ABY: AddressingMode = AddressingMode::AbsoluteY;
const IND: AddressingMode = AddressingMode::Indirect;
const IZX: AddressingMode = AddressingMode::IndexedIndirect;
const IZY: AddressingMode = AddressingMode::IndirectIndexed;

/// Official opcode
const fn o(op: Op, mode: AddressingMode, cycles: u8, page_cycle: bool) -> OpcodeInfo {
    OpcodeInfo {
        op,
        mode,
        bytes: mode.bytes(),
        cycles,
        page_cycle,
        official: true,
    }
}

/// Unofficial opcode
const fn u(op: Op, mode: AddressingMode, cycles: u8, page_cycle: bool) -> OpcodeInfo {
    OpcodeInfo {
        op,
        mode,
        bytes: mode.bytes(),
        cycles,
        page_cycle,
        official: false,
    }
}

const KIL: OpcodeInfo = u(Op::Kil, IMP, 2, false);

/// Opcode lookup table indexed by the opcode byte
#[rustfmt::skip]
pub static OPCODE_TABLE: [OpcodeInfo; 256] = [
    // 0x00
    o(Op::Brk, IMP, 7, false), o(Op::Ora, IZX, 6, false), KIL,                        u(Op::Slo, IZX, 8, false),
    u(Op::Nop, ZP0, 3, false), o(Op::Ora, ZP0, 3, false), o(Op::Asl, ZP0, 5, false), u(Op::Slo, ZP0, 5, false),
    o(Op::Php, IMP, 3, false), o(Op::Ora, IMM, 2, false), o(Op::Asl, ACC, 2, false), u(Op::Anc, IMM, 2, false),
    u(Op::Nop, ABS, 4, false), o(Op::Ora, ABS, 4, false), o(Op::Asl, ABS, 6, false), u(Op::Slo, ABS, 6, false),
    // 0x10
    o(Op::Bpl, REL, 2, false), o(Op::Ora, IZY, 5, true),  KIL,                        u(Op::Slo, IZY, 8, false),
    u(Op::Nop, ZPX, 4, false), o(Op::Ora, ZPX, 4, false), o(Op::Asl, ZPX, 6, false), u(Op::Slo, ZPX, 6, false),
    o(Op::Clc, IMP, 2, false), o(Op::Ora, ABY, 4, true),  u(Op::Nop, IMP, 2, false), u(Op::Slo, ABY, 7, false),
    u(Op::Nop, ABX, 4, true),  o(Op::Ora, ABX, 4, true),  o(Op::Asl, ABX, 7, false), u(Op::Slo, ABX, 7, false),
    // 0x20
    o(Op::Jsr, ABS, 6, false), o(Op::And, IZX, 6, false), KIL,                        u(Op::Rla, IZX, 8, false),
    o(Op::Bit, ZP0, 3, false), o(Op::And, ZP0, 3, false), o(Op::Rol, ZP0, 5, false), u(Op::Rla, ZP0, 5, false),
    o(Op::Plp, IMP, 4, false), o(Op::And, IMM, 2, false), o(Op::Rol, ACC, 2, false), u(Op::Anc, IMM, 2, false),
    o(Op::Bit, ABS, 4, false), o(Op::And, ABS, 4, false), o(Op::Rol, ABS, 6, false), u(Op::Rla, ABS, 6, false),
    // 0x30
    o(Op::Bmi, REL, 2, false), o(Op::And, IZY, 5, true),  KIL,                        u(Op::Rla, IZY, 8, false),
    u(Op::Nop, ZPX, 4, false), o(Op::And, ZPX, 4, false), o(Op::Rol, ZPX, 6, false), u(Op::Rla, ZPX, 6, false),
    o(Op::Sec, IMP, 2, false), o(Op::And, ABY, 4, true),  u(Op::Nop, IMP, 2, false), u(Op::Rla, ABY, 7, false),
    u(Op::Nop, ABX, 4, true),  o(Op::And, ABX, 4, true),  o(Op::Rol, ABX, 7, false), u(Op::Rla, ABX, 7, false),
    // 0x40
    o(Op::Rti, IMP, 6, false), o(Op::Eor, IZX, 6, false), KIL,                        u(Op::Sre, IZX, 8, false),
    u(Op::Nop, ZP0, 3, false), o(Op::Eor, ZP0, 3, false), o(Op::Lsr, ZP0, 5, false), u(Op::Sre, ZP0, 5, false),
    o(Op::Pha, IMP, 3, false), o(Op::Eor, IMM, 2, false), o(Op::Lsr, ACC, 2, false), u(Op::Alr, IMM, 2, false),
    o(Op::Jmp, ABS, 3, false), o(Op::Eor, ABS, 4, false), o(Op::Lsr, ABS, 6, false), u(Op::Sre, ABS, 6, false),
    // 0x50
    o(Op::Bvc, REL, 2, false), o(Op::Eor, IZY, 5, true),  KIL,                        u(Op::Sre, IZY, 8, false),
    u(Op::Nop, ZPX, 4, false), o(Op::Eor, ZPX, 4, false), o(Op::Lsr, ZPX, 6, false), u(Op::Sre, ZPX, 6, false),
    o(Op::Cli, IMP, 2, false), o(Op::Eor, ABY, 4, true),  u(Op::Nop, IMP, 2, false), u(Op::Sre, ABY, 7, false),
    u(Op::Nop, ABX, 4, true),  o(Op::Eor, ABX, 4, true),  o(Op::Lsr, ABX, 7, false), u(Op::Sre, ABX, 7, false),
    // 0x60
    o(Op::Rts, IMP, 6, false), o(Op::Adc, IZX, 6, false), KIL,                        u(Op::Rra, IZX, 8, false),
    u(Op::Nop, ZP0, 3, false), o(Op::Adc, ZP0, 3, false), o(Op::Ror, ZP0, 5, false), u(Op::Rra, ZP0, 5, false),
    o(Op::Pla, IMP, 4, false), o(Op::Adc, IMM, 2, false), o(Op::Ror, ACC, 2, false), u(Op::Arr, IMM, 2, false),
    o(Op::Jmp, IND, 5, false), o(Op::Adc, ABS, 4, false), o(Op::Ror, ABS, 6, false), u(Op::Rra, ABS, 6, false),
    // 0x70
    o(Op::Bvs, REL, 2, false), o(Op::Adc, IZY, 5, true),  KIL,                        u(Op::Rra, IZY, 8, false),
    u(Op::Nop, ZPX, 4, false), o(Op::Adc, ZPX, 4, false), o(Op::Ror, ZPX, 6, false), u(Op::Rra, ZPX, 6, false),
    o(Op::Sei, IMP, 2, false), o(Op::Adc, ABY, 4, true),  u(Op::Nop, IMP, 2, false), u(Op::Rra, ABY, 7, false),
    u(Op::Nop, ABX, 4, true),  o(Op::Adc, ABX, 4, true),  o(Op::Ror, ABX, 7, false), u(Op::Rra, ABX, 7, false),
    // 0x80
    u(Op::Nop, IMM, 2, false), o(Op::Sta, IZX, 6, false), u(Op::Nop, IMM, 2, false), u(Op::Sax, IZX, 6, false),
    o(Op::Sty, ZP0, 3, false), o(Op::Sta, ZP0, 3, false), o(Op::Stx, ZP0, 3, false), u(Op::Sax, ZP0, 3, false),
    o(Op::Dey, IMP, 2, false), u(Op::Nop, IMM, 2, false), o(Op::Txa, IMP, 2, false), u(Op::Xaa, IMM, 2, false),
    o(Op::Sty, ABS, 4, false), o(Op::Sta, ABS, 4, false), o(Op::Stx, ABS, 4, false), u(Op::Sax, ABS, 4, false),
    // 0x90
    o(Op::Bcc, REL, 2, false), o(Op::Sta, IZY, 6, false), KIL,                        u(Op::Ahx, IZY, 6, false),
    o(Op::Sty, ZPX, 4, false), o(Op::Sta, ZPX, 4, false), o(Op::Stx, ZPY, 4, false), u(Op::Sax, ZPY, 4, false),
    o(Op::Tya, IMP, 2, false), o(Op::Sta, ABY, 5, false), o(Op::Txs, IMP, 2, false), u(Op::Tas, ABY, 5, false),
    u(Op::Shy, ABX, 5, false), o(Op::Sta, ABX, 5, false), u(Op::Shx, ABY, 5, false), u(Op::Ahx, ABY, 5, false),
    // 0xA0
    o(Op::Ldy, IMM, 2, false), o(Op::Lda, IZX, 6, false), o(Op::Ldx, IMM, 2, false), u(Op::Lax, IZX, 6, false),
    o(Op::Ldy, ZP0, 3, false), o(Op::Lda, ZP0, 3, false), o(Op::Ldx, ZP0, 3, false), u(Op::Lax, ZP0, 3, false),
    o(Op::Tay, IMP, 2, false), o(Op::Lda, IMM, 2, false), o(Op::Tax, IMP, 2, false), u(Op::Lxa, IMM, 2, false),
    o(Op::Ldy, ABS, 4, false), o(Op::Lda, ABS, 4, false), o(Op::Ldx, ABS, 4, false), u(Op::Lax, ABS, 4, false),
    // 0xB0
    o(Op::Bcs, REL, 2, false), o(Op::Lda, IZY, 5, true),  KIL,                        u(Op::Lax, IZY, 5, true),
    o(Op::Ldy, ZPX, 4, false), o(Op::Lda, ZPX, 4, false), o(Op::Ldx, ZPY, 4, false), u(Op::Lax, ZPY, 4, false),
    o(Op::Clv, IMP, 2, false), o(Op::Lda, ABY, 4, true),  o(Op::Tsx, IMP, 2, false), u(Op::Las, ABY, 4, true),
    o(Op::Ldy, ABX, 4, true),  o(Op::Lda, ABX, 4, true),  o(Op::Ldx, ABY, 4, true),  u(Op::Lax, ABY, 4, true),
    // 0xC0
    o(Op::Cpy, IMM, 2, false), o(Op::Cmp, IZX, 6, false), u(Op::Nop, IMM, 2, false), u(Op::Dcp, IZX, 8, false),
    o(Op::Cpy, ZP0, 3, false), o(Op::Cmp, ZP0, 3, false), o(Op::Dec, ZP0, 5, false), u(Op::Dcp, ZP0, 5, false),
    o(Op::Iny, IMP, 2, false), o(Op::Cmp, IMM, 2, false), o(Op::Dex, IMP, 2, false), u(Op::Axs, IMM, 2, false),
    o(Op::Cpy, ABS, 4, false), o(Op::Cmp, ABS, 4, false), o(Op::Dec, ABS, 6, false), u(Op::Dcp, ABS, 6, false),
    // 0xD0
    o(Op::Bne, REL, 2, false), o(Op::Cmp, IZY, 5, true),  KIL,                        u(Op::Dcp, IZY, 8, false),
    u(Op::Nop, ZPX, 4, false), o(Op::Cmp, ZPX, 4, false), o(Op::Dec, ZPX, 6, false), u(Op::Dcp, ZPX, 6, false),
    o(Op::Cld, IMP, 2, false), o(Op::Cmp, ABY, 4, true),  u(Op::Nop, IMP, 2, false), u(Op::Dcp, ABY, 7, false),
    u(Op::Nop, ABX, 4, true),  o(Op::Cmp, ABX, 4, true),  o(Op::Dec, ABX, 7, false), u(Op::Dcp, ABX, 7, false),
    // 0xE0
    o(Op::Cpx, IMM, 2, false), o(Op::Sbc, IZX, 6, false), u(Op::Nop, IMM, 2, false), u(Op::Isc, IZX, 8, false),
    o(Op::Cpx, ZP0, 3, false), o(Op::Sbc, ZP0, 3, false), o(Op::Inc, ZP0, 5, false), u(Op::Isc, ZP0, 5, false),
    o(Op::Inx, IMP, 2, false), o(Op::Sbc, IMM, 2, false), o(Op::Nop, IMP, 2, false), u(Op::Sbc, IMM, 2, false),
    o(Op::Cpx, ABS, 4, false), o(Op::Sbc, ABS, 4, false), o(Op::Inc, ABS, 6, false), u(Op::Isc, ABS, 6, false),
    // 0xF0
    o(Op::Beq, REL, 2, false), o(Op::Sbc, IZY, 5, true),  KIL,                        u(Op::Isc, IZY, 8, false),
    u(Op::Nop, ZPX, 4, false), o(Op::Sbc, ZPX, 4, false), o(Op::Inc, ZPX, 6, false), u(Op::Isc, ZPX, 6, false),
    o(Op::Sed, IMP, 2, false), o(Op::Sbc, ABY, 4, true),  u(Op::Nop, IMP, 2, false), u(Op::Isc, ABY, 7, false),
    u(Op::Nop, ABX, 4, true),  o(Op::Sbc, ABX, 4, true),  o(Op::Inc, ABX, 7, false), u(Op::Isc, ABX, 7, false),
];
