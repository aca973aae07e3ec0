//! # Opcode Table
//!
//! The 151 documented NMOS 6502 opcodes are listed once, declaratively, in
//! [`OPCODES`]. [`InstructionTable::new`] expands that list into a dense
//! 256-entry table indexed by opcode byte. Slots not named in the list decode
//! to [`Mnemonic::Illegal`], which latches the CPU's illegal-opcode flag.
//!
//! Each entry pairs an addressing mode with an operation. The CPU resolves
//! the effective address first and then hands it to the operation, so the
//! two stages stay independent of each other.

use std::fmt;
use std::sync::OnceLock;

use crate::addressing::AddressingMode;

/// Instruction mnemonics of the documented instruction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
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
    /// Any opcode byte without a documented instruction.
    Illegal,
}

impl Mnemonic {
    /// Upper-case three letter name, `"???"` for illegal opcodes.
    pub const fn as_str(self) -> &'static str {
        use Mnemonic::*;
        match self {
            Adc => "ADC",
            And => "AND",
            Asl => "ASL",
            Bcc => "BCC",
            Bcs => "BCS",
            Beq => "BEQ",
            Bit => "BIT",
            Bmi => "BMI",
            Bne => "BNE",
            Bpl => "BPL",
            Brk => "BRK",
            Bvc => "BVC",
            Bvs => "BVS",
            Clc => "CLC",
            Cld => "CLD",
            Cli => "CLI",
            Clv => "CLV",
            Cmp => "CMP",
            Cpx => "CPX",
            Cpy => "CPY",
            Dec => "DEC",
            Dex => "DEX",
            Dey => "DEY",
            Eor => "EOR",
            Inc => "INC",
            Inx => "INX",
            Iny => "INY",
            Jmp => "JMP",
            Jsr => "JSR",
            Lda => "LDA",
            Ldx => "LDX",
            Ldy => "LDY",
            Lsr => "LSR",
            Nop => "NOP",
            Ora => "ORA",
            Pha => "PHA",
            Php => "PHP",
            Pla => "PLA",
            Plp => "PLP",
            Rol => "ROL",
            Ror => "ROR",
            Rti => "RTI",
            Rts => "RTS",
            Sbc => "SBC",
            Sec => "SEC",
            Sed => "SED",
            Sei => "SEI",
            Sta => "STA",
            Stx => "STX",
            Sty => "STY",
            Tax => "TAX",
            Tay => "TAY",
            Tsx => "TSX",
            Txa => "TXA",
            Txs => "TXS",
            Tya => "TYA",
            Illegal => "???",
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded opcode slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Operation to run once the effective address is known.
    pub mnemonic: Mnemonic,

    /// How the operand bytes are turned into an effective address.
    pub addressing_mode: AddressingMode,

    /// Documented base cycle cost. Page-crossing and branch penalties are
    /// not modeled. Zero for illegal slots.
    pub base_cycles: u8,
}

impl Instruction {
    /// The entry every undocumented slot decodes to.
    pub const ILLEGAL: Instruction = Instruction {
        mnemonic: Mnemonic::Illegal,
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 0,
    };

    /// Returns true unless this slot decodes to [`Mnemonic::Illegal`].
    pub fn is_legal(&self) -> bool {
        self.mnemonic != Mnemonic::Illegal
    }

    /// Total instruction length including the opcode byte.
    pub fn size_bytes(&self) -> u16 {
        1 + self.addressing_mode.operand_bytes()
    }
}

use AddressingMode::{
    Absolute as Abs, AbsoluteX as Abx, AbsoluteY as Aby, Accumulator as Acc, Immediate as Imm,
    Implicit as Imp, Indirect as Ind, IndirectX as Izx, IndirectY as Izy, Relative as Rel,
    ZeroPage as Zpg, ZeroPageX as Zpx, ZeroPageY as Zpy,
};

/// Every documented opcode as `(byte, mnemonic, addressing mode, base cycles)`.
pub const OPCODES: [(u8, Mnemonic, AddressingMode, u8); 151] = [
    (0x69, Mnemonic::Adc, Imm, 2),
    (0x65, Mnemonic::Adc, Zpg, 3),
    (0x75, Mnemonic::Adc, Zpx, 4),
    (0x6D, Mnemonic::Adc, Abs, 4),
    (0x7D, Mnemonic::Adc, Abx, 4),
    (0x79, Mnemonic::Adc, Aby, 4),
    (0x61, Mnemonic::Adc, Izx, 6),
    (0x71, Mnemonic::Adc, Izy, 5),
    (0x29, Mnemonic::And, Imm, 2),
    (0x25, Mnemonic::And, Zpg, 3),
    (0x35, Mnemonic::And, Zpx, 4),
    (0x2D, Mnemonic::And, Abs, 4),
    (0x3D, Mnemonic::And, Abx, 4),
    (0x39, Mnemonic::And, Aby, 4),
    (0x21, Mnemonic::And, Izx, 6),
    (0x31, Mnemonic::And, Izy, 5),
    (0x0A, Mnemonic::Asl, Acc, 2),
    (0x06, Mnemonic::Asl, Zpg, 5),
    (0x16, Mnemonic::Asl, Zpx, 6),
    (0x0E, Mnemonic::Asl, Abs, 6),
    (0x1E, Mnemonic::Asl, Abx, 7),
    (0x90, Mnemonic::Bcc, Rel, 2),
    (0xB0, Mnemonic::Bcs, Rel, 2),
    (0xF0, Mnemonic::Beq, Rel, 2),
    (0x24, Mnemonic::Bit, Zpg, 3),
    (0x2C, Mnemonic::Bit, Abs, 4),
    (0x30, Mnemonic::Bmi, Rel, 2),
    (0xD0, Mnemonic::Bne, Rel, 2),
    (0x10, Mnemonic::Bpl, Rel, 2),
    (0x00, Mnemonic::Brk, Imp, 7),
    (0x50, Mnemonic::Bvc, Rel, 2),
    (0x70, Mnemonic::Bvs, Rel, 2),
    (0x18, Mnemonic::Clc, Imp, 2),
    (0xD8, Mnemonic::Cld, Imp, 2),
    (0x58, Mnemonic::Cli, Imp, 2),
    (0xB8, Mnemonic::Clv, Imp, 2),
    (0xC9, Mnemonic::Cmp, Imm, 2),
    (0xC5, Mnemonic::Cmp, Zpg, 3),
    (0xD5, Mnemonic::Cmp, Zpx, 4),
    (0xCD, Mnemonic::Cmp, Abs, 4),
    (0xDD, Mnemonic::Cmp, Abx, 4),
    (0xD9, Mnemonic::Cmp, Aby, 4),
    (0xC1, Mnemonic::Cmp, Izx, 6),
    (0xD1, Mnemonic::Cmp, Izy, 5),
    (0xE0, Mnemonic::Cpx, Imm, 2),
    (0xE4, Mnemonic::Cpx, Zpg, 3),
    (0xEC, Mnemonic::Cpx, Abs, 4),
    (0xC0, Mnemonic::Cpy, Imm, 2),
    (0xC4, Mnemonic::Cpy, Zpg, 3),
    (0xCC, Mnemonic::Cpy, Abs, 4),
    (0xC6, Mnemonic::Dec, Zpg, 5),
    (0xD6, Mnemonic::Dec, Zpx, 6),
    (0xCE, Mnemonic::Dec, Abs, 6),
    (0xDE, Mnemonic::Dec, Abx, 7),
    (0xCA, Mnemonic::Dex, Imp, 2),
    (0x88, Mnemonic::Dey, Imp, 2),
    (0x49, Mnemonic::Eor, Imm, 2),
    (0x45, Mnemonic::Eor, Zpg, 3),
    (0x55, Mnemonic::Eor, Zpx, 4),
    (0x4D, Mnemonic::Eor, Abs, 4),
    (0x5D, Mnemonic::Eor, Abx, 4),
    (0x59, Mnemonic::Eor, Aby, 4),
    (0x41, Mnemonic::Eor, Izx, 6),
    (0x51, Mnemonic::Eor, Izy, 5),
    (0xE6, Mnemonic::Inc, Zpg, 5),
    (0xF6, Mnemonic::Inc, Zpx, 6),
    (0xEE, Mnemonic::Inc, Abs, 6),
    (0xFE, Mnemonic::Inc, Abx, 7),
    (0xE8, Mnemonic::Inx, Imp, 2),
    (0xC8, Mnemonic::Iny, Imp, 2),
    (0x4C, Mnemonic::Jmp, Abs, 3),
    (0x6C, Mnemonic::Jmp, Ind, 5),
    (0x20, Mnemonic::Jsr, Abs, 6),
    (0xA9, Mnemonic::Lda, Imm, 2),
    (0xA5, Mnemonic::Lda, Zpg, 3),
    (0xB5, Mnemonic::Lda, Zpx, 4),
    (0xAD, Mnemonic::Lda, Abs, 4),
    (0xBD, Mnemonic::Lda, Abx, 4),
    (0xB9, Mnemonic::Lda, Aby, 4),
    (0xA1, Mnemonic::Lda, Izx, 6),
    (0xB1, Mnemonic::Lda, Izy, 5),
    (0xA2, Mnemonic::Ldx, Imm, 2),
    (0xA6, Mnemonic::Ldx, Zpg, 3),
    (0xB6, Mnemonic::Ldx, Zpy, 4),
    (0xAE, Mnemonic::Ldx, Abs, 4),
    (0xBE, Mnemonic::Ldx, Aby, 4),
    (0xA0, Mnemonic::Ldy, Imm, 2),
    (0xA4, Mnemonic::Ldy, Zpg, 3),
    (0xB4, Mnemonic::Ldy, Zpx, 4),
    (0xAC, Mnemonic::Ldy, Abs, 4),
    (0xBC, Mnemonic::Ldy, Abx, 4),
    (0x4A, Mnemonic::Lsr, Acc, 2),
    (0x46, Mnemonic::Lsr, Zpg, 5),
    (0x56, Mnemonic::Lsr, Zpx, 6),
    (0x4E, Mnemonic::Lsr, Abs, 6),
    (0x5E, Mnemonic::Lsr, Abx, 7),
    (0xEA, Mnemonic::Nop, Imp, 2),
    (0x09, Mnemonic::Ora, Imm, 2),
    (0x05, Mnemonic::Ora, Zpg, 3),
    (0x15, Mnemonic::Ora, Zpx, 4),
    (0x0D, Mnemonic::Ora, Abs, 4),
    (0x1D, Mnemonic::Ora, Abx, 4),
    (0x19, Mnemonic::Ora, Aby, 4),
    (0x01, Mnemonic::Ora, Izx, 6),
    (0x11, Mnemonic::Ora, Izy, 5),
    (0x48, Mnemonic::Pha, Imp, 3),
    (0x08, Mnemonic::Php, Imp, 3),
    (0x68, Mnemonic::Pla, Imp, 4),
    (0x28, Mnemonic::Plp, Imp, 4),
    (0x2A, Mnemonic::Rol, Acc, 2),
    (0x26, Mnemonic::Rol, Zpg, 5),
    (0x36, Mnemonic::Rol, Zpx, 6),
    (0x2E, Mnemonic::Rol, Abs, 6),
    (0x3E, Mnemonic::Rol, Abx, 7),
    (0x6A, Mnemonic::Ror, Acc, 2),
    (0x66, Mnemonic::Ror, Zpg, 5),
    (0x76, Mnemonic::Ror, Zpx, 6),
    (0x6E, Mnemonic::Ror, Abs, 6),
    (0x7E, Mnemonic::Ror, Abx, 7),
    (0x40, Mnemonic::Rti, Imp, 6),
    (0x60, Mnemonic::Rts, Imp, 6),
    (0xE9, Mnemonic::Sbc, Imm, 2),
    (0xE5, Mnemonic::Sbc, Zpg, 3),
    (0xF5, Mnemonic::Sbc, Zpx, 4),
    (0xED, Mnemonic::Sbc, Abs, 4),
    (0xFD, Mnemonic::Sbc, Abx, 4),
    (0xF9, Mnemonic::Sbc, Aby, 4),
    (0xE1, Mnemonic::Sbc, Izx, 6),
    (0xF1, Mnemonic::Sbc, Izy, 5),
    (0x38, Mnemonic::Sec, Imp, 2),
    (0xF8, Mnemonic::Sed, Imp, 2),
    (0x78, Mnemonic::Sei, Imp, 2),
    (0x85, Mnemonic::Sta, Zpg, 3),
    (0x95, Mnemonic::Sta, Zpx, 4),
    (0x8D, Mnemonic::Sta, Abs, 4),
    (0x9D, Mnemonic::Sta, Abx, 5),
    (0x99, Mnemonic::Sta, Aby, 5),
    (0x81, Mnemonic::Sta, Izx, 6),
    (0x91, Mnemonic::Sta, Izy, 6),
    (0x86, Mnemonic::Stx, Zpg, 3),
    (0x96, Mnemonic::Stx, Zpy, 4),
    (0x8E, Mnemonic::Stx, Abs, 4),
    (0x84, Mnemonic::Sty, Zpg, 3),
    (0x94, Mnemonic::Sty, Zpx, 4),
    (0x8C, Mnemonic::Sty, Abs, 4),
    (0xAA, Mnemonic::Tax, Imp, 2),
    (0xA8, Mnemonic::Tay, Imp, 2),
    (0xBA, Mnemonic::Tsx, Imp, 2),
    (0x8A, Mnemonic::Txa, Imp, 2),
    (0x9A, Mnemonic::Txs, Imp, 2),
    (0x98, Mnemonic::Tya, Imp, 2),
];

/// Dense 256-entry decode table, immutable once built.
///
/// # Examples
///
/// ```
/// use emu6502::{AddressingMode, InstructionTable, Mnemonic};
///
/// let table = InstructionTable::get();
/// let lda = table.decode(0xA9);
/// assert_eq!(lda.mnemonic, Mnemonic::Lda);
/// assert_eq!(lda.addressing_mode, AddressingMode::Immediate);
///
/// assert!(!table.decode(0x02).is_legal());
/// ```
#[derive(Debug, Clone)]
pub struct InstructionTable {
    entries: [Instruction; 256],
}

impl InstructionTable {
    /// Builds the table from [`OPCODES`].
    ///
    /// # Panics
    ///
    /// Panics if the declarative list assigns the same opcode byte twice.
    pub fn new() -> Self {
        Self::from_entries(&OPCODES)
    }

    /// Builds a table from an arbitrary declarative list; unlisted slots are
    /// illegal.
    ///
    /// # Panics
    ///
    /// Panics if `entries` assigns the same opcode byte twice.
    pub fn from_entries(entries: &[(u8, Mnemonic, AddressingMode, u8)]) -> Self {
        let mut table = [Instruction::ILLEGAL; 256];

        for &(opcode, mnemonic, addressing_mode, base_cycles) in entries {
            let slot = &mut table[opcode as usize];
            assert!(
                !slot.is_legal(),
                "opcode 0x{:02X} assigned twice ({} and {})",
                opcode,
                slot.mnemonic,
                mnemonic
            );
            *slot = Instruction {
                mnemonic,
                addressing_mode,
                base_cycles,
            };
        }

        Self { entries: table }
    }

    /// Shared table built on first use.
    pub fn get() -> &'static InstructionTable {
        static TABLE: OnceLock<InstructionTable> = OnceLock::new();
        TABLE.get_or_init(InstructionTable::new)
    }

    /// Looks up the entry for an opcode byte.
    #[inline]
    pub fn decode(&self, opcode: u8) -> Instruction {
        self.entries[opcode as usize]
    }

    /// Iterates over `(opcode, instruction)` for all 256 slots.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Instruction)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(opcode, instruction)| (opcode as u8, instruction))
    }
}

impl Default for InstructionTable {
    fn default() -> Self {
        Self::new()
    }
}
