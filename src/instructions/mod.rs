//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of all 6502 instructions, organized by category.
//! Each instruction is a standalone function taking the CPU and the effective
//! address the addressing stage already resolved. PC has been advanced past
//! the operand bytes by the time a handler runs.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **branches**: Conditional branch instructions (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

pub mod alu;
pub mod branches;
pub mod control;
pub mod flags;
pub mod inc_dec;
pub mod load_store;
pub mod shifts;
pub mod stack;
pub mod transfer;

use crate::opcodes::{Instruction, Mnemonic};
use crate::{MemoryBus, CPU};

/// Runs the handler for `instruction` against the resolved address `addr`.
pub(crate) fn execute<M: MemoryBus>(cpu: &mut CPU<M>, instruction: Instruction, addr: u16) {
    let mode = instruction.addressing_mode;

    match instruction.mnemonic {
        Mnemonic::Adc => alu::execute_adc(cpu, addr),
        Mnemonic::Sbc => alu::execute_sbc(cpu, addr),
        Mnemonic::And => alu::execute_and(cpu, addr),
        Mnemonic::Ora => alu::execute_ora(cpu, addr),
        Mnemonic::Eor => alu::execute_eor(cpu, addr),
        Mnemonic::Cmp => alu::execute_cmp(cpu, addr),
        Mnemonic::Cpx => alu::execute_cpx(cpu, addr),
        Mnemonic::Cpy => alu::execute_cpy(cpu, addr),
        Mnemonic::Bit => alu::execute_bit(cpu, addr),

        Mnemonic::Bcc => branches::execute_bcc(cpu, addr),
        Mnemonic::Bcs => branches::execute_bcs(cpu, addr),
        Mnemonic::Beq => branches::execute_beq(cpu, addr),
        Mnemonic::Bne => branches::execute_bne(cpu, addr),
        Mnemonic::Bmi => branches::execute_bmi(cpu, addr),
        Mnemonic::Bpl => branches::execute_bpl(cpu, addr),
        Mnemonic::Bvc => branches::execute_bvc(cpu, addr),
        Mnemonic::Bvs => branches::execute_bvs(cpu, addr),

        Mnemonic::Asl => shifts::execute_asl(cpu, mode, addr),
        Mnemonic::Lsr => shifts::execute_lsr(cpu, mode, addr),
        Mnemonic::Rol => shifts::execute_rol(cpu, mode, addr),
        Mnemonic::Ror => shifts::execute_ror(cpu, mode, addr),

        Mnemonic::Lda => load_store::execute_lda(cpu, addr),
        Mnemonic::Ldx => load_store::execute_ldx(cpu, addr),
        Mnemonic::Ldy => load_store::execute_ldy(cpu, addr),
        Mnemonic::Sta => load_store::execute_sta(cpu, addr),
        Mnemonic::Stx => load_store::execute_stx(cpu, addr),
        Mnemonic::Sty => load_store::execute_sty(cpu, addr),

        Mnemonic::Inc => inc_dec::execute_inc(cpu, addr),
        Mnemonic::Dec => inc_dec::execute_dec(cpu, addr),
        Mnemonic::Inx => inc_dec::execute_inx(cpu),
        Mnemonic::Iny => inc_dec::execute_iny(cpu),
        Mnemonic::Dex => inc_dec::execute_dex(cpu),
        Mnemonic::Dey => inc_dec::execute_dey(cpu),

        Mnemonic::Brk => control::execute_brk(cpu),
        Mnemonic::Jmp => control::execute_jmp(cpu, addr),
        Mnemonic::Jsr => control::execute_jsr(cpu, addr),
        Mnemonic::Rts => control::execute_rts(cpu),
        Mnemonic::Rti => control::execute_rti(cpu),
        Mnemonic::Nop => {}

        Mnemonic::Pha => stack::execute_pha(cpu),
        Mnemonic::Php => stack::execute_php(cpu),
        Mnemonic::Pla => stack::execute_pla(cpu),
        Mnemonic::Plp => stack::execute_plp(cpu),

        Mnemonic::Clc => flags::execute_clc(cpu),
        Mnemonic::Sec => flags::execute_sec(cpu),
        Mnemonic::Cli => flags::execute_cli(cpu),
        Mnemonic::Sei => flags::execute_sei(cpu),
        Mnemonic::Cld => flags::execute_cld(cpu),
        Mnemonic::Sed => flags::execute_sed(cpu),
        Mnemonic::Clv => flags::execute_clv(cpu),

        Mnemonic::Tax => transfer::execute_tax(cpu),
        Mnemonic::Tay => transfer::execute_tay(cpu),
        Mnemonic::Txa => transfer::execute_txa(cpu),
        Mnemonic::Tya => transfer::execute_tya(cpu),
        Mnemonic::Tsx => transfer::execute_tsx(cpu),
        Mnemonic::Txs => transfer::execute_txs(cpu),

        // The CPU latches illegal opcodes before dispatch
        Mnemonic::Illegal => {}
    }
}
