//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - BRK: Force Interrupt
//! - JMP: Jump (absolute or indirect; the indirect page-wrap bug lives in
//!   the addressing stage)
//! - JSR / RTS: subroutine call and return
//! - RTI: return from interrupt
//! - NOP
//!
//! JSR pushes the address of its own last byte; RTS adds one after popping.

use crate::cpu::IRQ_VECTOR;
use crate::status;
use crate::{MemoryBus, CPU};

/// Executes the BRK (Force Interrupt) instruction.
///
/// 1. Skips the padding byte after the opcode (PC + 1)
/// 2. Pushes PC high byte, then low byte
/// 3. Pushes the status register with the B bit set
/// 4. Sets the I flag
/// 5. Loads PC from the IRQ vector at $FFFE/$FFFF
pub(crate) fn execute_brk<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.pc = cpu.pc.wrapping_add(1);
    cpu.push_word(cpu.pc);
    cpu.stack_push(cpu.status() | status::BREAK);
    cpu.flag_i = true;
    cpu.pc = cpu.read_vector(IRQ_VECTOR);
}

/// Executes the JMP instruction.
pub(crate) fn execute_jmp<M: MemoryBus>(cpu: &mut CPU<M>, target: u16) {
    cpu.pc = target;
}

/// Executes the JSR (Jump to Subroutine) instruction.
pub(crate) fn execute_jsr<M: MemoryBus>(cpu: &mut CPU<M>, target: u16) {
    let return_address = cpu.pc.wrapping_sub(1);
    cpu.push_word(return_address);
    cpu.pc = target;
}

/// Executes the RTS (Return from Subroutine) instruction.
pub(crate) fn execute_rts<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.pc = cpu.pop_word().wrapping_add(1);
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pops the status register, then PC low and high. Bit 5 of the restored
/// status reads back as 1 regardless of the stacked value.
pub(crate) fn execute_rti<M: MemoryBus>(cpu: &mut CPU<M>) {
    let status = cpu.stack_pop();
    cpu.set_status(status);
    cpu.pc = cpu.pop_word();
}
