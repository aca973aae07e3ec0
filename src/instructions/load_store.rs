//! # Load and Store Instructions
//!
//! Loads (LDA, LDX, LDY) set N and Z from the loaded value. Stores (STA,
//! STX, STY) write a register to the bus and affect no flags.

use crate::{MemoryBus, CPU};

/// Executes the LDA (Load Accumulator) instruction.
pub(crate) fn execute_lda<M: MemoryBus>(cpu: &mut CPU<M>, addr: u16) {
    cpu.a = cpu.memory.read(addr);
    cpu.set_zn(cpu.a);
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx<M: MemoryBus>(cpu: &mut CPU<M>, addr: u16) {
    cpu.x = cpu.memory.read(addr);
    cpu.set_zn(cpu.x);
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<M: MemoryBus>(cpu: &mut CPU<M>, addr: u16) {
    cpu.y = cpu.memory.read(addr);
    cpu.set_zn(cpu.y);
}

/// Executes the STA (Store Accumulator) instruction.
pub(crate) fn execute_sta<M: MemoryBus>(cpu: &mut CPU<M>, addr: u16) {
    cpu.memory.write(addr, cpu.a);
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn execute_stx<M: MemoryBus>(cpu: &mut CPU<M>, addr: u16) {
    cpu.memory.write(addr, cpu.x);
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn execute_sty<M: MemoryBus>(cpu: &mut CPU<M>, addr: u16) {
    cpu.memory.write(addr, cpu.y);
}
