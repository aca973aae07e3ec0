//! # Increment and Decrement Instructions
//!
//! INC/DEC operate on memory (read-modify-write); INX/INY/DEX/DEY on the
//! index registers. All wrap at 8 bits and set N and Z from the result.
//! Carry and overflow are never touched.

use crate::{MemoryBus, CPU};

/// Executes the INC (Increment Memory) instruction.
pub(crate) fn execute_inc<M: MemoryBus>(cpu: &mut CPU<M>, addr: u16) {
    let result = cpu.memory.read(addr).wrapping_add(1);
    cpu.set_zn(result);
    cpu.memory.write(addr, result);
}

/// Executes the DEC (Decrement Memory) instruction.
pub(crate) fn execute_dec<M: MemoryBus>(cpu: &mut CPU<M>, addr: u16) {
    let result = cpu.memory.read(addr).wrapping_sub(1);
    cpu.set_zn(result);
    cpu.memory.write(addr, result);
}

pub(crate) fn execute_inx<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.set_zn(cpu.x);
}

pub(crate) fn execute_iny<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.set_zn(cpu.y);
}

pub(crate) fn execute_dex<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.set_zn(cpu.x);
}

pub(crate) fn execute_dey<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.set_zn(cpu.y);
}
