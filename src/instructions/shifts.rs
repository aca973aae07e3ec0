//! # Shift and Rotate Instructions
//!
//! This module implements bit shift and rotate operations:
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left through carry
//! - ROR: Rotate Right through carry
//!
//! Every shift works either on the accumulator (Accumulator mode) or as a
//! read-modify-write on memory. C receives the bit shifted out; N and Z
//! follow the result.

use crate::{AddressingMode, MemoryBus, CPU};

/// Applies `op` to the accumulator or to the byte at `addr`.
///
/// `op` receives the old value and the incoming carry and returns the new
/// value plus the outgoing carry.
fn modify<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
    addr: u16,
    op: impl FnOnce(u8, bool) -> (u8, bool),
) {
    let value = if mode == AddressingMode::Accumulator {
        cpu.a
    } else {
        cpu.memory.read(addr)
    };

    let (result, carry) = op(value, cpu.flag_c);
    cpu.flag_c = carry;
    cpu.set_zn(result);

    if mode == AddressingMode::Accumulator {
        cpu.a = result;
    } else {
        cpu.memory.write(addr, result);
    }
}

/// Executes the ASL (Arithmetic Shift Left) instruction.
pub(crate) fn execute_asl<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, addr: u16) {
    modify(cpu, mode, addr, |value, _| (value << 1, value & 0x80 != 0));
}

/// Executes the LSR (Logical Shift Right) instruction. N always ends clear.
pub(crate) fn execute_lsr<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, addr: u16) {
    modify(cpu, mode, addr, |value, _| (value >> 1, value & 0x01 != 0));
}

/// Executes the ROL (Rotate Left) instruction.
pub(crate) fn execute_rol<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, addr: u16) {
    modify(cpu, mode, addr, |value, carry| {
        let wide = ((value as u16) << 1) | carry as u16;
        (wide as u8, wide > 0xFF)
    });
}

/// Executes the ROR (Rotate Right) instruction.
pub(crate) fn execute_ror<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, addr: u16) {
    modify(cpu, mode, addr, |value, carry| {
        let wide = value as u16 | if carry { 0x100 } else { 0 };
        ((wide >> 1) as u8, wide & 0x01 != 0)
    });
}
