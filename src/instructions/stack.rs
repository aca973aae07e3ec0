//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PHA / PLA: push and pull the accumulator
//! - PHP / PLP: push and pull the status register
//!
//! The 6502 stack is located at memory addresses 0x0100-0x01FF and grows downward.
//! The stack pointer (SP) is an 8-bit register that serves as an offset into this
//! page. The full stack address is calculated as 0x0100 | SP.

use crate::status;
use crate::{MemoryBus, CPU};

/// Executes the PHA (Push Accumulator) instruction.
///
/// # Examples
///
/// ```
/// use emu6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
/// memory.write(0x8000, 0x48); // PHA
///
/// let mut cpu = CPU::new(memory);
/// cpu.set_a(0x42);
///
/// cpu.step(1);
///
/// assert_eq!(cpu.memory_mut().read(0x01FD), 0x42);
/// assert_eq!(cpu.sp(), 0xFC);
/// assert_eq!(cpu.pc(), 0x8001);
/// assert_eq!(cpu.cycles(), 3);
/// ```
pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.stack_push(cpu.a);
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// The pushed copy always has the B bit set; the live flag is unchanged.
pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.stack_push(cpu.status() | status::BREAK);
}

/// Executes the PLA (Pull Accumulator) instruction. Sets N and Z.
pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.a = cpu.stack_pop();
    cpu.set_zn(cpu.a);
}

/// Executes the PLP (Pull Processor Status) instruction.
///
/// Bit 5 is forced back on.
pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut CPU<M>) {
    let value = cpu.stack_pop();
    cpu.set_status(value | status::CONSTANT);
}
