//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC, SBC: binary and decimal (BCD) add/subtract with carry
//! - AND, ORA, EOR: bitwise logic into the accumulator
//! - CMP, CPX, CPY: register comparisons
//! - BIT: bit test
//!
//! In decimal mode N, V and Z come from the binary intermediate result; the
//! carry is recomputed after the BCD adjustment. Real NMOS parts behave the
//! same way, so programs relying on it keep working.

use crate::{MemoryBus, CPU};

/// Executes the ADC (Add with Carry) instruction.
///
/// Adds the operand plus the carry flag to the accumulator.
///
/// Flags affected: N, V, Z, C
pub(crate) fn execute_adc<M: MemoryBus>(cpu: &mut CPU<M>, addr: u16) {
    let value = cpu.memory.read(addr) as u16;
    let a = cpu.a as u16;
    let carry_in = cpu.flag_c as u16;

    let mut result = a + value + carry_in;

    // Zero flag is taken from the binary sum even in decimal mode
    cpu.flag_z = result & 0xFF == 0;

    if cpu.flag_d {
        if (a & 0x0F) + (value & 0x0F) + carry_in > 9 {
            result += 0x06;
        }
        cpu.flag_n = result & 0x80 != 0;
        cpu.flag_v = (a ^ value) & 0x80 == 0 && (a ^ result) & 0x80 != 0;
        if result > 0x99 {
            result += 0x60;
        }
        cpu.flag_c = result > 0x99;
    } else {
        cpu.flag_n = result & 0x80 != 0;
        cpu.flag_v = (a ^ value) & 0x80 == 0 && (a ^ result) & 0x80 != 0;
        cpu.flag_c = result > 0xFF;
    }

    cpu.a = result as u8;
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// Subtracts the operand and the inverted carry (borrow) from the
/// accumulator. Carry is set when no borrow occurred.
///
/// Flags affected: N, V, Z, C
pub(crate) fn execute_sbc<M: MemoryBus>(cpu: &mut CPU<M>, addr: u16) {
    let value = cpu.memory.read(addr) as u32;
    let a = cpu.a as u32;
    let borrow = if cpu.flag_c { 0 } else { 1 };

    // 32-bit wrapping keeps "negative" results above 0xFF for the carry test
    let mut result = a.wrapping_sub(value).wrapping_sub(borrow);

    cpu.flag_n = result & 0x80 != 0;
    cpu.flag_z = result & 0xFF == 0;
    cpu.flag_v = (a ^ result) & 0x80 != 0 && (a ^ value) & 0x80 != 0;

    if cpu.flag_d {
        if ((a & 0x0F) as i32 - borrow as i32) < (value & 0x0F) as i32 {
            result = result.wrapping_sub(0x06);
        }
        if result > 0x99 {
            result = result.wrapping_sub(0x60);
        }
    }

    cpu.flag_c = result < 0x100;
    cpu.a = result as u8;
}

/// Executes the AND (Logical AND) instruction.
///
/// Flags affected: N, Z
pub(crate) fn execute_and<M: MemoryBus>(cpu: &mut CPU<M>, addr: u16) {
    let result = cpu.a & cpu.memory.read(addr);
    cpu.set_zn(result);
    cpu.a = result;
}

/// Executes the ORA (Logical Inclusive OR) instruction.
///
/// Flags affected: N, Z
pub(crate) fn execute_ora<M: MemoryBus>(cpu: &mut CPU<M>, addr: u16) {
    let result = cpu.a | cpu.memory.read(addr);
    cpu.set_zn(result);
    cpu.a = result;
}

/// Executes the EOR (Exclusive OR) instruction.
///
/// Flags affected: N, Z
pub(crate) fn execute_eor<M: MemoryBus>(cpu: &mut CPU<M>, addr: u16) {
    let result = cpu.a ^ cpu.memory.read(addr);
    cpu.set_zn(result);
    cpu.a = result;
}

/// Shared body of CMP, CPX and CPY.
///
/// C is set when `register >= operand`, Z when they are equal, and N from
/// bit 7 of the 8-bit difference.
fn compare<M: MemoryBus>(cpu: &mut CPU<M>, register: u8, addr: u16) {
    let value = cpu.memory.read(addr);
    let result = register.wrapping_sub(value);

    cpu.flag_c = register >= value;
    cpu.set_zn(result);
}

/// Executes the CMP (Compare Accumulator) instruction.
pub(crate) fn execute_cmp<M: MemoryBus>(cpu: &mut CPU<M>, addr: u16) {
    let register = cpu.a;
    compare(cpu, register, addr);
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn execute_cpx<M: MemoryBus>(cpu: &mut CPU<M>, addr: u16) {
    let register = cpu.x;
    compare(cpu, register, addr);
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn execute_cpy<M: MemoryBus>(cpu: &mut CPU<M>, addr: u16) {
    let register = cpu.y;
    compare(cpu, register, addr);
}

/// Executes the BIT (Bit Test) instruction.
///
/// N and V are copied from bits 7 and 6 of the operand; Z is set when
/// `A & operand` is zero. The accumulator is not modified.
pub(crate) fn execute_bit<M: MemoryBus>(cpu: &mut CPU<M>, addr: u16) {
    let value = cpu.memory.read(addr);

    cpu.flag_n = value & 0x80 != 0;
    cpu.flag_v = value & 0x40 != 0;
    cpu.flag_z = cpu.a & value == 0;
}
