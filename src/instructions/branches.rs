//! # Branch Instructions
//!
//! Conditional branches on a single status flag. The relative target has
//! already been resolved by the addressing stage; a taken branch simply
//! loads it into PC. No taken/page-cross cycle penalties are charged.

use crate::{MemoryBus, CPU};

#[inline]
fn branch_if<M: MemoryBus>(cpu: &mut CPU<M>, condition: bool, target: u16) {
    if condition {
        cpu.pc = target;
    }
}

/// BCC: branch if carry clear.
pub(crate) fn execute_bcc<M: MemoryBus>(cpu: &mut CPU<M>, target: u16) {
    let taken = !cpu.flag_c;
    branch_if(cpu, taken, target);
}

/// BCS: branch if carry set.
pub(crate) fn execute_bcs<M: MemoryBus>(cpu: &mut CPU<M>, target: u16) {
    let taken = cpu.flag_c;
    branch_if(cpu, taken, target);
}

/// BEQ: branch if zero set.
pub(crate) fn execute_beq<M: MemoryBus>(cpu: &mut CPU<M>, target: u16) {
    let taken = cpu.flag_z;
    branch_if(cpu, taken, target);
}

/// BNE: branch if zero clear.
pub(crate) fn execute_bne<M: MemoryBus>(cpu: &mut CPU<M>, target: u16) {
    let taken = !cpu.flag_z;
    branch_if(cpu, taken, target);
}

/// BMI: branch if negative set.
pub(crate) fn execute_bmi<M: MemoryBus>(cpu: &mut CPU<M>, target: u16) {
    let taken = cpu.flag_n;
    branch_if(cpu, taken, target);
}

/// BPL: branch if negative clear.
pub(crate) fn execute_bpl<M: MemoryBus>(cpu: &mut CPU<M>, target: u16) {
    let taken = !cpu.flag_n;
    branch_if(cpu, taken, target);
}

/// BVC: branch if overflow clear.
pub(crate) fn execute_bvc<M: MemoryBus>(cpu: &mut CPU<M>, target: u16) {
    let taken = !cpu.flag_v;
    branch_if(cpu, taken, target);
}

/// BVS: branch if overflow set.
pub(crate) fn execute_bvs<M: MemoryBus>(cpu: &mut CPU<M>, target: u16) {
    let taken = cpu.flag_v;
    branch_if(cpu, taken, target);
}
