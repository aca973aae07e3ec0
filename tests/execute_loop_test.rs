//! Execution loop tests
//!
//! Verifies fetch-decode-execute, cycle and instruction counting, the
//! illegal-opcode halt, `run`/`stop` and observer notifications.

use std::cell::RefCell;
use std::rc::Rc;

use emu6502::{CpuObserver, FlatMemory, MemoryBus, Registers, StopHandle, CPU};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.load(0x8000, program);
    CPU::new(memory)
}

#[test]
fn test_step_counts_cycles_and_instructions() {
    let mut cpu = setup_cpu(&[0xEA, 0xA9, 0x01, 0x85, 0x10]); // NOP; LDA #1; STA $10

    assert_eq!(cpu.step(3), 3);

    assert_eq!(cpu.cycles(), 2 + 2 + 3);
    assert_eq!(cpu.instructions(), 3);
    assert_eq!(cpu.pc(), 0x8005);
}

#[test]
fn test_step_zero_does_nothing() {
    let mut cpu = setup_cpu(&[0xEA]);

    assert_eq!(cpu.step(0), 0);
    assert_eq!(cpu.pc(), 0x8000);
    assert_eq!(cpu.cycles(), 0);
}

#[test]
fn test_illegal_opcode_halts() {
    let mut cpu = setup_cpu(&[0xEA, 0xFF, 0xEA]);

    assert_eq!(cpu.step(10), 2);
    assert!(cpu.is_illegal_opcode_set());
    // PC sits just past the offending byte
    assert_eq!(cpu.pc(), 0x8002);
    // The illegal opcode costs no cycles
    assert_eq!(cpu.cycles(), 2);

    assert_eq!(cpu.step(10), 0);
    cpu.run();
    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn test_reset_clears_illegal_latch() {
    let mut cpu = setup_cpu(&[0x02]);

    cpu.step(1);
    assert!(cpu.is_illegal_opcode_set());

    cpu.reset();
    assert!(!cpu.is_illegal_opcode_set());
    assert_eq!(cpu.pc(), 0x8000);
    assert_eq!(cpu.instructions(), 0);
}

#[test]
fn test_reset_clears_registers_keeps_flags() {
    let mut cpu = setup_cpu(&[]);
    cpu.set_a(1);
    cpu.set_x(2);
    cpu.set_y(3);
    cpu.set_sp(0x10);
    cpu.set_flag_d(true);
    cpu.set_flag_c(true);

    cpu.reset();

    assert_eq!(cpu.a(), 0);
    assert_eq!(cpu.x(), 0);
    assert_eq!(cpu.y(), 0);
    assert_eq!(cpu.sp(), 0xFD);
    assert!(cpu.flag_d());
    assert!(cpu.flag_c());
}

/// Stops the run loop once a given PC is reached.
struct StopAt {
    target: u16,
    stop: StopHandle,
    seen: Rc<RefCell<Vec<u16>>>,
}

impl CpuObserver for StopAt {
    fn on_instruction_executed(&mut self, registers: &Registers) {
        self.seen.borrow_mut().push(registers.pc);
        if registers.pc == self.target {
            self.stop.stop();
        }
    }
}

#[test]
fn test_observer_stops_run() {
    // INX; JMP $8000 forever
    let mut cpu = setup_cpu(&[0xE8, 0x4C, 0x00, 0x80]);
    let seen = Rc::new(RefCell::new(Vec::new()));
    cpu.set_observer(Box::new(StopAt {
        target: 0x8000,
        stop: cpu.stop_handle(),
        seen: Rc::clone(&seen),
    }));

    cpu.run();

    // Stops after the JMP back to $8000
    assert_eq!(cpu.x(), 1);
    assert_eq!(cpu.instructions(), 2);
    assert_eq!(*seen.borrow(), vec![0x8001, 0x8000]);

    // A second run starts again
    cpu.run();
    assert_eq!(cpu.x(), 2);
}

#[test]
fn test_take_observer() {
    let mut cpu = setup_cpu(&[0xEA]);
    assert!(cpu.take_observer().is_none());

    let seen = Rc::new(RefCell::new(Vec::new()));
    cpu.set_observer(Box::new(StopAt {
        target: 0xFFFF,
        stop: cpu.stop_handle(),
        seen: Rc::clone(&seen),
    }));
    assert!(cpu.take_observer().is_some());

    cpu.step(1);
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_registers_snapshot() {
    let mut cpu = setup_cpu(&[0xA2, 0x05, 0xA0, 0x06]);
    cpu.step(2);

    let registers = cpu.registers();
    assert_eq!(registers.x, 0x05);
    assert_eq!(registers.y, 0x06);
    assert_eq!(registers.pc, 0x8004);
    assert_eq!(registers.sp, 0xFD);
    assert_eq!(registers.p, cpu.status());
}
