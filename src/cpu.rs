//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 6502 processor state and
//! the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status flags**: N, V, B, D, I, Z, C (individual bool fields)
//! - **Counters**: executed instructions and documented base cycles
//! - **Illegal opcode latch**: set when an undocumented opcode is fetched
//!
//! ## Execution Model
//!
//! - `step(n)`: Execute up to `n` instructions
//! - `run()`: Execute until stopped through a [`StopHandle`]
//! - `trigger_irq()` / `trigger_nmi()`: Interrupt entry
//!
//! Once the illegal opcode latch is set, `step` and `run` make no progress
//! until `reset()` clears it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, trace, warn};

use crate::instructions;
use crate::observer::CpuObserver;
use crate::opcodes::InstructionTable;
use crate::status;
use crate::MemoryBus;

/// NMI vector (low byte; high byte follows).
pub const NMI_VECTOR: u16 = 0xFFFA;
/// Reset vector (low byte; high byte follows).
pub const RESET_VECTOR: u16 = 0xFFFC;
/// IRQ/BRK vector (low byte; high byte follows).
pub const IRQ_VECTOR: u16 = 0xFFFE;

const STACK_PAGE: u16 = 0x0100;

/// Snapshot of the register file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    /// Packed status byte, bit 5 always set.
    pub p: u8,
}

/// Cloneable handle that ends a [`CPU::run`] loop.
///
/// The flag is checked once per instruction, so a stop requested from an
/// observer callback or from another thread takes effect after the current
/// instruction completes.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    running: Arc<AtomicBool>,
}

impl StopHandle {
    /// Requests the running loop to return.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Returns true while a `run()` loop is active and not asked to stop.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn start(&self) {
        self.running.store(true, Ordering::SeqCst);
    }
}

/// 6502 CPU state and execution context.
///
/// Generic over the memory implementation via the `MemoryBus` trait.
///
/// # Examples
///
/// ```
/// use emu6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
/// memory.load(0x8000, &[0xA9, 0x42]); // LDA #$42
///
/// let mut cpu = CPU::new(memory);
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFD);
///
/// cpu.step(1);
/// assert_eq!(cpu.a(), 0x42);
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    /// Negative flag (set if bit 7 of result is 1)
    pub(crate) flag_n: bool,

    /// Overflow flag (set on signed overflow)
    pub(crate) flag_v: bool,

    /// Break flag (only changes through PLP/RTI or interrupt entry)
    pub(crate) flag_b: bool,

    /// Decimal mode flag (enables BCD arithmetic)
    pub(crate) flag_d: bool,

    /// Interrupt disable flag (blocks IRQ when set)
    pub(crate) flag_i: bool,

    /// Zero flag (set if result is zero)
    pub(crate) flag_z: bool,

    /// Carry flag (set on unsigned overflow, clear on borrow)
    pub(crate) flag_c: bool,

    /// Total documented base cycles executed
    pub(crate) cycles: u64,

    /// Instructions executed since the last reset
    pub(crate) instructions: u64,

    /// Latched when an undocumented opcode is fetched
    pub(crate) illegal_opcode: bool,

    /// Memory bus implementation
    pub(crate) memory: M,

    table: &'static InstructionTable,
    observer: Option<Box<dyn CpuObserver>>,
    stop: StopHandle,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU on the given memory bus and performs `reset()`.
    pub fn new(memory: M) -> Self {
        let mut cpu = Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            pc: 0x0000,
            sp: 0xFD,
            flag_n: false,
            flag_v: false,
            flag_b: false,
            flag_d: false,
            flag_i: false,
            flag_z: false,
            flag_c: false,
            cycles: 0,
            instructions: 0,
            illegal_opcode: false,
            memory,
            table: InstructionTable::get(),
            observer: None,
            stop: StopHandle::default(),
        };
        cpu.reset();
        cpu
    }

    /// Installs a debug observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: Box<dyn CpuObserver>) {
        self.observer = Some(observer);
    }

    /// Removes and returns the installed observer.
    pub fn take_observer(&mut self) -> Option<Box<dyn CpuObserver>> {
        self.observer.take()
    }

    /// Handle that ends a `run()` loop from an observer or another thread.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Resets the processor.
    ///
    /// - A, X, Y are cleared
    /// - SP is set to 0xFD
    /// - PC is loaded from the reset vector at 0xFFFC/0xFFFD (little-endian)
    /// - the illegal opcode latch and instruction counter are cleared
    /// - any IRQ request pending on the bus is discarded
    ///
    /// The remaining status flags keep their values.
    pub fn reset(&mut self) {
        self.a = 0x00;
        self.x = 0x00;
        self.y = 0x00;
        self.pc = self.read_vector(RESET_VECTOR);
        self.sp = 0xFD;
        self.instructions = 0;
        self.illegal_opcode = false;

        // A request raised before reset is dropped, not serviced afterwards
        self.memory.take_irq();

        debug!("cpu reset, pc=${:04X}", self.pc);
        self.notify(|o| o.on_reset());
    }

    /// Executes instructions until `n` more have run or the illegal opcode
    /// latch is set. Returns how many instructions were executed.
    ///
    /// Each instruction is fetched at PC, decoded through the instruction
    /// table, its effective address resolved, and then executed. After every
    /// instruction the observer is notified and the bus is polled for a
    /// pending IRQ.
    pub fn step(&mut self, n: u32) -> u32 {
        let mut executed = 0;

        while executed < n && !self.illegal_opcode {
            let address = self.pc;
            let opcode = self.fetch_byte();
            let instruction = self.table.decode(opcode);

            trace!("${:04X}: {:02X} {}", address, opcode, instruction.mnemonic);

            if instruction.is_legal() {
                let effective = self.effective_address(instruction.addressing_mode);
                instructions::execute(self, instruction, effective);
                self.cycles += instruction.base_cycles as u64;
            } else {
                self.illegal_opcode = true;
                warn!("illegal opcode ${:02X} at ${:04X}", opcode, address);
                self.notify(|o| o.on_illegal_opcode(opcode, address));
            }

            self.instructions += 1;
            executed += 1;

            let registers = self.registers();
            self.notify(|o| o.on_instruction_executed(&registers));

            if self.memory.take_irq() {
                self.trigger_irq();
            }
        }

        executed
    }

    /// Runs until [`stop`](Self::stop) is called (from an observer holding a
    /// [`StopHandle`] or from another thread) or an illegal opcode halts the
    /// processor.
    pub fn run(&mut self) {
        self.stop.start();

        while self.stop.is_running() && !self.illegal_opcode {
            self.step(1);
        }

        self.stop.stop();
    }

    /// Ends a `run()` loop after the current instruction.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// Requests a maskable interrupt. Ignored while the I flag is set.
    pub fn trigger_irq(&mut self) {
        if self.flag_i {
            return;
        }

        debug!("irq at pc=${:04X}", self.pc);
        self.notify(|o| o.on_irq());
        self.interrupt(IRQ_VECTOR);
    }

    /// Requests a non-maskable interrupt. Always taken.
    pub fn trigger_nmi(&mut self) {
        debug!("nmi at pc=${:04X}", self.pc);
        self.notify(|o| o.on_nmi());
        self.interrupt(NMI_VECTOR);
    }

    /// Returns true once an undocumented opcode has halted the processor.
    pub fn is_illegal_opcode_set(&self) -> bool {
        self.illegal_opcode
    }

    /// Hardware interrupt entry: push PC and status (B clear), set I, jump
    /// through `vector`.
    fn interrupt(&mut self, vector: u16) {
        self.flag_b = false;
        self.push_word(self.pc);
        self.stack_push(self.status());
        self.flag_i = true;
        self.pc = self.read_vector(vector);
    }

    pub(crate) fn read_vector(&mut self, vector: u16) -> u16 {
        let lo = self.memory.read(vector) as u16;
        let hi = self.memory.read(vector.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Pushes a byte at 0x0100 + SP and decrements SP (wrapping 0x00 to 0xFF).
    pub(crate) fn stack_push(&mut self, value: u8) {
        self.memory.write(STACK_PAGE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
        self.notify(|o| o.on_stack_push(value));
    }

    /// Increments SP (wrapping 0xFF to 0x00) and reads the byte there.
    pub(crate) fn stack_pop(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.notify(|o| o.on_stack_pop());
        self.memory.read(STACK_PAGE | self.sp as u16)
    }

    /// Pushes high byte then low byte.
    pub(crate) fn push_word(&mut self, value: u16) {
        self.stack_push((value >> 8) as u8);
        self.stack_push(value as u8);
    }

    /// Pops low byte then high byte.
    pub(crate) fn pop_word(&mut self) -> u16 {
        let lo = self.stack_pop() as u16;
        let hi = self.stack_pop() as u16;
        (hi << 8) | lo
    }

    /// Sets Z and N from a result byte.
    #[inline]
    pub(crate) fn set_zn(&mut self, value: u8) {
        self.flag_z = value == 0;
        self.flag_n = value & 0x80 != 0;
    }

    fn notify(&mut self, event: impl FnOnce(&mut dyn CpuObserver)) {
        if let Some(observer) = self.observer.as_deref_mut() {
            event(observer);
        }
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register as a packed byte (NV-BDIZC, bit 5 always 1).
    pub fn status(&self) -> u8 {
        let mut p = status::CONSTANT;

        if self.flag_n {
            p |= status::NEGATIVE;
        }
        if self.flag_v {
            p |= status::OVERFLOW;
        }
        if self.flag_b {
            p |= status::BREAK;
        }
        if self.flag_d {
            p |= status::DECIMAL;
        }
        if self.flag_i {
            p |= status::INTERRUPT;
        }
        if self.flag_z {
            p |= status::ZERO;
        }
        if self.flag_c {
            p |= status::CARRY;
        }

        p
    }

    /// Snapshot of all registers.
    pub fn registers(&self) -> Registers {
        Registers {
            a: self.a,
            x: self.x,
            y: self.y,
            sp: self.sp,
            pc: self.pc,
            p: self.status(),
        }
    }

    /// Documented base cycles executed since construction.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Instructions executed since the last reset.
    pub fn instructions(&self) -> u64 {
        self.instructions
    }

    /// Returns a reference to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flag_n
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flag_v
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.flag_b
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flag_d
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.flag_i
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flag_c
    }

    // ========== Setters ==========

    /// Sets the accumulator.
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Sets the X index register.
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Sets the Y index register.
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Sets the program counter.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Sets the stack pointer (offset into page 0x01).
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Unpacks a status byte into the individual flags. Bit 5 is ignored; it
    /// always reads back as 1.
    pub fn set_status(&mut self, value: u8) {
        self.flag_n = value & status::NEGATIVE != 0;
        self.flag_v = value & status::OVERFLOW != 0;
        self.flag_b = value & status::BREAK != 0;
        self.flag_d = value & status::DECIMAL != 0;
        self.flag_i = value & status::INTERRUPT != 0;
        self.flag_z = value & status::ZERO != 0;
        self.flag_c = value & status::CARRY != 0;
    }

    /// Sets the Negative flag.
    pub fn set_flag_n(&mut self, value: bool) {
        self.flag_n = value;
    }

    /// Sets the Overflow flag.
    pub fn set_flag_v(&mut self, value: bool) {
        self.flag_v = value;
    }

    /// Sets the Decimal mode flag.
    pub fn set_flag_d(&mut self, value: bool) {
        self.flag_d = value;
    }

    /// Sets the Interrupt disable flag.
    pub fn set_flag_i(&mut self, value: bool) {
        self.flag_i = value;
    }

    /// Sets the Zero flag.
    pub fn set_flag_z(&mut self, value: bool) {
        self.flag_z = value;
    }

    /// Sets the Carry flag.
    pub fn set_flag_c(&mut self, value: bool) {
        self.flag_c = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn setup_cpu() -> CPU<FlatMemory> {
        let mut mem = FlatMemory::new();
        mem.write(0xFFFC, 0x00);
        mem.write(0xFFFD, 0x80);
        CPU::new(mem)
    }

    #[derive(Default)]
    struct Recorder {
        events: Rc<RefCell<Vec<String>>>,
    }

    impl CpuObserver for Recorder {
        fn on_instruction_executed(&mut self, registers: &Registers) {
            self.events
                .borrow_mut()
                .push(format!("exec {:04X}", registers.pc));
        }

        fn on_illegal_opcode(&mut self, opcode: u8, address: u16) {
            self.events
                .borrow_mut()
                .push(format!("illegal {:02X}@{:04X}", opcode, address));
        }

        fn on_reset(&mut self) {
            self.events.borrow_mut().push("reset".into());
        }

        fn on_nmi(&mut self) {
            self.events.borrow_mut().push("nmi".into());
        }

        fn on_irq(&mut self) {
            self.events.borrow_mut().push("irq".into());
        }

        fn on_stack_push(&mut self, byte: u8) {
            self.events.borrow_mut().push(format!("push {:02X}", byte));
        }

        fn on_stack_pop(&mut self) {
            self.events.borrow_mut().push("pop".into());
        }
    }

    #[test]
    fn test_cpu_initialization() {
        let cpu = setup_cpu();

        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.sp(), 0xFD);
        assert_eq!(cpu.a(), 0x00);
        assert_eq!(cpu.x(), 0x00);
        assert_eq!(cpu.y(), 0x00);
        assert_eq!(cpu.cycles(), 0);
        assert!(!cpu.is_illegal_opcode_set());
        assert_eq!(cpu.status() & status::CONSTANT, status::CONSTANT);
    }

    #[test]
    fn test_status_packing_round_trip() {
        let mut cpu = setup_cpu();
        cpu.set_status(0b1101_1011);
        assert_eq!(cpu.status(), 0b1111_1011);

        cpu.set_status(0x00);
        assert_eq!(cpu.status(), status::CONSTANT);
    }

    #[test]
    fn test_stack_push_pop_wraps() {
        let mut cpu = setup_cpu();
        cpu.set_sp(0x00);
        cpu.stack_push(0xAB);
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.memory_mut().read(0x0100), 0xAB);

        assert_eq!(cpu.stack_pop(), 0xAB);
        assert_eq!(cpu.sp(), 0x00);
    }

    #[test]
    fn test_step_counts_instructions() {
        let mut cpu = setup_cpu();
        cpu.memory_mut().load(0x8000, &[0xEA, 0xEA, 0xEA]);

        assert_eq!(cpu.step(2), 2);
        assert_eq!(cpu.pc(), 0x8002);
        assert_eq!(cpu.instructions(), 2);
        assert_eq!(cpu.cycles(), 4);
    }

    #[test]
    fn test_illegal_opcode_halts() {
        let mut cpu = setup_cpu();
        cpu.memory_mut().load(0x8000, &[0xEA, 0x02, 0xEA]);

        assert_eq!(cpu.step(5), 2);
        assert!(cpu.is_illegal_opcode_set());
        let pc = cpu.pc();

        assert_eq!(cpu.step(3), 0);
        assert_eq!(cpu.pc(), pc);

        cpu.run();
        assert_eq!(cpu.pc(), pc);

        cpu.reset();
        assert!(!cpu.is_illegal_opcode_set());
        assert_eq!(cpu.pc(), 0x8000);
    }

    #[test]
    fn test_reset_preserves_flags_and_forces_constant() {
        let mut cpu = setup_cpu();
        cpu.set_a(0x12);
        cpu.set_x(0x34);
        cpu.set_y(0x56);
        cpu.set_sp(0x10);
        cpu.set_flag_c(true);

        cpu.reset();

        assert_eq!((cpu.a(), cpu.x(), cpu.y(), cpu.sp()), (0, 0, 0, 0xFD));
        assert!(cpu.flag_c());
        assert_eq!(cpu.status() & status::CONSTANT, status::CONSTANT);
    }

    #[test]
    fn test_irq_masked_by_interrupt_flag() {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0xFFFE, 0x00);
        cpu.memory_mut().write(0xFFFF, 0x90);
        cpu.set_flag_i(true);

        cpu.trigger_irq();
        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.sp(), 0xFD);

        cpu.set_flag_i(false);
        cpu.trigger_irq();
        assert_eq!(cpu.pc(), 0x9000);
        assert_eq!(cpu.sp(), 0xFA);
        assert!(cpu.flag_i());
        assert_eq!(cpu.memory_mut().read(0x01FD), 0x80);
        assert_eq!(cpu.memory_mut().read(0x01FC), 0x00);
        assert_eq!(cpu.memory_mut().read(0x01FB) & status::BREAK, 0);
    }

    #[test]
    fn test_nmi_ignores_interrupt_flag() {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0xFFFA, 0x34);
        cpu.memory_mut().write(0xFFFB, 0x12);
        cpu.set_flag_i(true);

        cpu.trigger_nmi();
        assert_eq!(cpu.pc(), 0x1234);
        assert_eq!(cpu.sp(), 0xFA);
    }

    #[test]
    fn test_observer_sees_events_in_order() {
        let mut cpu = setup_cpu();
        let events = Rc::new(RefCell::new(Vec::new()));
        cpu.set_observer(Box::new(Recorder {
            events: Rc::clone(&events),
        }));
        cpu.memory_mut().load(0x8000, &[0x48, 0x68, 0xFF]); // PHA; PLA; illegal

        cpu.reset();
        cpu.step(3);
        cpu.trigger_nmi();

        assert_eq!(
            *events.borrow(),
            vec![
                "reset",
                "push 00",
                "exec 8001",
                "pop",
                "exec 8002",
                "illegal FF@8002",
                "exec 8003",
                "nmi",
                "push 80",
                "push 03",
                "push 22",
            ]
        );
    }

    #[test]
    fn test_stop_handle_from_another_thread() {
        let handle = StopHandle::default();
        handle.start();
        let remote = handle.clone();
        std::thread::spawn(move || remote.stop())
            .join()
            .expect("stop thread panicked");
        assert!(!handle.is_running());
    }
}
