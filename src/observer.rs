//! Debug hooks the CPU fires while it runs.
//!
//! Every hook is a fire-and-forget notification with a default no-op body,
//! so an observer only implements the events it cares about. Hooks execute
//! synchronously on the CPU's thread of control.
//!
//! An observer that wants to end [`CPU::run`](crate::CPU::run) captures a
//! [`StopHandle`](crate::StopHandle) before it is installed:
//!
//! ```
//! use emu6502::{CpuObserver, FlatMemory, MemoryBus, Registers, StopHandle, CPU};
//!
//! struct StopAt {
//!     target: u16,
//!     stop: StopHandle,
//! }
//!
//! impl CpuObserver for StopAt {
//!     fn on_instruction_executed(&mut self, registers: &Registers) {
//!         if registers.pc == self.target {
//!             self.stop.stop();
//!         }
//!     }
//! }
//!
//! let mut memory = FlatMemory::new();
//! memory.write(0xFFFC, 0x00);
//! memory.write(0xFFFD, 0x80);
//! memory.load(0x8000, &[0xEA, 0xEA, 0xEA, 0x4C, 0x00, 0x80]); // NOP x3; JMP $8000
//!
//! let mut cpu = CPU::new(memory);
//! let stop = cpu.stop_handle();
//! cpu.set_observer(Box::new(StopAt { target: 0x8003, stop }));
//! cpu.run();
//! assert_eq!(cpu.pc(), 0x8003);
//! ```

use crate::cpu::Registers;

/// Receiver for CPU debug notifications.
pub trait CpuObserver {
    /// An instruction finished; `registers` is the state after it.
    fn on_instruction_executed(&mut self, _registers: &Registers) {}

    /// Reserved for breakpoint support; no instruction fires it today.
    fn on_breakpoint(&mut self) {}

    /// An opcode without a handler was fetched and the CPU halted.
    fn on_illegal_opcode(&mut self, _opcode: u8, _address: u16) {}

    /// `reset()` completed.
    fn on_reset(&mut self) {}

    /// NMI entry sequence is about to run.
    fn on_nmi(&mut self) {}

    /// IRQ entry sequence is about to run (only fired when not masked).
    fn on_irq(&mut self) {}

    /// A byte was pushed onto the stack.
    fn on_stack_push(&mut self, _byte: u8) {}

    /// A byte is about to be popped from the stack.
    fn on_stack_pop(&mut self) {}
}
