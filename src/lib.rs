//! # 6502 Computer Emulator Core
//!
//! An NMOS 6502 CPU, a shared device bus, and the peripheral chips of a small
//! 6502 computer: RAM, ROM, a 6551 ACIA serial UART and a 6522 VIA.
//!
//! ## Quick Start
//!
//! ```rust
//! use emu6502::{CPU, FlatMemory, MemoryBus};
//!
//! // Create 64KB flat memory
//! let mut memory = FlatMemory::new();
//!
//! // Set reset vector to point to program start at 0x8000
//! memory.write(0xFFFC, 0x00); // Low byte
//! memory.write(0xFFFD, 0x80); // High byte
//! memory.load(0x8000, &[0xA9, 0x42, 0x8D, 0x00, 0x20]); // LDA #$42; STA $2000
//!
//! // Initialize CPU - it will load PC from the reset vector
//! let mut cpu = CPU::new(memory);
//! assert_eq!(cpu.pc(), 0x8000);
//! assert_eq!(cpu.sp(), 0xFD);
//!
//! assert_eq!(cpu.step(2), 2);
//! assert_eq!(cpu.memory_mut().read(0x2000), 0x42);
//! ```
//!
//! ## Architecture
//!
//! - The CPU talks to memory only through the [`MemoryBus`] trait
//! - Opcodes are decoded through a 256-entry [`InstructionTable`] built once
//!   from the declarative [`OPCODES`] list; every entry pairs an
//!   [`AddressingMode`] with a [`Mnemonic`]
//! - A [`Bus`] arbitrates between [`BusDevice`]s: the first device claiming
//!   an address answers a read, every device sees every write
//! - Devices raise interrupts through an [`IrqLine`]; the CPU polls it after
//!   each instruction
//! - Undocumented opcodes latch the CPU into a halted state instead of
//!   returning errors
//! - Debuggers attach a [`CpuObserver`]
//!
//! ## Modules
//!
//! - `cpu` - CPU state and execution logic
//! - `memory` - MemoryBus trait and FlatMemory
//! - `opcodes` - Opcode table
//! - `addressing` - Addressing modes and effective-address resolution
//! - `devices` - Bus, RAM, ROM, ACIA and VIA
//! - `config` / `computer` - building a machine from device descriptors

pub mod addressing;
pub mod computer;
pub mod config;
pub mod cpu;
pub mod devices;
pub mod error;
pub mod memory;
pub mod observer;
pub mod opcodes;
pub mod status;

// Internal instruction implementations (not part of public API)
mod instructions;

// WebAssembly bindings (optional)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::AddressingMode;
pub use computer::Computer;
pub use cpu::{Registers, StopHandle, CPU};
pub use devices::{
    Acia6551, AciaSettings, Bus, BusDevice, ClockSource, DeviceHandle, IrqLine, MemoryBlock,
    RamDevice, RecvError, RomDevice, StopBits, Via6522, ViaRegister, ViaSettings,
};
pub use error::{ConfigError, LoadError};
pub use memory::{FlatMemory, MemoryBus};
pub use observer::CpuObserver;
pub use opcodes::{Instruction, InstructionTable, Mnemonic, OPCODES};
