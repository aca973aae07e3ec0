//! # Memory Bus Abstraction
//!
//! The CPU never touches devices directly. Every access goes through the
//! `MemoryBus` trait, which is implemented by:
//!
//! - [`Bus`](crate::Bus): ordered device registry used by real machines
//! - [`FlatMemory`]: 64KB of plain RAM, handy for tests and experiments
//!
//! ## Design Principles
//!
//! The trait follows 6502 hardware behavior:
//! - No bus errors - reads/writes always succeed
//! - Reads take `&mut self` because peripheral reads have side effects
//!   (the ACIA clears status bits when its data register is read)
//! - Interrupt requests travel the other way through `take_irq`

/// Memory bus trait for CPU to read/write bytes.
///
/// # Examples
///
/// ```
/// use emu6502::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use emu6502::MemoryBus;
///
/// struct RomRamMemory {
///     ram: [u8; 0x8000],
///     rom: [u8; 0x8000],
/// }
///
/// impl MemoryBus for RomRamMemory {
///     fn read(&mut self, addr: u16) -> u8 {
///         if addr < 0x8000 {
///             self.ram[addr as usize]
///         } else {
///             self.rom[(addr - 0x8000) as usize]
///         }
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         if addr < 0x8000 {
///             self.ram[addr as usize] = value;
///         }
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    ///
    /// Must never panic. Unmapped addresses read as whatever the
    /// implementation considers open bus.
    fn read(&mut self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    ///
    /// Must never panic. Read-only or unmapped targets drop the write.
    fn write(&mut self, addr: u16, value: u8);

    /// Returns `true` once for every IRQ assertion made by an attached device
    /// since the last call.
    ///
    /// The CPU polls this after each instruction and, if it returns `true`,
    /// runs its IRQ entry sequence (which is itself masked by the I flag).
    ///
    /// # Default Implementation
    ///
    /// Returns `false` for memories without interrupt-capable devices.
    fn take_irq(&mut self) -> bool {
        false
    }
}

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses are writable RAM initialized to 0x00.
///
/// # Examples
///
/// ```
/// use emu6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
///
/// let cpu = CPU::new(memory);
/// assert_eq!(cpu.pc(), 0x8000);
/// ```
pub struct FlatMemory {
    data: Box<[u8; 65536]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 65536]),
        }
    }

    /// Copies `bytes` into memory starting at `addr`, wrapping at 0xFFFF.
    pub fn load(&mut self, addr: u16, bytes: &[u8]) {
        for (i, &byte) in bytes.iter().enumerate() {
            self.data[addr.wrapping_add(i as u16) as usize] = byte;
        }
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&mut self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}
