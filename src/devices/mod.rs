//! Memory-mapped device support for the 6502 emulator.
//!
//! A machine is a [`Bus`] holding an ordered list of devices (RAM, ROM, the
//! 6551 ACIA, the 6522 VIA, or anything else implementing [`BusDevice`]).
//! The CPU sees the bus only through the [`MemoryBus`] trait.
//!
//! # Arbitration
//!
//! - **Reads** ask each device in registration order; the first one that
//!   claims the address supplies the byte. Nobody claiming it reads as 0.
//! - **Writes** are offered to every device. Each device decides for itself
//!   whether the address falls inside its window, so several devices can
//!   observe the same write.
//!
//! Devices receive absolute addresses and do their own window decoding.
//!
//! # Example
//!
//! ```rust
//! use emu6502::{Bus, MemoryBus, RamDevice, RomDevice, CPU};
//!
//! let mut rom = RomDevice::new(0x8000, 0x8000);
//! rom.load(&[0xA9, 0x42], 0).unwrap(); // LDA #$42 at $8000
//! rom.load(&[0x00, 0x80], 0x7FFC).unwrap(); // reset vector
//!
//! let mut bus = Bus::new();
//! bus.add(Box::new(RamDevice::new(0x0000, 0x4000)));
//! bus.add(Box::new(rom));
//!
//! let mut cpu = CPU::new(bus);
//! cpu.step(1);
//! assert_eq!(cpu.a(), 0x42);
//! ```

use std::any::Any;

use log::debug;

use crate::MemoryBus;

pub mod acia;
pub mod block;
pub mod interrupts;
pub mod ram;
pub mod rom;
pub mod via;

pub use acia::{Acia6551, AciaSettings, ClockSource, RecvError, StopBits};
pub use block::MemoryBlock;
pub use interrupts::IrqLine;
pub use ram::RamDevice;
pub use rom::RomDevice;
pub use via::{Via6522, ViaRegister, ViaSettings};

/// Abstract interface for memory-mapped hardware devices.
///
/// # Design
///
/// - **Absolute addressing**: the device receives the full 16-bit address and
///   decides whether it is inside its window
/// - **Claiming reads**: `read` returns `None` for addresses the device does
///   not decode, letting the bus try the next device
/// - **Mutable read**: register reads may have side effects
/// - **No panics**: every address must be handled
///
/// # Examples
///
/// ```rust
/// use emu6502::BusDevice;
/// use std::any::Any;
///
/// struct Latch {
///     address: u16,
///     value: u8,
/// }
///
/// impl BusDevice for Latch {
///     fn read(&mut self, addr: u16) -> Option<u8> {
///         (addr == self.address).then_some(self.value)
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         if addr == self.address {
///             self.value = value;
///         }
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
///
///     fn as_any_mut(&mut self) -> &mut dyn Any {
///         self
///     }
/// }
/// ```
pub trait BusDevice {
    /// Returns `Some(byte)` when `addr` belongs to this device.
    fn read(&mut self, addr: u16) -> Option<u8>;

    /// Handles a write; addresses outside the device are ignored.
    fn write(&mut self, addr: u16, value: u8);

    /// Enables downcasting to the concrete device type.
    fn as_any(&self) -> &dyn Any;

    /// Enables mutable downcasting to the concrete device type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Position of a device in a [`Bus`], returned by [`Bus::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceHandle(usize);

impl DeviceHandle {
    /// Registration index (0 for the first device added).
    pub fn index(self) -> usize {
        self.0
    }
}

/// Ordered device registry implementing [`MemoryBus`].
///
/// Also carries the shared IRQ line: devices that need to interrupt the CPU
/// hold a clone of [`Bus::irq_line`], and the CPU drains it through
/// [`MemoryBus::take_irq`] after every instruction.
#[derive(Default)]
pub struct Bus {
    devices: Vec<Box<dyn BusDevice>>,
    irq: IrqLine,
}

impl Bus {
    /// Creates an empty bus. Every read returns 0 until devices are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a device. Earlier devices win read arbitration.
    pub fn add(&mut self, device: Box<dyn BusDevice>) -> DeviceHandle {
        let handle = DeviceHandle(self.devices.len());
        self.devices.push(device);
        debug!("bus: registered device #{}", handle.0);
        handle
    }

    /// Borrows a registered device as its concrete type.
    ///
    /// Returns `None` if the handle is out of range or the type does not match.
    pub fn device<T: BusDevice + 'static>(&self, handle: DeviceHandle) -> Option<&T> {
        self.devices
            .get(handle.0)
            .and_then(|device| device.as_any().downcast_ref::<T>())
    }

    /// Mutably borrows a registered device as its concrete type.
    pub fn device_mut<T: BusDevice + 'static>(&mut self, handle: DeviceHandle) -> Option<&mut T> {
        self.devices
            .get_mut(handle.0)
            .and_then(|device| device.as_any_mut().downcast_mut::<T>())
    }

    /// Number of registered devices.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// A handle on the IRQ line that reaches whichever CPU owns this bus.
    pub fn irq_line(&self) -> IrqLine {
        self.irq.clone()
    }

    /// Raises the IRQ line on behalf of a device.
    pub fn assert_irq(&self) {
        self.irq.assert();
    }
}

impl MemoryBus for Bus {
    fn read(&mut self, addr: u16) -> u8 {
        self.devices
            .iter_mut()
            .find_map(|device| device.read(addr))
            .unwrap_or(0)
    }

    fn write(&mut self, addr: u16, value: u8) {
        for device in &mut self.devices {
            device.write(addr, value);
        }
    }

    fn take_irq(&mut self) -> bool {
        self.irq.take()
    }
}
