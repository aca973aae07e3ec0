//! RAM device implementation.

use std::any::Any;
use std::io::Read;

use super::{BusDevice, MemoryBlock};
use crate::error::LoadError;

/// Readable and writable memory window.
///
/// # Examples
///
/// ```rust
/// use emu6502::{BusDevice, RamDevice};
///
/// let mut ram = RamDevice::new(0x0200, 0x100);
///
/// ram.write(0x0242, 0xAA);
/// assert_eq!(ram.read(0x0242), Some(0xAA));
/// assert_eq!(ram.read(0x0300), None);
/// ```
#[derive(Debug, Clone)]
pub struct RamDevice {
    block: MemoryBlock,
}

impl RamDevice {
    /// Creates `size` zeroed bytes decoded from `offset`.
    pub fn new(offset: u16, size: usize) -> Self {
        Self {
            block: MemoryBlock::new(offset, size),
        }
    }

    /// Preloads bytes, e.g. a program or initial data.
    pub fn load(&mut self, bytes: &[u8], offset: usize) -> Result<(), LoadError> {
        self.block.load(bytes, offset)
    }

    pub fn load_from_reader<R: Read>(&mut self, reader: R, offset: usize) -> Result<(), LoadError> {
        self.block.load_from_reader(reader, offset)
    }

    pub fn block(&self) -> &MemoryBlock {
        &self.block
    }
}

impl BusDevice for RamDevice {
    fn read(&mut self, addr: u16) -> Option<u8> {
        self.block.get(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.block.set(addr, value);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
