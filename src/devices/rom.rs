//! ROM device implementation.
//!
//! Contents are supplied at build time through `load`; writes arriving over
//! the bus are dropped.

use std::any::Any;
use std::io::Read;

use super::{BusDevice, MemoryBlock};
use crate::error::LoadError;

/// Read-only memory window.
///
/// # Examples
///
/// ```rust
/// use emu6502::{BusDevice, RomDevice};
///
/// let mut rom = RomDevice::new(0xC000, 0x4000);
/// rom.load(&[0xEA, 0x4C], 0).unwrap();
///
/// assert_eq!(rom.read(0xC000), Some(0xEA));
///
/// rom.write(0xC000, 0xFF); // ignored
/// assert_eq!(rom.read(0xC000), Some(0xEA));
/// ```
#[derive(Debug, Clone)]
pub struct RomDevice {
    block: MemoryBlock,
}

impl RomDevice {
    /// Creates a zero-filled ROM of `size` bytes decoded from `offset`.
    pub fn new(offset: u16, size: usize) -> Self {
        Self {
            block: MemoryBlock::new(offset, size),
        }
    }

    /// Burns `bytes` into the ROM image.
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

impl BusDevice for RomDevice {
    fn read(&mut self, addr: u16) -> Option<u8> {
        self.block.get(addr)
    }

    fn write(&mut self, _addr: u16, _value: u8) {}

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_rom_write_protection() {
        let mut rom = RomDevice::new(0x8000, 4);
        rom.load(&[0x11, 0x22, 0x33, 0x44], 0).unwrap();

        for addr in 0x8000..0x8004 {
            rom.write(addr, 0xFF);
        }

        assert_eq!(rom.block().data(), &[0x11, 0x22, 0x33, 0x44]);
    }

    #[test]
    fn test_rom_claims_only_its_window() {
        let mut rom = RomDevice::new(0xF000, 0x1000);
        assert_eq!(rom.read(0xEFFF), None);
        assert_eq!(rom.read(0xF000), Some(0));
        assert_eq!(rom.read(0xFFFF), Some(0));
    }

    #[test]
    fn test_rom_image_too_large() {
        let mut rom = RomDevice::new(0xF000, 0x1000);
        assert!(rom
            .load_from_reader(Cursor::new(vec![0u8; 0x1001]), 0)
            .is_err());
        assert!(rom.load_from_reader(Cursor::new(vec![0u8; 0x1000]), 0).is_ok());
    }
}
