//! Contiguous byte window shared by RAM and ROM.

use std::io::Read;

use log::warn;

use crate::error::LoadError;

const ADDRESS_SPACE: usize = 0x1_0000;

/// A run of bytes decoded at `offset..offset + len`.
///
/// Addresses below `offset` or at/after its end are outside the window.
///
/// # Examples
///
/// ```rust
/// use emu6502::MemoryBlock;
///
/// let mut block = MemoryBlock::new(0x2000, 0x100);
/// block.load(&[0x01, 0x02], 0x10).unwrap();
///
/// assert_eq!(block.get(0x2010), Some(0x01));
/// assert_eq!(block.get(0x1FFF), None);
/// assert_eq!(block.get(0x2100), None);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryBlock {
    offset: u16,
    data: Vec<u8>,
}

impl MemoryBlock {
    /// Creates a zero-filled window of `size` bytes starting at `offset`.
    ///
    /// The window must end at or before $FFFF. A larger `size` is clamped to
    /// the bytes the address space can reach.
    pub fn new(offset: u16, size: usize) -> Self {
        let reachable = ADDRESS_SPACE - offset as usize;
        if size > reachable {
            warn!(
                "memory window at ${:04X}: size {:#X} clamped to {:#X}",
                offset, size, reachable
            );
        }

        Self {
            offset,
            data: vec![0; size.min(reachable)],
        }
    }

    /// First decoded address.
    pub fn offset(&self) -> u16 {
        self.offset
    }

    /// Window size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The backing bytes, index 0 being `offset`.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn index(&self, addr: u16) -> Option<usize> {
        let index = addr.checked_sub(self.offset)? as usize;
        (index < self.data.len()).then_some(index)
    }

    /// Byte at absolute address `addr`, or `None` outside the window.
    pub fn get(&self, addr: u16) -> Option<u8> {
        self.index(addr).map(|index| self.data[index])
    }

    /// Stores `value` at absolute address `addr`. Returns false outside the
    /// window.
    pub fn set(&mut self, addr: u16, value: u8) -> bool {
        match self.index(addr) {
            Some(index) => {
                self.data[index] = value;
                true
            }
            None => false,
        }
    }

    /// Copies `bytes` into the window starting `offset` bytes from its base.
    ///
    /// Fails without modifying anything when `offset + bytes.len()` exceeds
    /// the window size.
    pub fn load(&mut self, bytes: &[u8], offset: usize) -> Result<(), LoadError> {
        let end = offset
            .checked_add(bytes.len())
            .filter(|&end| end <= self.data.len())
            .ok_or(LoadError::DoesNotFit {
                len: bytes.len(),
                offset,
                capacity: self.data.len(),
            })?;

        self.data[offset..end].copy_from_slice(bytes);
        Ok(())
    }

    /// Reads `reader` to the end and loads the bytes as [`load`](Self::load)
    /// does.
    pub fn load_from_reader<R: Read>(&mut self, mut reader: R, offset: usize) -> Result<(), LoadError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.load(&bytes, offset)
    }
}
