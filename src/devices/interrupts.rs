//! Interrupt request line shared between devices and the CPU.
//!
//! Devices cannot call into the CPU that owns their bus, so an interrupt
//! request travels the other way: a device raises an [`IrqLine`] it was
//! handed at construction, and the CPU polls the bus through
//! [`MemoryBus::take_irq`](crate::MemoryBus::take_irq) after every
//! instruction.
//!
//! ## IRQ Line Behavior
//!
//! - **Latched**: an assertion stays pending until the CPU collects it
//! - **Shared**: every clone of a line refers to the same latch
//! - **Maskable**: the CPU drops a collected request while its I flag is set
//!
//! When the CPU accepts the request it:
//!
//! 1. Completes the current instruction
//! 2. Pushes PC (high byte, then low byte) to stack
//! 3. Pushes status register to stack (B clear)
//! 4. Sets I flag to prevent nested interrupts
//! 5. Loads PC from the IRQ vector at 0xFFFE-0xFFFF
//!
//! # Example
//!
//! ```rust
//! use emu6502::{Bus, MemoryBus};
//!
//! let mut bus = Bus::new();
//! let line = bus.irq_line();
//!
//! line.assert();
//! assert!(line.is_asserted());
//! assert!(bus.take_irq());
//! assert!(!line.is_asserted());
//! ```

use std::cell::Cell;
use std::rc::Rc;

/// Cloneable handle on a single latched IRQ line.
#[derive(Debug, Clone, Default)]
pub struct IrqLine {
    pending: Rc<Cell<bool>>,
}

impl IrqLine {
    /// Creates a line with no pending request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises an interrupt request.
    pub fn assert(&self) {
        self.pending.set(true);
    }

    /// Returns true while a request waits to be collected.
    pub fn is_asserted(&self) -> bool {
        self.pending.get()
    }

    /// Collects and clears the pending request.
    pub fn take(&self) -> bool {
        self.pending.replace(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_one_latch() {
        let line = IrqLine::new();
        let device_side = line.clone();

        assert!(!line.is_asserted());
        device_side.assert();
        assert!(line.is_asserted());

        assert!(line.take());
        assert!(!device_side.is_asserted());
        assert!(!line.take());
    }

    #[test]
    fn test_repeated_assertions_collapse() {
        let line = IrqLine::new();
        line.assert();
        line.assert();

        assert!(line.take());
        assert!(!line.take());
    }
}
