//! Status register bit layout.
//!
//! ```text
//! 7 6 5 4 3 2 1 0
//! N V - B D I Z C
//! ```
//!
//! Bit 5 has no flag behind it; it always reads as 1.

/// Negative (bit 7 of the last result).
pub const NEGATIVE: u8 = 0b1000_0000;
/// Signed overflow.
pub const OVERFLOW: u8 = 0b0100_0000;
/// Unused bit, always set.
pub const CONSTANT: u8 = 0b0010_0000;
/// Break. Only meaningful in a status byte pushed by BRK/PHP.
pub const BREAK: u8 = 0b0001_0000;
/// Decimal mode for ADC/SBC.
pub const DECIMAL: u8 = 0b0000_1000;
/// Interrupt disable (masks IRQ, never NMI).
pub const INTERRUPT: u8 = 0b0000_0100;
/// Zero result.
pub const ZERO: u8 = 0b0000_0010;
/// Carry / not-borrow.
pub const CARRY: u8 = 0b0000_0001;
