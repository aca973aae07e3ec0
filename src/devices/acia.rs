//! 6551 ACIA (asynchronous communications interface adapter) model.
//!
//! Provides serial communication through four memory-mapped registers with a
//! callback for the transmit side and [`Acia6551::recv_data`] for the
//! receive side.

use std::any::Any;
use std::fmt;

use log::debug;

use super::BusDevice;

/// Status register bits.
pub mod status {
    pub const PARITY_ERROR: u8 = 0x01;
    pub const FRAMING_ERROR: u8 = 0x02;
    pub const OVERRUN: u8 = 0x04;
    pub const RECEIVER_DATA_FULL: u8 = 0x08;
    pub const TRANSMITTER_DATA_EMPTY: u8 = 0x10;
    pub const INTERRUPT: u8 = 0x80;
}

const CONTROL_RECEIVER_CLOCK_SOURCE: u8 = 0x10;
const CONTROL_STOP_BITS: u8 = 0x80;

/// Command bits that survive a soft reset (parity mode control and enable).
const COMMAND_SOFT_RESET_MASK: u8 = 0xE0;

const BAUD_RATES: [f32; 16] = [
    16.0, 50.0, 75.0, 109.92, 134.58, 150.0, 300.0, 600.0, 1200.0, 1800.0, 2400.0, 3600.0,
    4800.0, 7200.0, 9600.0, 19200.0,
];

const WORD_LENGTHS: [u8; 4] = [8, 7, 6, 5];

/// Register addresses and chip revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AciaSettings {
    /// Transmit/receive data register.
    pub data: u16,
    pub status: u16,
    pub command: u16,
    pub control: u16,

    /// Reproduce the WDC 65C51 errata: the transmit-empty status bit is
    /// stuck at 1, so software cannot observe a transmission in progress.
    pub simulate_chip_bug: bool,
}

impl AciaSettings {
    /// Registers at `base..base + 4` in datasheet order (data, status,
    /// command, control).
    pub fn at(base: u16, simulate_chip_bug: bool) -> Self {
        Self {
            data: base,
            status: base.wrapping_add(1),
            command: base.wrapping_add(2),
            control: base.wrapping_add(3),
            simulate_chip_bug,
        }
    }

    /// The four register addresses in datasheet order.
    pub fn addresses(&self) -> [u16; 4] {
        [self.data, self.status, self.command, self.control]
    }
}

/// Line error reported alongside a received byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecvError {
    #[default]
    None,
    Framing,
    Parity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    OneAndAHalf,
    Two,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSource {
    ExternalReceiverClock,
    BaudRate,
}

/// 6551 ACIA serial chip.
///
/// ## Register Map
///
/// | Register | Read | Write |
/// |----------|------|-------|
/// | Data     | last received byte; clears parity, framing, overrun and receive-full | transmit through the callback |
/// | Status   | status byte; clears the interrupt bit | soft reset |
/// | Command  | stored value | store |
/// | Control  | stored value | store |
///
/// Each register lives at its own configurable address. Any other address
/// is left for the next device on the bus.
///
/// # Example
///
/// ```rust
/// use emu6502::{Acia6551, AciaSettings, BusDevice, RecvError};
/// use emu6502::devices::acia::status;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let mut acia = Acia6551::new(AciaSettings::at(0x5000, true));
///
/// let sent = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&sent);
/// acia.set_transmit_callback(move |byte| sink.borrow_mut().push(byte));
///
/// acia.write(0x5000, b'A');
/// assert_eq!(*sent.borrow(), vec![b'A']);
///
/// acia.recv_data(b'z', RecvError::None);
/// assert_ne!(acia.status() & status::RECEIVER_DATA_FULL, 0);
/// assert_eq!(acia.read(0x5000), Some(b'z'));
/// assert_eq!(acia.status() & status::RECEIVER_DATA_FULL, 0);
/// ```
pub struct Acia6551 {
    settings: AciaSettings,

    data_register: u8,
    status_register: u8,
    command_register: u8,
    control_register: u8,

    on_transmit: Option<Box<dyn FnMut(u8)>>,
}

impl Acia6551 {
    /// Creates the chip in its power-on state (see [`hard_reset`](Self::hard_reset)).
    pub fn new(settings: AciaSettings) -> Self {
        let mut acia = Self {
            settings,
            data_register: 0x00,
            status_register: 0x00,
            command_register: 0x00,
            control_register: 0x00,
            on_transmit: None,
        };
        acia.hard_reset();
        acia
    }

    /// Sets the sink that receives every byte the CPU transmits.
    ///
    /// Without a sink, transmitted bytes are discarded.
    pub fn set_transmit_callback<F>(&mut self, callback: F)
    where
        F: FnMut(u8) + 'static,
    {
        self.on_transmit = Some(Box::new(callback));
    }

    pub fn settings(&self) -> &AciaSettings {
        &self.settings
    }

    /// Delivers a byte from the serial line.
    ///
    /// Sets overrun if the previous byte was never read, records `error`,
    /// then marks the receive register full.
    pub fn recv_data(&mut self, byte: u8, error: RecvError) {
        if self.status_register & status::RECEIVER_DATA_FULL != 0 {
            self.status_register |= status::OVERRUN;
        }

        match error {
            RecvError::None => {}
            RecvError::Parity => self.status_register |= status::PARITY_ERROR,
            RecvError::Framing => self.status_register |= status::FRAMING_ERROR,
        }

        self.status_register |= status::RECEIVER_DATA_FULL;
        self.data_register = byte;
    }

    /// Power-on reset: status, command and control cleared. With the chip
    /// bug enabled the transmit-empty bit comes up set.
    pub fn hard_reset(&mut self) {
        self.status_register = 0x00;
        self.control_register = 0x00;
        self.command_register = 0x00;

        if self.settings.simulate_chip_bug {
            self.status_register |= status::TRANSMITTER_DATA_EMPTY;
        }
    }

    /// Program reset, triggered by writing any value to the status register.
    ///
    /// Clears overrun and every command bit except the parity controls.
    pub fn soft_reset(&mut self) {
        self.status_register &= !status::OVERRUN;
        self.command_register &= COMMAND_SOFT_RESET_MASK;

        if self.settings.simulate_chip_bug {
            self.status_register |= status::TRANSMITTER_DATA_EMPTY;
        }
    }

    fn send_data(&mut self, byte: u8) {
        if let Some(callback) = self.on_transmit.as_mut() {
            callback(byte);
        }

        if self.settings.simulate_chip_bug {
            self.status_register |= status::TRANSMITTER_DATA_EMPTY;
        } else {
            self.status_register &= !status::TRANSMITTER_DATA_EMPTY;
        }
    }

    // Side-effect-free register views

    pub fn data(&self) -> u8 {
        self.data_register
    }

    pub fn status(&self) -> u8 {
        self.status_register
    }

    pub fn command(&self) -> u8 {
        self.command_register
    }

    pub fn control(&self) -> u8 {
        self.control_register
    }

    /// Baud rate selected by the control register's low nibble, or 0 when
    /// the receiver runs from an external clock.
    pub fn baud_rate(&self) -> f32 {
        if self.control_register & CONTROL_RECEIVER_CLOCK_SOURCE != 0 {
            return 0.0;
        }

        BAUD_RATES[(self.control_register & 0x0F) as usize]
    }

    /// Data bits per word (5-8), from control bits 5-6.
    pub fn word_length(&self) -> u8 {
        WORD_LENGTHS[((self.control_register >> 5) & 0x03) as usize]
    }

    pub fn stop_bits(&self) -> StopBits {
        if self.control_register & CONTROL_STOP_BITS != 0 {
            StopBits::One
        } else if self.word_length() == 5 {
            StopBits::OneAndAHalf
        } else {
            StopBits::Two
        }
    }

    pub fn receiver_clock_source(&self) -> ClockSource {
        if self.control_register & CONTROL_RECEIVER_CLOCK_SOURCE != 0 {
            ClockSource::ExternalReceiverClock
        } else {
            ClockSource::BaudRate
        }
    }
}

impl fmt::Debug for Acia6551 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Acia6551")
            .field("settings", &self.settings)
            .field("data", &self.data_register)
            .field("status", &self.status_register)
            .field("command", &self.command_register)
            .field("control", &self.control_register)
            .field("has_transmit_callback", &self.on_transmit.is_some())
            .finish()
    }
}

impl BusDevice for Acia6551 {
    fn read(&mut self, addr: u16) -> Option<u8> {
        if addr == self.settings.data {
            self.status_register &= 0xF0;
            Some(self.data_register)
        } else if addr == self.settings.status {
            let value = self.status_register;
            self.status_register &= !status::INTERRUPT;
            Some(value)
        } else if addr == self.settings.command {
            Some(self.command_register)
        } else if addr == self.settings.control {
            Some(self.control_register)
        } else {
            None
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        if addr == self.settings.data {
            self.send_data(value);
        } else if addr == self.settings.status {
            debug!("acia: soft reset");
            self.soft_reset();
        } else if addr == self.settings.command {
            self.command_register = value;
        } else if addr == self.settings.control {
            self.control_register = value;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
