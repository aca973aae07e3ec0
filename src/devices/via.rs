//! 6522 VIA (versatile interface adapter) register shell.
//!
//! Only the register map is modelled. The chip claims no reads and ignores
//! every write, so a program probing it sees open bus (0) from the [`Bus`].
//! Timers, ports, the shift register and interrupt logic are not emulated.
//!
//! [`Bus`]: crate::Bus

use std::any::Any;

use super::BusDevice;

/// The sixteen registers in datasheet (RS3..RS0) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViaRegister {
    /// Output/input register B
    Iorb,
    /// Output/input register A
    Iora,
    /// Data direction register B
    Ddrb,
    /// Data direction register A
    Ddra,
    /// Timer 1 counter, low
    T1cl,
    /// Timer 1 counter, high
    T1ch,
    /// Timer 1 latch, low
    T1ll,
    /// Timer 1 latch, high
    T1lh,
    /// Timer 2 counter, low
    T2cl,
    /// Timer 2 counter, high
    T2ch,
    /// Shift register
    Sr,
    /// Auxiliary control register
    Acr,
    /// Peripheral control register
    Pcr,
    /// Interrupt flag register
    Ifr,
    /// Interrupt enable register
    Ier,
    /// Register A without handshake
    IoraNoHandshake,
}

impl ViaRegister {
    pub const ALL: [ViaRegister; 16] = [
        ViaRegister::Iorb,
        ViaRegister::Iora,
        ViaRegister::Ddrb,
        ViaRegister::Ddra,
        ViaRegister::T1cl,
        ViaRegister::T1ch,
        ViaRegister::T1ll,
        ViaRegister::T1lh,
        ViaRegister::T2cl,
        ViaRegister::T2ch,
        ViaRegister::Sr,
        ViaRegister::Acr,
        ViaRegister::Pcr,
        ViaRegister::Ifr,
        ViaRegister::Ier,
        ViaRegister::IoraNoHandshake,
    ];

    /// Register-select value (0-15).
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Bus address of each register, indexed by [`ViaRegister::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViaSettings {
    pub addresses: [u16; 16],
}

impl ViaSettings {
    /// The usual wiring: RS0-RS3 on A0-A3, registers at `base..base + 16`.
    pub fn at(base: u16) -> Self {
        let mut addresses = [0u16; 16];
        for (i, address) in addresses.iter_mut().enumerate() {
            *address = base.wrapping_add(i as u16);
        }
        Self { addresses }
    }

    pub fn address(&self, register: ViaRegister) -> u16 {
        self.addresses[register.index()]
    }
}

/// 6522 VIA with register storage only.
#[derive(Debug, Clone)]
pub struct Via6522 {
    settings: ViaSettings,
    registers: [u8; 16],
}

impl Via6522 {
    pub fn new(settings: ViaSettings) -> Self {
        Self {
            settings,
            registers: [0; 16],
        }
    }

    pub fn settings(&self) -> &ViaSettings {
        &self.settings
    }

    /// Stored register value.
    pub fn register(&self, register: ViaRegister) -> u8 {
        self.registers[register.index()]
    }
}

impl BusDevice for Via6522 {
    fn read(&mut self, _addr: u16) -> Option<u8> {
        None
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

    #[test]
    fn test_datasheet_layout() {
        let settings = ViaSettings::at(0x6000);
        assert_eq!(settings.address(ViaRegister::Iorb), 0x6000);
        assert_eq!(settings.address(ViaRegister::T1ch), 0x6005);
        assert_eq!(settings.address(ViaRegister::IoraNoHandshake), 0x600F);

        for (i, register) in ViaRegister::ALL.iter().enumerate() {
            assert_eq!(register.index(), i);
        }
    }

    #[test]
    fn test_reads_unclaimed_and_writes_dropped() {
        let mut via = Via6522::new(ViaSettings::at(0x6000));

        for &register in &ViaRegister::ALL {
            let address = via.settings().address(register);
            via.write(address, 0xFF);
            assert_eq!(via.read(address), None);
            assert_eq!(via.register(register), 0);
        }
    }
}
