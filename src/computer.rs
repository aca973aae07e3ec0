//! Machine assembly from device descriptors.
//!
//! [`Computer::from_config`] turns an ordered descriptor list into a [`Bus`]
//! with every enabled device registered in declaration order, then powers up
//! a [`CPU`] on it (which reads the reset vector through the new bus).

use std::ops::Range;

use log::{debug, warn};

use crate::config::{DeviceConfig, RomConfig};
use crate::devices::{Acia6551, Bus, BusDevice, DeviceHandle, RamDevice, RomDevice, Via6522};
use crate::error::ConfigError;
use crate::CPU;

/// A CPU wired to a bus of named devices.
///
/// # Example
///
/// ```rust
/// use emu6502::config::{DeviceConfig, RamConfig, RomConfig};
/// use emu6502::{Computer, RamDevice};
///
/// let configs = vec![
///     DeviceConfig::Ram(RamConfig {
///         name: "ram".into(),
///         enabled: true,
///         offset: 0x0000,
///         size: 0x8000,
///     }),
///     DeviceConfig::Rom(RomConfig {
///         name: "rom".into(),
///         enabled: true,
///         offset: 0xF000,
///         size: 0x1000,
///         path: "monitor.bin".into(),
///     }),
/// ];
///
/// let mut image = vec![0xEA; 0x1000];
/// image[0x0FFC] = 0x00; // reset vector -> $F000
/// image[0x0FFD] = 0xF0;
///
/// let mut computer = Computer::from_config(&configs, |_rom| Some(image.clone())).unwrap();
/// assert_eq!(computer.cpu().pc(), 0xF000);
///
/// computer.cpu_mut().step(1);
/// assert_eq!(computer.cpu().pc(), 0xF001);
/// assert!(computer.device::<RamDevice>("ram").is_some());
/// ```
pub struct Computer {
    cpu: CPU<Bus>,
    names: Vec<(String, DeviceHandle)>,
}

impl Computer {
    /// Builds the machine.
    ///
    /// `images` supplies the contents of each ROM; returning `None` fails the
    /// build with [`ConfigError::MissingImage`]. Disabled descriptors are
    /// skipped entirely.
    pub fn from_config<F>(configs: &[DeviceConfig], mut images: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&RomConfig) -> Option<Vec<u8>>,
    {
        let mut bus = Bus::new();
        let mut names = Vec::new();
        let mut windows: Vec<(&str, Range<u32>)> = Vec::new();

        for config in configs.iter().filter(|config| config.is_enabled()) {
            config.validate()?;

            if let Some(window) = config.memory_window() {
                if let Some(earlier) = first_overlap(&windows, &window) {
                    warn!(
                        "computer: {:?} overlaps {:?}, which answers reads there",
                        config.name(),
                        earlier
                    );
                }
                windows.push((config.name(), window));
            }

            let device: Box<dyn BusDevice> = match config {
                DeviceConfig::Rom(rom) => {
                    let image = images(rom).ok_or_else(|| ConfigError::MissingImage {
                        name: rom.name.clone(),
                    })?;
                    let mut device = RomDevice::new(rom.offset, rom.size as usize);
                    device
                        .load(&image, 0)
                        .map_err(|source| ConfigError::ImageTooLarge {
                            name: rom.name.clone(),
                            source,
                        })?;
                    Box::new(device)
                }
                DeviceConfig::Ram(ram) => Box::new(RamDevice::new(ram.offset, ram.size as usize)),
                DeviceConfig::Acia6551(acia) => Box::new(Acia6551::new(acia.settings())),
                DeviceConfig::Via6522(via) => Box::new(Via6522::new(via.settings())),
            };

            debug!("computer: adding {:?}", config.name());
            names.push((config.name().to_owned(), bus.add(device)));
        }

        Ok(Self {
            cpu: CPU::new(bus),
            names,
        })
    }

    pub fn cpu(&self) -> &CPU<Bus> {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut CPU<Bus> {
        &mut self.cpu
    }

    pub fn bus(&self) -> &Bus {
        self.cpu.memory()
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        self.cpu.memory_mut()
    }

    /// Handle of the first enabled device registered under `name`.
    pub fn handle(&self, name: &str) -> Option<DeviceHandle> {
        self.names
            .iter()
            .find(|(device_name, _)| device_name == name)
            .map(|&(_, handle)| handle)
    }

    /// Borrows a named device as its concrete type.
    pub fn device<T: BusDevice + 'static>(&self, name: &str) -> Option<&T> {
        let handle = self.handle(name)?;
        self.bus().device(handle)
    }

    pub fn device_mut<T: BusDevice + 'static>(&mut self, name: &str) -> Option<&mut T> {
        let handle = self.handle(name)?;
        self.bus_mut().device_mut(handle)
    }
}

/// Name of the first earlier window sharing an address with `window`.
fn first_overlap<'a>(windows: &[(&'a str, Range<u32>)], window: &Range<u32>) -> Option<&'a str> {
    windows
        .iter()
        .find(|(_, earlier)| earlier.start < window.end && window.start < earlier.end)
        .map(|&(name, _)| name)
}
