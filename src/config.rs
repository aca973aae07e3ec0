//! Device descriptors.
//!
//! A machine is described as an ordered list of [`DeviceConfig`] values,
//! usually deserialized from JSON:
//!
//! ```json
//! [
//!   { "type": "ram", "name": "Main RAM", "enabled": true, "offset": "0000", "size": "8000" },
//!   { "type": "acia_6551", "name": "ACIA", "enabled": true,
//!     "data": "5000", "status": "5001", "command": "5002", "control": "5003",
//!     "simulate_chip_bug": true },
//!   { "type": "via_6522", "name": "VIA", "enabled": false, "base": "6000" },
//!   { "type": "rom", "name": "Monitor", "enabled": true, "offset": "C000", "size": "4000",
//!     "path": "roms/monitor.bin" }
//! ]
//! ```
//!
//! Addresses and sizes are hexadecimal strings; a `0x` or `$` prefix is
//! optional. Order matters: it becomes the bus arbitration order.

use std::ops::Range;

use serde::Deserialize;

use crate::devices::{AciaSettings, ViaSettings};
use crate::error::ConfigError;

/// One device on the bus.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum DeviceConfig {
    #[serde(rename = "rom")]
    Rom(RomConfig),
    #[serde(rename = "ram")]
    Ram(RamConfig),
    #[serde(rename = "acia_6551")]
    Acia6551(AciaConfig),
    #[serde(rename = "via_6522")]
    Via6522(ViaConfig),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RomConfig {
    pub name: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(deserialize_with = "hex::deserialize")]
    pub offset: u16,
    #[serde(deserialize_with = "hex::deserialize")]
    pub size: u32,
    /// Identifies the image; resolving it to bytes is up to the caller.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RamConfig {
    pub name: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(deserialize_with = "hex::deserialize")]
    pub offset: u16,
    #[serde(deserialize_with = "hex::deserialize")]
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AciaConfig {
    pub name: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(deserialize_with = "hex::deserialize")]
    pub data: u16,
    #[serde(deserialize_with = "hex::deserialize")]
    pub status: u16,
    #[serde(deserialize_with = "hex::deserialize")]
    pub command: u16,
    #[serde(deserialize_with = "hex::deserialize")]
    pub control: u16,
    #[serde(default)]
    pub simulate_chip_bug: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ViaConfig {
    pub name: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Registers occupy `base..base + 16`.
    #[serde(deserialize_with = "hex::deserialize")]
    pub base: u16,
}

fn enabled_by_default() -> bool {
    true
}

/// Number of bytes from `offset` to the top of the address space.
const ADDRESS_SPACE: u32 = 0x1_0000;

fn check_window(name: &str, offset: u16, size: u32) -> Result<(), ConfigError> {
    if size == 0 {
        return Err(ConfigError::EmptyWindow {
            name: name.to_owned(),
        });
    }
    let end = (offset as u32).checked_add(size);
    if end.map_or(true, |end| end > ADDRESS_SPACE) {
        return Err(ConfigError::WindowOverflow {
            name: name.to_owned(),
            offset,
            size,
        });
    }
    Ok(())
}

impl DeviceConfig {
    pub fn name(&self) -> &str {
        match self {
            DeviceConfig::Rom(config) => &config.name,
            DeviceConfig::Ram(config) => &config.name,
            DeviceConfig::Acia6551(config) => &config.name,
            DeviceConfig::Via6522(config) => &config.name,
        }
    }

    pub fn is_enabled(&self) -> bool {
        match self {
            DeviceConfig::Rom(config) => config.enabled,
            DeviceConfig::Ram(config) => config.enabled,
            DeviceConfig::Acia6551(config) => config.enabled,
            DeviceConfig::Via6522(config) => config.enabled,
        }
    }

    /// Address range decoded by a RAM or ROM window. Register-mapped chips
    /// have none.
    pub fn memory_window(&self) -> Option<Range<u32>> {
        let (offset, size) = match self {
            DeviceConfig::Rom(config) => (config.offset, config.size),
            DeviceConfig::Ram(config) => (config.offset, config.size),
            DeviceConfig::Acia6551(_) | DeviceConfig::Via6522(_) => return None,
        };
        let start = offset as u32;
        Some(start..start.saturating_add(size))
    }

    /// Checks that windows fit in the 16-bit address space and that no chip
    /// binds two registers to one address.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            DeviceConfig::Rom(config) => check_window(&config.name, config.offset, config.size),
            DeviceConfig::Ram(config) => check_window(&config.name, config.offset, config.size),
            DeviceConfig::Acia6551(config) => {
                let addresses = config.settings().addresses();
                for (i, address) in addresses.iter().enumerate() {
                    if addresses[..i].contains(address) {
                        return Err(ConfigError::DuplicateRegister {
                            name: config.name.clone(),
                            address: *address,
                        });
                    }
                }
                Ok(())
            }
            DeviceConfig::Via6522(config) => check_window(&config.name, config.base, 16),
        }
    }
}

impl AciaConfig {
    pub fn settings(&self) -> AciaSettings {
        AciaSettings {
            data: self.data,
            status: self.status,
            command: self.command,
            control: self.control,
            simulate_chip_bug: self.simulate_chip_bug,
        }
    }
}

impl ViaConfig {
    pub fn settings(&self) -> ViaSettings {
        ViaSettings::at(self.base)
    }
}

/// Hexadecimal string fields.
pub mod hex {
    use std::num::ParseIntError;

    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    /// Parses `"C000"`, `"0xC000"` or `"$C000"`.
    pub fn parse(text: &str) -> Result<u32, ParseIntError> {
        let text = text.trim();
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .or_else(|| text.strip_prefix('$'))
            .unwrap_or(text);
        u32::from_str_radix(digits, 16)
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u32>,
    {
        let text = String::deserialize(deserializer)?;
        let value = parse(&text)
            .map_err(|err| D::Error::custom(format!("invalid hex value {text:?}: {err}")))?;
        T::try_from(value).map_err(|_| D::Error::custom(format!("hex value {text:?} is out of range")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ram(offset: u16, size: u32) -> DeviceConfig {
        DeviceConfig::Ram(RamConfig {
            name: "ram".into(),
            enabled: true,
            offset,
            size,
        })
    }

    #[test]
    fn test_hex_prefixes() {
        assert_eq!(hex::parse("C000"), Ok(0xC000));
        assert_eq!(hex::parse("0xc000"), Ok(0xC000));
        assert_eq!(hex::parse("$FFFF"), Ok(0xFFFF));
        assert_eq!(hex::parse(" 10000 "), Ok(0x10000));
        assert!(hex::parse("xyz").is_err());
        assert!(hex::parse("").is_err());
    }

    #[test]
    fn test_window_checks() {
        assert!(ram(0x0000, 0x10000).validate().is_ok());
        assert!(ram(0xFF00, 0x100).validate().is_ok());

        assert!(matches!(
            ram(0xFF00, 0x101).validate(),
            Err(ConfigError::WindowOverflow {
                offset: 0xFF00,
                size: 0x101,
                ..
            })
        ));
        assert!(matches!(
            ram(0x0001, 0xFFFF_FFFF).validate(),
            Err(ConfigError::WindowOverflow {
                offset: 0x0001,
                size: 0xFFFF_FFFF,
                ..
            })
        ));
        assert!(matches!(
            ram(0x1000, 0).validate(),
            Err(ConfigError::EmptyWindow { .. })
        ));
    }

    #[test]
    fn test_memory_window() {
        assert_eq!(ram(0x1000, 0x200).memory_window(), Some(0x1000..0x1200));

        let via = DeviceConfig::Via6522(ViaConfig {
            name: "via".into(),
            enabled: true,
            base: 0x6000,
        });
        assert_eq!(via.memory_window(), None);
    }

    #[test]
    fn test_acia_duplicate_register() {
        let config = DeviceConfig::Acia6551(AciaConfig {
            name: "acia".into(),
            enabled: true,
            data: 0x5000,
            status: 0x5001,
            command: 0x5001,
            control: 0x5003,
            simulate_chip_bug: false,
        });

        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateRegister {
                address: 0x5001,
                ..
            })
        ));
    }

    #[test]
    fn test_via_must_fit_sixteen_registers() {
        let config = |base| {
            DeviceConfig::Via6522(ViaConfig {
                name: "via".into(),
                enabled: true,
                base,
            })
        };

        assert!(config(0xFFF0).validate().is_ok());
        assert!(config(0xFFF1).validate().is_err());
    }
}
