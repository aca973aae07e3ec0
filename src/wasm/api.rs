//! WASM API for the emulator.
//!
//! Provides JavaScript-callable interfaces for machine control, register
//! inspection and the serial terminal attached to the ACIA.

use crate::config::{AciaConfig, DeviceConfig, RamConfig, RomConfig};
use crate::{Acia6551, Computer, MemoryBus, RecvError};
use wasm_bindgen::prelude::*;

const ACIA: &str = "acia";
const ACIA_BASE: u16 = 0xA000;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

/// Standard machine layout: 32KB RAM at $0000, ACIA at $A000-$A003 with the
/// WDC transmit bug, 16KB ROM at $C000 holding the reset vector.
fn default_layout() -> Vec<DeviceConfig> {
    vec![
        DeviceConfig::Ram(RamConfig {
            name: "ram".into(),
            enabled: true,
            offset: 0x0000,
            size: 0x8000,
        }),
        DeviceConfig::Acia6551(AciaConfig {
            name: ACIA.into(),
            enabled: true,
            data: ACIA_BASE,
            status: ACIA_BASE + 1,
            command: ACIA_BASE + 2,
            control: ACIA_BASE + 3,
            simulate_chip_bug: true,
        }),
        DeviceConfig::Rom(RomConfig {
            name: "rom".into(),
            enabled: true,
            offset: 0xC000,
            size: 0x4000,
            path: "rom".into(),
        }),
    ]
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Emulator6502 {
    computer: Computer,
}

#[wasm_bindgen]
impl Emulator6502 {
    /// Builds the standard machine around `rom` (at most 16KB, loaded at
    /// $C000). Every byte the program transmits through the ACIA is passed
    /// to `on_transmit` as a one-character string.
    #[wasm_bindgen(constructor)]
    pub fn new(rom: Vec<u8>, on_transmit: js_sys::Function) -> Result<Emulator6502, JsError> {
        let mut computer = Computer::from_config(&default_layout(), |_| Some(rom.clone()))
            .map_err(|err| JsError::new(&err.to_string()))?;

        let acia = computer
            .device_mut::<Acia6551>(ACIA)
            .ok_or_else(|| JsError::new("ACIA missing from machine layout"))?;
        acia.set_transmit_callback(move |byte| {
            let text = char::from(byte).to_string();
            let _ = on_transmit.call1(&JsValue::NULL, &JsValue::from_str(&text));
        });

        Ok(Emulator6502 { computer })
    }

    /// Execute up to `count` instructions; returns how many ran
    pub fn step(&mut self, count: u32) -> u32 {
        self.computer.cpu_mut().step(count)
    }

    /// Reset the CPU (RAM and device state are kept)
    pub fn reset(&mut self) {
        self.computer.cpu_mut().reset();
    }

    /// True once an undocumented opcode halted the CPU
    #[wasm_bindgen(getter)]
    pub fn halted(&self) -> bool {
        self.computer.cpu().is_illegal_opcode_set()
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.computer.cpu().a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.computer.cpu().x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.computer.cpu().y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.computer.cpu().pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.computer.cpu().sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.computer.cpu().status()
    }

    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.computer.cpu().cycles() as f64 // Convert u64 to f64 for JavaScript
    }

    #[wasm_bindgen(getter)]
    pub fn instructions(&self) -> f64 {
        self.computer.cpu().instructions() as f64
    }

    /// Set the program counter
    pub fn set_pc(&mut self, addr: u16) {
        self.computer.cpu_mut().set_pc(addr);
    }

    // Serial terminal

    /// Deliver a byte typed into the terminal to the ACIA
    pub fn receive_char(&mut self, byte: u8) {
        if let Some(acia) = self.computer.device_mut::<Acia6551>(ACIA) {
            acia.recv_data(byte, RecvError::None);
        }
    }

    // Memory access methods

    /// Read a single byte through the bus (device reads have side effects)
    pub fn read_memory(&mut self, addr: u16) -> u8 {
        self.computer.bus_mut().read(addr)
    }

    /// Write a single byte through the bus
    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.computer.bus_mut().write(addr, value);
    }

    /// Load a program into memory and point PC at it
    pub fn load_program(&mut self, program: &[u8], start_addr: u16) {
        for (i, &byte) in program.iter().enumerate() {
            let addr = start_addr.wrapping_add(i as u16);
            self.computer.bus_mut().write(addr, byte);
        }
        self.computer.cpu_mut().set_pc(start_addr);
    }
}
