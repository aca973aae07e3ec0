//! Construction-time errors.
//!
//! Bus traffic itself never fails: unmapped reads return 0 and dropped writes
//! are silent. The fallible part of the crate is putting a machine together,
//! i.e. filling memory windows and validating device descriptors.

use std::io;

use thiserror::Error;

/// Failure to fill a RAM/ROM window from a byte source.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("load failed: {len} bytes at offset {offset:#06X} do not fit in a {capacity}-byte window")]
    DoesNotFit {
        len: usize,
        offset: usize,
        capacity: usize,
    },

    #[error("load failed: {0}")]
    Io(#[from] io::Error),
}

/// Invalid device descriptor.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name}: window at ${offset:04X} with size {size:#X} extends past $FFFF")]
    WindowOverflow { name: String, offset: u16, size: u32 },

    #[error("{name}: window size must be non-zero")]
    EmptyWindow { name: String },

    #[error("{name}: no image available for ROM")]
    MissingImage { name: String },

    #[error("{name}: ROM image rejected")]
    ImageTooLarge {
        name: String,
        #[source]
        source: LoadError,
    },

    #[error("{name}: register address ${address:04X} is bound more than once")]
    DuplicateRegister { name: String, address: u16 },
}
