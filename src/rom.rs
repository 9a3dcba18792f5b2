//! The cartridge image being edited.
//!
//! Lawn Mower ships as a 24592-byte iNES NROM file
//! (<https://www.nesdev.org/wiki/INES>): 16-byte header, 16 KiB PRG ROM,
//! 8 KiB CHR ROM. The editor never parses the header; everything it touches
//! sits at a fixed absolute offset inside this buffer, so the image is kept
//! as one flat byte vector with bounds-checked access.

use std::fs;
use std::path::Path;

/// Expected image length: 16 (header) + 16384 (PRG) + 8192 (CHR).
pub const ROM_SIZE: usize = 24592;

#[derive(Debug, thiserror::Error)]
pub enum RomError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("offset {offset:#06X} outside ROM image of {len} bytes")]
    OutOfRange { offset: usize, len: usize },
    #[error("no such stage {0} (stages are 0-9)")]
    NoSuchStage(usize),
    #[error("no output file selected")]
    NoSelection,
}

/// A loaded ROM image. A buffer of the wrong length is flagged but stays
/// editable; only accesses that actually fall outside it fail.
pub struct RomImage {
    data: Vec<u8>,
    size_mismatch: bool,
}

impl RomImage {
    /// Wrap a byte buffer, warning when it is not exactly [`ROM_SIZE`] long.
    pub fn from_bytes(data: Vec<u8>) -> RomImage {
        let size_mismatch = data.len() != ROM_SIZE;
        if size_mismatch {
            log::warn!("read {} bytes expecting {}", data.len(), ROM_SIZE);
        }
        RomImage { data, size_mismatch }
    }

    /// Read an image from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<RomImage, RomError> {
        Ok(Self::from_bytes(fs::read(path)?))
    }

    /// Byte at an absolute offset.
    pub fn read_byte(&self, offset: usize) -> Result<u8, RomError> {
        self.data.get(offset).copied().ok_or(RomError::OutOfRange {
            offset,
            len: self.data.len(),
        })
    }

    /// Store a byte at an absolute offset.
    pub fn write_byte(&mut self, offset: usize, value: u8) -> Result<(), RomError> {
        let len = self.data.len();
        match self.data.get_mut(offset) {
            Some(byte) => {
                *byte = value;
                Ok(())
            }
            None => Err(RomError::OutOfRange { offset, len }),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the loaded buffer was not [`ROM_SIZE`] bytes.
    pub fn size_mismatch(&self) -> bool {
        self.size_mismatch
    }

    /// The whole buffer, for persisting.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Write the image back to disk.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RomError> {
        fs::write(path, &self.data)?;
        Ok(())
    }
}
