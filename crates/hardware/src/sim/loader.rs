//! Program images and loading.
//!
//! This module builds the [`Program`] a simulation starts from. It provides:
//! 1. **In-memory images:** From instruction words or raw bytes at a base address.
//! 2. **Flat binaries:** Read from disk and placed at a base address.
//! 3. **ELF64 images:** Loadable segments (zero-filled to their memory size)
//!    and the entry point from the header, parsed with `object`.
//!
//! Placing an image into memory is the only step that touches the bus; a
//! segment outside RAM is reported as a `MemoryFault`.

use std::fs;
use std::path::{Path, PathBuf};

use object::{Architecture, Object, ObjectSegment};
use thiserror::Error;
use tracing::debug;

use crate::common::constants::MAX_RAM_SIZE;
use crate::common::error::{AccessKind, MemoryFault};
use crate::soc::traits::MemoryBus;

/// Failure to produce a program image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image file could not be read.
    #[error("could not read {}: {source}", path.display())]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The bytes are not a well-formed object file.
    #[error("malformed ELF image: {0}")]
    Elf(#[from] object::Error),
    /// The ELF image targets another architecture.
    #[error("ELF image targets {0}, expected RISC-V 64")]
    Architecture(String),
    /// A loadable segment is larger than any RAM the simulator models.
    #[error("ELF segment at {addr:#x} of {size} bytes exceeds the memory limit")]
    SegmentTooLarge {
        /// Load address of the segment.
        addr: u64,
        /// Memory size of the segment.
        size: u64,
    },
    /// The ELF image has nothing to load.
    #[error("ELF image has no loadable segments")]
    Empty,
}

/// A contiguous run of bytes placed at a fixed address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Load address of the first byte.
    pub addr: u64,
    /// Contents.
    pub data: Vec<u8>,
}

/// A loadable program image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    /// Address of the first instruction.
    pub entry: u64,
    /// Bytes to place in memory before the run.
    pub segments: Vec<Segment>,
}

impl Program {
    /// Image of little-endian 32-bit instruction words at `base`, entered at `base`.
    pub fn from_words(base: u64, words: &[u32]) -> Self {
        let data = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        Self::from_bytes(base, data)
    }

    /// Image of raw bytes at `base`, entered at `base`.
    ///
    /// Use this for mixed 16/32-bit code.
    pub fn from_bytes(base: u64, data: Vec<u8>) -> Self {
        Self {
            entry: base,
            segments: vec![Segment { addr: base, data }],
        }
    }

    /// Reads a flat binary from disk and places it at `base`.
    ///
    /// # Errors
    ///
    /// [`LoadError::Io`] when the file cannot be read.
    pub fn load_binary(path: impl AsRef<Path>, base: u64) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = data.len(), base, "loaded flat binary");
        Ok(Self::from_bytes(base, data))
    }

    /// Reads an ELF64 RISC-V executable from disk.
    ///
    /// # Errors
    ///
    /// [`LoadError::Io`] when the file cannot be read, otherwise any error of
    /// [`Program::from_elf`].
    pub fn load_elf(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_elf(&data)
    }

    /// Parses an ELF64 RISC-V executable.
    ///
    /// Each loadable segment becomes a [`Segment`] of its memory size, with
    /// the bytes past the file size zero-filled (`.bss`).
    ///
    /// # Errors
    ///
    /// [`LoadError::Elf`] for malformed input, [`LoadError::Architecture`]
    /// for a foreign target, [`LoadError::SegmentTooLarge`] for a segment
    /// above the memory limit and [`LoadError::Empty`] when nothing is loadable.
    pub fn from_elf(bytes: &[u8]) -> Result<Self, LoadError> {
        let file = object::File::parse(bytes)?;
        if file.architecture() != Architecture::Riscv64 {
            return Err(LoadError::Architecture(format!("{:?}", file.architecture())));
        }

        let mut segments = Vec::new();
        for seg in file.segments() {
            let file_bytes = seg.data()?;
            let mem_size = seg.size().max(file_bytes.len() as u64);
            if mem_size == 0 {
                continue;
            }
            let size = usize::try_from(mem_size)
                .ok()
                .filter(|&n| n <= MAX_RAM_SIZE)
                .ok_or(LoadError::SegmentTooLarge {
                    addr: seg.address(),
                    size: mem_size,
                })?;
            let mut data = vec![0; size];
            data[..file_bytes.len()].copy_from_slice(file_bytes);
            segments.push(Segment {
                addr: seg.address(),
                data,
            });
        }
        if segments.is_empty() {
            return Err(LoadError::Empty);
        }

        debug!(entry = file.entry(), segments = segments.len(), "parsed ELF image");
        Ok(Self {
            entry: file.entry(),
            segments,
        })
    }

    /// Total number of image bytes.
    pub fn len(&self) -> usize {
        self.segments.iter().map(|s| s.data.len()).sum()
    }

    /// True if the image carries no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies every segment into `bus`.
    ///
    /// # Errors
    ///
    /// [`MemoryFault`] (kind `Store`) for the first segment that does not
    /// fit; earlier segments stay written.
    pub fn load_into<B: MemoryBus + ?Sized>(&self, bus: &mut B) -> Result<(), MemoryFault> {
        for seg in &self.segments {
            bus.write_bytes(seg.addr, &seg.data)
                .map_err(|f| f.with_kind(AccessKind::Store))?;
        }
        Ok(())
    }
}
