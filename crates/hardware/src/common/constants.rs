//! Global Constants.
//!
//! This module defines constants shared by the fetch path, the decoder and
//! the configuration layer:
//! 1. **Instruction Constants:** Sizes, masks and field shifts.
//! 2. **Architectural Limits:** Register count and the maximum issue width.

/// Bit mask for extracting the opcode field from an instruction.
pub const OPCODE_MASK: u32 = 0x7F;

/// Size of a compressed (16-bit) instruction in bytes.
pub const INSTRUCTION_SIZE_16: u64 = 2;

/// Size of a standard (32-bit) instruction in bytes.
pub const INSTRUCTION_SIZE_32: u64 = 4;

/// Bit mask selecting the two low bits that distinguish compressed encodings.
pub const COMPRESSED_INSTRUCTION_MASK: u16 = 0x3;

/// Low-bit pattern of a standard (uncompressed) instruction.
pub const COMPRESSED_INSTRUCTION_VALUE: u16 = 0x3;

/// Bit mask for a 5-bit register field.
pub const REG_MASK: u32 = 0x1F;

/// Bit position of the destination register (rd) field.
pub const RD_SHIFT: u32 = 7;

/// Bit position of the first source register (rs1) field.
pub const RS1_SHIFT: u32 = 15;

/// Bit position of the second source register (rs2) field.
pub const RS2_SHIFT: u32 = 20;

/// Number of integer registers.
pub const NUM_GPRS: usize = 32;

/// Widest supported issue width.
pub const MAX_PIPELINE_WIDTH: usize = 32;

/// Bytes fetched per lane per cycle; one standard instruction.
pub const FETCH_BYTES_PER_LANE: u64 = INSTRUCTION_SIZE_32;

/// Largest RAM the simulator will allocate, and the largest single ELF segment.
pub const MAX_RAM_SIZE: usize = 1 << 32;
