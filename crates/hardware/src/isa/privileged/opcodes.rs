//! SYSTEM instruction encodings and host call numbers.

/// System instruction opcode (0b1110011).
pub const OP_SYSTEM: u32 = 0b111_0011;

/// Environment call (ECALL), the complete 32-bit word.
pub const ECALL: u32 = 0x0000_0073;

/// Breakpoint (EBREAK), the complete 32-bit word.
pub const EBREAK: u32 = 0x0010_0073;

/// Host call number for `write(fd, buf, len)`, taken from `a7`.
pub const SYS_WRITE: u64 = 64;

/// Host call number for `exit(code)`.
pub const SYS_EXIT: u64 = 93;

/// Host call number for `exit_group(code)`; treated as `exit`.
pub const SYS_EXIT_GROUP: u64 = 94;
