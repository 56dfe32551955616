//! RISC-V Multiply/Divide Extension (M) selector.

/// `funct7` value marking a multiply or divide under `OP_REG`/`OP_REG_32`.
pub const M_EXTENSION: u32 = 0b000_0001;
